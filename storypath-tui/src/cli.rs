use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "storypath-tui")]
#[command(about = "Terminal UI for authoring StoryPath tours")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run against the StoryPath REST backend
    Run {
        /// Route to open first, e.g. /projects or /preview/3
        #[arg(long, default_value = "/")]
        path: String,
    },
    /// Run in dev mode with local in-memory data
    Dev {
        /// Route to open first, e.g. /projects or /preview/3
        #[arg(long, default_value = "/")]
        path: String,
    },
    /// Save the username and API token used for every request
    Login,
    /// Remove the saved session
    Logout,
    /// Print config path and create default file if missing
    ConfigPath,
}
