mod client;
pub mod content;
pub mod domain;
pub mod preview;
pub mod qr;
mod storypath_url;

pub(crate) use storypath_url::*;

pub use client::*;
pub use domain::*;
pub use preview::{HomeBody, PreviewScreen, PreviewSession, HOMESCREEN};
