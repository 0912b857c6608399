mod client;
mod dev_backend;

pub use client::{is_not_found, ApiClient};
