pub mod app;
pub mod cache;
pub mod config;
pub mod feed;
pub mod models;
pub mod refresh;
pub mod state;
pub mod tui;
pub mod view;

#[derive(Debug, Clone)]
pub struct Error {
    pub message: String,
}

impl Error {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
