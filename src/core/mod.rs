//! Core functionality for chanscrape

pub mod models;
pub mod progress;
pub mod scraper;
pub mod settings;

pub use models::*;
pub use progress::*;
pub use scraper::*;
pub use settings::*;
