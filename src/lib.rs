pub mod analysis;
pub mod api;
pub mod app_state;
pub mod config;
pub mod editor;
pub mod export;
pub mod health;
pub mod resume;
pub mod richtext;
pub mod suggestions;
