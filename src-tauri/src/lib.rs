pub mod download;
pub mod error;
pub mod events;
pub mod job;
pub mod lrc;
pub mod models;
pub mod process;
pub mod settings;

mod app;
mod commands;

pub use app::run;
