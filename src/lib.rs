pub mod api;
pub mod app;
pub mod bridge;
pub mod components;
pub mod job;
pub mod log_buffer;
pub mod progress;
pub mod subscription;
pub mod utils;

pub use app::App;
