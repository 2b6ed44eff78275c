mod app;
mod command;
mod config;
mod effects;
mod logging;
mod persistence;
mod render;

pub use app::run_app;
