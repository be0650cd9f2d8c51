pub mod cli;
pub mod config;
pub mod errors;
pub mod models;
pub mod presenter;
pub mod render;
pub mod services;
pub mod utils;
