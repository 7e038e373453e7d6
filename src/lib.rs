pub mod backend;
pub mod config;
pub mod console;
pub mod error;
pub mod handler;
pub mod model;
