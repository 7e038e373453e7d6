pub mod api;
pub mod color;
pub mod convert;
pub mod error;
