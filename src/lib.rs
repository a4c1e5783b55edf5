pub mod color;
pub mod config;
pub mod data;
pub mod demo;
pub mod error;
pub mod logging;
pub mod ml;
pub mod plot;
pub mod smoke;
