pub mod config;
pub mod error;
pub mod gateway;
pub mod inference;
pub mod model;
pub mod protocol;
pub mod telemetry;

pub use error::{Error, Result};
