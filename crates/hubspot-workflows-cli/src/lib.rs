#![forbid(unsafe_code)]

pub(crate) mod auth;
mod cli;
pub(crate) mod client;
pub(crate) mod config;
pub mod error;
pub(crate) mod payload;
#[cfg(test)]
mod testing;

pub use cli::run;
pub use error::WorkflowError;
