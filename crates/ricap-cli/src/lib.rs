//! Library side of the `ricap` command: configuration, logging, run stages
//! and summary rendering.

pub mod config;
pub mod logging;
pub mod pipeline;
pub mod summary;
pub mod types;
