//! Persistence layer: append-only per-user CSV result logs.

pub mod results;

pub use results::{ResultLog, TestRecord};
