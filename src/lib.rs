//! Wellbeing survey bot: a fixed-question conversation over chat channels.

pub mod bot;
pub mod channels;
pub mod config;
pub mod error;
pub mod llm;
pub mod scoring;
pub mod store;
pub mod survey;
