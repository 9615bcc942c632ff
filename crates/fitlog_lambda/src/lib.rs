//! AWS-oriented adapters and handlers for workout logging.
//!
//! This crate owns runtime integration details (the Lambda request pipeline,
//! HTTP response shaping, storage and notification seams, environment
//! configuration and log setup). Domain rules live in `fitlog_core`.

pub mod adapters;
pub mod config;
pub mod handlers;
pub mod logging;
