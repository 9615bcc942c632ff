//! Workout logging domain primitives.
//!
//! This crate owns request decoding, record construction, storage key layout
//! and notification wording. It intentionally excludes AWS SDK and Lambda
//! runtime concerns, which live in `fitlog_lambda`.

pub mod contract;
pub mod notification;
pub mod storage_keys;
