//! Core library for the visa assessment lead funnel: configuration,
//! telemetry, and the intake/review workflows shared by every surface.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
