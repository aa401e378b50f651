pub mod commands;
pub mod input;
pub mod telemetry;
