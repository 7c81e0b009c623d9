// Domain layer - Pure telemetry models with no I/O
pub mod dashboard;
pub mod error;
pub mod reading;
pub mod telemetry;
pub mod time_window;
