pub mod args;
pub mod driver;
pub mod tracing_config;
