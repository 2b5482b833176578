//! Command handlers -- one module per subcommand

pub mod config;
pub mod dashboard;
pub mod events;
pub mod metrics;
pub mod rules;
pub mod shell;
pub mod timeline;
