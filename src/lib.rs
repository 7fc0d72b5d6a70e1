pub mod analyzers;
pub mod config;
pub mod context;
pub mod dashboard;
pub mod error;
pub mod output;
pub mod parser;
pub mod record;
pub mod server;
