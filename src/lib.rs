pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod launch;
pub mod platform;
pub mod rcfile;
pub mod runtime;
pub mod transport;
pub mod upgrade;
