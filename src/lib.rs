pub mod config;
pub mod converter;
pub mod error;
pub mod loader;
pub mod page;
pub mod parser;
pub mod prelude;
pub mod server;
pub mod source;
pub mod theme;
