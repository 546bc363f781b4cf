pub mod browser;
pub mod catalog;
pub mod filters;
pub mod loader;
pub mod logging;
pub mod output;
pub mod parser;
pub mod prompt;
pub mod reports;
pub mod session;
pub mod table;
