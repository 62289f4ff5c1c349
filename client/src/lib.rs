pub mod cli;
pub mod env;
pub mod formatter;
pub mod pages;
pub mod session;
