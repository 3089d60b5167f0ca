pub mod cli;
pub mod reports;
pub mod repl;
