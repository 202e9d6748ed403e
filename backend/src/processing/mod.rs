pub mod parser;
pub mod processor;
