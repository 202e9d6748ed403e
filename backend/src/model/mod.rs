mod config;
mod report;

pub use self::config::*;
pub use self::report::*;
