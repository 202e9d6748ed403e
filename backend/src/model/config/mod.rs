pub mod macros;
mod log;
mod matching;
mod resolver;

pub use self::log::*;
pub use self::matching::*;
pub use self::resolver::*;
