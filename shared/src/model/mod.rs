mod channel;
mod identity;
mod cluster;
mod match_result;
mod config;

pub use self::channel::*;
pub use self::identity::*;
pub use self::cluster::*;
pub use self::match_result::*;
pub use self::config::*;
