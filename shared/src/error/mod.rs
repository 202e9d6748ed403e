mod resolver_error;

pub use self::resolver_error::*;
