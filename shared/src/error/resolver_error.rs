use std::error::Error;
use std::fmt::{Display, Formatter, Result};

#[macro_export]
macro_rules! info_err {
    // This matches any arguments (format string + variables) and forwards them
    // to format!, then wraps them in your Error constructor.
    ($($arg:tt)*) => {
        $crate::error::ResolverError::new($crate::error::ResolverErrorKind::Info, format!($($arg)*))
    };
}

pub use info_err;

#[macro_export]
macro_rules! info_err_res {
    ($($arg:tt)*) => {
        Err($crate::error::ResolverError::new($crate::error::ResolverErrorKind::Info, format!($($arg)*)))
    };
}

pub use info_err_res;

#[macro_export]
macro_rules! input_err_res {
    ($($arg:tt)*) => {
        Err($crate::error::ResolverError::new($crate::error::ResolverErrorKind::InvalidInput, format!($($arg)*)))
    };
}

pub use input_err_res;

#[macro_export]
macro_rules! handle_resolver_error_result {
    ($kind:expr, $result: expr) => {
        match $result {
            Ok(value) => value,
            Err(err) => return Err($crate::error::ResolverError::new($kind, err.to_string())),
        }
    }
}
pub use handle_resolver_error_result;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ResolverErrorKind {
    // io, parse and other runtime failures
    Info,
    // caller broke an input contract, detected before processing
    InvalidInput,
}

#[derive(Debug)]
pub struct ResolverError {
    pub kind: ResolverErrorKind,
    pub message: String,
}

impl ResolverError {
    pub const fn new(kind: ResolverErrorKind, message: String) -> Self {
        Self { kind, message }
    }

    pub fn is_invalid_input(&self) -> bool {
        self.kind == ResolverErrorKind::InvalidInput
    }
}

impl Display for ResolverError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self.kind {
            ResolverErrorKind::Info => write!(f, "Resolver error: {}", self.message),
            ResolverErrorKind::InvalidInput => write!(f, "Invalid input: {}", self.message),
        }
    }
}

impl Error for ResolverError {}
