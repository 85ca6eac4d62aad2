use std::{convert::Infallible, fmt::Display};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A descriptor or call parameter failed validation.
    #[error("bad parameter: {0}")]
    BadParam(String),

    /// No registered kernel variant matches the shape/dtype/hint combination.
    ///
    /// This is an expected outcome for inputs outside the hardware's
    /// optimized paths, not a fault.
    #[error("no kernel variant matches for `{op}`")]
    NotImplemented { op: &'static str },

    #[error("not supported: {0}")]
    NotSupported(String),

    /// An unrecognized enumerant reached a boundary conversion.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("execution queue failure: {0}")]
    ExecutionFailed(String),

    #[error("Message: {0}")]
    Msg(String),

    #[error("{inner}\n{backtrace}")]
    WithBacktrace {
        inner: Box<Self>,
        backtrace: Box<std::backtrace::Backtrace>,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a new error based on a printable error message.
    pub fn msg<M: Display>(msg: M) -> Self {
        Self::Msg(msg.to_string()).bt()
    }

    pub fn bad_param<M: Display>(msg: M) -> Self {
        Self::BadParam(msg.to_string())
    }

    pub fn bt(self) -> Self {
        let backtrace = std::backtrace::Backtrace::capture();
        match backtrace.status() {
            std::backtrace::BacktraceStatus::Disabled
            | std::backtrace::BacktraceStatus::Unsupported => self,
            _ => Self::WithBacktrace {
                inner: Box::new(self),
                backtrace: Box::new(backtrace),
            },
        }
    }

    /// The status code reported at the external boundary for this error.
    pub fn status(&self) -> Status {
        match self {
            Self::BadParam(_) => Status::BadParam,
            Self::NotImplemented { .. } | Self::NotSupported(_) => Status::NotSupported,
            Self::InvalidArgument(_) => Status::InvalidValue,
            Self::ExecutionFailed(_) => Status::ExecutionFailed,
            Self::Msg(_) => Status::InternalError,
            Self::WithBacktrace { inner, .. } => inner.status(),
        }
    }
}

/// Status codes of the external boundary, a closed enumeration.
///
/// Internally every fallible path works with [`Error`]; [`Error::status`]
/// projects onto this set exactly once, at the boundary. Selection failures
/// surface as [`Status::NotSupported`] so that callers can tell them apart
/// from genuine faults ([`Status::InternalError`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Success,
    NotInitialized,
    AllocFailed,
    BadParam,
    InternalError,
    InvalidValue,
    ArchMismatch,
    MappingError,
    ExecutionFailed,
    NotSupported,
    ConfigError,
    BadLd,
}

impl Status {
    /// Project a call result onto the boundary status set.
    pub fn of<T>(result: &Result<T>) -> Status {
        match result {
            Ok(_) => Status::Success,
            Err(e) => e.status(),
        }
    }
}

#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($crate::Error::Msg(format!($msg)).bt())
    };
    ($err:expr $(,)?) => {
        return Err($crate::Error::Msg(format!($err)).bt())
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::Error::Msg(format!($fmt, $($arg)*)).bt())
    };
}

/// Parameter validation: logs and short-circuits with `BadParam` before any
/// descriptor or argument state is touched.
macro_rules! ensure_param {
    ($cond:expr, $($arg:tt)*) => {
        if !($cond) {
            log::error!($($arg)*);
            return Err($crate::error::Error::BadParam(format!($($arg)*)));
        }
    };
}
pub(crate) use ensure_param;

pub(crate) mod private {
    pub trait Sealed {}

    impl<T, E> Sealed for std::result::Result<T, E> where E: std::error::Error {}
    impl<T> Sealed for Option<T> {}
}

/// Attach more context to an error.
///
/// Inspired by [`anyhow::Context`].
pub trait Context<T, E>: private::Sealed {
    /// Wrap the error value with additional context.
    fn context<C>(self, context: C) -> std::result::Result<T, Error>
    where
        C: Display + Send + Sync + 'static;

    /// Wrap the error value with additional context that is evaluated lazily
    /// only once an error does occur.
    fn with_context<C, F>(self, f: F) -> std::result::Result<T, Error>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E> Context<T, E> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context<C>(self, context: C) -> std::result::Result<T, Error>
    where
        C: Display + Send + Sync + 'static,
    {
        match self {
            Ok(ok) => Ok(ok),
            Err(error) => Err(Error::Msg(format!("{error}\n{context}"))),
        }
    }

    fn with_context<C, F>(self, context: F) -> std::result::Result<T, Error>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        match self {
            Ok(ok) => Ok(ok),
            Err(error) => Err(Error::Msg(format!("{error}\n{}", context()))),
        }
    }
}

impl<T> Context<T, Infallible> for Option<T> {
    fn context<C>(self, context: C) -> std::result::Result<T, Error>
    where
        C: Display + Send + Sync + 'static,
    {
        match self {
            Some(ok) => Ok(ok),
            None => Err(Error::msg(context)),
        }
    }

    fn with_context<C, F>(self, context: F) -> std::result::Result<T, Error>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        match self {
            Some(ok) => Ok(ok),
            None => Err(Error::msg(context())),
        }
    }
}
