use std::any::Any;

use parse_display::Display;

/// Error type returned by user-supplied reducers, middlewares and observers.
pub type BoxError = Box<dyn std::error::Error>;

/// A failure captured while a store was running user code.
///
/// Failures never leave [`Store::dispatch`](crate::Store::dispatch).
/// They are recorded by the error-tracking cell registered with [`Store::track_errors`](crate::Store::track_errors).
#[non_exhaustive]
#[derive(Display, Debug)]
pub enum DispatchError {
    #[display("reducer `{state}` failed on `{action}`: {source}")]
    Reducer {
        state: &'static str,
        action: &'static str,
        source: BoxError,
    },
    #[display("middleware for `{target}` failed: {source}")]
    Middleware {
        target: &'static str,
        source: BoxError,
    },
    #[display("observer of `{state}` failed: {source}")]
    Observer {
        state: &'static str,
        source: BoxError,
    },
    #[display("deferred callback failed: {source}")]
    Callback { source: BoxError },
    #[display("dispatch of `{action}` exceeded the maximum depth of {depth}")]
    DepthExceeded { action: &'static str, depth: usize },
}

impl DispatchError {
    pub fn is_depth_exceeded(&self) -> bool {
        matches!(self, DispatchError::DepthExceeded { .. })
    }
}

impl std::error::Error for DispatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DispatchError::Reducer { source, .. }
            | DispatchError::Middleware { source, .. }
            | DispatchError::Observer { source, .. }
            | DispatchError::Callback { source } => Some(source.as_ref()),
            DispatchError::DepthExceeded { .. } => None,
        }
    }
}

/// A panic raised by user code, captured at the slot boundary.
#[derive(Display, Debug)]
#[display("panicked: {message}")]
pub struct PanicError {
    message: String,
}

impl PanicError {
    pub(crate) fn from_payload(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "<unknown panic payload>".to_string()
        };
        Self { message }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::error::Error for PanicError {}
