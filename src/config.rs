use derive_ex::Ex;
use serde::{Deserialize, Serialize};

#[cfg(test)]
mod tests;

pub const DEFAULT_MAX_DISPATCH_DEPTH: usize = 64;

/// Settings of a [`Store`](crate::Store).
///
/// Missing fields take their default values when deserialized.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Ex)]
#[derive_ex(Default)]
#[default(Self::new())]
#[serde(default)]
pub struct StoreConfig {
    /// Maximum number of dispatches that may be nested inside one another.
    ///
    /// A dispatch that would go deeper is dropped and recorded as
    /// [`DispatchError::DepthExceeded`](crate::DispatchError::DepthExceeded).
    pub max_dispatch_depth: usize,

    /// Convert panics raised by reducers, middlewares, observers and deferred callbacks into errors.
    ///
    /// When `false`, such panics unwind out of [`Store::dispatch`](crate::Store::dispatch).
    ///
    /// Captured panics still go through the panic hook, so the default hook prints them to stderr.
    /// Install a hook with [`std::panic::set_hook`] to silence them.
    pub catch_panics: bool,
}

impl StoreConfig {
    pub const fn new() -> Self {
        Self {
            max_dispatch_depth: DEFAULT_MAX_DISPATCH_DEPTH,
            catch_panics: true,
        }
    }
    pub fn with_max_dispatch_depth(mut self, depth: usize) -> Self {
        self.max_dispatch_depth = depth;
        self
    }
    pub fn with_catch_panics(mut self, catch_panics: bool) -> Self {
        self.catch_panics = catch_panics;
        self
    }
}
