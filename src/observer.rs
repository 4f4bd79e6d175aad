use parse_display::Display;

/// Why an observer was called.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[display(style = "snake_case")]
pub enum Reason {
    /// The observer was just subscribed, or the cell was just added.
    Subscribed,
    /// A reducer committed a new state.
    Modified,
    /// A state middleware replaced the state committed by a reducer.
    Middleware,
}

impl Reason {
    pub fn is_subscribed(self) -> bool {
        self == Reason::Subscribed
    }
    pub fn is_modified(self) -> bool {
        self == Reason::Modified
    }
    pub fn is_middleware(self) -> bool {
        self == Reason::Middleware
    }
}

/// Order in which observers of the same state are notified.
///
/// Observers with higher priority are notified first.
/// Observers with the same priority are notified in registration order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(style = "snake_case")]
pub enum Priority {
    High,
    #[default]
    Normal,
    Low,
}
