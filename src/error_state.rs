use std::rc::Rc;

use crate::{Action, DispatchError, Reduction, Store, Subscriptions};

#[cfg(test)]
mod tests;

/// State recording the failures captured by a [`Store`].
#[derive(Clone, Debug, Default)]
pub struct ErrorState {
    errors: Vec<Rc<DispatchError>>,
}

impl ErrorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded errors, oldest first.
    pub fn errors(&self) -> &[Rc<DispatchError>] {
        &self.errors
    }
    pub fn last(&self) -> Option<&DispatchError> {
        self.errors.last().map(|e| &**e)
    }
    pub fn len(&self) -> usize {
        self.errors.len()
    }
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

#[derive(Clone, Debug)]
pub enum ErrorAction {
    Append(Rc<DispatchError>),
    Clear,
}
impl Action for ErrorAction {
    type State = ErrorState;
}

pub fn reduce_errors(state: &ErrorState, action: &ErrorAction) -> Reduction<ErrorState> {
    match action {
        ErrorAction::Append(error) => {
            let mut errors = state.errors.clone();
            errors.push(error.clone());
            Reduction::Modified(ErrorState { errors })
        }
        ErrorAction::Clear if state.is_empty() => Reduction::Unmodified,
        ErrorAction::Clear => Reduction::Modified(ErrorState::new()),
    }
}

impl Store {
    /// Adds an [`ErrorState`] cell and its reducer.
    ///
    /// Every failure captured by the store is appended to the cell.
    /// Observe `ErrorState` to be notified of failures.
    pub fn track_errors(&self) -> Subscriptions {
        let mut s = Subscriptions::new();
        s += self.add_state(ErrorState::new());
        s += self.add_reducer(reduce_errors);
        s
    }
}
