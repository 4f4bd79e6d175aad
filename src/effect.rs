use std::{fmt, slice};

use crate::{AnyAction, BoxError, Store};

#[cfg(test)]
mod tests;

/// A follow-up instruction returned by reducers, middlewares and observers.
///
/// Effects are data. They are executed by the store after the pass that produced them,
/// in the order they were produced.
#[derive(Default)]
pub enum Effect {
    #[default]
    None,
    Dispatch(AnyAction),
    DispatchAll(Vec<AnyAction>),
    Other(Box<dyn FnOnce(&Store)>),
}

impl Effect {
    pub fn dispatch(action: impl Into<AnyAction>) -> Self {
        Effect::Dispatch(action.into())
    }
    pub fn dispatch_all<I>(actions: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<AnyAction>,
    {
        Effect::DispatchAll(actions.into_iter().map(Into::into).collect())
    }

    /// Creates an effect that calls `f` once the current pass has completed.
    pub fn from_fn(f: impl FnOnce(&Store) + 'static) -> Self {
        Effect::Other(Box::new(f))
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Effect::None)
    }

    /// Actions this effect will dispatch.
    pub fn actions(&self) -> &[AnyAction] {
        match self {
            Effect::Dispatch(action) => slice::from_ref(action),
            Effect::DispatchAll(actions) => actions,
            Effect::None | Effect::Other(_) => &[],
        }
    }
}

impl fmt::Debug for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Effect::None => write!(f, "None"),
            Effect::Dispatch(action) => f.debug_tuple("Dispatch").field(action).finish(),
            Effect::DispatchAll(actions) => f.debug_tuple("DispatchAll").field(actions).finish(),
            Effect::Other(_) => write!(f, "Other(..)"),
        }
    }
}

/// Return values of observers.
pub trait IntoEffect {
    fn into_effect(self) -> Result<Effect, BoxError>;
}

impl IntoEffect for () {
    fn into_effect(self) -> Result<Effect, BoxError> {
        Ok(Effect::None)
    }
}
impl IntoEffect for Effect {
    fn into_effect(self) -> Result<Effect, BoxError> {
        Ok(self)
    }
}
impl<T: IntoEffect, E: Into<BoxError>> IntoEffect for Result<T, E> {
    fn into_effect(self) -> Result<Effect, BoxError> {
        self.map_err(Into::into)?.into_effect()
    }
}

/// Return values of action middlewares.
pub trait IntoEffects {
    fn into_effects(self) -> Result<Vec<Effect>, BoxError>;
}

impl IntoEffects for () {
    fn into_effects(self) -> Result<Vec<Effect>, BoxError> {
        Ok(Vec::new())
    }
}
impl IntoEffects for Effect {
    fn into_effects(self) -> Result<Vec<Effect>, BoxError> {
        Ok(vec![self])
    }
}
impl IntoEffects for Vec<Effect> {
    fn into_effects(self) -> Result<Vec<Effect>, BoxError> {
        Ok(self)
    }
}
impl<T: IntoEffects, E: Into<BoxError>> IntoEffects for Result<T, E> {
    fn into_effects(self) -> Result<Vec<Effect>, BoxError> {
        self.map_err(Into::into)?.into_effects()
    }
}
