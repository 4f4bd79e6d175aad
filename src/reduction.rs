use crate::{BoxError, Effect};

/// Result of applying a reducer or a state middleware to a state.
#[derive(Debug)]
pub enum Reduction<S> {
    Unmodified,
    Modified(S),
    ModifiedWithEffect(S, Effect),
    EffectOnly(Effect),
}

impl<S> Reduction<S> {
    pub fn is_modified(&self) -> bool {
        matches!(
            self,
            Reduction::Modified(_) | Reduction::ModifiedWithEffect(..)
        )
    }

    pub fn map<T>(self, f: impl FnOnce(S) -> T) -> Reduction<T> {
        match self {
            Reduction::Unmodified => Reduction::Unmodified,
            Reduction::Modified(state) => Reduction::Modified(f(state)),
            Reduction::ModifiedWithEffect(state, effect) => {
                Reduction::ModifiedWithEffect(f(state), effect)
            }
            Reduction::EffectOnly(effect) => Reduction::EffectOnly(effect),
        }
    }

    /// Splits into the new state, if any, and the effect.
    pub fn into_parts(self) -> (Option<S>, Effect) {
        match self {
            Reduction::Unmodified => (None, Effect::None),
            Reduction::Modified(state) => (Some(state), Effect::None),
            Reduction::ModifiedWithEffect(state, effect) => (Some(state), effect),
            Reduction::EffectOnly(effect) => (None, effect),
        }
    }
}

impl<S> From<Option<S>> for Reduction<S> {
    fn from(value: Option<S>) -> Self {
        match value {
            Some(state) => Reduction::Modified(state),
            None => Reduction::Unmodified,
        }
    }
}

/// Return values of reducers and state middlewares.
pub trait IntoReduction<S> {
    fn into_reduction(self) -> Result<Reduction<S>, BoxError>;
}

impl<S> IntoReduction<S> for Reduction<S> {
    fn into_reduction(self) -> Result<Reduction<S>, BoxError> {
        Ok(self)
    }
}
impl<S> IntoReduction<S> for Option<S> {
    fn into_reduction(self) -> Result<Reduction<S>, BoxError> {
        Ok(self.into())
    }
}
impl<S, E: Into<BoxError>> IntoReduction<S> for Result<Reduction<S>, E> {
    fn into_reduction(self) -> Result<Reduction<S>, BoxError> {
        self.map_err(Into::into)
    }
}
