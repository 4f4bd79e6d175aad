use std::{
    any::{type_name, TypeId},
    cell::RefCell,
    marker::PhantomData,
};

use crate::{
    slot::StateBox, Action, AnyAction, BoxError, Effect, IntoEffect, IntoEffects, IntoReduction,
    Priority, Reason, Reduction,
};

pub(crate) type SlotResult<T> = Option<Result<T, BoxError>>;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub(crate) enum SlotKind {
    Cell,
    Reducer,
    ActionMiddleware,
    StateMiddleware,
    Observer,
}

pub(crate) struct CellSlot {
    value: RefCell<StateBox>,
    state_type: TypeId,
    state_name: &'static str,
}

impl CellSlot {
    pub fn new(value: StateBox) -> Self {
        Self {
            state_type: value.type_id(),
            state_name: value.type_name(),
            value: RefCell::new(value),
        }
    }
    pub fn state_type(&self) -> TypeId {
        self.state_type
    }
    pub fn state_name(&self) -> &'static str {
        self.state_name
    }
    pub fn get(&self) -> StateBox {
        self.value.borrow().clone()
    }
    pub fn set(&self, value: StateBox) {
        assert_eq!(value.type_id(), self.state_type);
        *self.value.borrow_mut() = value;
    }
}

// All `reduce`, `intercept` and `notify` methods return `None` when the slot does not accept
// the given state or action.

pub(crate) trait DynReducer {
    fn action_type(&self) -> TypeId;
    fn action_name(&self) -> &'static str;
    fn reduce(&self, state: &StateBox, action: &AnyAction) -> SlotResult<Reduction<StateBox>>;
}

pub(crate) struct ReducerFn<S, A, F, R> {
    f: F,
    _phantom: PhantomData<fn(&S, &A) -> R>,
}
impl<S, A, F, R> ReducerFn<S, A, F, R>
where
    S: 'static,
    A: Action<State = S>,
    F: Fn(&S, &A) -> R + 'static,
    R: IntoReduction<S>,
{
    pub fn new(f: F) -> Self {
        Self {
            f,
            _phantom: PhantomData,
        }
    }
}
impl<S, A, F, R> DynReducer for ReducerFn<S, A, F, R>
where
    S: 'static,
    A: Action<State = S>,
    F: Fn(&S, &A) -> R + 'static,
    R: IntoReduction<S> + 'static,
{
    fn action_type(&self) -> TypeId {
        TypeId::of::<A>()
    }
    fn action_name(&self) -> &'static str {
        type_name::<A>()
    }
    fn reduce(&self, state: &StateBox, action: &AnyAction) -> SlotResult<Reduction<StateBox>> {
        let state = state.unwrap::<S>()?;
        let action = action.downcast_ref::<A>()?;
        Some(
            (self.f)(state, action)
                .into_reduction()
                .map(|r| r.map(StateBox::wrap)),
        )
    }
}

pub(crate) trait DynActionMiddleware {
    fn target_name(&self) -> &'static str;
    fn intercept(&self, action: &AnyAction) -> SlotResult<Vec<Effect>>;
}

pub(crate) struct ActionMiddlewareFn<A, F, R> {
    f: F,
    _phantom: PhantomData<fn(&A) -> R>,
}
impl<A, F, R> ActionMiddlewareFn<A, F, R>
where
    A: Action,
    F: Fn(&A) -> R + 'static,
    R: IntoEffects,
{
    pub fn new(f: F) -> Self {
        Self {
            f,
            _phantom: PhantomData,
        }
    }
}
impl<A, F, R> DynActionMiddleware for ActionMiddlewareFn<A, F, R>
where
    A: Action,
    F: Fn(&A) -> R + 'static,
    R: IntoEffects + 'static,
{
    fn target_name(&self) -> &'static str {
        type_name::<A>()
    }
    fn intercept(&self, action: &AnyAction) -> SlotResult<Vec<Effect>> {
        let action = action.downcast_ref::<A>()?;
        Some((self.f)(action).into_effects())
    }
}

pub(crate) struct AnyActionMiddlewareFn<F, R> {
    f: F,
    _phantom: PhantomData<fn() -> R>,
}
impl<F, R> AnyActionMiddlewareFn<F, R>
where
    F: Fn(&AnyAction) -> R + 'static,
    R: IntoEffects,
{
    pub fn new(f: F) -> Self {
        Self {
            f,
            _phantom: PhantomData,
        }
    }
}
impl<F, R> DynActionMiddleware for AnyActionMiddlewareFn<F, R>
where
    F: Fn(&AnyAction) -> R + 'static,
    R: IntoEffects + 'static,
{
    fn target_name(&self) -> &'static str {
        "<any action>"
    }
    fn intercept(&self, action: &AnyAction) -> SlotResult<Vec<Effect>> {
        Some((self.f)(action).into_effects())
    }
}

pub(crate) trait DynStateMiddleware {
    fn state_type(&self) -> TypeId;
    fn state_name(&self) -> &'static str;
    fn intercept(&self, state: &StateBox) -> SlotResult<Reduction<StateBox>>;
}

pub(crate) struct StateMiddlewareFn<S, F, R> {
    f: F,
    _phantom: PhantomData<fn(&S) -> R>,
}
impl<S, F, R> StateMiddlewareFn<S, F, R>
where
    S: 'static,
    F: Fn(&S) -> R + 'static,
    R: IntoReduction<S>,
{
    pub fn new(f: F) -> Self {
        Self {
            f,
            _phantom: PhantomData,
        }
    }
}
impl<S, F, R> DynStateMiddleware for StateMiddlewareFn<S, F, R>
where
    S: 'static,
    F: Fn(&S) -> R + 'static,
    R: IntoReduction<S> + 'static,
{
    fn state_type(&self) -> TypeId {
        TypeId::of::<S>()
    }
    fn state_name(&self) -> &'static str {
        type_name::<S>()
    }
    fn intercept(&self, state: &StateBox) -> SlotResult<Reduction<StateBox>> {
        let state = state.unwrap::<S>()?;
        Some(
            (self.f)(state)
                .into_reduction()
                .map(|r| r.map(StateBox::wrap)),
        )
    }
}

pub(crate) trait DynObserver {
    fn state_type(&self) -> TypeId;
    fn state_name(&self) -> &'static str;
    fn priority(&self) -> Priority;
    fn notify(&self, state: &StateBox, reason: Reason) -> SlotResult<Effect>;
}

pub(crate) struct ObserverFn<S, F, R> {
    f: F,
    priority: Priority,
    _phantom: PhantomData<fn(&S) -> R>,
}
impl<S, F, R> ObserverFn<S, F, R>
where
    S: 'static,
    F: Fn(&S, Reason) -> R + 'static,
    R: IntoEffect,
{
    pub fn new(priority: Priority, f: F) -> Self {
        Self {
            f,
            priority,
            _phantom: PhantomData,
        }
    }
}
impl<S, F, R> DynObserver for ObserverFn<S, F, R>
where
    S: 'static,
    F: Fn(&S, Reason) -> R + 'static,
    R: IntoEffect + 'static,
{
    fn state_type(&self) -> TypeId {
        TypeId::of::<S>()
    }
    fn state_name(&self) -> &'static str {
        type_name::<S>()
    }
    fn priority(&self) -> Priority {
        self.priority
    }
    fn notify(&self, state: &StateBox, reason: Reason) -> SlotResult<Effect> {
        let state = state.unwrap::<S>()?;
        Some((self.f)(state, reason).into_effect())
    }
}
