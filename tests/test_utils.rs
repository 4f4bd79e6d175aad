#![allow(dead_code)]

use std::{cell::RefCell, rc::Rc};

use assert_call::call;
use reductor::*;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CounterState {
    pub counter: i32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CounterAction {
    Increase,
    Decrease,
    Double,
    Nothing,
    Disaster,
}
impl Action for CounterAction {
    type State = CounterState;
}

pub fn counter_reducer(
    state: &CounterState,
    action: &CounterAction,
) -> Result<Reduction<CounterState>, BoxError> {
    call!("reduce {:?}", action);
    let counter = match action {
        CounterAction::Increase => state.counter + 1,
        CounterAction::Decrease => state.counter - 1,
        CounterAction::Double => state.counter * 2,
        CounterAction::Nothing => return Ok(Reduction::Unmodified),
        CounterAction::Disaster => return Err("disaster".into()),
    };
    Ok(Reduction::Modified(CounterState { counter }))
}

pub fn counter_observer(state: &CounterState, reason: Reason) {
    call!("observe {} {}", reason, state.counter);
}

/// Keeps the most recent value of a state type.
pub struct Latest<S> {
    value: Rc<RefCell<Option<S>>>,
    _s: Subscription,
}
impl<S: Clone + 'static> Latest<S> {
    pub fn new(store: &Store) -> Self {
        let value = Rc::new(RefCell::new(None));
        let value0 = value.clone();
        let _s = store.subscribe_with(Priority::Low, move |state: &S, _| {
            *value0.borrow_mut() = Some(state.clone());
        });
        Self { value, _s }
    }
    pub fn get(&self) -> Option<S> {
        self.value.borrow().clone()
    }
}

/// Installs a `tracing` subscriber writing to the test output.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
