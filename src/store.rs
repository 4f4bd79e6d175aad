use std::{
    any::Any,
    cell::{Cell, RefCell},
    fmt,
    mem::replace,
    panic::{catch_unwind, AssertUnwindSafe},
    rc::Rc,
};

use derive_ex::Ex;
use tracing::{debug, trace, warn};

use crate::{
    error::PanicError,
    slot::{SlotKey, SlotTable, StateBox},
    Action, AnyAction, BoxError, DispatchError, Effect, ErrorAction, IntoEffect, IntoEffects,
    IntoReduction, Priority, Reason, StoreConfig, Subscription,
};

pub(crate) mod slots;


use slots::*;

/// Container of states, reducers, middlewares and observers.
///
/// `Store` is a cheap handle; clones refer to the same store.
/// Every registration returns a [`Subscription`] that removes the registered item when disposed.
///
/// All operations may be called from inside reducers, middlewares, observers and effects.
/// Nested dispatches are processed completely before the call that started them returns.
#[derive(Clone, Ex)]
#[derive_ex(Default)]
#[default(Self::new())]
pub struct Store(Rc<RawStore>);

pub(crate) struct RawStore {
    config: StoreConfig,
    slots: RefCell<Slots>,
    depth: Cell<usize>,
    error_depth: Cell<usize>,
}

struct Slots {
    generation: u64,
    cells: SlotTable<CellSlot>,
    reducers: SlotTable<dyn DynReducer>,
    action_middlewares: SlotTable<dyn DynActionMiddleware>,
    state_middlewares: SlotTable<dyn DynStateMiddleware>,
    observers: SlotTable<dyn DynObserver>,
}
impl Slots {
    fn new(generation: u64) -> Self {
        Self {
            generation,
            cells: SlotTable::new(),
            reducers: SlotTable::new(),
            action_middlewares: SlotTable::new(),
            state_middlewares: SlotTable::new(),
            observers: SlotTable::new(),
        }
    }
    fn next_generation(&mut self) -> u64 {
        let generation = self.generation;
        self.generation += 1;
        generation
    }
    fn len(&self) -> usize {
        self.cells.len()
            + self.reducers.len()
            + self.action_middlewares.len()
            + self.state_middlewares.len()
            + self.observers.len()
    }
}

impl RawStore {
    pub(crate) fn contains(&self, kind: SlotKind, key: SlotKey) -> bool {
        let slots = self.slots.borrow();
        match kind {
            SlotKind::Cell => slots.cells.contains(key),
            SlotKind::Reducer => slots.reducers.contains(key),
            SlotKind::ActionMiddleware => slots.action_middlewares.contains(key),
            SlotKind::StateMiddleware => slots.state_middlewares.contains(key),
            SlotKind::Observer => slots.observers.contains(key),
        }
    }

    pub(crate) fn remove(&self, kind: SlotKind, key: SlotKey) {
        let mut slots = self.slots.borrow_mut();
        let removed: Option<Box<dyn Any>> = match kind {
            SlotKind::Cell => slots.cells.remove(key).map(|s| Box::new(s) as Box<dyn Any>),
            SlotKind::Reducer => slots.reducers.remove(key).map(|s| Box::new(s) as Box<dyn Any>),
            SlotKind::ActionMiddleware => {
                slots.action_middlewares.remove(key).map(|s| Box::new(s) as Box<dyn Any>)
            }
            SlotKind::StateMiddleware => {
                slots.state_middlewares.remove(key).map(|s| Box::new(s) as Box<dyn Any>)
            }
            SlotKind::Observer => slots.observers.remove(key).map(|s| Box::new(s) as Box<dyn Any>),
        };
        drop(slots);
        if removed.is_some() {
            debug!(?kind, "slot removed");
        }
        // Dropping the slot may run arbitrary destructors that use the store.
        drop(removed);
    }
}

struct DepthGuard<'a>(&'a Cell<usize>);

impl<'a> DepthGuard<'a> {
    fn enter(depth: &'a Cell<usize>) -> Self {
        depth.set(depth.get() + 1);
        Self(depth)
    }
}
impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        self.0.set(self.0.get() - 1);
    }
}

fn push_effect(effects: &mut Vec<Effect>, effect: Effect) {
    if !effect.is_none() {
        effects.push(effect);
    }
}

impl Store {
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }
    pub fn with_config(config: StoreConfig) -> Self {
        Self(Rc::new(RawStore {
            config,
            slots: RefCell::new(Slots::new(0)),
            depth: Cell::new(0),
            error_depth: Cell::new(0),
        }))
    }
    pub fn config(&self) -> &StoreConfig {
        &self.0.config
    }

    /// Number of live cells, reducers, middlewares and observers.
    pub fn count(&self) -> usize {
        self.0.slots.borrow().len()
    }

    /// Removes every cell, reducer, middleware and observer.
    ///
    /// Outstanding [`Subscription`]s become no-ops.
    pub fn clear(&self) {
        let old = {
            let mut slots = self.0.slots.borrow_mut();
            let generation = slots.generation;
            replace(&mut *slots, Slots::new(generation))
        };
        debug!(count = old.len(), "store cleared");
    }

    fn insert<T: ?Sized>(
        &self,
        table: impl FnOnce(&mut Slots) -> &mut SlotTable<T>,
        value: Rc<T>,
    ) -> SlotKey {
        let mut slots = self.0.slots.borrow_mut();
        let generation = slots.next_generation();
        table(&mut *slots).insert(generation, value)
    }
    fn subscription(&self, kind: SlotKind, key: SlotKey) -> Subscription {
        Subscription::from_slot(&self.0, kind, key)
    }

    /// Adds a cell holding `state`.
    ///
    /// Observers of `S` are called with [`Reason::Subscribed`].
    pub fn add_state<S: 'static>(&self, state: S) -> Subscription {
        let value = StateBox::wrap(state);
        let key = self.insert(|s| &mut s.cells, Rc::new(CellSlot::new(value.clone())));
        debug!(state = value.type_name(), "cell added");

        let mut effects = Vec::new();
        self.notify(&value, Reason::Subscribed, &mut effects);
        self.process_effects(effects);
        self.subscription(SlotKind::Cell, key)
    }

    /// Adds a reducer called for every action of type `A` on every cell of type `S`.
    pub fn add_reducer<S, A, R>(&self, f: impl Fn(&S, &A) -> R + 'static) -> Subscription
    where
        S: 'static,
        A: Action<State = S>,
        R: IntoReduction<S> + 'static,
    {
        let reducer: Rc<dyn DynReducer> = Rc::new(ReducerFn::new(f));
        debug!(action = reducer.action_name(), "reducer added");
        let key = self.insert(|s| &mut s.reducers, reducer);
        self.subscription(SlotKind::Reducer, key)
    }

    /// Adds a middleware called for every dispatched action of type `A` before any reducer.
    pub fn add_action_middleware<A, R>(&self, f: impl Fn(&A) -> R + 'static) -> Subscription
    where
        A: Action,
        R: IntoEffects + 'static,
    {
        let m: Rc<dyn DynActionMiddleware> = Rc::new(ActionMiddlewareFn::new(f));
        self.add_action_middleware_raw(m)
    }

    /// Adds a middleware called for every dispatched action before any reducer.
    pub fn add_any_action_middleware<R>(
        &self,
        f: impl Fn(&AnyAction) -> R + 'static,
    ) -> Subscription
    where
        R: IntoEffects + 'static,
    {
        let m: Rc<dyn DynActionMiddleware> = Rc::new(AnyActionMiddlewareFn::new(f));
        self.add_action_middleware_raw(m)
    }

    fn add_action_middleware_raw(&self, m: Rc<dyn DynActionMiddleware>) -> Subscription {
        debug!(middleware = m.target_name(), "action middleware added");
        let key = self.insert(|s| &mut s.action_middlewares, m);
        self.subscription(SlotKind::ActionMiddleware, key)
    }

    /// Adds a middleware called for a cell of type `S` each time a reducer commits a new state to it.
    ///
    /// If the middleware returns a new state, it is committed and observers are called again
    /// with [`Reason::Middleware`].
    pub fn add_state_middleware<S, R>(&self, f: impl Fn(&S) -> R + 'static) -> Subscription
    where
        S: 'static,
        R: IntoReduction<S> + 'static,
    {
        let m: Rc<dyn DynStateMiddleware> = Rc::new(StateMiddlewareFn::new(f));
        debug!(state = m.state_name(), "state middleware added");
        let key = self.insert(|s| &mut s.state_middlewares, m);
        self.subscription(SlotKind::StateMiddleware, key)
    }

    /// Adds an observer of `S` with [`Priority::Normal`].
    ///
    /// The observer is immediately called with [`Reason::Subscribed`] once for each existing cell of type `S`.
    pub fn subscribe<S, R>(&self, f: impl Fn(&S, Reason) -> R + 'static) -> Subscription
    where
        S: 'static,
        R: IntoEffect + 'static,
    {
        self.subscribe_with(Priority::Normal, f)
    }

    /// Adds an observer of `S` with the given priority.
    pub fn subscribe_with<S, R>(
        &self,
        priority: Priority,
        f: impl Fn(&S, Reason) -> R + 'static,
    ) -> Subscription
    where
        S: 'static,
        R: IntoEffect + 'static,
    {
        let key = self.add_observer(Rc::new(ObserverFn::new(priority, f)));
        self.subscription(SlotKind::Observer, key)
    }

    /// Adds an observer called only for the first change of a cell of type `S`.
    ///
    /// The observer is not called with [`Reason::Subscribed`].
    /// After its first call it is removed from the store.
    pub fn subscribe_once<S, R>(&self, f: impl FnOnce(&S, Reason) -> R + 'static) -> Subscription
    where
        S: 'static,
        R: IntoEffect + 'static,
    {
        let f = RefCell::new(Some(f));
        let this = Rc::new(Cell::new(None));
        let store = Rc::downgrade(&self.0);
        let key = {
            let this = this.clone();
            self.add_observer(Rc::new(ObserverFn::new(
                Priority::Normal,
                move |state: &S, reason: Reason| -> Result<Effect, BoxError> {
                    if reason.is_subscribed() {
                        return Ok(Effect::None);
                    }
                    let Some(f) = f.borrow_mut().take() else {
                        return Ok(Effect::None);
                    };
                    if let (Some(store), Some(key)) = (store.upgrade(), this.get()) {
                        store.remove(SlotKind::Observer, key);
                    }
                    f(state, reason).into_effect()
                },
            )))
        };
        this.set(Some(key));
        self.subscription(SlotKind::Observer, key)
    }

    fn add_observer(&self, observer: Rc<dyn DynObserver>) -> SlotKey {
        debug!(
            state = observer.state_name(),
            priority = %observer.priority(),
            "observer added"
        );
        let key = self.insert(|s| &mut s.observers, observer.clone());
        let state_type = observer.state_type();
        let cells = self
            .0
            .slots
            .borrow()
            .cells
            .select(|c| c.state_type() == state_type);
        let mut effects = Vec::new();
        for cell in cells {
            self.notify_one(&*observer, &cell.get(), Reason::Subscribed, &mut effects);
        }
        self.process_effects(effects);
        key
    }

    /// Dispatches an action.
    ///
    /// Failures of reducers, middlewares, observers and deferred callbacks are not returned.
    /// They are recorded by the cell registered with [`Store::track_errors`], if any.
    pub fn dispatch<A: Action>(&self, action: A) {
        self.dispatch_any(AnyAction::new(action))
    }

    pub fn dispatch_all<I>(&self, actions: I)
    where
        I: IntoIterator,
        I::Item: Into<AnyAction>,
    {
        for action in actions {
            self.dispatch_any(action.into());
        }
    }

    pub fn dispatch_any(&self, action: AnyAction) {
        let depth = self.0.depth.get();
        let max_depth = self.0.config.max_dispatch_depth;
        let is_error = action.is::<ErrorAction>();
        if depth >= max_depth.saturating_add(usize::from(is_error)) {
            warn!(
                action = action.action_name(),
                depth, "maximum dispatch depth exceeded"
            );
            if !is_error {
                let error = DispatchError::DepthExceeded {
                    action: action.action_name(),
                    depth: max_depth,
                };
                let effect = self.fail(error);
                self.process_effects(vec![effect]);
            }
            return;
        }
        trace!(action = action.action_name(), depth, "dispatch");

        let _guard = DepthGuard::enter(&self.0.depth);
        let _error_guard = is_error.then(|| DepthGuard::enter(&self.0.error_depth));
        let mut effects = Vec::new();
        self.apply_action_middlewares(&action, &mut effects);
        self.apply_reducers(&action, &mut effects);
        self.process_effects(effects);
    }

    fn apply_action_middlewares(&self, action: &AnyAction, effects: &mut Vec<Effect>) {
        let middlewares = self.0.slots.borrow().action_middlewares.all();
        for m in middlewares {
            match self.invoke(|| m.intercept(action)) {
                None => {}
                Some(Ok(es)) => {
                    for e in es {
                        push_effect(effects, e);
                    }
                }
                Some(Err(source)) => {
                    let error = DispatchError::Middleware {
                        target: m.target_name(),
                        source,
                    };
                    push_effect(effects, self.fail(error));
                }
            }
        }
    }

    fn apply_reducers(&self, action: &AnyAction, effects: &mut Vec<Effect>) {
        let (cells, reducers) = {
            let slots = self.0.slots.borrow();
            (
                slots
                    .cells
                    .select(|c| c.state_type() == action.state_type()),
                slots
                    .reducers
                    .select(|r| r.action_type() == action.action_type()),
            )
        };
        for cell in &cells {
            for reducer in &reducers {
                let state = cell.get();
                let reduction = match self.invoke(|| reducer.reduce(&state, action)) {
                    None => continue,
                    Some(Ok(reduction)) => reduction,
                    Some(Err(source)) => {
                        let error = DispatchError::Reducer {
                            state: cell.state_name(),
                            action: action.action_name(),
                            source,
                        };
                        push_effect(effects, self.fail(error));
                        continue;
                    }
                };
                let (new_state, effect) = reduction.into_parts();
                push_effect(effects, effect);
                if let Some(new_state) = new_state {
                    self.commit(cell, new_state, effects);
                }
            }
        }
    }

    fn commit(&self, cell: &CellSlot, state: StateBox, effects: &mut Vec<Effect>) {
        cell.set(state.clone());
        self.notify(&state, Reason::Modified, effects);

        let state_type = cell.state_type();
        let middlewares = self
            .0
            .slots
            .borrow()
            .state_middlewares
            .select(|m| m.state_type() == state_type);
        let mut modified = false;
        for m in middlewares {
            let state = cell.get();
            match self.invoke(|| m.intercept(&state)) {
                None => {}
                Some(Ok(reduction)) => {
                    let (new_state, effect) = reduction.into_parts();
                    if let Some(new_state) = new_state {
                        cell.set(new_state);
                        modified = true;
                    }
                    push_effect(effects, effect);
                }
                Some(Err(source)) => {
                    let error = DispatchError::Middleware {
                        target: m.state_name(),
                        source,
                    };
                    push_effect(effects, self.fail(error));
                }
            }
        }
        if modified {
            self.notify(&cell.get(), Reason::Middleware, effects);
        }
    }

    fn notify(&self, state: &StateBox, reason: Reason, effects: &mut Vec<Effect>) {
        let state_type = state.type_id();
        let mut observers = self
            .0
            .slots
            .borrow()
            .observers
            .select(|o| o.state_type() == state_type);
        observers.sort_by_key(|o| o.priority());
        for observer in observers {
            self.notify_one(&*observer, state, reason, effects);
        }
    }

    fn notify_one(
        &self,
        observer: &dyn DynObserver,
        state: &StateBox,
        reason: Reason,
        effects: &mut Vec<Effect>,
    ) {
        match self.invoke(|| observer.notify(state, reason)) {
            None => {}
            Some(Ok(effect)) => push_effect(effects, effect),
            Some(Err(source)) => {
                let error = DispatchError::Observer {
                    state: observer.state_name(),
                    source,
                };
                push_effect(effects, self.fail(error));
            }
        }
    }

    fn process_effects(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::None => {}
                Effect::Dispatch(action) => self.dispatch_any(action),
                Effect::DispatchAll(actions) => {
                    for action in actions {
                        self.dispatch_any(action);
                    }
                }
                Effect::Other(f) => self.run_callback(f),
            }
        }
    }

    fn run_callback(&self, f: Box<dyn FnOnce(&Store)>) {
        let result = self.invoke(|| {
            f(self);
            Some(Ok(()))
        });
        if let Some(Err(source)) = result {
            let effect = self.fail(DispatchError::Callback { source });
            self.process_effects(vec![effect]);
        }
    }

    /// Calls user code, converting panics into errors if configured to do so.
    fn invoke<T>(&self, f: impl FnOnce() -> SlotResult<T>) -> SlotResult<T> {
        if !self.0.config.catch_panics {
            return f();
        }
        match catch_unwind(AssertUnwindSafe(f)) {
            Ok(result) => result,
            Err(payload) => Some(Err(PanicError::from_payload(payload).into())),
        }
    }

    /// Converts a failure into an effect that records it.
    ///
    /// Failures raised while an [`ErrorAction`] is being dispatched are dropped,
    /// including those of effects and nested dispatches it started.
    fn fail(&self, error: DispatchError) -> Effect {
        if self.0.error_depth.get() > 0 {
            warn!(%error, "failure while recording errors dropped");
            return Effect::None;
        }
        warn!(%error, "failure captured");
        Effect::dispatch(ErrorAction::Append(Rc::new(error)))
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slots = self.0.slots.borrow();
        f.debug_struct("Store")
            .field("cells", &slots.cells.len())
            .field("reducers", &slots.reducers.len())
            .field("action_middlewares", &slots.action_middlewares.len())
            .field("state_middlewares", &slots.state_middlewares.len())
            .field("observers", &slots.observers.len())
            .finish()
    }
}

impl fmt::Display for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = {
            let slots = self.0.slots.borrow();
            let cells = slots.cells.all();
            let reducers = slots.reducers.all();
            let action_middlewares = slots.action_middlewares.all();
            let state_middlewares = slots.state_middlewares.all();
            let mut observers = slots.observers.all();
            observers.sort_by_key(|o| o.priority());
            cells
                .iter()
                .map(|c| format!("state {}", c.state_name()))
                .chain(reducers.iter().map(|r| format!("reducer {}", r.action_name())))
                .chain(
                    action_middlewares
                        .iter()
                        .map(|m| format!("action middleware {}", m.target_name())),
                )
                .chain(
                    state_middlewares
                        .iter()
                        .map(|m| format!("state middleware {}", m.state_name())),
                )
                .chain(
                    observers
                        .iter()
                        .map(|o| format!("observer {} ({})", o.state_name(), o.priority())),
                )
                .collect()
        };
        writeln!(f, "Store: {{")?;
        for line in lines {
            writeln!(f, "  {line}")?;
        }
        write!(f, "}}")
    }
}
