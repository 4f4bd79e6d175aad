//! A reducer-driven state container.
//!
//! State lives in cells owned by a [`Store`].
//! It changes only when a dispatched [`Action`] is reduced by a reducer,
//! and every change is reported to the observers of the state in [`Priority`] order.
//! Reducers, middlewares and observers never act directly:
//! they return an [`Effect`] that the store runs after the current pass.
//!
//! ```rust
//! use reductor::{Action, Reason, Reduction, Store};
//!
//! #[derive(Clone, Default)]
//! struct Counter {
//!     value: i32,
//! }
//!
//! enum CounterAction {
//!     Increase,
//!     Decrease,
//! }
//! impl Action for CounterAction {
//!     type State = Counter;
//! }
//!
//! let store = Store::new();
//! let _s = store.add_state(Counter::default());
//! let _r = store.add_reducer(|state: &Counter, action: &CounterAction| {
//!     let value = match action {
//!         CounterAction::Increase => state.value + 1,
//!         CounterAction::Decrease => state.value - 1,
//!     };
//!     Reduction::Modified(Counter { value })
//! });
//! let _o = store.subscribe(|state: &Counter, reason: Reason| {
//!     println!("{reason}: {}", state.value);
//! });
//!
//! store.dispatch(CounterAction::Increase);
//! ```
mod action;
mod config;
mod effect;
mod error;
mod error_state;
mod observer;
mod reduction;
mod slot;
mod store;
mod subscription;

pub use action::*;
pub use config::*;
pub use effect::*;
pub use error::*;
pub use error_state::*;
pub use observer::*;
pub use reduction::*;
pub use store::Store;
pub use subscription::*;
