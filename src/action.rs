use std::{
    any::{type_name, Any, TypeId},
    fmt,
};

/// A value describing a state transition.
///
/// Each action type targets exactly one state type.
/// Reducers registered for the action run once per cell of that state type.
pub trait Action: 'static {
    type State: 'static;
}

/// An [`Action`] with its concrete type erased.
pub struct AnyAction {
    value: Box<dyn Any>,
    action_type: TypeId,
    state_type: TypeId,
    action_name: &'static str,
}

impl AnyAction {
    pub fn new<A: Action>(action: A) -> Self {
        Self {
            value: Box::new(action),
            action_type: TypeId::of::<A>(),
            state_type: TypeId::of::<A::State>(),
            action_name: type_name::<A>(),
        }
    }

    pub fn action_type(&self) -> TypeId {
        self.action_type
    }
    pub fn state_type(&self) -> TypeId {
        self.state_type
    }
    pub fn action_name(&self) -> &'static str {
        self.action_name
    }

    pub fn is<A: Action>(&self) -> bool {
        self.action_type == TypeId::of::<A>()
    }

    /// Returns the action if it is of type `A`.
    pub fn downcast_ref<A: Action>(&self) -> Option<&A> {
        self.value.downcast_ref()
    }
}

impl<A: Action> From<A> for AnyAction {
    fn from(action: A) -> Self {
        AnyAction::new(action)
    }
}

impl fmt::Debug for AnyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AnyAction").field(&self.action_name).finish()
    }
}
