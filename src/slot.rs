use std::{
    any::{type_name, Any, TypeId},
    fmt,
    rc::Rc,
};

use slabmap::SlabMap;

#[cfg(test)]
mod tests;

/// A state value whose type is known only at run time.
#[derive(Clone)]
pub(crate) struct StateBox {
    value: Rc<dyn Any>,
    type_id: TypeId,
    type_name: &'static str,
}

impl StateBox {
    pub fn wrap<T: 'static>(value: T) -> Self {
        Self {
            value: Rc::new(value),
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
        }
    }

    /// Returns the stored value if it is of type `T`.
    pub fn unwrap<T: 'static>(&self) -> Option<&T> {
        self.value.downcast_ref()
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl fmt::Debug for StateBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StateBox").field(&self.type_name).finish()
    }
}

/// Identifies a slot in a [`SlotTable`].
///
/// Keys are never reused: a key whose slot was removed does not match any later slot at the same index.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub(crate) struct SlotKey {
    index: usize,
    generation: u64,
}

struct Entry<T: ?Sized> {
    generation: u64,
    value: Rc<T>,
}

/// Arena of slots indexed by generation-checked keys.
pub(crate) struct SlotTable<T: ?Sized>(SlabMap<Entry<T>>);

impl<T: ?Sized> SlotTable<T> {
    pub fn new() -> Self {
        Self(SlabMap::new())
    }

    /// Inserts a slot.
    ///
    /// `generation` must be greater than every generation previously passed to this table.
    pub fn insert(&mut self, generation: u64, value: Rc<T>) -> SlotKey {
        let index = self.0.insert(Entry { generation, value });
        SlotKey { index, generation }
    }

    pub fn remove(&mut self, key: SlotKey) -> Option<Rc<T>> {
        if !self.contains(key) {
            return None;
        }
        self.0.remove(key.index).map(|e| e.value)
    }

    pub fn contains(&self, key: SlotKey) -> bool {
        self.0
            .get(key.index)
            .is_some_and(|e| e.generation == key.generation)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns the slots matching `filter` in insertion order.
    ///
    /// The returned slots stay valid even if the table is modified afterwards.
    pub fn select(&self, mut filter: impl FnMut(&T) -> bool) -> Vec<Rc<T>> {
        let mut entries: Vec<_> = self
            .0
            .values()
            .filter(|e| filter(&*e.value))
            .map(|e| (e.generation, e.value.clone()))
            .collect();
        entries.sort_by_key(|(generation, _)| *generation);
        entries.into_iter().map(|(_, value)| value).collect()
    }

    pub fn all(&self) -> Vec<Rc<T>> {
        self.select(|_| true)
    }
}
