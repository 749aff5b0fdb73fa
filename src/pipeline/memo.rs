use std::any::Any;
use std::cell::{Cell, RefCell};
use std::sync::Arc;

use crate::store::{Entity, EntityStore};

/// Key wrapper comparing by pointer identity.
pub struct ByRef<T: ?Sized>(pub Arc<T>);

impl<T: ?Sized> ByRef<T> {
    pub fn new(value: &Arc<T>) -> Self {
        ByRef(Arc::clone(value))
    }
}

impl<T: ?Sized> Clone for ByRef<T> {
    fn clone(&self) -> Self {
        ByRef(Arc::clone(&self.0))
    }
}

impl<T: ?Sized> PartialEq for ByRef<T> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<T: ?Sized> std::fmt::Debug for ByRef<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ByRef({:p})", Arc::as_ptr(&self.0))
    }
}

/// Type-erased reference to one store collection.
#[derive(Clone)]
pub struct CollectionRef(Arc<dyn Any + Send + Sync>);

impl CollectionRef {
    pub fn of<E: Entity>(store: &EntityStore) -> Self {
        let collection: Arc<dyn Any + Send + Sync> = store.collection::<E>().clone();
        CollectionRef(collection)
    }
}

impl PartialEq for CollectionRef {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl std::fmt::Debug for CollectionRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CollectionRef({:p})", Arc::as_ptr(&self.0))
    }
}

/// Single-slot cache. The value is recomputed only when the key differs from
/// the one seen on the previous call; otherwise the same `Arc` comes back.
pub struct Memo<K, V> {
    slot: RefCell<Option<(K, Arc<V>)>>,
    recomputes: Cell<usize>,
}

impl<K, V> Default for Memo<K, V> {
    fn default() -> Self {
        Self {
            slot: RefCell::new(None),
            recomputes: Cell::new(0),
        }
    }
}

impl<K: PartialEq, V> Memo<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_compute(&self, key: K, compute: impl FnOnce() -> V) -> Arc<V> {
        if let Some((last_key, value)) = self.slot.borrow().as_ref() {
            if *last_key == key {
                return Arc::clone(value);
            }
        }
        let value = Arc::new(compute());
        self.recomputes.set(self.recomputes.get() + 1);
        *self.slot.borrow_mut() = Some((key, Arc::clone(&value)));
        value
    }

    pub fn recompute_count(&self) -> usize {
        self.recomputes.get()
    }

    pub fn clear(&self) {
        *self.slot.borrow_mut() = None;
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/memo.rs"]
mod tests;
