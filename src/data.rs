use std::cell::RefCell;
use std::rc::Rc;

/// Capability interface for a value shared with the host engine.
///
/// Engine-owned values come in two shapes: a rich settable wrapper that
/// tracks writes, and a plain assignable field. The controller depends only
/// on this interface; the host picks the concrete adapter when it builds
/// the bindings, which resolves the shape once instead of probing on every
/// write.
pub trait DataSlot<T> {
    fn read(&self) -> T;
    fn write(&mut self, value: T);
}

/// Plain shared assignable field.
///
/// Clones of a `FieldData` alias the same storage, so a host keeps one clone
/// and hands another to the controller bindings.
#[derive(Debug, Default)]
pub struct FieldData<T> {
    cell: Rc<RefCell<T>>,
}

impl<T> Clone for FieldData<T> {
    fn clone(&self) -> Self {
        Self {
            cell: Rc::clone(&self.cell),
        }
    }
}

impl<T> FieldData<T> {
    pub fn new(value: T) -> Self {
        Self {
            cell: Rc::new(RefCell::new(value)),
        }
    }
}

impl<T: Clone> DataSlot<T> for FieldData<T> {
    fn read(&self) -> T {
        self.cell.borrow().clone()
    }

    fn write(&mut self, value: T) {
        *self.cell.borrow_mut() = value;
    }
}

#[derive(Debug)]
struct Tracked<T> {
    value: T,
    revision: u64,
}

/// Settable-value wrapper: a shared cell plus a revision counter bumped on
/// every write, so a host can observe how often a value was republished.
#[derive(Debug)]
pub struct TrackedData<T> {
    inner: Rc<RefCell<Tracked<T>>>,
}

impl<T> Clone for TrackedData<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> TrackedData<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Tracked { value, revision: 0 })),
        }
    }

    /// Number of writes since construction.
    pub fn revision(&self) -> u64 {
        self.inner.borrow().revision
    }
}

impl<T: Clone> DataSlot<T> for TrackedData<T> {
    fn read(&self) -> T {
        self.inner.borrow().value.clone()
    }

    fn write(&mut self, value: T) {
        let mut inner = self.inner.borrow_mut();
        inner.value = value;
        inner.revision += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_clones_alias_the_same_storage() {
        let host_side = FieldData::new(vec![1u32, 2, 3]);
        let mut controller_side = host_side.clone();
        controller_side.write(vec![9]);
        assert_eq!(host_side.read(), vec![9]);
    }

    #[test]
    fn tracked_data_counts_writes() {
        let slot = TrackedData::new(0.0f64);
        let mut writer = slot.clone();
        assert_eq!(slot.revision(), 0);
        writer.write(1.5);
        writer.write(2.5);
        assert_eq!(slot.revision(), 2);
        assert_eq!(slot.read(), 2.5);
    }
}
