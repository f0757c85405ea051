//! Region heap for values handed across the C boundary.
//!
//! Generated code never frees anything, so every published value lives until
//! the executing thread ends and the whole region is dropped at once. `nil`
//! and the two booleans are shared statics and never take a slot.

use crate::runtime::value::Value;
use std::cell::RefCell;
use std::ptr::NonNull;

pub static NIL: Value = Value::Nil;
pub static TRUE: Value = Value::Bool(true);
pub static FALSE: Value = Value::Bool(false);

#[derive(Default)]
pub struct Heap {
    values: Vec<NonNull<Value>>,
}

impl Heap {
    pub fn new() -> Self {
        Self::default()
    }

    /// The returned pointer stays valid for as long as the heap does.
    pub fn alloc(&mut self, value: Value) -> *const Value {
        match value {
            Value::Nil => &NIL as *const Value,
            Value::Bool(true) => &TRUE as *const Value,
            Value::Bool(false) => &FALSE as *const Value,
            other => {
                let slot = NonNull::from(Box::leak(Box::new(other)));
                self.values.push(slot);
                slot.as_ptr() as *const Value
            }
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Drop for Heap {
    fn drop(&mut self) {
        for slot in self.values.drain(..) {
            // SAFETY: every slot came from `Box::leak` in `alloc` and is
            // released exactly once here.
            unsafe { drop(Box::from_raw(slot.as_ptr())) };
        }
    }
}

thread_local! {
    static HEAP: RefCell<Heap> = RefCell::new(Heap::new());
}

/// Moves `value` into the current thread's region.
pub fn publish(value: Value) -> *const Value {
    HEAP.with(|heap| heap.borrow_mut().alloc(value))
}

/// Number of values the current thread has published so far.
pub fn live_values() -> usize {
    HEAP.with(|heap| heap.borrow().len())
}
