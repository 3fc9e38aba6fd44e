//! In-memory storage, shared between clones

use std::cell::RefCell;
use std::rc::Rc;

use super::{PersistError, PersistResult, Storage};

/// Storage living in memory.
///
/// Clones share the same slot, which lets a test "restart" by loading a
/// second store from a clone of the first one's backend.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slot: Rc<RefCell<Option<String>>>,
    fail_writes: Rc<RefCell<bool>>,
    writes: Rc<RefCell<usize>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(contents: &str) -> Self {
        let storage = Self::default();
        *storage.slot.borrow_mut() = Some(contents.to_string());
        storage
    }

    /// Make every following write fail (simulates a full or read-only disk)
    pub fn set_fail_writes(&self, fail: bool) {
        *self.fail_writes.borrow_mut() = fail;
    }

    /// Number of successful writes so far
    pub fn write_count(&self) -> usize {
        *self.writes.borrow()
    }

    pub fn contents(&self) -> Option<String> {
        self.slot.borrow().clone()
    }
}

impl Storage for MemoryStorage {
    fn read(&self) -> PersistResult<Option<String>> {
        Ok(self.slot.borrow().clone())
    }

    fn write(&mut self, contents: &str) -> PersistResult<()> {
        if *self.fail_writes.borrow() {
            return Err(PersistError::Unavailable("memory storage write disabled".into()));
        }
        *self.slot.borrow_mut() = Some(contents.to_string());
        *self.writes.borrow_mut() += 1;
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
