//! In-memory score storage for tests and headless runs

use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use super::ScoreBackend;

/// Shared buffer: clones see the same contents, so a test can keep a handle
/// after boxing one into a store.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    contents: Rc<RefCell<Option<String>>>,
    fail_writes: bool,
}

impl MemoryBackend {
    /// Empty backend; reads fail as if the file were missing
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: Rc::new(RefCell::new(Some(contents.into()))),
            fail_writes: false,
        }
    }

    /// Backend whose writes always fail
    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.borrow().clone()
    }
}

impl ScoreBackend for MemoryBackend {
    fn read(&self) -> io::Result<String> {
        self.contents
            .borrow()
            .clone()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no scores stored"))
    }

    fn write(&mut self, contents: &str) -> io::Result<()> {
        if self.fail_writes {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "writes disabled"));
        }
        *self.contents.borrow_mut() = Some(contents.to_string());
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
