use crate::document::{FunctionDef, UiEventDef};

/// Something that can be marked deprecated at an API level
pub trait Deprecatable {
    fn deprecated_since(&self) -> Option<u64>;
}

impl Deprecatable for FunctionDef {
    fn deprecated_since(&self) -> Option<u64> {
        self.deprecated_since
    }
}

impl Deprecatable for UiEventDef {
    fn deprecated_since(&self) -> Option<u64> {
        self.deprecated_since
    }
}

/// Drops entries deprecated before the oldest API level the client supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeprecationFilter {
    pub oldest_supported_api_level: u64,
}

impl DeprecationFilter {
    pub fn new(oldest_supported_api_level: u64) -> Self {
        Self {
            oldest_supported_api_level,
        }
    }

    pub fn keeps<T: Deprecatable>(&self, entry: &T) -> bool {
        match entry.deprecated_since() {
            Some(level) => level >= self.oldest_supported_api_level,
            None => true,
        }
    }

    /// Borrow the surviving entries, preserving order
    pub fn apply<'a, T: Deprecatable>(&self, entries: &'a [T]) -> Vec<&'a T> {
        entries.iter().filter(|entry| self.keeps(*entry)).collect()
    }
}
