//! String interner backing [`Name`].
//!
//! Interned strings are leaked to obtain `'static` lifetimes, so lookup
//! hands out references with no lifetime coupling to the interner's lock.

use crate::Name;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::sync::Arc;

struct InternTable {
    /// Map from string content to table index.
    map: FxHashMap<&'static str, u32>,
    /// Storage for string contents, indexed by `Name::index()`.
    strings: Vec<&'static str>,
}

impl InternTable {
    fn with_empty() -> Self {
        // Pre-intern the empty string at index 0 so Name::EMPTY resolves.
        let empty: &'static str = "";
        let mut map = FxHashMap::default();
        map.insert(empty, 0);
        Self {
            map,
            strings: vec![empty],
        }
    }
}

/// String interner for member and routine names.
///
/// Provides O(1) lookup and equality comparison for interned strings.
/// Guarded by a single `RwLock`; evaluation is single-threaded, so there
/// is no contention to shard away.
pub struct StringInterner {
    table: RwLock<InternTable>,
}

impl StringInterner {
    /// Create a new interner with the empty string pre-interned.
    pub fn new() -> Self {
        Self {
            table: RwLock::new(InternTable::with_empty()),
        }
    }

    /// Intern a string, returning its `Name`.
    pub fn intern(&self, s: &str) -> Name {
        // Fast path: already interned.
        {
            let guard = self.table.read();
            if let Some(&idx) = guard.map.get(s) {
                return Name::from_raw(idx);
            }
        }

        let mut guard = self.table.write();

        // Double-check after acquiring the write lock.
        if let Some(&idx) = guard.map.get(s) {
            return Name::from_raw(idx);
        }

        // Leak the string to get 'static lifetime.
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());

        let idx = u32::try_from(guard.strings.len()).unwrap_or_else(|_| {
            panic!("interner exceeded capacity: {} strings", guard.strings.len())
        });
        guard.strings.push(leaked);
        guard.map.insert(leaked, idx);
        Name::from_raw(idx)
    }

    /// Look up the string for a `Name`.
    ///
    /// # Panics
    /// Panics if `name` was not produced by this interner.
    pub fn lookup(&self, name: Name) -> &'static str {
        let guard = self.table.read();
        guard.strings[name.index()]
    }

    /// Number of interned strings (including the pre-interned empty string).
    pub fn len(&self) -> usize {
        self.table.read().strings.len()
    }

    /// Check if the interner holds only the pre-interned empty string.
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared interner handle.
///
/// The newtype enforces that interner sharing goes through this type
/// rather than ad-hoc `Arc<StringInterner>` values.
#[derive(Clone)]
pub struct SharedInterner(Arc<StringInterner>);

impl SharedInterner {
    /// Create a new shared interner.
    pub fn new() -> Self {
        SharedInterner(Arc::new(StringInterner::new()))
    }
}

impl Default for SharedInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Deref for SharedInterner {
    type Target = StringInterner;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
