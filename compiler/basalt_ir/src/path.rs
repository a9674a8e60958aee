//! Subobject paths.
//!
//! A [`Path`] addresses a subobject inside a root object as a sequence of
//! selectors. Paths are fully resolved: anonymous-aggregate aliasing is
//! expanded before a `Path` is formed (see `TypeShape::resolve_member`),
//! so every member selector carries the concrete member index at that
//! point in the shape. The name rides along for diagnostics only; two
//! anonymous members of the same aggregate share `Name::EMPTY` but have
//! distinct indices.

use crate::{Name, StringInterner};
use smallvec::SmallVec;
use std::fmt::Write as _;

/// One step of a subobject path.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Selector {
    /// Struct field or union member.
    Member {
        /// Declaration-order index within the aggregate.
        index: u32,
        /// Member name; `Name::EMPTY` for anonymous aggregates.
        name: Name,
    },
    /// Array element.
    Index(u32),
}

impl Selector {
    /// Build a member selector.
    pub const fn member(index: u32, name: Name) -> Self {
        Selector::Member { index, name }
    }
}

/// Selector sequence from a root object to a subobject.
///
/// Small paths (the common case) stay inline; deeply nested shapes spill
/// to the heap.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Path(SmallVec<[Selector; 4]>);

impl Path {
    /// The empty path, addressing the root object itself.
    pub fn root() -> Self {
        Path(SmallVec::new())
    }

    /// Build a path from selectors.
    pub fn from_selectors(selectors: impl IntoIterator<Item = Selector>) -> Self {
        Path(selectors.into_iter().collect())
    }

    /// Append a selector.
    pub fn push(&mut self, selector: Selector) {
        self.0.push(selector);
    }

    /// Append an array index selector.
    pub fn push_index(&mut self, index: u32) {
        self.0.push(Selector::Index(index));
    }

    /// Extended copy of this path with one more selector.
    #[must_use]
    pub fn child(&self, selector: Selector) -> Self {
        let mut path = self.clone();
        path.0.push(selector);
        path
    }

    /// Selectors in root-to-leaf order.
    pub fn selectors(&self) -> &[Selector] {
        &self.0
    }

    /// Number of selectors.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if this is the root path.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Render the path for diagnostics, e.g. `.u.a[0]`.
    ///
    /// Anonymous aggregate segments render as `.<anon>`.
    pub fn display(&self, interner: &StringInterner) -> String {
        let mut out = String::new();
        for selector in &self.0 {
            match *selector {
                Selector::Member { name, .. } => {
                    out.push('.');
                    if name == Name::EMPTY {
                        out.push_str("<anon>");
                    } else {
                        out.push_str(interner.lookup(name));
                    }
                }
                Selector::Index(index) => {
                    let _ = write!(out, "[{index}]");
                }
            }
        }
        out
    }
}

impl FromIterator<Selector> for Path {
    fn from_iter<I: IntoIterator<Item = Selector>>(iter: I) -> Self {
        Path(iter.into_iter().collect())
    }
}

impl Extend<Selector> for Path {
    fn extend<I: IntoIterator<Item = Selector>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}
