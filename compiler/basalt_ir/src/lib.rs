//! Basalt IR - static data for the Basalt constant evaluator.
//!
//! This crate holds everything the evaluator consumes but never mutates:
//!
//! - `Name` / `StringInterner`: interned member and routine names
//! - `TypeShape`: scalar, array, struct, and union shapes with
//!   default-member-initializers and anonymous-member flattening
//! - `Init`: initializer forms (default, value, scalar, list, designated)
//! - `Path` / `Selector`: resolved subobject paths
//! - `layout`: pure storage layout (sizes and structural byte offsets)
//!
//! The layout functions live here, a crate away from the evaluator's
//! activation tracking, so address computation can never depend on which
//! union member is active.

mod init;
mod interner;
pub mod layout;
mod name;
mod path;
mod shape;
mod span;

pub use init::{Init, ScalarLit};
pub use interner::{SharedInterner, StringInterner};
pub use name::Name;
pub use path::{Path, Selector};
pub use shape::{AggregateShape, MemberDef, ScalarKind, ShapeError, TypeShape};
pub use span::Span;
