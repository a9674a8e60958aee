//! Storage layout.
//!
//! Pure functions from a type shape to byte sizes and offsets. Layout is
//! deliberately housed in `basalt_ir`, away from the evaluator's runtime
//! state: an offset depends only on the static shape, never on which union
//! member happens to be active. Address-of and pointer comparison in the
//! evaluator go through [`offset_of`] and therefore cannot gate on
//! activation.
//!
//! Offsets accumulate member sizes in declaration order with no alignment
//! padding. Every union alternative begins at the union's own offset, so
//! the first scalar reachable through any chain of position-zero members
//! shares the union's base address.

use crate::{Path, Selector, TypeShape};

/// Storage size of a shape in bytes.
pub fn size_of(shape: &TypeShape) -> u64 {
    match shape {
        TypeShape::Scalar(kind) => kind.size(),
        TypeShape::Array { elem, len } => size_of(elem) * u64::from(*len),
        TypeShape::Struct(agg) => agg.members().iter().map(|m| size_of(&m.shape)).sum(),
        TypeShape::Union(agg) => agg
            .members()
            .iter()
            .map(|m| size_of(&m.shape))
            .max()
            .unwrap_or(0),
    }
}

/// Structural byte offset of `path` within `root`.
///
/// Defined for every path that type-checks against the shape, regardless
/// of any runtime state. Struct field offsets accumulate preceding field
/// sizes; union member offsets are always the union's own offset; array
/// element offsets are index times element size.
///
/// # Panics
/// Panics if the path does not type-check against the shape. An ill-typed
/// path is a programming error in the host, not a user-facing condition.
pub fn offset_of(root: &TypeShape, path: &Path) -> u64 {
    let mut shape = root;
    let mut offset = 0u64;
    for &selector in path.selectors() {
        offset += selector_offset(shape, selector);
        shape = shape
            .step(selector)
            .unwrap_or_else(|| panic!("path does not type-check: {selector:?} on {shape:?}"));
    }
    offset
}

fn selector_offset(shape: &TypeShape, selector: Selector) -> u64 {
    match (shape, selector) {
        (TypeShape::Struct(agg), Selector::Member { index, .. }) => agg
            .members()
            .iter()
            .take(index as usize)
            .map(|m| size_of(&m.shape))
            .sum(),
        // All union alternatives begin at the union's base.
        (TypeShape::Union(_), Selector::Member { .. }) => 0,
        (TypeShape::Array { elem, .. }, Selector::Index(index)) => {
            size_of(elem) * u64::from(index)
        }
        _ => panic!("path does not type-check: {selector:?} on {shape:?}"),
    }
}
