//! Union activation engine.
//!
//! The state machine governing which member of a union instance is
//! active. Activation state lives on the union *object* (its
//! [`UnionSlot`](crate::store::UnionSlot)), not on any member, and
//! travels with the object through structural copies.
//!
//! Deactivation cascades: before a previously-active member's storage is
//! discarded, every union nested anywhere inside it is deactivated by a
//! depth-first walk, so reactivating that member later starts clean.

use crate::store::{ActiveMember, Object, ObjectData};
use basalt_ir::{AggregateShape, Init};
use tracing::trace;

/// Make `member` the active member of `union_obj`, with `child` as its
/// freshly constructed storage.
///
/// If a different member is currently active it is deactivated first,
/// including the recursive cascade into its subobject tree. Re-activating
/// the already-active member replaces its storage outright.
///
/// # Panics
/// Panics if `union_obj` is not a union or `member` is out of range.
pub fn activate(union_obj: &mut Object, member: usize, child: Object) {
    let member_count = union_obj
        .shape
        .aggregate()
        .map_or(0, AggregateShape::len);
    assert!(member < member_count, "union member index out of range");

    let slot = union_obj.union_slot_mut();
    if let Some(mut previous) = slot.active.take() {
        if previous.index != member {
            deactivate_nested(&mut previous.object);
        }
        // Either way the old storage is discarded; the bytes are
        // reinterpreted as the new member.
    }
    trace!(member, "union member activated");
    union_obj.union_slot_mut().active = Some(ActiveMember {
        index: member,
        object: Box::new(child),
    });
}

/// Deactivate `union_obj`: cascade into the active member's subobject
/// tree, discard its storage, and leave the union Inactive.
///
/// A no-op on an already-inactive union.
///
/// # Panics
/// Panics if `union_obj` is not a union.
pub fn deactivate(union_obj: &mut Object) {
    let slot = union_obj.union_slot_mut();
    if let Some(mut previous) = slot.active.take() {
        deactivate_nested(&mut previous.object);
        trace!(member = previous.index, "union member deactivated");
    }
}

/// Depth-first walk deactivating every union inside `obj`.
///
/// Required even though the storage is about to be discarded: the cascade
/// is what guarantees that no stale activation state survives an outer
/// deactivation/reactivation cycle.
fn deactivate_nested(obj: &mut Object) {
    match &mut obj.data {
        ObjectData::Leaf(_) => {}
        ObjectData::Struct(children) | ObjectData::Array(children) => {
            for child in children {
                deactivate_nested(child);
            }
        }
        ObjectData::Union(slot) => {
            if let Some(mut active) = slot.active.take() {
                deactivate_nested(&mut active.object);
            }
        }
    }
}

/// True iff `member` is the active member of `union_obj`.
///
/// The single gate consulted by reads, member calls, and member
/// destruction.
///
/// # Panics
/// Panics if `union_obj` is not a union.
pub fn authorize(union_obj: &Object, member: usize) -> bool {
    union_obj
        .union_slot()
        .active
        .as_ref()
        .is_some_and(|active| active.index == member)
}

/// Which member a union activates when no initializer designates one.
///
/// Let D be the set of members carrying a default-member-initializer
/// (shape construction guarantees |D| <= 1):
///
/// - |D| == 1: that member, initialized from its default-member-
///   initializer — for both default- and value-initialization.
/// - |D| == 0 under value-initialization: the first declared member,
///   zero-initialized (`init` is `None`).
/// - |D| == 0 under default-initialization: no member; the union stays
///   Inactive and its storage unconstructed.
/// - An empty union never activates anything.
pub fn default_activation(agg: &AggregateShape, value_init: bool) -> Option<(usize, Option<&Init>)> {
    if agg.is_empty() {
        return None;
    }
    if let Some(index) = agg.default_members().next() {
        let init = agg.members()[index].init.as_ref();
        return Some((index, init));
    }
    if value_init {
        return Some((0, None));
    }
    None
}
