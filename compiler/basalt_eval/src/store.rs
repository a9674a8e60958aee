//! Object store.
//!
//! The runtime tree of objects for one evaluation: root objects for
//! declarations and temporaries, subobjects for fields and elements, and
//! leaf cells with per-leaf initialization state.
//!
//! Union storage is the tagged-variant rendering of overlapped memory: a
//! [`UnionSlot`] holds at most one child object, allocated when a member
//! activates and discarded when it deactivates. Structural addresses come
//! from `basalt_ir::layout` plus a per-root synthetic base, so they never
//! depend on any slot's state.

use crate::errors::{read_of_inactive_member, EvalResult};
use crate::value::{Scalar, Value};
use basalt_ir::{layout, Name, Path, Selector, StringInterner, TypeShape};
use std::sync::Arc;

/// Initialization state of a leaf cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InitState {
    /// Never written.
    Uninitialized,
    /// Holds a readable value.
    Initialized,
    /// Lifetime has ended.
    Destroyed,
}

/// Terminal scalar storage.
#[derive(Clone, Debug)]
pub struct LeafCell {
    pub state: InitState,
    pub value: Scalar,
}

impl LeafCell {
    /// An unwritten cell.
    pub fn uninit(kind: basalt_ir::ScalarKind) -> Self {
        LeafCell {
            state: InitState::Uninitialized,
            value: Scalar::zero(kind),
        }
    }

    /// A zero-initialized cell.
    pub fn zeroed(kind: basalt_ir::ScalarKind) -> Self {
        LeafCell {
            state: InitState::Initialized,
            value: Scalar::zero(kind),
        }
    }

    /// Write a value; the cell becomes `Initialized`.
    pub fn write(&mut self, value: Scalar) {
        self.state = InitState::Initialized;
        self.value = value;
    }
}

/// The active member of a union slot.
#[derive(Clone, Debug)]
pub struct ActiveMember {
    /// Declaration-order member index.
    pub index: usize,
    /// The member's storage, allocated on activation.
    pub object: Box<Object>,
}

/// Activation state of one union instance.
///
/// `None` is the Inactive state; `Some` holds the single active member.
/// The invariant that at most one member is active at a time falls out of
/// the representation.
#[derive(Clone, Debug, Default)]
pub struct UnionSlot {
    pub active: Option<ActiveMember>,
}

/// Storage of one object.
#[derive(Clone, Debug)]
pub enum ObjectData {
    Leaf(LeafCell),
    /// One child per field, in declaration order.
    Struct(Vec<Object>),
    Array(Vec<Object>),
    Union(UnionSlot),
}

/// An instance of a type shape bound to a storage region.
#[derive(Clone, Debug)]
pub struct Object {
    pub shape: Arc<TypeShape>,
    pub data: ObjectData,
}

impl Object {
    /// Create an object from shape and storage.
    pub fn new(shape: Arc<TypeShape>, data: ObjectData) -> Self {
        Object { shape, data }
    }

    /// The union slot of this object.
    ///
    /// # Panics
    /// Panics if the object is not a union; callers dispatch on shape
    /// before reaching for the slot.
    pub fn union_slot(&self) -> &UnionSlot {
        match &self.data {
            ObjectData::Union(slot) => slot,
            _ => panic!("object is not a union"),
        }
    }

    /// Mutable access to the union slot.
    ///
    /// # Panics
    /// Panics if the object is not a union.
    pub fn union_slot_mut(&mut self) -> &mut UnionSlot {
        match &mut self.data {
            ObjectData::Union(slot) => slot,
            _ => panic!("object is not a union"),
        }
    }

    /// Name of the active member, for diagnostics.
    pub fn active_member_name(&self) -> Option<Name> {
        let slot = self.union_slot();
        let agg = self
            .shape
            .aggregate()
            .unwrap_or_else(|| panic!("union object with non-aggregate shape"));
        slot.active
            .as_ref()
            .map(|active| agg.members()[active.index].name)
    }

    /// Snapshot this object tree as a [`Value`].
    ///
    /// Unwritten leaves become [`Value::Indeterminate`]; inactive unions
    /// become `Value::Union(None)`.
    pub fn snapshot(&self) -> Value {
        match &self.data {
            ObjectData::Leaf(cell) => match cell.state {
                InitState::Initialized => Value::Scalar(cell.value),
                InitState::Uninitialized | InitState::Destroyed => Value::Indeterminate,
            },
            ObjectData::Struct(children) => {
                Value::Struct(children.iter().map(Object::snapshot).collect())
            }
            ObjectData::Array(children) => {
                Value::Array(children.iter().map(Object::snapshot).collect())
            }
            ObjectData::Union(slot) => Value::Union(slot.active.as_ref().map(|active| {
                let name = self.active_member_name().unwrap_or_default();
                (name, Box::new(active.object.snapshot()))
            })),
        }
    }

    /// Mark every leaf in this tree as `Destroyed`.
    ///
    /// Models the end of the object's storage duration. Union contents
    /// are marked through the active slot too: destruction of the member
    /// is a separate, authorized operation, but storage death ends every
    /// nested lifetime regardless.
    pub fn mark_destroyed(&mut self) {
        match &mut self.data {
            ObjectData::Leaf(cell) => cell.state = InitState::Destroyed,
            ObjectData::Struct(children) | ObjectData::Array(children) => {
                for child in children {
                    child.mark_destroyed();
                }
            }
            ObjectData::Union(slot) => {
                if let Some(active) = &mut slot.active {
                    active.object.mark_destroyed();
                }
            }
        }
    }
}

/// Walk `path` from `root`, authorizing every union segment.
///
/// A union segment is only passable when the selected member is the
/// active member; the first mismatch reports the read diagnostic with the
/// accessed and active member names and the path prefix up to the
/// offending segment. Operations with their own wording for the final
/// segment (destruction, member call) navigate to the parent with this
/// function and check the last selector themselves.
///
/// # Panics
/// Panics if the path does not type-check against the root's shape.
pub fn navigate<'a>(
    root: &'a Object,
    path: &Path,
    interner: &StringInterner,
) -> EvalResult<&'a Object> {
    let mut current = root;
    let mut prefix = Path::root();
    for &selector in path.selectors() {
        prefix.push(selector);
        current = step(current, selector, interner).map_err(|err| err.with_path(prefix.clone()))?;
    }
    Ok(current)
}

/// Mutable variant of [`navigate`].
pub fn navigate_mut<'a>(
    root: &'a mut Object,
    path: &Path,
    interner: &StringInterner,
) -> EvalResult<&'a mut Object> {
    // Pre-check with the shared walk so errors are identical, then walk
    // again mutably along the now-known-good path.
    navigate(root, path, interner)?;
    let mut current = root;
    for &selector in path.selectors() {
        current = step_mut(current, selector);
    }
    Ok(current)
}

fn step<'a>(
    current: &'a Object,
    selector: Selector,
    interner: &StringInterner,
) -> EvalResult<&'a Object> {
    match (&current.data, selector) {
        (ObjectData::Union(slot), Selector::Member { index, name }) => match &slot.active {
            Some(active) if active.index == index as usize => Ok(&active.object),
            _ => {
                let active = current.active_member_name().map(|n| interner.lookup(n));
                Err(read_of_inactive_member(interner.lookup(name), active))
            }
        },
        (ObjectData::Struct(children), Selector::Member { index, .. }) => {
            children.get(index as usize).map_or_else(
                || panic!("path does not type-check: member {index} out of range"),
                Ok,
            )
        }
        (ObjectData::Array(children), Selector::Index(index)) => {
            children.get(index as usize).map_or_else(
                || panic!("path does not type-check: index {index} out of range"),
                Ok,
            )
        }
        _ => panic!("path does not type-check: {selector:?} on {:?}", current.shape),
    }
}

fn step_mut(current: &mut Object, selector: Selector) -> &mut Object {
    match (&mut current.data, selector) {
        (ObjectData::Union(slot), Selector::Member { .. }) => {
            match &mut slot.active {
                Some(active) => &mut active.object,
                None => panic!("step_mut through inactive union after successful pre-check"),
            }
        }
        (ObjectData::Struct(children), Selector::Member { index, .. }) => {
            &mut children[index as usize]
        }
        (ObjectData::Array(children), Selector::Index(index)) => &mut children[index as usize],
        _ => panic!("path does not type-check: {selector:?}"),
    }
}

/// Handle to a root object in the store.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct RootId(u32);

/// Owner of all root objects for one evaluation.
///
/// Each root gets a distinct synthetic base address, so addresses of
/// subobjects in different roots never collide and addresses within one
/// root are base plus structural offset.
#[derive(Default)]
pub struct ObjectStore {
    roots: Vec<Object>,
}

impl ObjectStore {
    /// Create an empty store.
    pub fn new() -> Self {
        ObjectStore::default()
    }

    /// Take ownership of a root object.
    pub fn alloc(&mut self, object: Object) -> RootId {
        let id = u32::try_from(self.roots.len())
            .unwrap_or_else(|_| panic!("object store exceeded capacity"));
        self.roots.push(object);
        RootId(id)
    }

    /// The root object for a handle.
    pub fn object(&self, id: RootId) -> &Object {
        &self.roots[id.0 as usize]
    }

    /// Mutable access to a root object.
    pub fn object_mut(&mut self, id: RootId) -> &mut Object {
        &mut self.roots[id.0 as usize]
    }

    /// Synthetic base address of a root.
    pub fn base_address(&self, id: RootId) -> u64 {
        (u64::from(id.0) + 1) << 32
    }

    /// Address of a subobject: base of the root plus structural offset.
    ///
    /// Defined for every path that type-checks, regardless of activation
    /// state; this function has no access to any union slot.
    pub fn address_of(&self, id: RootId, path: &Path) -> u64 {
        let shape = Arc::clone(&self.object(id).shape);
        self.base_address(id) + layout::offset_of(&shape, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use basalt_ir::ScalarKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_leaf_cell_states() {
        let mut cell = LeafCell::uninit(ScalarKind::Int);
        assert_eq!(cell.state, InitState::Uninitialized);

        cell.write(Scalar::Int(7));
        assert_eq!(cell.state, InitState::Initialized);
        assert_eq!(cell.value, Scalar::Int(7));

        assert_eq!(LeafCell::zeroed(ScalarKind::Int).state, InitState::Initialized);
    }

    #[test]
    fn test_snapshot_marks_unwritten_leaves() {
        let shape = TypeShape::int();
        let obj = Object::new(
            Arc::clone(&shape),
            ObjectData::Leaf(LeafCell::uninit(ScalarKind::Int)),
        );
        assert_eq!(obj.snapshot(), Value::Indeterminate);
    }

    #[test]
    fn test_distinct_roots_get_distinct_bases() {
        let mut store = ObjectStore::new();
        let a = store.alloc(Object::new(
            TypeShape::int(),
            ObjectData::Leaf(LeafCell::uninit(ScalarKind::Int)),
        ));
        let b = store.alloc(Object::new(
            TypeShape::int(),
            ObjectData::Leaf(LeafCell::uninit(ScalarKind::Int)),
        ));
        assert_ne!(store.base_address(a), store.base_address(b));
    }
}
