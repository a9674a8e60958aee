//! Construction/destruction/assignment coordinator.
//!
//! Translates object-level operations — construction from an initializer,
//! member writes, whole-object assignment, destructor calls, member calls —
//! into object store mutations and activation engine transitions. All
//! lifetime-changing operations on unions go through here; nothing else
//! touches a [`UnionSlot`](crate::store::UnionSlot).
//!
//! Initializer mismatches that a host could only cause through its own
//! bugs (an array initializer on a scalar, an unknown designated member)
//! panic as internal invariant violations; user-observable failures come
//! back as [`EvalError`](crate::errors::EvalError)s.

use crate::errors::{
    destruction_of_inactive_member, excess_initializer_elements, member_call_on_inactive_member,
    read_of_uninitialized_object, read_outside_lifetime, EvalResult,
};
use crate::store::{
    navigate, navigate_mut, ActiveMember, InitState, LeafCell, Object, ObjectData, UnionSlot,
};
use crate::unions;
use crate::value::Scalar;
use basalt_ir::{
    AggregateShape, Init, ScalarLit, Path, Selector, StringInterner, TypeShape,
};
use std::sync::Arc;

/// One designated initializer entry, its selector chain already resolved
/// through anonymous-member aliasing.
struct DesignatedEntry<'i> {
    /// Remaining selectors from the current shape to the designated member.
    chain: Vec<Selector>,
    init: &'i Init,
}

/// Operation coordinator for one evaluation.
pub struct Coordinator<'a> {
    interner: &'a StringInterner,
}

impl<'a> Coordinator<'a> {
    /// Create a coordinator resolving names through `interner`.
    pub fn new(interner: &'a StringInterner) -> Self {
        Coordinator { interner }
    }

    // Construction

    /// Construct an object of `shape` from `init`.
    ///
    /// Struct fields are constructed in declaration order; unions follow
    /// the activation rules (designated member, positional first member,
    /// or the default-member-initializer rule).
    pub fn construct(&self, shape: &Arc<TypeShape>, init: &Init) -> EvalResult<Object> {
        match &**shape {
            TypeShape::Scalar(kind) => {
                let cell = match init {
                    Init::Default => LeafCell::uninit(*kind),
                    Init::Value => LeafCell::zeroed(*kind),
                    Init::Scalar(lit) => {
                        let mut cell = LeafCell::uninit(*kind);
                        cell.write(Scalar::from_lit(*lit, *kind));
                        cell
                    }
                    Init::List(elems) => match elems.as_slice() {
                        [] => LeafCell::zeroed(*kind),
                        [single] => return self.construct(shape, single),
                        _ => panic!("initializer does not match scalar shape"),
                    },
                    Init::Designated(..) => panic!("designated initializer on scalar shape"),
                };
                Ok(Object::new(Arc::clone(shape), ObjectData::Leaf(cell)))
            }
            TypeShape::Array { elem, len } => {
                let len = *len as usize;
                let children = match init {
                    Init::Default | Init::Value => (0..len)
                        .map(|_| self.construct(elem, init))
                        .collect::<EvalResult<Vec<_>>>()?,
                    Init::List(elems) => {
                        assert!(elems.len() <= len, "initializer does not match array shape");
                        // Unlisted elements are value-initialized.
                        (0..len)
                            .map(|i| self.construct(elem, elems.get(i).unwrap_or(&Init::Value)))
                            .collect::<EvalResult<Vec<_>>>()?
                    }
                    Init::Scalar(_) | Init::Designated(..) => {
                        panic!("initializer does not match array shape")
                    }
                };
                Ok(Object::new(Arc::clone(shape), ObjectData::Array(children)))
            }
            TypeShape::Struct(agg) => self.construct_struct(shape, agg, init),
            TypeShape::Union(agg) => self.construct_union(shape, agg, init),
        }
    }

    fn construct_struct(
        &self,
        shape: &Arc<TypeShape>,
        agg: &AggregateShape,
        init: &Init,
    ) -> EvalResult<Object> {
        match init {
            // Members fall back to their default-member-initializer; a
            // member without one stays uninitialized under default-init
            // and is zero-initialized under value-init.
            Init::Default | Init::Value => {
                let children = agg
                    .members()
                    .iter()
                    .map(|m| self.construct(&m.shape, m.init.as_ref().unwrap_or(init)))
                    .collect::<EvalResult<Vec<_>>>()?;
                Ok(Object::new(Arc::clone(shape), ObjectData::Struct(children)))
            }
            Init::List(elems) if elems.iter().any(|e| matches!(e, Init::Designated(..))) => {
                let entries = self.resolve_designators(shape, elems);
                self.construct_designated(shape, entries)
            }
            Init::List(elems) => {
                assert!(
                    elems.len() <= agg.len(),
                    "initializer does not match struct shape"
                );
                let children = agg
                    .members()
                    .iter()
                    .enumerate()
                    .map(|(i, m)| match elems.get(i) {
                        Some(elem) => self.construct(&m.shape, elem),
                        // Unlisted fields: default-member-initializer,
                        // else value-initialization.
                        None => self.construct(&m.shape, m.init.as_ref().unwrap_or(&Init::Value)),
                    })
                    .collect::<EvalResult<Vec<_>>>()?;
                Ok(Object::new(Arc::clone(shape), ObjectData::Struct(children)))
            }
            Init::Designated(..) => {
                let entries = self.resolve_designators(shape, std::slice::from_ref(init));
                self.construct_designated(shape, entries)
            }
            Init::Scalar(_) => panic!("initializer does not match struct shape"),
        }
    }

    fn construct_union(
        &self,
        shape: &Arc<TypeShape>,
        agg: &AggregateShape,
        init: &Init,
    ) -> EvalResult<Object> {
        match init {
            Init::Default | Init::Value => {
                let value_init = matches!(init, Init::Value);
                let active = match unions::default_activation(agg, value_init) {
                    Some((index, dmi)) => {
                        let member = &agg.members()[index];
                        // No default-member-initializer means the
                        // first-member fallback: recursive zero-init.
                        let member_init = dmi.unwrap_or(&Init::Value);
                        let child = self.construct(&member.shape, member_init)?;
                        Some(ActiveMember {
                            index,
                            object: Box::new(child),
                        })
                    }
                    None => None,
                };
                Ok(Object::new(
                    Arc::clone(shape),
                    ObjectData::Union(UnionSlot { active }),
                ))
            }
            Init::Scalar(_) => {
                // `U u = {12}` and `U u = 12` both hit the first member.
                self.construct_union_positional(shape, agg, init)
            }
            Init::List(elems) => match elems.as_slice() {
                [] => self.construct_union(shape, agg, &Init::Value),
                [single] => match single {
                    Init::Designated(..) => {
                        let entries = self.resolve_designators(shape, std::slice::from_ref(single));
                        self.construct_designated(shape, entries)
                    }
                    _ => self.construct_union_positional(shape, agg, single),
                },
                // A union accepts at most one initializer clause.
                _ => Err(excess_initializer_elements()),
            },
            Init::Designated(..) => {
                let entries = self.resolve_designators(shape, std::slice::from_ref(init));
                self.construct_designated(shape, entries)
            }
        }
    }

    fn construct_union_positional(
        &self,
        shape: &Arc<TypeShape>,
        agg: &AggregateShape,
        init: &Init,
    ) -> EvalResult<Object> {
        let member = agg
            .members()
            .first()
            .unwrap_or_else(|| panic!("positional initializer on empty union"));
        let child = self.construct(&member.shape, init)?;
        Ok(Object::new(
            Arc::clone(shape),
            ObjectData::Union(UnionSlot {
                active: Some(ActiveMember {
                    index: 0,
                    object: Box::new(child),
                }),
            }),
        ))
    }

    /// Resolve designated entries against `shape`, expanding
    /// anonymous-member chains.
    fn resolve_designators<'i>(
        &self,
        shape: &TypeShape,
        inits: &'i [Init],
    ) -> Vec<DesignatedEntry<'i>> {
        inits
            .iter()
            .map(|entry| match entry {
                Init::Designated(name, init) => {
                    let chain = shape.resolve_member(*name).unwrap_or_else(|| {
                        panic!(
                            "designated member '{}' not found in shape",
                            self.interner.lookup(*name)
                        )
                    });
                    DesignatedEntry {
                        chain: chain.into_iter().collect(),
                        init: init.as_ref(),
                    }
                }
                _ => panic!("mixed positional and designated initializers"),
            })
            .collect()
    }

    /// Construct an aggregate from designated entries; members not named
    /// by any entry are default-initialized (their default-member-
    /// initializers still apply), matching constructor member-initializer
    /// list semantics.
    fn construct_designated(
        &self,
        shape: &Arc<TypeShape>,
        entries: Vec<DesignatedEntry<'_>>,
    ) -> EvalResult<Object> {
        // A single entry that has fully resolved is a direct initializer.
        if let [entry] = entries.as_slice() {
            if entry.chain.is_empty() {
                return self.construct(shape, entry.init);
            }
        }

        let agg = shape
            .aggregate()
            .unwrap_or_else(|| panic!("designated initializer on non-aggregate shape"));

        match &**shape {
            TypeShape::Struct(_) => {
                let mut buckets: Vec<Vec<DesignatedEntry<'_>>> =
                    (0..agg.len()).map(|_| Vec::new()).collect();
                for entry in entries {
                    let (&first, rest) = entry
                        .chain
                        .split_first()
                        .unwrap_or_else(|| panic!("designated entry with empty chain"));
                    let Selector::Member { index, .. } = first else {
                        panic!("designated chain enters an array");
                    };
                    buckets[index as usize].push(DesignatedEntry {
                        chain: rest.to_vec(),
                        init: entry.init,
                    });
                }
                let children = agg
                    .members()
                    .iter()
                    .zip(buckets)
                    .map(|(member, bucket)| {
                        if bucket.is_empty() {
                            self.construct(
                                &member.shape,
                                member.init.as_ref().unwrap_or(&Init::Default),
                            )
                        } else {
                            self.construct_designated(&member.shape, bucket)
                        }
                    })
                    .collect::<EvalResult<Vec<_>>>()?;
                Ok(Object::new(Arc::clone(shape), ObjectData::Struct(children)))
            }
            TypeShape::Union(_) => {
                // Every entry must designate (through) the same member;
                // naming two members of one union is a host bug.
                let mut target: Option<u32> = None;
                let mut rest_entries = Vec::with_capacity(entries.len());
                for entry in entries {
                    let (&first, rest) = entry
                        .chain
                        .split_first()
                        .unwrap_or_else(|| panic!("designated entry with empty chain"));
                    let Selector::Member { index, .. } = first else {
                        panic!("designated chain enters an array");
                    };
                    match target {
                        None => target = Some(index),
                        Some(existing) => assert!(
                            existing == index,
                            "constructor designates two members of one union"
                        ),
                    }
                    rest_entries.push(DesignatedEntry {
                        chain: rest.to_vec(),
                        init: entry.init,
                    });
                }
                let index = target.unwrap_or_else(|| panic!("designated union with no entries"));
                let member = &agg.members()[index as usize];
                let child = self.construct_designated(&member.shape, rest_entries)?;
                Ok(Object::new(
                    Arc::clone(shape),
                    ObjectData::Union(UnionSlot {
                        active: Some(ActiveMember {
                            index: index as usize,
                            object: Box::new(child),
                        }),
                    }),
                ))
            }
            _ => panic!("designated initializer on non-aggregate shape"),
        }
    }

    // Member writes

    /// Write a scalar through `path`, activating every union segment for
    /// the selected member on the way down.
    ///
    /// Member assignment is itself an activation operation: writing a
    /// member always succeeds even if a different member was previously
    /// active. Newly activated members are constructed default-initialized
    /// before the leaf write lands.
    pub fn write_scalar(
        &self,
        root: &mut Object,
        path: &Path,
        lit: ScalarLit,
    ) -> EvalResult<()> {
        let target = self.resolve_for_write(root, path)?;
        match &mut target.data {
            ObjectData::Leaf(cell) => {
                let TypeShape::Scalar(kind) = &*target.shape else {
                    panic!("leaf object with non-scalar shape");
                };
                cell.write(Scalar::from_lit(lit, *kind));
                Ok(())
            }
            _ => panic!("write target is not a leaf"),
        }
    }

    /// Walk `path` mutably, activating union segments as needed.
    fn resolve_for_write<'o>(
        &self,
        root: &'o mut Object,
        path: &Path,
    ) -> EvalResult<&'o mut Object> {
        let mut current = root;
        for &selector in path.selectors() {
            if current.shape.is_union() {
                let Selector::Member { index, .. } = selector else {
                    panic!("path does not type-check: {selector:?} on union");
                };
                let index = index as usize;
                if !unions::authorize(current, index) {
                    let member_shape = {
                        let agg = current
                            .shape
                            .aggregate()
                            .unwrap_or_else(|| panic!("union with non-aggregate shape"));
                        Arc::clone(&agg.members()[index].shape)
                    };
                    // Implicit activation on write: the member's storage
                    // comes into being default-initialized.
                    let child = self.construct(&member_shape, &Init::Default)?;
                    unions::activate(current, index, child);
                }
                let slot = current.union_slot_mut();
                current = match &mut slot.active {
                    Some(active) => &mut active.object,
                    None => panic!("union inactive immediately after activation"),
                };
            } else {
                current = step_into_mut(current, selector);
            }
        }
        Ok(current)
    }

    // Reads

    /// Read the scalar at `path`.
    ///
    /// Requires every union segment to be active for the selected member
    /// and the leaf to be initialized; the two failures are distinct
    /// diagnostics.
    pub fn read_scalar(&self, root: &Object, path: &Path) -> EvalResult<Scalar> {
        let target = navigate(root, path, self.interner)?;
        match &target.data {
            ObjectData::Leaf(cell) => match cell.state {
                InitState::Initialized => Ok(cell.value),
                InitState::Uninitialized => {
                    Err(read_of_uninitialized_object().with_path(path.clone()))
                }
                InitState::Destroyed => Err(read_outside_lifetime().with_path(path.clone())),
            },
            _ => panic!("read target is not a leaf"),
        }
    }

    // Whole-object assignment

    /// Structurally assign `src` over the object at `dst_path`.
    ///
    /// This is whole-object copy/move semantics: the destination's state
    /// — including union activation — becomes identical to the source's,
    /// without a deactivation of the destination's previous state and
    /// without reading the source's leaves. Union segments along
    /// `dst_path` itself are member assignments and activate as writes
    /// do.
    pub fn assign(&self, root: &mut Object, dst_path: &Path, src: Object) -> EvalResult<()> {
        let target = self.resolve_for_write(root, dst_path)?;
        assert!(
            Arc::ptr_eq(&target.shape, &src.shape),
            "assignment between different shapes"
        );
        target.data = src.data;
        Ok(())
    }

    // Destruction

    /// Explicit destructor call on the subobject at `path`.
    ///
    /// When the parent is a union, the named member must be the active
    /// member — the check is about named access legality, not about
    /// whether destruction has any effect — and on success the member's
    /// lifetime ends: the union reverts to Inactive. For non-union
    /// parents the subobject's leaves are marked destroyed.
    pub fn destroy(&self, root: &mut Object, path: &Path) -> EvalResult<()> {
        let Some((&last, parent_selectors)) = path.selectors().split_last() else {
            // Destroying a whole root object.
            root.mark_destroyed();
            return Ok(());
        };
        let parent_path = Path::from_selectors(parent_selectors.iter().copied());

        // Authorization pass; the walk reports any inactive union on the
        // way to the parent with the read wording.
        let parent = navigate(root, &parent_path, self.interner)?;
        if parent.shape.is_union() {
            let Selector::Member { index, name } = last else {
                panic!("path does not type-check: {last:?} on union");
            };
            if !unions::authorize(parent, index as usize) {
                let active = parent.active_member_name().map(|n| self.interner.lookup(n));
                return Err(
                    destruction_of_inactive_member(self.interner.lookup(name), active)
                        .with_path(path.clone()),
                );
            }
            let parent = navigate_mut(root, &parent_path, self.interner)?;
            unions::deactivate(parent);
            Ok(())
        } else {
            let target = navigate_mut(root, path, self.interner)?;
            target.mark_destroyed();
            Ok(())
        }
    }

    // Member calls

    /// Member function call through the subobject at `path`.
    ///
    /// The call body is evaluated elsewhere; this checks only access
    /// legality: a call through a union member requires that member to be
    /// active.
    pub fn member_call(&self, root: &Object, path: &Path) -> EvalResult<()> {
        let Some((&last, parent_selectors)) = path.selectors().split_last() else {
            return Ok(());
        };
        let parent_path = Path::from_selectors(parent_selectors.iter().copied());
        let parent = navigate(root, &parent_path, self.interner)?;
        if parent.shape.is_union() {
            let Selector::Member { index, name } = last else {
                panic!("path does not type-check: {last:?} on union");
            };
            if !unions::authorize(parent, index as usize) {
                let active = parent.active_member_name().map(|n| self.interner.lookup(n));
                return Err(
                    member_call_on_inactive_member(self.interner.lookup(name), active)
                        .with_path(path.clone()),
                );
            }
            Ok(())
        } else {
            // Validate the final step type-checks; access is otherwise
            // unrestricted.
            let _ = navigate(root, path, self.interner)?;
            Ok(())
        }
    }
}

fn step_into_mut(current: &mut Object, selector: Selector) -> &mut Object {
    match (&mut current.data, selector) {
        (ObjectData::Struct(children), Selector::Member { index, .. }) => {
            &mut children[index as usize]
        }
        (ObjectData::Array(children), Selector::Index(index)) => &mut children[index as usize],
        _ => panic!("path does not type-check: {selector:?}"),
    }
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "Tests use expect for brevity")]
mod tests {
    use super::*;
    use crate::errors::EvalErrorKind;
    use basalt_ir::{MemberDef, Name, Path};
    use pretty_assertions::assert_eq;

    struct Fixture {
        interner: StringInterner,
    }

    impl Fixture {
        fn new() -> Self {
            Fixture {
                interner: StringInterner::new(),
            }
        }

        fn name(&self, text: &str) -> Name {
            self.interner.intern(text)
        }

        /// `union { int a; float b; }`
        fn int_float_union(&self) -> Arc<TypeShape> {
            TypeShape::union_of(
                self.name("U"),
                vec![
                    MemberDef::new(self.name("a"), TypeShape::int()),
                    MemberDef::new(self.name("b"), TypeShape::float()),
                ],
            )
            .expect("well-formed union")
        }

        /// `union { int a; float b = 42.0; }`
        fn dmi_union(&self) -> Arc<TypeShape> {
            TypeShape::union_of(
                self.name("U"),
                vec![
                    MemberDef::new(self.name("a"), TypeShape::int()),
                    MemberDef::new(self.name("b"), TypeShape::float()).with_init(Init::float(42.0)),
                ],
            )
            .expect("well-formed union")
        }
    }

    fn member_path(fixture: &Fixture, shape: &TypeShape, name: &str) -> Path {
        let chain = shape
            .resolve_member(fixture.name(name))
            .expect("member resolves");
        Path::from_selectors(chain)
    }

    #[test]
    fn value_init_prefers_default_member_initializer() {
        let f = Fixture::new();
        let shape = f.dmi_union();
        let coordinator = Coordinator::new(&f.interner);
        let obj = coordinator
            .construct(&shape, &Init::Value)
            .expect("construction succeeds");
        assert_eq!(obj.active_member_name(), Some(f.name("b")));

        let b = member_path(&f, &shape, "b");
        assert_eq!(
            coordinator.read_scalar(&obj, &b).expect("b is readable"),
            Scalar::Float(42.0)
        );
    }

    #[test]
    fn value_init_without_dmi_zeroes_first_member() {
        let f = Fixture::new();
        let shape = f.int_float_union();
        let coordinator = Coordinator::new(&f.interner);
        let obj = coordinator
            .construct(&shape, &Init::Value)
            .expect("construction succeeds");
        assert_eq!(obj.active_member_name(), Some(f.name("a")));

        let a = member_path(&f, &shape, "a");
        assert_eq!(
            coordinator.read_scalar(&obj, &a).expect("a is readable"),
            Scalar::Int(0)
        );
    }

    #[test]
    fn default_init_without_dmi_is_inactive() {
        let f = Fixture::new();
        let shape = f.int_float_union();
        let coordinator = Coordinator::new(&f.interner);
        let obj = coordinator
            .construct(&shape, &Init::Default)
            .expect("construction succeeds");
        assert_eq!(obj.active_member_name(), None);
    }

    #[test]
    fn write_activates_and_read_of_other_member_fails() {
        let f = Fixture::new();
        let shape = f.int_float_union();
        let coordinator = Coordinator::new(&f.interner);
        let mut obj = coordinator
            .construct(&shape, &Init::Default)
            .expect("construction succeeds");

        let a = member_path(&f, &shape, "a");
        let b = member_path(&f, &shape, "b");
        coordinator
            .write_scalar(&mut obj, &a, ScalarLit::Int(10))
            .expect("write activates a");
        assert_eq!(
            coordinator.read_scalar(&obj, &a).expect("a is active"),
            Scalar::Int(10)
        );

        let err = coordinator.read_scalar(&obj, &b).expect_err("b is inactive");
        assert_eq!(
            err.to_string(),
            "read of member 'b' of union with active member 'a'"
        );
    }

    #[test]
    fn assignment_copies_activation_without_reading_leaves() {
        let f = Fixture::new();
        let shape = f.int_float_union();
        let coordinator = Coordinator::new(&f.interner);
        let mut src = coordinator
            .construct(&shape, &Init::Default)
            .expect("construction succeeds");
        let b = member_path(&f, &shape, "b");
        coordinator
            .write_scalar(&mut src, &b, ScalarLit::Float(1.5))
            .expect("write activates b");

        let mut dst = coordinator
            .construct(&shape, &Init::Default)
            .expect("construction succeeds");
        coordinator
            .assign(&mut dst, &Path::root(), src)
            .expect("whole-union assignment");
        assert_eq!(dst.active_member_name(), Some(f.name("b")));
        assert_eq!(
            coordinator.read_scalar(&dst, &b).expect("b is active"),
            Scalar::Float(1.5)
        );
    }

    #[test]
    fn destroy_active_member_ends_its_lifetime() {
        let f = Fixture::new();
        let shape = f.int_float_union();
        let coordinator = Coordinator::new(&f.interner);
        let mut obj = coordinator
            .construct(&shape, &Init::Value)
            .expect("construction succeeds");

        let a = member_path(&f, &shape, "a");
        coordinator.destroy(&mut obj, &a).expect("a is active");
        assert_eq!(obj.active_member_name(), None);
    }

    #[test]
    fn destroy_inactive_member_reports_active() {
        let f = Fixture::new();
        let shape = f.int_float_union();
        let coordinator = Coordinator::new(&f.interner);
        let mut obj = coordinator
            .construct(&shape, &Init::Value)
            .expect("construction succeeds");

        let b = member_path(&f, &shape, "b");
        let err = coordinator.destroy(&mut obj, &b).expect_err("b is inactive");
        assert_eq!(
            err.to_string(),
            "destruction of member 'b' of union with active member 'a'"
        );
    }

    #[test]
    fn member_call_requires_active_member() {
        let f = Fixture::new();
        let shape = TypeShape::union_of(
            f.name("U"),
            vec![
                MemberDef::new(f.name("a"), TypeShape::int()),
                MemberDef::new(
                    f.name("s"),
                    TypeShape::struct_of(f.name("S"), vec![]).expect("well-formed struct"),
                ),
            ],
        )
        .expect("well-formed union");
        let coordinator = Coordinator::new(&f.interner);
        let mut obj = coordinator
            .construct(&shape, &Init::Default)
            .expect("construction succeeds");

        let a = member_path(&f, &shape, "a");
        let s = member_path(&f, &shape, "s");
        coordinator
            .write_scalar(&mut obj, &a, ScalarLit::Int(1))
            .expect("write activates a");
        let err = coordinator.member_call(&obj, &s).expect_err("s is inactive");
        assert_eq!(
            err.to_string(),
            "member call on member 's' of union with active member 'a'"
        );
    }

    #[test]
    fn excess_union_initializer_is_rejected() {
        let f = Fixture::new();
        let shape = f.int_float_union();
        let coordinator = Coordinator::new(&f.interner);
        let err = coordinator
            .construct(
                &shape,
                &Init::List(vec![Init::int(1), Init::int(2)]),
            )
            .expect_err("two clauses on a union");
        assert!(matches!(err.kind, EvalErrorKind::ExcessInitializerElements));
    }

    #[test]
    fn designated_init_activates_named_member() {
        let f = Fixture::new();
        let shape = f.int_float_union();
        let coordinator = Coordinator::new(&f.interner);
        let obj = coordinator
            .construct(&shape, &Init::designated(f.name("b"), Init::float(13.0)))
            .expect("construction succeeds");
        assert_eq!(obj.active_member_name(), Some(f.name("b")));
    }
}
