//! Static type shapes.
//!
//! A [`TypeShape`] is the immutable, purely structural description of a
//! type: scalars, arrays, structs, and unions. Shapes are built bottom-up
//! and shared via `Arc`; the evaluator never mutates them.
//!
//! Anonymous struct/union members are flattened by name aliasing: their
//! members are additionally reachable as direct names of the enclosing
//! aggregate through [`TypeShape::resolve_member`], while still occupying
//! the anonymous aggregate's own storage slot.

use crate::{Init, Name, Selector};
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

/// Terminal scalar kinds with their storage sizes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Int,
    Float,
    Double,
    Bool,
}

impl ScalarKind {
    /// Storage size in bytes.
    pub const fn size(self) -> u64 {
        match self {
            ScalarKind::Int | ScalarKind::Float => 4,
            ScalarKind::Double => 8,
            ScalarKind::Bool => 1,
        }
    }
}

/// A field of a struct or an alternative member of a union.
#[derive(Clone, Debug, PartialEq)]
pub struct MemberDef {
    /// Member name; `Name::EMPTY` for anonymous aggregates.
    pub name: Name,
    /// Member type.
    pub shape: Arc<TypeShape>,
    /// Default-member-initializer, if the declaration carries one.
    pub init: Option<Init>,
    /// Whether this is an anonymous struct/union member whose members are
    /// reachable as direct names of the enclosing aggregate.
    pub anonymous: bool,
}

impl MemberDef {
    /// A named member with no default-member-initializer.
    pub fn new(name: Name, shape: Arc<TypeShape>) -> Self {
        MemberDef {
            name,
            shape,
            init: None,
            anonymous: false,
        }
    }

    /// Attach a default-member-initializer.
    #[must_use]
    pub fn with_init(mut self, init: Init) -> Self {
        self.init = Some(init);
        self
    }

    /// An anonymous struct/union member.
    pub fn anonymous(shape: Arc<TypeShape>) -> Self {
        MemberDef {
            name: Name::EMPTY,
            shape,
            init: None,
            anonymous: true,
        }
    }
}

/// Member list shared by struct and union shapes.
#[derive(Clone, Debug, PartialEq)]
pub struct AggregateShape {
    /// Tag name; `Name::EMPTY` for unnamed aggregates.
    pub name: Name,
    members: Vec<MemberDef>,
}

impl AggregateShape {
    /// Members in declaration order.
    pub fn members(&self) -> &[MemberDef] {
        &self.members
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Check for the empty aggregate (e.g. `union E {}`).
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Declaration-order index of a directly named member.
    pub fn member_index(&self, name: Name) -> Option<usize> {
        if name == Name::EMPTY {
            return None;
        }
        self.members.iter().position(|m| m.name == name)
    }

    /// Indices of members carrying a default-member-initializer.
    pub fn default_members(&self) -> impl Iterator<Item = usize> + '_ {
        self.members
            .iter()
            .enumerate()
            .filter(|(_, m)| m.init.is_some())
            .map(|(i, _)| i)
    }
}

/// Error produced while building a shape.
///
/// Shape errors are static: they depend only on declarations, never on any
/// particular evaluation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShapeError {
    /// More than one union member carries a default-member-initializer.
    AmbiguousDefaultMember { union_name: Name },
    /// An anonymous member is not a struct or union.
    AnonymousNonAggregate { aggregate_name: Name },
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeError::AmbiguousDefaultMember { .. } => {
                write!(f, "union has more than one default member initializer")
            }
            ShapeError::AnonymousNonAggregate { .. } => {
                write!(f, "anonymous member is not a struct or union")
            }
        }
    }
}

impl std::error::Error for ShapeError {}

/// Static shape of a type.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeShape {
    Scalar(ScalarKind),
    Array { elem: Arc<TypeShape>, len: u32 },
    Struct(AggregateShape),
    Union(AggregateShape),
}

impl TypeShape {
    /// `int` scalar shape.
    pub fn int() -> Arc<TypeShape> {
        Arc::new(TypeShape::Scalar(ScalarKind::Int))
    }

    /// `float` scalar shape.
    pub fn float() -> Arc<TypeShape> {
        Arc::new(TypeShape::Scalar(ScalarKind::Float))
    }

    /// `double` scalar shape.
    pub fn double() -> Arc<TypeShape> {
        Arc::new(TypeShape::Scalar(ScalarKind::Double))
    }

    /// `bool` scalar shape.
    pub fn bool() -> Arc<TypeShape> {
        Arc::new(TypeShape::Scalar(ScalarKind::Bool))
    }

    /// Array shape with `len` elements of `elem`.
    pub fn array(elem: Arc<TypeShape>, len: u32) -> Arc<TypeShape> {
        Arc::new(TypeShape::Array { elem, len })
    }

    /// Struct shape with the given fields in declaration order.
    pub fn struct_of(name: Name, members: Vec<MemberDef>) -> Result<Arc<TypeShape>, ShapeError> {
        validate_anonymous(name, &members)?;
        Ok(Arc::new(TypeShape::Struct(AggregateShape { name, members })))
    }

    /// Union shape with the given alternative members in declaration order.
    ///
    /// At most one member may carry a default-member-initializer; more than
    /// one is a shape-construction error, rejected here rather than during
    /// evaluation.
    pub fn union_of(name: Name, members: Vec<MemberDef>) -> Result<Arc<TypeShape>, ShapeError> {
        validate_anonymous(name, &members)?;
        let defaults = members.iter().filter(|m| m.init.is_some()).count();
        if defaults > 1 {
            return Err(ShapeError::AmbiguousDefaultMember { union_name: name });
        }
        Ok(Arc::new(TypeShape::Union(AggregateShape { name, members })))
    }

    /// Check if this shape is a union.
    pub fn is_union(&self) -> bool {
        matches!(self, TypeShape::Union(_))
    }

    /// The aggregate member list, for structs and unions.
    pub fn aggregate(&self) -> Option<&AggregateShape> {
        match self {
            TypeShape::Struct(agg) | TypeShape::Union(agg) => Some(agg),
            TypeShape::Scalar(_) | TypeShape::Array { .. } => None,
        }
    }

    /// Resolve a source-level member name against this aggregate,
    /// expanding anonymous-member aliasing.
    ///
    /// Returns the selector chain from this shape to the named member: a
    /// single selector for a direct member, or a chain stepping through
    /// each anonymous aggregate between here and the member. Returns
    /// `None` for scalars, arrays, and unknown names.
    pub fn resolve_member(&self, name: Name) -> Option<SmallVec<[Selector; 2]>> {
        let agg = self.aggregate()?;

        if let Some(index) = agg.member_index(name) {
            let index = u32::try_from(index).ok()?;
            return Some(SmallVec::from_slice(&[Selector::member(index, name)]));
        }

        // Not a direct member: search anonymous members depth-first.
        for (index, member) in agg.members().iter().enumerate() {
            if !member.anonymous {
                continue;
            }
            if let Some(rest) = member.shape.resolve_member(name) {
                let index = u32::try_from(index).ok()?;
                let mut chain = SmallVec::new();
                chain.push(Selector::member(index, Name::EMPTY));
                chain.extend(rest);
                return Some(chain);
            }
        }
        None
    }

    /// Shape reached by one selector.
    ///
    /// Returns `None` if the selector does not type-check against this
    /// shape (wrong selector kind, out-of-range member index or array
    /// index, or a member name that does not match the declaration).
    pub fn step(&self, selector: Selector) -> Option<&Arc<TypeShape>> {
        match (self, selector) {
            (TypeShape::Struct(agg) | TypeShape::Union(agg), Selector::Member { index, name }) => {
                let member = agg.members().get(index as usize)?;
                if member.name != name {
                    return None;
                }
                Some(&member.shape)
            }
            (TypeShape::Array { elem, len }, Selector::Index(index)) => {
                if index < *len {
                    Some(elem)
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

fn validate_anonymous(name: Name, members: &[MemberDef]) -> Result<(), ShapeError> {
    for member in members {
        if member.anonymous && member.shape.aggregate().is_none() {
            return Err(ShapeError::AnonymousNonAggregate {
                aggregate_name: name,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "Tests use expect for brevity")]
mod tests {
    use super::*;
    use crate::{Init, StringInterner};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_union_rejects_two_default_members() {
        let interner = StringInterner::new();
        let u = interner.intern("U");
        let a = interner.intern("a");
        let b = interner.intern("b");

        let result = TypeShape::union_of(
            u,
            vec![
                MemberDef::new(a, TypeShape::int()).with_init(Init::int(1)),
                MemberDef::new(b, TypeShape::int()).with_init(Init::int(2)),
            ],
        );
        assert_eq!(
            result.expect_err("two default members must be rejected"),
            ShapeError::AmbiguousDefaultMember { union_name: u }
        );
    }

    #[test]
    fn test_union_accepts_single_default_member() {
        let interner = StringInterner::new();
        let u = interner.intern("U");
        let i = interner.intern("i");
        let f = interner.intern("f");

        let shape = TypeShape::union_of(
            u,
            vec![
                MemberDef::new(i, TypeShape::int()),
                MemberDef::new(f, TypeShape::float()).with_init(Init::float(3.0)),
            ],
        )
        .expect("single default member is legal");
        let agg = shape.aggregate().expect("union is an aggregate");
        assert_eq!(agg.default_members().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_anonymous_member_must_be_aggregate() {
        let interner = StringInterner::new();
        let s = interner.intern("S");

        let result = TypeShape::struct_of(s, vec![MemberDef::anonymous(TypeShape::int())]);
        assert_eq!(
            result.expect_err("anonymous scalar must be rejected"),
            ShapeError::AnonymousNonAggregate { aggregate_name: s }
        );
    }

    #[test]
    fn test_resolve_direct_member() {
        let interner = StringInterner::new();
        let s = interner.intern("S");
        let x = interner.intern("x");
        let y = interner.intern("y");

        let shape = TypeShape::struct_of(
            s,
            vec![
                MemberDef::new(x, TypeShape::int()),
                MemberDef::new(y, TypeShape::int()),
            ],
        )
        .expect("shape builds");

        let chain = shape.resolve_member(y).expect("y resolves");
        assert_eq!(chain.as_slice(), &[Selector::member(1, y)]);
    }

    #[test]
    fn test_resolve_through_anonymous_union() {
        // struct S { union { int a; int b; }; int d; };
        let interner = StringInterner::new();
        let s = interner.intern("S");
        let a = interner.intern("a");
        let b = interner.intern("b");
        let d = interner.intern("d");

        let anon = TypeShape::union_of(
            Name::EMPTY,
            vec![
                MemberDef::new(a, TypeShape::int()),
                MemberDef::new(b, TypeShape::int()),
            ],
        )
        .expect("union builds");
        let shape = TypeShape::struct_of(
            s,
            vec![
                MemberDef::anonymous(anon),
                MemberDef::new(d, TypeShape::int()),
            ],
        )
        .expect("struct builds");

        let chain = shape.resolve_member(b).expect("b resolves through anon");
        assert_eq!(
            chain.as_slice(),
            &[Selector::member(0, Name::EMPTY), Selector::member(1, b)]
        );
        // Named sibling still resolves directly.
        let chain = shape.resolve_member(d).expect("d resolves");
        assert_eq!(chain.as_slice(), &[Selector::member(1, d)]);
    }

    #[test]
    fn test_resolve_two_anonymous_siblings() {
        // struct S { union { int a; }; union { int e; }; };
        let interner = StringInterner::new();
        let s = interner.intern("S");
        let a = interner.intern("a");
        let e = interner.intern("e");

        let first = TypeShape::union_of(Name::EMPTY, vec![MemberDef::new(a, TypeShape::int())])
            .expect("union builds");
        let second = TypeShape::union_of(Name::EMPTY, vec![MemberDef::new(e, TypeShape::int())])
            .expect("union builds");
        let shape = TypeShape::struct_of(
            s,
            vec![MemberDef::anonymous(first), MemberDef::anonymous(second)],
        )
        .expect("struct builds");

        let chain = shape.resolve_member(e).expect("e resolves");
        assert_eq!(
            chain.as_slice(),
            &[Selector::member(1, Name::EMPTY), Selector::member(0, e)]
        );
    }

    #[test]
    fn test_step_type_checks() {
        let interner = StringInterner::new();
        let s = interner.intern("S");
        let x = interner.intern("x");
        let wrong = interner.intern("wrong");

        let shape = TypeShape::struct_of(s, vec![MemberDef::new(x, TypeShape::int())])
            .expect("shape builds");

        assert!(shape.step(Selector::member(0, x)).is_some());
        assert!(shape.step(Selector::member(0, wrong)).is_none());
        assert!(shape.step(Selector::member(1, x)).is_none());
        assert!(shape.step(Selector::Index(0)).is_none());
    }
}
