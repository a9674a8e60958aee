//! Routine bodies for the evaluation driver.
//!
//! A routine is a named sequence of statements over locally declared
//! objects. The statement set is the minimum needed to drive the object
//! model: declarations, member writes, whole-object assignment,
//! destructor and member calls, nested routine calls, a leaf-comparison
//! conditional, scoped blocks, and return. Paths are written with
//! source-level member names; the interpreter resolves them against the
//! declared shapes, flattening anonymous members.

use basalt_ir::{Init, Name, ScalarLit, TypeShape};
use std::sync::Arc;

/// One step of a source-level path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Seg {
    /// `.name` — resolved through anonymous members if needed.
    Member(Name),
    /// `[index]`
    Index(u32),
}

/// A source-level path: a local's name followed by member/index steps.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathExpr {
    pub base: Name,
    pub segments: Vec<Seg>,
}

impl PathExpr {
    /// Path naming a whole local.
    pub fn local(base: Name) -> Self {
        PathExpr {
            base,
            segments: Vec::new(),
        }
    }

    #[must_use]
    pub fn member(mut self, name: Name) -> Self {
        self.segments.push(Seg::Member(name));
        self
    }

    #[must_use]
    pub fn index(mut self, index: u32) -> Self {
        self.segments.push(Seg::Index(index));
        self
    }
}

/// Value-producing expressions.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Lit(ScalarLit),
    /// Leaf read through a path; requires activation and initialization.
    Read(PathExpr),
    /// Address of a subobject; never inspects activation state.
    AddressOf(PathExpr),
    /// Address equality of two subobjects.
    AddressEq(PathExpr, PathExpr),
}

/// Branch conditions: a leaf read compared against a literal.
#[derive(Clone, Debug, PartialEq)]
pub enum Cond {
    Eq(PathExpr, ScalarLit),
}

/// Statements.
#[derive(Clone, Debug, PartialEq)]
pub enum Stmt {
    /// Declare a local and construct it from `init`.
    Declare {
        name: Name,
        shape: Arc<TypeShape>,
        init: Init,
    },
    /// Write a scalar through a path, activating union segments.
    Write { target: PathExpr, value: Expr },
    /// Whole-object assignment: structural copy of `src` over `dst`.
    Assign { dst: PathExpr, src: PathExpr },
    /// Explicit destructor call on a union member or subobject.
    DestroyMember(PathExpr),
    /// End the lifetime of a whole local; later reads of it fail.
    DestroyObject(Name),
    /// Member function call through a path; checks access only.
    MemberCall(PathExpr),
    /// Invoke another routine, discarding its value.
    Call(Name),
    /// Run `then_body` when `cond` holds.
    If { cond: Cond, then_body: Vec<Stmt> },
    /// Nested scope; locals declared inside die at exit.
    Block(Vec<Stmt>),
    Return(Expr),
}

/// A named routine.
#[derive(Clone, Debug, PartialEq)]
pub struct Routine {
    pub name: Name,
    pub body: Vec<Stmt>,
}

impl Routine {
    pub fn new(name: Name, body: Vec<Stmt>) -> Self {
        Routine { name, body }
    }
}
