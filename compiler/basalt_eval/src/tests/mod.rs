//! Scenario tests for the union object model and the routine driver.
//!
//! Each module covers one family of behaviors: activation and gated
//! reads, initialization forms, whole-object copies, anonymous-member
//! flattening, destruction, member calls, address identity, and
//! driver-level diagnostics.

mod activation;

use crate::routine::{Expr, PathExpr, Routine, Stmt};
use crate::{EvalResult, Evaluator, Value};
use basalt_ir::{Init, MemberDef, Name, ScalarLit, SharedInterner, TypeShape};
use std::sync::Arc;

/// Shared evaluator fixture for scenario tests.
pub(crate) struct Harness {
    pub evaluator: Evaluator,
}

impl Harness {
    pub fn new() -> Self {
        Harness {
            evaluator: Evaluator::new(SharedInterner::new()),
        }
    }

    pub fn name(&self, text: &str) -> Name {
        self.evaluator.interner().intern(text)
    }

    /// Register `body` under `routine` and evaluate it once.
    pub fn run(&mut self, routine: &str, body: Vec<Stmt>) -> EvalResult<Value> {
        let name = self.name(routine);
        self.evaluator.register(Routine::new(name, body));
        self.evaluator.evaluate(name)
    }

    pub fn member(&self, name: &str, shape: Arc<TypeShape>) -> MemberDef {
        MemberDef::new(self.name(name), shape)
    }

    pub fn union_shape(&self, name: &str, members: Vec<MemberDef>) -> Arc<TypeShape> {
        TypeShape::union_of(self.name(name), members).expect("well-formed union")
    }

    pub fn struct_shape(&self, name: &str, members: Vec<MemberDef>) -> Arc<TypeShape> {
        TypeShape::struct_of(self.name(name), members).expect("well-formed struct")
    }

    /// `union { int a; float b; }`
    pub fn int_float_union(&self) -> Arc<TypeShape> {
        self.union_shape(
            "U",
            vec![
                self.member("a", TypeShape::int()),
                self.member("b", TypeShape::float()),
            ],
        )
    }

    /// Path from a local's name through dotted member names.
    pub fn path(&self, base: &str, members: &[&str]) -> PathExpr {
        let mut path = PathExpr::local(self.name(base));
        for member in members {
            path = path.member(self.name(member));
        }
        path
    }

    pub fn declare(&self, local: &str, shape: &Arc<TypeShape>, init: Init) -> Stmt {
        Stmt::Declare {
            name: self.name(local),
            shape: Arc::clone(shape),
            init,
        }
    }

    pub fn write(&self, base: &str, members: &[&str], value: ScalarLit) -> Stmt {
        Stmt::Write {
            target: self.path(base, members),
            value: Expr::Lit(value),
        }
    }

    /// `return <base>.<members...>;`
    pub fn ret_read(&self, base: &str, members: &[&str]) -> Stmt {
        Stmt::Return(Expr::Read(self.path(base, members)))
    }
}
