//! Routine evaluation driver.
//!
//! [`Evaluator`] owns the routine registry and the diagnostics sink; each
//! top-level [`Evaluator::evaluate`] call runs against a fresh object
//! store and call stack, so one failed evaluation never poisons the
//! next. Statement semantics delegate to the
//! [`Coordinator`](crate::coordinator::Coordinator) — the interpreter
//! only resolves source-level names to typed paths and sequences
//! operations.
//!
//! # Never-constant flagging
//!
//! A routine whose call fails before any conditional branch was taken
//! cannot succeed for any inputs; the first such failure flags the
//! routine as never producing a constant value, once per routine. A
//! failure behind a condition stays a per-call-site report only.

use crate::coordinator::Coordinator;
use crate::diagnostics::{CallStack, Diagnostics};
use crate::errors::{undefined_routine, EvalNote, EvalResult};
use crate::routine::{Cond, Expr, PathExpr, Routine, Seg, Stmt};
use crate::stack::ensure_sufficient_stack;
use crate::store::{navigate, ObjectStore, RootId};
use crate::value::{Scalar, Value};
use basalt_ir::{Init, Name, Path, ScalarLit, Selector, SharedInterner, StringInterner, TypeShape};
use rustc_hash::FxHashMap;
use std::sync::Arc;
use tracing::trace;

/// Evaluation limits.
#[derive(Clone, Copy, Debug)]
pub struct EvalLimits {
    /// Maximum routine call depth before `RecursionLimitExceeded`.
    pub max_call_depth: usize,
}

impl Default for EvalLimits {
    fn default() -> Self {
        EvalLimits {
            max_call_depth: 512,
        }
    }
}

/// Routine registry plus diagnostics, shared across evaluations.
pub struct Evaluator {
    interner: SharedInterner,
    routines: FxHashMap<Name, Routine>,
    limits: EvalLimits,
    diagnostics: Diagnostics,
}

impl Evaluator {
    pub fn new(interner: SharedInterner) -> Self {
        Evaluator::with_limits(interner, EvalLimits::default())
    }

    pub fn with_limits(interner: SharedInterner, limits: EvalLimits) -> Self {
        Evaluator {
            interner,
            routines: FxHashMap::default(),
            limits,
            diagnostics: Diagnostics::new(),
        }
    }

    pub fn interner(&self) -> &SharedInterner {
        &self.interner
    }

    /// Register a routine, replacing any previous one with the same name.
    pub fn register(&mut self, routine: Routine) {
        self.routines.insert(routine.name, routine);
    }

    /// Evaluate `name` top-level in a fresh store.
    ///
    /// Failures are reported to the diagnostics sink and returned; the
    /// evaluator stays usable for further evaluations.
    pub fn evaluate(&mut self, name: Name) -> EvalResult<Value> {
        trace!(routine = self.interner.lookup(name), "evaluate");
        let result = {
            let mut exec = Exec {
                routines: &self.routines,
                interner: &self.interner,
                diagnostics: &mut self.diagnostics,
                store: ObjectStore::new(),
                scopes: Vec::new(),
                calls: CallStack::new(self.limits.max_call_depth),
                branched: false,
            };
            exec.call_routine(name)
        };
        if let Err(err) = &result {
            self.diagnostics.report(err.clone());
        }
        result
    }

    /// Construct an object of `shape` from `init` and snapshot it.
    pub fn evaluate_init(&mut self, shape: &Arc<TypeShape>, init: &Init) -> EvalResult<Value> {
        let coordinator = Coordinator::new(&self.interner);
        match ensure_sufficient_stack(|| coordinator.construct(shape, init)) {
            Ok(object) => Ok(object.snapshot()),
            Err(err) => {
                self.diagnostics.report(err.clone());
                Err(err)
            }
        }
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }
}

/// Control flow out of a statement.
enum Flow {
    Normal,
    Returned(Value),
}

/// State of one top-level evaluation.
struct Exec<'e> {
    routines: &'e FxHashMap<Name, Routine>,
    interner: &'e StringInterner,
    diagnostics: &'e mut Diagnostics,
    store: ObjectStore,
    scopes: Vec<FxHashMap<Name, RootId>>,
    calls: CallStack,
    branched: bool,
}

impl Exec<'_> {
    fn call_routine(&mut self, name: Name) -> EvalResult<Value> {
        let routines = self.routines;
        let routine = routines
            .get(&name)
            .ok_or_else(|| undefined_routine(self.interner.lookup(name)))?;
        self.calls.push(name)?;
        let caller_branched = self.branched;
        self.branched = false;

        let result = self.exec_scoped(&routine.body);

        let callee_branched = self.branched;
        self.calls.pop();
        self.branched = caller_branched || callee_branched;

        match result {
            Ok(Flow::Returned(value)) => Ok(value),
            Ok(Flow::Normal) => Ok(Value::Void),
            Err(err) => {
                // An unconditional failure means no inputs can make this
                // routine constant.
                let err = if callee_branched {
                    err
                } else {
                    match self
                        .diagnostics
                        .flag_never_constant(name, self.interner.lookup(name))
                    {
                        Some(message) => err.with_note(EvalNote::new(message)),
                        None => err,
                    }
                };
                Err(err)
            }
        }
    }

    /// Run `stmts` in a new scope; locals bound inside die at exit.
    fn exec_scoped(&mut self, stmts: &[Stmt]) -> EvalResult<Flow> {
        self.scopes.push(FxHashMap::default());
        let result = self.exec_stmts(stmts);
        self.pop_scope();
        result
    }

    fn exec_stmts(&mut self, stmts: &[Stmt]) -> EvalResult<Flow> {
        for stmt in stmts {
            match ensure_sufficient_stack(|| self.exec_stmt(stmt))? {
                Flow::Normal => {}
                flow @ Flow::Returned(_) => return Ok(flow),
            }
        }
        Ok(Flow::Normal)
    }

    fn exec_stmt(&mut self, stmt: &Stmt) -> EvalResult<Flow> {
        match stmt {
            Stmt::Declare { name, shape, init } => {
                let coordinator = Coordinator::new(self.interner);
                let object = ensure_sufficient_stack(|| coordinator.construct(shape, init))?;
                let id = self.store.alloc(object);
                self.bind(*name, id);
                Ok(Flow::Normal)
            }
            Stmt::Write { target, value } => {
                let scalar = self
                    .eval_expr(value)?
                    .as_scalar()
                    .unwrap_or_else(|| panic!("write value is not a scalar"));
                let (id, path) = self.resolve(target);
                let coordinator = Coordinator::new(self.interner);
                coordinator.write_scalar(self.store.object_mut(id), &path, scalar.to_lit())?;
                Ok(Flow::Normal)
            }
            Stmt::Assign { dst, src } => {
                let (src_id, src_path) = self.resolve(src);
                let source = navigate(self.store.object(src_id), &src_path, self.interner)?
                    .clone();
                let (dst_id, dst_path) = self.resolve(dst);
                let coordinator = Coordinator::new(self.interner);
                coordinator.assign(self.store.object_mut(dst_id), &dst_path, source)?;
                Ok(Flow::Normal)
            }
            Stmt::DestroyMember(target) => {
                let (id, path) = self.resolve(target);
                let coordinator = Coordinator::new(self.interner);
                coordinator.destroy(self.store.object_mut(id), &path)?;
                Ok(Flow::Normal)
            }
            Stmt::DestroyObject(name) => {
                // Binding stays; later reads report the ended lifetime.
                let id = self.lookup_local(*name);
                self.store.object_mut(id).mark_destroyed();
                Ok(Flow::Normal)
            }
            Stmt::MemberCall(target) => {
                let (id, path) = self.resolve(target);
                let coordinator = Coordinator::new(self.interner);
                coordinator.member_call(self.store.object(id), &path)?;
                Ok(Flow::Normal)
            }
            Stmt::Call(name) => {
                self.call_routine(*name)
                    .map_err(|err| err.with_note(EvalNote::in_call_to(self.interner.lookup(*name))))?;
                Ok(Flow::Normal)
            }
            Stmt::If { cond, then_body } => {
                let taken = self.eval_cond(cond)?;
                // The branch counts as taken once the condition itself
                // evaluated; a failure inside the condition is still
                // unconditional.
                self.branched = true;
                if taken {
                    self.exec_scoped(then_body)
                } else {
                    Ok(Flow::Normal)
                }
            }
            Stmt::Block(stmts) => self.exec_scoped(stmts),
            Stmt::Return(expr) => Ok(Flow::Returned(self.eval_expr(expr)?)),
        }
    }

    fn eval_expr(&mut self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Lit(lit) => Ok(Value::Scalar(match *lit {
                ScalarLit::Int(v) => Scalar::Int(v),
                ScalarLit::Float(v) => Scalar::Float(v),
                ScalarLit::Bool(v) => Scalar::Bool(v),
            })),
            Expr::Read(path) => {
                let (id, resolved) = self.resolve(path);
                let coordinator = Coordinator::new(self.interner);
                let scalar = coordinator.read_scalar(self.store.object(id), &resolved)?;
                Ok(Value::Scalar(scalar))
            }
            Expr::AddressOf(path) => {
                let (id, resolved) = self.resolve(path);
                Ok(Value::Address(self.store.address_of(id, &resolved)))
            }
            Expr::AddressEq(lhs, rhs) => {
                let (lhs_id, lhs_path) = self.resolve(lhs);
                let (rhs_id, rhs_path) = self.resolve(rhs);
                let lhs_addr = self.store.address_of(lhs_id, &lhs_path);
                let rhs_addr = self.store.address_of(rhs_id, &rhs_path);
                Ok(Value::bool(lhs_addr == rhs_addr))
            }
        }
    }

    fn eval_cond(&mut self, cond: &Cond) -> EvalResult<bool> {
        match cond {
            Cond::Eq(path, lit) => {
                let (id, resolved) = self.resolve(path);
                let coordinator = Coordinator::new(self.interner);
                let scalar = coordinator.read_scalar(self.store.object(id), &resolved)?;
                Ok(scalar_equals_lit(scalar, *lit))
            }
        }
    }

    /// Resolve a source-level path to a root and a typed selector path,
    /// flattening anonymous members.
    ///
    /// # Panics
    /// Panics when a name or index does not exist in the declared shape;
    /// ill-formed paths are host bugs, not evaluation failures.
    fn resolve(&self, path: &PathExpr) -> (RootId, Path) {
        let id = self.lookup_local(path.base);
        let mut shape = Arc::clone(&self.store.object(id).shape);
        let mut resolved = Path::root();
        for seg in &path.segments {
            match *seg {
                Seg::Member(name) => {
                    let chain = shape.resolve_member(name).unwrap_or_else(|| {
                        panic!("no member '{}' in shape", self.interner.lookup(name))
                    });
                    for selector in chain {
                        let next = shape
                            .step(selector)
                            .map(Arc::clone)
                            .unwrap_or_else(|| panic!("path does not type-check: {selector:?}"));
                        resolved.push(selector);
                        shape = next;
                    }
                }
                Seg::Index(index) => {
                    let selector = Selector::Index(index);
                    let next = shape
                        .step(selector)
                        .map(Arc::clone)
                        .unwrap_or_else(|| panic!("index {index} on non-array shape"));
                    resolved.push(selector);
                    shape = next;
                }
            }
        }
        (id, resolved)
    }

    fn lookup_local(&self, name: Name) -> RootId {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(&name).copied())
            .unwrap_or_else(|| panic!("unknown local '{}'", self.interner.lookup(name)))
    }

    fn bind(&mut self, name: Name, id: RootId) {
        let scope = self
            .scopes
            .last_mut()
            .unwrap_or_else(|| panic!("binding outside any scope"));
        scope.insert(name, id);
    }

    fn pop_scope(&mut self) {
        let scope = self
            .scopes
            .pop()
            .unwrap_or_else(|| panic!("scope pop without push"));
        for id in scope.into_values() {
            self.store.object_mut(id).mark_destroyed();
        }
    }
}

#[expect(
    clippy::float_cmp,
    reason = "condition compares an exact stored value against its literal"
)]
#[expect(
    clippy::cast_precision_loss,
    reason = "int literal against a float leaf mirrors source semantics"
)]
fn scalar_equals_lit(scalar: Scalar, lit: ScalarLit) -> bool {
    match (scalar, lit) {
        (Scalar::Int(v), ScalarLit::Int(w)) => v == w,
        (Scalar::Float(v), ScalarLit::Float(w)) => v == w,
        (Scalar::Float(v), ScalarLit::Int(w)) => v == w as f64,
        (Scalar::Bool(v), ScalarLit::Bool(w)) => v == w,
        _ => false,
    }
}
