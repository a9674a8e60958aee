//! Basalt Eval - Constant evaluator for the Basalt compiler.
//!
//! This crate evaluates routine bodies over typed object trees, with the
//! union active-member model at its core: at most one member of a union
//! holds a value at any time, reads and member calls are gated on the
//! active member, and writes implicitly switch it.
//!
//! # Architecture
//!
//! - `store`: object trees, leaf initialization state, read-authorized
//!   navigation, and the root object store with synthetic addresses
//! - `unions`: the activation engine — the only code that flips a
//!   union's active-member slot
//! - `coordinator`: construction, member writes, whole-object
//!   assignment, destructor and member calls
//! - `interpreter`: the routine driver with per-call diagnostics and
//!   the never-constant flag
//! - `errors`: diagnostic kinds with their exact user-facing wording
//!
//! Address identity is computed purely from `basalt_ir::layout`; the
//! store never consults activation state for it, so two alternatives at
//! the same offset compare equal whether or not either is active.

pub mod coordinator;
pub mod diagnostics;
pub mod errors;
pub mod interpreter;
pub mod routine;
mod stack;
pub mod store;
pub mod unions;
mod value;

pub use coordinator::Coordinator;
pub use diagnostics::{CallFrame, CallStack, Diagnostics};
pub use errors::{EvalError, EvalErrorKind, EvalNote, EvalResult};
pub use interpreter::{EvalLimits, Evaluator};
pub use routine::{Cond, Expr, PathExpr, Routine, Seg, Stmt};
pub use stack::ensure_sufficient_stack;
pub use store::{navigate, navigate_mut, InitState, Object, ObjectData, ObjectStore, RootId};
pub use value::{Scalar, Value};

#[cfg(test)]
#[expect(clippy::expect_used, reason = "Tests use expect for brevity")]
mod tests;
