//! Call tracking and diagnostic accumulation.
//!
//! The call stack caps routine recursion and names the frames for the
//! "in call to" note chain; the diagnostics sink collects evaluation
//! reports and remembers which routines can never produce a constant
//! value so the flag is raised once per routine, not once per call.

use crate::errors::{recursion_limit_exceeded, EvalError, EvalResult};
use basalt_ir::Name;
use rustc_hash::FxHashSet;

/// One active routine invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallFrame {
    pub routine: Name,
}

/// Stack of active routine invocations with a depth cap.
#[derive(Debug)]
pub struct CallStack {
    frames: Vec<CallFrame>,
    max_depth: usize,
}

impl CallStack {
    pub fn new(max_depth: usize) -> Self {
        CallStack {
            frames: Vec::new(),
            max_depth,
        }
    }

    /// Push a frame, failing once the depth cap is hit.
    pub fn push(&mut self, routine: Name) -> EvalResult<()> {
        if self.frames.len() >= self.max_depth {
            return Err(recursion_limit_exceeded(self.max_depth));
        }
        self.frames.push(CallFrame { routine });
        Ok(())
    }

    pub fn pop(&mut self) {
        let popped = self.frames.pop();
        debug_assert!(popped.is_some(), "pop on empty call stack");
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }
}

/// Accumulated reports from one or more evaluations.
#[derive(Debug, Default)]
pub struct Diagnostics {
    reports: Vec<EvalError>,
    never_constant: FxHashSet<Name>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Diagnostics::default()
    }

    /// Record an evaluation failure.
    pub fn report(&mut self, error: EvalError) {
        self.reports.push(error);
    }

    /// Flag `routine` as never producing a constant value.
    ///
    /// Raised when a routine fails on its unconditional path, meaning no
    /// argument values could make it succeed. Deduplicated per routine.
    /// Returns the flag message the first time, `None` on repeats.
    pub fn flag_never_constant(&mut self, routine: Name, routine_text: &str) -> Option<String> {
        if self.never_constant.insert(routine) {
            Some(format!(
                "'{routine_text}' never produces a constant expression"
            ))
        } else {
            None
        }
    }

    /// Whether `routine` has been flagged.
    pub fn is_never_constant(&self, routine: Name) -> bool {
        self.never_constant.contains(&routine)
    }

    pub fn reports(&self) -> &[EvalError] {
        &self.reports
    }
}
