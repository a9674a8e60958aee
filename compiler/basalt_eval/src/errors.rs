//! Error types for constant evaluation.
//!
//! # Structured Error Categories
//!
//! `EvalErrorKind` provides typed failure categories. Factory functions
//! (e.g. `read_of_inactive_member()`) are the public construction API —
//! they populate both `kind` and `message`, and the `Display` impl
//! produces the canonical diagnostic wording consumed by the surrounding
//! compiler, which must be reproduced bit-for-bit.
//!
//! Every kind here is non-fatal to the host: it converts the current
//! expression's result into "not a constant expression" and propagates
//! upward without unwinding unrelated evaluation state.

use basalt_ir::{Path, ShapeError, Span};
use std::fmt;

/// Result of evaluation.
pub type EvalResult<T> = Result<T, EvalError>;

/// Typed failure category.
///
/// Each variant carries the structured data its diagnostic needs. Member
/// names are carried as resolved strings so the error is self-contained
/// once it leaves the evaluator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    // Union access
    ReadOfInactiveMember {
        accessed: String,
        /// Active member name, or `None` when no member is active.
        active: Option<String>,
    },
    DestructionOfInactiveMember {
        member: String,
        active: Option<String>,
    },
    MemberCallOnInactiveMember {
        member: String,
        active: Option<String>,
    },

    // Lifetime / initialization
    ReadOfUninitializedObject,
    ReadOutsideLifetime,

    // Initializer shape
    ExcessInitializerElements,
    ConstructionShapeError {
        message: String,
    },

    // Routine evaluation
    UndefinedRoutine {
        name: String,
    },
    RecursionLimitExceeded {
        limit: usize,
    },
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadOfInactiveMember { accessed, active } => match active {
                Some(active) => write!(
                    f,
                    "read of member '{accessed}' of union with active member '{active}'"
                ),
                None => write!(
                    f,
                    "read of member '{accessed}' of union with no active member"
                ),
            },
            Self::DestructionOfInactiveMember { member, active } => match active {
                Some(active) => write!(
                    f,
                    "destruction of member '{member}' of union with active member '{active}'"
                ),
                None => write!(
                    f,
                    "destruction of member '{member}' of union with no active member"
                ),
            },
            Self::MemberCallOnInactiveMember { member, active } => match active {
                Some(active) => write!(
                    f,
                    "member call on member '{member}' of union with active member '{active}'"
                ),
                None => write!(
                    f,
                    "member call on member '{member}' of union with no active member"
                ),
            },
            Self::ReadOfUninitializedObject => write!(f, "read of uninitialized object"),
            Self::ReadOutsideLifetime => write!(f, "read of object outside its lifetime"),
            Self::ExcessInitializerElements => {
                write!(f, "excess elements in union initializer")
            }
            Self::ConstructionShapeError { message } => write!(f, "{message}"),
            Self::UndefinedRoutine { name } => write!(f, "undefined routine: {name}"),
            Self::RecursionLimitExceeded { limit } => {
                write!(f, "maximum evaluation depth exceeded (limit: {limit})")
            }
        }
    }
}

/// Additional context note attached to an error.
///
/// Notes form the chain the surrounding compiler renders under the primary
/// diagnostic, e.g. `in call to 'foo'` frames.
#[derive(Clone, Debug, PartialEq)]
pub struct EvalNote {
    pub message: String,
    pub span: Option<Span>,
}

impl EvalNote {
    /// Create a note with just a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            span: None,
        }
    }

    /// Create a note with a message and source location.
    pub fn with_span(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span: Some(span),
        }
    }

    /// The `in call to '<routine>'` note attached when a failure propagates
    /// out of a nested routine call.
    pub fn in_call_to(routine: &str) -> Self {
        Self::new(format!("in call to '{routine}'"))
    }
}

/// Evaluation failure.
///
/// Converts the current expression into "not a constant expression". The
/// offending [`Path`] is attached where known; nested propagation appends
/// notes without replacing the original kind.
#[derive(Clone, Debug, PartialEq)]
pub struct EvalError {
    /// Structured failure category.
    pub kind: EvalErrorKind,
    /// Human-readable message; equals `kind.to_string()`.
    pub message: String,
    /// Path at which the failure occurred, rooted at the offending object.
    pub path: Option<Path>,
    /// Source location, when the host supplied one.
    pub span: Option<Span>,
    /// Context note chain, outermost last.
    pub notes: Vec<EvalNote>,
}

impl EvalError {
    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            message,
            path: None,
            span: None,
            notes: Vec::new(),
        }
    }

    /// Attach the offending path.
    #[must_use]
    pub fn with_path(mut self, path: Path) -> Self {
        self.path = Some(path);
        self
    }

    /// Attach a source location.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Append a context note.
    #[must_use]
    pub fn with_note(mut self, note: EvalNote) -> Self {
        self.notes.push(note);
        self
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for EvalError {}

impl From<ShapeError> for EvalError {
    fn from(err: ShapeError) -> Self {
        construction_shape_error(&err)
    }
}

// Factory functions

/// Read through a union member that is not the active member.
pub fn read_of_inactive_member(accessed: &str, active: Option<&str>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ReadOfInactiveMember {
        accessed: accessed.to_owned(),
        active: active.map(str::to_owned),
    })
}

/// Explicit destructor call on a union member that is not active.
pub fn destruction_of_inactive_member(member: &str, active: Option<&str>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::DestructionOfInactiveMember {
        member: member.to_owned(),
        active: active.map(str::to_owned),
    })
}

/// Member function call through a union member that is not active.
pub fn member_call_on_inactive_member(member: &str, active: Option<&str>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MemberCallOnInactiveMember {
        member: member.to_owned(),
        active: active.map(str::to_owned),
    })
}

/// Read of a leaf that was never written.
pub fn read_of_uninitialized_object() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ReadOfUninitializedObject)
}

/// Read of a leaf whose lifetime has ended.
pub fn read_outside_lifetime() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ReadOutsideLifetime)
}

/// More initializer clauses than a union can accept (at most one).
pub fn excess_initializer_elements() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ExcessInitializerElements)
}

/// A shape-level construction error reached the evaluator.
pub fn construction_shape_error(err: &ShapeError) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ConstructionShapeError {
        message: err.to_string(),
    })
}

/// A routine name with no registered body.
pub fn undefined_routine(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedRoutine {
        name: name.to_owned(),
    })
}

/// Nested evaluation exceeded the configured call depth.
pub fn recursion_limit_exceeded(limit: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::RecursionLimitExceeded { limit })
}
