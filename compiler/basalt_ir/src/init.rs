//! Initializer forms.
//!
//! An [`Init`] describes how an object comes into being: plain declaration,
//! value-initialization, a scalar initializer, a positional braced list, or
//! a designated member initializer. Default-member-initializers attached to
//! shape members are themselves `Init` values.

use crate::Name;

/// Literal scalar initializer value.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ScalarLit {
    Int(i64),
    /// Used for both `Float` and `Double` leaves.
    Float(f64),
    Bool(bool),
}

/// Initializer for an object or subobject.
#[derive(Clone, Debug, PartialEq)]
pub enum Init {
    /// Plain declaration, `T x;` — default-initialization. Scalar leaves
    /// stay uninitialized; a union applies only the default-member-
    /// initializer half of the activation rule.
    Default,
    /// `T x{}` / `T()` — value-initialization. Scalar leaves without a
    /// default-member-initializer are zero-initialized; a union applies
    /// the full activation rule including the first-member fallback.
    Value,
    /// `= lit` on a scalar.
    Scalar(ScalarLit),
    /// Positional braced list. On a union, at most one element is legal.
    List(Vec<Init>),
    /// `{.member = init}`, or a constructor member-initializer-list entry
    /// naming `member`.
    Designated(Name, Box<Init>),
}

impl Init {
    /// Convenience constructor for a designated member initializer.
    pub fn designated(member: Name, init: Init) -> Self {
        Init::Designated(member, Box::new(init))
    }

    /// Convenience constructor for an integer scalar initializer.
    pub fn int(value: i64) -> Self {
        Init::Scalar(ScalarLit::Int(value))
    }

    /// Convenience constructor for a floating-point scalar initializer.
    pub fn float(value: f64) -> Self {
        Init::Scalar(ScalarLit::Float(value))
    }
}
