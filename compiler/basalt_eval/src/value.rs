//! Evaluation values.
//!
//! [`Scalar`] is the terminal storage of a leaf cell; [`Value`] is the
//! snapshot form the evaluator hands back to its driver. Leaves that were
//! never written appear as [`Value::Indeterminate`] in snapshots, so a
//! partially-initialized result is still representable.

use basalt_ir::{Name, ScalarKind, ScalarLit};

/// A terminal scalar value.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Scalar {
    Int(i64),
    /// Backs both `Float` and `Double` leaves.
    Float(f64),
    Bool(bool),
}

impl Scalar {
    /// Zero value for a scalar kind.
    pub fn zero(kind: ScalarKind) -> Scalar {
        match kind {
            ScalarKind::Int => Scalar::Int(0),
            ScalarKind::Float | ScalarKind::Double => Scalar::Float(0.0),
            ScalarKind::Bool => Scalar::Bool(false),
        }
    }

    /// Convert a literal to the representation of the destination leaf.
    ///
    /// Integer literals written into floating-point leaves are converted;
    /// everything else keeps its own representation.
    #[expect(
        clippy::cast_precision_loss,
        reason = "int-to-float initializer conversion mirrors source semantics"
    )]
    pub fn from_lit(lit: ScalarLit, kind: ScalarKind) -> Scalar {
        match (lit, kind) {
            (ScalarLit::Int(v), ScalarKind::Float | ScalarKind::Double) => Scalar::Float(v as f64),
            (ScalarLit::Int(v), _) => Scalar::Int(v),
            (ScalarLit::Float(v), _) => Scalar::Float(v),
            (ScalarLit::Bool(v), _) => Scalar::Bool(v),
        }
    }

    /// Literal form of this scalar, for re-writing a read value.
    pub fn to_lit(self) -> ScalarLit {
        match self {
            Scalar::Int(v) => ScalarLit::Int(v),
            Scalar::Float(v) => ScalarLit::Float(v),
            Scalar::Bool(v) => ScalarLit::Bool(v),
        }
    }
}

/// Snapshot of an object tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Scalar(Scalar),
    /// A leaf that was never written.
    Indeterminate,
    Array(Vec<Value>),
    /// Field values in declaration order.
    Struct(Vec<Value>),
    /// Active member name and its value, or `None` for an inactive union.
    Union(Option<(Name, Box<Value>)>),
    /// A synthetic address produced by address-of.
    Address(u64),
    /// Result of a routine that returned nothing.
    Void,
}

impl Value {
    /// Integer scalar.
    pub fn int(value: i64) -> Value {
        Value::Scalar(Scalar::Int(value))
    }

    /// Floating-point scalar.
    pub fn float(value: f64) -> Value {
        Value::Scalar(Scalar::Float(value))
    }

    /// Boolean scalar.
    pub fn bool(value: bool) -> Value {
        Value::Scalar(Scalar::Bool(value))
    }

    /// The scalar inside, if this is a scalar value.
    pub fn as_scalar(&self) -> Option<Scalar> {
        match self {
            Value::Scalar(s) => Some(*s),
            _ => None,
        }
    }

    /// The integer inside, if this is an integer scalar.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Scalar(Scalar::Int(v)) => Some(*v),
            _ => None,
        }
    }
}
