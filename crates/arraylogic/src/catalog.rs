//! Opcode catalogs.
//!
//! Two closed tables bind a display symbol to an operation identity. The array
//! catalog is metadata only: hosts map an [`ArrayOp`] to the matching
//! `FlatArray` call. The vector catalog also binds each identity to exactly one
//! kernel, tagged by the kind of result it produces.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::math::vector;

/// Array-domain operation identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArrayOp {
    Add,
    Sub,
    Mul,
    DotProd,
    CrossProd,
    Sum,
    ProdAll,
    Change,
    Get,
    Shuffle,
    Resize,
}

impl ArrayOp {
    pub const ALL: [ArrayOp; 11] = [
        ArrayOp::Add,
        ArrayOp::Sub,
        ArrayOp::Mul,
        ArrayOp::DotProd,
        ArrayOp::CrossProd,
        ArrayOp::Sum,
        ArrayOp::ProdAll,
        ArrayOp::Change,
        ArrayOp::Get,
        ArrayOp::Shuffle,
        ArrayOp::Resize,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            ArrayOp::Add => "+",
            ArrayOp::Sub => "-",
            ArrayOp::Mul => "*",
            ArrayOp::DotProd => "·",
            ArrayOp::CrossProd => "x",
            ArrayOp::Sum => "sum",
            ArrayOp::ProdAll => "prod",
            ArrayOp::Change => "change",
            ArrayOp::Get => "pick",
            ArrayOp::Shuffle => "shuffle",
            ArrayOp::Resize => "resize",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ArrayOp::Add => "Add",
            ArrayOp::Sub => "Sub",
            ArrayOp::Mul => "Mul",
            ArrayOp::DotProd => "DotProd",
            ArrayOp::CrossProd => "CrossProd",
            ArrayOp::Sum => "Sum",
            ArrayOp::ProdAll => "ProdAll",
            ArrayOp::Change => "Change",
            ArrayOp::Get => "Get",
            ArrayOp::Shuffle => "Shuffle",
            ArrayOp::Resize => "Resize",
        }
    }

    /// Operations that require a second array operand. `Mul` takes either an
    /// array or a scalar factor and is not listed.
    pub fn is_binary(self) -> bool {
        matches!(
            self,
            ArrayOp::Add | ArrayOp::Sub | ArrayOp::DotProd | ArrayOp::CrossProd
        )
    }

    /// Operations whose result is a scalar rather than an array.
    pub fn is_scalar(self) -> bool {
        matches!(
            self,
            ArrayOp::DotProd | ArrayOp::Sum | ArrayOp::ProdAll | ArrayOp::Get
        )
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == symbol)
    }
}

impl fmt::Display for ArrayOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for ArrayOp {
    type Err = String;

    /// Accepts the display symbol or the identity name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        Self::from_symbol(key)
            .or_else(|| {
                Self::ALL
                    .into_iter()
                    .find(|op| op.name().eq_ignore_ascii_case(key))
            })
            .or_else(|| match key.to_lowercase().as_str() {
                "dot" => Some(ArrayOp::DotProd),
                "cross" => Some(ArrayOp::CrossProd),
                _ => None,
            })
            .ok_or_else(|| format!("Unknown array operation: {}", s))
    }
}

/// Kernel producing a scalar from two short vectors.
pub type ScalarKernel = fn(&[f64], &[f64]) -> f64;

/// Kernel producing a vector from two short vectors.
pub type VectorKernel = fn(&[f64], &[f64]) -> Vec<f64>;

/// The single kernel bound to a vector opcode, tagged by result arity.
#[derive(Clone, Copy)]
pub enum Kernel {
    Scalar(ScalarKernel),
    Vector(VectorKernel),
}

impl Kernel {
    pub fn call(&self, a: &[f64], b: &[f64]) -> VectorValue {
        match self {
            Kernel::Scalar(f) => VectorValue::Scalar(f(a, b)),
            Kernel::Vector(f) => VectorValue::Vector(f(a, b)),
        }
    }
}

impl fmt::Debug for Kernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kernel::Scalar(_) => f.write_str("Kernel::Scalar"),
            Kernel::Vector(_) => f.write_str("Kernel::Vector"),
        }
    }
}

/// Result of a vector opcode.
#[derive(Clone, Debug, PartialEq)]
pub enum VectorValue {
    Scalar(f64),
    Vector(Vec<f64>),
}

/// Vector-domain operation identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VectorOp {
    AddV,
    SubV,
    DotV,
    CrossV,
}

impl VectorOp {
    pub const ALL: [VectorOp; 4] = [
        VectorOp::AddV,
        VectorOp::SubV,
        VectorOp::DotV,
        VectorOp::CrossV,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            VectorOp::AddV => "+",
            VectorOp::SubV => "-",
            VectorOp::DotV => "·",
            VectorOp::CrossV => "x",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            VectorOp::AddV => "AddV",
            VectorOp::SubV => "SubV",
            VectorOp::DotV => "DotV",
            VectorOp::CrossV => "CrossV",
        }
    }

    pub fn kernel(self) -> Kernel {
        match self {
            VectorOp::AddV => Kernel::Vector(vector::add),
            VectorOp::SubV => Kernel::Vector(vector::sub),
            VectorOp::DotV => Kernel::Scalar(vector::dot),
            VectorOp::CrossV => Kernel::Vector(vector::cross),
        }
    }

    pub fn is_scalar(self) -> bool {
        matches!(self.kernel(), Kernel::Scalar(_))
    }

    pub fn apply(self, a: &[f64], b: &[f64]) -> VectorValue {
        self.kernel().call(a, b)
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == symbol)
    }
}

impl fmt::Display for VectorOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for VectorOp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        Self::from_symbol(key)
            .or_else(|| {
                Self::ALL
                    .into_iter()
                    .find(|op| op.name().eq_ignore_ascii_case(key))
            })
            .or_else(|| match key.to_lowercase().as_str() {
                "add" => Some(VectorOp::AddV),
                "sub" => Some(VectorOp::SubV),
                "dot" => Some(VectorOp::DotV),
                "cross" => Some(VectorOp::CrossV),
                _ => None,
            })
            .ok_or_else(|| format!("Unknown vector operation: {}", s))
    }
}
