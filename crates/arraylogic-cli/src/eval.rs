//! Opcode dispatch: maps catalog identities onto engine calls.
use std::fmt;

use anyhow::{bail, Context, Result};
use rand::Rng;

use arraylogic::catalog::{ArrayOp, VectorOp, VectorValue};
use arraylogic::math::FlatArray;

/// Extra operands an array opcode may read.
#[derive(Debug, Clone, Default)]
pub struct ArrayArgs {
    /// Position for `change`/`pick`, as raw script integers.
    pub at: Option<Vec<i64>>,
    /// Linear index for `change`/`pick` when no position is given.
    pub index: Option<usize>,
    /// Value written by `change`.
    pub value: Option<f64>,
    /// Scale factor for `*` without an operand array.
    pub factor: Option<f64>,
    /// Target extents for `resize`.
    pub dims: Option<[i64; 3]>,
    pub lossless: bool,
}

/// Result of an array opcode.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Array(FlatArray),
    Scalar(f64),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Array(a) => write!(f, "{}", a),
            Outcome::Scalar(v) => write!(f, "{}", v),
        }
    }
}

/// Apply one array opcode to `lhs` (and `rhs` for binary opcodes).
pub fn apply_array_op<R: Rng + ?Sized>(
    op: ArrayOp,
    mut lhs: FlatArray,
    rhs: Option<&FlatArray>,
    args: &ArrayArgs,
    rng: &mut R,
) -> Result<Outcome> {
    log::debug!("applying {} ({}) to {}", op.symbol(), op.name(), lhs);
    let outcome = match op {
        ArrayOp::Add => {
            lhs.add_from(require_rhs(op, rhs)?);
            Outcome::Array(lhs)
        }
        ArrayOp::Sub => {
            lhs.subtract_from(require_rhs(op, rhs)?);
            Outcome::Array(lhs)
        }
        ArrayOp::Mul => {
            match (rhs, args.factor) {
                (Some(other), _) => lhs.multiply_from(other),
                (None, Some(factor)) => lhs.scale(factor),
                (None, None) => bail!("'{}' needs an operand array or a factor", op),
            }
            Outcome::Array(lhs)
        }
        ArrayOp::DotProd => Outcome::Scalar(lhs.dot(require_rhs(op, rhs)?)),
        ArrayOp::CrossProd => Outcome::Array(lhs.cross(require_rhs(op, rhs)?)),
        ArrayOp::Sum => Outcome::Scalar(lhs.sum()),
        ArrayOp::ProdAll => Outcome::Scalar(lhs.product()),
        ArrayOp::Change => {
            let value = args
                .value
                .with_context(|| format!("'{}' needs a value to write", op))?;
            let written = match (&args.at, args.index) {
                (Some(at), _) => lhs.set_coords(at, value),
                (None, Some(index)) => lhs.set_index(index, value),
                (None, None) => bail!("'{}' needs a position or an index", op),
            };
            if !written {
                log::info!("write outside {} ignored", lhs.shape());
            }
            Outcome::Array(lhs)
        }
        ArrayOp::Get => match (&args.at, args.index) {
            (Some(at), _) => Outcome::Scalar(lhs.read_coords(at)),
            (None, Some(index)) => Outcome::Scalar(lhs.read_index(index)),
            (None, None) => bail!("'{}' needs a position or an index", op),
        },
        ArrayOp::Shuffle => {
            lhs.shuffle_with(rng);
            Outcome::Array(lhs)
        }
        ArrayOp::Resize => {
            let dims = args
                .dims
                .with_context(|| format!("'{}' needs target dimensions", op))?;
            if !lhs.resize(dims, args.lossless) {
                log::info!("lossless resize of {} to {:?} skipped", lhs.shape(), dims);
            }
            Outcome::Array(lhs)
        }
    };
    Ok(outcome)
}

fn require_rhs(op: ArrayOp, rhs: Option<&FlatArray>) -> Result<&FlatArray> {
    rhs.with_context(|| format!("'{}' needs a second array", op))
}

/// Parse a raw vector written as numbers separated by whitespace or commas.
pub fn parse_vector(text: &str) -> Result<Vec<f64>> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .map(|t| {
            t.parse::<f64>()
                .with_context(|| format!("Invalid vector component: {:?}", t))
        })
        .collect()
}

/// Apply one vector opcode to two raw vectors.
pub fn apply_vector_op(op: VectorOp, a: &[f64], b: &[f64]) -> VectorValue {
    log::debug!("applying {} ({}) to {:?} and {:?}", op.symbol(), op.name(), a, b);
    op.apply(a, b)
}

pub fn format_vector_value(value: &VectorValue) -> String {
    match value {
        VectorValue::Scalar(v) => v.to_string(),
        VectorValue::Vector(v) => {
            let parts: Vec<String> = v.iter().map(|x| x.to_string()).collect();
            parts.join(" ")
        }
    }
}
