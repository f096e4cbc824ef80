//! Integration tests for opcode dispatch against the engine.

use arraylogic::catalog::{ArrayOp, VectorOp, VectorValue};
use arraylogic::math::FlatArray;
use arraylogic_cli::eval::{apply_array_op, apply_vector_op, ArrayArgs, Outcome};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn run(op: ArrayOp, lhs: &str, rhs: Option<&str>, args: ArrayArgs) -> Outcome {
    let rhs = rhs.map(FlatArray::from_descriptor);
    let mut rng = StdRng::seed_from_u64(1);
    apply_array_op(op, FlatArray::from_descriptor(lhs), rhs.as_ref(), &args, &mut rng).unwrap()
}

fn array(outcome: Outcome) -> FlatArray {
    match outcome {
        Outcome::Array(a) => a,
        Outcome::Scalar(v) => panic!("expected an array, got scalar {}", v),
    }
}

// ---------------------------------------------------------------------------
// Array opcodes
// ---------------------------------------------------------------------------

#[test]
fn every_array_op_dispatches() {
    let lhs = "[1 1 3] {1 2 3}";
    let rhs = Some("[1 1 3] {4 5 6}");
    let args = ArrayArgs {
        at: Some(vec![0, 0, 2]),
        value: Some(7.0),
        dims: Some([1, 1, 2]),
        ..ArrayArgs::default()
    };
    for op in ArrayOp::ALL {
        let outcome = run(op, lhs, rhs, args.clone());
        match outcome {
            Outcome::Scalar(_) => assert!(op.is_scalar(), "{} returned a scalar", op),
            Outcome::Array(_) => assert!(!op.is_scalar(), "{} returned an array", op),
        }
    }
}

#[test]
fn arithmetic_ops() {
    let lhs = "[1 1 3] {1 2 3}";
    let rhs = Some("[1 1 3] {4 5 6}");
    assert_eq!(
        array(run(ArrayOp::Add, lhs, rhs, ArrayArgs::default())).to_vec(),
        vec![5.0, 7.0, 9.0]
    );
    assert_eq!(
        array(run(ArrayOp::Sub, lhs, rhs, ArrayArgs::default())).to_vec(),
        vec![-3.0, -3.0, -3.0]
    );
    assert_eq!(
        array(run(ArrayOp::Mul, lhs, rhs, ArrayArgs::default())).to_vec(),
        vec![4.0, 10.0, 18.0]
    );
    assert_eq!(run(ArrayOp::DotProd, lhs, rhs, ArrayArgs::default()), Outcome::Scalar(32.0));
    assert_eq!(run(ArrayOp::Sum, lhs, None, ArrayArgs::default()), Outcome::Scalar(6.0));
    assert_eq!(run(ArrayOp::ProdAll, lhs, None, ArrayArgs::default()), Outcome::Scalar(6.0));
}

#[test]
fn change_outside_shape_leaves_array_alone() {
    let args = ArrayArgs {
        at: Some(vec![0, 1, 0]),
        value: Some(9.0),
        ..ArrayArgs::default()
    };
    let out = array(run(ArrayOp::Change, "[1 1 2] {1 2}", None, args));
    assert_eq!(out.to_vec(), vec![1.0, 2.0]);
}

#[test]
fn pick_by_index() {
    let args = ArrayArgs {
        index: Some(1),
        ..ArrayArgs::default()
    };
    assert_eq!(
        run(ArrayOp::Get, "[1 1 2] {1 2}", None, args),
        Outcome::Scalar(2.0)
    );
}

#[test]
fn resize_without_dims_errors() {
    let mut rng = StdRng::seed_from_u64(1);
    let result = apply_array_op(
        ArrayOp::Resize,
        FlatArray::fallback(),
        None,
        &ArrayArgs::default(),
        &mut rng,
    );
    assert!(result.is_err());
}

// ---------------------------------------------------------------------------
// Vector opcodes
// ---------------------------------------------------------------------------

#[test]
fn vector_ops_dispatch() {
    assert_eq!(
        apply_vector_op(VectorOp::AddV, &[1.0, 2.0], &[3.0]),
        VectorValue::Vector(vec![4.0, 2.0])
    );
    assert_eq!(
        apply_vector_op(VectorOp::DotV, &[1.0, 2.0], &[3.0, 4.0]),
        VectorValue::Scalar(11.0)
    );
}
