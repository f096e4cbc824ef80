//! Integration tests for the opcode catalogs, config and persisted records.

use arraylogic::bank::ArrayBank;
use arraylogic::catalog::{ArrayOp, Kernel, VectorOp, VectorValue};
use arraylogic::config::LogicConfig;
use arraylogic::math::FlatArray;
use arraylogic::record::StoredArray;

// ---------------------------------------------------------------------------
// ArrayOp
// ---------------------------------------------------------------------------

#[test]
fn array_catalog_is_complete() {
    let names: Vec<&str> = ArrayOp::ALL.iter().map(|op| op.name()).collect();
    assert_eq!(
        names,
        vec![
            "Add", "Sub", "Mul", "DotProd", "CrossProd", "Sum", "ProdAll", "Change", "Get",
            "Shuffle", "Resize"
        ]
    );
}

#[test]
fn array_symbols_round_trip() {
    for op in ArrayOp::ALL {
        assert_eq!(ArrayOp::from_symbol(op.symbol()), Some(op));
        assert_eq!(op.to_string().parse::<ArrayOp>(), Ok(op));
    }
}

#[test]
fn array_result_kinds() {
    assert!(ArrayOp::Sum.is_scalar());
    assert!(ArrayOp::Get.is_scalar());
    assert!(!ArrayOp::CrossProd.is_scalar());
    assert!(ArrayOp::CrossProd.is_binary());
    assert!(!ArrayOp::Mul.is_binary());
}

// ---------------------------------------------------------------------------
// VectorOp
// ---------------------------------------------------------------------------

#[test]
fn vector_catalog_binds_one_kernel_each() {
    for op in VectorOp::ALL {
        match op.kernel() {
            Kernel::Scalar(_) => assert_eq!(op, VectorOp::DotV),
            Kernel::Vector(_) => assert_ne!(op, VectorOp::DotV),
        }
    }
}

#[test]
fn vector_ops_apply() {
    let a = [1.0, 2.0, 3.0];
    let b = [4.0, 5.0, 6.0];
    assert_eq!(
        VectorOp::AddV.apply(&a, &b),
        VectorValue::Vector(vec![5.0, 7.0, 9.0])
    );
    assert_eq!(VectorOp::DotV.apply(&a, &b), VectorValue::Scalar(32.0));
    assert_eq!(
        VectorOp::CrossV.apply(&a, &b),
        VectorValue::Vector(vec![-3.0, 6.0, -3.0])
    );
}

#[test]
fn vector_op_parses_names() {
    assert_eq!("cross".parse::<VectorOp>(), Ok(VectorOp::CrossV));
    assert_eq!("DotV".parse::<VectorOp>(), Ok(VectorOp::DotV));
    assert!("·".parse::<VectorOp>().unwrap().is_scalar());
    assert!("mul".parse::<VectorOp>().is_err());
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[test]
fn config_defaults() {
    let cfg = LogicConfig::default();
    assert_eq!(cfg.bank_capacity, 8);
    assert!(!cfg.lossless_resize);
    assert!(cfg.seed.is_none());
}

#[test]
fn config_fills_missing_fields_from_default() {
    let cfg: LogicConfig = serde_json::from_str(r#"{"seed": 42}"#).unwrap();
    assert_eq!(cfg.seed, Some(42));
    assert_eq!(cfg.bank_capacity, 8);
}

#[test]
fn seeded_config_shuffles_reproducibly() {
    let cfg = LogicConfig {
        seed: Some(3),
        ..LogicConfig::default()
    };
    let mut a = FlatArray::from_values((0..10).map(f64::from).collect());
    let mut b = a.clone();
    a.shuffle_with(&mut cfg.rng());
    b.shuffle_with(&mut cfg.rng());
    assert_eq!(a, b);
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

#[test]
fn bank_records_serialize_to_json() {
    let mut bank = ArrayBank::from_config(&LogicConfig::default());
    bank.push("pos", FlatArray::from_values(vec![1.0, 2.0, 3.0])).unwrap();
    let json = serde_json::to_string(&bank.to_records()).unwrap();
    assert!(json.contains("\"label\":\"pos\""));
    assert!(json.contains("\"extents\":[1,1,3]"));

    let records: Vec<StoredArray> = serde_json::from_str(&json).unwrap();
    let restored = ArrayBank::from_records(8, &records).unwrap();
    assert_eq!(restored.get(0).unwrap().array.to_vec(), vec![1.0, 2.0, 3.0]);
}
