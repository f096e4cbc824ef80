//! Persisted form of a labelled array.
//!
//! The engine performs no I/O. A `StoredArray` is what a host writes per array:
//! a label, the three extents, an orientation flag the engine does not
//! interpret, and the values in linear order.
use serde::{Deserialize, Serialize};

use crate::math::{FlatArray, ShapeError, RANK};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredArray {
    pub label: String,
    pub extents: [usize; RANK],
    #[serde(default)]
    pub transposed: bool,
    pub values: Vec<f64>,
}

impl StoredArray {
    pub fn capture(label: impl Into<String>, array: &FlatArray, transposed: bool) -> Self {
        Self {
            label: label.into(),
            extents: array.extents(),
            transposed,
            values: array.to_vec(),
        }
    }

    /// Rebuild the array. Fails when the extents are out of range or the value
    /// count does not match them.
    pub fn restore(&self) -> Result<FlatArray, ShapeError> {
        FlatArray::from_shape_vec(self.extents, self.values.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captured_extents_match_value_count() {
        let a = FlatArray::from_descriptor("[2 3 1] {1 2 3 4 5 6}");
        let rec = StoredArray::capture("m0", &a, true);
        assert_eq!(rec.extents, [2, 3, 1]);
        assert_eq!(rec.values.len(), 6);
        assert!(rec.transposed);
        assert_eq!(rec.restore().unwrap(), a);
    }

    #[test]
    fn inconsistent_record_is_rejected() {
        let rec = StoredArray {
            label: "bad".to_string(),
            extents: [2, 2, 2],
            transposed: false,
            values: vec![1.0; 3],
        };
        assert!(rec.restore().is_err());
    }

    #[test]
    fn long_rows_survive_a_round_trip() {
        let a = FlatArray::from_values(vec![0.5; 24]);
        let rec = StoredArray::capture("row", &a, false);
        assert_eq!(rec.restore().unwrap(), a);
    }

    #[test]
    fn records_outside_the_extent_range_are_rejected() {
        let record = |extents: [usize; RANK], len: usize| StoredArray {
            label: "r".to_string(),
            extents,
            transposed: false,
            values: vec![0.0; len],
        };
        assert!(record([0, 3, 3], 0).restore().is_err());
        assert!(record([1, 17, 2], 34).restore().is_err());
        assert!(record([usize::MAX, 2, 1], 1).restore().is_err());
    }

    #[test]
    fn record_json_with_zero_extent_does_not_restore() {
        let rec: StoredArray =
            serde_json::from_str(r#"{"label":"z","extents":[0,3,3],"values":[]}"#).unwrap();
        assert!(rec.restore().is_err());
    }
}
