use crate::math::array::FlatArray;
use crate::math::shape::{Shape, MAX_EXTENT};
use crate::math::vector;

impl FlatArray {
    /// Multiply every value by `factor`.
    pub fn scale(&mut self, factor: f64) {
        self.data.iter_mut().for_each(|v| *v *= factor);
    }

    /// Divide every value by `factor`. Division by zero follows IEEE 754.
    pub fn divide(&mut self, factor: f64) {
        self.data.iter_mut().for_each(|v| *v /= factor);
    }

    pub fn add_from(&mut self, other: &FlatArray) {
        self.combine_with(other, |a, b| a + b);
    }

    pub fn subtract_from(&mut self, other: &FlatArray) {
        self.combine_with(other, |a, b| a - b);
    }

    pub fn multiply_from(&mut self, other: &FlatArray) {
        self.combine_with(other, |a, b| a * b);
    }

    /// Elementwise quotient. Cells missing from `other` divide by zero.
    pub fn divide_from(&mut self, other: &FlatArray) {
        self.combine_with(other, |a, b| a / b);
    }

    /// Combine each cell with the cell of `other` at the same position.
    ///
    /// Positions come from the receiver's shape; `other` is never checked for
    /// compatibility, cells it does not have read as zero.
    fn combine_with<F>(&mut self, other: &FlatArray, f: F)
    where
        F: Fn(f64, f64) -> f64,
    {
        let shape = self.shape;
        for (i, value) in self.data.iter_mut().enumerate() {
            *value = f(*value, other.read_at(&shape.decode(i)));
        }
    }

    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }

    /// Product of every stored value.
    pub fn product(&self) -> f64 {
        self.data.iter().product()
    }

    /// Dot product over the flat storage of both arrays, ignoring shape.
    ///
    /// Only the common prefix, at most `MAX_EXTENT` long, takes part.
    pub fn dot(&self, other: &FlatArray) -> f64 {
        let n = self.len().min(other.len()).min(MAX_EXTENT);
        vector::dot(&self.data[..n], &other.data[..n])
    }

    /// 3-D cross product of the first three stored values, as a `(1, 1, 3)`
    /// array. Zero when either array holds fewer than three values.
    pub fn cross(&self, other: &FlatArray) -> FlatArray {
        let mut out = FlatArray {
            shape: Shape::row(3),
            data: vec![0.0; 3],
        };
        if self.len() >= 3 && other.len() >= 3 {
            out.data = vector::cross(&self.data[..3], &other.data[..3]);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arr(extents: [usize; 3], values: &[f64]) -> FlatArray {
        FlatArray::from_shape_vec(extents, values.to_vec()).unwrap()
    }

    #[test]
    fn scale_and_divide_in_place() {
        let mut a = arr([1, 1, 3], &[1.0, -2.0, 4.0]);
        a.scale(2.0);
        assert_eq!(a.to_vec(), vec![2.0, -4.0, 8.0]);
        a.divide(4.0);
        assert_eq!(a.to_vec(), vec![0.5, -1.0, 2.0]);
    }

    #[test]
    fn mismatched_operand_pads_with_zero() {
        let mut a = arr([2, 1, 2], &[1.0, 2.0, 3.0, 4.0]);
        let b = arr([1, 1, 2], &[10.0, 20.0]);
        a.add_from(&b);
        assert_eq!(a.to_vec(), vec![11.0, 22.0, 3.0, 4.0]);

        a.multiply_from(&b);
        assert_eq!(a.to_vec(), vec![110.0, 440.0, 0.0, 0.0]);
    }

    #[test]
    fn larger_operand_is_cropped_by_position_not_offset() {
        let mut a = arr([1, 1, 2], &[1.0, 1.0]);
        let b = arr([2, 1, 3], &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        a.subtract_from(&b);
        assert_eq!(a.to_vec(), vec![0.0, -1.0]);
    }

    #[test]
    fn divide_by_missing_cell_is_not_special_cased() {
        let mut a = arr([1, 1, 3], &[1.0, 0.0, -1.0]);
        let b = arr([1, 1, 1], &[2.0]);
        a.divide_from(&b);
        assert_eq!(a.read_index(0), 0.5);
        assert!(a.read_index(1).is_nan());
        assert_eq!(a.read_index(2), f64::NEG_INFINITY);
    }

    #[test]
    fn reductions() {
        let a = arr([1, 2, 2], &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(a.sum(), 10.0);
        assert_eq!(a.product(), 24.0);
    }

    #[test]
    fn dot_uses_common_prefix() {
        let a = FlatArray::from_values(vec![1.0, 2.0, 3.0, 4.0]);
        let b = FlatArray::from_values(vec![2.0, 2.0]);
        assert_eq!(a.dot(&b), 6.0);
        assert_eq!(b.dot(&a), 6.0);
    }

    #[test]
    fn dot_is_capped_at_max_extent() {
        let a = FlatArray::from_values(vec![1.0; 20]);
        assert_eq!(a.dot(&a), MAX_EXTENT as f64);
    }

    #[test]
    fn cross_of_basis_vectors() {
        let x = FlatArray::from_values(vec![1.0, 0.0, 0.0]);
        let y = FlatArray::from_values(vec![0.0, 1.0, 0.0]);
        let z = x.cross(&y);
        assert_eq!(z.extents(), [1, 1, 3]);
        assert_eq!(z.to_vec(), vec![0.0, 0.0, 1.0]);
    }

    #[test]
    fn cross_with_short_operand_is_zero() {
        let a = FlatArray::from_values(vec![1.0, 2.0]);
        let b = FlatArray::from_values(vec![3.0, 4.0, 5.0]);
        assert_eq!(a.cross(&b).to_vec(), vec![0.0; 3]);
    }
}
