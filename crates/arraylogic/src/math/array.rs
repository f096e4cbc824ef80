use std::error::Error;
use std::fmt;
use std::slice::{Chunks, Iter};

use rand::Rng;

use crate::math::shape::{Position, Shape, MAX_EXTENT, RANK};

/// A 3-axis array of doubles in flat row-major storage.
///
/// `data.len() == shape.total()` holds after every constructor and every
/// mutating call. Reads outside the shape return `0.0` and writes outside it
/// are ignored, so no operation on a `FlatArray` can fail.
#[derive(Clone, Debug, PartialEq)]
pub struct FlatArray {
    pub(crate) shape: Shape,
    pub(crate) data: Vec<f64>,
}

impl FlatArray {
    /// Zero-filled array with clamped extents.
    pub fn zeros(dims: [i64; RANK]) -> Self {
        let shape = Shape::new(dims);
        Self {
            data: vec![0.0; shape.total()],
            shape,
        }
    }

    /// Row vector `(1, 1, N)` holding `values` verbatim.
    ///
    /// `N` is not clamped, so this is the one constructor that can produce a
    /// last axis longer than [`crate::math::MAX_EXTENT`] or an empty array.
    pub fn from_values(values: Vec<f64>) -> Self {
        Self {
            shape: Shape::row(values.len()),
            data: values,
        }
    }

    /// Array with exactly `extents`, used to restore persisted arrays.
    ///
    /// Extents must either all lie in `[1, MAX_EXTENT]` or form a `(1, 1, N)`
    /// row as built by [`FlatArray::from_values`]. The buffer length must equal
    /// their product.
    pub fn from_shape_vec(extents: [usize; RANK], data: Vec<f64>) -> Result<Self, ShapeError> {
        let err = ShapeError {
            extents,
            len: data.len(),
        };
        let clamped = extents.iter().all(|e| (1..=MAX_EXTENT).contains(e));
        let row = extents[0] == 1 && extents[1] == 1;
        if !(clamped || row) {
            return Err(err);
        }
        let total = extents
            .iter()
            .try_fold(1usize, |acc, &e| acc.checked_mul(e))
            .ok_or_else(|| err.clone())?;
        if data.len() != total {
            return Err(err);
        }
        Ok(Self {
            shape: Shape::from_raw(extents),
            data,
        })
    }

    /// The minimal valid array: shape `(1, 1, 1)` holding `1.0`.
    pub fn fallback() -> Self {
        Self {
            shape: Shape::default(),
            data: vec![1.0],
        }
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn extents(&self) -> [usize; RANK] {
        self.shape.extents()
    }

    /// Number of cells addressed by the shape, equal to [`FlatArray::len`].
    pub fn total(&self) -> usize {
        self.shape.total()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn iter(&self) -> Iter<'_, f64> {
        self.data.iter()
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.data.clone()
    }

    /// Storage split into rows along the last axis.
    pub fn rows(&self) -> Chunks<'_, f64> {
        self.data.chunks(self.shape.extent(RANK - 1).max(1))
    }

    /// The extents as a `(1, 1, 3)` row array.
    pub fn extents_array(&self) -> FlatArray {
        FlatArray::from_values(self.extents().iter().map(|&e| e as f64).collect())
    }

    /// Linear index of `pos` under this array's shape.
    pub fn encode(&self, pos: &Position) -> Option<usize> {
        self.shape.encode(pos)
    }

    /// Position of `index` with `basis` as the addressing shape.
    pub fn decode(index: usize, basis: &Shape) -> Position {
        basis.decode(index)
    }

    /// Stored value at `pos`, or `0.0` when `pos` is outside the shape.
    pub fn read_at(&self, pos: &Position) -> f64 {
        self.encode(pos)
            .and_then(|i| self.data.get(i).copied())
            .unwrap_or(0.0)
    }

    /// Stored value at linear `index`, or `0.0` past the end.
    pub fn read_index(&self, index: usize) -> f64 {
        self.data.get(index).copied().unwrap_or(0.0)
    }

    /// Read from raw script coordinates. Fewer than three coordinates, or any
    /// negative one, reads `0.0`. Coordinates past the third are ignored.
    pub fn read_coords(&self, coords: &[i64]) -> f64 {
        to_position(coords).map_or(0.0, |pos| self.read_at(&pos))
    }

    /// Write `value` at `pos`. Returns false, leaving the array untouched,
    /// when `pos` is outside the shape.
    pub fn set_at(&mut self, pos: &Position, value: f64) -> bool {
        match self.encode(pos) {
            Some(i) => self.set_index(i, value),
            None => false,
        }
    }

    /// Write `value` at linear `index`. Out-of-range indices are ignored.
    pub fn set_index(&mut self, index: usize, value: f64) -> bool {
        match self.data.get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Write through raw script coordinates, see [`FlatArray::read_coords`].
    pub fn set_coords(&mut self, coords: &[i64], value: f64) -> bool {
        match to_position(coords) {
            Some(pos) => self.set_at(&pos, value),
            None => false,
        }
    }

    /// Change the shape to the clamped `dims`.
    ///
    /// With `lossless`, only a reshape to the same total is applied: storage is
    /// kept as-is and only the addressing changes. Any other lossless request
    /// is a no-op. Without `lossless`, every axis is independently cropped or
    /// zero-padded. Returns whether the array changed shape.
    pub fn resize(&mut self, dims: [i64; RANK], lossless: bool) -> bool {
        let target = Shape::new(dims);
        if lossless {
            if target.total() != self.total() {
                log::debug!(
                    "lossless resize from {} to {} rejected: totals {} and {} differ",
                    self.shape,
                    target,
                    self.total(),
                    target.total()
                );
                return false;
            }
            self.shape = target;
            return true;
        }

        log::trace!("resizing {} to {} with crop/pad", self.shape, target);
        let data: Vec<f64> = (0..target.total())
            .map(|i| self.read_at(&target.decode(i)))
            .collect();
        self.shape = target;
        self.data = data;
        true
    }

    /// Permute storage in place with a thread-local generator.
    ///
    /// See [`FlatArray::shuffle_with`] for the permutation algorithm.
    pub fn shuffle(&mut self) {
        self.shuffle_with(&mut rand::thread_rng());
    }

    /// Permute storage in place: every index `i` in order is swapped with an
    /// index drawn uniformly from the whole storage, itself included.
    ///
    /// This is not a uniform shuffle; some permutations are more likely than
    /// others. The algorithm is kept because scripts depend on its behaviour.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let len = self.data.len();
        for i in 0..len {
            let j = rng.gen_range(0..len);
            self.data.swap(i, j);
        }
    }
}

fn to_position(coords: &[i64]) -> Option<Position> {
    if coords.len() < RANK {
        return None;
    }
    let mut pos = [0usize; RANK];
    for (slot, &c) in pos.iter_mut().zip(coords) {
        *slot = usize::try_from(c).ok()?;
    }
    Some(pos)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeError {
    extents: [usize; RANK],
    len: usize,
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.extents;
        write!(
            f,
            "invalid shape ({}, {}, {}) for buffer of length {}",
            a, b, c, self.len
        )
    }
}

impl Error for ShapeError {}
