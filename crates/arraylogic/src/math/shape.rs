//! Clamped 3-axis extents and row-major addressing.
use std::fmt;

/// Number of axes every array carries.
pub const RANK: usize = 3;

/// Largest extent a clamped axis may take.
pub const MAX_EXTENT: usize = 16;

/// A logical address, one coordinate per axis.
pub type Position = [usize; RANK];

/// Force the first three entries of `dims` into `[1, MAX_EXTENT]` in place.
///
/// Entries past index 2 are left untouched.
pub fn clamp_extents(dims: &mut [i64]) {
    for d in dims.iter_mut().take(RANK) {
        *d = (*d).clamp(1, MAX_EXTENT as i64);
    }
}

/// Product of every entry in `dims`. Saturates instead of overflowing.
pub fn product(dims: &[i64]) -> i64 {
    dims.iter().fold(1i64, |acc, &d| acc.saturating_mul(d))
}

/// Ordered triple of axis extents.
///
/// Shapes built with [`Shape::new`] are clamped to `[1, MAX_EXTENT]` on every
/// axis. Row shapes built with [`Shape::row`] keep their length verbatim on the
/// last axis, so an array built from explicit values may exceed the clamp.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Shape {
    extents: [usize; RANK],
}

impl Shape {
    pub fn new(dims: [i64; RANK]) -> Self {
        let mut dims = dims;
        clamp_extents(&mut dims);
        Self {
            extents: dims.map(|d| d as usize),
        }
    }

    /// `(1, 1, len)` without clamping `len`.
    pub fn row(len: usize) -> Self {
        Self {
            extents: [1, 1, len],
        }
    }

    pub(crate) fn from_raw(extents: [usize; RANK]) -> Self {
        Self { extents }
    }

    pub fn extents(&self) -> [usize; RANK] {
        self.extents
    }

    pub(crate) fn extent(&self, axis: usize) -> usize {
        self.extents[axis]
    }

    /// Number of cells addressed by this shape.
    pub fn total(&self) -> usize {
        self.extents.iter().product()
    }

    /// True when every coordinate is strictly below its extent.
    pub fn contains(&self, pos: &Position) -> bool {
        pos.iter().zip(self.extents.iter()).all(|(p, e)| p < e)
    }

    /// Linear index of `pos`, last axis fastest. `None` when out of range.
    pub fn encode(&self, pos: &Position) -> Option<usize> {
        let mut index = 0;
        let mut stride = 1;
        for axis in (0..RANK).rev() {
            if pos[axis] >= self.extents[axis] {
                return None;
            }
            index += pos[axis] * stride;
            stride *= self.extents[axis];
        }
        Some(index)
    }

    /// Position of linear `index` with this shape as the addressing basis.
    ///
    /// Inverse of [`Shape::encode`] for indices below [`Shape::total`]. Larger
    /// indices wrap on every axis. Zero extents decode to coordinate 0.
    pub fn decode(&self, index: usize) -> Position {
        let mut pos = [0; RANK];
        let mut stride = 1usize;
        for axis in (0..RANK).rev() {
            let extent = self.extents[axis];
            pos[axis] = index
                .checked_div(stride)
                .and_then(|q| q.checked_rem(extent))
                .unwrap_or(0);
            stride = stride.saturating_mul(extent);
        }
        pos
    }
}

impl Default for Shape {
    fn default() -> Self {
        Self { extents: [1; RANK] }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.extents;
        write!(f, "({}, {}, {})", a, b, c)
    }
}
