//! Descriptor text: `[d0 d1 d2] {v0 v1 ...}`.
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::math::array::FlatArray;
use crate::math::shape::{Shape, RANK};

impl FlatArray {
    /// Build an array from descriptor text.
    ///
    /// Unparsable extents read as `1` and unparsable values as `0`. The clamped
    /// extents are authoritative: a value list of the wrong length is dropped in
    /// favour of zeros. Any structural problem (missing delimiters, other than
    /// three extents) yields [`FlatArray::fallback`].
    pub fn from_descriptor(text: &str) -> Self {
        match parse(text) {
            Some((dims, values)) => {
                let shape = Shape::new(dims);
                if values.len() == shape.total() {
                    Self {
                        shape,
                        data: values,
                    }
                } else {
                    log::debug!(
                        "descriptor holds {} values for shape {}; zero-filling",
                        values.len(),
                        shape
                    );
                    Self {
                        data: vec![0.0; shape.total()],
                        shape,
                    }
                }
            }
            None => {
                log::debug!("malformed array descriptor {:?}; using fallback", text);
                Self::fallback()
            }
        }
    }
}

fn parse(text: &str) -> Option<([i64; RANK], Vec<f64>)> {
    let dims_text = between(text, '[', ']')?;
    let values_text = between(text, '{', '}')?;

    let dims: Vec<i64> = dims_text
        .split_whitespace()
        .map(|t| t.parse::<i64>().unwrap_or(1))
        .collect();
    let dims: [i64; RANK] = dims.try_into().ok()?;

    let values = values_text
        .split_whitespace()
        .map(|t| t.parse::<f64>().unwrap_or(0.0))
        .collect();
    Some((dims, values))
}

/// Text between the first `open` and the first `close`, if `close` follows `open`.
fn between(text: &str, open: char, close: char) -> Option<&str> {
    let start = text.find(open)? + open.len_utf8();
    let end = text.find(close)?;
    text.get(start..end)
}

impl FromStr for FlatArray {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(FlatArray::from_descriptor(s))
    }
}

impl fmt::Display for FlatArray {
    /// Descriptor text; integral values are written without a fraction.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.extents();
        write!(f, "[{} {} {}] {{", a, b, c)?;
        for (idx, value) in self.data.iter().enumerate() {
            write!(f, "{}", value)?;
            if idx + 1 != self.data.len() {
                write!(f, " ")?;
            }
        }
        write!(f, "}}")
    }
}
