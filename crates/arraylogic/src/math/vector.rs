//! Arithmetic on short raw vectors (2- and 3-component).
//!
//! These are the kernels bound by the vector opcode catalog. Operands of
//! different lengths are zero-padded rather than rejected.

/// Componentwise sum, as long as the longer operand.
pub fn add(a: &[f64], b: &[f64]) -> Vec<f64> {
    zip_padded(a, b, |x, y| x + y)
}

/// Componentwise difference, as long as the longer operand.
pub fn sub(a: &[f64], b: &[f64]) -> Vec<f64> {
    zip_padded(a, b, |x, y| x - y)
}

/// Sum of products over the common prefix.
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// 3-D cross product. Operands are padded or truncated to three components,
/// so 2-vectors lie in the z = 0 plane.
pub fn cross(a: &[f64], b: &[f64]) -> Vec<f64> {
    let a = to_vec3(a);
    let b = to_vec3(b);
    (0..3)
        .map(|i| a[(i + 1) % 3] * b[(i + 2) % 3] - a[(i + 2) % 3] * b[(i + 1) % 3])
        .collect()
}

fn to_vec3(v: &[f64]) -> [f64; 3] {
    let mut out = [0.0; 3];
    for (slot, &x) in out.iter_mut().zip(v) {
        *slot = x;
    }
    out
}

fn zip_padded<F>(a: &[f64], b: &[f64], f: F) -> Vec<f64>
where
    F: Fn(f64, f64) -> f64,
{
    let len = a.len().max(b.len());
    (0..len)
        .map(|i| {
            let x = a.get(i).copied().unwrap_or(0.0);
            let y = b.get(i).copied().unwrap_or(0.0);
            f(x, y)
        })
        .collect()
}
