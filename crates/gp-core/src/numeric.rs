use crate::{CoreError, CoreResult};

/// Floating point type used for every cell of a query cube.
pub type Real = f64;

pub fn ensure_finite(v: Real, what: &'static str) -> CoreResult<Real> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

/// Round half away from zero to `decimals` places.
pub fn round_to(v: Real, decimals: u32) -> Real {
    let scale = 10f64.powi(decimals as i32);
    (v * scale).round() / scale
}

/// Number of `width`-sized buckets needed to cover `span` (ceiling division).
pub fn bucket_count(span: usize, width: usize) -> usize {
    if width == 0 {
        return 0;
    }
    span.div_ceil(width)
}
