/// `base * (1 - weight) + color * weight`, computed in `f64` and cast to `u8`.
///
/// The cast truncates toward zero (and saturates at the `u8` bounds); it does not round.
pub(crate) fn lerp_trunc_u8(base: u8, color: u8, weight: f64) -> u8 {
    (f64::from(base) * (1.0 - weight) + f64::from(color) * weight) as u8
}

pub(crate) fn checked_area(h: u32, w: u32) -> Option<usize> {
    (h as usize).checked_mul(w as usize)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
