// Math utilities and helper functions

/// Clamp a value between min and max
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Normalize a raw input axis into [-1, 1].
///
/// NaN reads as a centred stick so a bad sample never poisons the velocity.
pub fn clamp_axis(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        clamp(value, -1.0, 1.0)
    }
}

/// Sign of `value` outside a symmetric dead zone.
///
/// Returns `Some(true)` for values above `threshold`, `Some(false)` for values
/// below `-threshold`, and `None` inside `[-threshold, threshold]`.
pub fn sign_outside_dead_zone(value: f32, threshold: f32) -> Option<bool> {
    if value > threshold {
        Some(true)
    } else if value < -threshold {
        Some(false)
    } else {
        None
    }
}
