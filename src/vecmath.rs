/*
 * Vector Math Module
 *
 * Small helpers on top of nannou's Vec2 used by the steering rules.
 * Everything here is a pure function on values, no allocation.
 */

use nannou::prelude::*;
use rand::Rng;
use std::f32::consts::TAU;

// Clamp the vector to `limit` while keeping its direction
#[inline]
pub fn limit(v: Vec2, limit: f32) -> Vec2 {
    // Compare squared lengths so the common (under the limit) case skips the sqrt
    let len_sq = v.length_squared();
    if len_sq > limit * limit {
        v * (limit / len_sq.sqrt())
    } else {
        v
    }
}

/// Rescale `v` to length `mag`.
///
/// Returns `None` for a zero (or non-finite) vector, which has no direction.
/// Callers treat that as "no contribution" instead of steering with NaNs.
#[inline]
pub fn set_magnitude(v: Vec2, mag: f32) -> Option<Vec2> {
    let len = v.length();
    if len > 0.0 && len.is_finite() {
        Some(v * (mag / len))
    } else {
        None
    }
}

// Counter-clockwise rotation by `angle` radians
#[inline]
pub fn rotate(v: Vec2, angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    vec2(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

// Rotation by +90 degrees
#[inline]
pub fn perpendicular(v: Vec2) -> Vec2 {
    vec2(-v.y, v.x)
}

/// Unsigned angle in `[0, PI]` between two vectors, `None` if either is zero.
#[inline]
pub fn angle_between(a: Vec2, b: Vec2) -> Option<f32> {
    let mag = (a.length_squared() * b.length_squared()).sqrt();
    if mag > 0.0 && mag.is_finite() {
        Some((a.dot(b) / mag).clamp(-1.0, 1.0).acos())
    } else {
        None
    }
}

// Random direction of length `scale`
pub fn random_direction(rng: &mut impl Rng, scale: f32) -> Vec2 {
    let angle = rng.gen_range(0.0..TAU);
    vec2(angle.cos(), angle.sin()) * scale
}
