/// Move the point (x, y) along `angle` (degrees) by `distance`.
#[inline]
pub fn project(x: f64, y: f64, angle: f64, distance: f64) -> (f64, f64) {
    let (sin, cos) = angle.to_radians().sin_cos();
    (x + cos * distance, y + sin * distance)
}

/// Map any finite angle in degrees into [0, 360).
#[inline]
pub fn normalize_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to the modulus for tiny negative inputs.
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// True when (x, y) lies strictly inside the open interior of a width x height grid, i.e. not on
/// or beyond the outermost row and column.
#[inline]
pub fn is_interior(x: f64, y: f64, width: usize, height: usize) -> bool {
    x > 0.0 && x < (width - 1) as f64 && y > 0.0 && y < (height - 1) as f64
}
