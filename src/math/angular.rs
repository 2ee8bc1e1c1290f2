use std::f64::consts::PI;

/// Normalize arbitrary angles to [-π, π)
pub fn normalize_symmetric(angle: f64) -> f64 {
    let angle = normalize_positive(angle + PI) - PI;
    // Guard against the rounding of tiny negatives in normalize_positive
    if angle >= PI {
        return -PI;
    }
    angle
}

/// Normalize arbitrary angles to [0, 2π)
pub fn normalize_positive(angle: f64) -> f64 {
    let angle = angle % (2.0 * PI);
    if angle < 0. {
        let angle = angle + 2.0 * PI;
        // -1e-20 + 2π rounds to 2π
        if angle >= 2.0 * PI {
            return 0.;
        }
        return angle;
    }
    angle
}

/// Degrees, minutes and seconds-with-decimals to degrees-with-decimals.
/// The sign is taken from the degree component.
pub fn dms_to_dd(d: i32, m: u16, s: f64) -> f64 {
    d.signum() as f64 * (d.abs() as f64 + (m as f64 + s / 60.) / 60.)
}

// ----- T E S T S ---------------------------------------------------------------------
