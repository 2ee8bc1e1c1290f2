#![allow(non_snake_case)]
//! The Helmert transform performs reference frame shifts. It operates in the 3D
//! cartesian space, transforming geocentric coordinates between static
//! reference frames, e.g. from a local datum to WGS84.
use crate::authoring::*;

/// The two sign conventions for the rotation parameters of a 7 parameter
/// Helmert transformation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HelmertConvention {
    /// EPSG method 9606, as used by PROJ's `towgs84`
    #[default]
    PositionVector,
    /// EPSG method 9607
    CoordinateFrame,
}

/// A 3 or 7 parameter Helmert transformation.
///
/// The rotations are applied through the linearized (small angle) rotation
/// matrix. The inverse uses the exact inverse of that matrix, so forward
/// and inverse round trip to machine precision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Helmert {
    // Translation in metres
    T: [f64; 3],
    // Rotation in radians, position vector convention
    R: [f64; 3],
    // Scale difference in ppm
    S: f64,
    // The precomputed rotation matrix and its inverse
    ROT: [[f64; 3]; 3],
    INV: [[f64; 3]; 3],
}

impl Default for Helmert {
    fn default() -> Helmert {
        Helmert::translation(0., 0., 0.)
    }
}

impl Helmert {
    /// A 7 parameter transformation. Translations in metres, rotations in
    /// arc seconds, scale difference in ppm.
    pub fn new(
        translation: [f64; 3],
        rotation: [f64; 3],
        scale: f64,
        convention: HelmertConvention,
    ) -> Helmert {
        let sign = match convention {
            HelmertConvention::PositionVector => 1.,
            HelmertConvention::CoordinateFrame => -1.,
        };
        let R = rotation.map(|r| sign * Unit::ARC_SECOND.to_base(r));
        let ROT = rotation_matrix(&R);
        let INV = inverse_matrix(&ROT);
        Helmert {
            T: translation,
            R,
            S: scale,
            ROT,
            INV,
        }
    }

    /// A 3 parameter transformation: Translations only, in metres
    pub fn translation(x: f64, y: f64, z: f64) -> Helmert {
        Helmert::new([x, y, z], [0.; 3], 0., HelmertConvention::PositionVector)
    }

    /// Parse the 3 or 7 comma separated values of a PROJ style `towgs84`
    /// parameter (position vector convention)
    pub fn from_towgs84(values: &[f64]) -> Result<Helmert, Error> {
        match values.len() {
            3 => Ok(Helmert::translation(values[0], values[1], values[2])),
            7 => Ok(Helmert::new(
                [values[0], values[1], values[2]],
                [values[3], values[4], values[5]],
                values[6],
                HelmertConvention::PositionVector,
            )),
            n => Err(Error::BadParam(
                "towgs84".to_string(),
                format!("expected 3 or 7 values, got {n}"),
            )),
        }
    }

    /// Translations in metres
    pub fn translations(&self) -> [f64; 3] {
        self.T
    }

    /// Rotations in radians, position vector convention
    pub fn rotations(&self) -> [f64; 3] {
        self.R
    }

    /// Scale difference in ppm
    pub fn scale(&self) -> f64 {
        self.S
    }

    /// Only translations?
    pub fn is_translation(&self) -> bool {
        self.R == [0.; 3] && self.S == 0.
    }

    pub fn is_identity(&self) -> bool {
        self.is_translation() && self.T == [0.; 3]
    }

    pub fn apply(&self, c: &Coor3D, direction: Direction) -> Coor3D {
        let T = &self.T;
        let scale = 1. + self.S * 1e-6;

        if direction == Direction::Fwd {
            let M = &self.ROT;
            let x = c[0] * M[0][0] + c[1] * M[0][1] + c[2] * M[0][2];
            let y = c[0] * M[1][0] + c[1] * M[1][1] + c[2] * M[1][2];
            let z = c[0] * M[2][0] + c[1] * M[2][1] + c[2] * M[2][2];
            return Coor3D::raw(scale * x + T[0], scale * y + T[1], scale * z + T[2]);
        }

        // Deoffset and unscale, then rotate back
        let x = (c[0] - T[0]) / scale;
        let y = (c[1] - T[1]) / scale;
        let z = (c[2] - T[2]) / scale;
        let M = &self.INV;
        Coor3D::raw(
            x * M[0][0] + y * M[0][1] + z * M[0][2],
            x * M[1][0] + y * M[1][1] + z * M[1][2],
            x * M[2][0] + y * M[2][1] + z * M[2][2],
        )
    }
}

// ----- R O T A T I O N   M A T R I X   B U I L D E R ---------------------------------

// The linearized rotation matrix in the position vector convention, i.e. the
// transpose of the coordinate frame matrix
//
//        |  1  -rz  ry |
//  ROT = |  rz  1  -rx |
//        | -ry  rx  1  |
//
fn rotation_matrix(r: &[f64; 3]) -> [[f64; 3]; 3] {
    let (rx, ry, rz) = (r[0], r[1], r[2]);
    [[1., -rz, ry], [rz, 1., -rx], [-ry, rx, 1.]]
}

// The inverse of a 3x3 matrix, by its adjugate
fn inverse_matrix(m: &[[f64; 3]; 3]) -> [[f64; 3]; 3] {
    let [[a, b, c], [d, e, f], [g, h, i]] = *m;
    let det = a * (e * i - f * h) - b * (d * i - f * g) + c * (d * h - e * g);
    #[rustfmt::skip]
    let adj = [
        [e * i - f * h,  c * h - b * i,  b * f - c * e],
        [f * g - d * i,  a * i - c * g,  c * d - a * f],
        [d * h - e * g,  b * g - a * h,  a * e - b * d],
    ];
    adj.map(|row| row.map(|v| v / det))
}

// ----- T E S T S ------------------------------------------------------------------
