//! General polynomial transformations (EPSG methods 9645-9648)
use crate::authoring::*;

/// A 2D general polynomial transformation of degree 1 to 6.
///
/// With `u = m·(x - xs0)`, `v = m·(y - ys0)`:
///
/// ```txt
/// x' = x - xs0 + xt0 + A0 + A1·u + A2·v + A3·u² + A4·u·v + A5·v² + ...
/// y' = y - ys0 + yt0 + B0 + B1·u + B2·v + B3·u² + B4·u·v + B5·v² + ...
/// ```
///
/// i.e. the terms are ordered by total degree, then by rising power of v.
/// The inverse is found by fixed point iteration.
#[derive(Debug, Clone, PartialEq)]
pub struct PolynomialTransformation {
    degree: usize,
    a: Vec<f64>,
    b: Vec<f64>,
    source_origin: [f64; 2],
    target_origin: [f64; 2],
    scaling: f64,
    tolerance: f64,
    max_iterations: usize,
}

impl PolynomialTransformation {
    pub const DEFAULT_TOLERANCE: f64 = 1e-10;
    pub const DEFAULT_MAX_ITERATIONS: usize = 20;

    /// The number of coefficients for each ordinate, for a given degree
    pub fn number_of_terms(degree: usize) -> usize {
        (degree + 1) * (degree + 2) / 2
    }

    /// Missing trailing coefficients are taken as 0
    pub fn new(
        degree: usize,
        a: &[f64],
        b: &[f64],
        source_origin: [f64; 2],
        target_origin: [f64; 2],
        scaling: f64,
    ) -> Result<PolynomialTransformation, Error> {
        if !(1..=6).contains(&degree) {
            return Err(Error::Configuration(format!(
                "polynomial degree must be in [1, 6], got {degree}"
            )));
        }
        let terms = Self::number_of_terms(degree);
        if a.len() > terms || b.len() > terms {
            return Err(Error::Configuration(format!(
                "a polynomial of degree {degree} takes at most {terms} coefficients per ordinate"
            )));
        }
        if scaling == 0. || !scaling.is_finite() {
            return Err(Error::BadParam(
                "Point scaling factor".to_string(),
                scaling.to_string(),
            ));
        }
        let mut a = a.to_vec();
        let mut b = b.to_vec();
        a.resize(terms, 0.);
        b.resize(terms, 0.);
        Ok(PolynomialTransformation {
            degree,
            a,
            b,
            source_origin,
            target_origin,
            scaling,
            tolerance: Self::DEFAULT_TOLERANCE,
            max_iterations: Self::DEFAULT_MAX_ITERATIONS,
        })
    }

    pub fn with_tolerance(self, tolerance: f64) -> PolynomialTransformation {
        PolynomialTransformation { tolerance, ..self }
    }

    pub fn with_max_iterations(self, max_iterations: usize) -> PolynomialTransformation {
        PolynomialTransformation {
            max_iterations,
            ..self
        }
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn is_identity(&self) -> bool {
        self.source_origin == self.target_origin
            && self.a.iter().all(|c| *c == 0.)
            && self.b.iter().all(|c| *c == 0.)
    }

    // The polynomial corrections at (x, y)
    fn corrections(&self, x: f64, y: f64) -> (f64, f64) {
        let u = self.scaling * (x - self.source_origin[0]);
        let v = self.scaling * (y - self.source_origin[1]);
        let (mut dx, mut dy) = (0., 0.);
        let mut k = 0;
        for total in 0..=self.degree {
            for j in 0..=total {
                let term = u.powi((total - j) as i32) * v.powi(j as i32);
                dx += self.a[k] * term;
                dy += self.b[k] * term;
                k += 1;
            }
        }
        (dx, dy)
    }

    pub fn fwd(&self, c: &Coor3D) -> Coor3D {
        let (dx, dy) = self.corrections(c[0], c[1]);
        Coor3D::raw(
            c[0] - self.source_origin[0] + self.target_origin[0] + dx,
            c[1] - self.source_origin[1] + self.target_origin[1] + dy,
            c[2],
        )
    }

    /// `None` if the fixed point iteration does not converge
    pub fn inv(&self, c: &Coor3D) -> Option<Coor3D> {
        // Undo the shift of origin, then iterate on the corrections
        let x0 = c[0] - self.target_origin[0] + self.source_origin[0];
        let y0 = c[1] - self.target_origin[1] + self.source_origin[1];
        let (mut x, mut y) = (x0, y0);
        for _ in 0..self.max_iterations {
            let (dx, dy) = self.corrections(x, y);
            let (next_x, next_y) = (x0 - dx, y0 - dy);
            let change = (next_x - x).abs().max((next_y - y).abs());
            (x, y) = (next_x, next_y);
            if change < self.tolerance {
                return Some(Coor3D::raw(x, y, c[2]));
            }
        }
        None
    }
}

// ----- T E S T S ---------------------------------------------------------------------
