//! Series expansions in the third flattening, and their evaluation

/// The number of terms in the series expansions used by the projections
pub const POLYNOMIAL_ORDER: usize = 6;

/// Coefficients of the Taylor polynomials (in the third flattening, `n`)
/// giving the Fourier coefficients of a forward/inverse pair of series.
/// Row `i` holds the polynomial for coefficient `i`, lowest power first,
/// with one factor of `n` left out.
#[derive(Clone, Copy, Debug, Default)]
pub struct PolynomialCoefficients {
    pub fwd: [[f64; POLYNOMIAL_ORDER]; POLYNOMIAL_ORDER],
    pub inv: [[f64; POLYNOMIAL_ORDER]; POLYNOMIAL_ORDER],
}

/// The Fourier coefficients of a forward/inverse pair of series, for one
/// specific ellipsoid
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FourierCoefficients {
    pub fwd: [f64; POLYNOMIAL_ORDER],
    pub inv: [f64; POLYNOMIAL_ORDER],
}

// ----- P O L Y N O M I A L S ---------------------------------------------------------

pub mod taylor {
    use super::{FourierCoefficients, PolynomialCoefficients, POLYNOMIAL_ORDER};

    /// Evaluate the Taylor polynomials of `coefficients` at `n`
    pub fn fourier_coefficients(n: f64, coefficients: &PolynomialCoefficients) -> FourierCoefficients {
        let mut fwd = [0.; POLYNOMIAL_ORDER];
        let mut inv = [0.; POLYNOMIAL_ORDER];
        for (i, (f, r)) in coefficients.fwd.iter().zip(&coefficients.inv).enumerate() {
            fwd[i] = n * horner(n, f);
            inv[i] = n * horner(n, r);
        }
        FourierCoefficients { fwd, inv }
    }

    /// The polynomial Σ cᵢ·xⁱ, by Horner's scheme. Empty: 0
    pub fn horner(x: f64, coefficients: &[f64]) -> f64 {
        coefficients
            .iter()
            .rev()
            .fold(0., |value, c| value.mul_add(x, *c))
    }
}

// ----- F O U R I E R   S E R I E S -------------------------------------------------

/// Sine series, summed from the highest order down by Clenshaw's recurrence,
/// `bₖ = cₖ + 2cos(x)·bₖ₊₁ - bₖ₊₂`, giving the sum as `sin(x)·b₁`
pub mod fourier {
    /// Σ cᵢ·sin(i·x), i = 1, 2, ...
    pub fn sin(x: f64, coefficients: &[f64]) -> f64 {
        let (sin_x, cos_x) = x.sin_cos();
        let two_cos = 2. * cos_x;
        let (mut b1, mut b2) = (0., 0.);
        for c in coefficients.iter().rev() {
            (b1, b2) = (two_cos.mul_add(b1, c - b2), b1);
        }
        sin_x * b1
    }

    // Complex product, with complex numbers as [re, im]
    fn mul(a: [f64; 2], b: [f64; 2]) -> [f64; 2] {
        [a[0] * b[0] - a[1] * b[1], a[0] * b[1] + a[1] * b[0]]
    }

    /// Σ cᵢ·sin(i·z), i = 1, 2, ..., for the complex argument `z = [re, im]`
    /// and real coefficients
    pub fn complex_sin(z: [f64; 2], coefficients: &[f64]) -> [f64; 2] {
        let (sin_r, cos_r) = z[0].sin_cos();
        let (sinh_i, cosh_i) = (z[1].sinh(), z[1].cosh());

        // 2cos(z) and sin(z)
        let two_cos = [2. * cos_r * cosh_i, -2. * sin_r * sinh_i];
        let sin = [sin_r * cosh_i, cos_r * sinh_i];

        let (mut b1, mut b2) = ([0.; 2], [0.; 2]);
        for c in coefficients.iter().rev() {
            let t = mul(two_cos, b1);
            (b1, b2) = ([t[0] - b2[0] + c, t[1] - b2[1]], b1);
        }
        mul(sin, b1)
    }
}

// ----- T E S T S ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::taylor::*;
    use super::*;
    use crate::authoring::*;

    #[test]
    fn polynomials() -> Result<(), Error> {
        // 1 + 2x + 3x²
        let coefficients = [1_f64, 2., 3.];
        assert_eq!(horner(1., &coefficients), 6.);
        assert_eq!(horner(-2., &coefficients), 9.);
        assert_eq!(horner(-2., &[]), 0.);

        // The meridian arc unit is a Horner evaluation too
        let ellps = Ellipsoid::named("GRS80")?;
        assert!((ellps.normalized_meridian_arc_unit() - 0.998_324_298_423_041_5).abs() < 1e-14);
        Ok(())
    }

    #[test]
    fn clenshaw() {
        let x = 30_f64.to_radians();
        let coefficients = [1., 2., 3.];
        let expected = x.sin() + 2.0 * (2.0 * x).sin() + 3.0 * (3.0 * x).sin();
        assert!((fourier::sin(x, &coefficients) - expected).abs() < 1e-14);
        assert_eq!(fourier::sin(x, &[]), 0.);

        // With a real argument, the complex sum is the real sum
        let sum = fourier::complex_sin([x, 0.], &coefficients);
        assert!((sum[0] - expected).abs() < 1e-14);
        assert!(sum[1].abs() < 1e-14);

        // Reference value from the Poder/Engsager implementation
        let coefficients = [6., 5., 4., 3., 2., 1.];
        let arg = [30f64.to_radians(), 60f64.to_radians()];
        let sum = fourier::complex_sin(arg, &coefficients);
        assert!((sum[0] - 248.658_846_388_817_7).abs() < 1e-11);
        assert!((sum[1] + 463.436_347_907_636_56).abs() < 1e-11);
    }
}
