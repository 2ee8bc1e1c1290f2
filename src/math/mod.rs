//! Miscellaneous math functions for general use

/// Free functions used by more than one projection.
pub mod ancillary;
pub use ancillary::gudermannian;

/// Normalization of angles
pub mod angular;

/// Fourier- and Taylor series
pub mod series;
pub use series::fourier;
pub use series::taylor;

pub use series::taylor::fourier_coefficients;
pub use series::FourierCoefficients;
pub use series::PolynomialCoefficients;
