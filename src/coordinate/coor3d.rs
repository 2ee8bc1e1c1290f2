use std::ops::{Add, Index, IndexMut, Sub};

/// Generic 3D coordinate tuple, with no fixed interpretation of the elements.
/// 2D coordinates are represented with the third element set to 0.
#[derive(Debug, Default, PartialEq, Copy, Clone)]
pub struct Coor3D(pub [f64; 3]);

// ----- O P E R A T O R   T R A I T S -------------------------------------------------

impl Index<usize> for Coor3D {
    type Output = f64;
    fn index(&self, i: usize) -> &Self::Output {
        &self.0[i]
    }
}

impl IndexMut<usize> for Coor3D {
    fn index_mut(&mut self, i: usize) -> &mut Self::Output {
        &mut self.0[i]
    }
}

impl Add for Coor3D {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Coor3D([
            self.0[0] + other.0[0],
            self.0[1] + other.0[1],
            self.0[2] + other.0[2],
        ])
    }
}

impl Sub for Coor3D {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Coor3D([
            self.0[0] - other.0[0],
            self.0[1] - other.0[1],
            self.0[2] - other.0[2],
        ])
    }
}

// ----- C O N S T R U C T O R S ---------------------------------------------

/// Constructors
impl Coor3D {
    /// A `Coor3D` from latitude/longitude/height, with the angular input in degrees,
    /// and the output in the internal longitude/latitude-in-radians order
    #[must_use]
    pub fn geo(latitude: f64, longitude: f64, height: f64) -> Coor3D {
        Coor3D([longitude.to_radians(), latitude.to_radians(), height])
    }

    /// A `Coor3D` from longitude/latitude/height, with the angular input in degrees
    #[must_use]
    pub fn gis(longitude: f64, latitude: f64, height: f64) -> Coor3D {
        Coor3D([longitude.to_radians(), latitude.to_radians(), height])
    }

    /// A `Coor3D` from three values, taken as is
    #[must_use]
    pub fn raw(first: f64, second: f64, third: f64) -> Coor3D {
        Coor3D([first, second, third])
    }

    /// A `Coor3D` consisting of 3 `NaN`s
    #[must_use]
    pub fn nan() -> Coor3D {
        Coor3D([f64::NAN; 3])
    }

    /// A `Coor3D` consisting of 3 `0`s
    #[must_use]
    pub fn origin() -> Coor3D {
        Coor3D([0., 0., 0.])
    }

    /// True if any of the elements is `NaN`
    #[must_use]
    pub fn is_nan(&self) -> bool {
        self.0.iter().any(|x| x.is_nan())
    }

    /// Euclidean distance between two points in the plane, ignoring the third element
    #[must_use]
    pub fn hypot2(&self, other: &Self) -> f64 {
        (self[0] - other[0]).hypot(self[1] - other[1])
    }

    /// Euclidean distance between two points in space
    #[must_use]
    pub fn hypot3(&self, other: &Self) -> f64 {
        (self[0] - other[0])
            .hypot(self[1] - other[1])
            .hypot(self[2] - other[2])
    }

    /// The first two elements converted from radians to degrees
    #[must_use]
    pub fn to_degrees(self) -> Coor3D {
        Coor3D([self[0].to_degrees(), self[1].to_degrees(), self[2]])
    }
}

// ----- T E S T S ---------------------------------------------------
