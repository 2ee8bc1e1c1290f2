use super::Coor3D;

/// `CoordinateSet` is the coordinate access interface used by transformations
/// operating in place.
///
/// It is implemented simply as an accessor trait, that allows us to
/// access any user provided data model by iterating over its elements,
/// represented as a `Coor3D`
pub trait CoordinateSet {
    /// Number of coordinate tuples in the set
    fn len(&self) -> usize;

    /// Native dimension of the underlying coordinates (they will always be
    /// returned by [`Self::get_coord()`] as converted to [`Coor3D`])
    fn dim(&self) -> usize;

    /// Access the `index`th coordinate tuple
    fn get_coord(&self, index: usize) -> Coor3D;

    /// Overwrite the `index`th coordinate tuple
    fn set_coord(&mut self, index: usize, value: &Coor3D);

    /// Companion to `len()`
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Set all coordinate tuples in the set to NaN
    fn stomp(&mut self) {
        let nanny = Coor3D::nan();
        for i in 0..self.len() {
            self.set_coord(i, &nanny);
        }
    }
}

// Produce the correct len() method for arrays, slices, and vecs
macro_rules! length {
    (array) => {
        fn len(&self) -> usize {
            N
        }
    };

    (slice) => {
        fn len(&self) -> usize {
            (**self).len()
        }
    };

    (vec) => {
        fn len(&self) -> usize {
            Vec::len(self)
        }
    };
}

// ----- CoordinateSet implementations for Coor3D containers -----------------

macro_rules! coordinate_set_impl_for_coor3d {
    ($kind:ident) => {
        length!($kind);

        fn dim(&self) -> usize {
            3
        }

        fn get_coord(&self, index: usize) -> Coor3D {
            self[index]
        }

        fn set_coord(&mut self, index: usize, value: &Coor3D) {
            self[index] = *value;
        }
    };
}

impl<const N: usize> CoordinateSet for [Coor3D; N] {
    coordinate_set_impl_for_coor3d!(array);
}

impl CoordinateSet for &mut [Coor3D] {
    coordinate_set_impl_for_coor3d!(slice);
}

impl CoordinateSet for Vec<Coor3D> {
    coordinate_set_impl_for_coor3d!(vec);
}

// ----- CoordinateSet implementations for plain 2D arrays -------------------

/// Plain `[f64; 2]` tuples read with a third coordinate of `0`,
/// and silently drop the third coordinate on write
macro_rules! coordinate_set_impl_for_plain_2d {
    ($kind:ident) => {
        length!($kind);

        fn dim(&self) -> usize {
            2
        }

        fn get_coord(&self, index: usize) -> Coor3D {
            Coor3D([self[index][0], self[index][1], 0.])
        }

        fn set_coord(&mut self, index: usize, value: &Coor3D) {
            self[index] = [value[0], value[1]];
        }
    };
}

impl<const N: usize> CoordinateSet for [[f64; 2]; N] {
    coordinate_set_impl_for_plain_2d!(array);
}

impl CoordinateSet for &mut [[f64; 2]] {
    coordinate_set_impl_for_plain_2d!(slice);
}

impl CoordinateSet for Vec<[f64; 2]> {
    coordinate_set_impl_for_plain_2d!(vec);
}

// ----- T E S T S ---------------------------------------------------
