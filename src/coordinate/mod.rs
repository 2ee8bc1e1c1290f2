mod coor3d;
mod set;

pub use coor3d::Coor3D;
pub use set::CoordinateSet;
