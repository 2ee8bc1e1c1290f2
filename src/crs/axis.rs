use super::unit::Unit;

/// The direction in which the values of an [`Axis`] increase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisOrientation {
    North,
    South,
    East,
    West,
    Up,
    Down,
    /// Toward the intersection of the equator and the prime meridian
    Front,
    Back,
    Other,
}

impl AxisOrientation {
    /// Parse the abbreviations used in CRS definitions: `n`, `s`, `e`, `w`,
    /// `u`, `d`, plus the geographic shorthands `lat`, `lon` and `h`
    pub fn parse(abbreviation: &str) -> Option<AxisOrientation> {
        use AxisOrientation::*;
        match abbreviation.to_lowercase().as_str() {
            "n" | "north" | "lat" => Some(North),
            "s" | "south" => Some(South),
            "e" | "east" | "lon" => Some(East),
            "w" | "west" => Some(West),
            "u" | "up" | "h" => Some(Up),
            "d" | "down" => Some(Down),
            "x" | "front" => Some(Front),
            "back" => Some(Back),
            _ => None,
        }
    }

    /// +1 or -1, for orientations pointing along or against the
    /// corresponding internal axis
    pub fn sign(&self) -> f64 {
        match self {
            AxisOrientation::South | AxisOrientation::West | AxisOrientation::Down => -1.,
            AxisOrientation::Back => -1.,
            _ => 1.,
        }
    }
}

/// One coordinate system axis: Name, orientation and unit
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    name: String,
    orientation: AxisOrientation,
    unit: Unit,
}

impl Axis {
    pub fn new(name: &str, orientation: AxisOrientation, unit: Unit) -> Axis {
        Axis {
            name: name.to_string(),
            orientation,
            unit,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn orientation(&self) -> AxisOrientation {
        self.orientation
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// The same axis, in another unit
    pub fn with_unit(&self, unit: Unit) -> Axis {
        Axis {
            unit,
            ..self.clone()
        }
    }

    pub fn longitude(unit: Unit) -> Axis {
        Axis::new("Longitude", AxisOrientation::East, unit)
    }

    pub fn latitude(unit: Unit) -> Axis {
        Axis::new("Latitude", AxisOrientation::North, unit)
    }

    pub fn easting(unit: Unit) -> Axis {
        Axis::new("Easting", AxisOrientation::East, unit)
    }

    pub fn northing(unit: Unit) -> Axis {
        Axis::new("Northing", AxisOrientation::North, unit)
    }

    pub fn height(unit: Unit) -> Axis {
        Axis::new("Height", AxisOrientation::Up, unit)
    }
}
