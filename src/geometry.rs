use std::fmt;

use serde::{Deserialize, Serialize};

/// A 2-D world coordinate on the block grid. Plot checks are footprint-only,
/// so height never appears here — callers project it away.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorldPoint {
    pub x: i32,
    pub z: i32,
}

impl WorldPoint {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }
}

impl fmt::Display for WorldPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

/// Axis-aligned plot footprint, inclusive on both corners.
///
/// Invariant: `south_west` is componentwise <= `north_east`, so the area is
/// always at least one block column. Kept private so deserialized values go
/// through the same normalization as constructed ones.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "BoundsRepr", from = "BoundsRepr")]
pub struct PlotBounds {
    south_west: WorldPoint,
    north_east: WorldPoint,
}

#[derive(Serialize, Deserialize)]
struct BoundsRepr {
    south_west: WorldPoint,
    north_east: WorldPoint,
}

impl From<PlotBounds> for BoundsRepr {
    fn from(bounds: PlotBounds) -> Self {
        BoundsRepr {
            south_west: bounds.south_west,
            north_east: bounds.north_east,
        }
    }
}

impl From<BoundsRepr> for PlotBounds {
    fn from(repr: BoundsRepr) -> Self {
        PlotBounds::from_corners(repr.south_west, repr.north_east)
    }
}

impl PlotBounds {
    /// Create bounds from already-ordered corners.
    ///
    /// # Panics
    /// Panics if `south_west` exceeds `north_east` on either axis.
    pub fn new(south_west: WorldPoint, north_east: WorldPoint) -> Self {
        assert!(
            south_west.x <= north_east.x && south_west.z <= north_east.z,
            "PlotBounds::new: south-west corner {south_west} exceeds north-east corner {north_east}"
        );
        Self {
            south_west,
            north_east,
        }
    }

    /// Create bounds from two arbitrary opposite corners, normalizing them
    /// to south-west / north-east.
    pub fn from_corners(a: WorldPoint, b: WorldPoint) -> Self {
        Self {
            south_west: WorldPoint::new(a.x.min(b.x), a.z.min(b.z)),
            north_east: WorldPoint::new(a.x.max(b.x), a.z.max(b.z)),
        }
    }

    pub fn south_west(&self) -> WorldPoint {
        self.south_west
    }

    pub fn north_east(&self) -> WorldPoint {
        self.north_east
    }

    /// True iff the point's x,z fall within the inclusive footprint.
    pub fn contains(&self, point: WorldPoint) -> bool {
        (self.south_west.x..=self.north_east.x).contains(&point.x)
            && (self.south_west.z..=self.north_east.z).contains(&point.z)
    }

    /// Number of block columns covered: `(Δx+1)·(Δz+1)`, always >= 1.
    pub fn area(&self) -> u64 {
        let dx = i64::from(self.north_east.x) - i64::from(self.south_west.x) + 1;
        let dz = i64::from(self.north_east.z) - i64::from(self.south_west.z) + 1;
        (dx * dz) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(x: i32, z: i32) -> WorldPoint {
        WorldPoint::new(x, z)
    }

    #[test]
    fn area_of_three_by_three() {
        let bounds = PlotBounds::new(pt(0, 0), pt(2, 2));
        assert_eq!(bounds.area(), 9);
    }

    #[test]
    fn contains_interior_point() {
        let bounds = PlotBounds::new(pt(0, 0), pt(2, 2));
        assert!(bounds.contains(pt(1, 1)));
    }

    #[test]
    fn excludes_points_outside() {
        let bounds = PlotBounds::new(pt(0, 0), pt(2, 2));
        assert!(!bounds.contains(pt(3, 3)));
        assert!(!bounds.contains(pt(-1, 0)));
    }

    #[test]
    fn corners_are_inclusive() {
        let bounds = PlotBounds::new(pt(0, 0), pt(2, 2));
        assert!(bounds.contains(pt(0, 0)));
        assert!(bounds.contains(pt(2, 2)));
        assert!(bounds.contains(pt(0, 2)));
        assert!(bounds.contains(pt(2, 0)));
    }

    #[test]
    fn single_column_plot_has_area_one() {
        let bounds = PlotBounds::new(pt(5, -3), pt(5, -3));
        assert_eq!(bounds.area(), 1);
        assert!(bounds.contains(pt(5, -3)));
    }

    #[test]
    fn from_corners_normalizes_order() {
        let bounds = PlotBounds::from_corners(pt(4, -1), pt(-2, 7));
        assert_eq!(bounds.south_west(), pt(-2, -1));
        assert_eq!(bounds.north_east(), pt(4, 7));
        assert_eq!(bounds.area(), 63);
    }

    #[test]
    fn negative_coordinates() {
        let bounds = PlotBounds::new(pt(-10, -10), pt(-8, -6));
        assert_eq!(bounds.area(), 15);
        assert!(bounds.contains(pt(-9, -7)));
        assert!(!bounds.contains(pt(-7, -7)));
    }

    #[test]
    #[should_panic(expected = "south-west corner")]
    fn new_panics_on_unordered_corners() {
        PlotBounds::new(pt(3, 0), pt(0, 3));
    }

    #[test]
    fn serde_round_trip_preserves_corners() {
        let bounds = PlotBounds::new(pt(-2, 4), pt(10, 12));
        let json = serde_json::to_string(&bounds).unwrap();
        let back: PlotBounds = serde_json::from_str(&json).unwrap();
        assert_eq!(back, bounds);
    }

    #[test]
    fn deserialization_normalizes_corners() {
        let json = r#"{"south_west":{"x":5,"z":5},"north_east":{"x":0,"z":0}}"#;
        let bounds: PlotBounds = serde_json::from_str(json).unwrap();
        assert_eq!(bounds.south_west(), pt(0, 0));
        assert_eq!(bounds.north_east(), pt(5, 5));
    }
}
