use glam::{IVec3, Vec3};

/// Flattened spatial hash of a grid cell.
pub type CellKey = i64;

/// Uniform cubic grid used to quantize listener-relative locations.
///
/// `dimension = ceil(grid_size / cell_size)` is the number of cells along one
/// axis of the grid extent; it is the radix used to flatten a cell coordinate
/// into a single key. Coordinates outside the extent still hash, they just
/// alias with cells inside it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialGrid {
    cell_size: f32,
    inv_cell_size: f32,
    dimension: i64,
}

impl SpatialGrid {
    /// Build a grid. Callers pass clamped settings, so both sizes are positive.
    pub fn new(grid_size: f32, cell_size: f32) -> Self {
        let dimension = (grid_size / cell_size).ceil().max(1.0) as i64;
        Self {
            cell_size,
            inv_cell_size: 1.0 / cell_size,
            dimension,
        }
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Cells along one axis.
    pub fn dimension(&self) -> i64 {
        self.dimension
    }

    /// Integer cell coordinate containing `location` (floor division).
    pub fn cell_coord(&self, location: Vec3) -> IVec3 {
        (location * self.inv_cell_size).floor().as_ivec3()
    }

    /// Flatten a cell coordinate into its key.
    pub fn coord_key(&self, coord: IVec3) -> CellKey {
        coord.x as i64
            + coord.y as i64 * self.dimension
            + coord.z as i64 * self.dimension * self.dimension
    }

    /// Key of the cell containing `location`.
    pub fn cell_key(&self, location: Vec3) -> CellKey {
        self.coord_key(self.cell_coord(location))
    }

    /// World-space center of the cell containing `location`.
    pub fn cell_center(&self, location: Vec3) -> Vec3 {
        ((location * self.inv_cell_size).floor() + Vec3::splat(0.5)) * self.cell_size
    }

    /// Half the edge length of a cell.
    pub fn half_extent(&self) -> f32 {
        self.cell_size * 0.5
    }
}
