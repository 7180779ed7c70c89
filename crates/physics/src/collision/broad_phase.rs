//! Broad-phase culling using a uniform spatial grid.

use crate::types::BoundingBox;
use glam::Vec3;

/// Uniform grid of cells, each listing the objects whose bounds touch it.
///
/// Bounds outside the grid are clamped onto the border cells, so objects and
/// queries beyond the covered region still meet each other.
#[derive(Clone, Debug)]
pub struct SpatialGrid {
    cell_size: f32,
    origin: Vec3,
    dims: [usize; 3],
    cells: Vec<Vec<usize>>,
}

impl SpatialGrid {
    #[must_use]
    pub fn new(cell_size: f32, bounds: BoundingBox) -> Self {
        let extent = bounds.max - bounds.min;
        let cells_along = |len: f32| ((len / cell_size).ceil() as usize).max(1);
        let dims = [cells_along(extent.x), cells_along(extent.y), cells_along(extent.z)];
        Self {
            cell_size,
            origin: bounds.min,
            dims,
            cells: vec![Vec::new(); dims[0] * dims[1] * dims[2]],
        }
    }

    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.clear();
        }
    }

    /// Insert an object with the given bounding box
    pub fn insert(&mut self, index: usize, bounds: BoundingBox) {
        let covered: Vec<usize> = self.cells_covering(bounds).collect();
        for cell_index in covered {
            self.cells[cell_index].push(index);
        }
    }

    /// Remove an object previously inserted with `bounds`.
    pub fn remove(&mut self, index: usize, bounds: BoundingBox) {
        let covered: Vec<usize> = self.cells_covering(bounds).collect();
        for cell_index in covered {
            self.cells[cell_index].retain(|&i| i != index);
        }
    }

    /// Objects sharing at least one cell with `bounds`, sorted and deduplicated.
    #[must_use]
    pub fn query(&self, bounds: BoundingBox) -> Vec<usize> {
        let mut found: Vec<usize> = self
            .cells_covering(bounds)
            .flat_map(|cell_index| self.cells[cell_index].iter().copied())
            .collect();
        found.sort_unstable();
        found.dedup();
        found
    }

    #[must_use]
    pub fn occupied_cells(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    fn world_to_grid(&self, p: Vec3) -> [usize; 3] {
        let local = (p - self.origin) / self.cell_size;
        let axis = |v: f32, dim: usize| {
            if v.is_nan() || v <= 0.0 {
                0
            } else {
                (v.floor() as usize).min(dim - 1)
            }
        };
        [
            axis(local.x, self.dims[0]),
            axis(local.y, self.dims[1]),
            axis(local.z, self.dims[2]),
        ]
    }

    fn grid_to_index(&self, [x, y, z]: [usize; 3]) -> usize {
        (z * self.dims[1] + y) * self.dims[0] + x
    }

    fn cells_covering(&self, bounds: BoundingBox) -> impl Iterator<Item = usize> + '_ {
        let min = self.world_to_grid(bounds.min);
        let max = self.world_to_grid(bounds.max);
        (min[2]..=max[2]).flat_map(move |z| {
            (min[1]..=max[1]).flat_map(move |y| {
                (min[0]..=max[0]).map(move |x| self.grid_to_index([x, y, z]))
            })
        })
    }
}
