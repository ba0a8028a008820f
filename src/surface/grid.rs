//! Uniform cube grid used to restrict neighbor searches to a 3x3x3 block.
//!
//! The cube edge is twice the largest extended radius, so any two spheres
//! that intersect have their centers in the same or in adjacent cubes.

use tracing::debug;

use super::buffers::AtomBuffers;
use super::capacity::{ScratchBuffer, CUBE_INCREMENT};
use super::error::AccessibilityError;

/// Minimum number of cubes along each axis.
const MIN_CUBES_PER_AXIS: usize = 3;

/// Axis-aligned bounds of all atom centers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Smallest coordinate on each axis
    pub min: [f64; 3],
    /// Largest coordinate on each axis
    pub max: [f64; 3],
}

impl BoundingBox {
    /// Bounds of `coords`; an empty slice gives a box at the origin.
    pub fn from_coords(coords: &[[f64; 3]]) -> Self {
        let mut min = [f64::INFINITY; 3];
        let mut max = [f64::NEG_INFINITY; 3];
        for c in coords {
            for axis in 0..3 {
                min[axis] = min[axis].min(c[axis]);
                max[axis] = max[axis].max(c[axis]);
            }
        }
        if coords.is_empty() {
            min = [0.0; 3];
            max = [0.0; 3];
        }
        Self { min, max }
    }

    /// Extent along `axis` (0, 1 or 2).
    pub fn range(&self, axis: usize) -> f64 {
        self.max[axis] - self.min[axis]
    }
}

/// Atom indices bucketed into cubes of equal edge length over the bounding box.
#[derive(Debug, Clone)]
pub struct CubeGrid {
    bounds: BoundingBox,
    edge: f64,
    dims: [usize; 3],
    buckets: Vec<ScratchBuffer<usize>>,
}

impl CubeGrid {
    /// Bucket every atom into the cube that contains its center.
    pub fn build(buffers: &AtomBuffers) -> Result<Self, AccessibilityError> {
        let bounds = BoundingBox::from_coords(&buffers.coords);
        let max_radius = buffers.max_radius();
        let edge = if max_radius > 0.0 { 2.0 * max_radius } else { 1.0 };

        // floor + 1 keeps the atom sitting on the upper bound inside the grid
        let mut dims = [MIN_CUBES_PER_AXIS; 3];
        for (axis, dim) in dims.iter_mut().enumerate() {
            let span = ((bounds.range(axis) / edge).floor() as usize).saturating_add(1);
            *dim = span.max(MIN_CUBES_PER_AXIS);
        }
        let n_cubes = dims[0].saturating_mul(dims[1]).saturating_mul(dims[2]);

        let mut buckets = Vec::new();
        buckets.try_reserve_exact(n_cubes)?;
        for _ in 0..n_cubes {
            buckets.push(ScratchBuffer::with_growth(0, CUBE_INCREMENT)?);
        }

        let mut grid = Self {
            bounds,
            edge,
            dims,
            buckets,
        };
        for (atom, coord) in buffers.coords.iter().enumerate() {
            let cube = grid.cube_index(coord);
            grid.buckets[cube].push(atom)?;
        }

        debug!(
            "Built {}x{}x{} cube grid with edge {:.3} Å for {} atoms",
            dims[0],
            dims[1],
            dims[2],
            edge,
            buffers.len()
        );
        Ok(grid)
    }

    /// Bounding box of the atom centers.
    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    /// Cube edge length in Å.
    pub fn edge(&self) -> f64 {
        self.edge
    }

    /// Number of cubes along x, y and z.
    pub fn dims(&self) -> [usize; 3] {
        self.dims
    }

    /// Total number of cubes.
    pub fn n_cubes(&self) -> usize {
        self.buckets.len()
    }

    /// Integer cube coordinates of a point, clamped into the grid.
    pub fn cube_coords(&self, coord: &[f64; 3]) -> [usize; 3] {
        let mut cube = [0; 3];
        for axis in 0..3 {
            let offset = (coord[axis] - self.bounds.min[axis]) / self.edge;
            cube[axis] = (offset as usize).min(self.dims[axis] - 1);
        }
        cube
    }

    /// Flattened index `x + nx (y + ny z)` of integer cube coordinates.
    pub fn flatten(&self, cube: [usize; 3]) -> usize {
        cube[0] + self.dims[0] * (cube[1] + self.dims[1] * cube[2])
    }

    /// Flattened index of the cube containing `coord`.
    pub fn cube_index(&self, coord: &[f64; 3]) -> usize {
        self.flatten(self.cube_coords(coord))
    }

    /// Atom indices stored in one cube.
    pub fn bucket(&self, cube: usize) -> &[usize] {
        self.buckets[cube].as_slice()
    }

    /// Flattened indices of the cube holding `coord` and of its in-grid
    /// face, edge and corner neighbors.
    pub fn neighborhood(&self, coord: &[f64; 3]) -> impl Iterator<Item = usize> + '_ {
        let center = self.cube_coords(coord);
        let span = |axis: usize| {
            let lo = center[axis].saturating_sub(1);
            let hi = (center[axis] + 1).min(self.dims[axis] - 1);
            lo..=hi
        };
        let (xs, ys, zs) = (span(0), span(1), span(2));
        zs.flat_map(move |z| {
            let xs = xs.clone();
            ys.clone()
                .flat_map(move |y| xs.clone().map(move |x| self.flatten([x, y, z])))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::SasaAtom;

    fn buffers_for(atoms: &[SasaAtom]) -> AtomBuffers {
        AtomBuffers::from_atoms(atoms, 1.4).unwrap()
    }

    fn scattered_atoms() -> Vec<SasaAtom> {
        (0..200)
            .map(|i| {
                let f = i as f64;
                SasaAtom::new(
                    (f * 1.7).sin() * 12.0,
                    (f * 0.9).cos() * 9.0 + f * 0.05,
                    (f * 2.3).sin() * 15.0,
                    1.4 + (i % 4) as f64 * 0.15,
                )
            })
            .collect()
    }

    #[test]
    fn test_tiny_molecule_still_has_three_cubes_per_axis() {
        let buffers = buffers_for(&[SasaAtom::new(0.0, 0.0, 0.0, 1.6)]);
        let grid = CubeGrid::build(&buffers).unwrap();
        assert_eq!(grid.dims(), [3, 3, 3]);
        assert_eq!(grid.n_cubes(), 27);
        assert!((grid.edge() - 6.0).abs() < 1e-12);
        assert_eq!(grid.neighborhood(&buffers.coords[0]).count(), 8);
    }

    #[test]
    fn test_every_atom_is_in_exactly_one_bucket() {
        let atoms = scattered_atoms();
        let buffers = buffers_for(&atoms);
        let grid = CubeGrid::build(&buffers).unwrap();

        let mut seen = vec![0usize; atoms.len()];
        for cube in 0..grid.n_cubes() {
            for &atom in grid.bucket(cube) {
                seen[atom] += 1;
                assert_eq!(grid.cube_index(&buffers.coords[atom]), cube);
            }
        }
        assert!(seen.iter().all(|&count| count == 1));
    }

    #[test]
    fn test_cube_index_matches_integer_division() {
        let atoms = scattered_atoms();
        let buffers = buffers_for(&atoms);
        let grid = CubeGrid::build(&buffers).unwrap();
        let [nx, ny, _] = grid.dims();

        for coord in &buffers.coords {
            let ix = ((coord[0] - grid.bounds().min[0]) / grid.edge()) as usize;
            let iy = ((coord[1] - grid.bounds().min[1]) / grid.edge()) as usize;
            let iz = ((coord[2] - grid.bounds().min[2]) / grid.edge()) as usize;
            assert_eq!(grid.cube_index(coord), ix + nx * (iy + ny * iz));
        }
    }

    #[test]
    fn test_upper_bound_on_exact_multiple_stays_in_grid() {
        // range is exactly three cube edges along x
        let atoms = vec![
            SasaAtom::new(0.0, 0.0, 0.0, 1.6),
            SasaAtom::new(18.0, 0.0, 0.0, 1.6),
        ];
        let buffers = buffers_for(&atoms);
        let grid = CubeGrid::build(&buffers).unwrap();
        assert_eq!(grid.dims()[0], 4);
        assert_eq!(grid.cube_coords(&buffers.coords[1])[0], 3);
    }

    #[test]
    fn test_interior_neighborhood_has_27_cubes() {
        let atoms: Vec<SasaAtom> = (0..5)
            .flat_map(|i| {
                (0..5).flat_map(move |j| {
                    (0..5).map(move |k| {
                        SasaAtom::new(i as f64 * 6.0, j as f64 * 6.0, k as f64 * 6.0, 1.6)
                    })
                })
            })
            .collect();
        let buffers = buffers_for(&atoms);
        let grid = CubeGrid::build(&buffers).unwrap();
        let center = [12.0, 12.0, 12.0];
        let cubes: Vec<usize> = grid.neighborhood(&center).collect();
        assert_eq!(cubes.len(), 27);
        assert!(cubes.contains(&grid.cube_index(&center)));
    }

    #[test]
    fn test_buckets_grow_only_when_used() {
        let atoms = vec![
            SasaAtom::new(0.0, 0.0, 0.0, 1.6),
            SasaAtom::new(0.5, 0.0, 0.0, 1.6),
        ];
        let buffers = buffers_for(&atoms);
        let grid = CubeGrid::build(&buffers).unwrap();
        let used = grid.cube_index(&buffers.coords[0]);
        for (cube, bucket) in grid.buckets.iter().enumerate() {
            if cube == used {
                assert_eq!(bucket.len(), 2);
                assert!(bucket.capacity() >= CUBE_INCREMENT);
            } else {
                assert_eq!(bucket.capacity(), 0);
            }
        }
    }

    #[test]
    fn test_infinite_range_is_an_allocation_error() {
        let atoms = vec![
            SasaAtom::new(-f64::MAX, 0.0, 0.0, 1.6),
            SasaAtom::new(f64::MAX, 0.0, 0.0, 1.6),
        ];
        let buffers = buffers_for(&atoms);
        assert!(matches!(
            CubeGrid::build(&buffers),
            Err(AccessibilityError::Allocation(_))
        ));
    }
}
