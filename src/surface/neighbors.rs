//! Candidate neighbor lists for a single key atom.

use super::buffers::AtomBuffers;
use super::capacity::ScratchBuffer;
use super::error::AccessibilityError;
use super::grid::CubeGrid;

/// A neighbor of the key atom together with the planar (x, y) separation
/// between the two centers. The z separation is handled per slice.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NeighborEntry {
    /// Index of the neighbor in the atom buffers
    pub index: usize,
    /// key x minus neighbor x
    pub dx: f64,
    /// key y minus neighbor y
    pub dy: f64,
    /// sqrt(dx² + dy²)
    pub d: f64,
}

/// Fill `out` with every atom from the 3x3x3 cube block around `key` whose
/// extended sphere intersects the key atom's extended sphere.
///
/// Spheres that do not intersect can never produce a blocking arc at any
/// slice, so dropping them here leaves the integrated area unchanged.
pub fn collect_neighbors(
    key: usize,
    buffers: &AtomBuffers,
    grid: &CubeGrid,
    out: &mut ScratchBuffer<NeighborEntry>,
) -> Result<(), AccessibilityError> {
    out.clear();
    let [xi, yi, zi] = buffers.coords[key];
    let ri = buffers.radii[key];

    for cube in grid.neighborhood(&buffers.coords[key]) {
        for &j in grid.bucket(cube) {
            if j == key {
                continue;
            }
            let [xj, yj, zj] = buffers.coords[j];
            let reach = ri + buffers.radii[j];
            let dx = xi - xj;
            let dy = yi - yj;
            let dz = zi - zj;
            let planar2 = dx * dx + dy * dy;
            if planar2 + dz * dz >= reach * reach {
                continue;
            }
            out.push(NeighborEntry {
                index: j,
                dx,
                dy,
                d: planar2.sqrt(),
            })?;
        }
    }
    Ok(())
}
