//! Lee & Richards accessible surface and contact areas.
//!
//! Implements the slicing method of Lee & Richards (1971): every atom is
//! represented by a sphere of radius `r_vdw + r_probe`, cut into thin
//! z-slices, and the part of each slice circle not lying inside a
//! neighboring circle is integrated into an area.
//!
//! The calculation is a pure function of the atoms, the integration accuracy,
//! the probe radius and the [`SurfaceMode`]. Neighbor searches go through a
//! uniform cube grid, so the cost per atom depends on the local atom density
//! rather than on the size of the molecule.

pub mod arcs;
pub mod buffers;
pub mod capacity;
pub mod error;
pub mod grid;
pub mod integrator;
pub mod neighbors;

use nalgebra::Point3;
use tracing::debug;

use buffers::AtomBuffers;
use capacity::{ScratchBuffer, NEIGHBOR_CAPACITY};
use grid::CubeGrid;
use integrator::{atom_area, slice_count};

pub use error::AccessibilityError;

/// Accuracy used when the caller passes zero or a negative value.
pub const DEFAULT_ACCURACY: f64 = 0.05;
/// Accuracies at or below this are replaced by [`DEFAULT_ACCURACY`].
pub const MIN_ACCURACY: f64 = 1e-4;
/// Radius of a water probe in Ångströms.
pub const WATER_PROBE_RADIUS: f64 = 1.4;

/// Which surface the per-atom areas are reported on.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SurfaceMode {
    /// Exposed area of the van der Waals sphere
    ContactArea,
    /// Exposed area of the sphere traced by the probe center
    #[default]
    AccessibleSurfaceArea,
}

/// An atom as seen by the surface calculation.
#[derive(Clone, Debug, PartialEq)]
pub struct SasaAtom {
    /// Center in Ångströms
    pub position: Point3<f64>,
    /// van der Waals radius in Ångströms
    pub radius: f64,
    /// Computed area, written by [`compute_accessibility`]
    pub access: f64,
}

impl SasaAtom {
    /// Atom at `(x, y, z)` with the given van der Waals radius.
    pub fn new(x: f64, y: f64, z: f64, radius: f64) -> Self {
        Self {
            position: Point3::new(x, y, z),
            radius,
            access: 0.0,
        }
    }
}

/// Compute the area of every atom and store it in [`SasaAtom::access`].
///
/// `accuracy` is the slice thickness as a fraction of each sphere's diameter
/// (values at or below [`MIN_ACCURACY`] fall back to [`DEFAULT_ACCURACY`]).
/// On error no `access` field is modified.
///
/// # Example
///
/// ```
/// use solvacc::surface::{compute_accessibility, SasaAtom, SurfaceMode};
///
/// let mut atoms = vec![
///     SasaAtom::new(0.0, 0.0, 0.0, 1.8),
///     SasaAtom::new(2.5, 0.0, 0.0, 1.8),
/// ];
/// compute_accessibility(&mut atoms, 0.05, 1.4, SurfaceMode::AccessibleSurfaceArea).unwrap();
/// assert!(atoms[0].access > 0.0);
/// ```
pub fn compute_accessibility(
    atoms: &mut [SasaAtom],
    accuracy: f64,
    probe_radius: f64,
    mode: SurfaceMode,
) -> Result<(), AccessibilityError> {
    let areas = compute_areas(atoms, accuracy, probe_radius, mode)?;
    AtomBuffers::write_back(atoms, &areas);
    Ok(())
}

/// Same as [`compute_accessibility`] but returns the areas in input order
/// instead of writing them into the atoms.
pub fn compute_areas(
    atoms: &[SasaAtom],
    accuracy: f64,
    probe_radius: f64,
    mode: SurfaceMode,
) -> Result<Vec<f64>, AccessibilityError> {
    if atoms.is_empty() {
        return Ok(Vec::new());
    }
    let accuracy = if accuracy <= MIN_ACCURACY {
        DEFAULT_ACCURACY
    } else {
        accuracy
    };
    let nzp = slice_count(accuracy);

    let buffers = AtomBuffers::from_atoms(atoms, probe_radius)?;
    let grid = CubeGrid::build(&buffers)?;

    let mut areas = Vec::new();
    areas.try_reserve_exact(buffers.len())?;
    let mut neighbors = ScratchBuffer::with_capacity(NEIGHBOR_CAPACITY)?;
    let mut arcs = arcs::ArcList::new()?;

    for key in 0..buffers.len() {
        neighbors::collect_neighbors(key, &buffers, &grid, &mut neighbors)?;
        areas.push(atom_area(
            key,
            &buffers,
            neighbors.as_slice(),
            nzp,
            mode,
            &mut arcs,
        )?);
    }

    debug!(
        "Computed {mode:?} for {} atoms with {nzp} slices per atom (probe {probe_radius} Å), total {:.2} Å²",
        areas.len(),
        areas.iter().sum::<f64>()
    );
    Ok(areas)
}
