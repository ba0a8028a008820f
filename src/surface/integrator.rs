//! Lee & Richards slice integration of one atom's exposed surface.
//!
//! The extended sphere is cut into `nzp` z-slices of equal thickness. On
//! every slice the exposed arc of the sphere's cross-section circle is
//! measured after removing the arcs that fall inside neighboring circles.
//! By Archimedes' hat-box theorem each slice contributes
//! `exposed angle × slice thickness × r` of sphere area, so summing
//! `exposed angle × thickness` and scaling by the radius at the end gives
//! the area.

use std::f64::consts::{PI, TAU};

use tracing::trace;

use super::arcs::ArcList;
use super::buffers::AtomBuffers;
use super::error::AccessibilityError;
use super::neighbors::NeighborEntry;
use super::SurfaceMode;

/// Number of slices for an accuracy given as a fraction of the diameter.
pub fn slice_count(accuracy: f64) -> usize {
    ((1.0 / accuracy).round() as usize).max(1)
}

/// Exposed area of atom `key`, given its candidate neighbors.
pub fn atom_area(
    key: usize,
    buffers: &AtomBuffers,
    neighbors: &[NeighborEntry],
    nzp: usize,
    mode: SurfaceMode,
    arcs: &mut ArcList,
) -> Result<f64, AccessibilityError> {
    let r = buffers.radii[key];
    let total = if neighbors.is_empty() {
        TAU * (2.0 * r)
    } else {
        sliced_arc_length(key, buffers, neighbors, nzp, arcs)?
    };
    trace!(
        "Atom {key}: {} neighbors, integrated arc length {total:.4}",
        neighbors.len()
    );
    Ok(scale_area(total, r, buffers.probe_radius, mode))
}

/// Sum over all slices of `exposed angle × slice thickness`.
fn sliced_arc_length(
    key: usize,
    buffers: &AtomBuffers,
    neighbors: &[NeighborEntry],
    nzp: usize,
    arcs: &mut ArcList,
) -> Result<f64, AccessibilityError> {
    let r = buffers.radii[key];
    let r2 = r * r;
    let zi = buffers.coords[key][2];
    let zres = 2.0 * r / nzp as f64;

    let mut total = 0.0;
    // slice centers sit at zi - r + zres/2, zi - r + 3zres/2, ...
    let mut zgrid = zi - r - zres / 2.0;
    for _ in 0..nzp {
        zgrid += zres;
        let dz = zgrid - zi;
        let rsec2r = r2 - dz * dz;
        if rsec2r <= 0.0 {
            continue;
        }
        let rsecr = rsec2r.sqrt();

        arcs.clear();
        let mut buried = false;
        for n in neighbors {
            let rn = buffers.radii[n.index];
            let dzn = zgrid - buffers.coords[n.index][2];
            let rsec2n = rn * rn - dzn * dzn;
            if rsec2n <= 0.0 {
                continue;
            }
            let rsecn = rsec2n.sqrt();
            if n.d >= rsecr + rsecn {
                continue;
            }

            // one circle inside the other
            let diff = rsecr - rsecn;
            if n.d <= diff.abs() {
                if diff <= 0.0 {
                    buried = true;
                    break;
                }
                continue;
            }

            let cos_alpha = (n.d * n.d + rsec2r - rsec2n) / (2.0 * n.d * rsecr);
            let alpha = cos_alpha.clamp(-1.0, 1.0).acos();
            let beta = n.dy.atan2(n.dx) + PI;
            arcs.push_centered(beta, alpha)?;
        }
        if buried {
            continue;
        }

        let exposed = if arcs.is_empty() {
            TAU
        } else {
            TAU - arcs.blocked()?
        };
        total += exposed * zres;
    }
    Ok(total)
}

/// Project the integrated arc length onto the requested surface.
///
/// `total × r` is the exposed area of the extended sphere itself; contact
/// areas shrink it back onto the van der Waals sphere. A sphere without
/// extent has no area in either mode.
pub fn scale_area(total: f64, r: f64, probe_radius: f64, mode: SurfaceMode) -> f64 {
    if r <= 0.0 {
        return 0.0;
    }
    match mode {
        SurfaceMode::ContactArea => {
            let vdw = r - probe_radius;
            total * (vdw * vdw) / r
        }
        SurfaceMode::AccessibleSurfaceArea => total * r,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::SasaAtom;

    fn entries_for(atoms: &[SasaAtom], probe: f64) -> (AtomBuffers, Vec<NeighborEntry>) {
        let buffers = AtomBuffers::from_atoms(atoms, probe).unwrap();
        let [x0, y0, _] = buffers.coords[0];
        let entries = (1..atoms.len())
            .map(|j| {
                let [xj, yj, _] = buffers.coords[j];
                let (dx, dy) = (x0 - xj, y0 - yj);
                NeighborEntry {
                    index: j,
                    dx,
                    dy,
                    d: (dx * dx + dy * dy).sqrt(),
                }
            })
            .collect();
        (buffers, entries)
    }

    #[test]
    fn test_slice_count() {
        assert_eq!(slice_count(0.05), 20);
        assert_eq!(slice_count(0.3), 3);
        assert_eq!(slice_count(5.0), 1);
    }

    #[test]
    fn test_isolated_atom_closed_form() {
        let (buffers, _) = entries_for(&[SasaAtom::new(0.0, 0.0, 0.0, 1.8)], 1.4);
        let mut arcs = ArcList::new().unwrap();
        let r: f64 = 3.2;

        let sasa = atom_area(0, &buffers, &[], 20, SurfaceMode::AccessibleSurfaceArea, &mut arcs)
            .unwrap();
        assert!((sasa - 4.0 * PI * r * r).abs() < 1e-9);

        let contact = atom_area(0, &buffers, &[], 20, SurfaceMode::ContactArea, &mut arcs).unwrap();
        assert!((contact - TAU * 2.0 * r * (1.8 * 1.8) / r).abs() < 1e-9);
    }

    #[test]
    fn test_slicing_without_overlap_recovers_full_sphere() {
        // a neighbor that never reaches the key circle on any slice
        let atoms = [SasaAtom::new(0.0, 0.0, 0.0, 1.6), SasaAtom::new(9.0, 0.0, 0.0, 1.6)];
        let (buffers, entries) = entries_for(&atoms, 1.4);
        let mut arcs = ArcList::new().unwrap();
        let area = atom_area(0, &buffers, &entries, 20, SurfaceMode::AccessibleSurfaceArea, &mut arcs)
            .unwrap();
        assert!((area - 4.0 * PI * 9.0).abs() < 1e-9);
    }

    #[test]
    fn test_engulfing_neighbor_buries_atom() {
        let atoms = [SasaAtom::new(0.0, 0.0, 0.0, 1.0), SasaAtom::new(0.2, 0.0, 0.0, 4.0)];
        let (buffers, entries) = entries_for(&atoms, 1.4);
        let mut arcs = ArcList::new().unwrap();
        let area = atom_area(0, &buffers, &entries, 20, SurfaceMode::AccessibleSurfaceArea, &mut arcs)
            .unwrap();
        assert_eq!(area, 0.0);
    }

    #[test]
    fn test_two_sphere_overlap_against_cap_formula() {
        // exposed area = full sphere minus the spherical cap cut by the lens
        let (r1, r2, d) = (1.8_f64, 1.6_f64, 3.0_f64);
        let atoms = [SasaAtom::new(0.0, 0.0, 0.0, r1), SasaAtom::new(d, 0.0, 0.0, r2)];
        let (buffers, entries) = entries_for(&atoms, 0.0);
        let mut arcs = ArcList::new().unwrap();
        let area = atom_area(0, &buffers, &entries, 2000, SurfaceMode::AccessibleSurfaceArea, &mut arcs)
            .unwrap();

        let h = r1 - (d * d + r1 * r1 - r2 * r2) / (2.0 * d);
        let expected = 4.0 * PI * r1 * r1 - TAU * r1 * h;
        assert!(
            (area - expected).abs() / expected < 0.005,
            "area {area} vs analytic {expected}"
        );
    }

    #[test]
    fn test_modes_differ_by_radius_ratio() {
        let atoms = [SasaAtom::new(0.0, 0.0, 0.0, 1.7), SasaAtom::new(2.5, 1.0, 0.5, 1.5)];
        let (buffers, entries) = entries_for(&atoms, 1.4);
        let mut arcs = ArcList::new().unwrap();
        let sasa = atom_area(0, &buffers, &entries, 20, SurfaceMode::AccessibleSurfaceArea, &mut arcs)
            .unwrap();
        let contact =
            atom_area(0, &buffers, &entries, 20, SurfaceMode::ContactArea, &mut arcs).unwrap();
        let r = 3.1_f64;
        let ratio = (r / 1.7) * (r / 1.7);
        assert!((sasa - contact * ratio).abs() < 1e-9 * sasa.max(1.0));
    }

    #[test]
    fn test_zero_radius_has_no_area() {
        for mode in [SurfaceMode::ContactArea, SurfaceMode::AccessibleSurfaceArea] {
            assert_eq!(scale_area(TAU * 2.0, 0.0, 0.0, mode), 0.0);
        }
    }
}
