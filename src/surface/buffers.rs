//! Flat coordinate and radius arrays copied out of the caller's atoms.

use super::error::AccessibilityError;
use super::SasaAtom;

/// Positions and extended radii (van der Waals radius + probe radius),
/// indexed by the atom's position in the input slice.
#[derive(Debug, Clone)]
pub struct AtomBuffers {
    /// Atom centers
    pub coords: Vec<[f64; 3]>,
    /// Extended radii
    pub radii: Vec<f64>,
    /// Probe radius added to every van der Waals radius
    pub probe_radius: f64,
}

impl AtomBuffers {
    /// Copy positions and extend the radii by `probe_radius`.
    pub fn from_atoms(atoms: &[SasaAtom], probe_radius: f64) -> Result<Self, AccessibilityError> {
        let mut coords = Vec::new();
        coords.try_reserve_exact(atoms.len())?;
        let mut radii = Vec::new();
        radii.try_reserve_exact(atoms.len())?;

        for atom in atoms {
            coords.push([atom.position.x, atom.position.y, atom.position.z]);
            radii.push(atom.radius + probe_radius);
        }

        Ok(Self {
            coords,
            radii,
            probe_radius,
        })
    }

    /// Number of atoms.
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    /// Whether there are no atoms.
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Largest extended radius, or 0 for an empty set.
    pub fn max_radius(&self) -> f64 {
        self.radii.iter().copied().fold(0.0, f64::max)
    }

    /// Copy computed areas back into the caller's atoms, in input order.
    pub fn write_back(atoms: &mut [SasaAtom], areas: &[f64]) {
        for (atom, &area) in atoms.iter_mut().zip(areas) {
            atom.access = area;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radii_are_extended_by_probe() {
        let atoms = vec![
            SasaAtom::new(1.0, 2.0, 3.0, 1.8),
            SasaAtom::new(-1.0, 0.0, 0.5, 1.5),
        ];
        let buffers = AtomBuffers::from_atoms(&atoms, 1.4).unwrap();
        assert_eq!(buffers.len(), 2);
        assert_eq!(buffers.coords[0], [1.0, 2.0, 3.0]);
        assert!((buffers.radii[0] - 3.2).abs() < 1e-12);
        assert!((buffers.radii[1] - 2.9).abs() < 1e-12);
        assert!((buffers.max_radius() - 3.2).abs() < 1e-12);
    }

    #[test]
    fn test_write_back_preserves_order() {
        let mut atoms = vec![SasaAtom::new(0.0, 0.0, 0.0, 1.0); 3];
        AtomBuffers::write_back(&mut atoms, &[1.0, 2.0, 3.0]);
        let access: Vec<f64> = atoms.iter().map(|a| a.access).collect();
        assert_eq!(access, vec![1.0, 2.0, 3.0]);
    }
}
