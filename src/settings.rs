//! Calculation settings.

use crate::surface::{SurfaceMode, DEFAULT_ACCURACY, WATER_PROBE_RADIUS};

/// Options for the structure-level calculation.
#[derive(Clone, Debug, PartialEq)]
pub struct AccessSettings {
    /// Probe radius in Å (0 gives bare van der Waals surfaces)
    pub probe_radius: f64,
    /// Slice thickness as a fraction of each atom's diameter
    pub accuracy: f64,
    /// Report contact areas or accessible surface areas
    pub mode: SurfaceMode,
    /// Model serial number to analyze (0 for the first model)
    pub model_num: usize,
    /// Keep HETATM records other than water
    pub include_hetatms: bool,
    /// Keep hydrogen atoms
    pub include_hydrogens: bool,
    /// Keep water molecules
    pub include_waters: bool,
}

impl Default for AccessSettings {
    fn default() -> Self {
        Self {
            probe_radius: WATER_PROBE_RADIUS,
            accuracy: DEFAULT_ACCURACY,
            mode: SurfaceMode::AccessibleSurfaceArea,
            model_num: 0,
            include_hetatms: false,
            include_hydrogens: false,
            include_waters: false,
        }
    }
}
