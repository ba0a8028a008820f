//! Residue classification and per-residue accessibility totals.

use pdbtbx::*;

use crate::atoms::AtomRecord;
use crate::radii::RadiiTable;

/// Extra classification methods for pdbtbx residues.
pub trait ResidueExt {
    /// Whether the residue is a water molecule.
    fn is_water(&self) -> bool;
}

impl ResidueExt for Residue {
    fn is_water(&self) -> bool {
        matches!(
            self.name().unwrap_or("").to_uppercase().as_str(),
            "HOH" | "WAT" | "H2O" | "DOD" | "SOL"
        )
    }
}

/// Backbone atoms; everything else in a residue counts as side chain.
pub fn is_main_chain(atomn: &str) -> bool {
    matches!(atomn.trim(), "N" | "CA" | "C" | "O" | "OXT")
}

/// Summed atom areas of one residue, with relative values in percent of
/// the residue's standard accessibility where one is known.
#[derive(Debug, Clone, PartialEq)]
pub struct ResidueAccessibility {
    /// Chain identifier
    pub chain: String,
    /// Residue name
    pub resn: String,
    /// Residue serial number
    pub resi: isize,
    /// Insertion code, empty if none
    pub insertion: String,
    /// Summed area of all atoms
    pub all_abs: f64,
    /// `all_abs` in percent of the standard
    pub all_rel: Option<f64>,
    /// Summed area of side-chain atoms
    pub side_abs: f64,
    /// `side_abs` in percent of the standard
    pub side_rel: Option<f64>,
    /// Summed area of main-chain atoms
    pub main_abs: f64,
    /// `main_abs` in percent of the standard
    pub main_rel: Option<f64>,
}

fn relative(abs: f64, standard: Option<f64>) -> Option<f64> {
    standard
        .filter(|s| *s > 0.0)
        .map(|s| 100.0 * abs / s)
}

/// Sum per-atom areas into residues. Atoms of one residue must be
/// contiguous in `records`, as they are in a structure file.
pub fn aggregate_residues(
    records: &[AtomRecord],
    access: &[f64],
    table: &RadiiTable,
) -> Vec<ResidueAccessibility> {
    let mut residues: Vec<ResidueAccessibility> = Vec::new();
    let mut current_key = None;

    for (record, &area) in records.iter().zip(access) {
        let key = record.residue_key();
        if current_key != Some(key) {
            current_key = Some(key);
            residues.push(ResidueAccessibility {
                chain: record.chain.clone(),
                resn: record.resn.clone(),
                resi: record.resi,
                insertion: record.insertion.clone(),
                all_abs: 0.0,
                all_rel: None,
                side_abs: 0.0,
                side_rel: None,
                main_abs: 0.0,
                main_rel: None,
            });
        }
        let Some(residue) = residues.last_mut() else {
            continue;
        };
        residue.all_abs += area;
        if is_main_chain(&record.atomn) {
            residue.main_abs += area;
        } else {
            residue.side_abs += area;
        }
    }

    for residue in &mut residues {
        if let Some(standard) = table.standard_for(&residue.resn) {
            residue.all_rel = relative(residue.all_abs, Some(standard.total));
            residue.side_rel = relative(residue.side_abs, standard.side_chain);
            residue.main_rel = relative(residue.main_abs, standard.main_chain);
        }
    }
    residues
}
