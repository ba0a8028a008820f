#![warn(missing_docs)]

//! # Solvacc Library
//!
//! Solvent accessible surface areas and contact areas of macromolecules,
//! computed with the slicing method of Lee & Richards (1971).
//!
//! The [`surface`] module contains the calculation itself and works on any
//! set of spheres. The functions at the crate root run it on PDB and mmCIF
//! structures loaded with pdbtbx and return the results as Polars
//! DataFrames.

pub mod atoms;
mod error;
pub mod radii;
pub mod residues;
pub mod settings;
pub mod surface;
mod utils;

// Re-export key public types
pub use atoms::{collect_atoms, AtomRecord};
pub use error::Error;
pub use radii::{RadiiError, RadiiTable};
pub use residues::{aggregate_residues, ResidueAccessibility};
pub use settings::AccessSettings;
pub use surface::{compute_accessibility, AccessibilityError, SasaAtom, SurfaceMode};
pub use utils::{load_model, sum_column, write_df_to_file, DataFrameFileType};

use pdbtbx::*;
use polars::prelude::*;
use tracing::debug;

/// Run the surface calculation on the selected model of a structure.
///
/// # Returns
///
/// The collected atom records and one area per record, in the same order.
pub fn atom_accessibility(
    pdb: &PDB,
    table: &RadiiTable,
    settings: &AccessSettings,
) -> Result<(Vec<AtomRecord>, Vec<f64>), Error> {
    let records = collect_atoms(pdb, table, settings);
    let atoms: Vec<SasaAtom> = records.iter().map(AtomRecord::to_sasa_atom).collect();
    let areas = surface::compute_areas(
        &atoms,
        settings.accuracy,
        settings.probe_radius,
        settings.mode,
    )?;
    debug!(
        "Total {:?} of {} atoms: {:.2} Å²",
        settings.mode,
        records.len(),
        areas.iter().sum::<f64>()
    );
    Ok((records, areas))
}

/// Calculate the accessible surface area (or contact area) of each atom.
///
/// # Arguments
///
/// * `pdb` - Reference to a PDB structure
/// * `table` - Radii used for every atom
/// * `settings` - Probe radius, accuracy, surface mode, model and atom filters
///
/// # Returns
///
/// A Polars DataFrame with columns:
/// - chain, resn, resi, insertion, altloc, atomn, atomi, radius, sasa
///
/// # Example
///
/// ```no_run
/// use solvacc::{load_model, get_atom_sasa, AccessSettings, RadiiTable};
///
/// let (pdb, _errors) = load_model("path/to/structure.pdb").unwrap();
/// let df = get_atom_sasa(&pdb, &RadiiTable::embedded(), &AccessSettings::default()).unwrap();
/// println!("Calculated SASA for {} atoms", df.height());
/// ```
pub fn get_atom_sasa(
    pdb: &PDB,
    table: &RadiiTable,
    settings: &AccessSettings,
) -> Result<DataFrame, Error> {
    let (records, areas) = atom_accessibility(pdb, table, settings)?;
    let df = df!(
        "chain" => records.iter().map(|x| x.chain.to_owned()).collect::<Vec<String>>(),
        "resn" => records.iter().map(|x| x.resn.to_owned()).collect::<Vec<String>>(),
        "resi" => records.iter().map(|x| x.resi as i32).collect::<Vec<i32>>(),
        "insertion" => records.iter().map(|x| x.insertion.to_owned()).collect::<Vec<String>>(),
        "altloc" => records.iter().map(|x| x.altloc.to_owned()).collect::<Vec<String>>(),
        "atomn" => records.iter().map(|x| x.atomn.to_owned()).collect::<Vec<String>>(),
        "atomi" => records.iter().map(|x| x.atomi as i32).collect::<Vec<i32>>(),
        "radius" => records.iter().map(|x| x.radius).collect::<Vec<f64>>(),
        "sasa" => areas,
    )?;
    Ok(df)
}

/// Calculate per-residue totals and relative accessibilities.
///
/// # Returns
///
/// A Polars DataFrame with columns:
/// - chain, resn, resi, insertion
/// - `all_abs`, `all_rel`, `side_abs`, `side_rel`, `main_abs`, `main_rel`
///
/// Relative values are percentages of the standard accessibility in `table`
/// and are null for residues without one.
///
/// # Example
///
/// ```no_run
/// use solvacc::{load_model, get_residue_sasa, AccessSettings, RadiiTable};
///
/// let (pdb, _errors) = load_model("path/to/structure.pdb").unwrap();
/// let df = get_residue_sasa(&pdb, &RadiiTable::embedded(), &AccessSettings::default()).unwrap();
/// println!("Calculated SASA for {} residues", df.height());
/// ```
pub fn get_residue_sasa(
    pdb: &PDB,
    table: &RadiiTable,
    settings: &AccessSettings,
) -> Result<DataFrame, Error> {
    let (records, areas) = atom_accessibility(pdb, table, settings)?;
    let residues = aggregate_residues(&records, &areas, table);
    let df = df!(
        "chain" => residues.iter().map(|x| x.chain.to_owned()).collect::<Vec<String>>(),
        "resn" => residues.iter().map(|x| x.resn.to_owned()).collect::<Vec<String>>(),
        "resi" => residues.iter().map(|x| x.resi as i32).collect::<Vec<i32>>(),
        "insertion" => residues.iter().map(|x| x.insertion.to_owned()).collect::<Vec<String>>(),
        "all_abs" => residues.iter().map(|x| x.all_abs).collect::<Vec<f64>>(),
        "all_rel" => residues.iter().map(|x| x.all_rel).collect::<Vec<Option<f64>>>(),
        "side_abs" => residues.iter().map(|x| x.side_abs).collect::<Vec<f64>>(),
        "side_rel" => residues.iter().map(|x| x.side_rel).collect::<Vec<Option<f64>>>(),
        "main_abs" => residues.iter().map(|x| x.main_abs).collect::<Vec<f64>>(),
        "main_rel" => residues.iter().map(|x| x.main_rel).collect::<Vec<Option<f64>>>(),
    )?;
    Ok(df)
}
