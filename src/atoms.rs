//! Flattening a pdbtbx hierarchy into index-addressable atom records.

use std::collections::HashMap;

use nalgebra::Point3;
use pdbtbx::*;
use tracing::{debug, warn};

use crate::radii::RadiiTable;
use crate::residues::ResidueExt;
use crate::settings::AccessSettings;
use crate::surface::SasaAtom;

/// One atom of the selected model, with the radius it was assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomRecord {
    /// Chain identifier
    pub chain: String,
    /// Residue name
    pub resn: String,
    /// Residue serial number
    pub resi: isize,
    /// Insertion code, empty if none
    pub insertion: String,
    /// Alternate location identifier, empty if none
    pub altloc: String,
    /// Atom name
    pub atomn: String,
    /// Atom serial number
    pub atomi: usize,
    /// Whether the atom came from a HETATM record
    pub hetero: bool,
    /// Cartesian coordinates in Å
    pub position: Point3<f64>,
    /// van der Waals radius in Å
    pub radius: f64,
}

impl AtomRecord {
    /// Input atom for [`crate::surface::compute_areas`].
    pub fn to_sasa_atom(&self) -> SasaAtom {
        SasaAtom {
            position: self.position,
            radius: self.radius,
            access: 0.0,
        }
    }

    /// Key identifying the residue this atom belongs to.
    pub fn residue_key(&self) -> (&str, isize, &str) {
        (&self.chain, self.resi, &self.insertion)
    }
}

/// Resolve the model number, where 0 means the first model in the file.
pub fn resolve_model_num(pdb: &PDB, model_num: usize) -> usize {
    if model_num == 0 {
        pdb.models().next().map_or(0, |m| m.serial_number())
    } else {
        model_num
    }
}

/// Collect the atoms of the requested model in file order.
///
/// Waters, other hetero atoms and hydrogens are dropped unless enabled in
/// `settings`. Only the first alternate location of each residue is kept.
/// Radii come from `table`, falling back to the element's van der Waals
/// radius; atoms without either are skipped.
pub fn collect_atoms(pdb: &PDB, table: &RadiiTable, settings: &AccessSettings) -> Vec<AtomRecord> {
    let model_num = resolve_model_num(pdb, settings.model_num);
    let mut first_altloc: HashMap<(String, isize, String), String> = HashMap::new();
    let mut records = Vec::new();

    for hier in pdb
        .atoms_with_hierarchy()
        .filter(|x| x.model().serial_number() == model_num)
    {
        let atom = hier.atom();
        let residue = hier.residue();

        if residue.is_water() {
            if !settings.include_waters {
                continue;
            }
        } else if atom.hetero() && !settings.include_hetatms {
            continue;
        }
        if atom.element() == Some(&Element::H) && !settings.include_hydrogens {
            continue;
        }

        let chain = hier.chain().id().to_string();
        let (resi, insertion) = residue.id();
        let insertion = insertion.unwrap_or("").to_string();
        let altloc = hier.conformer().alternative_location().unwrap_or("");
        if !altloc.is_empty() {
            let kept = first_altloc
                .entry((chain.clone(), resi, insertion.clone()))
                .or_insert_with(|| altloc.to_string());
            if kept.as_str() != altloc {
                continue;
            }
        }

        let resn = residue.name().unwrap_or("UNK");
        let radius = match table.radius_for(resn, atom.name()) {
            Some(r) => r,
            None => match atom.element().and_then(|e| e.atomic_radius().van_der_waals) {
                Some(r) => r,
                None => {
                    warn!(
                        "No radius for {resn}:{} (atom {}), skipping",
                        atom.name(),
                        atom.serial_number()
                    );
                    continue;
                }
            },
        };

        let pos = atom.pos();
        records.push(AtomRecord {
            chain,
            resn: resn.to_string(),
            resi,
            insertion,
            altloc: altloc.to_string(),
            atomn: atom.name().to_string(),
            atomi: atom.serial_number(),
            hetero: atom.hetero(),
            position: Point3::new(pos.0, pos.1, pos.2),
            radius,
        });
    }

    debug!("Collected {} atoms from model {model_num}", records.len());
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::load_model;

    fn load_tripeptide() -> PDB {
        let root = env!("CARGO_MANIFEST_DIR");
        let path = format!("{}/{}", root, "test-data/tripeptide.pdb");
        let (pdb, _) = load_model(&path).unwrap();
        pdb
    }

    #[test]
    fn test_default_filters_drop_water_and_ligand() {
        let pdb = load_tripeptide();
        let records = collect_atoms(&pdb, &RadiiTable::embedded(), &AccessSettings::default());
        assert_eq!(records.len(), 16);
        assert!(records.iter().all(|r| r.resn != "HOH" && r.resn != "ZN"));
        assert!(records.iter().all(|r| !r.atomn.starts_with('H')));
    }

    #[test]
    fn test_optional_atoms_can_be_included() {
        let pdb = load_tripeptide();
        let settings = AccessSettings {
            include_hetatms: true,
            include_hydrogens: true,
            include_waters: true,
            ..Default::default()
        };
        let records = collect_atoms(&pdb, &RadiiTable::embedded(), &settings);
        assert_eq!(records.len(), 19);

        let zinc = records.iter().find(|r| r.resn == "ZN").unwrap();
        assert!(zinc.hetero);
        let hydrogen = records.iter().find(|r| r.atomn == "H").unwrap();
        assert!((hydrogen.radius - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_only_first_altloc_is_kept() {
        let pdb = load_tripeptide();
        let records = collect_atoms(&pdb, &RadiiTable::embedded(), &AccessSettings::default());
        let og: Vec<&AtomRecord> = records.iter().filter(|r| r.atomn == "OG").collect();
        assert_eq!(og.len(), 1);
        assert_eq!(og[0].altloc, "A");
    }

    #[test]
    fn test_records_keep_file_order_and_radii() {
        let pdb = load_tripeptide();
        let records = collect_atoms(&pdb, &RadiiTable::embedded(), &AccessSettings::default());
        assert_eq!(records[0].atomn, "N");
        assert_eq!(records[0].resn, "ALA");
        assert!((records[0].radius - 1.65).abs() < 1e-12);
        assert!(records.windows(2).all(|w| w[0].atomi < w[1].atomi));
    }

    #[test]
    fn test_second_model_can_be_selected() {
        let pdb = load_tripeptide();
        assert_eq!(resolve_model_num(&pdb, 0), 1);
        let settings = AccessSettings {
            model_num: 2,
            ..Default::default()
        };
        let records = collect_atoms(&pdb, &RadiiTable::embedded(), &settings);
        assert_eq!(records.len(), 16);
        assert!((records[0].position.x + 5.6).abs() < 1e-9);
    }
}
