//! Van der Waals radii and standard residue accessibilities.
//!
//! Radii are looked up by residue and atom name patterns, first match wins.
//! A table can be loaded from a plain text file with one record per line:
//!
//! ```text
//! # residue  atom  radius
//! RADIUS     *     N     1.65
//! RADIUS     PHE   CD*   1.76
//! # residue  total  [side-chain  main-chain]
//! STANDARD   ALA   129.0
//! ```
//!
//! `*` at the start of a pattern matches any name, a `*` elsewhere matches
//! the prefix in front of it.

use std::fmt;
use std::path::Path;

/// Built-in table: protein radii after Chothia (1976) as distributed with
/// NACCESS, and the theoretical maximum residue accessibilities of
/// Tien et al. (2013).
const EMBEDDED_TABLE: &str = "
# backbone
RADIUS  *    N     1.65
RADIUS  *    CA    1.87
RADIUS  *    C     1.76
RADIUS  *    O     1.40
RADIUS  *    OXT   1.40
RADIUS  *    OT*   1.40
# trigonal carbons
RADIUS  ARG  CZ    1.76
RADIUS  ASN  CG    1.76
RADIUS  ASP  CG    1.76
RADIUS  GLN  CD    1.76
RADIUS  GLU  CD    1.76
RADIUS  HIS  CG    1.76
RADIUS  HIS  CD2   1.76
RADIUS  HIS  CE1   1.76
RADIUS  PHE  CG    1.76
RADIUS  PHE  CD*   1.76
RADIUS  PHE  CE*   1.76
RADIUS  PHE  CZ    1.76
RADIUS  TRP  CG    1.76
RADIUS  TRP  CD*   1.76
RADIUS  TRP  CE*   1.76
RADIUS  TRP  CZ*   1.76
RADIUS  TRP  CH2   1.76
RADIUS  TYR  CG    1.76
RADIUS  TYR  CD*   1.76
RADIUS  TYR  CE*   1.76
RADIUS  TYR  CZ    1.76
# generic heavy atoms
RADIUS  *    C*    1.87
RADIUS  *    N*    1.65
RADIUS  *    O*    1.40
RADIUS  *    S*    1.85
RADIUS  *    SE*   1.80
RADIUS  *    P*    1.90
RADIUS  *    H*    1.00
RADIUS  *    D*    1.00
STANDARD  ALA  129.0
STANDARD  ARG  274.0
STANDARD  ASN  195.0
STANDARD  ASP  193.0
STANDARD  CYS  167.0
STANDARD  GLN  225.0
STANDARD  GLU  223.0
STANDARD  GLY  104.0
STANDARD  HIS  224.0
STANDARD  ILE  197.0
STANDARD  LEU  201.0
STANDARD  LYS  236.0
STANDARD  MET  224.0
STANDARD  PHE  240.0
STANDARD  PRO  159.0
STANDARD  SER  155.0
STANDARD  THR  172.0
STANDARD  TRP  285.0
STANDARD  TYR  263.0
STANDARD  VAL  174.0
";

/// Error type for reading a radii table.
#[derive(Debug)]
pub enum RadiiError {
    /// Failed to read the table file
    Io(std::io::Error),
    /// Malformed record
    Parse {
        /// 1-based line number
        line: usize,
        /// What was wrong with the line
        message: String,
    },
}

impl fmt::Display for RadiiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RadiiError::Io(e) => write!(f, "Failed to read radii table: {e}"),
            RadiiError::Parse { line, message } => {
                write!(f, "Malformed radii table at line {line}: {message}")
            }
        }
    }
}

impl std::error::Error for RadiiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RadiiError::Io(e) => Some(e),
            RadiiError::Parse { .. } => None,
        }
    }
}

impl From<std::io::Error> for RadiiError {
    fn from(err: std::io::Error) -> Self {
        RadiiError::Io(err)
    }
}

/// One `RADIUS` record.
#[derive(Clone, Debug, PartialEq)]
pub struct AtomRadius {
    /// Residue name pattern
    pub residue: String,
    /// Atom name pattern
    pub atom: String,
    /// van der Waals radius in Å
    pub radius: f64,
}

/// Reference accessibility of a residue in an extended conformation,
/// used as the denominator of relative accessibilities.
#[derive(Clone, Debug, PartialEq)]
pub struct StandardAccessibility {
    /// Residue name
    pub residue: String,
    /// Whole-residue accessibility in Å²
    pub total: f64,
    /// Side-chain accessibility in Å², if known
    pub side_chain: Option<f64>,
    /// Main-chain accessibility in Å², if known
    pub main_chain: Option<f64>,
}

/// Ordered radius patterns plus standard residue accessibilities.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RadiiTable {
    radii: Vec<AtomRadius>,
    standards: Vec<StandardAccessibility>,
}

impl RadiiTable {
    /// The built-in protein table.
    pub fn embedded() -> Self {
        Self::parse(EMBEDDED_TABLE).expect("embedded radii table is well formed")
    }

    /// Read a table from a text file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RadiiError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Parse a table from text in the format shown in the module docs.
    pub fn parse(text: &str) -> Result<Self, RadiiError> {
        let mut table = Self::default();
        for (i, raw) in text.lines().enumerate() {
            let line = raw.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split_whitespace().collect();
            let parse_err = |message: String| RadiiError::Parse {
                line: i + 1,
                message,
            };
            let number = |s: &str| {
                s.parse::<f64>()
                    .map_err(|e| parse_err(format!("invalid number {s:?}: {e}")))
            };

            match fields[0].to_uppercase().as_str() {
                "RADIUS" => {
                    if fields.len() != 4 {
                        return Err(parse_err(format!(
                            "expected `RADIUS <residue> <atom> <radius>`, got {} fields",
                            fields.len()
                        )));
                    }
                    let radius = number(fields[3])?;
                    if radius <= 0.0 {
                        return Err(parse_err(format!("radius must be positive, got {radius}")));
                    }
                    table.radii.push(AtomRadius {
                        residue: fields[1].to_uppercase(),
                        atom: fields[2].to_uppercase(),
                        radius,
                    });
                }
                "STANDARD" => {
                    let (side_chain, main_chain) = match fields.len() {
                        3 => (None, None),
                        5 => (Some(number(fields[3])?), Some(number(fields[4])?)),
                        n => {
                            return Err(parse_err(format!(
                                "expected `STANDARD <residue> <total> [<side> <main>]`, got {n} fields"
                            )))
                        }
                    };
                    table.standards.push(StandardAccessibility {
                        residue: fields[1].to_uppercase(),
                        total: number(fields[2])?,
                        side_chain,
                        main_chain,
                    });
                }
                other => return Err(parse_err(format!("unknown record type {other:?}"))),
            }
        }
        Ok(table)
    }

    /// Radius patterns in lookup order.
    pub fn radii(&self) -> &[AtomRadius] {
        &self.radii
    }

    /// Standard residue accessibilities.
    pub fn standards(&self) -> &[StandardAccessibility] {
        &self.standards
    }

    /// Radius of the first entry matching the residue and atom names.
    pub fn radius_for(&self, resn: &str, atomn: &str) -> Option<f64> {
        let resn = resn.trim().to_uppercase();
        let atomn = atomn.trim().to_uppercase();
        self.radii
            .iter()
            .find(|r| wildcard_match(&resn, &r.residue) && wildcard_match(&atomn, &r.atom))
            .map(|r| r.radius)
    }

    /// Standard accessibility of a residue, if the table has one.
    pub fn standard_for(&self, resn: &str) -> Option<&StandardAccessibility> {
        let resn = resn.trim().to_uppercase();
        self.standards.iter().find(|s| s.residue == resn)
    }
}

/// Wildcard match for residue/atom patterns.
/// `*` at start matches everything, `*` elsewhere matches the prefix.
pub fn wildcard_match(query: &str, pattern: &str) -> bool {
    let q = query.trim_end_matches(' ');
    let p = pattern.trim_end_matches(' ');

    if p.starts_with('*') {
        return true;
    }
    if let Some(star) = p.find('*') {
        return q.starts_with(&p[..star]);
    }
    q == p
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wildcards() {
        assert!(wildcard_match("ALA", "*"));
        assert!(wildcard_match("ALA", "***"));
        assert!(wildcard_match("CD1", "CD*"));
        assert!(wildcard_match("CD", "CD*"));
        assert!(!wildcard_match("C", "CD*"));
        assert!(wildcard_match("OXT ", "OXT"));
        assert!(!wildcard_match("OXT", "OX"));
    }

    #[test]
    fn test_embedded_table_lookups() {
        let table = RadiiTable::embedded();
        assert_eq!(table.radius_for("ALA", "N"), Some(1.65));
        assert_eq!(table.radius_for("ALA", "CA"), Some(1.87));
        assert_eq!(table.radius_for("ALA", "CB"), Some(1.87));
        assert_eq!(table.radius_for("PHE", "CE2"), Some(1.76));
        assert_eq!(table.radius_for("LEU", "CD1"), Some(1.87));
        assert_eq!(table.radius_for("lys", " nz "), Some(1.65));
        assert_eq!(table.radius_for("MET", "SD"), Some(1.85));
        assert_eq!(table.radius_for("ZN", "ZN"), None);
    }

    #[test]
    fn test_embedded_standards() {
        let table = RadiiTable::embedded();
        assert_eq!(table.standards().len(), 20);
        let gly = table.standard_for("GLY").unwrap();
        assert_eq!(gly.total, 104.0);
        assert_eq!(gly.side_chain, None);
        assert!(table.standard_for("HOH").is_none());
    }

    #[test]
    fn test_parse_custom_table() {
        let text = "
            # custom radii
            RADIUS  HEM  FE  1.47   # iron
            radius  *    *   1.80
            STANDARD ALA 108.0 38.5 69.4
        ";
        let table = RadiiTable::parse(text).unwrap();
        assert_eq!(table.radius_for("HEM", "FE"), Some(1.47));
        assert_eq!(table.radius_for("ALA", "CB"), Some(1.80));
        let ala = table.standard_for("ALA").unwrap();
        assert_eq!(ala.side_chain, Some(38.5));
        assert_eq!(ala.main_chain, Some(69.4));
    }

    #[test]
    fn test_parse_errors_report_line() {
        let err = RadiiTable::parse("RADIUS * N 1.65\nRADIUS * O\n").unwrap_err();
        assert!(matches!(err, RadiiError::Parse { line: 2, .. }));

        let err = RadiiTable::parse("RADIUS * N abc").unwrap_err();
        assert!(matches!(err, RadiiError::Parse { line: 1, .. }));

        let err = RadiiTable::parse("VOLUME * N 1.0").unwrap_err();
        assert!(err.to_string().contains("unknown record type"));

        let err = RadiiTable::parse("RADIUS * N -1.0").unwrap_err();
        assert!(err.to_string().contains("positive"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = RadiiTable::from_file("/nonexistent/radii.txt").unwrap_err();
        assert!(matches!(err, RadiiError::Io(_)));
    }
}
