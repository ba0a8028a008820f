pub(crate) mod atoms;
pub(crate) mod residues;

use clap::Parser;
use pdbtbx::PDB;
use polars::prelude::DataFrame;
use rayon::prelude::*;
use solvacc::{
    load_model, write_df_to_file, AccessSettings, DataFrameFileType, Error, RadiiTable,
    SurfaceMode,
};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, trace, warn};

/// Options shared by every subcommand.
#[derive(Parser, Debug, Clone)]
pub(crate) struct SharedArgs {
    /// Path(s) to the PDB or mmCIF file(s) to be analyzed
    #[arg(short, long, num_args = 1.., required = true)]
    input: Vec<PathBuf>,

    /// Output directory
    #[arg(short, long)]
    output: PathBuf,

    /// Output file type
    #[arg(short = 't', long, default_value_t = DataFrameFileType::Csv)]
    output_format: DataFrameFileType,

    /// Model number to analyze (default: 0, the first model)
    #[arg(short = 'm', long = "model", default_value_t = 0)]
    model_num: usize,

    /// Probe radius r (smaller r detects more surface details and reports a larger surface)
    #[arg(short = 'r', long = "probe-radius", default_value_t = 1.4)]
    probe_radius: f64,

    /// Slice thickness as a fraction of the atom diameter (smaller is more accurate)
    #[arg(short = 'a', long, default_value_t = 0.05)]
    accuracy: f64,

    /// Report contact areas instead of accessible surface areas
    #[arg(short = 'c', long)]
    contact: bool,

    /// Include HETATM records other than water
    #[arg(long)]
    hetatm: bool,

    /// Include hydrogen atoms
    #[arg(long)]
    hydrogens: bool,

    /// Include water molecules
    #[arg(long)]
    waters: bool,

    /// Radii table to use instead of the built-in one
    #[arg(long)]
    radii: Option<PathBuf>,

    /// Number of threads to use for parallel processing (0 for all cores)
    #[arg(short = 'j', long = "num-threads", default_value_t = 0)]
    num_threads: usize,
}

impl SharedArgs {
    fn settings(&self) -> AccessSettings {
        AccessSettings {
            probe_radius: self.probe_radius,
            accuracy: self.accuracy,
            mode: if self.contact {
                SurfaceMode::ContactArea
            } else {
                SurfaceMode::AccessibleSurfaceArea
            },
            model_num: self.model_num,
            include_hetatms: self.hetatm,
            include_hydrogens: self.hydrogens,
            include_waters: self.waters,
        }
    }

    fn radii_table(&self) -> Result<RadiiTable, Error> {
        match &self.radii {
            Some(path) => {
                debug!("Reading radii from {}", path.display());
                Ok(RadiiTable::from_file(path)?)
            }
            None => Ok(RadiiTable::embedded()),
        }
    }

    /// Output path for one input. A single input is written to `filename`,
    /// several inputs are prefixed with their file stems.
    fn output_file(&self, input: &Path, filename: &str) -> PathBuf {
        let name = if self.input.len() > 1 {
            let stem = input
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            format!("{stem}_{filename}")
        } else {
            filename.to_string()
        };
        self.output
            .join(name)
            .with_extension(self.output_format.to_string())
    }
}

/// Load every input, compute its table with `calculate` and write it out.
///
/// Files are processed in parallel. Failures are logged per file and the
/// first one is returned after all files were attempted.
pub(crate) fn run_batch<F>(args: &SharedArgs, filename: &str, calculate: F) -> Result<(), Error>
where
    F: Fn(&PDB, &RadiiTable, &AccessSettings) -> Result<DataFrame, Error> + Sync,
{
    trace!("{args:?}");

    if let Err(e) = rayon::ThreadPoolBuilder::new()
        .num_threads(args.num_threads)
        .build_global()
    {
        warn!("{e}");
    }
    debug!("Using {} thread(s)", rayon::current_num_threads());

    let table = args.radii_table()?;
    let settings = args.settings();
    std::fs::create_dir_all(&args.output)?;

    let results: Vec<Result<(), Error>> = args
        .input
        .par_iter()
        .map(|input| {
            let output_file = args.output_file(input, filename);
            process_file(input, &output_file, args.output_format, |pdb| {
                calculate(pdb, &table, &settings)
            })
            .inspect_err(|e| error!("{}: {e}", input.display()))
        })
        .collect();

    results.into_iter().collect::<Result<Vec<()>, Error>>()?;
    Ok(())
}

fn process_file<F>(
    input: &Path,
    output_file: &Path,
    output_format: DataFrameFileType,
    calculate: F,
) -> Result<(), Error>
where
    F: Fn(&PDB) -> Result<DataFrame, Error>,
{
    let input_file = input.canonicalize()?;
    debug!("Using input file {}", input_file.display());

    // Load file as complex structure
    let (pdb, pdb_warnings) =
        load_model(&input_file.to_string_lossy()).map_err(Error::Structure)?;
    pdb_warnings.iter().for_each(|e| match e.level() {
        pdbtbx::ErrorLevel::BreakingError => error!("{e}"),
        pdbtbx::ErrorLevel::InvalidatingError => error!("{e}"),
        _ => warn!("{e}"),
    });

    let mut df = calculate(&pdb)?;
    if df.is_empty() {
        warn!(
            "No atoms selected from {}. Please check the provided arguments, especially the model number.",
            input.display()
        );
    }
    debug!("{df}");

    write_df_to_file(&mut df, output_file, output_format)?;
    info!("Results saved to {}", output_file.display());
    Ok(())
}
