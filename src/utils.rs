use pdbtbx::*;
use polars::prelude::*;
use std::path::Path;

use crate::error::Error;

/// Sum a float column of a DataFrame using polars lazy aggregation.
///
/// # Arguments
///
/// * `df` - DataFrame containing the column
/// * `column` - Name of a `f64` column
///
/// # Returns
///
/// The sum of all values, or 0.0 if the column is empty.
pub fn sum_column(df: &DataFrame, column: &str) -> Result<f64, Error> {
    let summed = df.clone().lazy().select([col(column).sum()]).collect()?;
    Ok(summed.column(column)?.f64()?.get(0).unwrap_or(0.0))
}

/// Open an atomic data file with [`pdbtbx::ReadOptions`].
///
/// Hetero atoms and waters are kept; filtering happens when atoms are
/// collected for the calculation.
pub fn load_model(input_file: &str) -> Result<(PDB, Vec<PDBError>), Vec<PDBError>> {
    pdbtbx::ReadOptions::default()
        .set_only_atomic_coords(true)
        .set_level(pdbtbx::StrictnessLevel::Loose)
        .read(input_file)
}

/// Write a DataFrame to a file of the given type.
pub fn write_df_to_file(
    df: &mut DataFrame,
    file_path: &Path,
    file_type: DataFrameFileType,
) -> Result<(), Error> {
    let file_suffix = file_type.to_string();
    let mut file = std::fs::File::create(file_path.with_extension(file_suffix))?;
    match file_type {
        DataFrameFileType::Csv => {
            CsvWriter::new(&mut file).finish(df)?;
        }
        DataFrameFileType::Parquet => {
            ParquetWriter::new(&mut file).finish(df)?;
        }
        DataFrameFileType::Json => {
            JsonWriter::new(&mut file)
                .with_json_format(JsonFormat::Json)
                .finish(df)?;
        }
        DataFrameFileType::NDJson => {
            JsonWriter::new(&mut file)
                .with_json_format(JsonFormat::JsonLines)
                .finish(df)?;
        }
    }
    Ok(())
}

/// File format for writing DataFrames.
#[derive(clap::ValueEnum, Clone, Debug, Copy)]
pub enum DataFrameFileType {
    /// Comma-separated values
    Csv,
    /// Parquet columnar storage
    Parquet,
    /// Standard JSON
    Json,
    /// Newline-delimited JSON
    #[value(name = "ndjson")]
    NDJson,
}

impl std::fmt::Display for DataFrameFileType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            DataFrameFileType::Csv => write!(f, "csv"),
            DataFrameFileType::Parquet => write!(f, "parquet"),
            DataFrameFileType::Json => write!(f, "json"),
            DataFrameFileType::NDJson => write!(f, "ndjson"),
        }
    }
}
