use clap::Parser;
use solvacc::{get_residue_sasa, Error};

use super::{run_batch, SharedArgs};

#[derive(Parser, Debug, Clone)]
#[command(
    version,
    about = "Calculate absolute and relative accessibilities (RSA) of each residue"
)]
pub(crate) struct Args {
    #[command(flatten)]
    shared: SharedArgs,

    /// Name of the output file
    #[arg(short = 'f', long = "filename", default_value_t = String::from("relative_sasa"))]
    filename: String,
}

pub(crate) fn run(args: &Args) -> Result<(), Error> {
    run_batch(&args.shared, &args.filename, get_residue_sasa)
}
