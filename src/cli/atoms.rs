use clap::Parser;
use solvacc::{get_atom_sasa, Error};

use super::{run_batch, SharedArgs};

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Calculate the accessible surface area of each atom")]
pub(crate) struct Args {
    #[command(flatten)]
    shared: SharedArgs,

    /// Name of the output file
    #[arg(short = 'f', long = "filename", default_value_t = String::from("sasa"))]
    filename: String,
}

pub(crate) fn run(args: &Args) -> Result<(), Error> {
    run_batch(&args.shared, &args.filename, get_atom_sasa)
}
