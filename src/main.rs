use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use snr_volume::pipeline;
use tracing::error;

/// Estimates the signal-to-noise ratio of a pair of co-registered volumes
/// over the regions of a label volume.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// First intensity volume; its grid and pixel type drive the pipeline
    input_volume1: PathBuf,
    /// Second intensity volume, resampled onto the first volume's grid
    input_volume2: PathBuf,
    /// Label volume identifying the regions of interest
    label_volume: PathBuf,
    /// Output file receiving the `SNR = <value>` record
    output_file: PathBuf,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt().with_target(false).init();
    let args = Args::parse();

    let result = match pipeline::run(
        &args.input_volume1,
        &args.input_volume2,
        &args.label_volume,
        None,
    ) {
        Ok(result) => result,
        Err(err) => {
            error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    // An undefined SNR is still a computed result; only I/O and geometry
    // failures exit non-zero.
    if let Err(err) = pipeline::write_result(&args.output_file, &result) {
        error!("{err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
