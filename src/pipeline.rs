use crate::geometry::GeometryError;
use crate::pixel::Pixel;
use crate::snr::{self, SnrResult};
use crate::volume_loader::{self, VolumeLoaderError};
use crate::{arithmetic, label_stats, resample};

use nifti::{DataElement, InMemNiftiObject, NiftiType};
use std::io::Write;
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum SnrError {
    #[error("failed to load volume: {0}")]
    Load(#[from] VolumeLoaderError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Runs the whole measurement: loads the three volumes, aligns the second
/// intensity volume onto the first volume's grid, derives the sum and
/// difference images, summarizes them per label and combines the summaries
/// into the SNR.
///
/// The pipeline is instantiated once for the pixel type the first volume
/// declares; the second volume is converted to the same type, the label
/// volume to `u32` ids. `background` optionally names the label to exclude
/// as background; without it the lowest id present is excluded.
///
/// An undefined SNR is a legitimate outcome, not an error.
pub fn run(
    input_volume1: &Path,
    input_volume2: &Path,
    label_volume: &Path,
    background: Option<u32>,
) -> Result<SnrResult, SnrError> {
    info!("Reading Volume 1");
    let object = volume_loader::open(input_volume1)?;
    let pixel_type = volume_loader::declared_pixel_type(&object)?;

    match pixel_type {
        NiftiType::Uint8 => run_typed::<u8>(object, input_volume2, label_volume, background),
        NiftiType::Int8 => run_typed::<i8>(object, input_volume2, label_volume, background),
        NiftiType::Uint16 => run_typed::<u16>(object, input_volume2, label_volume, background),
        NiftiType::Int16 => run_typed::<i16>(object, input_volume2, label_volume, background),
        NiftiType::Uint32 => run_typed::<u32>(object, input_volume2, label_volume, background),
        NiftiType::Int32 => run_typed::<i32>(object, input_volume2, label_volume, background),
        NiftiType::Uint64 => run_typed::<u64>(object, input_volume2, label_volume, background),
        NiftiType::Int64 => run_typed::<i64>(object, input_volume2, label_volume, background),
        NiftiType::Float32 => run_typed::<f32>(object, input_volume2, label_volume, background),
        NiftiType::Float64 => run_typed::<f64>(object, input_volume2, label_volume, background),
        other => Err(VolumeLoaderError::UnsupportedPixelType(other).into()),
    }
}

fn run_typed<T: Pixel + DataElement>(
    object: InMemNiftiObject,
    input_volume2: &Path,
    label_volume: &Path,
    background: Option<u32>,
) -> Result<SnrResult, SnrError> {
    let volume1 = volume_loader::from_object::<T>(object)?;
    info!("Reading Volume 2");
    let volume2 = volume_loader::load::<T>(input_volume2)?;
    info!("Reading Volume 3");
    let labels = volume_loader::load::<u32>(label_volume)?;

    info!("Resampling");
    let resampled = resample::resample(&volume2, volume1.geometry())?;
    info!("Subtracting");
    let difference = arithmetic::subtract(&volume1, &resampled)?;
    info!("Adding");
    let sum = arithmetic::add(&volume1, &resampled)?;

    let add_stats = label_stats::compute(&sum, &labels)?;
    let sub_stats = label_stats::compute(&difference, &labels)?;

    Ok(snr::compute(&add_stats, &sub_stats, background))
}

/// Persists the outcome as the textual record callers parse: the literal
/// line `SNR = <value>` when defined, `SNR = ERROR` when undefined.
pub fn write_result(path: &Path, result: &SnrResult) -> Result<(), std::io::Error> {
    let mut file = std::fs::File::create(path)?;
    writeln!(file, "SNR = {result}")
}
