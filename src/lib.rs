//! # SNR-volume library
//!
//! This crate estimates a signal-to-noise ratio for a pair of co-registered
//! 3-D medical image volumes, using a label volume to identify the regions
//! of interest.
//!
//! The second intensity volume is resampled onto the first volume's voxel
//! grid with linear interpolation, a "signal" image (constrained pixelwise
//! sum) and a "noise" image (constrained pixelwise difference) are derived,
//! each labelled region is summarized by count, mean and standard deviation,
//! and the per-region summaries are combined into one scalar:
//!
//! ```text
//! snr = 10 * log10((1/sqrt(2)) * sum_mean / sum_stdv)
//! ```
//!
//! where `sum_mean` aggregates the sum image's region means and `sum_stdv`
//! the difference image's region deviations, with the background region
//! excluded from both. Operands the formula cannot represent (zero noise
//! deviation, a non-positive logarithm argument) yield an explicit
//! undefined marker rather than an error.
//!
//! Volumes are loaded from NIfTI files (`.nii` or `.nii.gz`) and the whole
//! pipeline is instantiated once for the pixel type the first volume
//! declares, for 8- to 64-bit signed and unsigned integers and 32/64-bit
//! floats. Voxel loops run in parallel using rayon where the environment
//! supports it.
//!
//! # Examples
//!
//! ## Measuring the SNR of two volumes
//!
//! Run the pipeline over two intensity volumes and a label volume, then
//! persist the outcome as a `SNR = <value>` record:
//!
//! ```no_run
//! # use snr_volume::pipeline;
//! # use std::path::Path;
//! let result = pipeline::run(
//!     Path::new("volume1.nii.gz"),
//!     Path::new("volume2.nii.gz"),
//!     Path::new("labels.nii.gz"),
//!     None,
//! )
//! .expect("should have measured the volume pair");
//! pipeline::write_result(Path::new("snr.txt"), &result)
//!     .expect("should have written the result record");
//! ```

pub mod arithmetic;
pub mod geometry;
pub mod label_stats;
pub mod pipeline;
pub mod pixel;
pub mod resample;
pub mod snr;
pub mod volume;
pub mod volume_loader;

pub use geometry::{Geometry, GeometryError};
pub use label_stats::LabelStatistics;
pub use pipeline::SnrError;
pub use pixel::Pixel;
pub use snr::SnrResult;
pub use volume::Volume;
