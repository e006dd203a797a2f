use crate::geometry::{Geometry, IDENTITY_DIRECTION};
use crate::pixel::Pixel;
use crate::volume::Volume;

use ndarray::{Axis, Ix3};
use nifti::volume::ndarray::IntoNdArray;
use nifti::{
    DataElement, InMemNiftiObject, NiftiError, NiftiHeader, NiftiObject, NiftiType, ReaderOptions,
};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VolumeLoaderError {
    #[error("unsupported pixel type {0:?}")]
    UnsupportedPixelType(NiftiType),

    #[error("expected a 3-D volume, got {0} dimensions")]
    NotThreeDimensional(usize),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("NIfTI error: {0}")]
    Nifti(#[from] NiftiError),
}

/// Reads a NIfTI object into memory without converting its samples yet, so
/// the caller can inspect the declared pixel type first.
pub fn open(path: impl AsRef<Path>) -> Result<InMemNiftiObject, VolumeLoaderError> {
    Ok(ReaderOptions::new().read_file(path.as_ref())?)
}

/// The pixel type the file declares for its samples, used to select the
/// typed pipeline once per run.
pub fn declared_pixel_type(object: &InMemNiftiObject) -> Result<NiftiType, VolumeLoaderError> {
    Ok(object.header().data_type()?)
}

/// Loads a volume from a NIfTI file (`.nii` or `.nii.gz`), converting the
/// samples to `T`.
///
/// # Errors
///
/// Returns an error if the file is missing or corrupt, or if the data is
/// not three-dimensional.
pub fn load<T: Pixel + DataElement>(
    path: impl AsRef<Path>,
) -> Result<Volume<T>, VolumeLoaderError> {
    from_object(open(path)?)
}

/// Converts an already-read NIfTI object into a [`Volume`].
///
/// Trailing axes of length 1 (a degenerate time dimension) are squeezed
/// away; anything else beyond three dimensions is rejected.
pub fn from_object<T: Pixel + DataElement>(
    object: InMemNiftiObject,
) -> Result<Volume<T>, VolumeLoaderError> {
    let header = object.header().clone();
    let mut data = object.into_volume().into_ndarray::<T>()?;
    while data.ndim() > 3 && data.shape()[data.ndim() - 1] == 1 {
        let last = data.ndim() - 1;
        data = data.index_axis_move(Axis(last), 0);
    }
    let ndim = data.ndim();
    let data = data
        .into_dimensionality::<Ix3>()
        .map_err(|_| VolumeLoaderError::NotThreeDimensional(ndim))?;

    let (nx, ny, nz) = data.dim();
    let geometry = geometry_from_header(&header, [nx, ny, nz]);
    Ok(Volume::new(data, geometry))
}

/// Grid geometry from the NIfTI header: spacing from `pixdim`, origin and
/// direction from the sform rows when present, otherwise the quaternion
/// offset origin with an identity direction.
fn geometry_from_header(header: &NiftiHeader, extent: [usize; 3]) -> Geometry {
    let spacing = [
        header.pixdim[1] as f64,
        header.pixdim[2] as f64,
        header.pixdim[3] as f64,
    ];
    if header.sform_code > 0 {
        let rows = [header.srow_x, header.srow_y, header.srow_z];
        let origin = [rows[0][3] as f64, rows[1][3] as f64, rows[2][3] as f64];
        let mut direction = [[0.0; 3]; 3];
        for (axis, row) in rows.iter().enumerate() {
            for (column, direction_entry) in direction[axis].iter_mut().enumerate() {
                // sform columns are direction cosines scaled by spacing.
                *direction_entry = if spacing[column] != 0.0 {
                    row[column] as f64 / spacing[column]
                } else {
                    row[column] as f64
                };
            }
        }
        Geometry::new(origin, spacing, direction, extent)
    } else {
        let origin = [
            header.quatern_x as f64,
            header.quatern_y as f64,
            header.quatern_z as f64,
        ];
        Geometry::new(origin, spacing, IDENTITY_DIRECTION, extent)
    }
}
