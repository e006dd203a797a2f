use crate::geometry::{Geometry, GeometryError};
use crate::pixel::Pixel;
use crate::volume::Volume;

use ndarray::{Array3, Zip};

/// Pixel value used when a mapped coordinate falls outside the moving
/// volume's index domain.
const DEFAULT_PIXEL_VALUE: f64 = 0.0;

/// Maps `moving` onto the voxel grid of `reference`, evaluating it with
/// linear (first-order) interpolation.
///
/// The output always carries `reference`'s geometry. Each output sample is
/// the trilinear evaluation of `moving` at the physical coordinate of the
/// output voxel; no transform beyond the identity mapping between the two
/// physical coordinate systems is applied, so only grid and resolution
/// differences are corrected.
///
/// # Errors
///
/// Returns an error if `moving`'s direction matrix is singular.
pub fn resample<T: Pixel>(
    moving: &Volume<T>,
    reference: &Geometry,
) -> Result<Volume<T>, GeometryError> {
    let inverse = moving.geometry().direction_inverse()?;
    let mut data = Array3::from_elem(reference.dim(), T::ZERO);

    Zip::indexed(&mut data).par_for_each(|(i, j, k), sample| {
        let point = reference.index_to_physical([i as f64, j as f64, k as f64]);
        let index = moving.geometry().physical_to_index(&inverse, point);
        *sample = T::from_f64(evaluate(moving, index));
    });

    Ok(Volume::new(data, reference.clone()))
}

/// Trilinear evaluation of `volume` at a continuous grid index, weighting
/// the 2x2x2 neighborhood of surrounding integer indices by the fractional
/// offsets along each axis.
fn evaluate<T: Pixel>(volume: &Volume<T>, index: [f64; 3]) -> f64 {
    let (nx, ny, nz) = volume.dim();

    // NaN comparisons fail both bounds, so corrupt coordinates also take
    // the default value. A zero-extent axis has no valid index domain.
    for (coordinate, len) in index.iter().zip([nx, ny, nz]) {
        if len == 0 || !(*coordinate >= 0.0 && *coordinate <= (len - 1) as f64) {
            return DEFAULT_PIXEL_VALUE;
        }
    }

    let x0 = index[0].floor() as usize;
    let y0 = index[1].floor() as usize;
    let z0 = index[2].floor() as usize;
    let x1 = (x0 + 1).min(nx - 1);
    let y1 = (y0 + 1).min(ny - 1);
    let z1 = (z0 + 1).min(nz - 1);

    let dx = index[0] - x0 as f64;
    let dy = index[1] - y0 as f64;
    let dz = index[2] - z0 as f64;

    let data = volume.data();
    let at = |x: usize, y: usize, z: usize| data[[x, y, z]].to_f64();

    let c00 = lerp(at(x0, y0, z0), at(x1, y0, z0), dx);
    let c01 = lerp(at(x0, y0, z1), at(x1, y0, z1), dx);
    let c10 = lerp(at(x0, y1, z0), at(x1, y1, z0), dx);
    let c11 = lerp(at(x0, y1, z1), at(x1, y1, z1), dx);

    let c0 = lerp(c00, c10, dy);
    let c1 = lerp(c01, c11, dy);

    lerp(c0, c1, dz)
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a.mul_add(1.0 - t, b * t)
}
