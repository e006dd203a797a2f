use crate::geometry::GeometryError;
use crate::pixel::Pixel;
use crate::volume::Volume;

use ndarray::Zip;

/// Pixelwise constrained addition: `a[i] + b[i]`, clamped to the pixel
/// type's representable range instead of wrapping.
///
/// # Errors
///
/// Returns an error if the operands are not grid-compatible.
pub fn add<T: Pixel>(a: &Volume<T>, b: &Volume<T>) -> Result<Volume<T>, GeometryError> {
    a.geometry()
        .ensure_same_grid(b.geometry(), "constrained addition")?;
    let data = Zip::from(a.data())
        .and(b.data())
        .par_map_collect(|&x, &y| x.saturating_add(y));
    Ok(Volume::new(data, a.geometry().clone()))
}

/// Pixelwise constrained difference: `a[i] - b[i]`, clamped to the pixel
/// type's representable range; unsigned pixel types clamp negative results
/// to zero.
///
/// # Errors
///
/// Returns an error if the operands are not grid-compatible.
pub fn subtract<T: Pixel>(a: &Volume<T>, b: &Volume<T>) -> Result<Volume<T>, GeometryError> {
    a.geometry()
        .ensure_same_grid(b.geometry(), "constrained difference")?;
    let data = Zip::from(a.data())
        .and(b.data())
        .par_map_collect(|&x, &y| x.saturating_sub(y));
    Ok(Volume::new(data, a.geometry().clone()))
}
