use crate::geometry::Geometry;
use crate::pixel::Pixel;

use ndarray::Array3;

/// A 3-D scalar sample grid with its physical geometry.
///
/// Samples are indexed `[i, j, k]` in the same axis order as the geometry's
/// extent. Volumes are constructed once and consumed read-only by every
/// pipeline stage.
#[derive(Debug, Clone)]
pub struct Volume<T> {
    data: Array3<T>,
    geometry: Geometry,
}

impl<T: Pixel> Volume<T> {
    /// Wrap a sample buffer with its geometry. The buffer's dimensions must
    /// match the geometry's extent.
    pub fn new(data: Array3<T>, geometry: Geometry) -> Self {
        debug_assert_eq!(data.dim(), geometry.dim());
        Self { data, geometry }
    }

    /// Get the dimensions of the volume as an extent-ordered tuple.
    pub fn dim(&self) -> (usize, usize, usize) {
        self.data.dim()
    }

    /// Get a reference to the underlying data.
    pub fn data(&self) -> &Array3<T> {
        &self.data
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Whether this volume shares its grid with `other` exactly, implying
    /// sample-index correspondence.
    pub fn same_grid<U: Pixel>(&self, other: &Volume<U>) -> bool {
        self.geometry.same_grid(other.geometry())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    #[test]
    fn same_grid_ignores_pixel_type() {
        let geometry = Geometry::axis_aligned([2, 3, 4], [1.0, 1.0, 1.0], [0.0, 0.0, 0.0]);
        let a = Volume::new(Array3::<u8>::zeros((2, 3, 4)), geometry.clone());
        let b = Volume::new(Array3::<f32>::zeros((2, 3, 4)), geometry);
        assert!(a.same_grid(&b));
    }

    #[test]
    fn differing_extent_is_not_same_grid() {
        let a = Volume::new(
            Array3::<u8>::zeros((2, 3, 4)),
            Geometry::axis_aligned([2, 3, 4], [1.0, 1.0, 1.0], [0.0, 0.0, 0.0]),
        );
        let b = Volume::new(
            Array3::<u8>::zeros((2, 3, 5)),
            Geometry::axis_aligned([2, 3, 5], [1.0, 1.0, 1.0], [0.0, 0.0, 0.0]),
        );
        assert!(!a.same_grid(&b));
    }
}
