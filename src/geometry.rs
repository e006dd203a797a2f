use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeometryError {
    #[error("volumes do not share the same grid geometry during {0}")]
    Mismatch(&'static str),

    #[error("volume direction matrix is singular")]
    SingularDirection,
}

/// Physical placement of a volume's voxel grid: origin, voxel spacing,
/// direction cosines and voxel-count extent per axis.
///
/// Two volumes are grid-compatible only when all four fields match exactly,
/// which implies sample-index correspondence between them.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    pub origin: [f64; 3],
    pub spacing: [f64; 3],
    /// Row-major direction cosine matrix; column `j` is the physical
    /// direction of grid axis `j`.
    pub direction: [[f64; 3]; 3],
    pub extent: [usize; 3],
}

pub const IDENTITY_DIRECTION: [[f64; 3]; 3] =
    [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

impl Geometry {
    pub fn new(
        origin: [f64; 3],
        spacing: [f64; 3],
        direction: [[f64; 3]; 3],
        extent: [usize; 3],
    ) -> Self {
        Self {
            origin,
            spacing,
            direction,
            extent,
        }
    }

    /// Axis-aligned grid with an identity direction matrix.
    pub fn axis_aligned(extent: [usize; 3], spacing: [f64; 3], origin: [f64; 3]) -> Self {
        Self::new(origin, spacing, IDENTITY_DIRECTION, extent)
    }

    /// Extent as an ndarray-style dimension tuple.
    pub fn dim(&self) -> (usize, usize, usize) {
        (self.extent[0], self.extent[1], self.extent[2])
    }

    pub fn same_grid(&self, other: &Geometry) -> bool {
        self == other
    }

    pub fn ensure_same_grid(
        &self,
        other: &Geometry,
        context: &'static str,
    ) -> Result<(), GeometryError> {
        if self.same_grid(other) {
            Ok(())
        } else {
            Err(GeometryError::Mismatch(context))
        }
    }

    /// Maps a (possibly fractional) grid index to its physical coordinate.
    pub fn index_to_physical(&self, index: [f64; 3]) -> [f64; 3] {
        let scaled = [
            index[0] * self.spacing[0],
            index[1] * self.spacing[1],
            index[2] * self.spacing[2],
        ];
        let mut point = self.origin;
        for (row, coordinate) in self.direction.iter().zip(point.iter_mut()) {
            *coordinate += row[0] * scaled[0] + row[1] * scaled[1] + row[2] * scaled[2];
        }
        point
    }

    /// Maps a physical coordinate to a continuous grid index. The inverse
    /// direction matrix comes from [`Geometry::direction_inverse`].
    pub fn physical_to_index(&self, inverse: &[[f64; 3]; 3], point: [f64; 3]) -> [f64; 3] {
        let offset = [
            point[0] - self.origin[0],
            point[1] - self.origin[1],
            point[2] - self.origin[2],
        ];
        let mut index = [0.0; 3];
        for (axis, row) in inverse.iter().enumerate() {
            let rotated = row[0] * offset[0] + row[1] * offset[1] + row[2] * offset[2];
            index[axis] = rotated / self.spacing[axis];
        }
        index
    }

    /// Inverse of the direction cosine matrix.
    pub fn direction_inverse(&self) -> Result<[[f64; 3]; 3], GeometryError> {
        let d = &self.direction;
        let cofactor = |r0: usize, r1: usize, c0: usize, c1: usize| {
            d[r0][c0] * d[r1][c1] - d[r0][c1] * d[r1][c0]
        };
        let det = d[0][0] * cofactor(1, 2, 1, 2) - d[0][1] * cofactor(1, 2, 0, 2)
            + d[0][2] * cofactor(1, 2, 0, 1);
        if det.abs() < 1e-12 {
            return Err(GeometryError::SingularDirection);
        }
        let inv_det = 1.0 / det;
        Ok([
            [
                cofactor(1, 2, 1, 2) * inv_det,
                -cofactor(0, 2, 1, 2) * inv_det,
                cofactor(0, 1, 1, 2) * inv_det,
            ],
            [
                -cofactor(1, 2, 0, 2) * inv_det,
                cofactor(0, 2, 0, 2) * inv_det,
                -cofactor(0, 1, 0, 2) * inv_det,
            ],
            [
                cofactor(1, 2, 0, 1) * inv_det,
                -cofactor(0, 2, 0, 1) * inv_det,
                cofactor(0, 1, 0, 1) * inv_det,
            ],
        ])
    }
}
