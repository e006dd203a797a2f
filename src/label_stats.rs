use crate::geometry::GeometryError;
use crate::pixel::Pixel;
use crate::volume::Volume;

use ndarray::Zip;
use std::collections::BTreeMap;

/// Summary of one labelled region: voxel count, arithmetic mean and
/// standard deviation of the scalar image over the region.
///
/// The standard deviation uses the population form
/// `sqrt(sum_sq / count - mean^2)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelStatistics {
    pub count: u64,
    pub mean: f64,
    pub std_dev: f64,
}

#[derive(Default)]
struct Accumulator {
    count: u64,
    sum: f64,
    sum_sq: f64,
}

impl Accumulator {
    fn push(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;
        self.sum_sq += value * value;
    }

    fn finalize(&self) -> LabelStatistics {
        let count = self.count as f64;
        let mean = self.sum / count;
        let variance = (self.sum_sq / count - mean * mean).max(0.0);
        LabelStatistics {
            count: self.count,
            mean,
            std_dev: variance.sqrt(),
        }
    }
}

/// Computes per-label statistics of `image` over the regions of `labels`
/// in a single streaming pass.
///
/// A voxel's label is read from `labels` at the same grid index as the
/// sample in `image`. Only label ids carried by at least one voxel appear
/// in the result, so every record has `count >= 1`. Label 0 is not
/// special-cased here; background handling is the caller's policy.
///
/// # Errors
///
/// Returns an error if `image` and `labels` are not grid-compatible.
pub fn compute<T: Pixel>(
    image: &Volume<T>,
    labels: &Volume<u32>,
) -> Result<BTreeMap<u32, LabelStatistics>, GeometryError> {
    image
        .geometry()
        .ensure_same_grid(labels.geometry(), "label statistics")?;

    let mut accumulators: BTreeMap<u32, Accumulator> = BTreeMap::new();
    Zip::from(image.data())
        .and(labels.data())
        .for_each(|&value, &label| {
            accumulators.entry(label).or_default().push(value.to_f64());
        });

    Ok(accumulators
        .into_iter()
        .map(|(label, accumulator)| (label, accumulator.finalize()))
        .collect())
}
