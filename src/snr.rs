use crate::label_stats::LabelStatistics;

use std::collections::BTreeMap;
use std::f64::consts::FRAC_1_SQRT_2;
use std::fmt;

/// Outcome of the SNR formula: either a finite value or an explicit
/// undefined marker for operands the formula cannot represent (zero noise
/// deviation, a non-positive logarithm argument, or a non-finite result).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SnrResult {
    Defined(f64),
    Undefined,
}

impl SnrResult {
    pub fn is_defined(&self) -> bool {
        matches!(self, SnrResult::Defined(_))
    }
}

impl fmt::Display for SnrResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnrResult::Defined(value) => write!(f, "{value}"),
            SnrResult::Undefined => write!(f, "ERROR"),
        }
    }
}

/// Combines per-label statistics of the sum image (`add_stats`) and the
/// difference image (`sub_stats`) into the final scalar:
///
/// `snr = 10 * log10((1/sqrt(2)) * sum_mean / sum_stdv)`
///
/// where `sum_mean` sums the means of `add_stats` and `sum_stdv` the
/// standard deviations of `sub_stats`, each over its labels in ascending
/// id order with the background excluded. When `background` is `None` the
/// lowest label id present in each mapping is dropped, which matches the
/// usual convention of the background region carrying the lowest id.
pub fn compute(
    add_stats: &BTreeMap<u32, LabelStatistics>,
    sub_stats: &BTreeMap<u32, LabelStatistics>,
    background: Option<u32>,
) -> SnrResult {
    let sum_mean = fold_excluding(add_stats, background, |record| record.mean);
    let sum_stdv = fold_excluding(sub_stats, background, |record| record.std_dev);

    if sum_stdv == 0.0 {
        return SnrResult::Undefined;
    }
    let argument = FRAC_1_SQRT_2 * sum_mean / sum_stdv;
    if !(argument > 0.0) {
        return SnrResult::Undefined;
    }
    let snr = 10.0 * argument.log10();
    if snr.is_finite() {
        SnrResult::Defined(snr)
    } else {
        SnrResult::Undefined
    }
}

fn fold_excluding(
    stats: &BTreeMap<u32, LabelStatistics>,
    background: Option<u32>,
    value: impl Fn(&LabelStatistics) -> f64,
) -> f64 {
    // BTreeMap iterates in ascending id order, so the first key is the
    // lowest-valued label.
    let excluded = background.or_else(|| stats.keys().next().copied());
    stats
        .iter()
        .filter(|(label, _)| Some(**label) != excluded)
        .map(|(_, record)| value(record))
        .sum()
}
