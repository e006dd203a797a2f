//! End-to-end coverage of the measurement pipeline over in-memory volumes,
//! plus the textual result-record contract.

use approx::assert_relative_eq;
use ndarray::Array3;
use nifti::NiftiHeader;
use nifti::writer::WriterOptions;
use snr_volume::geometry::Geometry;
use snr_volume::snr::SnrResult;
use snr_volume::volume::Volume;
use snr_volume::{arithmetic, label_stats, pipeline, resample, snr};
use tempfile::tempdir;

fn grid_4x4x4() -> Geometry {
    Geometry::axis_aligned([4, 4, 4], [1.0, 1.0, 1.0], [0.0, 0.0, 0.0])
}

/// Labels splitting the volume into two halves along the first axis.
fn half_and_half_labels() -> Volume<u32> {
    let data = Array3::from_shape_fn((4, 4, 4), |(i, _, _)| if i < 2 { 1u32 } else { 2 });
    Volume::new(data, grid_4x4x4())
}

#[test]
fn identical_constant_volumes_yield_the_undefined_marker() {
    let volume1 = Volume::new(Array3::from_elem((4, 4, 4), 100.0f32), grid_4x4x4());
    let volume2 = volume1.clone();
    let labels = half_and_half_labels();

    let resampled = resample::resample(&volume2, volume1.geometry()).unwrap();
    let sum = arithmetic::add(&volume1, &resampled).unwrap();
    let difference = arithmetic::subtract(&volume1, &resampled).unwrap();

    let add_stats = label_stats::compute(&sum, &labels).unwrap();
    let sub_stats = label_stats::compute(&difference, &labels).unwrap();

    for record in add_stats.values() {
        assert_relative_eq!(record.mean, 200.0);
    }
    for record in sub_stats.values() {
        assert_relative_eq!(record.std_dev, 0.0);
    }

    let result = snr::compute(&add_stats, &sub_stats, None);
    assert_eq!(result, SnrResult::Undefined);

    let dir = tempdir().unwrap();
    let path = dir.path().join("snr.txt");
    pipeline::write_result(&path, &result).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "SNR = ERROR\n");
}

#[test]
fn noisy_volume_pair_yields_the_formula_value() {
    let volume1 = Volume::new(Array3::from_elem((4, 4, 4), 100.0f32), grid_4x4x4());
    // Half the voxels of each region sit 2 above the first volume, so every
    // region's difference image carries values {0, -2}.
    let volume2 = Volume::new(
        Array3::from_shape_fn((4, 4, 4), |(_, j, k)| 100.0 + ((j + k) % 2) as f32 * 2.0),
        grid_4x4x4(),
    );
    let labels = half_and_half_labels();

    let resampled = resample::resample(&volume2, volume1.geometry()).unwrap();
    let sum = arithmetic::add(&volume1, &resampled).unwrap();
    let difference = arithmetic::subtract(&volume1, &resampled).unwrap();

    let add_stats = label_stats::compute(&sum, &labels).unwrap();
    let sub_stats = label_stats::compute(&difference, &labels).unwrap();

    // Label 1 is the lowest id and drops out of both sums; label 2's sum
    // mean is 201 and its difference deviation is 1.
    assert_relative_eq!(add_stats[&2].mean, 201.0);
    assert_relative_eq!(sub_stats[&2].std_dev, 1.0);

    let expected = 10.0 * (201.0 / f64::sqrt(2.0)).log10();
    match snr::compute(&add_stats, &sub_stats, None) {
        SnrResult::Defined(value) => assert_relative_eq!(value, expected, epsilon = 1e-9),
        SnrResult::Undefined => panic!("expected a defined result"),
    }
}

#[test]
fn pipeline_runs_from_files_and_records_the_undefined_marker() {
    // Unit spacing at the origin without an sform, shared by all three
    // files so their grids compare equal after loading.
    let header = NiftiHeader {
        pixdim: [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0],
        sform_code: 0,
        ..NiftiHeader::default()
    };
    let dir = tempdir().unwrap();
    let volume1_path = dir.path().join("volume1.nii");
    let volume2_path = dir.path().join("volume2.nii");
    let labels_path = dir.path().join("labels.nii");

    // Volume 1 declares f32 and drives the dispatch; volume 2 and the
    // labels are stored as u16 and converted on load.
    WriterOptions::new(&volume1_path)
        .reference_header(&header)
        .write_nifti(&Array3::from_elem((4, 4, 4), 100.0f32))
        .unwrap();
    WriterOptions::new(&volume2_path)
        .reference_header(&header)
        .write_nifti(&Array3::from_elem((4, 4, 4), 100u16))
        .unwrap();
    let label_data = Array3::from_shape_fn((4, 4, 4), |(i, _, _)| if i < 2 { 1u16 } else { 2 });
    WriterOptions::new(&labels_path)
        .reference_header(&header)
        .write_nifti(&label_data)
        .unwrap();

    let result = pipeline::run(&volume1_path, &volume2_path, &labels_path, None).unwrap();
    assert_eq!(result, SnrResult::Undefined);

    let record_path = dir.path().join("snr.txt");
    pipeline::write_result(&record_path, &result).unwrap();
    assert_eq!(
        std::fs::read_to_string(&record_path).unwrap(),
        "SNR = ERROR\n"
    );
}

#[test]
fn defined_results_are_written_as_a_key_value_line() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("snr.txt");
    pipeline::write_result(&path, &SnrResult::Defined(8.5)).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "SNR = 8.5\n");
}

#[test]
fn saturating_stages_feed_saturated_values_into_statistics() {
    // Two maximum-valued u8 volumes: the sum image must clamp at 255, so
    // the region mean reflects the clamp rather than a wrapped value.
    let geometry = Geometry::axis_aligned([2, 2, 2], [1.0, 1.0, 1.0], [0.0, 0.0, 0.0]);
    let volume1 = Volume::new(Array3::from_elem((2, 2, 2), u8::MAX), geometry.clone());
    let volume2 = volume1.clone();
    let labels = Volume::new(
        Array3::from_shape_fn((2, 2, 2), |(i, _, _)| i as u32),
        geometry.clone(),
    );

    let resampled = resample::resample(&volume2, volume1.geometry()).unwrap();
    let sum = arithmetic::add(&volume1, &resampled).unwrap();
    let stats = label_stats::compute(&sum, &labels).unwrap();
    assert_relative_eq!(stats[&0].mean, 255.0);
    assert_relative_eq!(stats[&1].mean, 255.0);
}
