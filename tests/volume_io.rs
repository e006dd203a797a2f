//! Loader coverage against real NIfTI files written to a temp directory.

use ndarray::{Array3, Array4};
use nifti::writer::WriterOptions;
use snr_volume::volume_loader::{self, VolumeLoaderError};
use tempfile::tempdir;

#[test]
fn written_volume_round_trips_through_the_loader() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ramp.nii");
    let data = Array3::from_shape_fn((3, 2, 2), |(i, j, k)| (i * 4 + j * 2 + k) as f32);
    WriterOptions::new(&path).write_nifti(&data).unwrap();

    let volume = volume_loader::load::<f32>(&path).unwrap();
    assert_eq!(volume.dim(), (3, 2, 2));
    assert_eq!(volume.data()[[0, 0, 0]], 0.0);
    assert_eq!(volume.data()[[2, 1, 1]], 11.0);
    assert_eq!(volume.geometry().extent, [3, 2, 2]);
}

#[test]
fn samples_convert_to_the_requested_pixel_type() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("labels.nii");
    let data = Array3::from_shape_fn((2, 2, 2), |(i, _, _)| i as f32);
    WriterOptions::new(&path).write_nifti(&data).unwrap();

    let labels = volume_loader::load::<u32>(&path).unwrap();
    assert_eq!(labels.data()[[0, 1, 1]], 0);
    assert_eq!(labels.data()[[1, 0, 0]], 1);
}

#[test]
fn four_dimensional_data_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("timeseries.nii");
    let data = Array4::<f32>::zeros((2, 2, 2, 3));
    WriterOptions::new(&path).write_nifti(&data).unwrap();

    match volume_loader::load::<f32>(&path) {
        Err(VolumeLoaderError::NotThreeDimensional(4)) => {}
        other => panic!("expected a dimensionality error, got {other:?}"),
    }
}

#[test]
fn missing_files_fail_to_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent.nii");
    assert!(volume_loader::load::<f32>(&path).is_err());
}

#[test]
fn volumes_written_alike_share_a_grid() {
    let dir = tempdir().unwrap();
    let first = dir.path().join("first.nii");
    let second = dir.path().join("second.nii");
    let data = Array3::from_elem((2, 3, 4), 1.0f32);
    WriterOptions::new(&first).write_nifti(&data).unwrap();
    WriterOptions::new(&second).write_nifti(&data).unwrap();

    let a = volume_loader::load::<f32>(&first).unwrap();
    let b = volume_loader::load::<f32>(&second).unwrap();
    assert!(a.same_grid(&b));
}
