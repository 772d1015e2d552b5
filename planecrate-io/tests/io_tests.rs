//! Integration tests for planecrate-io
//!
//! Reads a LIDAR export from disk, segments it and writes the XYZ output.

use planecrate_algorithms::{segment_planes, SegmentationConfig};
use planecrate_io::*;
use std::fmt::Write as _;
use std::fs;

/// Ten-column export with a floor (label 2) and a wall (label 6)
fn lidar_export() -> String {
    let mut text = String::from("label,return,n,t,i,a,b,x,y,z\n");
    for i in 0..12 {
        for j in 0..12 {
            let (x, y) = (1.0 + i as f32 * 0.25, j as f32 * 0.25);
            writeln!(text, "2,1,1,0.0,12,0,0,{x},{y},0").unwrap();
        }
    }
    for i in 0..12 {
        for j in 0..6 {
            let (y, z) = (i as f32 * 0.25, 1.0 + j as f32 * 0.25);
            writeln!(text, "6,1,1,0.0,12,0,0,0,{y},{z}").unwrap();
        }
    }
    // A truncated row the reader must skip
    text.push_str("6,1,1,0.0\n");
    text
}

#[test]
fn test_read_segment_write() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("scan.csv");
    fs::write(&input, lidar_export()).unwrap();

    let points = read_point_set(&input).unwrap();
    assert_eq!(points.len(), 144 + 72);

    let config = SegmentationConfig {
        plane_count: 2,
        seed: Some(3),
        ..SegmentationConfig::default()
    };
    let segmentation = segment_planes(&points, config).unwrap();
    assert_eq!(segmentation.planes.len(), 2);

    let out_dir = dir.path().join("out");
    let writer = XyzFileWriter::new(&out_dir);
    for result in &segmentation.planes {
        writer.write_result(result).unwrap();
    }

    // Plane 0 (floor): remaining wall points in out0, floor inliers in out5
    let remaining = fs::read_to_string(out_dir.join("out0.xyz")).unwrap();
    let lines: Vec<&str> = remaining.lines().collect();
    assert_eq!(lines[0], "Remaining points after plane 0");
    assert_eq!(lines.len(), 1 + 72 + 1);
    assert_eq!(lines[1], "0 0 1 ");
    assert_eq!(*lines.last().unwrap(), "");

    let reference = fs::read_to_string(out_dir.join("out5.xyz")).unwrap();
    let lines: Vec<&str> = reference.lines().collect();
    assert_eq!(lines[0], "Reference points for specific iteration");
    assert_eq!(lines.len(), 1 + 144 + 1);

    // Plane 1 (wall): nothing remains
    let remaining = fs::read_to_string(out_dir.join("out1.xyz")).unwrap();
    assert_eq!(remaining, "Remaining points after plane 1\n\n");
    assert!(out_dir.join("out6.xyz").exists());
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = read_point_set(dir.path().join("nope.csv"));
    assert!(matches!(result, Err(IoError::FileNotFound { .. })));
}

#[test]
fn test_strict_reader_rejects_truncated_row() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("scan.csv");
    fs::write(&input, lidar_export()).unwrap();

    let reader = RecordReader::new(RecordLayout {
        malformed_rows: MalformedRowPolicy::Fail,
        ..RecordLayout::default()
    });
    let result = reader.read_point_set(&input);
    assert!(matches!(result, Err(IoError::ParseError { line: 218, .. })));
}
