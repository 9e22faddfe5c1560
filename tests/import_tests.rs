use hrcompare::export::{self, PreviewFormat};
use hrcompare::{compare, AnalyzerError, DecoderRegistry, PreviewData, TimeRange};
use std::fs;
use std::path::PathBuf;
use tempfile::{tempdir, TempDir};

/// File-based loading through the decoder registry

fn gpx_track(points: &[(u32, Option<u32>, Option<f64>)]) -> String {
    let mut body = String::new();
    for (second, hr, speed) in points {
        body.push_str(&format!(
            "      <trkpt lat=\"51.5\" lon=\"-0.12\">\n        <time>2024-04-21T08:{:02}:{:02}Z</time>\n",
            second / 60,
            second % 60
        ));
        if hr.is_some() || speed.is_some() {
            body.push_str("        <extensions>\n          <gpxtpx:TrackPointExtension>\n");
            if let Some(hr) = hr {
                body.push_str(&format!("            <gpxtpx:hr>{}</gpxtpx:hr>\n", hr));
            }
            if let Some(speed) = speed {
                body.push_str(&format!("            <gpxtpx:speed>{}</gpxtpx:speed>\n", speed));
            }
            body.push_str("          </gpxtpx:TrackPointExtension>\n        </extensions>\n");
        }
        body.push_str("      </trkpt>\n");
    }

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="integration-test"
     xmlns="http://www.topografix.com/GPX/1/1"
     xmlns:gpxtpx="http://www.garmin.com/xmlschemas/TrackPointExtension/v1">
  <metadata><time>2024-04-21T07:00:00Z</time></metadata>
  <trk>
    <name>Morning Run</name>
    <trkseg>
{}    </trkseg>
  </trk>
</gpx>
"#,
        body
    )
}

fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_gpx_compare_end_to_end() {
    let dir = tempdir().unwrap();
    let points: Vec<_> = (0..120)
        .map(|s| {
            let hr = if s < 60 { 140 } else { 154 };
            (s, Some(hr), Some(3.2))
        })
        .collect();
    let path = write_file(&dir, "run.GPX", &gpx_track(&points));

    let dataset = DecoderRegistry::new().load_dataset(&path).unwrap();
    assert_eq!(dataset.len(), 120);
    assert_eq!(dataset.duration_seconds(), 119.0);

    let result = compare(
        &dataset,
        &TimeRange::new("00:00", "00:59"),
        &TimeRange::new("01:00", "01:59"),
    )
    .unwrap();

    assert_eq!(result.section1.average_hr, Some(140.0));
    assert_eq!(result.section2.average_hr, Some(154.0));
    assert_eq!(result.heart_rate.difference, Some(14.0));
    assert!((result.heart_rate.percent_difference.unwrap() - 10.0).abs() < 1e-9);
}

#[test]
fn test_gpx_points_sorted_and_untimed_dropped() {
    let dir = tempdir().unwrap();
    let mut xml = gpx_track(&[(10, Some(150), None), (0, Some(130), None), (5, Some(140), None)]);
    xml = xml.replace(
        "    </trkseg>",
        "      <trkpt lat=\"51.5\" lon=\"-0.12\"><ele>12.0</ele></trkpt>\n    </trkseg>",
    );
    let path = write_file(&dir, "shuffled.gpx", &xml);

    let samples = DecoderRegistry::new().load_samples(&path).unwrap();

    let hrs: Vec<_> = samples.iter().map(|s| s.heart_rate).collect();
    assert_eq!(hrs, vec![Some(130.0), Some(140.0), Some(150.0)]);
}

#[test]
fn test_unsupported_extension() {
    let dir = tempdir().unwrap();
    let path = write_file(&dir, "activity.tcx", "<TrainingCenterDatabase/>");

    match DecoderRegistry::new().load_dataset(&path) {
        Err(AnalyzerError::UnsupportedFormat { extension }) => assert_eq!(extension, ".tcx"),
        other => panic!("expected UnsupportedFormat, got {:?}", other.map(|d| d.len())),
    }
}

#[test]
fn test_gpx_without_points_is_format_error() {
    let dir = tempdir().unwrap();
    let path = write_file(&dir, "empty.gpx", &gpx_track(&[]));

    let result = DecoderRegistry::new().load_dataset(&path);

    assert!(matches!(result, Err(AnalyzerError::Format { .. })));
    assert_eq!(result.err().map(|e| e.exit_code()), Some(3));
}

#[test]
fn test_corrupted_fit_file() {
    let dir = tempdir().unwrap();
    let path = write_file(&dir, "broken.fit", "definitely not a FIT file");

    let result = DecoderRegistry::new().load_dataset(&path);

    assert!(matches!(
        result,
        Err(AnalyzerError::Decode { format: "FIT", .. })
    ));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let result = DecoderRegistry::new().load_dataset(&dir.path().join("absent.gpx"));

    assert!(matches!(result, Err(AnalyzerError::Io(_))));
}

#[test]
fn test_preview_csv_written_to_file() {
    let dir = tempdir().unwrap();
    let path = write_file(
        &dir,
        "preview.gpx",
        &gpx_track(&[(0, Some(120), Some(2.5)), (30, None, None), (60, Some(150), Some(3.0))]),
    );
    let dataset = DecoderRegistry::new().load_dataset(&path).unwrap();
    let preview = PreviewData::from_dataset(&dataset);
    let csv_path = dir.path().join("preview.csv");

    export::write_to_file(&csv_path, |writer| {
        export::write_preview(&preview, PreviewFormat::Csv, writer)
    })
    .unwrap();

    let content = fs::read_to_string(&csv_path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[1], "0.0,120.0,9.0");
    assert_eq!(lines[2], "30.0,,0.0");
    assert_eq!(preview.total_time, 60.0);
}
