use sky_viewer::config::ViewerConfig;
use sky_viewer::ephemeris::AnalyticEphemeris;
use sky_viewer::export::frames::JsonLinesSink;
use sky_viewer::export::{trails, writer_for_path};
use sky_viewer::sim::clock::{ManualWallClock, SimulationClock};
use sky_viewer::sim::render::{RenderSink, TrailSnapshot};
use sky_viewer::sim::viewer::Viewer;

const JUNE_SOLSTICE_NOON_MS: f64 = 1_718_971_200_000.0;

#[test]
fn json_lines_sink_writes_one_object_per_frame() {
    let clock = SimulationClock::starting_at(ManualWallClock::new(0.0), JUNE_SOLSTICE_NOON_MS, 0.0);
    let mut viewer = Viewer::new(AnalyticEphemeris::default(), clock, ViewerConfig::default());
    let mut sink = JsonLinesSink::new(Vec::new());
    for i in 0..2 {
        sink.submit(&viewer.frame(i as f64 * 1_000.0)).unwrap();
    }
    assert_eq!(sink.frames_written(), 2);

    let text = String::from_utf8(sink.into_inner()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);

    let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
    assert_eq!(second["frame"], 1);
    assert_eq!(second["sim_ms"], JUNE_SOLSTICE_NOON_MS + 1_000.0);
    let transforms = second["transforms"].as_array().unwrap();
    assert!(transforms.iter().any(|t| t["name"] == "globe"));
    assert_eq!(second["panels"][1]["panel"], "earth");
    assert!(second.get("trails").is_none());
}

#[test]
fn trail_csv_lists_samples_oldest_first() {
    let snapshots = vec![
        TrailSnapshot {
            name: "earth".to_string(),
            points: vec![[1.0, 0.0, 0.0], [0.9, 0.0, -0.1]],
        },
        TrailSnapshot {
            name: "mars".to_string(),
            points: vec![[1.5, 0.01, 0.2]],
        },
    ];
    let mut out = Vec::new();
    let rows = trails::write_trails(&mut out, &snapshots).unwrap();
    assert_eq!(rows, 3);

    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], trails::HEADER);
    assert_eq!(lines[1], "earth,0,1.000000000,0.000000000,0.000000000");
    assert!(lines[2].starts_with("earth,1,0.900000000"));
    assert!(lines[3].starts_with("mars,0,1.500000000"));
}

#[test]
fn writer_for_path_creates_parent_directories() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("nested/out/trails.csv");
    {
        let mut writer = writer_for_path(&path).expect("writer");
        trails::write_header(writer.as_mut()).unwrap();
    }
    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(contents.trim_end(), trails::HEADER);
}
