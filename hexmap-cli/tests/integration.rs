use assert_cmd::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to create a `hexmap` command that runs in an isolated temp directory.
fn hexmap_cmd(work_dir: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("hexmap");
    cmd.current_dir(work_dir.path());
    cmd.env("HOME", work_dir.path());
    cmd.env("NO_COLOR", "1");
    cmd
}

fn stdout_json(output: &[u8]) -> serde_json::Value {
    serde_json::from_slice(output).unwrap()
}

const DOWNTOWN_SW: &str = "37.70,-122.45";
const DOWNTOWN_NE: &str = "37.80,-122.40";

// ============================================================================
// Happy path tests
// ============================================================================

#[test]
fn version_flag() {
    cargo_bin_cmd!("hexmap")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("hexmap"));
}

#[test]
fn help_flag() {
    cargo_bin_cmd!("hexmap")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Hexagonal map coverage"))
        .stdout(predicate::str::contains("cover"))
        .stdout(predicate::str::contains("inspect"))
        .stdout(predicate::str::contains("session"));
}

#[test]
fn verbose_quiet_conflict() {
    cargo_bin_cmd!("hexmap")
        .args(["--verbose", "--quiet", "inspect", "37.7", "-122.4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn init_creates_config() {
    let tmp = TempDir::new().unwrap();
    hexmap_cmd(&tmp)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized hexmap config in"));

    assert!(tmp.path().join(".hexmap/config.toml").is_file());
}

#[test]
fn init_refuses_to_overwrite() {
    let tmp = TempDir::new().unwrap();
    hexmap_cmd(&tmp).arg("init").assert().success();
    hexmap_cmd(&tmp)
        .arg("init")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("already exists"))
        .stderr(predicate::str::contains("--force"));
    hexmap_cmd(&tmp).args(["init", "--force"]).assert().success();
}

#[test]
fn cover_json_has_distinct_cells() {
    let tmp = TempDir::new().unwrap();
    let output = hexmap_cmd(&tmp)
        .args(["cover", "--sw", DOWNTOWN_SW, "--ne", DOWNTOWN_NE, "-r", "7"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = stdout_json(&output.stdout);
    let cells = json["cells"].as_array().unwrap();
    assert!(!cells.is_empty());
    let mut distinct: Vec<&str> = cells.iter().map(|c| c.as_str().unwrap()).collect();
    distinct.sort();
    distinct.dedup();
    assert_eq!(distinct.len(), cells.len());
    assert_eq!(json["resolutions"], serde_json::json!([7]));
    assert_eq!(json["stats"]["cells"], cells.len());
}

#[test]
fn cover_geojson_is_feature_collection() {
    let tmp = TempDir::new().unwrap();
    let output = hexmap_cmd(&tmp)
        .args([
            "cover", "--sw", DOWNTOWN_SW, "--ne", DOWNTOWN_NE, "-r", "6", "-r", "8",
            "--format", "geojson",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = stdout_json(&output.stdout);
    assert_eq!(json["type"], "FeatureCollection");
    let features = json["features"].as_array().unwrap();
    assert!(!features.is_empty());
    for feature in features {
        let ring = feature["geometry"]["coordinates"][0].as_array().unwrap();
        assert_eq!(ring.first(), ring.last());
    }
}

#[test]
fn cover_uses_configured_resolutions() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join(".hexmap")).unwrap();
    fs::write(
        tmp.path().join(".hexmap/config.toml"),
        "[session]\ndefault_resolutions = [5]\n",
    )
    .unwrap();

    let output = hexmap_cmd(&tmp)
        .args(["cover", "--sw", DOWNTOWN_SW, "--ne", DOWNTOWN_NE])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(stdout_json(&output.stdout)["resolutions"], serde_json::json!([5]));
}

#[test]
fn cover_wraparound_viewport_is_empty() {
    let tmp = TempDir::new().unwrap();
    let output = hexmap_cmd(&tmp)
        .args(["cover", "--sw", "10,170", "--ne", "20,-170", "-r", "3"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(stdout_json(&output.stdout)["cells"], serde_json::json!([]));
}

#[test]
fn inspect_table_shows_metadata() {
    let tmp = TempDir::new().unwrap();
    hexmap_cmd(&tmp)
        .args(["inspect", "37.7749", "-122.4194", "-r", "8", "--unit", "m2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("base cell"))
        .stdout(predicate::str::contains("boundary vertices"))
        .stdout(predicate::str::contains(" m²"));
}

#[test]
fn inspect_json() {
    let tmp = TempDir::new().unwrap();
    let output = hexmap_cmd(&tmp)
        .args(["inspect", "37.7749", "-122.4194", "-r", "8", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = stdout_json(&output.stdout);
    assert_eq!(json["metadata"]["resolution"], 8);
    assert_eq!(json["metadata"]["is_pentagon"], false);
    assert_eq!(json["metadata"]["boundary_vertex_count"], 6);
    assert_eq!(json["unit"], "km2");
    assert_eq!(json["boundary"].as_array().unwrap().len(), 6);
}

#[test]
fn inspect_json_unit_feeds_back_into_unit_flag() {
    let tmp = TempDir::new().unwrap();
    let inspect = |unit: &str| {
        let output = hexmap_cmd(&tmp)
            .args(["inspect", "37.7749", "-122.4194", "-r", "6", "--format", "json"])
            .args(["--unit", unit])
            .output()
            .unwrap();
        assert!(output.status.success(), "--unit {unit}");
        stdout_json(&output.stdout)
    };

    for unit in ["m2", "km2", "mi2"] {
        let first = inspect(unit);
        let echoed = first["unit"].as_str().unwrap().to_string();
        assert_eq!(echoed, unit);

        let second = inspect(&echoed);
        assert_eq!(second["unit"], first["unit"]);
        assert_eq!(second["area"], first["area"]);
    }
}

#[test]
fn session_from_stdin() {
    let tmp = TempDir::new().unwrap();
    let script = r#"{"event": "viewport_settled", "southwest": [37.70, -122.45], "northeast": [37.80, -122.40]}
{"event": "point_clicked", "lat": 37.7749, "lng": -122.4194}
{"event": "point_clicked", "lat": 40.7128, "lng": -74.0060}
{"event": "point_clicked", "lat": 37.7749, "lng": -122.4194}
{"event": "map_style_toggled"}
"#;
    let output = hexmap_cmd(&tmp)
        .arg("session")
        .write_stdin(script)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = stdout_json(&output.stdout);
    assert!(!json["coverage"]["cells"].as_array().unwrap().is_empty());
    let selection = json["selection"].as_array().unwrap();
    assert_eq!(selection.len(), 1);
    assert_eq!(selection[0]["point"]["latitude"], 40.7128);
    assert_eq!(json["last_clicked"]["cell"], selection[0]["cell"]);
    assert_eq!(json["map_style"], "satellite_streets");
}

#[test]
fn session_geojson_from_file() {
    let tmp = TempDir::new().unwrap();
    let script = tmp.path().join("events.jsonl");
    fs::write(
        &script,
        "# one click\n{\"event\": \"point_clicked\", \"lat\": 37.7749, \"lng\": -122.4194}\n",
    )
    .unwrap();

    let output = hexmap_cmd(&tmp)
        .args(["session", "--format", "geojson"])
        .arg(&script)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = stdout_json(&output.stdout);
    assert_eq!(json["coverage"]["features"], serde_json::json!([]));
    assert_eq!(json["selection"]["features"].as_array().unwrap().len(), 1);
    let extent = &json["selection_extent"];
    assert!(extent["southwest"]["latitude"].as_f64().unwrap() < 37.7749);
    assert!(extent["northeast"]["latitude"].as_f64().unwrap() > 37.7749);
    assert!(json["map_style"].as_str().unwrap().ends_with("streets-v11"));
}

// ============================================================================
// Error tests
// ============================================================================

#[test]
fn cover_rejects_inverted_viewport() {
    let tmp = TempDir::new().unwrap();
    hexmap_cmd(&tmp)
        .args(["cover", "--sw", "37.80,-122.45", "--ne", "37.70,-122.40"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid viewport"));
}

#[test]
fn cover_rejects_bad_resolution() {
    let tmp = TempDir::new().unwrap();
    hexmap_cmd(&tmp)
        .args(["cover", "--sw", DOWNTOWN_SW, "--ne", DOWNTOWN_NE, "-r", "16"])
        .assert()
        .failure();
}

#[test]
fn session_reports_bad_line() {
    let tmp = TempDir::new().unwrap();
    hexmap_cmd(&tmp)
        .args(["session", "-e", "{\"event\": \"map_style_toggled\"}\nnot json\n"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("inline events: line 2"));
}

#[test]
fn bad_config_is_reported() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join(".hexmap")).unwrap();
    fs::write(
        tmp.path().join(".hexmap/config.toml"),
        "[coverage]\nsample_step_deg = -1.0\n",
    )
    .unwrap();

    hexmap_cmd(&tmp)
        .args(["inspect", "37.7749", "-122.4194"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("sample_step_deg"));
}

#[test]
fn missing_config_override_is_reported() {
    let tmp = TempDir::new().unwrap();
    hexmap_cmd(&tmp)
        .args(["--config", "nope.toml", "inspect", "37.7749", "-122.4194"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config path does not exist"));
}
