use std::fs;
use std::process::{Command, Output};

use tempfile::tempdir;

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_filterkit")
}

fn run(args: &[&str]) -> Output {
    Command::new(bin())
        .args(args)
        .env_remove("FILTERKIT_CONFIG")
        .env_remove("FILTERKIT_FLOAT_PRECISION")
        .env_remove("FILTERKIT_REQUIRED_POLICY")
        .output()
        .expect("command should run")
}

fn stdout(output: &Output) -> String {
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_render_scale() {
    let output = run(&["render", "scale", "w=100", "h=200"]);
    assert_eq!(stdout(&output), "scale=w=100:h=200\n");
}

#[test]
fn test_render_escapes_text() {
    let output = run(&["render", "drawtext", "text=Time: 10:00"]);
    assert_eq!(stdout(&output), "drawtext=text=Time\\: 10\\:00\n");
}

#[test]
fn test_render_positional_binding() {
    let output = run(&["render", "crop", "640", "480", "x=10"]);
    assert_eq!(stdout(&output), "crop=640:480:x=10\n");
}

#[test]
fn test_render_out_of_range_fails() {
    let output = run(&["render", "drawtext", "text=hi", "alpha=1.5"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("alpha"), "stderr: {}", stderr);
}

#[test]
fn test_render_unknown_filter_fails() {
    let output = run(&["render", "blur", "1"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown filter: blur"));
}

#[test]
fn test_list_contains_filters() {
    let out = stdout(&run(&["list"]));
    assert!(out.lines().any(|l| l.starts_with("scale ")));
    assert!(out.lines().any(|l| l.starts_with("zscale ")));

    let json: serde_json::Value = serde_json::from_str(&stdout(&run(&["list", "--json"])))
        .expect("list --json should print JSON");
    assert_eq!(json.as_array().map(Vec::len), Some(11));
}

#[test]
fn test_describe_json() {
    let out = stdout(&run(&["describe", "movie", "--json"]));
    let json: serde_json::Value = serde_json::from_str(&out).expect("valid JSON");
    assert_eq!(json["name"], "movie");
    assert_eq!(json["options"][0]["name"], "filename");
    assert_eq!(json["options"][0]["required"], true);
    assert_eq!(json["options"][0]["positional"], true);
}

#[test]
fn test_describe_text() {
    let out = stdout(&run(&["describe", "drawtext"]));
    assert!(out.starts_with("drawtext - "));
    assert!(out.contains("excludes textfile"));
}

#[test]
fn test_check_prints_canonical_form() {
    let out = stdout(&run(&["check", "scale=1280:720:flags=lanczos"]));
    assert_eq!(out, "scale=w=1280:h=720:flags=lanczos\n");
}

#[test]
fn test_check_orders_positionals_by_declaration() {
    let out = stdout(&run(&["check", "crop=h=480:w=640"]));
    assert_eq!(out, "crop=640:480\n");

    let out = stdout(&run(&["render", "crop", "h=480", "w=640", "x=10"]));
    assert_eq!(out, "crop=640:480:x=10\n");

    let out = stdout(&run(&["check", "crop=h=480"]));
    assert_eq!(out, "crop=h=480\n");
}

#[test]
fn test_check_keeps_escaped_text_whitespace() {
    let out = stdout(&run(&["check", "drawtext=text=\\ padded\\ "]));
    assert_eq!(out, "drawtext=text=\\ padded\\ \n");
}

#[test]
fn test_check_json_unescapes() {
    let out = stdout(&run(&["check", "--json", "movie='C:\\videos\\clip.mp4'"]));
    let json: serde_json::Value = serde_json::from_str(&out).expect("valid JSON");
    assert_eq!(json["params"][0]["value"], "C:\\videos\\clip.mp4");
    assert!(json["params"][0]["key"].is_null());
}

#[test]
fn test_required_policy_from_config() {
    let dir = tempdir().expect("temp dir");
    let config = dir.path().join("filterkit.toml");
    fs::write(&config, "required_policy = \"omit\"\n").expect("write config");

    let strict = run(&["render", "setpts"]);
    assert!(!strict.status.success());

    let lenient = run(&["--config", config.to_str().expect("utf8 path"), "render", "setpts"]);
    assert_eq!(stdout(&lenient), "setpts\n");
}

#[test]
fn test_env_overrides_config_file() {
    let dir = tempdir().expect("temp dir");
    let config = dir.path().join("filterkit.toml");
    fs::write(&config, "float_precision = 1\n").expect("write config");

    let output = Command::new(bin())
        .args(["render", "drawtext", "text=hi", "alpha=0.5"])
        .env("FILTERKIT_CONFIG", &config)
        .env("FILTERKIT_FLOAT_PRECISION", "3")
        .output()
        .expect("command should run");
    assert_eq!(stdout(&output), "drawtext=text=hi:alpha=0.500\n");
}
