use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn wally() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_wally"));
    cmd.env("RUST_LOG", "warn");
    cmd
}

/// Temp dir holding `settings.toml` (noop backend) and a `walls/` directory
fn fixture(images: &[&str]) -> (tempfile::TempDir, PathBuf, PathBuf) {
    let tmp = tempfile::tempdir().unwrap();
    let walls = tmp.path().join("walls");
    fs::create_dir_all(&walls).unwrap();
    for name in images {
        fs::write(walls.join(name), b"").unwrap();
    }

    let config = tmp.path().join("settings.toml");
    fs::write(
        &config,
        format!(
            "root_dir = {:?}\nbackend = \"noop\"\n\n[interval]\nmin = \"1m\"\nmax = \"2m\"\n",
            walls.to_str().unwrap()
        ),
    )
    .unwrap();

    (tmp, config, walls)
}

fn run(args: &[&str], config: &Path) -> Output {
    wally()
        .args(args)
        .arg("--config")
        .arg(config)
        .output()
        .expect("failed to run")
}

fn status(config: &Path) -> serde_json::Value {
    let output = run(&["status", "--json"], config);
    assert!(output.status.success(), "status failed: {:?}", output);
    serde_json::from_slice(&output.stdout).expect("status --json should print JSON")
}

#[test]
fn test_help_exits_zero() {
    let output = wally().arg("--help").output().expect("failed to run");
    assert!(output.status.success(), "wally --help should exit 0");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("Background wallpaper rotator"),
        "help should contain description"
    );
}

#[test]
fn test_version_exits_zero() {
    let output = wally().arg("--version").output().expect("failed to run");
    assert!(output.status.success(), "wally --version should exit 0");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("wally"), "version output should contain crate name");
}

#[test]
fn test_first_status_creates_settings() {
    let tmp = tempfile::tempdir().unwrap();
    let config = tmp.path().join("fresh").join("settings.toml");

    let output = run(&["status"], &config);
    assert!(output.status.success());
    assert!(config.exists(), "default settings should be written");

    let text = fs::read_to_string(&config).unwrap();
    assert!(text.contains("min = \"1m\""));
    assert!(text.contains("max = \"3h\""));
}

#[test]
fn test_once_rotates_without_repeats() {
    let (_tmp, config, walls) = fixture(&["a.jpg", "b.png", "c.JPEG", "notes.txt"]);

    let mut seen = Vec::new();
    for _ in 0..3 {
        let output = run(&["once"], &config);
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(output.status.success(), "once failed: {stderr}");
        assert!(!stderr.contains("panicked"));

        let stdout = String::from_utf8_lossy(&output.stdout);
        let path = PathBuf::from(stdout.trim());
        assert_eq!(path.parent(), Some(walls.as_path()));
        assert!(!seen.contains(&path), "{} shown twice", path.display());
        seen.push(path);
    }

    let value = status(&config);
    assert_eq!(value["pool_size"], 3);
    assert_eq!(value["shown"], 3);
    assert_eq!(value["remaining"], 0);

    // Fourth change starts a new round and avoids the image on screen.
    let output = run(&["once"], &config);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("starting a new round"));
    let last = PathBuf::from(stdout.lines().last().unwrap().trim());
    assert_ne!(Some(&last), seen.last());
    assert_eq!(status(&config)["shown"], 1);
}

#[test]
fn test_once_with_empty_dir() {
    let (_tmp, config, _walls) = fixture(&[]);

    let output = run(&["once"], &config);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "empty pool is not an error: {stderr}");
    assert!(stderr.contains("No wallpapers found"));
    assert!(!stderr.contains("panicked"));
}

#[test]
fn test_once_with_nonexistent_dir() {
    let (_tmp, config, _walls) = fixture(&[]);

    let output = wally()
        .args(["once", "-d", "/tmp/wally_test_nonexistent_dir_12345"])
        .arg("--config")
        .arg(&config)
        .output()
        .expect("failed to run");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(!stderr.contains("panicked"), "should not panic on nonexistent dir");
}

#[test]
fn test_reset_clears_progress() {
    let (_tmp, config, _walls) = fixture(&["a.jpg", "b.jpg"]);

    assert!(run(&["once"], &config).status.success());
    assert_eq!(status(&config)["shown"], 1);

    assert!(run(&["reset"], &config).status.success());
    let value = status(&config);
    assert_eq!(value["shown"], 0);
    assert!(value["last_shown_path"].is_string(), "last shown survives reset");
}

#[test]
fn test_interval_command() {
    let (_tmp, config, _walls) = fixture(&["a.jpg"]);

    let output = run(&["interval", "2h", "30m"], &config);
    assert!(!output.status.success(), "inverted range should be rejected");

    let output = run(&["interval", "90s", "1d"], &config);
    assert!(output.status.success());
    let value = status(&config);
    assert_eq!(value["interval"]["min"], "90s");
    assert_eq!(value["interval"]["max"], "1d");
}
