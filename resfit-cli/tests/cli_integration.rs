use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use std::error::Error;
use tempfile::tempdir;

// Helper function to get the path to the compiled binary, with plain output
fn resfit_cmd() -> Command {
    let mut cmd = Command::cargo_bin("resfit").expect("Failed to find resfit binary");
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG").env_remove("RESFIT_CATALOG");
    cmd
}

#[test]
fn test_help_lists_subcommands() {
    resfit_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("generate"))
        .stdout(contains("normalize"))
        .stdout(contains("verify"))
        .stdout(contains("plan"));
}

#[test]
fn test_plan_pad_only() {
    resfit_cmd()
        .args(["plan", "1918x1080"])
        .assert()
        .success()
        .stderr(contains("Target:         1920x1080"))
        .stderr(contains("pad=1920:1080:1:0"));
}

#[test]
fn test_plan_crop_only() {
    resfit_cmd()
        .args(["plan", "2558x1438"])
        .assert()
        .success()
        .stderr(contains("crop=1920:1080:319:179"))
        .stderr(contains("pad=").not());
}

#[test]
fn test_plan_exact_match_is_copy() {
    resfit_cmd()
        .args(["plan", "1280x720"])
        .assert()
        .success()
        .stderr(contains("pass-through"))
        .stderr(contains("-c copy"));
}

#[test]
fn test_plan_restricted_policy_without_candidate() {
    resfit_cmd()
        .args([
            "plan",
            "642x358",
            "--policy",
            "below-height",
            "--standard",
            "640x360",
            "--standard",
            "854x480",
        ])
        .assert()
        .failure()
        .stderr(contains("No eligible standard resolution for 642x358"));
}

#[test]
fn test_plan_rejects_malformed_resolution() {
    resfit_cmd().args(["plan", "1920X1080"]).assert().failure();
    resfit_cmd().args(["plan", "0x1080"]).assert().failure();
}

#[test]
fn test_plan_with_catalog_file() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let catalog = dir.path().join("catalog.json");
    std::fs::write(&catalog, r#"["1000x500", {"width": 2000, "height": 1000}]"#)?;

    resfit_cmd()
        .args(["plan", "1002x498", "--catalog"])
        .arg(&catalog)
        .assert()
        .success()
        .stderr(contains("crop=1000:498:1:0,pad=1000:500:0:1"));

    // Same file through the environment.
    resfit_cmd()
        .env("RESFIT_CATALOG", &catalog)
        .args(["plan", "1998x1000"])
        .assert()
        .success()
        .stderr(contains("pad=2000:1000:1:0"));
    Ok(())
}

#[test]
fn test_plan_with_invalid_catalog_file() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let catalog = dir.path().join("catalog.json");
    std::fs::write(&catalog, "not json")?;

    resfit_cmd()
        .args(["plan", "1918x1080", "--catalog"])
        .arg(&catalog)
        .assert()
        .failure()
        .stderr(contains("JSON parse error"));
    Ok(())
}

#[test]
fn test_log_dir_writes_plain_log_file() -> Result<(), Box<dyn Error>> {
    let log_dir = tempdir()?;

    let mut cmd = Command::cargo_bin("resfit")?;
    cmd.env_remove("NO_COLOR")
        .env_remove("RUST_LOG")
        .args(["plan", "854x476", "--log-dir"])
        .arg(log_dir.path())
        .assert()
        .success();

    let logs: Vec<_> = std::fs::read_dir(log_dir.path())?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .collect();
    assert_eq!(logs.len(), 1);
    let name = logs[0].file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("resfit_plan_") && name.ends_with(".log"), "{name}");

    let content = std::fs::read_to_string(&logs[0])?;
    assert!(content.contains("pad=854:480:0:2"), "{content}");
    assert!(!content.contains('\u{1b}'), "log file should not contain ANSI escapes");
    Ok(())
}

#[test]
fn test_normalize_non_existent_input() {
    resfit_cmd()
        .args(["normalize", "surely/this/does/not/exist"])
        .assert()
        .failure()
        .stderr(contains("does not exist"));
}

#[test]
fn test_normalize_without_matching_files() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    std::fs::write(dir.path().join("source.mp4"), "dummy content")?;

    resfit_cmd()
        .arg("normalize")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(contains("No matching video files"));
    Ok(())
}

#[test]
fn test_generate_missing_source() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    resfit_cmd()
        .args(["generate", "--source"])
        .arg(dir.path().join("missing.mp4"))
        .arg("--output")
        .arg(dir.path().join("out"))
        .assert()
        .failure()
        .stderr(contains("does not exist"));
    assert!(!dir.path().join("out").exists());
    Ok(())
}

#[test]
fn test_verify_missing_dir() {
    resfit_cmd()
        .args(["verify", "surely/this/does/not/exist"])
        .assert()
        .failure()
        .stderr(contains("does not exist"));
}

#[test]
fn test_run_missing_source() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    resfit_cmd()
        .args(["run", "--source"])
        .arg(dir.path().join("missing.mp4"))
        .assert()
        .failure()
        .stderr(contains("does not exist"));
    Ok(())
}
