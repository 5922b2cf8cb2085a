use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../finreport-parser/tests/data")
        .join(name)
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("finreport-cli-{name}-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}

fn finreport(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_finreport"))
        .current_dir(dir)
        .args(args)
        .output()
        .expect("failed to spawn finreport")
}

#[test]
fn missing_file_aborts_before_any_output() {
    let dir = scratch_dir("missing");
    let output = finreport(&dir, &["missing.csv"]);

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), "❌ File not found: missing.csv");
    assert!(!dir.join("charts").exists());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn default_input_name_is_used_when_none_given() {
    let dir = scratch_dir("default");
    let output = finreport(&dir, &[]);

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("dummy_financial_report.csv"));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn writes_charts_and_prints_observations() {
    let dir = scratch_dir("report");
    let input = fixture_path("dummy_financial_report.csv");
    let output = finreport(&dir, &[input.to_str().expect("utf-8 path"), "--chart-format", "json"]);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Summary Observations:"));
    assert!(stdout.contains("1. Highest revenue growth: 2021 with 19.89%."));
    assert!(stdout.contains("2. Lowest profit margin: 2020 at 11.81%."));
    assert!(stdout.contains("3. Net profit increased from 25.3M to 55.2M."));

    for slug in ["revenue_vs_profit", "profit_margin", "revenue_growth"] {
        assert!(dir.join("charts").join(format!("{slug}.json")).exists(), "{slug} missing");
    }

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn config_file_values_are_overridden_by_flags() {
    let dir = scratch_dir("config");
    let config = dir.join("finreport.toml");
    fs::write(
        &config,
        format!(
            "input = {:?}\ndelimiter = \",\"\nchart_format = \"json\"\n",
            fixture_path("semicolon_report.csv").display().to_string()
        ),
    )
    .expect("write config");

    let output = finreport(
        &dir,
        &[
            "--config",
            config.to_str().expect("utf-8 path"),
            "--delimiter",
            ";",
            "--chart-format",
            "none",
            "--print-table",
        ],
    );

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("1. Highest revenue growth: 2021 with 50.00%."));
    assert!(stdout.contains("revenue_growth_pct"));
    assert!(!dir.join("charts").exists());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn strict_flag_rejects_coerced_cells() {
    let dir = scratch_dir("strict");
    let input = fixture_path("messy_report.csv");
    let output = finreport(
        &dir,
        &[input.to_str().expect("utf-8 path"), "--strict", "--chart-format", "none"],
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("data row 3 invalid"));
    assert!(!String::from_utf8_lossy(&output.stdout).contains("Summary Observations:"));

    let _ = fs::remove_dir_all(&dir);
}
