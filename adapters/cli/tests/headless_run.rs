use std::process::Command;

fn run_headless(extra: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_wave-survivor"))
        .env("RUST_LOG", "off")
        .args(["--headless", "--seed", "7", "--summary-json", "-"])
        .args(extra)
        .output()
        .expect("failed to launch wave-survivor")
}

#[test]
fn unfunded_run_reports_ammo_exhaustion_on_first_frame() {
    let output = run_headless(&["--ammo", "0"]);
    assert!(output.status.success(), "headless run should exit cleanly");

    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("summary is valid json");
    assert_eq!(report["seed"], 7);
    assert_eq!(report["cause"], "AmmoExhausted");
    assert_eq!(report["elapsed_ms"], 16);
    assert_eq!(report["shots_fired"], 0);
    assert_eq!(report["wave"], 1);
}

#[test]
fn run_without_game_over_writes_no_summary() {
    let output = run_headless(&["--ammo", "50", "--frames", "10"]);
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn invalid_config_path_fails() {
    let output = run_headless(&["--config", "does-not-exist.toml"]);
    assert!(!output.status.success());
}
