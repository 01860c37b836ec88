use std::process::Command;

#[test]
fn headless_run_prints_the_hud() {
    let bin = env!("CARGO_BIN_EXE_spinbrush");
    let output = Command::new(bin)
        .args(["--headless", "50", "--seed", "9", "--spin", "--color", "--smooth"])
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to run spinbrush binary");

    assert!(output.status.success(), "headless run failed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("x: "), "unexpected output {stdout:?}");
    assert!(stdout.contains(" r: 25 #"));
}

#[test]
fn headless_paused_run_reports_the_pulse() {
    let bin = env!("CARGO_BIN_EXE_spinbrush");
    let output = Command::new(bin)
        .args(["--headless", "3", "--seed", "1", "--paused"])
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to run spinbrush binary");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Play: background #"), "unexpected output {stdout:?}");
}

#[test]
fn rejects_a_bad_background() {
    let bin = env!("CARGO_BIN_EXE_spinbrush");
    let output = Command::new(bin)
        .args(["--headless", "1", "--background", "nope"])
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to run spinbrush binary");

    assert!(!output.status.success());
}
