use std::process::Command;

// Helper function to run an ash command line and capture its output.
fn run_ash(command: &str) -> std::process::Output {
    let ash_path = env!("CARGO_BIN_EXE_ash");
    let home = tempfile::tempdir().expect("failed to create temp dir");
    Command::new(ash_path)
        .env("XDG_CONFIG_HOME", home.path().join("config"))
        .env("XDG_CACHE_HOME", home.path().join("cache"))
        .args(["-c", command])
        .output()
        .expect("failed to execute ash")
}

#[test]
fn calc_prints_result() {
    let output = run_ash("calc (2 + 3) * 4");

    assert!(output.status.success(), "ash command failed: {:?}", output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("Result: 20"),
        "calc result missing. stdout was:\n{}",
        stdout
    );
}

#[test]
fn external_command_output_is_forwarded() {
    let output = run_ash("echo from-child");

    assert!(output.status.success(), "ash command failed: {:?}", output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout, "from-child\n");
}

#[test]
fn failing_command_sets_exit_code() {
    let output = run_ash("false");
    assert!(!output.status.success());
}

#[test]
fn unknown_command_is_reported() {
    let output = run_ash("ash-test-no-such-command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("ash-test-no-such-command"),
        "error was not reported. stderr was:\n{}",
        stderr
    );
}

#[test]
fn lone_ampersand_is_a_syntax_error() {
    let output = run_ash("&");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("syntax error near '&'"));
}
