use std::process::{Command, Stdio};

#[test]
fn test_help_lists_flows() {
    let bin = env!("CARGO_BIN_EXE_mernfinity");

    let output = Command::new(bin).arg("--help").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("build"));
    assert!(stdout.contains("push"));
    assert!(stdout.contains("deploy"));
}

#[test]
fn test_no_command_without_terminal_prints_pointer() {
    let bin = env!("CARGO_BIN_EXE_mernfinity");
    let home = tempfile::tempdir().unwrap();

    let output = Command::new(bin)
        .env("HOME", home.path())
        .stdin(Stdio::null())
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("No command provided."),
        "expected non-terminal pointer; got:\n{}",
        stdout
    );
}
