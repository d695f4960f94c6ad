//! CLI-level behavior that needs no simulator or xcodebuild installed

use std::process::Command;

fn simsync(args: &[&str]) -> std::process::Output {
    let bin = env!("CARGO_BIN_EXE_simsync");
    Command::new(bin).args(args).output().unwrap()
}

#[test]
fn test_help_lists_commands() {
    let output = simsync(&["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("sync"), "help should list sync:\n{stdout}");
    assert!(stdout.contains("info"), "help should list info:\n{stdout}");
}

#[test]
fn test_sync_with_missing_project_exits_with_config_code() {
    let output = simsync(&["sync", "--project", "/nonexistent/App.xcodeproj"]);

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("no Xcode project found"),
        "diagnostic should name the failure:\n{stderr}"
    );
    assert!(
        stderr.contains("/nonexistent/App.xcodeproj"),
        "diagnostic should name the failing path:\n{stderr}"
    );
}

#[test]
fn test_info_with_missing_project_exits_with_config_code() {
    let output = simsync(&["info", "--project", "/nonexistent/App.xcodeproj"]);

    assert_eq!(output.status.code(), Some(2));
}
