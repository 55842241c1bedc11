use std::process::Command;

#[test]
fn help_displays_overview() {
    let binary = env!("CARGO_BIN_EXE_crypto-scanner");
    let output = Command::new(binary)
        .arg("--help")
        .output()
        .expect("invoke crypto-scanner --help");

    assert!(output.status.success(), "help command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("Crypto intraday volatility scanner"),
        "expected overview text in help output"
    );
    assert!(stdout.contains("scan"), "expected scan subcommand in help");
    assert!(stdout.contains("watch"), "expected watch subcommand in help");
    assert!(stdout.contains("chart"), "expected chart subcommand in help");
}

#[test]
fn scan_help_lists_threshold_flags() {
    let binary = env!("CARGO_BIN_EXE_crypto-scanner");
    let output = Command::new(binary)
        .args(["scan", "--help"])
        .output()
        .expect("invoke crypto-scanner scan --help");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for flag in ["--min-volume", "--min-change", "--min-volatility", "--refresh"] {
        assert!(stdout.contains(flag), "expected {flag} in scan help output");
    }
}
