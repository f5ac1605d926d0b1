use std::process::Command;

fn run_summary(args: &[&str], envs: &[(&str, &str)]) -> String {
    let td = tempfile::tempdir().expect("tmpdir");
    std::fs::write(td.path().join("main.py"), "x\n").unwrap();
    let bin = env!("CARGO_BIN_EXE_replscope");
    let mut cmd = Command::new(bin);
    cmd.env_clear()
        .args(["-q", "--out-dir", "out"])
        .args(args)
        .current_dir(td.path());
    for (k, v) in envs {
        cmd.env(k, v);
    }
    let out = cmd.output().expect("run replscope");
    assert!(
        out.status.success(),
        "replscope failed: stderr={}",
        String::from_utf8_lossy(&out.stderr)
    );
    String::from_utf8_lossy(&out.stdout).into_owned()
}

#[test]
fn test_color_env_always_applies_when_no_cli_flag() {
    let stdout = run_summary(&[], &[("REPLSCOPE_COLOR", "always")]);
    assert!(
        stdout.contains("\x1b["),
        "expected ANSI escapes when REPLSCOPE_COLOR=always and no CLI flag, got:\n{}",
        stdout
    );
}

#[test]
fn test_no_color_env_disables_even_with_cli_always() {
    let stdout = run_summary(&["--color", "always"], &[("NO_COLOR", "1")]);
    assert!(
        !stdout.contains("\x1b["),
        "expected no ANSI escapes when NO_COLOR=1 even with --color always, got:\n{}",
        stdout
    );
}

#[test]
fn test_cli_overrides_env_when_no_no_color() {
    let stdout = run_summary(&["--color", "always"], &[("REPLSCOPE_COLOR", "never")]);
    assert!(
        stdout.contains("\x1b["),
        "expected ANSI escapes when --color always overrides REPLSCOPE_COLOR=never, got:\n{}",
        stdout
    );
}

#[test]
fn test_piped_output_is_plain_by_default() {
    let stdout = run_summary(&[], &[]);
    assert!(stdout.contains("WORKSPACE ANALYSIS"));
    assert!(!stdout.contains("\x1b["), "got:\n{}", stdout);
}
