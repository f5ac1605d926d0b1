pub(crate) fn print_startup_banner(root: &std::path::Path) {
    let version = env!("CARGO_PKG_VERSION");
    let use_err = replscope::color_enabled_stderr();
    eprintln!();
    eprintln!("─────────────────────────────────────────────────────────────");
    eprintln!(
        "{}",
        replscope::paint(
            use_err,
            replscope::CYAN_BOLD,
            &format!(" 🔍  replscope v{version}  -  portable workspace analyzer")
        )
    );
    eprintln!("─────────────────────────────────────────────────────────────");
    eprintln!(" 📂 project: {}", root.display());
    eprintln!(" 🖥  host:    {} / {}", std::env::consts::OS, std::env::consts::ARCH);
    eprintln!();
}
