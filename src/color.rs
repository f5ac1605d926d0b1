#![allow(clippy::module_name_repetitions)]
//! Colour mode selection and ANSI helpers for console output.
//!
//! Precedence: `NO_COLOR` set disables colour; then the CLI override (`set_color_mode`);
//! then `REPLSCOPE_COLOR`; otherwise colour follows whether the stream is a TTY.

use clap::ValueEnum;
use once_cell::sync::OnceCell;

pub const COLOR_ENV: &str = "REPLSCOPE_COLOR";

pub const CYAN_BOLD: &str = "\x1b[36;1m";
pub const YELLOW_BOLD: &str = "\x1b[33;1m";
pub const RED_BOLD: &str = "\x1b[31;1m";
pub const BLUE_BOLD: &str = "\x1b[34;1m";

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    fn enabled(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => is_tty,
        }
    }
}

static COLOR_MODE: OnceCell<ColorMode> = OnceCell::new();

/// First call wins; later calls are ignored.
pub fn set_color_mode(mode: ColorMode) {
    let _ = COLOR_MODE.set(mode);
}

pub fn parse_color_mode(s: &str) -> Option<ColorMode> {
    match s.trim().to_ascii_lowercase().as_str() {
        "auto" => Some(ColorMode::Auto),
        "always" | "on" | "true" | "yes" | "1" => Some(ColorMode::Always),
        "never" | "off" | "false" | "no" | "0" => Some(ColorMode::Never),
        _ => None,
    }
}

fn color_enabled_for(is_tty: bool) -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    let mode = COLOR_MODE.get().copied().or_else(|| {
        std::env::var(COLOR_ENV)
            .ok()
            .and_then(|v| parse_color_mode(&v))
    });
    mode.unwrap_or(ColorMode::Auto).enabled(is_tty)
}

pub fn color_enabled_stdout() -> bool {
    color_enabled_for(atty::is(atty::Stream::Stdout))
}

pub fn color_enabled_stderr() -> bool {
    color_enabled_for(atty::is(atty::Stream::Stderr))
}

/// Wrap `s` in `code` ... reset when enabled; otherwise return it unchanged.
pub fn paint(enabled: bool, code: &str, s: &str) -> String {
    if enabled {
        format!("{code}{s}\x1b[0m")
    } else {
        s.to_string()
    }
}

pub fn log_info_stderr(use_color: bool, msg: &str) {
    eprintln!("{}", paint(use_color, CYAN_BOLD, msg));
}

pub fn log_error_stderr(use_color: bool, msg: &str) {
    eprintln!("{}", paint(use_color, RED_BOLD, msg));
}

/// `warning: <msg>` on stderr.
pub fn warn_print(msg: &str) {
    let use_err = color_enabled_stderr();
    eprintln!(
        "{}",
        paint(use_err, YELLOW_BOLD, &format!("warning: {msg}"))
    );
}
