//! Terminal detection for output decisions.

use std::io::IsTerminal;

use super::mode::OutputMode;

const FALLBACK_WIDTH: usize = 80;

/// Resolved terminal settings shared by every renderer.
#[derive(Debug, Clone)]
pub struct UiContext {
    pub is_tty: bool,
    pub color: bool,
    pub unicode: bool,
    /// Columns available for wrapping record content.
    pub width: usize,
    pub mode: OutputMode,
}

/// What the process environment says about the terminal.
#[derive(Debug, Clone, Default)]
struct Terminal {
    stdout_tty: bool,
    dumb: bool,
    no_color: bool,
    width: Option<usize>,
}

impl Terminal {
    fn probe() -> Self {
        Self {
            stdout_tty: std::io::stdout().is_terminal(),
            dumb: std::env::var("TERM").is_ok_and(|v| v == "dumb"),
            no_color: std::env::var_os("NO_COLOR").is_some(),
            width: columns_env().or_else(ioctl_width),
        }
    }
}

impl UiContext {
    /// Build the context for one command from its output flags and the
    /// global `--no-color` / `--ascii` switches.
    pub fn from_env(
        json_flag: bool,
        format_flag: Option<&str>,
        no_color_flag: bool,
        ascii_flag: bool,
    ) -> Self {
        Self::resolve(
            &Terminal::probe(),
            json_flag,
            format_flag,
            no_color_flag,
            ascii_flag,
        )
    }

    fn resolve(
        term: &Terminal,
        json_flag: bool,
        format_flag: Option<&str>,
        no_color_flag: bool,
        ascii_flag: bool,
    ) -> Self {
        Self {
            is_tty: term.stdout_tty,
            color: term.stdout_tty && !no_color_flag && !term.no_color && !term.dumb,
            unicode: !ascii_flag && !term.dumb,
            width: term.width.unwrap_or(FALLBACK_WIDTH),
            mode: OutputMode::resolve(json_flag, format_flag, term.stdout_tty, term.dumb),
        }
    }

    /// Prompts need both ends attached to a terminal.
    pub fn is_interactive(&self) -> bool {
        self.is_tty && std::io::stdin().is_terminal()
    }
}

fn columns_env() -> Option<usize> {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|cols| cols.trim().parse::<usize>().ok())
        .filter(|width| *width > 0)
}

#[cfg(unix)]
fn ioctl_width() -> Option<usize> {
    use std::mem::MaybeUninit;

    let mut winsize = MaybeUninit::<libc::winsize>::uninit();
    // SAFETY: TIOCGWINSZ only writes into the provided winsize buffer
    let result =
        unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, winsize.as_mut_ptr()) };
    if result != 0 {
        return None;
    }
    // SAFETY: ioctl returned success, so winsize was initialized
    let ws = unsafe { winsize.assume_init() };
    (ws.ws_col > 0).then_some(usize::from(ws.ws_col))
}

#[cfg(not(unix))]
fn ioctl_width() -> Option<usize> {
    None
}
