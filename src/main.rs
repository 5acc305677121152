use std::io;
use std::process::ExitCode;

use racing_kings::visualization::{Session, THEME_ENV, TerminalDisplay, Theme};

fn main() -> ExitCode {
    let theme = Theme::from_env().unwrap_or_else(|e| {
        eprintln!("Ignoring {THEME_ENV}: {e}");
        None
    });
    let display = TerminalDisplay::stdout(theme.unwrap_or(Theme::Dark));

    let mut session = Session::new(io::stdin().lock(), io::stdout(), display).with_theme(theme);
    match session.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("racing-kings: {e}");
            ExitCode::FAILURE
        }
    }
}
