// Dockhand: replays a scripted dock session through the panel engine and
// prints the resulting layout.
//
// Usage: dockhand [--settings <path>] <session.json>

mod session;
mod workspace;

mod tests;

use std::path::PathBuf;

use dockhand_layout::{load_settings, load_settings_from, PanelSettings};

use session::load_session;
use workspace::Workspace;

struct Args {
    settings: Option<PathBuf>,
    session: PathBuf,
}

fn parse_args(args: &[String]) -> Option<Args> {
    let mut settings = None;
    let mut session = None;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--settings" => settings = Some(PathBuf::from(iter.next()?)),
            _ if session.is_none() => session = Some(PathBuf::from(arg)),
            _ => return None,
        }
    }
    Some(Args {
        settings,
        session: session?,
    })
}

fn resolve_settings(path: Option<&PathBuf>) -> PanelSettings {
    match path {
        Some(path) => load_settings_from(path).unwrap_or_else(|| {
            log::warn!("Falling back to default settings");
            PanelSettings::default()
        }),
        None => load_settings(),
    }
}

fn main() {
    env_logger::init();

    let argv: Vec<String> = std::env::args().skip(1).collect();
    let Some(args) = parse_args(&argv) else {
        eprintln!("usage: dockhand [--settings <path>] <session.json>");
        std::process::exit(2);
    };

    let settings = resolve_settings(args.settings.as_ref());
    let Some(session) = load_session(&args.session) else {
        std::process::exit(1);
    };
    let Some(mut workspace) = Workspace::from_session(&session, &settings) else {
        log::error!("Session layout has an unknown split direction");
        std::process::exit(1);
    };

    for command in &session.commands {
        workspace.apply(command);
    }
    print!("{}", workspace.render());
}
