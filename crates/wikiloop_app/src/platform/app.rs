use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use clap::Parser;
use wikiloop_core::{update, AppViewModel, FieldId, Msg, SessionState};
use wikiloop_engine::EngineHandle;
use wikiloop_logging::{wl_debug, wl_error, wl_info};

use super::config::Cli;
use super::effects::EffectRunner;
use super::logging;
use super::ui::commands::{self, Command, HELP};
use super::ui::render::{self, TITLE};

/// Everything the event loop reacts to.
pub enum AppEvent {
    Msg(Msg),
    Help,
    Quit,
}

pub fn run_app() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::initialize(cli.log);

    let engine =
        EngineHandle::new(cli.client_settings()).context("failed to set up the journey client")?;
    wl_info!("Journey endpoint {}", cli.endpoint);

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let runner = EffectRunner::new(engine, event_tx.clone());
    runner.probe();

    let mut shell = Shell::new(seeded_state(cli.start, cli.stop), runner);
    writeln!(io::stdout(), "{TITLE}").context("failed to write to stdout")?;
    shell.render_now().context("failed to write to stdout")?;
    writeln!(io::stdout(), "{HELP}").context("failed to write to stdout")?;

    spawn_input_reader(event_tx);

    while let Ok(event) = event_rx.recv() {
        let written = match event {
            AppEvent::Msg(msg) => shell.dispatch(msg),
            AppEvent::Help => writeln!(io::stdout(), "{HELP}"),
            AppEvent::Quit => break,
        };
        if let Err(err) = written {
            wl_error!("Cannot write to stdout, ending session: {}", err);
            break;
        }
    }

    shell.runner.shutdown();
    wl_info!("Session ended");
    Ok(())
}

/// Fresh session with the command-line seed overrides applied through the
/// same path as typed edits. The result is not dirty: the caller renders it.
fn seeded_state(start: Option<String>, stop: Option<String>) -> SessionState {
    let mut state = SessionState::new();
    for (field, text) in [(FieldId::Start, start), (FieldId::Stop, stop)] {
        if let Some(text) = text {
            let (next, _effects) = update(state, Msg::FieldEdited { field, text });
            state = next;
        }
    }
    state.consume_dirty();
    state
}

/// Owns the session state; the only place it is replaced.
struct Shell {
    state: SessionState,
    runner: EffectRunner,
}

impl Shell {
    fn new(state: SessionState, runner: EffectRunner) -> Self {
        Self { state, runner }
    }

    fn dispatch(&mut self, msg: Msg) -> io::Result<()> {
        wl_debug!("dispatch {:?}", msg);
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        let view = state.view();
        self.state = state;

        self.runner.enqueue(effects);
        if was_dirty {
            write_view(&mut io::stdout().lock(), &view)?;
        }
        Ok(())
    }

    fn render_now(&self) -> io::Result<()> {
        write_view(&mut io::stdout().lock(), &self.state.view())
    }
}

fn write_view(out: &mut impl Write, view: &AppViewModel) -> io::Result<()> {
    for line in render::render(view) {
        writeln!(out, "{line}")?;
    }
    out.flush()
}

fn spawn_input_reader(event_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            let event = match commands::parse(&line) {
                Ok(Some(Command::Edit { field, text })) => {
                    AppEvent::Msg(Msg::FieldEdited { field, text })
                }
                Ok(Some(Command::Submit)) => AppEvent::Msg(Msg::SubmitClicked),
                Ok(Some(Command::Help)) => AppEvent::Help,
                Ok(Some(Command::Quit)) => AppEvent::Quit,
                Ok(None) => continue,
                Err(err) => {
                    println!("{err}");
                    continue;
                }
            };
            if event_tx.send(event).is_err() {
                return;
            }
        }
        // End of input ends the session.
        let _ = event_tx.send(AppEvent::Quit);
    });
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use wikiloop_core::Phase;

    use super::*;

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn seed_overrides_apply_without_pending_render() {
        let mut state = seeded_state(
            Some("https://en.wikipedia.org/wiki/Ice".to_string()),
            Some("not a url".to_string()),
        );

        assert!(!state.consume_dirty());
        assert_eq!(
            state.start_field().normalized(),
            "https://en.wikipedia.org/wiki/ice"
        );
        assert!(!state.stop_field().is_valid());
        assert_eq!(state.phase(), Phase::Idle);
    }

    #[test]
    fn no_overrides_keep_the_default_seeds() {
        assert_eq!(seeded_state(None, None), SessionState::new());
    }

    #[test]
    fn view_is_written_once_per_call() {
        let mut out = Vec::new();
        write_view(&mut out, &SessionState::new().view()).expect("write");

        let text = String::from_utf8(out).expect("utf8");
        assert_eq!(text.matches("Define your journey").count(), 1);
    }

    #[test]
    fn write_errors_are_reported() {
        let err = write_view(&mut BrokenPipe, &SessionState::new().view()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
