use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;

use chrono::Utc;
use review_core::{update, Msg, ReviewState};
use review_engine::generate_session_label;
use review_logging::{review_debug, review_info};

use super::display::TerminalDisplay;
use super::effects::EffectRunner;
use super::input::{parse_line, AppEvent, HELP};
use super::render::render;
use crate::config::AppConfig;

pub fn run_app(config: AppConfig) -> anyhow::Result<()> {
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();

    let display = Box::new(TerminalDisplay::new(io::stdout()));
    let mut runner = EffectRunner::new(&config.engine_config(), display, event_tx.clone())?;
    spawn_stdin_reader(event_tx);

    let mut state = ReviewState::new(config.mode.into());
    print_lines(&render(&state.view()));

    if let Some(label) = initial_label(&config) {
        review_info!("Starting session for {}", label);
        dispatch(&mut state, &mut runner, Msg::RaterLabelChanged(label));
        dispatch(&mut state, &mut runner, Msg::StartClicked);
    }

    for event in event_rx {
        match event {
            AppEvent::Msg(msg) => dispatch(&mut state, &mut runner, msg),
            AppEvent::Help => println!("{HELP}"),
            AppEvent::Unknown(line) => {
                println!("Unknown command '{line}'. Type `help` for commands.");
            }
            AppEvent::Quit => break,
        }
    }

    review_info!("Leaving with {} decisions recorded", state.ledger().len());
    Ok(())
}

fn initial_label(config: &AppConfig) -> Option<String> {
    match &config.rater {
        Some(rater) if !rater.trim().is_empty() => Some(rater.clone()),
        _ if config.anonymous => Some(generate_session_label(&mut rand::thread_rng())),
        _ => None,
    }
}

fn dispatch(state: &mut ReviewState, runner: &mut EffectRunner, msg: Msg) {
    review_debug!("dispatch {:?}", msg);
    let (next, effects) = update(std::mem::take(state), msg);
    *state = next;
    let was_dirty = state.consume_dirty();
    runner.run(effects);
    if was_dirty {
        print_lines(&render(&state.view()));
    }
}

fn spawn_stdin_reader(event_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            for event in parse_line(&line, Utc::now()) {
                if event_tx.send(event).is_err() {
                    return;
                }
            }
        }
        let _ = event_tx.send(AppEvent::Quit);
    });
}

fn print_lines(lines: &[String]) {
    let mut out = io::stdout().lock();
    for line in lines {
        let _ = writeln!(out, "{line}");
    }
    let _ = out.flush();
}
