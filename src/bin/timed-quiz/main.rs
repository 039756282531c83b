//! Terminal front end for the timed quiz
//!
//! Reads one answer per line from stdin while a one second countdown runs.
//! Answers may be typed as the option number or as the option text.

#![cfg_attr(all(coverage_nightly, test), feature(coverage_attribute))]

mod terminal;

use std::{error::Error, io::BufRead, path::PathBuf, thread};

use clap::Parser;
use garde::Validate;
use log::{info, warn};
use timed_quiz::{
    game::QuizSession,
    quiz::{Quiz, bank},
    session::Tunnel,
    timer::Alarms,
};
use tokio::sync::mpsc;
use web_time::Duration;

use terminal::Terminal;

#[derive(Debug, Parser)]
#[command(version, about = "Timed multiple choice quiz in the terminal")]
struct Cli {
    /// JSON question bank to use instead of the built-in one
    #[arg(long)]
    bank: Option<PathBuf>,

    /// Countdown in seconds for the whole quiz
    #[arg(long)]
    time_limit: Option<u64>,

    /// Print the final results as JSON
    #[arg(long)]
    json: bool,
}

fn load_quiz(cli: &Cli) -> Result<Quiz, Box<dyn Error>> {
    let quiz = match &cli.bank {
        Some(path) => Quiz::load(path)?,
        None => bank::DEFAULT.clone(),
    };

    match cli.time_limit {
        Some(seconds) => {
            let quiz = quiz.with_time_limit(Duration::from_secs(seconds));
            quiz.validate()?;
            Ok(quiz)
        }
        None => Ok(quiz),
    }
}

/// Forwards stdin lines over a channel from a detached thread
///
/// A blocking read cannot be cancelled, so the thread is never joined and
/// is torn down with the process.
fn spawn_input_reader() -> mpsc::UnboundedReceiver<String> {
    let (sender, receiver) = mpsc::unbounded_channel();

    thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if sender.send(line).is_err() {
                        break;
                    }
                }
                Err(error) => {
                    warn!("failed to read input: {error}");
                    break;
                }
            }
        }
    });

    receiver
}

/// Drives `session` until it finishes or `input` closes
///
/// Returns as soon as the session finishes, whether or not more input is
/// pending. Outstanding ticks are cancelled before returning.
async fn run<T: Tunnel>(
    session: &mut QuizSession,
    tunnel: &T,
    mut input: mpsc::UnboundedReceiver<String>,
) {
    let (mut alarms, mut alarm_receiver) = Alarms::new();

    session.play(tunnel, |message, delay| alarms.schedule(message, delay));

    while !session.is_finished() {
        tokio::select! {
            Some(alarm) = alarm_receiver.recv() => {
                session.receive_alarm(
                    tunnel,
                    |message, delay| alarms.schedule(message, delay),
                    &alarm,
                );
            }
            line = input.recv() => {
                let Some(line) = line else {
                    info!("input closed before the quiz finished");
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                let Some(question) = session.current_question() else {
                    continue;
                };
                let choice = terminal::resolve_choice(question, &line);
                // rejections are already reported through the tunnel
                let _ = session.submit(tunnel, &choice);
            }
        }
    }

    alarms.cancel_all();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    let quiz = load_quiz(&cli)?;
    let terminal = Terminal::new(cli.json);

    let mut session = QuizSession::new(quiz);
    run(&mut session, &terminal, spawn_input_reader()).await;
    terminal.close();

    Ok(())
}
