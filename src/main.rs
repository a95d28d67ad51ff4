//! FracQuest: fraction practice mini-games in the terminal
//!
//! Plays one waypoint per run: tutorial → playing → complete, with the
//! completion tuple recorded to the progress file at the end. `--list`
//! shows the quest map and `--report` prints the teacher overview.

use std::error::Error;
use std::thread;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use fracquest::analytics;
use fracquest::cli::{Display, InputHandler};
use fracquest::session::{
    record_completion, AnswerOutcome, GamePhase, GameSession, JsonFileStore, MemoryStore,
    MistakeTracker, ProgressStore,
};
use fracquest::waypoint::{WaypointConfig, WaypointSet};

/// Pause after a correct answer before the next question
const FEEDBACK_PAUSE: Duration = Duration::from_millis(1500);
/// Shorter pause after a wrong answer, before the same question returns
const RETRY_PAUSE: Duration = Duration::from_millis(1000);

#[derive(Parser, Debug)]
#[command(name = "FracQuest")]
#[command(about = "Fraction practice mini-games: add, subtract and compare")]
struct Args {
    /// Student identifier recorded with progress
    #[arg(short, long, default_value = "guest")]
    student: String,

    /// Waypoint to play (see --list); defaults to the first on the map
    #[arg(short, long)]
    waypoint: Option<String>,

    /// Waypoint map override file
    #[arg(long, default_value = "data/waypoints.json")]
    waypoints_file: String,

    /// Progress file
    #[arg(short, long, default_value = "data/progress.json")]
    progress: String,

    /// List waypoints and exit
    #[arg(long)]
    list: bool,

    /// Print the teacher report and exit
    #[arg(long)]
    report: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("fracquest=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_logging(args.debug);

    let waypoints = WaypointSet::load(&args.waypoints_file)?;

    if args.list {
        println!("🗺️  FracQuest waypoints:");
        for w in waypoints.iter() {
            println!(
                "  {:<18} {} ({}, {} rounds, cap {})",
                w.id, w.title, w.kind, w.rules.rounds, w.rules.score_cap
            );
        }
        return Ok(());
    }

    if args.report {
        return print_report(&args.progress);
    }

    let config = match args.waypoint.as_deref() {
        Some(id) => waypoints
            .get(id)
            .ok_or_else(|| format!("unknown waypoint `{}` (try --list)", id))?,
        None => waypoints.first().ok_or("waypoint map is empty")?,
    }
    .clone();

    run_game(&args, &config)
}

/// Teacher overview: per-waypoint and per-student aggregates
fn print_report(progress_path: &str) -> Result<(), Box<dyn Error>> {
    let store = JsonFileStore::open(progress_path)?;
    let records = store.all()?;
    if records.is_empty() {
        println!("No progress recorded yet.");
        return Ok(());
    }

    println!("📊 Waypoint overview");
    for s in analytics::waypoint_summaries(&records) {
        println!(
            "  {:<18} students: {:>3}  |  completed: {:>3.0}%  |  avg score: {:>5.1}  |  avg accuracy: {:>3.0}%",
            s.waypoint_id,
            s.students,
            s.completion_rate * 100.0,
            s.average_score,
            s.average_accuracy * 100.0
        );
    }

    println!("\n🎓 Students");
    let mut students: Vec<&str> = records.iter().map(|r| r.student_id.as_str()).collect();
    students.sort();
    students.dedup();
    for student in students {
        let s = analytics::student_summary(&records, student);
        println!(
            "  {:<18} waypoints: {}/{}  |  attempts: {:>4}  |  accuracy: {:>3.0}%  |  time: {}s",
            s.student_id,
            s.waypoints_completed,
            s.waypoints_played,
            s.total_attempts,
            s.overall_accuracy * 100.0,
            s.total_time_secs
        );
    }
    Ok(())
}

/// Event loop for one waypoint
fn run_game(args: &Args, config: &WaypointConfig) -> Result<(), Box<dyn Error>> {
    let mut rng = rand::thread_rng();
    let display = Display::new()?;

    // An unusable progress file must not block play: fall back to an
    // in-memory store and let the completion screen say the save failed
    let mut store: Box<dyn ProgressStore> = match JsonFileStore::open(&args.progress) {
        Ok(store) => Box::new(store),
        Err(e) => {
            tracing::warn!(error = %e, "progress file unusable; playing without saved progress");
            Box::new(MemoryStore::new())
        }
    };

    let mut session = GameSession::new(config.kind, config.rules);
    let mut mistakes = MistakeTracker::new();

    InputHandler::enable_raw_mode()?;
    let input = InputHandler::new();

    'game: loop {
        match session.phase {
            GamePhase::Tutorial => {
                display.clear()?;
                display.show_title(&config.title, config.kind)?;
                display.show_tutorial(config.kind)?;

                let key = input.wait_key()?;
                if InputHandler::is_exit(&key) {
                    break 'game;
                }
                session.begin(&mut rng)?;
            }

            GamePhase::Playing => {
                let question = match session.current_question() {
                    Some(q) => q.clone(),
                    None => break 'game,
                };

                display.clear()?;
                display.show_title(&config.title, config.kind)?;
                display.show_question(
                    session.rounds_cleared + 1,
                    session.rules().rounds,
                    &question,
                )?;
                display.show_progress(
                    session.score,
                    session.rules(),
                    session.mistakes,
                    session.attempts,
                )?;
                display.show_help(question.choices.len())?;

                let key = match input.read_key()? {
                    Some(key) => key,
                    None => continue,
                };
                if InputHandler::is_exit(&key) {
                    // Abandoning mid-session is always allowed; partial
                    // state is simply discarded
                    break 'game;
                }
                let Some(index) = InputHandler::choice_index(&key, question.choices.len()) else {
                    continue;
                };
                let chosen = question.choices[index].text.clone();

                match session.submit(&chosen, &mut rng)? {
                    AnswerOutcome::Correct { .. } => {
                        display.show_correct(&question.answer, question.teaching_step().as_deref())?;
                        thread::sleep(FEEDBACK_PAUSE);
                    }
                    AnswerOutcome::Incorrect => {
                        let coaching = question.slip_for(&chosen).map(|slip| {
                            mistakes.record(slip);
                            slip.coaching()
                        });
                        display.show_incorrect(coaching)?;
                        thread::sleep(RETRY_PAUSE);
                    }
                }
            }

            GamePhase::Complete => {
                let summary = session.summary()?;
                // Best-effort write: the completion screen shows either way
                let saved =
                    record_completion(store.as_mut(), &args.student, &config.id, &summary).is_ok();
                display.show_summary(&summary, &mistakes.summary(), saved)?;

                let key = input.wait_key()?;
                if InputHandler::is_retry(&key) {
                    mistakes.reset();
                    session.retry(true, &mut rng);
                } else {
                    break 'game;
                }
            }
        }
    }

    InputHandler::disable_raw_mode()?;
    display.clear()?;
    println!("🌈 Thanks for practicing with FracQuest!");

    Ok(())
}
