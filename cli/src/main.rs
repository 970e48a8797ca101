use std::fs::{self, File};
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use photobingo_core::{CellIndex, GameSession, WinEngine};
use photobingo_protocol::*;
use serde::de::DeserializeOwned;

const USERS_FILE: &str = "users.json";
const GAMESTATES_FILE: &str = "gamestates.json";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,

    /// Directory holding users.json and gamestates.json
    #[arg(short, long, global = true, default_value = "data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the progress report of every user as CSV
    Report {
        /// Output file, `-` for stdout [default: bingo_report_<date>.csv]
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show a player's board the way it looks after they log in
    Status {
        /// Id of the player
        user_id: String,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.verbose.tracing_level_filter())
        .with_writer(io::stderr)
        .init();

    let engine = WinEngine::standard();
    match args.command {
        Command::Report { output } => report(&engine, &args.data_dir, output),
        Command::Status { user_id } => status(&engine, &args.data_dir, &user_id),
    }
}

fn report(engine: &WinEngine, data_dir: &Path, output: Option<PathBuf>) -> Result<()> {
    let users: Vec<UserRecord> = read_json(&data_dir.join(USERS_FILE))?;
    let states = read_game_states(data_dir)?;
    let rows =
        build_report(engine, &users, &states).context("Could not classify stored boards")?;
    let csv = render_csv(&rows);

    let output = output.unwrap_or_else(default_report_path);
    if output == Path::new("-") {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{csv}")?;
    } else {
        fs::write(&output, csv)
            .with_context(|| format!("Could not write report to {}", output.display()))?;
        log::info!("Wrote {} users to {}", rows.len(), output.display());
    }
    Ok(())
}

fn status(engine: &WinEngine, data_dir: &Path, user_id: &str) -> Result<()> {
    let states = read_game_states(data_dir)?;
    let Some(record) = states.get(user_id) else {
        bail!("No stored game for user {user_id}");
    };

    let layout = standard_layout();
    let restored = record
        .restore(engine, &layout)
        .with_context(|| format!("Stored board of user {user_id} is invalid"))?;
    if restored.was_reset {
        log::warn!("User {user_id} has a board from an older layout, it resets on next login");
    }

    let session = &restored.session;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", render_board(session, &layout))?;
    writeln!(stdout, "Status: {}", session.status())?;
    writeln!(stdout, "Images uploaded: {}", session.uploads())?;
    if let Some(celebration) = &restored.evaluation.celebration {
        writeln!(stdout, "Celebration: {}", celebration.label)?;
    }
    Ok(())
}

/// Grid of cell labels; cells with a photo are bracketed, cells on a completed
/// line starred.
fn render_board(session: &GameSession, layout: &[CellLabel]) -> String {
    let config = session.engine().config();
    let size = usize::from(config.size);
    layout
        .chunks(size)
        .enumerate()
        .map(|(row, labels)| {
            labels
                .iter()
                .enumerate()
                .map(|(column, label)| {
                    let index = (row * size + column) as CellIndex;
                    let mark = if session.covered().contains(&index) { '*' } else { ' ' };
                    if session.occupied().contains(index) {
                        format!("[{label:>4}]{mark}")
                    } else {
                        format!(" {label:>4} {mark}")
                    }
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn read_game_states(data_dir: &Path) -> Result<GameStates> {
    let path = data_dir.join(GAMESTATES_FILE);
    if !path.exists() {
        log::warn!("{} does not exist, no games were started yet", path.display());
        return Ok(GameStates::new());
    }
    read_json(&path)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).with_context(|| format!("Could not open {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Could not parse {}", path.display()))
}

fn default_report_path() -> PathBuf {
    let today = time::OffsetDateTime::now_utc().date();
    PathBuf::from(format!("bingo_report_{today}.csv"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use photobingo_core::{MilestoneState, OccupiedSet, SessionState};

    #[test]
    fn board_marks_photos_and_completed_lines() {
        let engine = WinEngine::standard();
        let occupied = OccupiedSet::from_indices(*engine.config(), 0..10).unwrap();
        let (session, _) = GameSession::restore(
            engine,
            occupied,
            MilestoneState::default(),
            SessionState::Active,
        )
        .unwrap();

        let board = render_board(&session, &standard_layout());
        let rows: Vec<&str> = board.lines().collect();

        assert_eq!(rows.len(), 9);
        assert!(rows[0].starts_with("[  17]*[   2]*"));
        assert!(rows[1].starts_with("[   7] "));
        assert!(rows[4].contains("FREE"));
    }

    #[test]
    fn report_file_name_carries_date() {
        let name = default_report_path();
        let name = name.to_string_lossy();

        assert!(name.starts_with("bingo_report_20"));
        assert!(name.ends_with(".csv"));
    }
}
