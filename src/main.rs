//! rink-tally binary entrypoint: a small terminal front over the scorekeeping core.

use std::io::{self, BufRead, Write};

use anyhow::Context;
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use rink_tally::{
    clock::SystemClock,
    config::AppConfig,
    dao::kv::{FileStore, KeyValueStore, MemoryStore},
    services::score_service::ScoreKeeper,
    state::game::{Counter, Side},
};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::load();
    let kv = open_store(&config);
    let mut keeper = ScoreKeeper::open(kv, Box::new(SystemClock), Box::new(SystemClock), &config);

    print_scoreboard(&keeper);
    println!("Type `help` for commands.");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        io::stdout().flush().ok();

        line.clear();
        let read = stdin
            .lock()
            .read_line(&mut line)
            .context("reading command")?;
        if read == 0 {
            break;
        }
        if !dispatch(&mut keeper, line.trim()) {
            break;
        }
    }

    Ok(())
}

/// Open the durable store, probing that it accepts writes; fall back to an
/// in-memory session when the medium is unusable.
fn open_store(config: &AppConfig) -> Box<dyn KeyValueStore> {
    let mut store = FileStore::open(config.data_path());
    let probe = store
        .set("__rt_probe__", "1")
        .and_then(|()| store.remove("__rt_probe__"));
    match probe {
        Ok(()) => Box::new(store),
        Err(err) => {
            warn!(error = %err, "storage not writable; scores will not survive this session");
            Box::new(MemoryStore::new())
        }
    }
}

/// Apply one command line; returns false when the session should end.
fn dispatch(keeper: &mut ScoreKeeper, line: &str) -> bool {
    let mut parts = line.splitn(2, ' ');
    let command = parts.next().unwrap_or_default();
    let rest = parts.next().unwrap_or_default().trim();

    match command {
        "" => {}
        "+hg" => keeper.increment(Counter::HomeGoals),
        "-hg" => keeper.decrement(Counter::HomeGoals),
        "+hs" => keeper.increment(Counter::HomeShots),
        "-hs" => keeper.decrement(Counter::HomeShots),
        "+ag" => keeper.increment(Counter::AwayGoals),
        "-ag" => keeper.decrement(Counter::AwayGoals),
        "+as" => keeper.increment(Counter::AwayShots),
        "-as" => keeper.decrement(Counter::AwayShots),
        "date" => keeper.set_game_date(rest.to_string()),
        "home" => keeper.set_team_name(Side::Home, rest.to_string()),
        "away" => keeper.set_team_name(Side::Away, rest.to_string()),
        "save" => {
            let id = keeper.save();
            println!("Saved game {id}.");
        }
        "reset" => keeper.reset(),
        "list" => {
            print_history(keeper);
            return true;
        }
        "load" => match parse_id(keeper, rest) {
            Some(id) => {
                if keeper.load_from_history(id) {
                    println!("Resumed game {id}.");
                } else {
                    println!("No saved game {id}.");
                }
            }
            None => println!("Usage: load <number from `list`>"),
        },
        "del" => match parse_id(keeper, rest) {
            Some(id) => {
                if keeper.delete_history_entry(id) {
                    println!("Deleted game {id}.");
                } else {
                    println!("No saved game {id}.");
                }
            }
            None => println!("Usage: del <number from `list`>"),
        },
        "clear" => {
            keeper.clear_history();
            println!("Cleared all saved games.");
        }
        "show" => {}
        "help" => {
            print_help();
            return true;
        }
        "quit" | "exit" => return false,
        other => {
            println!("Unknown command `{other}`; type `help`.");
            return true;
        }
    }

    print_scoreboard(keeper);
    true
}

/// Resolve a 1-based `list` index to an entry id.
fn parse_id(keeper: &ScoreKeeper, raw: &str) -> Option<Uuid> {
    let index: usize = raw.parse().ok()?;
    keeper
        .history_entries()
        .get(index.checked_sub(1)?)
        .map(|entry| entry.id)
}

fn print_scoreboard(keeper: &ScoreKeeper) {
    let board = keeper.scoreboard();
    println!();
    println!(
        "{} {} - {} {}  (shots {}-{})",
        board.home_label,
        board.home_goals,
        board.away_goals,
        board.away_label,
        board.home_shots,
        board.away_shots
    );
    println!(
        "{} goalie {}  |  {} goalie {}",
        board.home_label, board.home_goalie.text, board.away_label, board.away_goalie.text
    );
    if board.editing {
        println!("Editing a saved game; `save` will update it.");
    }
}

fn print_history(keeper: &ScoreKeeper) {
    let items = keeper.history_items();
    if items.is_empty() {
        println!("No saved games yet.");
        return;
    }
    for (index, item) in items.iter().enumerate() {
        println!("{}. {}", index + 1, item.title);
        println!("   {}", item.summary);
    }
}

fn print_help() {
    println!("Counters: +hg/-hg +hs/-hs +ag/-ag +as/-as (h=home, a=away, g=goals, s=shots)");
    println!("Setup:    date <YYYY-MM-DD>, home <name>, away <name>");
    println!("Games:    save, reset, list, load <n>, del <n>, clear");
    println!("Other:    show, help, quit");
}

/// Configure tracing subscribers so logs include spans by default.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "warn".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
