use std::fmt;
use std::io::{self, BufRead, Write as _};
use std::sync::Arc;

use services::notify::{AnnouncementSink, Notification};
use services::{AppServices, GameSession, MatchingGame, QuizGame, TimelineGame};
use trek_core::model::{AccessibilityPrefs, EventId, PairId, TextSize};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidToggle { flag: &'static str, raw: String },
    InvalidTextSize { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidToggle { flag, raw } => {
                write!(f, "{flag} expects on or off, got: {raw}")
            }
            ArgsError::InvalidTextSize { raw } => {
                write!(f, "--text-size expects normal, large or larger, got: {raw}")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- play <timeline|quiz|matching> <topic> [--db <sqlite_url>]");
    eprintln!("  cargo run -p app -- progress [--db <sqlite_url>]");
    eprintln!("  cargo run -p app -- streak <done|missed> [--db <sqlite_url>]");
    eprintln!("  cargo run -p app -- achieve <subject> <action> [--db <sqlite_url>]");
    eprintln!("  cargo run -p app -- prefs [--text-size <normal|large|larger>]");
    eprintln!("                             [--high-contrast on|off] [--screen-reader on|off]");
    eprintln!("                             [--dyslexic-font on|off] [--db <sqlite_url>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite:trek.sqlite3");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  TREK_DB_URL");
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Play { kind: String, topic: String },
    Progress,
    Streak { completed: bool },
    Achieve { subject: String, action: String },
    Prefs(PrefsArgs),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct PrefsArgs {
    text_size: Option<TextSize>,
    high_contrast: Option<bool>,
    screen_reader: Option<bool>,
    dyslexic_font: Option<bool>,
}

impl PrefsArgs {
    fn is_empty(&self) -> bool {
        self.text_size.is_none()
            && self.high_contrast.is_none()
            && self.screen_reader.is_none()
            && self.dyslexic_font.is_none()
    }

    fn apply(&self, prefs: &mut AccessibilityPrefs) {
        if let Some(size) = self.text_size {
            prefs.text_size = size;
        }
        if let Some(value) = self.high_contrast {
            prefs.high_contrast = value;
        }
        if let Some(value) = self.screen_reader {
            prefs.screen_reader = value;
        }
        if let Some(value) = self.dyslexic_font {
            prefs.dyslexic_font = value;
        }
    }
}

fn parse_toggle(flag: &'static str, raw: &str) -> Result<bool, ArgsError> {
    match raw {
        "on" => Ok(true),
        "off" => Ok(false),
        _ => Err(ArgsError::InvalidToggle {
            flag,
            raw: raw.to_owned(),
        }),
    }
}

struct Args {
    db_url: String,
    command: Command,
}

fn parse_args(mut argv: Vec<String>) -> Result<Args, ArgsError> {
    let mut db_url = std::env::var("TREK_DB_URL")
        .ok()
        .map_or_else(|| "sqlite://trek.sqlite3".into(), normalize_sqlite_url);

    if argv.is_empty() {
        return Err(ArgsError::UnknownArg("<missing command>".to_owned()));
    }
    let command_name = argv.remove(0);

    let mut positionals = Vec::new();
    let mut prefs = PrefsArgs::default();
    let mut args = argv.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--db" => {
                let value = require_value(&mut args, "--db")?;
                if value.trim().is_empty() {
                    return Err(ArgsError::InvalidDbUrl { raw: value });
                }
                db_url = normalize_sqlite_url(value);
            }
            "--text-size" => {
                let value = require_value(&mut args, "--text-size")?;
                let size = value
                    .parse()
                    .map_err(|_| ArgsError::InvalidTextSize { raw: value })?;
                prefs.text_size = Some(size);
            }
            "--high-contrast" => {
                let value = require_value(&mut args, "--high-contrast")?;
                prefs.high_contrast = Some(parse_toggle("--high-contrast", &value)?);
            }
            "--screen-reader" => {
                let value = require_value(&mut args, "--screen-reader")?;
                prefs.screen_reader = Some(parse_toggle("--screen-reader", &value)?);
            }
            "--dyslexic-font" => {
                let value = require_value(&mut args, "--dyslexic-font")?;
                prefs.dyslexic_font = Some(parse_toggle("--dyslexic-font", &value)?);
            }
            _ if arg.starts_with("--") => return Err(ArgsError::UnknownArg(arg)),
            _ => positionals.push(arg),
        }
    }

    let mut positionals = positionals.into_iter();
    let command = match command_name.as_str() {
        "play" => Command::Play {
            kind: positionals.next().ok_or(ArgsError::MissingValue {
                flag: "play <kind>",
            })?,
            topic: positionals.next().ok_or(ArgsError::MissingValue {
                flag: "play <topic>",
            })?,
        },
        "progress" => Command::Progress,
        "streak" => {
            let value = positionals.next().ok_or(ArgsError::MissingValue {
                flag: "streak <done|missed>",
            })?;
            match value.as_str() {
                "done" => Command::Streak { completed: true },
                "missed" => Command::Streak { completed: false },
                _ => return Err(ArgsError::UnknownArg(value)),
            }
        }
        "achieve" => Command::Achieve {
            subject: positionals.next().ok_or(ArgsError::MissingValue {
                flag: "achieve <subject>",
            })?,
            action: positionals.next().ok_or(ArgsError::MissingValue {
                flag: "achieve <action>",
            })?,
        },
        "prefs" => Command::Prefs(prefs),
        _ => return Err(ArgsError::UnknownArg(command_name)),
    };

    Ok(Args { db_url, command })
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

/// Terminal rendering of the announcement surface.
struct ConsoleSink;

impl AnnouncementSink for ConsoleSink {
    fn announce(&self, notification: &Notification) {
        println!("* {notification}");
    }
}

fn prompt(text: &str) -> io::Result<Option<String>> {
    print!("{text}");
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_owned()))
}

async fn play_timeline(mut game: TimelineGame) -> io::Result<()> {
    println!("Arrange the events in chronological order.");
    loop {
        if !game.placed().is_empty() {
            println!("Placed so far:");
            for event in game.placed() {
                println!("    {} — {}", event.date(), event.description());
            }
        }
        println!("Still to place:");
        for event in game.pool() {
            println!("    [{}] {} ({})", event.id(), event.description(), event.date());
        }

        let Some(line) = prompt("Event id to place ('reset' to start over, 'quit' to stop): ")?
        else {
            break;
        };
        match line.as_str() {
            "quit" => break,
            "reset" => {
                game.reset();
                continue;
            }
            raw => {
                let Ok(id) = raw.parse::<EventId>() else {
                    println!("Not an event id: {raw}");
                    continue;
                };
                match game.place(id).await {
                    Ok(placement) => println!("{placement}"),
                    Err(err) => println!("{err}"),
                }
            }
        }
        if game.is_complete() {
            break;
        }
    }
    Ok(())
}

async fn play_quiz(mut game: QuizGame) -> io::Result<()> {
    loop {
        let question = game.question().clone();
        println!("{}", question.text());
        for (index, option) in question.options().iter().enumerate() {
            println!("    {}. {option}", index + 1);
        }

        let Some(line) = prompt("Answer number (blank to skip, 'quit' to stop): ")? else {
            break;
        };
        if line == "quit" {
            break;
        }

        let selected = if line.is_empty() {
            None
        } else {
            match line.parse::<usize>() {
                Ok(number) if number >= 1 => Some(number - 1),
                _ => {
                    println!("Not an option number: {line}");
                    continue;
                }
            }
        };

        match game.submit(selected).await {
            Ok(feedback) => println!("{feedback}"),
            Err(err) => println!("{err}"),
        }
    }
    println!("Correct answers this session: {}", game.correct_answers());
    Ok(())
}

async fn play_matching(mut game: MatchingGame) -> io::Result<()> {
    println!("Match each name card with its target.");
    loop {
        println!("Targets:");
        for pair in game.pairs() {
            let status = if game.is_matched(pair.id()) {
                "matched"
            } else {
                "open"
            };
            println!("    [{}] {} ({status})", pair.id(), pair.term());
        }
        println!("Name cards:");
        for pair in game.remaining_cards() {
            match pair.hint() {
                Some(hint) => println!("    [{}] {} — {hint}", pair.id(), pair.definition()),
                None => println!("    [{}] {}", pair.id(), pair.definition()),
            }
        }

        let Some(line) = prompt("Drop: <card id> <target id> ('quit' to stop): ")? else {
            break;
        };
        if line == "quit" {
            break;
        }

        let mut parts = line.split_whitespace();
        let (Some(card), Some(zone)) = (parts.next(), parts.next()) else {
            println!("Expected two ids, e.g.: 2 2");
            continue;
        };
        let (Ok(card), Ok(zone)) = (card.parse::<PairId>(), zone.parse::<PairId>()) else {
            println!("Not a pair of ids: {line}");
            continue;
        };

        match game.drop_card(card, zone).await {
            Ok(outcome) => println!("{outcome}"),
            Err(err) => println!("{err}"),
        }
        if game.is_complete() {
            break;
        }
    }
    Ok(())
}

fn print_progress(services: &AppServices) {
    let record = services.gamification().progress();
    println!("Points: {}", record.points());
    println!("Level:  {}", record.level());
    println!("Streak: {} days", record.streak());
    if record.badges().is_empty() {
        println!("Badges: none yet");
    } else {
        println!("Badges:");
        for badge in record.badges() {
            println!("    {badge}");
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    if matches!(argv.first().map(String::as_str), None | Some("--help" | "-h")) {
        print_usage();
        return Ok(());
    }

    let args = parse_args(argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    // Open + migrate SQLite at startup. Keep this in the binary glue so
    // core/services stay pure.
    tracing::debug!(db_url = %args.db_url, "opening storage");
    prepare_sqlite_file(&args.db_url)?;
    let sink: Arc<dyn AnnouncementSink> = Arc::new(ConsoleSink);
    let services = AppServices::new_sqlite(&args.db_url, sink).await?;

    match args.command {
        Command::Play { kind, topic } => {
            let session = match services.loader().start(&kind, &topic) {
                Ok(session) => session,
                Err(err) => {
                    // Not fatal: report and point at the retry path.
                    eprintln!("Could not start the game: {err}");
                    eprintln!("Try again with one of: timeline, quiz, matching");
                    return Ok(());
                }
            };
            match session {
                GameSession::Timeline(game) => play_timeline(game).await?,
                GameSession::Quiz(game) => play_quiz(game).await?,
                GameSession::Matching(game) => play_matching(game).await?,
            }
            services.loader().close();
            print_progress(&services);
        }
        Command::Progress => print_progress(&services),
        Command::Streak { completed } => {
            services.gamification().update_streak(completed).await;
            print_progress(&services);
        }
        Command::Achieve { subject, action } => {
            services
                .gamification()
                .track_achievement(&subject, &action)
                .await;
            print_progress(&services);
        }
        Command::Prefs(prefs_args) => {
            let preferences = services.preferences();
            let mut prefs = preferences.load().await?;
            if prefs_args.is_empty() {
                println!("Text size:     {}", prefs.text_size);
                println!("High contrast: {}", prefs.high_contrast);
                println!("Screen reader: {}", prefs.screen_reader);
                println!("Dyslexic font: {}", prefs.dyslexic_font);
            } else {
                prefs_args.apply(&mut prefs);
                preferences.save(&prefs).await?;
                println!("Preferences saved.");
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
