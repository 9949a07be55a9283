use std::fmt;
use std::path::PathBuf;

use rand::SeedableRng;
use rand::rngs::StdRng;
use services::{Clock, StudyService};
use storage::repository::Storage;
use tracing::debug;
use vocab_core::model::{
    ConfigError, ContentKind, Direction, ListId, MissingRelationPolicy, SessionConfig,
    SessionMode, SynAntPrompt,
};

mod logging;
mod terminal;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidStore { raw: String },
    InvalidListId { raw: String },
    InvalidSeed { raw: String },
    InvalidOption { flag: &'static str, source: ConfigError },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidStore { raw } => write!(f, "invalid --store value: {raw}"),
            ArgsError::InvalidListId { raw } => write!(f, "invalid --list value: {raw}"),
            ArgsError::InvalidSeed { raw } => write!(f, "invalid --seed value: {raw}"),
            ArgsError::InvalidOption { flag, source } => {
                write!(f, "invalid {flag} value: {source}")
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

fn parse_option<T>(value: &str, flag: &'static str) -> Result<T, ArgsError>
where
    T: std::str::FromStr<Err = ConfigError>,
{
    value
        .parse()
        .map_err(|source| ArgsError::InvalidOption { flag, source })
}

#[derive(Debug, Clone)]
struct Args {
    store: PathBuf,
    lists: Vec<ListId>,
    content: ContentKind,
    direction: Direction,
    session_mode: SessionMode,
    syn_ant_prompt: SynAntPrompt,
    missing_relation: MissingRelationPolicy,
    seed: Option<u64>,
    show_lists: bool,
}

impl Args {
    fn parse() -> Result<Self, ArgsError> {
        let mut store = std::env::var("VOCAB_STORE_PATH")
            .map_or_else(|_| PathBuf::from("vocab.json"), PathBuf::from);
        let mut lists = Vec::new();
        let mut content = ContentKind::default();
        let mut direction = Direction::default();
        let mut session_mode = SessionMode::default();
        let mut syn_ant_prompt = SynAntPrompt::default();
        let mut missing_relation = MissingRelationPolicy::default();
        let mut seed = None;
        let mut show_lists = false;

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--store" => {
                    let value = require_value(&mut args, "--store")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidStore { raw: value });
                    }
                    store = PathBuf::from(value);
                }
                "--list" => {
                    let value = require_value(&mut args, "--list")?;
                    let id = ListId::new(value.clone())
                        .map_err(|_| ArgsError::InvalidListId { raw: value })?;
                    lists.push(id);
                }
                "--content" => {
                    let value = require_value(&mut args, "--content")?;
                    content = parse_option(&value, "--content")?;
                }
                "--direction" => {
                    let value = require_value(&mut args, "--direction")?;
                    direction = parse_option(&value, "--direction")?;
                }
                "--mode" => {
                    let value = require_value(&mut args, "--mode")?;
                    session_mode = parse_option(&value, "--mode")?;
                }
                "--prompt" => {
                    let value = require_value(&mut args, "--prompt")?;
                    syn_ant_prompt = parse_option(&value, "--prompt")?;
                }
                "--skip-missing" => missing_relation = MissingRelationPolicy::SkipEntry,
                "--seed" => {
                    let value = require_value(&mut args, "--seed")?;
                    let parsed = value
                        .parse::<u64>()
                        .map_err(|_| ArgsError::InvalidSeed { raw: value.clone() })?;
                    seed = Some(parsed);
                }
                "--show-lists" => show_lists = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            store,
            lists,
            content,
            direction,
            session_mode,
            syn_ant_prompt,
            missing_relation,
            seed,
            show_lists,
        })
    }

    fn session_config(&self) -> SessionConfig {
        SessionConfig::new(self.content, self.direction, self.session_mode)
            .with_syn_ant_prompt(self.syn_ant_prompt)
            .with_missing_relation(self.missing_relation)
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --store <path>            JSON list store (default: vocab.json)");
    eprintln!("  --list <id>               List to study; repeat for more (default: all lists)");
    eprintln!("  --content <kind>          spelling | definition | synonym | antonym");
    eprintln!("  --direction <dir>         toWord | toAnswer (spelling always asks for the word)");
    eprintln!("  --mode <mode>             normal | learning | test (default: normal)");
    eprintln!("  --prompt <style>          random | all, for synonym/antonym sessions");
    eprintln!("  --skip-missing            Leave out words without synonyms/antonyms");
    eprintln!("  --seed <n>                Seed the question order");
    eprintln!("  --show-lists              Print the stored lists and exit");
    eprintln!("  -h, --help                Show this help");
    eprintln!();
    eprintln!(
        "While studying, type {} to reveal the answer and {} to stop.",
        terminal::SHOW_COMMAND,
        terminal::QUIT_COMMAND
    );
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  VOCAB_STORE_PATH          Same as --store");
    eprintln!("  {}                 Log filter (default: warn)", logging::LOG_ENV);
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse().map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    logging::init_tracing();

    let storage = Storage::json_file(&args.store)?;
    debug!(store = %args.store.display(), "opened list store");
    let service = StudyService::new(Clock::system(), &storage);
    let lists = service.lists()?;

    if args.show_lists {
        for list in &lists {
            println!("{}\t{}\t{} words", list.id(), list.name(), list.len());
        }
        return Ok(());
    }

    let selected = if args.lists.is_empty() {
        lists.iter().map(|list| list.id().clone()).collect()
    } else {
        args.lists.clone()
    };

    let config = args.session_config();
    let mut session = match args.seed {
        Some(seed) => {
            service.start_session_with_rng(&selected, config, StdRng::seed_from_u64(seed))?
        }
        None => service.start_session(&selected, config)?,
    };
    let lookup = service.lookup()?;

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    terminal::run_quiz(&mut session, &lookup, &mut stdin.lock(), &mut stdout.lock())?;
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
