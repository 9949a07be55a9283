use std::fmt;
use std::path::PathBuf;

use storage::repository::Storage;
use vocab_core::model::{EntryDraft, ItemStat, ListId, QuestionMode, StatKey, VocabList};

#[derive(Debug, Clone)]
struct Args {
    store: PathBuf,
    list_id: String,
    list_name: String,
    with_stats: bool,
}

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidStore { raw: String },
    InvalidListId { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidStore { raw } => write!(f, "invalid --store value: {raw}"),
            ArgsError::InvalidListId { raw } => write!(f, "invalid --list-id value: {raw}"),
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

impl Args {
    fn parse() -> Result<Self, ArgsError> {
        let mut store = std::env::var("VOCAB_STORE_PATH")
            .map_or_else(|_| PathBuf::from("vocab.json"), PathBuf::from);
        let mut list_id = std::env::var("VOCAB_LIST_ID").unwrap_or_else(|_| "sample".into());
        let mut list_name =
            std::env::var("VOCAB_LIST_NAME").unwrap_or_else(|_| "Sample Words".into());
        let mut with_stats = false;

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
                "--list-id" => {
                    let value = require_value(&mut args, "--list-id")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidListId { raw: value });
                    }
                    list_id = value;
                }
                "--list-name" => {
                    list_name = require_value(&mut args, "--list-name")?;
                }
                "--with-stats" => with_stats = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            store,
            list_id,
            list_name,
            with_stats,
        })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p storage --bin seed -- [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --store <path>            JSON store file (default: vocab.json)");
    eprintln!("  --list-id <id>            List id to replace (default: sample)");
    eprintln!("  --list-name <name>        List name (default: Sample Words)");
    eprintln!("  --with-stats              Also write a few prior attempts");
    eprintln!("  -h, --help                Show this help");
    eprintln!();
    eprintln!("Environment (same as flags):");
    eprintln!("  VOCAB_STORE_PATH, VOCAB_LIST_ID, VOCAB_LIST_NAME");
}

const SAMPLES: &[(&str, &str, &str, &[&str], &[&str])] = &[
    (
        "banal",
        "so lacking in originality as to be obvious and boring",
        "The film was full of banal dialogue.",
        &["trite", "hackneyed"],
        &["original"],
    ),
    (
        "eschew",
        "deliberately avoid using; abstain from",
        "He eschewed the use of force.",
        &["avoid", "shun"],
        &["embrace"],
    ),
    (
        "laconic",
        "using very few words",
        "His laconic reply ended the discussion.",
        &["terse", "concise"],
        &["verbose"],
    ),
    (
        "ebullient",
        "cheerful and full of energy",
        "She was ebullient after the win.",
        &["exuberant"],
        &["gloomy"],
    ),
    (
        "obdurate",
        "stubbornly refusing to change one's opinion",
        "The manager remained obdurate.",
        &["stubborn", "intransigent"],
        &["amenable"],
    ),
    (
        "prosaic",
        "having the style of prose; lacking poetic beauty",
        "",
        &["ordinary"],
        &["imaginative"],
    ),
];

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse().map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let storage = Storage::json_file(&args.store)?;
    let list_id = ListId::new(args.list_id.clone())?;

    let mut list = VocabList::new(list_id.clone(), args.list_name.clone());
    for (word, definition, example, synonyms, antonyms) in SAMPLES {
        let entry = EntryDraft::new(*word, *definition)
            .with_example(*example)
            .with_synonyms(synonyms.iter().copied())
            .with_antonyms(antonyms.iter().copied())
            .validate()?;
        list.add_word(entry)?;
    }

    let mut lists = storage.lists.load_lists()?;
    lists.retain(|existing| existing.id() != &list_id);
    lists.push(list);
    storage.lists.save_lists(&lists)?;

    if args.with_stats {
        let key = StatKey::new(list_id.clone(), "banal", QuestionMode::SpellingToWord);
        storage.stats.save_stat(&key, ItemStat::from_persisted(4, 3))?;
        let key = StatKey::new(list_id, "eschew", QuestionMode::SpellingToWord);
        storage.stats.save_stat(&key, ItemStat::from_persisted(4, 1))?;
    }

    println!(
        "Seeded list {} with {} words into {}",
        args.list_id,
        SAMPLES.len(),
        args.store.display()
    );

    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
