use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use log::{info, warn};
use wortform_cards::{EngineConfig, WordCard};
use wortform_protocol::{DeterminerType, Entry, Person, Tense};

#[derive(Parser)]
#[command(author, version, about = "Compiles dictionary records and prints their paradigms")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compile a JSON array of dictionary records into an rkyv lexicon
    Compile {
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        #[arg(long, default_value_t = 1)]
        lexicon_version: u32,
    },
    /// Print the declension or conjugation grid of a single record
    Show {
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Determiner type for nouns
        #[arg(short, long, default_value = "definite")]
        determiner: DeterminerType,

        /// Possessor for possessive determiners (1sg, 2sg, 3sg-masc, ..., formal2)
        #[arg(short, long)]
        person: Option<Person>,

        /// Engine configuration (JSON)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
}

fn load_config(path: Option<&Path>) -> anyhow::Result<EngineConfig> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path).with_context(|| format!("reading config {:?}", path))?;
            Ok(serde_json::from_str(&text).with_context(|| format!("parsing config {:?}", path))?)
        }
        None => Ok(EngineConfig::default()),
    }
}

fn compile(input: &Path, output: &Path, version: u32) -> anyhow::Result<()> {
    println!("📖 Reading records from {:?}...", input);
    let json = fs::read_to_string(input)?;

    let (lexicon, rejected) = wortform_parser::ingest_lexicon(&json, version)?;
    for (index, err) in &rejected {
        warn!("record #{} skipped: {}", index, err);
    }
    println!(
        "⚙️  Compiling lexicon version {} with {} entries ({} skipped)...",
        lexicon.version,
        lexicon.entries.len(),
        rejected.len()
    );

    let bytes = wortform_parser::compile_lexicon(&lexicon)?;
    fs::write(output, &bytes)?;

    println!("✅ Success! Binary written to {:?}", output);
    Ok(())
}

fn show(input: &Path, determiner: DeterminerType, person: Option<Person>, config: &EngineConfig) -> anyhow::Result<()> {
    let json = fs::read_to_string(input)?;
    let entry = wortform_parser::ingest_record(&json)?;
    info!("loaded {} '{}'", entry.part_of_speech(), entry.lemma());

    if determiner == DeterminerType::Possessive && person.is_none() {
        bail!("--person is required for possessive determiners");
    }

    let card = WordCard::new(entry);
    match card.entry() {
        Entry::Noun(_) => {
            let partner = config.comparison.partner(determiner);
            let comparison = match partner {
                Some(partner) => Some(card.noun_grid(partner, person)?),
                None => None,
            };
            let cells = card.noun_grid(determiner, person)?;
            for (i, cell) in cells.iter().enumerate() {
                let phrase = cell
                    .form
                    .spoken_form()
                    .map(|spoken| spoken.text)
                    .unwrap_or_else(|| wortform_morph::PLACEHOLDER.to_string());
                let marker = if cell.form.is_selectable() { "" } else { " (n/a)" };
                let paired = comparison
                    .as_ref()
                    .and_then(|cells| cells[i].form.spoken_form())
                    .map(|spoken| format!("   | {}", spoken.text))
                    .unwrap_or_default();
                println!(
                    "{:<9} {:<11} {}{}{}",
                    cell.params.number.to_string(),
                    cell.params.case.to_string(),
                    phrase,
                    marker,
                    paired
                );
            }
        }
        Entry::Verb(_) => {
            let cells = card.verb_grid()?;
            for tense in Tense::ALL {
                println!("{}", tense);
                for cell in cells.iter().filter(|cell| cell.tense == tense) {
                    println!("  {:<10} {}", cell.slot.label(), cell.form.surface);
                }
            }
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Compile {
            input,
            output,
            lexicon_version,
        } => compile(&input, &output, lexicon_version),
        Command::Show {
            input,
            determiner,
            person,
            config,
        } => {
            let config = load_config(config.as_deref())?;
            show(&input, determiner, person, &config)
        }
    }
}
