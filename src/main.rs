use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use console::{style, Term};
use log::info;

use split_decisions::output::{self, Summary};
use split_decisions::{ConstraintsFinder, Settings, Verbosity, WordPairFinder, Wordlist};

/// Split Decisions puzzle pieces: word pairs, mistakeables and anchors.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// The reference wordlist every pair is drawn from
    #[clap(short, long, value_parser, value_name = "FILE")]
    words: PathBuf,

    /// The wordlist of words that may be placed on a board
    #[clap(short, long, value_parser, value_name = "FILE")]
    usable: Option<PathBuf>,

    /// Where to write the constrained word pairs (stdout if omitted)
    #[clap(short, long, value_parser, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Where to write every word pair found, with its usability
    #[clap(short, long, value_parser, value_name = "FILE")]
    pairs_output: Option<PathBuf>,

    /// Shortest word to consider
    #[clap(long, value_parser, default_value_t = 3)]
    min_length: usize,

    /// Longest word to consider
    #[clap(long, value_parser, default_value_t = 12)]
    max_length: usize,

    /// Number of a pair's words that must be usable for it to be constrained
    #[clap(long, value_parser, default_value_t = 2)]
    min_usability: u8,

    /// Show progress bars
    #[clap(long, action)]
    progress: bool,

    /// Turn debugging information on
    #[clap(short, long, action = clap::ArgAction::Count)]
    debug: u8,
}

fn init_logging(debug: u8) {
    let level = match debug {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path)
        .with_context(|| format!("Could not create output file '{}'", path.display()))?;
    Ok(BufWriter::new(file))
}

fn run(args: &Args) -> Result<()> {
    let verbosity = match (args.debug, args.progress) {
        (2.., _) => Verbosity::Debug,
        (_, true) => Verbosity::PrettyPrint,
        _ => Verbosity::Silent,
    };
    let settings = Settings::new(args.min_length, args.max_length, args.min_usability)?
        .with_verbosity(verbosity);

    let wordlist = Wordlist::load(&args.words, args.usable.as_deref(), &settings)?;
    let word_pairs = WordPairFinder::new().find_word_pairs(&wordlist)?;

    if let Some(path) = &args.pairs_output {
        let mut writer = create(path)?;
        output::write_pairs(&mut writer, &word_pairs)
            .with_context(|| format!("Could not write word pairs to '{}'", path.display()))?;
        info!("Wrote {} word pairs to '{}'", word_pairs.len(), path.display());
    }

    let summary = Summary::from_pairs(&word_pairs);
    let constrained = ConstraintsFinder::new(&settings).find_constraints(word_pairs)?;

    match &args.output {
        Some(path) => {
            let mut writer = create(path)?;
            output::write_constrained_pairs(&mut writer, &constrained)
                .with_context(|| format!("Could not write constrained pairs to '{}'", path.display()))?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut writer = stdout.lock();
            output::write_constrained_pairs(&mut writer, &constrained)
                .context("Could not write constrained pairs to stdout")?;
            writer.flush()?;
        }
    }

    let term = Term::stderr();
    term.write_line(style("Split Decisions").bold().to_string().as_str())?;
    term.write_line(format!("{}", summary).as_str())?;
    term.write_line(
        format!(
            "# Constrained: {} (usability >= {}, {} distinct words)",
            constrained.len(),
            settings.min_usability(),
            output::distinct_words(&constrained)
        )
        .as_str(),
    )?;

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug);

    run(&args)
}
