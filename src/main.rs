use std::io::BufRead;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use talkbank_utils::{read_transcript_file, wav_rttm_pairs, Corpus, Formatter, FormatterConfig};

#[derive(Parser)]
#[command(name = "talkbank-utils")]
#[command(author, version, about = "CHAT transcript utilities for diarization and ASR", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write one RTTM file per transcript in a directory of .cha files
    Rttm {
        /// Directory searched recursively for .cha files
        #[arg(short, long)]
        input: PathBuf,

        /// Output directory, mirrors the input layout
        #[arg(short, long)]
        output: PathBuf,

        /// JSON file overriding formatter toggles
        #[arg(long)]
        formatter_config: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Write a diarization manifest (.jsonl) for a directory of .cha files
    Manifest {
        /// Directory searched recursively for .cha files
        #[arg(short, long)]
        input: PathBuf,

        /// Directory holding the RTTM files written by `rttm`
        #[arg(long)]
        rttm_dir: PathBuf,

        /// Directory holding the matching .wav files
        #[arg(long)]
        wav_dir: PathBuf,

        /// Output manifest path, must end with .jsonl
        #[arg(short, long)]
        output: PathBuf,

        /// Fail instead of skipping transcripts with a missing wav or rttm
        #[arg(long)]
        strict: bool,

        /// JSON file overriding formatter toggles
        #[arg(long)]
        formatter_config: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// List wav/rttm files that share a relative path
    Pairs {
        #[arg(long)]
        wav_dir: PathBuf,

        #[arg(long)]
        rttm_dir: PathBuf,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Normalize utterances read from stdin, one per line
    Normalize {
        /// JSON file overriding formatter toggles
        #[arg(long)]
        formatter_config: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Summarize a single .cha transcript
    Analyze {
        /// Input transcript file
        #[arg(short, long)]
        input: PathBuf,

        /// JSON file overriding formatter toggles
        #[arg(long)]
        formatter_config: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Rttm {
            input,
            output,
            formatter_config,
            verbose,
        } => {
            setup_logging(verbose);
            let formatter = load_formatter(formatter_config.as_deref())?;
            write_rttms(&input, &output, formatter)
        }
        Commands::Manifest {
            input,
            rttm_dir,
            wav_dir,
            output,
            strict,
            formatter_config,
            verbose,
        } => {
            setup_logging(verbose);
            let formatter = load_formatter(formatter_config.as_deref())?;
            let corpus = Corpus::from_dir(&input, formatter)
                .with_context(|| format!("Failed to load transcripts from {:?}", input))?;
            let count = corpus
                .save_manifest(&output, &rttm_dir, &wav_dir, !strict)
                .context("Failed to write manifest")?;
            info!("Manifest complete: {} entries", count);
            Ok(())
        }
        Commands::Pairs {
            wav_dir,
            rttm_dir,
            verbose,
        } => {
            setup_logging(verbose);
            let pairs = wav_rttm_pairs(&wav_dir, &rttm_dir).context("Failed to pair files")?;
            for (wav, rttm) in &pairs {
                println!("{}\t{}", wav.display(), rttm.display());
            }
            info!("{} pairs found", pairs.len());
            Ok(())
        }
        Commands::Normalize {
            formatter_config,
            verbose,
        } => {
            setup_logging(verbose);
            let formatter = load_formatter(formatter_config.as_deref())?;
            normalize_stdin(&formatter)
        }
        Commands::Analyze {
            input,
            formatter_config,
            verbose,
        } => {
            setup_logging(verbose);
            let formatter = load_formatter(formatter_config.as_deref())?;
            analyze_transcript(&input, formatter)
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn load_formatter(path: Option<&Path>) -> Result<Formatter> {
    let config = match path {
        Some(path) => FormatterConfig::from_json_file(path)?,
        None => FormatterConfig::default(),
    };
    Ok(Formatter::new(config))
}

fn write_rttms(input: &Path, output: &Path, formatter: Formatter) -> Result<()> {
    info!("Loading transcripts from {:?}", input);
    let corpus = Corpus::from_dir(input, formatter)
        .with_context(|| format!("Failed to load transcripts from {:?}", input))?;

    let written = corpus.save_rttms(output).context("Failed to write RTTM files")?;
    info!("Complete: {} RTTM files in {:?}", written.len(), output);
    Ok(())
}

fn normalize_stdin(formatter: &Formatter) -> Result<()> {
    let stdin = std::io::stdin();
    let mut discarded = 0usize;

    for line in stdin.lock().lines() {
        let line = line.context("Failed to read stdin")?;
        match formatter.format_line(&line) {
            Some(text) => println!("{}", text),
            None => discarded += 1,
        }
    }

    info!("{} lines discarded", discarded);
    Ok(())
}

fn analyze_transcript(input: &Path, formatter: Formatter) -> Result<()> {
    info!("Analyzing transcript from {:?}", input);
    let transcript =
        read_transcript_file(input, formatter).context("Failed to parse input transcript")?;

    println!("Transcript Analysis");
    println!("===================");
    println!("Name: {}", transcript.name);
    println!("Speakers: {:?}", transcript.speakers);
    println!("Duration: {:.1}s", transcript.duration);
    println!("Segments: {}", transcript.segments().len());
    println!();

    let kept = transcript.kept_utterances().count();
    let total = transcript.utterances.len();
    println!("Utterances");
    println!("----------");
    println!("Kept: {}", kept);
    println!("Discarded: {}", total - kept);
    println!();

    println!("Speaker Statistics");
    println!("------------------");
    for speaker in &transcript.speakers {
        let turns: Vec<_> = transcript
            .utterances
            .iter()
            .filter(|u| &u.speaker == speaker)
            .collect();
        let talk_time: f64 = turns.iter().map(|u| u.segment.duration()).sum();
        let words: usize = turns
            .iter()
            .filter_map(|u| u.text.as_deref())
            .map(|t| t.split_whitespace().count())
            .sum();

        println!(
            "{}: {} turns, {:.1}s talk time, {} words kept",
            speaker,
            turns.len(),
            talk_time,
            words
        );
    }

    Ok(())
}
