//! Command-line interface for scraping dictionary entries from Wiktionary.
//!
//! This CLI provides commands for scraping a single word, a word list, or the
//! built-in frequency list, and for extracting a record from a saved page.

use clap::{Parser, Subcommand};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use log::{LevelFilter, error, info};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use wikt_rs::{
    Extractor, LexicalRecord, ScrapeOptions, Scraper,
    error::{Result, WiktError},
    export::{batch_file_name, default_output_dir, export_json, word_file_name},
    progress::{ProgressCallback, ProgressUpdate},
    scrape::assign_frequency_ranks,
    wordlist::{frequency_list, read_word_list},
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Wiktionary dictionary scraper", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Target language code (es, en, fr, de, it, pt, la)
    #[arg(short, long, global = true, default_value = "es")]
    lang: String,

    /// Output file (defaults to a file in the user data directory)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Minimum delay between requests, in seconds
    #[arg(long, global = true, default_value_t = 1.0)]
    rate_limit: f64,

    /// Set verbosity level (use -v, -vv, or -vvv for increasing verbosity)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scrape a single word
    Word {
        /// The lookup key to scrape
        word: String,
    },
    /// Scrape every word in a file (one word per line)
    List {
        /// Path to the word list
        file: PathBuf,
    },
    /// Scrape the most frequent words of the target language
    Frequency {
        /// Number of words to scrape
        #[arg(default_value_t = 20)]
        count: usize,
    },
    /// Extract a record from a saved page and print it as JSON
    Extract {
        /// Path to the saved page
        html_file: PathBuf,
        /// Lookup key the page belongs to (defaults to the file stem)
        #[arg(long)]
        word: Option<String>,
    },
}

/// Sets up logging based on verbosity level.
fn setup_logging(verbose: u8) {
    let log_level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter(None, log_level)
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();
}

/// Creates a progress callback that drives a single progress bar.
fn create_progress_callback(pb: ProgressBar) -> ProgressCallback {
    Box::new(move |update: ProgressUpdate| {
        if update.current_item == 0 {
            if let Some(total) = update.total_items {
                pb.set_length(total);
            }
            pb.set_prefix(update.stage_description.clone());
            pb.enable_steady_tick(Duration::from_millis(100));
        }
        pb.set_position(update.current_item);
        if let Some(msg) = update.message {
            pb.set_message(msg);
        }
        if update
            .total_items
            .is_some_and(|total| update.current_item >= total)
        {
            pb.finish_and_clear();
        }
        true
    })
}

fn progress_bar() -> ProgressBar {
    let pb = ProgressBar::new(0);
    if let Ok(style) = ProgressStyle::default_bar().template(
        "{prefix:>12.cyan.bold} [{elapsed_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} ({percent}%) {msg}",
    ) {
        pb.set_style(style.progress_chars("##-"));
    }
    pb
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    let result = match &cli.command {
        Commands::Word { word } => handle_word(&cli, word).await,
        Commands::List { file } => match read_word_list(file) {
            Ok(words) => handle_batch(&cli, words, false).await,
            Err(e) => Err(e),
        },
        Commands::Frequency { count } => match frequency_list(&cli.lang, *count) {
            Some(words) => handle_batch(&cli, words, true).await,
            None => Err(WiktError::InvalidArgument(format!(
                "no frequency list for language '{}'",
                cli.lang
            ))),
        },
        Commands::Extract { html_file, word } => handle_extract(&cli, html_file, word.as_deref()),
    };

    if let Err(e) = result {
        error!("Command failed: {}", e);
        eprintln!("{}", format!("Error: {}", e).red());
        std::process::exit(1);
    }

    Ok(())
}

fn scrape_options(cli: &Cli) -> Result<ScrapeOptions> {
    let mut options = ScrapeOptions {
        lang_code: cli.lang.clone(),
        ..ScrapeOptions::default()
    };
    options.fetch.rate_limit = Duration::try_from_secs_f64(cli.rate_limit).map_err(|_| {
        WiktError::InvalidArgument(format!("invalid rate limit: {}", cli.rate_limit))
    })?;
    Ok(options)
}

fn output_path(cli: &Cli, file_name: String) -> Result<PathBuf> {
    match &cli.output {
        Some(path) => Ok(path.clone()),
        None => Ok(default_output_dir()?.join(file_name)),
    }
}

/// Handles the word command: scrape one key and save it.
async fn handle_word(cli: &Cli, word: &str) -> Result<()> {
    let scraper = Scraper::new(scrape_options(cli)?)?;
    let Some(record) = scraper.scrape_word(word).await? else {
        println!(
            "No {} entry found for '{}'.",
            scraper.extractor().language().name,
            word.yellow()
        );
        return Ok(());
    };

    print_summary(&record);
    let mut records = BTreeMap::new();
    records.insert(word.to_string(), record);
    let path = output_path(cli, word_file_name(&cli.lang, word))?;
    export_json(&path, &records)?;
    println!("Saved to {}", path.display().to_string().green());
    Ok(())
}

/// Handles the list and frequency commands.
async fn handle_batch(cli: &Cli, words: Vec<String>, ranked: bool) -> Result<()> {
    if words.is_empty() {
        return Err(WiktError::InvalidArgument("no words to scrape".to_string()));
    }
    info!("Scraping {} words", words.len());
    let scraper = Scraper::new(scrape_options(cli)?)?;

    let pb = progress_bar();
    let callback = create_progress_callback(pb.clone());
    let mut records = scraper.scrape_words(&words, Some(callback)).await;
    pb.finish_and_clear();
    std::io::stdout().flush().ok();

    if ranked {
        assign_frequency_ranks(&mut records, &words);
    }

    let path = output_path(cli, batch_file_name(&cli.lang, records.len()))?;
    export_json(&path, &records)?;
    println!(
        "Scraped {} of {} words. Saved to {}",
        records.len().to_string().bold(),
        words.len(),
        path.display().to_string().green()
    );
    Ok(())
}

/// Handles the extract command: no network access, output goes to stdout
/// unless `--output` is given.
fn handle_extract(cli: &Cli, html_file: &Path, word: Option<&str>) -> Result<()> {
    let key = match word {
        Some(word) => word.to_string(),
        None => html_file
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .ok_or_else(|| {
                WiktError::InvalidArgument(format!("cannot derive a word from {:?}", html_file))
            })?,
    };
    let markup = std::fs::read_to_string(html_file)?;
    let extractor = Extractor::new(&cli.lang);
    let Some(record) = extractor.extract_markup(&key, &markup)? else {
        println!(
            "No {} section found in {}.",
            extractor.language().name,
            html_file.display().to_string().yellow()
        );
        return Ok(());
    };

    match &cli.output {
        Some(path) => {
            let mut records = BTreeMap::new();
            records.insert(key, record);
            export_json(path, &records)?;
            println!("Saved to {}", path.display().to_string().green());
        }
        None => println!("{}", serde_json::to_string_pretty(&record)?),
    }
    Ok(())
}

/// Prints a short colored overview of a record.
fn print_summary(record: &LexicalRecord) {
    println!(
        "\n{} ~ {}",
        record.text.bold().cyan(),
        record.word_class.to_string().italic()
    );
    if !record.ipa_transcriptions.is_empty() {
        println!("  Pronunciation: {}", record.ipa_transcriptions.join(", ").green());
    }
    for (index, definition) in record.definitions.iter().enumerate() {
        println!("  {}: {}", (index + 1).to_string().bold(), definition);
    }
    for example in &record.examples {
        println!("        {}", example.italic());
    }
    if !record.synonyms.is_empty() {
        println!("  {}: {}", "Synonyms".magenta(), record.synonyms.join(", ").green());
    }
    if !record.antonyms.is_empty() {
        println!("  {}: {}", "Antonyms".magenta(), record.antonyms.join(", ").green());
    }
    if !record.translations.is_empty() {
        let languages: Vec<&str> = record.translations.keys().map(String::as_str).collect();
        println!("  {}: {}", "Translations".magenta(), languages.join(", "));
    }
    if !record.word_forms.is_empty() {
        println!(
            "  {}: {} forms",
            "Conjugation".magenta(),
            record.word_forms.cell_count()
        );
    }
    println!();
}
