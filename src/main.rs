use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::SeedableRng;

use vocab_pipeline::parser::PageExtraction;
use vocab_pipeline::query::VocabularyQuery;
use vocab_pipeline::report::Dataset;
use vocab_pipeline::{
    normalize, store, Difficulty, PartOfSpeech, Pipeline, RawPageText, Settings, Strictness,
    VocabularyEntry,
};

const PAGE_CHUNK: usize = 50;
/// Categories smaller than this are left out of the hard-word ranking.
const MIN_RANKED_CATEGORY: usize = 10;

#[derive(Parser)]
#[command(name = "vocab_pipeline", about = "SAT vocabulary extraction from PDF page text")]
struct Cli {
    /// Config file (TOML/JSON/YAML); VOCAB_* environment variables override it
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract, classify and enrich entries from a page dump
    Extract {
        /// JSON array of {page, text} records
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
        /// Write the {metadata, statistics, vocabulary} wrapper instead of a bare array
        #[arg(long)]
        report: bool,
        /// Use the strict validation thresholds
        #[arg(long)]
        strict: bool,
        /// Process pages on one thread
        #[arg(long)]
        sequential: bool,
    },
    /// Character cleanup only: rewrite every page's text through the normalizer
    Normalize {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Look things up in a finished dataset
    Query {
        /// Entry array or report wrapper
        #[arg(short, long)]
        dataset: PathBuf,
        #[command(subcommand)]
        filter: QueryFilter,
    },
    /// Copy a finished dataset into SQLite
    Export {
        #[arg(short, long)]
        dataset: PathBuf,
        #[arg(long, default_value = "data/vocab.sqlite")]
        db: PathBuf,
    },
}

#[derive(Subcommand)]
enum QueryFilter {
    /// Full record for one word
    Word { word: String },
    /// easy | medium | hard
    Difficulty { level: String },
    Category { name: String },
    /// noun, verb, adjective, adverb, unknown (or n., v., adj., adv.)
    Pos { pos: String },
    /// Word length range, inclusive
    Length { min: usize, max: usize },
    Syllables { count: usize },
    /// Sample words at random
    Random {
        #[arg(default_value_t = 10)]
        count: usize,
        #[arg(long)]
        difficulty: Option<String>,
        #[arg(long)]
        category: Option<String>,
        /// Fixed seed for a repeatable draw
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Every category with its word count
    Categories,
    Stats,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Extract {
            input,
            output,
            report,
            strict,
            sequential,
        } => {
            let mut settings = Settings::load(cli.config.as_deref()).context("loading settings")?;
            if strict {
                settings.strictness = Strictness::Strict;
            }
            if sequential {
                settings.parallel = false;
            }
            extract(&settings, &input, &output, report)
        }
        Commands::Normalize { input, output } => {
            let pages = store::load_pages(&input)
                .with_context(|| format!("reading {}", input.display()))?;
            let cleaned: Vec<RawPageText> = pages
                .into_iter()
                .map(|p| RawPageText {
                    text: normalize(&p.text),
                    ..p
                })
                .collect();
            store::write_json_atomic(&output, &cleaned)
                .with_context(|| format!("writing {}", output.display()))?;
            println!("Normalized {} pages -> {}", cleaned.len(), output.display());
            Ok(())
        }
        Commands::Query { dataset, filter } => {
            let entries = store::load_dataset(&dataset)
                .with_context(|| format!("reading {}", dataset.display()))?;
            run_query(VocabularyQuery::new(entries), filter)
        }
        Commands::Export { dataset, db } => {
            let entries = store::load_dataset(&dataset)
                .with_context(|| format!("reading {}", dataset.display()))?;
            if let Some(parent) = db.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
            let conn = store::open_db(&db).with_context(|| format!("opening {}", db.display()))?;
            let n = store::export(&conn, &entries)?;
            println!("Exported {} words to {}", n, db.display());
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", elapsed_label(elapsed));
    }

    result
}

fn extract(settings: &Settings, input: &Path, output: &Path, report: bool) -> anyhow::Result<()> {
    let pipeline = Pipeline::from_settings(settings).context("building pipeline")?;
    let pages =
        store::load_pages(input).with_context(|| format!("reading {}", input.display()))?;
    if pages.is_empty() {
        println!("No pages in {}.", input.display());
    }

    let pb = ProgressBar::new(pages.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")?
            .progress_chars("#>-"),
    );

    let mut extracted: Vec<PageExtraction> = Vec::with_capacity(pages.len());
    for chunk in pages.chunks(PAGE_CHUNK) {
        extracted.extend(pipeline.extract_pages(chunk));
        pb.inc(chunk.len() as u64);
    }
    pb.finish_and_clear();

    let out = pipeline.finish(extracted);
    let s = &out.stats;
    println!(
        "Pages {} | candidates {} | accepted {} | duplicates {} | skipped {} ({} malformed, {} invalid)",
        s.pages,
        s.candidates,
        s.accepted,
        s.duplicates,
        s.skipped(),
        s.skipped_malformed,
        s.skipped_invalid,
    );
    for (reason, n) in &s.by_reason {
        println!("  {:<22} {}", reason, n);
    }

    let count = out.entries.len();
    let written = if report {
        let dataset = Dataset::new(
            out.entries,
            &input.display().to_string(),
            settings.strictness,
        );
        store::write_json_atomic(output, &dataset)
    } else {
        store::write_json_atomic(output, &out.entries)
    };
    written.with_context(|| format!("writing {}", output.display()))?;

    println!("Saved {} words to {}", count, output.display());
    Ok(())
}

fn run_query(q: VocabularyQuery, filter: QueryFilter) -> anyhow::Result<()> {
    match filter {
        QueryFilter::Word { word } => match q.word(&word) {
            Some(e) => print_entry(e),
            None => println!("Word '{}' not found.", word),
        },
        QueryFilter::Difficulty { level } => {
            let d = Difficulty::parse(&level)
                .with_context(|| format!("unknown difficulty {:?} (easy|medium|hard)", level))?;
            print_rows(&q.by_difficulty(d));
        }
        QueryFilter::Category { name } => print_rows(&q.by_category(&name)),
        QueryFilter::Pos { pos } => {
            let p = PartOfSpeech::parse(&pos)
                .with_context(|| format!("unknown part of speech {:?}", pos))?;
            print_rows(&q.by_part_of_speech(p));
        }
        QueryFilter::Length { min, max } => print_rows(&q.by_length(min, max)),
        QueryFilter::Syllables { count } => print_rows(&q.by_syllables(count)),
        QueryFilter::Random {
            count,
            difficulty,
            category,
            seed,
        } => {
            let difficulty = difficulty
                .map(|level| {
                    Difficulty::parse(&level)
                        .with_context(|| format!("unknown difficulty {:?} (easy|medium|hard)", level))
                })
                .transpose()?;
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            print_rows(&q.random(count, difficulty, category.as_deref(), &mut rng));
        }
        QueryFilter::Categories => {
            for (name, n) in q.categories() {
                println!("{:<24} {:>5}", name, n);
            }
        }
        QueryFilter::Stats => {
            let s = q.statistics();
            println!("Total words:        {}", s.total_words);
            println!("Avg word length:    {}", s.average_word_length);
            println!("Avg syllables:      {}", s.average_syllable_count);
            println!("\n--- Difficulty ---");
            for (k, n) in &s.difficulty_distribution {
                println!("  {:<12} {:>5}", k, n);
            }
            println!("\n--- Part of speech ---");
            for (k, n) in &s.part_of_speech_distribution {
                println!("  {:<12} {:>5}", k, n);
            }
            println!("\n--- Categories ---");
            for (k, n) in &s.category_distribution {
                println!("  {:<24} {:>5}", k, n);
            }
            println!("\n--- Longest words ---");
            for r in &s.longest_words {
                println!("  {:<18} {:>3} letters    {}", r.word, r.value, r.difficulty);
            }
            println!("\n--- Most syllables ---");
            for r in &s.most_syllables {
                println!("  {:<18} {:>3} syllables  {}", r.word, r.value, r.difficulty);
            }
            let hardest = s.hardest_categories(MIN_RANKED_CATEGORY);
            if !hardest.is_empty() {
                println!("\n--- Hard words by category ---");
                for c in hardest.iter().take(5) {
                    println!("  {:<24} {:>5.1}% of {}", c.category, c.hard_percent, c.total);
                }
            }
        }
    }
    Ok(())
}

fn print_entry(e: &VocabularyEntry) {
    println!("Word:           {}", e.word);
    println!("Part of speech: {}", e.part_of_speech);
    println!("Definition:     {}", e.definition);
    println!("Example:        {}", e.example);
    println!("Difficulty:     {}", e.difficulty);
    let categories: Vec<&str> = e.categories.iter().map(String::as_str).collect();
    println!("Categories:     {}", categories.join(", "));
    println!("Syllables:      {}", e.syllable_count);
    println!("Length:         {}", e.word_length);
    println!("Etymology:      {}", e.etymology);
    println!("Memory aid:     {}", e.memory_aid);
    for tip in &e.learning_tips {
        println!("  - {}", tip);
    }
    println!("Page:           {}", e.page);
}

fn print_rows(rows: &[&VocabularyEntry]) {
    if rows.is_empty() {
        println!("No words found.");
        return;
    }
    println!(
        "{:>3} | {:<18} | {:<9} | {:<6} | {:>3} | {:<40}",
        "#", "Word", "POS", "Level", "Syl", "Definition"
    );
    println!("{}", "-".repeat(92));
    for (i, e) in rows.iter().enumerate() {
        println!(
            "{:>3} | {:<18} | {:<9} | {:<6} | {:>3} | {:<40}",
            i + 1,
            clip(&e.word, 18),
            e.part_of_speech.as_str(),
            e.difficulty.as_str(),
            e.syllable_count,
            clip(&e.definition, 40)
        );
    }
    println!("\n{} words", rows.len());
}

/// Cut `s` to at most `width` chars for a table cell, marking the cut with "...".
fn clip(s: &str, width: usize) -> String {
    match s.char_indices().nth(width.saturating_sub(3)) {
        Some((cut, _)) if s.chars().count() > width => format!("{}...", &s[..cut]),
        _ => s.to_string(),
    }
}

/// Run time for the closing line: seconds with one decimal under a minute,
/// then `XmYYs`.
fn elapsed_label(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        return format!("{:.1}s", d.as_secs_f64());
    }
    let (minutes, seconds) = (secs / 60, secs % 60);
    format!("{}m{:02}s", minutes, seconds)
}
