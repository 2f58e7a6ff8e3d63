//! Command-line front end: clean one HTML file, or analyze a batch of local
//! pages and print the aggregated keywords as JSON.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indexmap::IndexMap;
use page_lexicon::{
    clean_html, AggregateOptions, Aggregation, Analyzer, DocumentRecord, Options, RemovalPolicy, StopWords,
};
use serde::Serialize;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "page-lexicon", version, about = "Lexical signal extraction from HTML pages")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Remove scripts, embeds, inline styles and event handlers from a page
    Clean {
        /// HTML file to clean
        input: PathBuf,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Keep <img> elements
        #[arg(long)]
        keep_images: bool,

        /// Save the content of removed <style> blocks next to the output
        #[arg(long)]
        extract_css: bool,
    },

    /// Analyze local HTML files and print rows, ranking and graph as JSON
    Analyze {
        /// HTML files to analyze
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Base URL used to resolve internal links
        #[arg(long)]
        url: Option<String>,

        /// Smallest n-gram order
        #[arg(long, default_value_t = 1)]
        nmin: usize,

        /// Largest n-gram order
        #[arg(long, default_value_t = 5)]
        nmax: usize,

        /// Number of top terms per document
        #[arg(long, default_value_t = 20)]
        top: usize,

        /// Stop-word file, one word per line (built-in French list when omitted)
        #[arg(long)]
        stopwords: Option<PathBuf>,
    },
}

#[derive(Serialize)]
struct Report<'a> {
    rows: Vec<IndexMap<&'static str, String>>,
    #[serde(flatten)]
    aggregation: &'a Aggregation,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "page_lexicon=debug" } else { "page_lexicon=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Clean {
            input,
            output,
            keep_images,
            extract_css,
        } => clean(&input, output.as_deref(), keep_images, extract_css),
        Command::Analyze {
            files,
            url,
            nmin,
            nmax,
            top,
            stopwords,
        } => {
            let options = Options {
                n_min: nmin,
                n_max: nmax,
                top_k: top,
                ..Options::default()
            };
            analyze(&files, url.as_deref(), options, stopwords.as_deref())
        }
    }
}

fn clean(input: &Path, output: Option<&Path>, keep_images: bool, extract_css: bool) -> Result<()> {
    let bytes = fs::read(input).with_context(|| format!("reading {}", input.display()))?;
    let html = page_lexicon::encoding::decode_document(&bytes)
        .with_context(|| format!("decoding {}", input.display()))?;

    let policy = RemovalPolicy::markup()
        .with_keep_images(keep_images)
        .with_css_capture(extract_css);
    let cleaned = clean_html(&html, &policy);

    match output {
        Some(path) => {
            fs::write(path, &cleaned.html).with_context(|| format!("writing {}", path.display()))?;
        }
        None => print!("{}", cleaned.html),
    }

    if let Some(css) = &cleaned.css {
        let css_path = css_path(output.unwrap_or(input));
        fs::write(&css_path, css).with_context(|| format!("writing {}", css_path.display()))?;
        info!(path = %css_path.display(), "Saved extracted CSS");
    }

    info!(
        input = %input.display(),
        removed = cleaned.report.total_removed(),
        "Cleaned document"
    );
    Ok(())
}

/// `page.html` → `page.html.extracted.css`
fn css_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".extracted.css");
    PathBuf::from(name)
}

fn analyze(files: &[PathBuf], base_url: Option<&str>, options: Options, stopwords: Option<&Path>) -> Result<()> {
    let stop_words = match stopwords {
        Some(path) => StopWords::from_file_or_builtin(path),
        None => StopWords::french(),
    };
    let analyzer = Analyzer::new(options, stop_words)?;

    let records: Vec<DocumentRecord> = files
        .iter()
        .map(|path| {
            analyzer.analyze_file(path, base_url).unwrap_or_else(|err| {
                warn!(path = %path.display(), error = %err, "Document analysis failed");
                DocumentRecord::failed(path.display().to_string(), err.to_string())
            })
        })
        .collect();

    let aggregation = Aggregation::from_records(&records, &AggregateOptions::default());
    info!(
        documents = aggregation.documents,
        failed = aggregation.failed,
        "Analysis complete"
    );

    let rows = records.iter().map(|record| record.to_row().into_iter().collect()).collect();

    let report = Report {
        rows,
        aggregation: &aggregation,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
