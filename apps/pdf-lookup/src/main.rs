//! pdf-lookup
//!
//! Extracts the sentences of a PDF, recognising scanned pages with
//! Tesseract, and prints every sentence containing a keyword.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use pdf_lookup::config::Config;
use pdf_lookup::extract::TextExtractor;
use pdf_lookup::ocr::OcrService;
use pdf_lookup::search::{Highlight, KeywordSearch};
use pdf_lookup::{logging, AppError};

#[derive(Parser, Debug)]
#[command(name = "pdf-lookup", version, about = "Search a PDF for a keyword, page by page")]
struct Cli {
    /// PDF file to search
    file: PathBuf,

    /// Keyword to look for (case-insensitive, matched literally)
    keyword: String,

    /// Mark matches with [HL]...[/HL] instead of terminal colours
    #[arg(long)]
    no_color: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    logging::init_tracing("pdf_lookup=info");
    dotenvy::dotenv().ok();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\nERROR: {}", e);
            if let Some(hint) = e.hint() {
                eprintln!("{}", hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let config = Config::from_env().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config from env: {}, using defaults", e);
        Config::default()
    });

    let ocr = match OcrService::tesseract(&config.ocr).await {
        Ok(service) => Some(service),
        Err(e) => {
            tracing::warn!("OCR disabled, scanned pages will fail: {}", e);
            None
        }
    };

    let highlight = if cli.no_color || !std::io::stdout().is_terminal() {
        Highlight::brackets()
    } else {
        Highlight::ansi()
    };
    let search = KeywordSearch::new(&cli.keyword, highlight)?;

    let extractor = TextExtractor::from_config(&config, ocr);
    let document = extractor.extract(&cli.file).await?;

    tracing::info!(keyword = %cli.keyword, "Searching");
    let results = search.search(&document.sentences);

    if results.is_empty() {
        println!("\nNo results found for '{}'", cli.keyword);
    } else {
        println!("\nFound {} results:", results.len());
        for result in &results {
            println!("\nPage {}: {}", result.page, result.sentence);
        }
    }

    Ok(())
}
