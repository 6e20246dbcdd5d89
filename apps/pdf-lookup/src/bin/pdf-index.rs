//! pdf-index
//!
//! Extracts a PDF into the SQLite full-text index, writes a plain-text dump,
//! then answers search queries from standard input until `q`.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use pdf_lookup::config::Config;
use pdf_lookup::db::{self, IndexHit, SentenceIndex};
use pdf_lookup::document::write_text_dump;
use pdf_lookup::extract::TextExtractor;
use pdf_lookup::ocr::OcrService;
use pdf_lookup::{logging, AppError};

#[derive(Parser, Debug)]
#[command(name = "pdf-index", version, about = "Index a PDF and search it interactively")]
struct Cli {
    /// PDF file to index
    file: PathBuf,
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

    logging::init_tracing("pdf_lookup=info,sqlx=warn");
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

    let extractor = TextExtractor::from_config(&config, ocr);
    let document = extractor.extract(&cli.file).await?;

    let pool = db::create_pool(&config.index.database_url).await?;
    let index = SentenceIndex::new(&pool);
    let stored = index
        .ingest(&document.path, &document.sentences, config.index.min_sentence_len)
        .await?;

    let dump = write_text_dump(&config.index.processed_dir, &document)?;
    let stats = index.stats().await?;
    tracing::info!(
        stored,
        dump = %dump.display(),
        total_sentences = stats.sentences,
        documents = stats.documents,
        "Index ready"
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("\nSearch query (q to quit): ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let query = line.trim();
        if query.eq_ignore_ascii_case("q") {
            break;
        }
        if query.is_empty() {
            continue;
        }

        match index.search(query, None).await {
            Ok(hits) => print_hits(&hits),
            Err(e) => eprintln!("Query failed: {}", e),
        }
    }

    pool.close().await;
    Ok(())
}

fn print_hits(hits: &[IndexHit]) {
    println!("\nFound {} results:", hits.len());
    for (i, hit) in hits.iter().enumerate() {
        println!("{}. [From {} p.{}] {}", i + 1, hit.file_name(), hit.page, hit.content);
    }
}
