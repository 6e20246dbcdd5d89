//! Search Performance Benchmarks
//!
//! Keyword search over extracted sentences, sentence segmentation, and
//! text-layer extraction of a generated multi-page PDF.
//!
//! Run with: `cargo bench --bench search_performance`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use pdf_lookup::document::SentenceRecord;
use pdf_lookup::extract::TextExtractor;
use pdf_lookup::pdf::TextStrategy;
use pdf_lookup::search::{Highlight, KeywordSearch};
use pdf_lookup::text::{clean_text, SentenceTokenizer};

const PARAGRAPH: &str = "The senate met at dawn. Dr. Marcus spoke first, e.g. on grain prices. \
    Nobody expected the bench-\nmark vote to pass. It did, by 3.5 percent.";

fn sentence_records(count: usize) -> Vec<SentenceRecord> {
    (0..count)
        .map(|i| {
            let sentence = if i % 10 == 0 {
                format!("Sentence {} mentions the Benchmark keyword.", i)
            } else {
                format!("Sentence {} is filler text about Roman history.", i)
            };
            SentenceRecord::new((i / 40) as u32 + 1, sentence)
        })
        .collect()
}

/// Benchmark keyword search across record counts
fn bench_keyword_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("keyword_search");
    group.measurement_time(Duration::from_secs(10));

    for count in [1_000, 10_000] {
        let records = sentence_records(count);
        let search = KeywordSearch::new("benchmark", Highlight::brackets()).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(count), &records, |b, records| {
            b.iter(|| black_box(search.search(black_box(records))))
        });
    }

    group.finish();
}

/// Benchmark cleanup plus sentence splitting of one page worth of text
fn bench_sentences(c: &mut Criterion) {
    let tokenizer = SentenceTokenizer::english();
    let page = PARAGRAPH.repeat(40);

    c.bench_function("clean_and_split_page", |b| {
        b.iter(|| black_box(tokenizer.sentences(&clean_text(black_box(&page)))))
    });
}

/// Create a PDF with multiple pages containing searchable text
///
/// The xref offsets are not exact; MuPDF repairs the table on open.
fn create_multipage_pdf(page_count: usize) -> Vec<u8> {
    let mut pdf = String::new();
    pdf.push_str("%PDF-1.4\n");
    pdf.push_str("1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n");

    let page_refs = (0..page_count)
        .map(|i| format!("{} 0 R", 3 + i * 2))
        .collect::<Vec<_>>()
        .join(" ");
    pdf.push_str(&format!(
        "2 0 obj\n<< /Type /Pages /Kids [{}] /Count {} >>\nendobj\n",
        page_refs, page_count
    ));

    let mut obj_num = 3;
    for i in 0..page_count {
        pdf.push_str(&format!(
            "{} 0 obj\n<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Contents {} 0 R /Resources << /Font << /F1 << /Type /Font /Subtype /Type1 /BaseFont /Helvetica >> >> >> >>\nendobj\n",
            obj_num, obj_num + 1
        ));

        let content = format!(
            "BT /F1 12 Tf 72 720 Td (Page {} holds searchable text. The keyword is benchmark.) Tj ET",
            i + 1
        );
        pdf.push_str(&format!(
            "{} 0 obj\n<< /Length {} >>\nstream\n{}\nendstream\nendobj\n",
            obj_num + 1,
            content.len(),
            content
        ));

        obj_num += 2;
    }

    pdf.push_str("trailer\n");
    pdf.push_str(&format!("<< /Size {} /Root 1 0 R >>\n", obj_num));
    pdf.push_str("%%EOF");

    pdf.into_bytes()
}

/// Benchmark text-layer extraction of a whole document
fn bench_extraction(c: &mut Criterion) {
    let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
    file.write_all(&create_multipage_pdf(100)).unwrap();
    let path: &Path = file.path();

    let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
    let extractor = TextExtractor::new(TextStrategy::default_chain(), SentenceTokenizer::english());

    let mut group = c.benchmark_group("extraction");
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(20);

    group.bench_function("text_layer_100_pages", |b| {
        b.iter(|| black_box(runtime.block_on(extractor.extract(black_box(path))).unwrap()))
    });

    group.finish();
}

criterion_group!(benches, bench_keyword_search, bench_sentences, bench_extraction);
criterion_main!(benches);
