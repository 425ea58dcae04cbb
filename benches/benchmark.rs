//! パフォーマンスベンチマーク
//!
//! このモジュールは、xlsxcolumnクレートのパフォーマンスを測定するためのベンチマークを提供します。
//!
//! 実装するベンチマーク:
//! - 解析: 10,000行 × 5列のワークブックを読み込む
//! - 抽出: 解析済みシートから1列を取り出す
//! - エクスポート: テキストとPDF（約270ページ）への変換
//!
//! フィクスチャはrust_xlsxwriterで実行時に生成します。

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rust_xlsxwriter::{Workbook, XlsxError};
use xlsxcolumn::{ExportFormat, ExtractorBuilder};

const ROWS: u32 = 10_000;
const COLS: u16 = 5;

/// ベンチマーク用のワークブックを生成
fn generate_fixture() -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for col in 0..COLS {
        worksheet.write_string(0, col, &format!("Column{}", col))?;
    }
    for row in 1..=ROWS {
        worksheet.write_string(row, 0, &format!("Customer {} from the northern region", row))?;
        for col in 1..COLS {
            // 一部のセルを空けて欠損値を混ぜる
            if (row + col as u32) % 7 != 0 {
                worksheet.write_number(row, col, row as f64 * col as f64 / 3.0)?;
            }
        }
    }

    workbook.save_to_buffer()
}

fn benchmark_decode(c: &mut Criterion) {
    let data = generate_fixture().unwrap();
    let extractor = ExtractorBuilder::new().build().unwrap();

    let mut group = c.benchmark_group("decode");
    group.throughput(Throughput::Bytes(data.len() as u64));
    group.sample_size(10);

    group.bench_function("decode_10k_rows", |b| {
        b.iter(|| {
            let workbook = extractor.decode(black_box(data.clone())).unwrap();
            black_box(workbook)
        });
    });

    group.finish();
}

fn benchmark_extract(c: &mut Criterion) {
    let data = generate_fixture().unwrap();
    let extractor = ExtractorBuilder::new().build().unwrap();
    let workbook = extractor.decode(data).unwrap();
    let headers = extractor.header_row(&workbook.first_sheet);
    let column = extractor.resolve(&headers, "Column3").unwrap();

    let mut group = c.benchmark_group("extract");
    group.throughput(Throughput::Elements(ROWS as u64));

    group.bench_function("extract_numeric_column", |b| {
        b.iter(|| black_box(extractor.extract(black_box(&workbook.first_sheet), column)));
    });

    group.finish();
}

fn benchmark_export(c: &mut Criterion) {
    let data = generate_fixture().unwrap();
    let extractor = ExtractorBuilder::new().build().unwrap();
    let workbook = extractor.decode(data).unwrap();
    let items = extractor.extract(&workbook.first_sheet, 0);

    let mut group = c.benchmark_group("export");
    group.throughput(Throughput::Elements(items.len() as u64));
    group.sample_size(10);

    group.bench_function("export_text", |b| {
        b.iter(|| black_box(extractor.export(black_box(&items), ExportFormat::Text).unwrap()));
    });

    group.bench_function("export_pdf", |b| {
        b.iter(|| black_box(extractor.export(black_box(&items), ExportFormat::Pdf).unwrap()));
    });

    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .measurement_time(std::time::Duration::from_secs(10))
        .warm_up_time(std::time::Duration::from_secs(3));
    targets = benchmark_decode, benchmark_extract, benchmark_export
}

criterion_main!(benches);
