//! Column Module
//!
//! ヘッダー名から列位置を求める処理と、1列分の値を取り出す処理。

use log::{debug, warn};

use crate::formatter::CellFormatter;
use crate::types::{CellValue, Sheet};

/// ヘッダー名から列インデックスを求める
///
/// 完全一致で比較し、最初に一致した位置を返します。
/// `target`の前後の空白除去は呼び出し側の責務です。
///
/// 同じ名前のヘッダーが複数ある場合も先頭の列を採用し、
/// 無視した列の位置を警告としてログに出力します。
pub(crate) fn resolve_column(headers: &[String], target: &str) -> Option<usize> {
    let mut matches = headers
        .iter()
        .enumerate()
        .filter(|(_, header)| header.as_str() == target)
        .map(|(idx, _)| idx);

    let first = matches.next()?;
    let ignored: Vec<usize> = matches.collect();
    if !ignored.is_empty() {
        warn!(
            "header '{}' appears more than once; using column {} and ignoring {:?}",
            target, first, ignored
        );
    }

    Some(first)
}

/// 指定した列の値をデータ行から取り出す
///
/// - 0行目（ヘッダー行）は対象外
/// - 列が存在しない短い行、`Empty`のセル、エラー値のセルは除外
/// - 空文字列のセルは含める
/// - 行の順序を保持し、並べ替えや重複除去は行わない
pub(crate) fn extract_column(
    sheet: &Sheet,
    column: usize,
    formatter: &CellFormatter,
) -> Vec<String> {
    let values: Vec<String> = sheet
        .data_rows()
        .iter()
        .filter_map(|row| row.get(column))
        .filter(|cell| !cell.is_missing())
        .map(|cell| formatter.format_cell(cell))
        .collect();

    debug!(
        "extracted {} of {} data rows from column {}",
        values.len(),
        sheet.data_rows().len(),
        column
    );

    values
}

/// ヘッダー行をテキストに変換
pub(crate) fn header_row(sheet: &Sheet, formatter: &CellFormatter) -> Vec<String> {
    sheet
        .header_cells()
        .iter()
        .map(|cell: &CellValue| formatter.format_cell(cell))
        .collect()
}
