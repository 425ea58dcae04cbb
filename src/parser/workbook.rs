//! Workbook Parser
//!
//! calamineのラッパーとして、ワークブックレベルの操作を提供します。

use calamine::{
    open_workbook_auto_from_rs, Data, ExcelDateTime, ExcelDateTimeType, Range, Reader, Sheets,
};
use log::debug;
use std::io::Cursor;

use crate::error::XlsxColumnError;
use crate::security::SecurityConfig;
use crate::types::{CellValue, Sheet, Workbook};

/// ワークブックパーサー
///
/// calamineが自動判別できる形式（XLSX, XLSM, XLSB, XLS, ODS）を扱います。
pub(crate) struct WorkbookParser {
    /// calamineのワークブック
    sheets: Sheets<Cursor<Vec<u8>>>,
}

impl WorkbookParser {
    /// バイト列からワークブックを開く
    ///
    /// # 引数
    ///
    /// * `bytes` - ファイル全体のバイト列
    /// * `security` - 入力サイズなどの制限
    ///
    /// # 戻り値
    ///
    /// * `Ok(WorkbookParser)` - ワークブックの読み込みに成功した場合
    /// * `Err(XlsxColumnError::SecurityViolation)` - 入力サイズが上限を超えた場合
    /// * `Err(XlsxColumnError::Parse)` - 形式を認識できない、または破損している場合
    pub fn open(bytes: Vec<u8>, security: &SecurityConfig) -> Result<Self, XlsxColumnError> {
        security.check_input_size(bytes.len() as u64)?;

        let sheets = open_workbook_auto_from_rs(Cursor::new(bytes))?;
        Ok(Self { sheets })
    }

    /// すべてのシート名を取得
    pub fn sheet_names(&self) -> Vec<String> {
        self.sheets.sheet_names()
    }

    /// シートをパースしてグリッドを取り出す
    ///
    /// シート全体を読み込めた場合のみ結果を返します。
    pub fn parse_sheet(&mut self, sheet_name: &str) -> Result<Sheet, XlsxColumnError> {
        let range = self.sheets.worksheet_range(sheet_name)?;
        let rows = convert_range(&range);

        debug!(
            "parsed sheet '{}': {} rows x {} cols",
            sheet_name,
            range.height(),
            range.width()
        );

        Ok(Sheet::new(sheet_name, rows))
    }

    /// 先頭シートをパースしてワークブックを生成
    ///
    /// シートが1枚もない場合は解析エラーとして扱います。
    pub fn into_workbook(mut self) -> Result<Workbook, XlsxColumnError> {
        let sheet_names = self.sheet_names();
        debug!("workbook contains {} sheet(s)", sheet_names.len());

        let first_name = sheet_names
            .first()
            .cloned()
            .ok_or(XlsxColumnError::Parse(calamine::Error::Msg(
                "Workbook contains no sheets",
            )))?;

        let first_sheet = self.parse_sheet(&first_name)?;

        Ok(Workbook {
            sheet_names,
            first_sheet,
        })
    }
}

/// calamineの範囲を行のリストに変換
fn convert_range(range: &Range<Data>) -> Vec<Vec<CellValue>> {
    range
        .rows()
        .map(|row| row.iter().map(convert_cell).collect())
        .collect()
}

/// calamineのセルデータを`CellValue`に変換
fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) if dt.is_duration() => CellValue::Duration(dt.as_f64()),
        Data::DateTime(dt) => CellValue::DateTime {
            serial: dt.as_f64(),
            is_1904: is_1904(dt),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::IsoText(s.clone()),
        Data::Error(e) => CellValue::Error(e.to_string()),
        Data::Empty => CellValue::Empty,
    }
}

/// 1904年システムの日付かどうか
///
/// calamineは1904フラグを公開していないため、同じシリアル値で
/// 1904年システムとして構築した値と比較します。
fn is_1904(dt: &ExcelDateTime) -> bool {
    *dt == ExcelDateTime::new(dt.as_f64(), ExcelDateTimeType::DateTime, true)
}


// 実際のワークブックを使ったテストは統合テスト（tests/）で実装します。
