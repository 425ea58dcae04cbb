//! Formatter Module
//!
//! セル値をテキストに変換する処理を提供するモジュール。
//! 抽出結果とヘッダー行は、すべてここで定めた規則でテキスト化されます。

use std::fmt::Write as _;

use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};

use crate::api::DateFormat;
use crate::types::CellValue;

/// 日付として解釈できるシリアル値の上限（9999-12-31付近）
const MAX_DATE_SERIAL: f64 = 2_958_465.0;

/// セルフォーマッター
///
/// セル値のテキスト化のファサードとして機能します。
#[derive(Debug, Clone)]
pub(crate) struct CellFormatter {
    /// 日付フォーマッター
    date_formatter: DateFormatter,
}

impl CellFormatter {
    /// 新しいCellFormatterインスタンスを生成
    pub fn new(date_format: DateFormat) -> Self {
        Self {
            date_formatter: DateFormatter { date_format },
        }
    }

    /// セル値をテキストに変換
    ///
    /// `Empty`は空文字列になります。抽出処理では`Empty`はここに到達する前に
    /// 除外されるため、この変換はヘッダー行にのみ影響します。
    pub fn format_cell(&self, value: &CellValue) -> String {
        match value {
            CellValue::Text(s) => s.clone(),
            CellValue::Int(i) => i.to_string(),
            CellValue::Number(n) => NumberFormatter::format(*n),
            CellValue::Bool(b) => b.to_string(),
            CellValue::DateTime { serial, is_1904 } => {
                self.date_formatter.format(*serial, *is_1904)
            }
            CellValue::Duration(serial) => NumberFormatter::format(*serial),
            CellValue::IsoText(s) => s.clone(),
            CellValue::Error(e) => e.clone(),
            CellValue::Empty => String::new(),
        }
    }
}

impl Default for CellFormatter {
    fn default() -> Self {
        Self::new(DateFormat::default())
    }
}

/// 日付フォーマッター
///
/// Excelのシリアル日付値を文字列に変換します。1900年システムと1904年システムの両方を扱います。
#[derive(Debug, Clone)]
pub(crate) struct DateFormatter {
    date_format: DateFormat,
}

impl DateFormatter {
    /// シリアル値をフォーマット
    ///
    /// 日付に変換できない値、またはカスタム書式が不正な場合は
    /// シリアル値をそのまま数値として出力します。`Serial`では
    /// 日付システムにかかわらず、ファイルに格納された値を出力します。
    pub fn format(&self, serial: f64, is_1904: bool) -> String {
        let datetime = match (&self.date_format, serial_to_datetime(serial, is_1904)) {
            (DateFormat::Serial, _) | (_, None) => return NumberFormatter::format(serial),
            (_, Some(datetime)) => datetime,
        };

        match &self.date_format {
            DateFormat::Iso8601 => {
                if datetime.num_seconds_from_midnight() == 0 {
                    datetime.format("%Y-%m-%d").to_string()
                } else {
                    datetime.format("%Y-%m-%dT%H:%M:%S").to_string()
                }
            }
            DateFormat::Custom(format_str) => {
                let mut out = String::new();
                match write!(out, "{}", datetime.format(format_str)) {
                    Ok(()) => out,
                    Err(_) => NumberFormatter::format(serial),
                }
            }
            DateFormat::Serial => NumberFormatter::format(serial),
        }
    }
}

/// シリアル値を日時に変換
///
/// 1900年システム:
/// - シリアル値1 = 1900-01-01
/// - シリアル値61以降は1899-12-30起算（1900年うるう年バグの分を吸収）
///
/// 1904年システム:
/// - シリアル値0 = 1904-01-01
fn serial_to_datetime(serial: f64, is_1904: bool) -> Option<NaiveDateTime> {
    if !serial.is_finite() || !(0.0..=MAX_DATE_SERIAL).contains(&serial) {
        return None;
    }

    let epoch = if is_1904 {
        NaiveDate::from_ymd_opt(1904, 1, 1)?
    } else if serial < 60.0 {
        NaiveDate::from_ymd_opt(1899, 12, 31)?
    } else {
        NaiveDate::from_ymd_opt(1899, 12, 30)?
    };

    let days = serial.floor();
    let seconds = ((serial - days) * 86_400.0).round() as i64;

    epoch
        .and_hms_opt(0, 0, 0)?
        .checked_add_signed(Duration::days(days as i64))?
        .checked_add_signed(Duration::seconds(seconds))
}

/// 数値フォーマッター
///
/// 最短の往復可能な10進表記を使用し、極端に大きい・小さい値は
/// `1e+21`、`1e-7`のような指数表記にします。
#[derive(Debug)]
pub(crate) struct NumberFormatter;

impl NumberFormatter {
    /// 数値をフォーマット
    pub fn format(value: f64) -> String {
        if value.is_nan() {
            return "NaN".to_string();
        }
        if value.is_infinite() {
            return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
        }
        if value == 0.0 {
            // -0も"0"
            return "0".to_string();
        }

        let abs = value.abs();
        if (1e-6..1e21).contains(&abs) {
            return value.to_string();
        }

        let exp = format!("{:e}", value);
        match exp.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{}e+{}", mantissa, exponent)
            }
            _ => exp,
        }
    }
}
