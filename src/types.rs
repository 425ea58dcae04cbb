//! Types Module
//!
//! クレート全体で使用する共通データ型を定義するモジュール。

/// セルの値を表す列挙型
///
/// `Empty`は「値が存在しない」ことを表す番兵値です。
/// 空文字列のセルは`Text(String::new())`として区別されます。
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// 文字列（空文字列を含む）
    Text(String),

    /// 整数
    Int(i64),

    /// 浮動小数点数
    Number(f64),

    /// 論理値
    Bool(bool),

    /// 日付・時刻（Excelシリアル値）
    DateTime {
        /// ファイルに格納されたシリアル値
        serial: f64,
        /// 1904年システムのワークブックかどうか
        is_1904: bool,
    },

    /// 期間（Excelシリアル値）
    Duration(f64),

    /// ISO 8601文字列として格納された日付・期間（ODS）
    IsoText(String),

    /// エラー値（例: #DIV/0!）
    Error(String),

    /// 値なし
    Empty,
}

impl CellValue {
    /// 抽出対象にならない値かどうかを判定
    ///
    /// `Empty`に加えて、エラー値（`#N/A`など）も欠損として扱います。
    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Empty | CellValue::Error(_))
    }
}

/// 1枚のシート（行優先のグリッド）
///
/// 0行目をヘッダー行とみなすのは呼び出し側の規約です。
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    /// シート名
    pub name: String,

    /// 行のリスト
    pub rows: Vec<Vec<CellValue>>,
}

impl Sheet {
    /// 新しいシートを生成
    pub fn new(name: impl Into<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// 行が1つもないかどうか
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 行数（ヘッダー行を含む）
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// 0行目（ヘッダー行）
    pub fn header_cells(&self) -> &[CellValue] {
        self.rows.first().map(Vec::as_slice).unwrap_or(&[])
    }

    /// ヘッダー行を除いたデータ行
    pub fn data_rows(&self) -> &[Vec<CellValue>] {
        self.rows.get(1..).unwrap_or(&[])
    }
}

/// 解析済みのワークブック
///
/// シート名の一覧と、先頭シートのグリッドを保持します。
/// ファイルを読み込むたびに生成され、次の読み込みで置き換えられます。
#[derive(Debug, Clone, PartialEq)]
pub struct Workbook {
    /// ワークブック内の順序どおりのシート名
    pub sheet_names: Vec<String>,

    /// 先頭シート
    pub first_sheet: Sheet,
}

/// ユーザーが選択した列
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// 前後の空白を除去した列名
    pub header: String,

    /// 解決された列インデックス（見つからない場合は`None`）
    pub column: Option<usize>,
}

impl Selection {
    /// 抽出を実行できるかどうか
    pub fn is_resolved(&self) -> bool {
        self.column.is_some()
    }
}
