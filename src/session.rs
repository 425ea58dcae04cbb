//! Session Module
//!
//! ファイルの読み込みから列の選択、抽出、エクスポートまでの
//! ユーザー操作の流れを管理するモジュール。
//!
//! 読み込みは「開始」と「完了」の2段階で行います。開始時に発行される
//! `LoadTicket`は世代番号を持ち、完了時に最新の世代でなければ結果を破棄します。
//! これにより、後から選択したファイルの読み込みが先に終わった場合でも、
//! 古いファイルの結果で状態が上書きされることはありません。

use log::{debug, error, warn};
use std::io;

use crate::api::{ExportFormat, EMPTY_COLUMN_PLACEHOLDER};
use crate::builder::Extractor;
use crate::error::XlsxColumnError;
use crate::output::Artifact;
use crate::types::{Selection, Workbook};

/// 読み込み要求の引換券
///
/// `Session::begin_load`で発行され、`Session::complete_load`で消費されます。
#[derive(Debug, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    file_name: String,
}

impl LoadTicket {
    /// 読み込み対象のファイル名
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// 発行時の世代番号
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// 読み込み完了時の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// ワークブックを読み込み、状態を置き換えた
    Loaded,
    /// より新しい読み込みが開始されていたため、結果を破棄した
    Superseded,
}

/// 1ユーザー分の操作状態
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsxcolumn::{ExportFormat, Session};
///
/// # fn main() -> Result<(), xlsxcolumn::XlsxColumnError> {
/// let mut session = Session::default();
///
/// let ticket = session.begin_load("people.xlsx")?;
/// session.complete_load(ticket, std::fs::read("people.xlsx"))?;
///
/// if session.select_column("Age") {
///     session.extract()?;
///     let artifact = session.export(ExportFormat::Pdf)?;
///     std::fs::write(artifact.file_name, &artifact.bytes)?;
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct Session {
    extractor: Extractor,

    /// 最後に発行した世代番号
    generation: u64,

    /// 読み込み済みのファイル名
    file_name: Option<String>,

    /// 読み込み済みのワークブック
    workbook: Option<Workbook>,

    /// 先頭シートのヘッダー行
    headers: Vec<String>,

    /// 現在の列選択
    selection: Option<Selection>,

    /// 直近の抽出結果
    extracted: Vec<String>,

    /// 抽出結果の一覧を表示中か
    output_visible: bool,
}

impl Session {
    /// 設定済みの`Extractor`でセッションを生成
    pub fn new(extractor: Extractor) -> Self {
        Self {
            extractor,
            generation: 0,
            file_name: None,
            workbook: None,
            headers: Vec::new(),
            selection: None,
            extracted: Vec::new(),
            output_visible: false,
        }
    }

    /// ファイルの読み込みを開始する
    ///
    /// 拡張子が一致しない場合は状態を変更せずにエラーを返します。
    /// 一致した場合は新しい世代の引換券を発行し、それ以前に発行された
    /// 引換券はすべて無効になります。
    pub fn begin_load(&mut self, file_name: &str) -> Result<LoadTicket, XlsxColumnError> {
        self.extractor.validate_file_name(file_name)?;

        self.generation += 1;
        debug!("load #{} started for '{}'", self.generation, file_name);

        Ok(LoadTicket {
            generation: self.generation,
            file_name: file_name.to_string(),
        })
    }

    /// 読み込んだバイト列を解析し、状態に反映する
    ///
    /// # 戻り値
    ///
    /// * `Ok(LoadOutcome::Loaded)` - ファイル名、シート、ヘッダー行を置き換え、
    ///   列選択と抽出結果をクリアした場合
    /// * `Ok(LoadOutcome::Superseded)` - 引換券が最新でなく、結果を破棄した場合
    /// * `Err(XlsxColumnError::EmptySheet)` - 先頭シートに行がない場合
    /// * `Err(_)` - 読み込みまたは解析に失敗した場合
    ///
    /// エラーの場合、状態は読み込み開始前のまま変わりません。
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        bytes: io::Result<Vec<u8>>,
    ) -> Result<LoadOutcome, XlsxColumnError> {
        if ticket.generation != self.generation {
            warn!(
                "discarding stale load #{} of '{}' (latest is #{})",
                ticket.generation, ticket.file_name, self.generation
            );
            return Ok(LoadOutcome::Superseded);
        }

        let workbook = match bytes
            .map_err(XlsxColumnError::from)
            .and_then(|bytes| self.extractor.decode(bytes))
        {
            Ok(workbook) => workbook,
            Err(e) => {
                error!("failed to load '{}': {}", ticket.file_name, e);
                return Err(e);
            }
        };

        if workbook.first_sheet.is_empty() {
            return Err(XlsxColumnError::EmptySheet(workbook.first_sheet.name));
        }

        self.headers = self.extractor.header_row(&workbook.first_sheet);
        debug!(
            "loaded '{}': sheet '{}' with {} column(s)",
            ticket.file_name,
            workbook.first_sheet.name,
            self.headers.len()
        );

        self.file_name = Some(ticket.file_name);
        self.workbook = Some(workbook);
        self.selection = None;
        self.extracted.clear();
        self.output_visible = false;

        Ok(LoadOutcome::Loaded)
    }

    /// パスからファイルを読み込む
    ///
    /// `begin_load`、非同期の読み込み、`complete_load`を順に行います。
    /// 読み込み中も`&mut self`を借用し続けるため、同じセッションで
    /// `load_path`を並行して呼ぶことはできません。読み込みを重ねる場合は
    /// `begin_load`と`complete_load`を直接使い、世代番号で古い結果を破棄します。
    #[cfg(not(target_arch = "wasm32"))]
    pub async fn load_path(
        &mut self,
        path: impl AsRef<std::path::Path>,
    ) -> Result<LoadOutcome, XlsxColumnError> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let ticket = self.begin_load(&file_name)?;
        let bytes = tokio::fs::read(path).await;
        self.complete_load(ticket, bytes)
    }

    /// 列を選択する
    ///
    /// 名前の前後の空白を除去してからヘッダー行と照合します。
    ///
    /// # 戻り値
    ///
    /// 抽出を実行できる状態になったかどうか
    pub fn select_column(&mut self, name: &str) -> bool {
        let header = name.trim().to_string();
        let column = if header.is_empty() {
            None
        } else {
            self.extractor.resolve(&self.headers, &header)
        };

        let selection = Selection { header, column };
        let enabled = selection.is_resolved();
        self.selection = Some(selection);
        enabled
    }

    /// 抽出を実行できる状態かどうか
    pub fn can_extract(&self) -> bool {
        self.workbook.is_some() && self.selection.as_ref().is_some_and(Selection::is_resolved)
    }

    /// 選択中の列を抽出する
    ///
    /// 直前の抽出結果は最初にクリアされます。
    ///
    /// # 発生し得るエラー
    ///
    /// * `XlsxColumnError::MissingSelection` - ファイルまたは列が選択されていない
    /// * `XlsxColumnError::ColumnNotFound` - 選択された列名がヘッダー行にない
    pub fn extract(&mut self) -> Result<&[String], XlsxColumnError> {
        self.extracted.clear();
        self.output_visible = false;

        let workbook = self.workbook.as_ref().ok_or(XlsxColumnError::MissingSelection)?;
        let selection = self
            .selection
            .as_ref()
            .filter(|selection| !selection.header.is_empty())
            .ok_or(XlsxColumnError::MissingSelection)?;
        let column = selection
            .column
            .ok_or_else(|| XlsxColumnError::ColumnNotFound(selection.header.clone()))?;

        self.extracted = self.extractor.extract(&workbook.first_sheet, column);
        self.output_visible = true;

        Ok(&self.extracted)
    }

    /// 一覧に表示する行
    ///
    /// 抽出結果が空の場合はプレースホルダー1行を返します。
    /// プレースホルダーはエクスポート対象には含まれません。
    pub fn display_rows(&self) -> Vec<String> {
        if self.extracted.is_empty() {
            vec![EMPTY_COLUMN_PLACEHOLDER.to_string()]
        } else {
            self.extracted.clone()
        }
    }

    /// 抽出結果をエクスポートする
    ///
    /// # 発生し得るエラー
    ///
    /// * `XlsxColumnError::NothingToExport` - 抽出結果が空
    pub fn export(&self, format: ExportFormat) -> Result<Artifact, XlsxColumnError> {
        self.extractor.export(&self.extracted, format)
    }

    /// 抽出結果の一覧を表示中かどうか
    pub fn output_visible(&self) -> bool {
        self.output_visible
    }

    /// 直近の抽出結果
    pub fn extracted(&self) -> &[String] {
        &self.extracted
    }

    /// 先頭シートのヘッダー行（列の選択肢）
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// 読み込み済みのファイル名
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    /// 読み込み済みのワークブック
    pub fn workbook(&self) -> Option<&Workbook> {
        self.workbook.as_ref()
    }

    /// 現在の列選択
    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    /// 抽出・エクスポートに使用する設定済みの`Extractor`
    pub fn extractor(&self) -> &Extractor {
        &self.extractor
    }
}
