//! WebAssembly bindings
//!
//! ブラウザのページから`Session`を操作するためのバインディング。
//! エラーはユーザー向けの通知文言（`user_message()`）として返します。

use wasm_bindgen::prelude::*;

use crate::api::ExportFormat;
use crate::builder::ExtractorBuilder;
use crate::session::{LoadOutcome, LoadTicket, Session};

/// ブラウザ向けのセッション
#[wasm_bindgen]
pub struct WasmSession {
    session: Session,
    /// 完了待ちの読み込み要求
    pending: Vec<LoadTicket>,
}

#[wasm_bindgen]
impl WasmSession {
    /// デフォルト設定、または日付形式を指定してセッションを生成
    #[wasm_bindgen(constructor)]
    pub fn new(date_format: Option<String>) -> Result<WasmSession, String> {
        let mut builder = ExtractorBuilder::new();
        if let Some(ref format) = date_format {
            builder = builder.with_date_format(match format.as_str() {
                "serial" => crate::DateFormat::Serial,
                "iso8601" => crate::DateFormat::Iso8601,
                custom => crate::DateFormat::Custom(custom.to_string()),
            });
        }

        let extractor = builder
            .build()
            .map_err(|e| format!("Failed to create extractor: {}", e))?;

        Ok(WasmSession {
            session: Session::new(extractor),
            pending: Vec::new(),
        })
    }

    /// ファイル選択時に呼び出し、読み込み要求の世代番号を返す
    #[wasm_bindgen(js_name = beginLoad)]
    pub fn begin_load(&mut self, file_name: &str) -> Result<f64, String> {
        let ticket = self
            .session
            .begin_load(file_name)
            .map_err(|e| e.user_message().to_string())?;
        let generation = ticket.generation() as f64;
        self.pending.push(ticket);
        Ok(generation)
    }

    /// 読み込んだバイト列を渡す
    ///
    /// 新しい読み込みが開始されていた場合は`false`を返し、状態は変わりません。
    #[wasm_bindgen(js_name = completeLoad)]
    pub fn complete_load(&mut self, generation: f64, bytes: Vec<u8>) -> Result<bool, String> {
        let position = self
            .pending
            .iter()
            .position(|ticket| ticket.generation() as f64 == generation)
            .ok_or_else(|| format!("Unknown load request: {}", generation))?;
        let ticket = self.pending.remove(position);

        match self.session.complete_load(ticket, Ok(bytes)) {
            Ok(LoadOutcome::Loaded) => Ok(true),
            Ok(LoadOutcome::Superseded) => Ok(false),
            Err(e) => Err(e.user_message().to_string()),
        }
    }

    /// 列の選択肢（ヘッダー行）
    pub fn headers(&self) -> Vec<String> {
        self.session.headers().to_vec()
    }

    /// 列を選択し、抽出ボタンを有効にできるかを返す
    #[wasm_bindgen(js_name = selectColumn)]
    pub fn select_column(&mut self, name: &str) -> bool {
        self.session.select_column(name)
    }

    /// 選択中の列を抽出する
    pub fn extract(&mut self) -> Result<Vec<String>, String> {
        self.session
            .extract()
            .map(<[String]>::to_vec)
            .map_err(|e| e.user_message().to_string())
    }

    /// 一覧に表示する行（空の場合はプレースホルダー）
    #[wasm_bindgen(js_name = displayRows)]
    pub fn display_rows(&self) -> Vec<String> {
        self.session.display_rows()
    }

    /// `extracted_data.txt`の内容
    #[wasm_bindgen(js_name = exportText)]
    pub fn export_text(&self) -> Result<Vec<u8>, String> {
        self.export(ExportFormat::Text)
    }

    /// `extracted_data.pdf`の内容
    #[wasm_bindgen(js_name = exportPdf)]
    pub fn export_pdf(&self) -> Result<Vec<u8>, String> {
        self.export(ExportFormat::Pdf)
    }
}

impl WasmSession {
    fn export(&self, format: ExportFormat) -> Result<Vec<u8>, String> {
        self.session
            .export(format)
            .map(|artifact| artifact.bytes)
            .map_err(|e| e.user_message().to_string())
    }
}

/// Get version information
#[wasm_bindgen(js_name = getVersion)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
