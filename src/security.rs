//! Security Module
//!
//! 入力ファイルに対する制限と検証を実装するモジュール。

use crate::error::XlsxColumnError;

/// セキュリティ設定
///
/// ファイル処理時の制限を定義します。
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SecurityConfig {
    /// 入力ファイルの最大サイズ（バイト）
    /// デフォルト: 2GB (2_147_483_648 bytes)
    pub max_input_file_size: u64,
    /// 受け付けるファイル名の接尾辞
    /// デフォルト: `.xlsx`
    pub accepted_extension: String,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_input_file_size: 2_147_483_648, // 2GB
            accepted_extension: ".xlsx".to_string(),
        }
    }
}

impl SecurityConfig {
    /// 入力サイズが上限以内かを検証
    pub fn check_input_size(&self, size: u64) -> Result<(), XlsxColumnError> {
        if size > self.max_input_file_size {
            return Err(XlsxColumnError::SecurityViolation(format!(
                "Input file size exceeds maximum: {} bytes (max: {} bytes)",
                size, self.max_input_file_size
            )));
        }
        Ok(())
    }

    /// ファイル名の検証
    ///
    /// 大文字・小文字を区別した接尾辞の比較のみを行います。
    /// `report.XLSX`は既定の設定では拒否されます。
    ///
    /// # 戻り値
    ///
    /// * `Ok(())` - 拡張子が一致する場合
    /// * `Err(XlsxColumnError::InvalidFileType)` - 一致しない場合
    pub fn validate_file_name(&self, file_name: &str) -> Result<(), XlsxColumnError> {
        if file_name.ends_with(&self.accepted_extension) {
            Ok(())
        } else {
            Err(XlsxColumnError::InvalidFileType {
                file_name: file_name.to_string(),
                expected: self.accepted_extension.clone(),
            })
        }
    }
}
