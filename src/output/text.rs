//! Plain Text Encoder

use crate::error::XlsxColumnError;
use std::io::Write;

/// 改行区切りのプレーンテキストを出力するエンコーダー
///
/// 区切りは`\n`のみで、末尾に改行は付けません。
pub struct TextEncoder;

impl TextEncoder {
    pub fn render<W: Write>(&self, items: &[String], writer: &mut W) -> Result<(), XlsxColumnError> {
        writer.write_all(items.join("\n").as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}
