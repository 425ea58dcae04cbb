//! Parser Module
//!
//! calamineを使用したスプレッドシート解析の実装。
//! バイト列を受け取り、先頭シートを行優先のグリッドとして取り出します。

mod workbook;

pub(crate) use workbook::WorkbookParser;
