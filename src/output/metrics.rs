//! Font Metrics
//!
//! PDF標準14フォントのHelveticaの文字幅（1000単位/em）。
//! 折り返し位置の計算に使用します。

/// ポイントからミリメートルへの換算係数
pub(crate) const MM_PER_PT: f64 = 25.4 / 72.0;

/// 表に含まれない文字の幅
const DEFAULT_WIDTH: u16 = 556;

/// ASCII 0x20..=0x7E の字幅
#[rustfmt::skip]
const HELVETICA_ASCII: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,      // 'p'..'~'
];

/// Helveticaの文字幅による文字列幅の計測
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Helvetica;

impl Helvetica {
    /// 1文字の幅（1000単位/em）
    pub fn char_units(&self, ch: char) -> u16 {
        match ch {
            ' '..='~' => HELVETICA_ASCII[ch as usize - 0x20],
            '\u{a0}' => 278,
            _ => DEFAULT_WIDTH,
        }
    }

    /// 文字列の幅（mm）
    pub fn text_width(&self, text: &str, font_size: f64) -> f64 {
        text.chars().map(|ch| self.char_width(ch, font_size)).sum()
    }

    /// 1文字の幅（mm）
    pub fn char_width(&self, ch: char, font_size: f64) -> f64 {
        self.char_units(ch) as f64 / 1000.0 * font_size * MM_PER_PT
    }
}
