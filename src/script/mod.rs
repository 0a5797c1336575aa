pub mod segment;
pub mod reduce;
pub mod latin;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Segmentation error: {0}")]
    Segmentation(String),

    #[error("Reduction error: {0}")]
    Reduction(String),

    #[error("Transliteration error: {0}")]
    Transliteration(String),
}

pub type Result<T> = std::result::Result<T, ScriptError>;

/// One segmented glyph unit: a base letter with every combining mark that
/// follows it in the text, up to the next base letter. `block_final` marks
/// the last grapheme of a letterblock, where some letters take a distinct
/// skeleton shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grapheme {
    pub base: char,
    pub marks: Vec<char>,
    pub block_final: bool,
}

impl Grapheme {
    /// Unmodified script rendering: the base letter followed by its marks.
    pub fn render(&self) -> String {
        let mut s = String::with_capacity(1 + self.marks.len() * 2);
        s.push(self.base);
        s.extend(self.marks.iter());
        s
    }
}

/// Skeleton identity of a grapheme, named by its canonical Arabic rasm
/// codepoint. Many distinct graphemes reduce to the same archigrapheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Archigrapheme(pub char);

pub use self::segment::segment;
pub use self::reduce::reduce;
pub use self::latin::{latinize_archigrapheme, latinize_grapheme};
