use serde::{Serialize, Deserialize};
use std::fmt;

use crate::error::{Error, Result};

/// Orthographic variant of the corpus text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Source {
    TanzilSimple,
    TanzilUthmani,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::TanzilSimple => "tanzil-simple",
            Source::TanzilUthmani => "tanzil-uthmani",
        }
    }

    pub fn from_str(s: &str) -> Result<Self> {
        match s {
            "tanzil-simple" => Ok(Source::TanzilSimple),
            "tanzil-uthmani" => Ok(Source::TanzilUthmani),
            other => Err(Error::config(format!("unknown source: {}", other))),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fully resolved Quranic index. All fields are 1-based and concrete;
/// the sentinel and wildcard forms live in [`ParsedIndex`] only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Index {
    pub sura: u32,
    pub verse: u32,
    pub word: u32,
    pub block: u32,
}

impl Index {
    pub fn new(sura: u32, verse: u32, word: u32, block: u32) -> Self {
        Self { sura, verse, word, block }
    }
}

impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}:{}", self.sura, self.verse, self.word, self.block)
    }
}

/// One explicit field of an unresolved index. `-1` on the command line
/// parses to `Last`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndexField {
    Num(u32),
    Last,
}

/// Unresolved index as supplied by the caller. `None` means the field was
/// omitted and resolves to the first or last valid value depending on
/// which bound of the range it belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedIndex {
    pub sura: Option<IndexField>,
    pub verse: Option<IndexField>,
    pub word: Option<IndexField>,
    pub block: Option<IndexField>,
}

impl ParsedIndex {
    /// Number of explicit leading fields, used for end-bound inheritance.
    pub fn depth(&self) -> usize {
        [self.sura, self.verse, self.word, self.block]
            .iter()
            .take_while(|f| f.is_some())
            .count()
    }

    pub fn fields(&self) -> [Option<IndexField>; 4] {
        [self.sura, self.verse, self.word, self.block]
    }

    pub fn from_fields(fields: [Option<IndexField>; 4]) -> Self {
        Self {
            sura: fields[0],
            verse: fields[1],
            word: fields[2],
            block: fields[3],
        }
    }
}

/// Index attached to an output record. Word-granularity records carry no
/// block field and render as `sura:verse:word`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordIndex {
    pub sura: u32,
    pub verse: u32,
    pub word: u32,
    pub block: Option<u32>,
}

impl fmt::Display for RecordIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.sura, self.verse, self.word)?;
        if let Some(block) = self.block {
            write!(f, ":{}", block)?;
        }
        Ok(())
    }
}

/// One output unit (a word or a letterblock, per walk options) in its four
/// parallel shapes, plus the unmodified script rendering and its index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub grapheme_ar: String,
    pub grapheme_lt: String,
    pub archigrapheme_ar: String,
    pub archigrapheme_lt: String,
    pub canonical_ar: String,
    pub index: RecordIndex,
}
