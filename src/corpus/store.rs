use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use log::{debug, info};

use crate::error::{Error, Result};
use crate::types::{Index, Source};

/// Raw JSON shape of one corpus resource: sura -> verse -> word -> blocks,
/// with 1-based decimal string keys at every mapping level.
type RawMushaf = BTreeMap<String, BTreeMap<String, BTreeMap<String, Vec<String>>>>;

/// One word with its letterblocks in both orthographic variants. Block
/// counts are validated to agree between variants at load time.
#[derive(Debug, Clone)]
struct Word {
    simple: Vec<String>,
    uthmani: Vec<String>,
}

impl Word {
    fn blocks(&self, source: Source) -> &[String] {
        match source {
            Source::TanzilSimple => &self.simple,
            Source::TanzilUthmani => &self.uthmani,
        }
    }
}

/// In-memory Quran corpus, indexed sura -> verse -> word -> block. Built
/// once from the two variant resources and read-only afterwards, so it can
/// be shared freely between readers.
#[derive(Debug)]
pub struct Mushaf {
    suras: Vec<Vec<Vec<Word>>>,
}

impl Mushaf {
    /// Load the two orthographic variant resources from disk.
    pub fn load<P: AsRef<Path>, Q: AsRef<Path>>(simple_path: P, uthmani_path: Q) -> Result<Self> {
        debug!("Loading simple corpus from {:?}", simple_path.as_ref());
        let simple = fs::read_to_string(&simple_path)?;
        debug!("Loading uthmani corpus from {:?}", uthmani_path.as_ref());
        let uthmani = fs::read_to_string(&uthmani_path)?;
        Self::from_json(&simple, &uthmani)
    }

    /// Build the corpus from the two variant resources already in memory.
    pub fn from_json(simple: &str, uthmani: &str) -> Result<Self> {
        let simple: RawMushaf = serde_json::from_str(simple)?;
        let uthmani: RawMushaf = serde_json::from_str(uthmani)?;

        let simple = parse_shape(simple, "simple")?;
        let uthmani = parse_shape(uthmani, "uthmani")?;

        if shape_of(&simple) != shape_of(&uthmani) {
            return Err(Error::corpus_format(
                "variant resources disagree on corpus shape",
            ));
        }

        let mut suras = Vec::with_capacity(simple.len());
        let mut n_words = 0usize;
        let mut n_blocks = 0usize;

        for (sura_s, sura_u) in simple.into_iter().zip(uthmani) {
            let mut verses = Vec::with_capacity(sura_s.len());
            for (verse_s, verse_u) in sura_s.into_iter().zip(sura_u) {
                let mut words = Vec::with_capacity(verse_s.len());
                for (word_s, word_u) in verse_s.into_iter().zip(verse_u) {
                    n_words += 1;
                    n_blocks += word_s.len();
                    words.push(Word { simple: word_s, uthmani: word_u });
                }
                verses.push(words);
            }
            suras.push(verses);
        }

        info!(
            "Loaded corpus: {} suras, {} words, {} blocks",
            suras.len(),
            n_words,
            n_blocks
        );
        Ok(Mushaf { suras })
    }

    pub fn sura_count(&self) -> u32 {
        self.suras.len() as u32
    }

    pub fn verse_count(&self, sura: u32) -> Result<u32> {
        self.sura(sura).map(|s| s.len() as u32)
    }

    pub fn word_count(&self, sura: u32, verse: u32) -> Result<u32> {
        self.verse(sura, verse).map(|v| v.len() as u32)
    }

    pub fn block_count(&self, sura: u32, verse: u32, word: u32) -> Result<u32> {
        self.word(sura, verse, word)
            .map(|w| w.simple.len() as u32)
    }

    /// Text of the block at a fully resolved index, in the requested
    /// orthographic variant.
    pub fn block_text(&self, index: &Index, source: Source) -> Result<&str> {
        let word = self.word(index.sura, index.verse, index.word)?;
        word.blocks(source)
            .get(index.block.checked_sub(1).ok_or_else(|| {
                Error::not_found(format!("block 0 at {}", index))
            })? as usize)
            .map(|s| s.as_str())
            .ok_or_else(|| Error::not_found(format!("no block at {}", index)))
    }

    fn sura(&self, sura: u32) -> Result<&Vec<Vec<Word>>> {
        self.suras
            .get(sura.wrapping_sub(1) as usize)
            .ok_or_else(|| Error::not_found(format!("no sura {}", sura)))
    }

    fn verse(&self, sura: u32, verse: u32) -> Result<&Vec<Word>> {
        self.sura(sura)?
            .get(verse.wrapping_sub(1) as usize)
            .ok_or_else(|| Error::not_found(format!("no verse {}:{}", sura, verse)))
    }

    fn word(&self, sura: u32, verse: u32, word: u32) -> Result<&Word> {
        self.verse(sura, verse)?
            .get(word.wrapping_sub(1) as usize)
            .ok_or_else(|| Error::not_found(format!("no word {}:{}:{}", sura, verse, word)))
    }
}

/// Turn one raw keyed mapping into positional vectors, checking that every
/// mapping level is keyed exactly 1..=n and that no level is empty.
fn parse_shape(raw: RawMushaf, variant: &str) -> Result<Vec<Vec<Vec<Vec<String>>>>> {
    let suras = ordered_level(raw, variant, "sura")?;
    let mut out = Vec::with_capacity(suras.len());

    for (isura, sura) in suras.into_iter().enumerate() {
        let verses = ordered_level(sura, variant, &format!("verse in sura {}", isura + 1))?;
        let mut sura_out = Vec::with_capacity(verses.len());

        for (iverse, verse) in verses.into_iter().enumerate() {
            let words = ordered_level(
                verse,
                variant,
                &format!("word in {}:{}", isura + 1, iverse + 1),
            )?;

            for (iword, blocks) in words.iter().enumerate() {
                if blocks.is_empty() {
                    return Err(Error::corpus_format(format!(
                        "{} corpus: word {}:{}:{} has no blocks",
                        variant,
                        isura + 1,
                        iverse + 1,
                        iword + 1
                    )));
                }
                if blocks.iter().any(|b| b.is_empty()) {
                    return Err(Error::corpus_format(format!(
                        "{} corpus: empty block text at {}:{}:{}",
                        variant,
                        isura + 1,
                        iverse + 1,
                        iword + 1
                    )));
                }
            }
            sura_out.push(words);
        }
        out.push(sura_out);
    }
    Ok(out)
}

/// Collapse one `{"1": x, "2": y, ...}` mapping level into a vector,
/// rejecting non-numeric keys, gaps and empty levels.
fn ordered_level<T>(level: BTreeMap<String, T>, variant: &str, what: &str) -> Result<Vec<T>> {
    if level.is_empty() {
        return Err(Error::corpus_format(format!(
            "{} corpus: empty {} level",
            variant, what
        )));
    }

    let mut entries = Vec::with_capacity(level.len());
    for (key, value) in level {
        let n: u32 = key.parse().map_err(|_| {
            Error::corpus_format(format!(
                "{} corpus: non-numeric {} key {:?}",
                variant, what, key
            ))
        })?;
        entries.push((n, value));
    }
    entries.sort_by_key(|(n, _)| *n);

    for (expect, (n, _)) in (1u32..).zip(entries.iter()) {
        if *n != expect {
            return Err(Error::corpus_format(format!(
                "{} corpus: {} numbering is not contiguous (expected {}, found {})",
                variant, what, expect, n
            )));
        }
    }

    Ok(entries.into_iter().map(|(_, v)| v).collect())
}

fn shape_of(levels: &[Vec<Vec<Vec<String>>>]) -> Vec<Vec<Vec<usize>>> {
    levels
        .iter()
        .map(|sura| {
            sura.iter()
                .map(|verse| verse.iter().map(|word| word.len()).collect())
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_corpus() -> &'static str {
        // Two suras with distinct shapes at every level.
        r#"{
            "1": {
                "1": {"1": ["بِسْمِ"], "2": ["ا", "للَّهِ"]},
                "2": {"1": ["رَ", "بِّ"]}
            },
            "2": {
                "1": {"1": ["وَ", "لَا"]}
            }
        }"#
    }

    #[test]
    fn loads_and_indexes_valid_corpus() {
        let m = Mushaf::from_json(tiny_corpus(), tiny_corpus()).unwrap();
        assert_eq!(m.sura_count(), 2);
        assert_eq!(m.verse_count(1).unwrap(), 2);
        assert_eq!(m.word_count(1, 1).unwrap(), 2);
        assert_eq!(m.block_count(1, 1, 2).unwrap(), 2);
        assert_eq!(
            m.block_text(&Index::new(1, 1, 2, 2), Source::TanzilSimple)
                .unwrap(),
            "للَّهِ"
        );
    }

    #[test]
    fn lookups_outside_corpus_are_not_found() {
        let m = Mushaf::from_json(tiny_corpus(), tiny_corpus()).unwrap();
        assert!(matches!(m.verse_count(3), Err(Error::NotFound(_))));
        assert!(matches!(
            m.block_text(&Index::new(1, 1, 2, 3), Source::TanzilSimple),
            Err(Error::NotFound(_))
        ));
        assert!(matches!(
            m.block_text(&Index::new(1, 3, 1, 1), Source::TanzilSimple),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn gap_in_numbering_is_a_format_error() {
        let bad = r#"{"1": {"1": {"1": ["ا"], "3": ["ب"]}}}"#;
        assert!(matches!(
            Mushaf::from_json(bad, bad),
            Err(Error::CorpusFormat(_))
        ));
    }

    #[test]
    fn non_numeric_key_is_a_format_error() {
        let bad = r#"{"one": {"1": {"1": ["ا"]}}}"#;
        assert!(matches!(
            Mushaf::from_json(bad, bad),
            Err(Error::CorpusFormat(_))
        ));
    }

    #[test]
    fn empty_word_is_a_format_error() {
        let bad = r#"{"1": {"1": {"1": []}}}"#;
        assert!(matches!(
            Mushaf::from_json(bad, bad),
            Err(Error::CorpusFormat(_))
        ));
    }

    #[test]
    fn variant_shape_mismatch_is_a_format_error() {
        let simple = r#"{"1": {"1": {"1": ["ا", "ب"]}}}"#;
        let uthmani = r#"{"1": {"1": {"1": ["ا"]}}}"#;
        assert!(matches!(
            Mushaf::from_json(simple, uthmani),
            Err(Error::CorpusFormat(_))
        ));
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        let bad = "not json";
        assert!(Mushaf::from_json(bad, bad).is_err());
    }
}
