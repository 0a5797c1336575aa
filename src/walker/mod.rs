use log::debug;
use serde::{Serialize, Deserialize};

use crate::address::resolve_range;
use crate::corpus::Mushaf;
use crate::error::{Error, Result};
use crate::script::{latinize_archigrapheme, latinize_grapheme, reduce, segment};
use crate::types::{Index, ParsedIndex, Record, RecordIndex, Source};

/// Output configuration for one walk.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WalkOptions {
    /// Orthographic variant to read.
    pub source: Source,
    /// One record per letterblock instead of per word.
    pub blocks: bool,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            source: Source::TanzilSimple,
            blocks: false,
        }
    }
}

/// Resolve both bounds and return a lazy iterator over the records of the
/// inclusive range, in document order. The iterator is finite and fuses
/// after the first error; restart by calling `walk` again.
pub fn walk<'a>(
    store: &'a Mushaf,
    ini: &ParsedIndex,
    end: &ParsedIndex,
    options: &WalkOptions,
) -> Result<Walk<'a>> {
    let (ini, end) = resolve_range(store, ini, end)?;
    debug!("Walking {} through {} ({:?})", ini, end, options);
    Ok(Walk {
        store,
        options: *options,
        cursor: Some(ini),
        end,
        failed: false,
    })
}

/// Document-order iterator over the records of one resolved range.
pub struct Walk<'a> {
    store: &'a Mushaf,
    options: WalkOptions,
    cursor: Option<Index>,
    end: Index,
    failed: bool,
}

impl<'a> Iterator for Walk<'a> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let cursor = self.cursor?;
        let step = if self.options.blocks {
            self.block_step(cursor)
        } else {
            self.word_step(cursor)
        };
        match step {
            Ok(record) => Some(Ok(record)),
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}

impl<'a> Walk<'a> {
    /// Emit the block under the cursor and move past it.
    fn block_step(&mut self, cursor: Index) -> Result<Record> {
        let record = self.block_record(&cursor)?;
        self.cursor = self.advance(&cursor)?;
        Ok(record)
    }

    /// Emit every remaining in-range block of the cursor's word as one
    /// concatenated record and move to the next word.
    fn word_step(&mut self, cursor: Index) -> Result<Record> {
        let word_id = (cursor.sura, cursor.verse, cursor.word);
        let mut merged = self.block_record(&cursor)?;
        merged.index.block = None;

        let mut current = cursor;
        loop {
            match self.advance(&current)? {
                Some(next) if (next.sura, next.verse, next.word) == word_id => {
                    let block = self.block_record(&next)?;
                    merged.grapheme_ar.push_str(&block.grapheme_ar);
                    merged.grapheme_lt.push_str(&block.grapheme_lt);
                    merged.archigrapheme_ar.push_str(&block.archigrapheme_ar);
                    merged.archigrapheme_lt.push_str(&block.archigrapheme_lt);
                    merged.canonical_ar.push_str(&block.canonical_ar);
                    current = next;
                }
                next => {
                    self.cursor = next;
                    break;
                }
            }
        }
        Ok(merged)
    }

    /// Next block index in document order, or `None` past the end bound.
    /// A resolved range never leaves the corpus, so a failed bounds lookup
    /// here means the corpus and the address model disagree.
    fn advance(&self, index: &Index) -> Result<Option<Index>> {
        if *index >= self.end {
            return Ok(None);
        }

        let integrity = |err: Error| match err {
            Error::NotFound(msg) => Error::range_integrity(msg),
            other => other,
        };

        let Index { sura, verse, word, block } = *index;
        let next = if block
            < self
                .store
                .block_count(sura, verse, word)
                .map_err(integrity)?
        {
            Index::new(sura, verse, word, block + 1)
        } else if word < self.store.word_count(sura, verse).map_err(integrity)? {
            Index::new(sura, verse, word + 1, 1)
        } else if verse < self.store.verse_count(sura).map_err(integrity)? {
            Index::new(sura, verse + 1, 1, 1)
        } else if sura < self.store.sura_count() {
            Index::new(sura + 1, 1, 1, 1)
        } else {
            return Err(Error::range_integrity(format!(
                "corpus ends before resolved end bound {}",
                self.end
            )));
        };
        Ok(Some(next))
    }

    /// Run one block through the segment -> reduce -> latinize pipeline.
    fn block_record(&self, index: &Index) -> Result<Record> {
        let text = self
            .store
            .block_text(index, self.options.source)
            .map_err(|err| match err {
                Error::NotFound(msg) => {
                    Error::range_integrity(format!("gap inside resolved range: {}", msg))
                }
                other => other,
            })?;

        let graphemes = segment(text)?;

        let mut grapheme_ar = String::with_capacity(text.len());
        let mut grapheme_lt = String::new();
        let mut archigrapheme_ar = String::new();
        let mut archigrapheme_lt = String::new();

        for grapheme in &graphemes {
            grapheme_ar.push_str(&grapheme.render());
            grapheme_lt.push_str(&latinize_grapheme(grapheme)?);
            let archigrapheme = reduce(grapheme)?;
            archigrapheme_ar.push(archigrapheme.0);
            archigrapheme_lt.push_str(latinize_archigrapheme(archigrapheme)?);
        }

        Ok(Record {
            grapheme_ar,
            grapheme_lt,
            archigrapheme_ar,
            archigrapheme_lt,
            canonical_ar: text.to_string(),
            index: RecordIndex {
                sura: index.sura,
                verse: index.verse,
                word: index.word,
                block: Some(index.block),
            },
        })
    }
}
