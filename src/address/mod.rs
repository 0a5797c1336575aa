use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use crate::corpus::Mushaf;
use crate::error::{Error, Result};
use crate::types::{Index, IndexField, ParsedIndex};

lazy_static! {
    static ref INDEX_FORM: Regex = Regex::new(r"^(-?\d*)(:-?\d*){0,3}$").unwrap();
}

/// Which end of a range an index is resolved against. Omitted fields
/// resolve to the first valid value for a start bound and to the last for
/// an end bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Start,
    End,
}

/// Parse one colon-separated index, e.g. `2:10:2`, `1:1:1:-1` or `2::3`.
/// Empty components count as omitted.
pub fn parse_index(text: &str) -> Result<ParsedIndex> {
    if !INDEX_FORM.is_match(text) {
        return Err(Error::invalid_address(format!(
            "index must be sura:verse:word:block with numeric fields, got {:?}",
            text
        )));
    }

    let mut fields: [Option<IndexField>; 4] = [None; 4];
    for (i, part) in text.split(':').enumerate() {
        if part.is_empty() {
            continue;
        }
        fields[i] = Some(parse_field(part)?);
    }
    Ok(ParsedIndex::from_fields(fields))
}

fn parse_field(part: &str) -> Result<IndexField> {
    if part == "-1" {
        return Ok(IndexField::Last);
    }
    let n: u32 = part.parse().map_err(|_| {
        Error::invalid_address(format!("field {:?} is not a positive number or -1", part))
    })?;
    if n == 0 {
        return Err(Error::invalid_address("index fields are 1-based, got 0"));
    }
    Ok(IndexField::Num(n))
}

/// Parse a `start-end` range. A lone index is a single-point range; an
/// empty end (`5-`) means "through the end of the corpus". When the end
/// bound has fewer explicit fields than the start, its fields are
/// right-aligned against the start's depth: the missing leading fields
/// reuse the start's values and the missing trailing fields resolve to
/// "last". So `2:3-10` addresses verses 3..10 of sura 2.
pub fn parse_range(text: &str) -> Result<(ParsedIndex, ParsedIndex)> {
    let split = match text.split_once('-') {
        // A "-1" suffix belongs to the last field, not the range
        // separator, so only split on a '-' not preceded by ':'.
        Some((ini, end)) if !ini.ends_with(':') => Some((ini, end)),
        _ => None,
    };

    let (ini, mut end) = match split {
        Some((ini_text, end_text)) => (parse_index(ini_text)?, parse_index(end_text)?),
        // A lone index is a single-point range: the end reuses the start's
        // fields, with its omitted trailing fields resolving to "last".
        None => {
            let ini = parse_index(text)?;
            (ini, ini)
        }
    };

    let ini_depth = ini.depth();
    let end_depth = end.depth();
    let end_contiguous = end.fields()[end_depth..].iter().all(|f| f.is_none());
    if end_depth > 0 && end_depth < ini_depth && end_contiguous {
        let ini_fields = ini.fields();
        let end_fields = end.fields();
        let mut inherited: [Option<IndexField>; 4] = [None; 4];
        let lead = ini_depth - end_depth;
        inherited[..lead].copy_from_slice(&ini_fields[..lead]);
        inherited[lead..ini_depth].copy_from_slice(&end_fields[..end_depth]);
        debug!(
            "End bound {:?} inherits {} leading field(s) from start {:?}",
            end_fields, lead, ini_fields
        );
        end = ParsedIndex::from_fields(inherited);
    }

    Ok((ini, end))
}

/// Resolve a parsed index against the corpus. Explicit fields are checked
/// against the bounds of their already-resolved parent; `Last` and
/// end-bound omissions resolve to the maximal valid value, start-bound
/// omissions to 1.
pub fn resolve(store: &Mushaf, parsed: &ParsedIndex, bound: Bound) -> Result<Index> {
    let sura = resolve_field(parsed.sura, bound, "sura", store.sura_count())?;
    let verse = resolve_field(parsed.verse, bound, "verse", store.verse_count(sura)?)?;
    let word = resolve_field(parsed.word, bound, "word", store.word_count(sura, verse)?)?;
    let block = resolve_field(
        parsed.block,
        bound,
        "block",
        store.block_count(sura, verse, word)?,
    )?;

    let index = Index::new(sura, verse, word, block);
    debug!("Resolved {:?} bound {:?} to {}", bound, parsed, index);
    Ok(index)
}

fn resolve_field(field: Option<IndexField>, bound: Bound, name: &str, max: u32) -> Result<u32> {
    match field {
        None => Ok(match bound {
            Bound::Start => 1,
            Bound::End => max,
        }),
        Some(IndexField::Last) => Ok(max),
        Some(IndexField::Num(n)) if n <= max => Ok(n),
        Some(IndexField::Num(n)) => Err(Error::invalid_address(format!(
            "{} {} is out of range (1..={})",
            name, n, max
        ))),
    }
}

/// Resolve both bounds of a range and check their order.
pub fn resolve_range(
    store: &Mushaf,
    ini: &ParsedIndex,
    end: &ParsedIndex,
) -> Result<(Index, Index)> {
    let ini = resolve(store, ini, Bound::Start)?;
    let end = resolve(store, end, Bound::End)?;
    if ini > end {
        return Err(Error::RangeOrder {
            start: ini.to_string(),
            end: end.to_string(),
        });
    }
    Ok((ini, end))
}
