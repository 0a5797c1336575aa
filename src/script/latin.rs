use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::{Archigrapheme, Grapheme, Result, ScriptError};

// Latin letter notation: the skeleton capital carries superscript digits
// for dots above, subscript digits for dots below and modifier letters for
// hamza (ˀ above, ˁ below), madda (ᵐ) and wasla (ʷ).
static LETTER_LATIN: Lazy<HashMap<char, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ('ا', "A"),
        ('أ', "Aˀ"),
        ('إ', "Aˁ"),
        ('آ', "Aᵐ"),
        ('ٱ', "Aʷ"),
        ('ب', "B₁"),
        ('ت', "B²"),
        ('ث', "B³"),
        ('ن', "B¹"),
        ('ي', "B₂"),
        ('ئ', "Bˀ"),
        ('ى', "Y"),
        ('ج', "G₁"),
        ('ح', "G"),
        ('خ', "G¹"),
        ('د', "D"),
        ('ذ', "D¹"),
        ('ر', "R"),
        ('ز', "R¹"),
        ('س', "S"),
        ('ش', "S³"),
        ('ص', "C"),
        ('ض', "C¹"),
        ('ط', "T"),
        ('ظ', "T¹"),
        ('ع', "E"),
        ('غ', "E¹"),
        ('ف', "F¹"),
        ('ق', "F²"),
        ('ك', "K"),
        ('ل', "L"),
        ('م', "M"),
        ('ه', "H"),
        ('ة', "H²"),
        ('و', "W"),
        ('ؤ', "Wˀ"),
        ('ء', "ʾ"),
    ])
});

// Block-final overrides for the letters whose final rasm shape is its own
// skeleton letter.
static LETTER_LATIN_FINAL: Lazy<HashMap<char, &'static str>> = Lazy::new(|| {
    HashMap::from([('ن', "N¹"), ('ي', "Y₂"), ('ئ', "Yˀ")])
});

static MARK_LATIN: Lazy<HashMap<char, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ('\u{064B}', "ᵃⁿ"), // fathatan
        ('\u{064C}', "ᵘⁿ"), // dammatan
        ('\u{064D}', "ᵢⁿ"), // kasratan
        ('\u{064E}', "ᵃ"),  // fatha
        ('\u{064F}', "ᵘ"),  // damma
        ('\u{0650}', "ᵢ"),  // kasra
        ('\u{0651}', "˜"),  // shadda
        ('\u{0652}', "ᵒ"),  // sukun
        ('\u{0653}', "ᵐ"),  // madda
        ('\u{0654}', "ˀ"),  // hamza above
        ('\u{0655}', "ˁ"),  // hamza below
        ('\u{0670}', "ᴬ"),  // superscript alef
    ])
});

static SKELETON_LATIN: Lazy<HashMap<char, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ('ا', "A"),
        ('ٮ', "B"),
        ('ں', "N"),
        ('ى', "Y"),
        ('ح', "G"),
        ('د', "D"),
        ('ر', "R"),
        ('س', "S"),
        ('ص', "C"),
        ('ط', "T"),
        ('ع', "E"),
        ('ڡ', "F"),
        ('ك', "K"),
        ('ل', "L"),
        ('م', "M"),
        ('ه', "H"),
        ('و', "W"),
        ('ء', "ʾ"),
    ])
});

/// Latin graphemic form: the letter notation followed by one marker per
/// absorbed diacritic, in text order. A table gap is a defect in this
/// crate, not a property of the input, and fails loudly.
pub fn latinize_grapheme(grapheme: &Grapheme) -> Result<String> {
    let letter = if grapheme.block_final {
        LETTER_LATIN_FINAL
            .get(&grapheme.base)
            .or_else(|| LETTER_LATIN.get(&grapheme.base))
    } else {
        LETTER_LATIN.get(&grapheme.base)
    }
    .ok_or_else(|| {
        ScriptError::Transliteration(format!(
            "no Latin form for base letter U+{:04X}",
            grapheme.base as u32
        ))
    })?;

    let mut out = String::from(*letter);
    for mark in &grapheme.marks {
        out.push_str(MARK_LATIN.get(mark).ok_or_else(|| {
            ScriptError::Transliteration(format!(
                "no Latin marker for diacritic U+{:04X}",
                *mark as u32
            ))
        })?);
    }
    Ok(out)
}

/// Latin archigraphemic form: one capital per skeleton letter.
pub fn latinize_archigrapheme(archigrapheme: Archigrapheme) -> Result<&'static str> {
    SKELETON_LATIN
        .get(&archigrapheme.0)
        .copied()
        .ok_or_else(|| {
            ScriptError::Transliteration(format!(
                "no Latin form for archigrapheme U+{:04X}",
                archigrapheme.0 as u32
            ))
        })
}
