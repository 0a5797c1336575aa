use super::{Grapheme, Result, ScriptError};

/// Base letters recognized by the segmenter: the Arabic alphabet plus
/// hamza, the alef variants and the hamza carrier letters.
pub(crate) fn is_base_letter(c: char) -> bool {
    matches!(
        c,
        'ء' | 'آ' | 'أ' | 'ؤ' | 'إ' | 'ئ' | 'ا' | 'ب' | 'ة' | 'ت' | 'ث' | 'ج' | 'ح'
            | 'خ' | 'د' | 'ذ' | 'ر' | 'ز' | 'س' | 'ش' | 'ص' | 'ض' | 'ط' | 'ظ' | 'ع'
            | 'غ' | 'ف' | 'ق' | 'ك' | 'ل' | 'م' | 'ن' | 'ه' | 'و' | 'ى' | 'ي' | 'ٱ'
    )
}

/// Combining marks a base letter absorbs: short vowels, tanwin, shadda,
/// sukun, madda, the hamza marks and the superscript alef.
pub(crate) fn is_mark(c: char) -> bool {
    matches!(c, '\u{064B}'..='\u{0655}' | '\u{0670}')
}

/// Split one letterblock into its ordered grapheme sequence. Each base
/// letter absorbs every immediately following combining mark; the last
/// grapheme is flagged block-final. A mark before any base letter or an
/// unrecognized character means malformed corpus text and fails rather
/// than being dropped.
pub fn segment(text: &str) -> Result<Vec<Grapheme>> {
    let mut graphemes: Vec<Grapheme> = Vec::new();

    for c in text.chars() {
        if is_base_letter(c) {
            graphemes.push(Grapheme {
                base: c,
                marks: Vec::new(),
                block_final: false,
            });
        } else if is_mark(c) {
            match graphemes.last_mut() {
                Some(g) => g.marks.push(c),
                None => {
                    return Err(ScriptError::Segmentation(format!(
                        "combining mark U+{:04X} before any base letter in {:?}",
                        c as u32, text
                    )))
                }
            }
        } else {
            return Err(ScriptError::Segmentation(format!(
                "unrecognized character U+{:04X} in {:?}",
                c as u32, text
            )));
        }
    }

    if graphemes.is_empty() {
        return Err(ScriptError::Segmentation(format!(
            "no base letter in {:?}",
            text
        )));
    }

    if let Some(last) = graphemes.last_mut() {
        last.block_final = true;
    }
    Ok(graphemes)
}
