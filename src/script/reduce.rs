use super::{Archigrapheme, Grapheme, Result, ScriptError};

/// Canonical rasm skeleton codepoints produced by [`reduce`].
pub mod skeleton {
    pub const ALEF: char = 'ا';
    pub const DENTICLE: char = 'ٮ'; // U+066E dotless ba
    pub const NUN_FINAL: char = 'ں'; // U+06BA dotless nun
    pub const YA_FINAL: char = 'ى';
    pub const HA_JIMI: char = 'ح';
    pub const DAL: char = 'د';
    pub const RA: char = 'ر';
    pub const SIN: char = 'س';
    pub const SAD: char = 'ص';
    pub const TA: char = 'ط';
    pub const AYN: char = 'ع';
    pub const FA: char = 'ڡ'; // U+06A1 dotless fa
    pub const KAF: char = 'ك';
    pub const LAM: char = 'ل';
    pub const MIM: char = 'م';
    pub const HA: char = 'ه';
    pub const WAW: char = 'و';
    pub const HAMZA: char = 'ء';
}

/// Reduce one grapheme to its archigrapheme. Vowel and gemination marks
/// are dropped; letters whose form encodes a distinct underlying identity
/// (hamza carriers, alef variants) fold into their canonical skeleton
/// first. Nun and ya keep the denticle skeleton except in block-final
/// position, where their deep final forms are distinct rasm shapes.
pub fn reduce(grapheme: &Grapheme) -> Result<Archigrapheme> {
    use skeleton::*;

    let skeleton = match grapheme.base {
        'ا' | 'أ' | 'إ' | 'آ' | 'ٱ' => ALEF,
        'ب' | 'ت' | 'ث' => DENTICLE,
        'ن' | 'ي' | 'ئ' if !grapheme.block_final => DENTICLE,
        'ن' => NUN_FINAL,
        'ي' | 'ئ' | 'ى' => YA_FINAL,
        'ج' | 'ح' | 'خ' => HA_JIMI,
        'د' | 'ذ' => DAL,
        'ر' | 'ز' => RA,
        'س' | 'ش' => SIN,
        'ص' | 'ض' => SAD,
        'ط' | 'ظ' => TA,
        'ع' | 'غ' => AYN,
        'ف' | 'ق' => FA,
        'ك' => KAF,
        'ل' => LAM,
        'م' => MIM,
        'ه' | 'ة' => HA,
        'و' | 'ؤ' => WAW,
        'ء' => HAMZA,
        other => {
            return Err(ScriptError::Reduction(format!(
                "no skeleton mapping for base letter U+{:04X}",
                other as u32
            )))
        }
    };

    Ok(Archigrapheme(skeleton))
}
