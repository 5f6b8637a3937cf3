//! Character tables for Arabic-script normalization

/// Canonical bare alef (ا)
pub const ALEF: char = '\u{0627}';

/// Alef shapes folded onto [`ALEF`]: أ إ آ ٱ
pub const ALEF_VARIANTS: [char; 4] = ['\u{0623}', '\u{0625}', '\u{0622}', '\u{0671}'];

/// Canonical yeh (ي)
pub const YEH: char = '\u{064A}';

/// Yeh shapes folded onto [`YEH`]: ى (alef maksura)
pub const YEH_VARIANTS: [char; 1] = ['\u{0649}'];

/// Kashida used for visual justification (ـ)
pub const TATWEEL: char = '\u{0640}';

/// Perso-Arabic lookalikes and their Arabic equivalents
pub const LOOKALIKES: [(char, char); 5] = [
    ('\u{06A9}', '\u{0643}'), // keheh -> kaf
    ('\u{06CC}', '\u{064A}'), // farsi yeh -> yeh
    ('\u{06C1}', '\u{0647}'), // heh goal -> heh
    ('\u{06D5}', '\u{0647}'), // ae -> heh
    ('\u{06BE}', '\u{0647}'), // heh doachashmee -> heh
];

/// Harakat, tanween, shadda, sukun, the extended marks up to U+065F, and
/// the superscript alef
#[inline]
pub fn is_diacritic(ch: char) -> bool {
    matches!(ch, '\u{064B}'..='\u{065F}' | '\u{0670}')
}

#[inline]
pub fn is_alef_variant(ch: char) -> bool {
    ALEF_VARIANTS.contains(&ch)
}

#[inline]
pub fn is_yeh_variant(ch: char) -> bool {
    YEH_VARIANTS.contains(&ch)
}

/// Arabic equivalent of a lookalike letter
#[inline]
pub fn lookalike(ch: char) -> Option<char> {
    LOOKALIKES
        .iter()
        .find(|(from, _)| *from == ch)
        .map(|(_, to)| *to)
}
