//! Text helpers shared by the interpreters.

/// Case-fold and trim a transcript fragment.
#[must_use]
pub fn normalize_transcript(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Title-case each word: a letter is upper-cased when it follows a non-letter.
///
/// Digits and punctuation split words, so `b12` stays `B12` and `o'brien`
/// becomes `O'Brien`.
#[must_use]
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_alpha = false;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if prev_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(ch);
            prev_alpha = false;
        }
    }
    out
}

/// Collapse runs of whitespace to single spaces and trim the ends.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
