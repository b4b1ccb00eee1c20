// src/slug.rs
//! URL slugs for Turkish titles.
//!
//! Heading anchors, the table of contents, post URLs and tag URLs all go
//! through [`slugify`]; anchors only resolve if every caller shares it.

/// Turkish letters and the ASCII letter they fold to.
const TURKISH_FOLDS: [(char, char); 12] = [
    ('ğ', 'g'),
    ('Ğ', 'G'),
    ('ü', 'u'),
    ('Ü', 'U'),
    ('ş', 's'),
    ('Ş', 'S'),
    ('ı', 'i'),
    ('İ', 'I'),
    ('ö', 'o'),
    ('Ö', 'O'),
    ('ç', 'c'),
    ('Ç', 'C'),
];

fn fold_turkish(ch: char) -> char {
    TURKISH_FOLDS
        .iter()
        .find(|(from, _)| *from == ch)
        .map(|(_, to)| *to)
        .unwrap_or(ch)
}

fn is_slug_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// Builds a slug: lowercase, Turkish letters folded to ASCII, whitespace
/// runs joined by a single hyphen, everything outside `[A-Za-z0-9_-]`
/// dropped, hyphen runs collapsed and trimmed.
///
/// `İ` lowercases to `i` plus a combining dot; the dot is not a slug
/// character, so `"İstanbul"` becomes `"istanbul"`.
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    let mut slug = String::with_capacity(lowered.len());
    let mut pending_hyphen = false;

    for ch in lowered.trim().chars().map(fold_turkish) {
        if ch.is_whitespace() || ch == '-' {
            pending_hyphen = true;
        } else if is_slug_char(ch) {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch);
        }
    }

    slug
}
