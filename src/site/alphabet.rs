// src/site/alphabet.rs
//! The Turkish alphabet and the letter listings built on it.

use crate::types::ValidationError;
use std::fmt;

/// Letters in alphabet order with their Turkish upper-case forms.
const TURKISH_LETTERS: [(&str, &str); 28] = [
    ("a", "A"),
    ("b", "B"),
    ("c", "C"),
    ("ç", "Ç"),
    ("d", "D"),
    ("e", "E"),
    ("f", "F"),
    ("g", "G"),
    ("h", "H"),
    ("ı", "I"),
    ("i", "İ"),
    ("j", "J"),
    ("k", "K"),
    ("l", "L"),
    ("m", "M"),
    ("n", "N"),
    ("o", "O"),
    ("ö", "Ö"),
    ("p", "P"),
    ("r", "R"),
    ("s", "S"),
    ("ş", "Ş"),
    ("t", "T"),
    ("u", "U"),
    ("ü", "Ü"),
    ("v", "V"),
    ("y", "Y"),
    ("z", "Z"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Letter {
    pub lower: &'static str,
    pub upper: &'static str,
}

impl Letter {
    /// `/listeler/<letter>`
    pub fn path(&self) -> String {
        format!("/listeler/{}", self.lower)
    }

    /// Tag that marks names of this letter and gender, e.g. `a erkek`.
    pub fn gender_tag(&self, gender: Gender) -> String {
        format!("{} {}", self.lower, gender.tag_word())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Boy,
    Girl,
}

impl Gender {
    pub fn tag_word(&self) -> &'static str {
        match self {
            Gender::Boy => "erkek",
            Gender::Girl => "kız",
        }
    }

    /// Tab heading on the letter page.
    pub fn heading(&self) -> &'static str {
        match self {
            Gender::Boy => "Erkek İsimleri",
            Gender::Girl => "Kız İsimleri",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag_word())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Alphabet {
    letters: Vec<Letter>,
}

impl Alphabet {
    pub fn turkish() -> Self {
        Self {
            letters: TURKISH_LETTERS
                .iter()
                .map(|&(lower, upper)| Letter { lower, upper })
                .collect(),
        }
    }

    pub fn letters(&self) -> &[Letter] {
        &self.letters
    }

    /// Looks a letter up by either case. `I` is the capital of `ı` and
    /// `İ` the capital of `i`, so upper-case input is matched as written.
    pub fn find(&self, raw: &str) -> Result<Letter, ValidationError> {
        let raw = raw.trim();
        self.letters
            .iter()
            .find(|letter| letter.lower == raw || letter.upper == raw)
            .or_else(|| {
                let lowered = raw.to_lowercase();
                self.letters.iter().find(|letter| letter.lower == lowered)
            })
            .copied()
            .ok_or_else(|| ValidationError::InvalidLetter(raw.to_string()))
    }

    pub fn is_valid_letter(&self, raw: &str) -> bool {
        self.find(raw).is_ok()
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::turkish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn has_twenty_eight_letters_in_order() {
        let alphabet = Alphabet::turkish();
        assert_eq!(alphabet.letters().len(), 28);
        let joined: String = alphabet.letters().iter().map(|l| l.lower).collect();
        assert_eq!(joined, "abcçdefghıijklmnoöprsştuüvyz");
    }

    #[test]
    fn dotted_and_dotless_i_are_distinct() {
        let alphabet = Alphabet::turkish();
        assert_eq!(alphabet.find("I").unwrap().lower, "ı");
        assert_eq!(alphabet.find("İ").unwrap().lower, "i");
        assert_eq!(alphabet.find("i").unwrap().upper, "İ");
        assert_eq!(alphabet.find("Ç").unwrap().path(), "/listeler/ç");
    }

    #[test]
    fn rejects_letters_outside_the_alphabet() {
        let alphabet = Alphabet::turkish();
        for raw in ["q", "w", "x", "ab", ""] {
            assert!(!alphabet.is_valid_letter(raw), "{raw} should be rejected");
        }
    }

    #[test]
    fn gender_tags() {
        let letter = Alphabet::turkish().find("ş").unwrap();
        assert_eq!(letter.gender_tag(Gender::Boy), "ş erkek");
        assert_eq!(letter.gender_tag(Gender::Girl), "ş kız");
    }
}
