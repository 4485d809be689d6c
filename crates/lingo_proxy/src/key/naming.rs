//! Naming conventions for derived keys.

/// How identifiers are broken into words.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum WordSplit {
    /// Before every upper-case letter: `notFound` → `not`, `Found`.
    #[default]
    Camel,
    /// At underscores: `not_found` → `not`, `found`.
    Snake,
    /// Both.
    Mixed,
}

impl WordSplit {
    /// Split `ident` into its words. Empty words are dropped.
    pub fn split(self, ident: &str) -> Vec<&str> {
        let at_underscore = matches!(self, WordSplit::Snake | WordSplit::Mixed);
        let at_upper = matches!(self, WordSplit::Camel | WordSplit::Mixed);

        let mut words = Vec::new();
        let mut start = 0;
        for (index, ch) in ident.char_indices() {
            if at_underscore && ch == '_' {
                words.push(&ident[start..index]);
                start = index + ch.len_utf8();
            } else if at_upper && ch.is_uppercase() && index > start {
                words.push(&ident[start..index]);
                start = index;
            }
        }
        words.push(&ident[start..]);
        words.retain(|word| !word.is_empty());
        words
    }
}

/// Key naming convention: optional prefix, delimiter, and word splitting.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct KeyNaming {
    /// Leading segment; empty for none.
    pub prefix: String,
    pub delimiter: char,
    pub split: WordSplit,
}

impl KeyNaming {
    /// Lower-case the words of `ident` and join them with the delimiter.
    pub fn format(&self, ident: &str) -> String {
        let mut out = String::with_capacity(ident.len() + 4);
        for (i, word) in self.split.split(ident).into_iter().enumerate() {
            if i > 0 {
                out.push(self.delimiter);
            }
            out.extend(word.chars().flat_map(char::to_lowercase));
        }
        out
    }
}

impl Default for KeyNaming {
    fn default() -> Self {
        KeyNaming {
            prefix: String::new(),
            delimiter: '.',
            split: WordSplit::Camel,
        }
    }
}
