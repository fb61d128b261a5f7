/// Localization table collected while rendering translatable strings
use indexmap::IndexMap;

const NO_COMMENT: &str = "No comment provided by engineer.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizedEntry {
    pub text: String,
    pub comment: String,
}

/// Keys in registration order. Keys are unique; collisions get `_1`, `_2`, ... appended.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocalizationTable {
    entries: IndexMap<String, LocalizedEntry>,
}

impl LocalizationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `text` under `base_key` (or the first free `base_key_N`) and return the key used.
    pub fn register(&mut self, base_key: &str, text: &str, comment: &str) -> String {
        let key = if self.entries.contains_key(base_key) {
            let mut number = 1;
            while self.entries.contains_key(&format!("{}_{}", base_key, number)) {
                number += 1;
            }
            format!("{}_{}", base_key, number)
        } else {
            base_key.to_string()
        };

        self.entries.insert(
            key.clone(),
            LocalizedEntry {
                text: text.to_string(),
                comment: comment.to_string(),
            },
        );
        key
    }

    pub fn get(&self, key: &str) -> Option<&LocalizedEntry> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LocalizedEntry)> {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    /// Render as an Apple `.strings` file
    pub fn to_strings_file(&self) -> String {
        self.iter()
            .map(|(key, entry)| {
                let comment = if entry.comment.is_empty() {
                    NO_COMMENT
                } else {
                    entry.comment.as_str()
                };
                format!("/* {} */\n\"{}\" = \"{}\";\n", comment, key, escape(&entry.text))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}
