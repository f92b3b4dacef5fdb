use std::collections::HashMap;

use crate::models::{Polarity, SlotValue};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GrammarError {
    #[error("duplicate grammar key: {0}")]
    DuplicateKey(String),
}

/// Exact-match table from utterance to slot value.
///
/// Keys are stored lowercase; lookups lowercase the whole utterance and never
/// split it into words, so "vlad please" does not match "vlad".
#[derive(Debug, Clone)]
pub struct Grammar {
    entries: HashMap<String, SlotValue>,
}

impl Grammar {
    pub fn builtin() -> Self {
        let person = |name: &str| SlotValue::Person(name.to_string());
        let day = |name: &str| SlotValue::Day(name.to_string());
        let time = |t: &str| SlotValue::Time(t.to_string());

        let entries = [
            ("vlad", person("Vladislav Maraev")),
            ("aya", person("Nayat Astaiza Soriano")),
            ("rasmus", person("Rasmus Blanck")),
            ("ben", person("Ben Test")),
            ("jack", person("Jack Test")),
            ("monday", day("Monday")),
            ("tuesday", day("Tuesday")),
            ("10", time("10:00")),
            ("11", time("11:00")),
            ("yes", SlotValue::Response(Polarity::Positive)),
            ("no", SlotValue::Response(Polarity::Negative)),
            ("of course", SlotValue::Response(Polarity::Positive)),
            ("no way", SlotValue::Response(Polarity::Negative)),
        ];

        Self {
            entries: entries
                .into_iter()
                .map(|(key, value)| (key.to_string(), value))
                .collect(),
        }
    }

    pub fn from_entries<I, K>(entries: I) -> Result<Self, GrammarError>
    where
        I: IntoIterator<Item = (K, SlotValue)>,
        K: AsRef<str>,
    {
        let mut map = HashMap::new();
        for (key, value) in entries {
            let key = key.as_ref().to_lowercase();
            if map.contains_key(&key) {
                return Err(GrammarError::DuplicateKey(key));
            }
            map.insert(key, value);
        }
        Ok(Self { entries: map })
    }

    pub fn lookup(&self, utterance: &str) -> Option<&SlotValue> {
        self.entries.get(&utterance.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SlotValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl Default for Grammar {
    fn default() -> Self {
        Self::builtin()
    }
}
