use std::sync::Arc;

use crate::models::{SlotKind, SlotValue};
use crate::services::grammar::Grammar;

/// Why an utterance cannot fill the slot a turn asks for.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum MatchError {
    #[error("'{heard}' is not in the grammar")]
    Unrecognized { heard: String },

    #[error("'{heard}' is a {found}, expected a {expected}")]
    WrongSlotKind {
        heard: String,
        expected: SlotKind,
        found: SlotKind,
    },
}

#[derive(Debug, Clone)]
pub struct UtteranceMatcher {
    grammar: Arc<Grammar>,
}

impl UtteranceMatcher {
    pub fn new(grammar: Arc<Grammar>) -> Self {
        Self { grammar }
    }

    pub fn is_known(&self, utterance: &str) -> bool {
        self.grammar.lookup(utterance).is_some()
    }

    pub fn extract(&self, utterance: &str, expected: SlotKind) -> Option<SlotValue> {
        self.classify(utterance, expected).ok()
    }

    pub fn classify(&self, utterance: &str, expected: SlotKind) -> Result<SlotValue, MatchError> {
        let value = self
            .grammar
            .lookup(utterance)
            .ok_or_else(|| MatchError::Unrecognized {
                heard: utterance.to_string(),
            })?;

        if value.kind() != expected {
            return Err(MatchError::WrongSlotKind {
                heard: utterance.to_string(),
                expected,
                found: value.kind(),
            });
        }

        Ok(value.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Polarity;

    const ALL_KINDS: [SlotKind; 4] = [
        SlotKind::Person,
        SlotKind::Day,
        SlotKind::Time,
        SlotKind::Response,
    ];

    fn matcher() -> UtteranceMatcher {
        UtteranceMatcher::new(Arc::new(Grammar::builtin()))
    }

    #[test]
    fn test_is_known_ignores_case() {
        let m = matcher();
        for u in ["vlad", "VLAD", "Vlad", "vLaD", "TUESDAY", "No Way"] {
            assert!(m.is_known(u), "{u} should be known");
        }
        for u in ["banana", "", "vlad.", "yes please"] {
            assert!(!m.is_known(u), "{u} should not be known");
        }
    }

    #[test]
    fn test_extract_every_entry_against_every_kind() {
        let m = matcher();
        let grammar = Grammar::builtin();
        for (key, value) in grammar.iter() {
            for kind in ALL_KINDS {
                let extracted = m.extract(key, kind);
                if value.kind() == kind {
                    assert_eq!(extracted.as_ref(), Some(value), "{key} as {kind}");
                } else {
                    assert!(extracted.is_none(), "{key} must not extract as {kind}");
                }
            }
        }
    }

    #[test]
    fn test_unknown_extracts_nothing() {
        let m = matcher();
        for kind in ALL_KINDS {
            assert!(m.extract("banana", kind).is_none());
            assert!(m.extract("", kind).is_none());
        }
    }

    #[test]
    fn test_classify_distinguishes_failures() {
        let m = matcher();
        assert_eq!(
            m.classify("monday", SlotKind::Person),
            Err(MatchError::WrongSlotKind {
                heard: "monday".to_string(),
                expected: SlotKind::Person,
                found: SlotKind::Day,
            })
        );
        assert_eq!(
            m.classify("banana", SlotKind::Day),
            Err(MatchError::Unrecognized {
                heard: "banana".to_string()
            })
        );
        assert_eq!(
            m.classify("Yes", SlotKind::Response),
            Ok(SlotValue::Response(Polarity::Positive))
        );
    }

    #[test]
    fn test_numeric_time_matches_time_kind() {
        let m = matcher();
        assert_eq!(
            m.extract("10", SlotKind::Time),
            Some(SlotValue::Time("10:00".to_string()))
        );
        assert!(m.extract("10", SlotKind::Response).is_none());
    }
}
