use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Positive,
    Negative,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SlotKind {
    Person,
    Day,
    Time,
    Response,
}

impl SlotKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SlotKind::Person => "person",
            SlotKind::Day => "day",
            SlotKind::Time => "time",
            SlotKind::Response => "response",
        }
    }
}

impl std::fmt::Display for SlotKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Semantic value a grammar key resolves to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase", tag = "kind", content = "value")]
pub enum SlotValue {
    Person(String),
    Day(String),
    Time(String),
    Response(Polarity),
}

impl SlotValue {
    pub fn kind(&self) -> SlotKind {
        match self {
            SlotValue::Person(_) => SlotKind::Person,
            SlotValue::Day(_) => SlotKind::Day,
            SlotValue::Time(_) => SlotKind::Time,
            SlotValue::Response(_) => SlotKind::Response,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_follows_variant() {
        assert_eq!(SlotValue::Person("Ben Test".into()).kind(), SlotKind::Person);
        assert_eq!(SlotValue::Day("Monday".into()).kind(), SlotKind::Day);
        assert_eq!(SlotValue::Time("10:00".into()).kind(), SlotKind::Time);
        assert_eq!(
            SlotValue::Response(Polarity::Negative).kind(),
            SlotKind::Response
        );
    }

    #[test]
    fn test_serializes_tagged() {
        let json = serde_json::to_value(SlotValue::Response(Polarity::Positive)).unwrap();
        assert_eq!(json["kind"], "response");
        assert_eq!(json["value"], "positive");
    }
}
