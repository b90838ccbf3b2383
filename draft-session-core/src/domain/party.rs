use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two parties in a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum PartyLabel {
    A,
    B,
}

impl PartyLabel {
    pub fn other(self) -> Self {
        match self {
            PartyLabel::A => PartyLabel::B,
            PartyLabel::B => PartyLabel::A,
        }
    }
}

impl Default for PartyLabel {
    fn default() -> Self {
        // Legacy clients never send a label; they always act as the creator
        PartyLabel::A
    }
}

impl fmt::Display for PartyLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartyLabel::A => write!(f, "A"),
            PartyLabel::B => write!(f, "B"),
        }
    }
}

/// Side a party plays on the selected map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum Side {
    Attackers,
    Defenders,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Attackers => Side::Defenders,
            Side::Defenders => Side::Attackers,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Attackers => write!(f, "Attackers"),
            Side::Defenders => write!(f, "Defenders"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum HeadsOrTails {
    Heads,
    Tails,
}

impl fmt::Display for HeadsOrTails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeadsOrTails::Heads => write!(f, "heads"),
            HeadsOrTails::Tails => write!(f, "tails"),
        }
    }
}

/// Match format, drives who acts first after the toss
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum MatchFormat {
    #[serde(rename = "single-map", alias = "bo1")]
    SingleMap,
    #[serde(rename = "multi-map", alias = "bo3")]
    MultiMap,
}

impl MatchFormat {
    /// Party holding the first ban/pick turn once the toss is done
    pub fn first_turn(self) -> PartyLabel {
        match self {
            MatchFormat::SingleMap => PartyLabel::B,
            MatchFormat::MultiMap => PartyLabel::A,
        }
    }
}

impl fmt::Display for MatchFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchFormat::SingleMap => write!(f, "single-map"),
            MatchFormat::MultiMap => write!(f, "multi-map"),
        }
    }
}

/// A participant of a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Party {
    name: String,
    side: Option<Side>,
}

impl Party {
    pub fn new(name: impl Into<String>) -> Self {
        Party {
            name: name.into(),
            side: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn side(&self) -> Option<Side> {
        self.side
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    pub(crate) fn set_side(&mut self, side: Side) {
        self.side = Some(side);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_party_label_other() {
        assert_eq!(PartyLabel::A.other(), PartyLabel::B);
        assert_eq!(PartyLabel::B.other(), PartyLabel::A);
    }

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::Attackers.opposite(), Side::Defenders);
        assert_eq!(Side::Defenders.opposite(), Side::Attackers);
    }

    #[test]
    fn test_first_turn_by_format() {
        assert_eq!(MatchFormat::SingleMap.first_turn(), PartyLabel::B);
        assert_eq!(MatchFormat::MultiMap.first_turn(), PartyLabel::A);
    }

    #[test]
    fn test_match_format_accepts_legacy_names() {
        let single: MatchFormat = serde_json::from_str(r#""bo1""#).unwrap();
        let multi: MatchFormat = serde_json::from_str(r#""bo3""#).unwrap();
        assert_eq!(single, MatchFormat::SingleMap);
        assert_eq!(multi, MatchFormat::MultiMap);

        assert_eq!(
            serde_json::to_string(&MatchFormat::SingleMap).unwrap(),
            r#""single-map""#
        );
    }

    #[test]
    fn test_new_party_has_no_side() {
        let party = Party::new("Alpha");
        assert_eq!(party.name(), "Alpha");
        assert_eq!(party.side(), None);
    }
}
