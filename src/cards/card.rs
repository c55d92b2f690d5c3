//! Card model: a closed sum of the three card kinds.
//!
//! ## Shape
//!
//! Every card carries `name`, `is_captured`, and `owner`; the kind-specific
//! payload lives in [`CardKind`], a serde-tagged union discriminated by a
//! `"type"` field. Serialization is exact: `from_value(to_value(c))` is
//! field-equal to `c`, including capture flag and owner.
//!
//! ## Hidden cards
//!
//! A privacy-filtering collaborator may substitute opponent hand entries
//! with a sentinel tagged [`HIDDEN_CARD_TAG`]. Deserialization skips those
//! rather than failing; any other unknown discriminant is an error.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::StateError;

/// Discriminant tag of the "unknown card" placeholder.
pub const HIDDEN_CARD_TAG: &str = "CardBack";

/// One of the four element strengths attached to character cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    Fire,
    Water,
    Air,
    Earth,
}

impl Element {
    /// All elements, in duel-table order.
    pub const ALL: [Element; 4] = [Element::Fire, Element::Water, Element::Air, Element::Earth];
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Element::Fire => "Fire",
            Element::Water => "Water",
            Element::Air => "Air",
            Element::Earth => "Earth",
        };
        f.write_str(name)
    }
}

/// Deck archetype determining starting element ranges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    Light,
    Dark,
}

impl std::fmt::Display for Faction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Faction::Light => f.write_str("Light"),
            Faction::Dark => f.write_str("Dark"),
        }
    }
}

/// What an action card does when played.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectType {
    /// Add `value` to every element of the player's grid characters.
    #[serde(rename = "boost")]
    Boost,
    /// Draw `value` extra cards.
    #[serde(rename = "extra_draw")]
    ExtraDraw,
}

/// The four element strengths of a character card.
///
/// The deck builder rolls each in 1-5; boosts raise them with no ceiling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementScores {
    #[serde(rename = "Fire")]
    pub fire: i32,
    #[serde(rename = "Water")]
    pub water: i32,
    #[serde(rename = "Air")]
    pub air: i32,
    #[serde(rename = "Earth")]
    pub earth: i32,
}

impl ElementScores {
    #[must_use]
    pub const fn new(fire: i32, water: i32, air: i32, earth: i32) -> Self {
        Self { fire, water, air, earth }
    }

    /// Get the strength for one element.
    #[must_use]
    pub fn get(&self, element: Element) -> i32 {
        match element {
            Element::Fire => self.fire,
            Element::Water => self.water,
            Element::Air => self.air,
            Element::Earth => self.earth,
        }
    }

    /// Add `delta` to all four elements (boost effect; cumulative).
    pub fn boost_all(&mut self, delta: i32) {
        self.fire += delta;
        self.water += delta;
        self.air += delta;
        self.earth += delta;
    }
}

/// Kind-specific card payload, discriminated by a `"type"` tag.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CardKind {
    #[serde(rename = "CharacterCard")]
    Character {
        faction: Faction,
        elements: ElementScores,
    },
    #[serde(rename = "ActionCard")]
    Action {
        effect_type: EffectType,
        value: i32,
    },
    #[serde(rename = "EffectCard")]
    Effect {
        element_bonuses: FxHashMap<Element, i32>,
        /// Opaque descriptor, stored but not applied by capture resolution.
        #[serde(default)]
        bonus_effect: Option<String>,
    },
}

/// A card: immutable shape, mutable battle state.
///
/// `owner` is set if and only if the card sits on the grid (placement or
/// capture); cards in a hand, deck, or discard pile have no owner.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub name: String,
    #[serde(default)]
    pub is_captured: bool,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(flatten)]
    pub kind: CardKind,
}

impl Card {
    /// Create a character card.
    #[must_use]
    pub fn character(name: impl Into<String>, faction: Faction, elements: ElementScores) -> Self {
        Self {
            name: name.into(),
            is_captured: false,
            owner: None,
            kind: CardKind::Character { faction, elements },
        }
    }

    /// Create an action card.
    #[must_use]
    pub fn action(name: impl Into<String>, effect_type: EffectType, value: i32) -> Self {
        Self {
            name: name.into(),
            is_captured: false,
            owner: None,
            kind: CardKind::Action { effect_type, value },
        }
    }

    /// Create an effect card.
    #[must_use]
    pub fn effect(
        name: impl Into<String>,
        element_bonuses: FxHashMap<Element, i32>,
        bonus_effect: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            is_captured: false,
            owner: None,
            kind: CardKind::Effect { element_bonuses, bonus_effect },
        }
    }

    /// Is this a character card (the only kind that occupies grid cells)?
    #[must_use]
    pub fn is_character(&self) -> bool {
        matches!(self.kind, CardKind::Character { .. })
    }

    /// Element strength, for character cards.
    #[must_use]
    pub fn element(&self, element: Element) -> Option<i32> {
        match &self.kind {
            CardKind::Character { elements, .. } => Some(elements.get(element)),
            _ => None,
        }
    }

    /// Serialize to a plain structured value.
    pub fn to_value(&self) -> Result<Value, StateError> {
        serde_json::to_value(self).map_err(|e| StateError::MalformedCard(e.to_string()))
    }

    /// Reconstruct a card from a structured value.
    ///
    /// Returns `Ok(None)` for the hidden-card placeholder; an unknown
    /// discriminant or missing field is a [`StateError::MalformedCard`].
    pub fn from_value(value: &Value) -> Result<Option<Card>, StateError> {
        if value.get("type").and_then(Value::as_str) == Some(HIDDEN_CARD_TAG) {
            return Ok(None);
        }
        serde_json::from_value(value.clone())
            .map(Some)
            .map_err(|e| StateError::MalformedCard(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_character() -> Card {
        Card::character("Light Creature 1", Faction::Light, ElementScores::new(3, 2, 5, 1))
    }

    #[test]
    fn test_character_round_trip() {
        let mut card = sample_character();
        card.owner = Some("alice".to_string());
        card.is_captured = true;

        let value = card.to_value().unwrap();
        assert_eq!(value["type"], "CharacterCard");
        assert_eq!(value["elements"]["Fire"], 3);
        assert_eq!(value["owner"], "alice");

        let restored = Card::from_value(&value).unwrap().unwrap();
        assert_eq!(restored, card);
    }

    #[test]
    fn test_action_round_trip() {
        let card = Card::action("Surge", EffectType::Boost, 2);
        let value = card.to_value().unwrap();
        assert_eq!(value["type"], "ActionCard");
        assert_eq!(value["effect_type"], "boost");

        let restored = Card::from_value(&value).unwrap().unwrap();
        assert_eq!(restored, card);
    }

    #[test]
    fn test_effect_round_trip() {
        let mut bonuses = FxHashMap::default();
        bonuses.insert(Element::Fire, 1);
        bonuses.insert(Element::Earth, 2);
        let card = Card::effect("Ward", bonuses, Some("reflect".to_string()));

        let value = card.to_value().unwrap();
        assert_eq!(value["type"], "EffectCard");

        let restored = Card::from_value(&value).unwrap().unwrap();
        assert_eq!(restored, card);
    }

    #[test]
    fn test_hidden_card_is_skipped() {
        let value = json!({ "type": "CardBack", "name": "Hidden Card" });
        assert_eq!(Card::from_value(&value).unwrap(), None);
    }

    #[test]
    fn test_unknown_discriminant_is_malformed() {
        let value = json!({ "type": "MysteryCard", "name": "???" });
        let err = Card::from_value(&value).unwrap_err();
        assert!(matches!(err, StateError::MalformedCard(_)));
    }

    #[test]
    fn test_element_lookup() {
        let card = sample_character();
        assert_eq!(card.element(Element::Fire), Some(3));
        assert_eq!(card.element(Element::Water), Some(2));
        assert_eq!(card.element(Element::Air), Some(5));
        assert_eq!(card.element(Element::Earth), Some(1));

        let action = Card::action("Surge", EffectType::Boost, 2);
        assert_eq!(action.element(Element::Fire), None);
    }

    #[test]
    fn test_boost_all() {
        let mut scores = ElementScores::new(1, 2, 3, 4);
        scores.boost_all(2);
        assert_eq!(scores, ElementScores::new(3, 4, 5, 6));
    }
}
