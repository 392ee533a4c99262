//! Serialization and deserialization for card types

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::cards_parsing::parse_slot;
use super::cards_types::{Card, CardSlot, GameType, Suit};

// Suit serde
impl Serialize for Suit {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let s = match self {
            Suit::Clubs => "CLUBS",
            Suit::Spades => "SPADES",
            Suit::Hearts => "HEARTS",
            Suit::Diamonds => "DIAMONDS",
        };
        serializer.serialize_str(s)
    }
}

impl<'de> Deserialize<'de> for Suit {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "CLUBS" => Ok(Suit::Clubs),
            "SPADES" => Ok(Suit::Spades),
            "HEARTS" => Ok(Suit::Hearts),
            "DIAMONDS" => Ok(Suit::Diamonds),
            _ => Err(serde::de::Error::custom(format!("Invalid suit: {s}"))),
        }
    }
}

// GameType serde
impl Serialize for GameType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let s = match self {
            GameType::Clubs => "CLUBS",
            GameType::Spades => "SPADES",
            GameType::Hearts => "HEARTS",
            GameType::Diamonds => "DIAMONDS",
            GameType::Grand => "GRAND",
            GameType::Null => "NULL",
            GameType::Ramsch => "RAMSCH",
            GameType::PassedIn => "PASSED_IN",
        };
        serializer.serialize_str(s)
    }
}

impl<'de> Deserialize<'de> for GameType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "CLUBS" => Ok(GameType::Clubs),
            "SPADES" => Ok(GameType::Spades),
            "HEARTS" => Ok(GameType::Hearts),
            "DIAMONDS" => Ok(GameType::Diamonds),
            "GRAND" => Ok(GameType::Grand),
            "NULL" => Ok(GameType::Null),
            "RAMSCH" => Ok(GameType::Ramsch),
            "PASSED_IN" => Ok(GameType::PassedIn),
            _ => Err(serde::de::Error::custom(format!("Invalid game type: {s}"))),
        }
    }
}

// Card serde (compact 2-character format like "CJ", "ST")
impl Serialize for Card {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<Card>()
            .map_err(|e| serde::de::Error::custom(e.to_string()))
    }
}

// CardSlot serde: same string as on the wire ("CJ", "??", or the raw token)
impl Serialize for CardSlot {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for CardSlot {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(parse_slot(&s))
    }
}
