//! Serialization and deserialization for piece types.
//!
//! Pieces serialize as their canonical token ("HORSE_RED") so snapshots and
//! events stay readable and stable for external consumers.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::pieces_parsing::{color_token, kind_token};
use super::pieces_types::{Piece, PieceColor, PieceKind};

impl Serialize for Piece {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.token())
    }
}

impl<'de> Deserialize<'de> for Piece {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<Piece>()
            .map_err(|_| serde::de::Error::custom(format!("Invalid piece: {s}")))
    }
}

impl Serialize for PieceColor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(color_token(*self))
    }
}

impl<'de> Deserialize<'de> for PieceColor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "RED" => Ok(PieceColor::Red),
            "BLACK" => Ok(PieceColor::Black),
            _ => Err(serde::de::Error::custom(format!("Invalid color: {s}"))),
        }
    }
}

impl Serialize for PieceKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(kind_token(*self))
    }
}

impl<'de> Deserialize<'de> for PieceKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "GENERAL" => Ok(PieceKind::General),
            "ADVISOR" => Ok(PieceKind::Advisor),
            "ELEPHANT" => Ok(PieceKind::Elephant),
            "CHARIOT" => Ok(PieceKind::Chariot),
            "HORSE" => Ok(PieceKind::Horse),
            "CANNON" => Ok(PieceKind::Cannon),
            "SOLDIER" => Ok(PieceKind::Soldier),
            _ => Err(serde::de::Error::custom(format!("Invalid kind: {s}"))),
        }
    }
}
