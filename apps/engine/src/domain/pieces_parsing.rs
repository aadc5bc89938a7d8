//! Piece parsing from string identifiers (e.g., "GENERAL_RED", "SOLDIER_BLACK").

use std::str::FromStr;

use super::pieces_types::{Piece, PieceColor, PieceKind};
use crate::errors::domain::DomainError;

impl FromStr for Piece {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((kind_str, color_str)) = s.rsplit_once('_') else {
            return Err(DomainError::InvalidPieceKind(s.to_string()));
        };
        let kind = parse_kind(kind_str).ok_or_else(|| DomainError::InvalidPieceKind(s.to_string()))?;
        let color =
            parse_color(color_str).ok_or_else(|| DomainError::InvalidPieceKind(s.to_string()))?;
        Ok(Piece::new(kind, color))
    }
}

impl Piece {
    /// Canonical token form, the inverse of `FromStr`.
    pub fn token(&self) -> String {
        format!("{}_{}", kind_token(self.kind), color_token(self.color))
    }
}

fn parse_kind(s: &str) -> Option<PieceKind> {
    match s {
        "GENERAL" => Some(PieceKind::General),
        "ADVISOR" => Some(PieceKind::Advisor),
        "ELEPHANT" => Some(PieceKind::Elephant),
        "CHARIOT" => Some(PieceKind::Chariot),
        "HORSE" => Some(PieceKind::Horse),
        "CANNON" => Some(PieceKind::Cannon),
        "SOLDIER" => Some(PieceKind::Soldier),
        _ => None,
    }
}

fn parse_color(s: &str) -> Option<PieceColor> {
    match s {
        "RED" => Some(PieceColor::Red),
        "BLACK" => Some(PieceColor::Black),
        _ => None,
    }
}

pub(crate) fn kind_token(kind: PieceKind) -> &'static str {
    match kind {
        PieceKind::General => "GENERAL",
        PieceKind::Advisor => "ADVISOR",
        PieceKind::Elephant => "ELEPHANT",
        PieceKind::Chariot => "CHARIOT",
        PieceKind::Horse => "HORSE",
        PieceKind::Cannon => "CANNON",
        PieceKind::Soldier => "SOLDIER",
    }
}

pub(crate) fn color_token(color: PieceColor) -> &'static str {
    match color {
        PieceColor::Red => "RED",
        PieceColor::Black => "BLACK",
    }
}

/// Reconstruct a piece from split stored fields (e.g., kind="HORSE",
/// color="RED"), as used by external snapshot consumers.
pub fn from_stored_format(kind_str: &str, color_str: &str) -> Result<Piece, DomainError> {
    let kind = parse_kind(kind_str)
        .ok_or_else(|| DomainError::InvalidPieceKind(format!("{kind_str}_{color_str}")))?;
    let color = parse_color(color_str)
        .ok_or_else(|| DomainError::InvalidPieceKind(format!("{kind_str}_{color_str}")))?;
    Ok(Piece::new(kind, color))
}

/// Non-panicking helper to parse piece tokens into Piece instances.
/// Fails on the first invalid token.
pub fn try_parse_pieces<I, S>(tokens: I) -> Result<Vec<Piece>, DomainError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens
        .into_iter()
        .map(|s| s.as_ref().parse::<Piece>())
        .collect()
}
