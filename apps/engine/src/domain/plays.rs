//! Play classification: the recognized combination shapes and the
//! comparison rule between plays.

use serde::{Deserialize, Serialize};

use crate::domain::pieces_types::{Piece, PieceColor, PieceKind};
use crate::errors::domain::{DomainError, ValidationKind};

/// Recognized combination shapes. Anything else is `Invalid`.
#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayKind {
    Single,
    Pair,
    ThreeOfAKind,
    Straight,
    FourOfAKind,
    ExtendedStraight,
    ExtendedStraightFive,
    FiveOfAKind,
    DoubleStraight,
    Invalid,
}

/// Classify a multiset of pieces into its play kind. Order of `pieces`
/// is irrelevant.
pub fn classify(pieces: &[Piece]) -> PlayKind {
    match pieces.len() {
        1 => PlayKind::Single,
        2 => {
            let (a, b) = (pieces[0], pieces[1]);
            if a.kind == b.kind && a.color == b.color {
                PlayKind::Pair
            } else {
                PlayKind::Invalid
            }
        }
        3 => {
            if is_soldier_group(pieces) {
                PlayKind::ThreeOfAKind
            } else if is_straight_group(pieces) {
                PlayKind::Straight
            } else {
                PlayKind::Invalid
            }
        }
        4 => {
            if is_soldier_group(pieces) {
                PlayKind::FourOfAKind
            } else if is_straight_group(pieces) {
                PlayKind::ExtendedStraight
            } else {
                PlayKind::Invalid
            }
        }
        5 => {
            if is_soldier_group(pieces) {
                PlayKind::FiveOfAKind
            } else if is_straight_group(pieces) {
                PlayKind::ExtendedStraightFive
            } else {
                PlayKind::Invalid
            }
        }
        6 => {
            if is_double_straight(pieces) {
                PlayKind::DoubleStraight
            } else {
                PlayKind::Invalid
            }
        }
        _ => PlayKind::Invalid,
    }
}

fn all_same_color(pieces: &[Piece]) -> Option<PieceColor> {
    let color = pieces.first()?.color;
    pieces.iter().all(|p| p.color == color).then_some(color)
}

/// Soldiers of one color.
fn is_soldier_group(pieces: &[Piece]) -> bool {
    all_same_color(pieces).is_some() && pieces.iter().all(|p| p.kind == PieceKind::Soldier)
}

/// Chariot/Horse/Cannon family of one color covering all three names.
/// With exactly three pieces this is the plain straight; with four or
/// five, one or two names are doubled.
fn is_straight_group(pieces: &[Piece]) -> bool {
    if all_same_color(pieces).is_none() {
        return false;
    }
    let mut counts = [0usize; 3];
    for p in pieces {
        match p.kind {
            PieceKind::Chariot => counts[0] += 1,
            PieceKind::Horse => counts[1] += 1,
            PieceKind::Cannon => counts[2] += 1,
            _ => return false,
        }
    }
    counts.iter().all(|&c| c >= 1)
}

/// Two chariots, two horses, two cannons, one color.
fn is_double_straight(pieces: &[Piece]) -> bool {
    if all_same_color(pieces).is_none() {
        return false;
    }
    let mut counts = [0usize; 3];
    for p in pieces {
        match p.kind {
            PieceKind::Chariot => counts[0] += 1,
            PieceKind::Horse => counts[1] += 1,
            PieceKind::Cannon => counts[2] += 1,
            _ => return false,
        }
    }
    counts == [2, 2, 2]
}

/// An immutable record of the pieces one player put down in a turn,
/// with its detected combination and point total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TurnPlayWire", into = "TurnPlayWire")]
pub struct TurnPlay {
    player: String,
    pieces: Vec<Piece>,
    kind: PlayKind,
    total_points: u16,
}

#[derive(Serialize, Deserialize)]
struct TurnPlayWire {
    player: String,
    pieces: Vec<Piece>,
}

impl TryFrom<TurnPlayWire> for TurnPlay {
    type Error = DomainError;

    fn try_from(wire: TurnPlayWire) -> Result<Self, Self::Error> {
        TurnPlay::new(wire.player, wire.pieces)
    }
}

impl From<TurnPlay> for TurnPlayWire {
    fn from(play: TurnPlay) -> Self {
        Self {
            player: play.player,
            pieces: play.pieces,
        }
    }
}

impl TurnPlay {
    /// Classification is derived here and never stored independently;
    /// a play with an unrecognized shape is constructed fine but carries
    /// `PlayKind::Invalid`.
    pub fn new(player: impl Into<String>, pieces: Vec<Piece>) -> Result<Self, DomainError> {
        let player = player.into();
        if player.is_empty() {
            return Err(DomainError::validation(
                ValidationKind::EmptyPlayerName,
                "Play requires a player name",
            ));
        }
        if pieces.is_empty() {
            return Err(DomainError::validation(
                ValidationKind::EmptyPlay,
                "Play requires at least one piece",
            ));
        }
        let kind = classify(&pieces);
        let total_points = pieces.iter().map(|p| p.points() as u16).sum();
        Ok(Self {
            player,
            pieces,
            kind,
            total_points,
        })
    }

    pub fn player(&self) -> &str {
        &self.player
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn piece_count(&self) -> usize {
        self.pieces.len()
    }

    pub fn kind(&self) -> PlayKind {
        self.kind
    }

    pub fn total_points(&self) -> u16 {
        self.total_points
    }

    pub fn is_valid(&self) -> bool {
        self.kind != PlayKind::Invalid
    }

    /// A play beats another only within the same valid kind, on higher
    /// point total. Different kinds never compare: both directions are
    /// false by design, not an error.
    pub fn beats(&self, other: &TurnPlay) -> bool {
        self.is_valid()
            && other.is_valid()
            && self.kind == other.kind
            && self.total_points > other.total_points
    }
}
