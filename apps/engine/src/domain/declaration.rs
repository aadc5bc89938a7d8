//! Declaration value objects: a player's pre-round pile bid and the
//! complete per-round set of bids.
//!
//! Both types validate at construction and are immutable afterwards.
//! Deserialization funnels through the same constructors, so an invalid
//! declaration can never exist in memory.

use serde::{Deserialize, Serialize};

use crate::domain::rules::{valid_declaration_range, FORBIDDEN_DECLARATION_TOTAL};
use crate::errors::domain::{DomainError, ValidationKind};

/// A single player's declared pile count for the round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DeclarationWire", into = "DeclarationWire")]
pub struct Declaration {
    player: String,
    pile_count: u8,
    is_forced: bool,
}

#[derive(Serialize, Deserialize)]
struct DeclarationWire {
    player: String,
    pile_count: u8,
    #[serde(default)]
    is_forced: bool,
}

impl TryFrom<DeclarationWire> for Declaration {
    type Error = DomainError;

    fn try_from(wire: DeclarationWire) -> Result<Self, Self::Error> {
        Declaration::with_forced(wire.player, wire.pile_count, wire.is_forced)
    }
}

impl From<Declaration> for DeclarationWire {
    fn from(d: Declaration) -> Self {
        Self {
            player: d.player,
            pile_count: d.pile_count,
            is_forced: d.is_forced,
        }
    }
}

impl Declaration {
    pub fn new(player: impl Into<String>, pile_count: u8) -> Result<Self, DomainError> {
        Self::with_forced(player, pile_count, false)
    }

    pub fn with_forced(
        player: impl Into<String>,
        pile_count: u8,
        is_forced: bool,
    ) -> Result<Self, DomainError> {
        let player = player.into();
        if player.is_empty() {
            return Err(DomainError::validation(
                ValidationKind::EmptyPlayerName,
                "Declaration requires a player name",
            ));
        }
        if !valid_declaration_range().contains(&pile_count) {
            return Err(DomainError::validation(
                ValidationKind::PileCountOutOfRange,
                format!("Pile count must be in {:?}, got {pile_count}", valid_declaration_range()),
            ));
        }
        Ok(Self {
            player,
            pile_count,
            is_forced,
        })
    }

    pub fn player(&self) -> &str {
        &self.player
    }

    pub fn pile_count(&self) -> u8 {
        self.pile_count
    }

    pub fn is_forced(&self) -> bool {
        self.is_forced
    }

    /// Whether the actual captured pile count met the declaration.
    pub fn matches_actual(&self, actual: u8) -> bool {
        self.pile_count == actual
    }

    /// Signed difference `actual - declared`. Positive means over-captured.
    pub fn difference(&self, actual: u8) -> i16 {
        actual as i16 - self.pile_count as i16
    }
}

/// One declaration per player in the round, in declaration order.
///
/// Invariants: non-empty, no duplicate player names, and the pile counts
/// never total exactly [`FORBIDDEN_DECLARATION_TOTAL`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Declaration>", into = "Vec<Declaration>")]
pub struct DeclarationSet {
    declarations: Vec<Declaration>,
}

impl TryFrom<Vec<Declaration>> for DeclarationSet {
    type Error = DomainError;

    fn try_from(declarations: Vec<Declaration>) -> Result<Self, Self::Error> {
        DeclarationSet::new(declarations)
    }
}

impl From<DeclarationSet> for Vec<Declaration> {
    fn from(set: DeclarationSet) -> Self {
        set.declarations
    }
}

impl DeclarationSet {
    pub fn new(declarations: Vec<Declaration>) -> Result<Self, DomainError> {
        if declarations.is_empty() {
            return Err(DomainError::validation(
                ValidationKind::EmptyDeclarationSet,
                "Declaration set must not be empty",
            ));
        }
        for (i, d) in declarations.iter().enumerate() {
            if declarations[..i].iter().any(|e| e.player() == d.player()) {
                return Err(DomainError::validation(
                    ValidationKind::DuplicatePlayer,
                    format!("Duplicate declaration for player {}", d.player()),
                ));
            }
        }
        let total: u16 = declarations
            .iter()
            .map(|d| u16::from(d.pile_count()))
            .sum();
        if total == u16::from(FORBIDDEN_DECLARATION_TOTAL) {
            return Err(DomainError::validation(
                ValidationKind::ForbiddenDeclarationTotal,
                format!("Declarations may not total exactly {FORBIDDEN_DECLARATION_TOTAL}"),
            ));
        }
        Ok(Self { declarations })
    }

    pub fn total(&self) -> u16 {
        self.declarations
            .iter()
            .map(|d| u16::from(d.pile_count()))
            .sum()
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Declarations in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations.iter()
    }

    pub fn get(&self, player: &str) -> Option<&Declaration> {
        self.declarations.iter().find(|d| d.player() == player)
    }

    pub fn declared_for(&self, player: &str) -> Option<u8> {
        self.get(player).map(Declaration::pile_count)
    }
}
