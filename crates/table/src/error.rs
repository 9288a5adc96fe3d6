use crd_core::Chips;

/// Why a raise or check was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    CannotCheck,
    NothingToCall,
    RaiseTooSmall,
    NotReopened,
    InsufficientChips,
}

impl std::fmt::Display for Reason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CannotCheck => write!(f, "cannot check with a bet to call"),
            Self::NothingToCall => write!(f, "nothing to call"),
            Self::RaiseTooSmall => write!(f, "raise below the minimum"),
            Self::NotReopened => write!(f, "action has not been reopened; call or fold"),
            Self::InsufficientChips => write!(f, "insufficient chips"),
        }
    }
}

/// Every failure the table surfaces to callers.
///
/// Validation, routing, and state errors are recovered locally and leave the
/// table untouched; resource errors mean a broken hand that gets aborted and
/// refunded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    InvalidName,
    InvalidBuyIn(Chips),
    ExceedsMaxBuyIn(Chips),
    UnknownAction(String),
    UnknownPlayer,
    UnknownTable,
    TableFull,
    DuplicateName,
    NoActiveHand,
    NotYourTurn,
    IllegalAction(Reason),
    IllegalState(&'static str),
    DeckExhausted,
    PotMismatch { banked: Chips, committed: Chips },
}

impl TableError {
    /// Stable machine-readable tag carried on the wire.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidName => "invalid_name",
            Self::InvalidBuyIn(_) => "invalid_buy_in",
            Self::ExceedsMaxBuyIn(_) => "exceeds_max_buy_in",
            Self::UnknownAction(_) => "unknown_action",
            Self::UnknownPlayer => "unknown_player",
            Self::UnknownTable => "unknown_table",
            Self::TableFull => "table_full",
            Self::DuplicateName => "duplicate_name",
            Self::NoActiveHand => "no_active_hand",
            Self::NotYourTurn => "not_your_turn",
            Self::IllegalAction(_) => "illegal_action",
            Self::IllegalState(_) => "illegal_state",
            Self::DeckExhausted => "deck_exhausted",
            Self::PotMismatch { .. } => "pot_mismatch",
        }
    }
    /// Which family of the error taxonomy this belongs to.
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidName
            | Self::InvalidBuyIn(_)
            | Self::ExceedsMaxBuyIn(_)
            | Self::UnknownAction(_) => "validation",
            Self::UnknownPlayer | Self::UnknownTable | Self::TableFull | Self::DuplicateName => {
                "routing"
            }
            Self::NoActiveHand
            | Self::NotYourTurn
            | Self::IllegalAction(_)
            | Self::IllegalState(_) => "state",
            Self::DeckExhausted | Self::PotMismatch { .. } => "resource",
        }
    }
}

impl std::fmt::Display for TableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName => write!(f, "player name is empty or too long"),
            Self::InvalidBuyIn(n) => write!(f, "buy-in {} outside the allowed range", n),
            Self::ExceedsMaxBuyIn(n) => write!(f, "rebuy of {} would exceed the maximum buy-in", n),
            Self::UnknownAction(s) => write!(f, "unknown action: {}", s),
            Self::UnknownPlayer => write!(f, "no such player"),
            Self::UnknownTable => write!(f, "no such table"),
            Self::TableFull => write!(f, "table is full"),
            Self::DuplicateName => write!(f, "name already taken at this table"),
            Self::NoActiveHand => write!(f, "no hand in progress"),
            Self::NotYourTurn => write!(f, "not your turn"),
            Self::IllegalAction(reason) => write!(f, "illegal action: {}", reason),
            Self::IllegalState(what) => write!(f, "illegal state transition: {}", what),
            Self::DeckExhausted => write!(f, "deck exhausted"),
            Self::PotMismatch { banked, committed } => {
                write!(f, "pot mismatch: {} banked vs {} committed", banked, committed)
            }
        }
    }
}

impl std::error::Error for TableError {}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn kinds_are_stable() {
        assert_eq!(TableError::NotYourTurn.kind(), "not_your_turn");
        assert_eq!(TableError::IllegalAction(Reason::RaiseTooSmall).kind(), "illegal_action");
    }
    #[test]
    fn categories_partition_the_taxonomy() {
        assert_eq!(TableError::InvalidName.category(), "validation");
        assert_eq!(TableError::TableFull.category(), "routing");
        assert_eq!(TableError::NoActiveHand.category(), "state");
        assert_eq!(TableError::DeckExhausted.category(), "resource");
    }
}
