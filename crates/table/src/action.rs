use crate::error::TableError;
use crd_core::Chips;

/// A client betting decision, validated at the boundary.
///
/// Call amounts are computed by the table, so only a raise carries a number:
/// the total this street is being raised *to*.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Fold,
    Check,
    Call,
    RaiseTo(Chips),
}

/// Parses the wire pair of action tag and optional amount.
impl TryFrom<(&str, Option<Chips>)> for Action {
    type Error = TableError;
    fn try_from((verb, amount): (&str, Option<Chips>)) -> Result<Self, Self::Error> {
        match (verb.to_ascii_lowercase().as_str(), amount) {
            ("fold", None) => Ok(Self::Fold),
            ("check", None) => Ok(Self::Check),
            ("call", None) => Ok(Self::Call),
            ("raise", Some(to)) => Ok(Self::RaiseTo(to)),
            _ => Err(TableError::UnknownAction(verb.to_string())),
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fold => write!(f, "fold"),
            Self::Check => write!(f, "check"),
            Self::Call => write!(f, "call"),
            Self::RaiseTo(n) => write!(f, "raise {}", n),
        }
    }
}

/// What a seat last did, as recorded in logs, views, and pushes.
///
/// Blind posts are marked distinctly because they do not count as having
/// acted when deciding whether a betting round is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deed {
    SmallBlind(Chips),
    BigBlind(Chips),
    Folded,
    Checked,
    Called(Chips),
    RaisedTo(Chips),
    AllIn(Chips),
    TimedOut,
}

impl Deed {
    pub fn is_blind(&self) -> bool {
        matches!(self, Self::SmallBlind(_) | Self::BigBlind(_))
    }
    /// Stable machine-readable tag carried on the wire.
    pub fn label(&self) -> &'static str {
        match self {
            Self::SmallBlind(_) => "small_blind",
            Self::BigBlind(_) => "big_blind",
            Self::Folded => "fold",
            Self::Checked => "check",
            Self::Called(_) => "call",
            Self::RaisedTo(_) => "raise",
            Self::AllIn(_) => "all_in",
            Self::TimedOut => "timeout_fold",
        }
    }
    pub fn amount(&self) -> Option<Chips> {
        match self {
            Self::SmallBlind(n)
            | Self::BigBlind(n)
            | Self::Called(n)
            | Self::RaisedTo(n)
            | Self::AllIn(n) => Some(*n),
            _ => None,
        }
    }
}

impl std::fmt::Display for Deed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SmallBlind(n) => write!(f, "posts small blind {}", n),
            Self::BigBlind(n) => write!(f, "posts big blind {}", n),
            Self::Folded => write!(f, "folds"),
            Self::Checked => write!(f, "checks"),
            Self::Called(n) => write!(f, "calls {}", n),
            Self::RaisedTo(n) => write!(f, "raises to {}", n),
            Self::AllIn(n) => write!(f, "is all-in for {}", n),
            Self::TimedOut => write!(f, "folds (timed out)"),
        }
    }
}
