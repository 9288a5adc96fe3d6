use super::card::Card;
use super::hand::Hand;

/// A player's two private hole cards, kept in the order they were dealt.
///
/// Deal order matters to the table (logs, reveals, and the cards-dealt push
/// show it), so this is a pair rather than a card set; evaluation converts
/// to a [`Hand`] when the cards meet the board.
#[derive(Debug, Clone, Copy)]
pub struct Hole(Card, Card);

impl Hole {
    pub fn cards(&self) -> [Card; 2] {
        [self.0, self.1]
    }
}

impl From<(Card, Card)> for Hole {
    fn from((first, second): (Card, Card)) -> Self {
        debug_assert!(first != second);
        Self(first, second)
    }
}

impl From<Hole> for Hand {
    fn from(hole: Hole) -> Self {
        Hand::add(Hand::from(hole.0), Hand::from(hole.1))
    }
}

impl std::fmt::Display for Hole {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} {}", self.0, self.1)
    }
}
