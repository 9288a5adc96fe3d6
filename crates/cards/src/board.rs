use super::card::Card;
use super::hand::Hand;
use super::street::Street;

/// The community cards in deal order.
///
/// Holds 0, 3, 4, or 5 cards between hands; the current street is derived
/// from the count.
#[derive(Debug, Clone, Default)]
pub struct Board {
    cards: Vec<Card>,
}

impl Board {
    pub fn clear(&mut self) {
        self.cards.clear();
    }
    pub fn push(&mut self, card: Card) {
        debug_assert!(self.cards.len() < 5);
        self.cards.push(card);
    }
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
    pub fn len(&self) -> usize {
        self.cards.len()
    }
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
    pub fn street(&self) -> Street {
        match self.cards.len() {
            0 => Street::Pref,
            3 => Street::Flop,
            4 => Street::Turn,
            5 => Street::Rive,
            n => panic!("impossible board size {}", n),
        }
    }
    pub fn hand(&self) -> Hand {
        Hand::from(self.cards.clone())
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let cards = self
            .cards
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        write!(f, "{}", cards)
    }
}
