use super::card::Card;
use rand::seq::SliceRandom;

/// An ordered 52-card sequence that shrinks as cards leave it.
///
/// Cards come off the top; a reset rebuilds the canonical full deck, and a
/// uniform Fisher–Yates shuffle randomizes it before each hand.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn new() -> Self {
        Self {
            cards: (0..52u8).map(Card::from).collect(),
        }
    }
    /// Rebuilds the full 52 cards in canonical order.
    pub fn reset(&mut self) {
        self.cards.clear();
        self.cards.extend((0..52u8).map(Card::from));
    }
    /// Uniform in-place shuffle.
    pub fn shuffle(&mut self) {
        self.cards.shuffle(&mut rand::rng());
    }
    /// Deals n cards off the top.
    pub fn deal(&mut self, n: usize) -> anyhow::Result<Vec<Card>> {
        if self.cards.len() < n {
            return Err(anyhow::anyhow!(
                "deck exhausted: {} requested, {} remain",
                n,
                self.cards.len()
            ));
        }
        Ok(self.cards.split_off(self.cards.len() - n))
    }
    /// Discards one card off the top with no observable output.
    pub fn burn(&mut self) -> anyhow::Result<()> {
        self.cards
            .pop()
            .map(|_| ())
            .ok_or_else(|| anyhow::anyhow!("deck exhausted on burn"))
    }
    pub fn remaining(&self) -> usize {
        self.cards.len()
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn fresh_deck_is_distinct() {
        let mut deck = Deck::new();
        let cards = deck.deal(52).unwrap();
        let unique: HashSet<u8> = cards.iter().map(|c| u8::from(*c)).collect();
        assert_eq!(unique.len(), 52);
    }
    #[test]
    fn deal_shrinks() {
        let mut deck = Deck::new();
        deck.shuffle();
        let _ = deck.deal(2).unwrap();
        deck.burn().unwrap();
        assert_eq!(deck.remaining(), 49);
    }
    #[test]
    fn overdeal_fails() {
        let mut deck = Deck::new();
        let _ = deck.deal(50).unwrap();
        assert!(deck.deal(3).is_err());
        let _ = deck.deal(2).unwrap();
        assert!(deck.burn().is_err());
    }
    #[test]
    fn reset_restores() {
        let mut deck = Deck::new();
        let _ = deck.deal(30).unwrap();
        deck.reset();
        assert_eq!(deck.remaining(), 52);
    }
    #[test]
    fn shuffle_keeps_the_same_cards() {
        let mut deck = Deck::new();
        deck.shuffle();
        let cards: HashSet<u8> = deck.deal(52).unwrap().iter().map(|c| u8::from(*c)).collect();
        assert_eq!(cards.len(), 52);
    }
}
