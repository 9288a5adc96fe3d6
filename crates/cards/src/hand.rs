use super::card::Card;

/// An unordered set of cards as a 52-bit string in a `u64`.
///
/// Bit `rank * 4 + suit` is set when that card is present. Set algebra on
/// hands is integer arithmetic, which is what makes the evaluator's rank and
/// suit masks cheap.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Hand(u64);

impl Hand {
    pub const fn empty() -> Self {
        Self(0)
    }
    pub fn size(&self) -> usize {
        self.0.count_ones() as usize
    }
    pub fn contains(&self, card: &Card) -> bool {
        self.0 & u64::from(*card) != 0
    }
    pub fn insert(&mut self, card: Card) {
        self.0 |= u64::from(card);
    }
    pub fn remove(&mut self, card: Card) {
        self.0 &= !u64::from(card);
    }
    /// Union of two hands.
    pub fn add(a: Self, b: Self) -> Self {
        Self(a.0 | b.0)
    }
}

// u64 isomorphism
impl From<u64> for Hand {
    fn from(n: u64) -> Self {
        Self(n)
    }
}
impl From<Hand> for u64 {
    fn from(hand: Hand) -> Self {
        hand.0
    }
}

impl From<Card> for Hand {
    fn from(card: Card) -> Self {
        Self(u64::from(card))
    }
}

/// We OR the cards to get the bitstring.
impl From<Vec<Card>> for Hand {
    fn from(cards: Vec<Card>) -> Self {
        cards.into_iter().map(Hand::from).fold(Hand::empty(), Hand::add)
    }
}
/// We pluck the 1s out of the bitstring, highest card first.
impl From<Hand> for Vec<Card> {
    fn from(hand: Hand) -> Self {
        let mut value = hand.0;
        let mut cards = Vec::with_capacity(hand.size());
        while value != 0 {
            let bit = 1u64 << (63 - value.leading_zeros());
            cards.push(Card::from(bit));
            value &= !bit;
        }
        cards
    }
}

impl TryFrom<&str> for Hand {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.split_whitespace()
            .map(Card::try_from)
            .try_fold(Hand::empty(), |hand, card| Ok(Hand::add(hand, Hand::from(card?))))
    }
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let cards = Vec::<Card>::from(*self)
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        write!(f, "{}", cards)
    }
}
