use super::rank::Rank;
use super::suit::Suit;

/// A single playing card.
///
/// Isomorphic to `u8` (`rank * 4 + suit`) and to a one-hot `u64` bit, which
/// lets [`crate::Hand`] store unordered card sets as plain integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

impl Card {
    pub fn rank(&self) -> Rank {
        self.rank
    }
    pub fn suit(&self) -> Suit {
        self.suit
    }
}

impl From<(Rank, Suit)> for Card {
    fn from((rank, suit): (Rank, Suit)) -> Self {
        Self { rank, suit }
    }
}

// u8 isomorphism
impl From<Card> for u8 {
    fn from(c: Card) -> u8 {
        (c.rank as u8) * 4 + (c.suit as u8)
    }
}
impl From<u8> for Card {
    fn from(n: u8) -> Self {
        debug_assert!(n < 52);
        Self {
            rank: Rank::from(n / 4),
            suit: Suit::from(n % 4),
        }
    }
}

// u64 isomorphism
impl From<Card> for u64 {
    fn from(c: Card) -> u64 {
        1 << u8::from(c)
    }
}
impl From<u64> for Card {
    fn from(n: u64) -> Self {
        debug_assert!(n.count_ones() == 1);
        Self::from(n.trailing_zeros() as u8)
    }
}

impl TryFrom<&str> for Card {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let mut chars = s.chars();
        let rank = chars.next().ok_or_else(|| anyhow::anyhow!("empty card"))?;
        let suit = chars
            .next()
            .ok_or_else(|| anyhow::anyhow!("card missing suit: {}", s))?;
        if chars.next().is_some() {
            return Err(anyhow::anyhow!("malformed card: {}", s));
        }
        Ok(Self {
            rank: Rank::try_from(rank)?,
            suit: Suit::try_from(suit)?,
        })
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn u8_roundtrip() {
        for n in 0..52u8 {
            assert_eq!(n, u8::from(Card::from(n)));
        }
    }
    #[test]
    fn str_roundtrip() {
        for s in ["As", "Td", "2c", "Kh"] {
            assert_eq!(s, Card::try_from(s).unwrap().to_string());
        }
    }
    #[test]
    fn rejects_garbage() {
        assert!(Card::try_from("Zs").is_err());
        assert!(Card::try_from("A").is_err());
        assert!(Card::try_from("Asx").is_err());
    }
}
