use super::card::Card;
use super::hand::Hand;
use super::kicks::Kickers;
use super::rank::Rank;
use super::ranking::Ranking;
use super::suit::Suit;

/// Best-five search over a 5–7 card [`Hand`].
///
/// Works on the compact bit representation: rank masks answer straight and
/// n-of-a-kind questions, per-suit masks answer flush questions. The category
/// probes run strongest first, so the first hit is the best five-card subset
/// without enumerating combinations. With at most seven cards a flush rules
/// out quads and full houses (the off-suit cards cannot form them), which is
/// what makes probing flushes first sound.
pub struct Evaluator(Hand);

impl From<Hand> for Evaluator {
    fn from(h: Hand) -> Self {
        debug_assert!((5..=7).contains(&h.size()));
        Self(h)
    }
}

impl Evaluator {
    pub fn find_ranking(&self) -> Ranking {
        None.or_else(|| self.find_flush())
            .or_else(|| self.find_4_oak())
            .or_else(|| self.find_3_oak_2_oak())
            .or_else(|| self.find_straight())
            .or_else(|| self.find_3_oak())
            .or_else(|| self.find_2_oak_2_oak())
            .or_else(|| self.find_1_oak())
            .expect("at least one card in hand")
    }
    pub fn find_kickers(&self, ranking: Ranking) -> Kickers {
        let n = ranking.n_kickers();
        if n == 0 {
            return Kickers::default();
        }
        let held = match ranking {
            Ranking::Flush(hi) => {
                let suit = self.find_suit_of_flush().expect("flush has a suit");
                self.suit_masks()[suit as usize] & !u16::from(hi)
            }
            Ranking::TwoPair(hi, lo) => self.rank_masks() & !(u16::from(hi) | u16::from(lo)),
            Ranking::HighCard(hi)
            | Ranking::OnePair(hi)
            | Ranking::ThreeOAK(hi)
            | Ranking::FourOAK(hi) => self.rank_masks() & !u16::from(hi),
            _ => unreachable!(),
        };
        let mut bits = held;
        while bits.count_ones() as usize > n {
            bits &= !(1 << bits.trailing_zeros());
        }
        Kickers::from(bits)
    }

    //

    fn find_1_oak(&self) -> Option<Ranking> {
        self.find_rank_of_n_oak(1).map(Ranking::HighCard)
    }
    fn find_3_oak(&self) -> Option<Ranking> {
        self.find_rank_of_n_oak(3).map(Ranking::ThreeOAK)
    }
    fn find_4_oak(&self) -> Option<Ranking> {
        self.find_rank_of_n_oak(4).map(Ranking::FourOAK)
    }
    fn find_2_oak_2_oak(&self) -> Option<Ranking> {
        self.find_rank_of_n_oak(2).map(|hi| {
            self.find_rank_of_n_oak_below(2, Some(hi))
                .map(|lo| Ranking::TwoPair(hi, lo))
                .unwrap_or(Ranking::OnePair(hi))
        })
    }
    fn find_3_oak_2_oak(&self) -> Option<Ranking> {
        // the pairing rank may sit above the trips rank, so scan every other rank
        self.find_rank_of_n_oak(3).and_then(|trips| {
            self.find_rank_of_pair_excluding(trips)
                .map(|pair| Ranking::FullHouse(trips, pair))
        })
    }
    fn find_straight(&self) -> Option<Ranking> {
        self.find_rank_of_straight(self.rank_masks())
            .map(Ranking::Straight)
    }
    fn find_flush(&self) -> Option<Ranking> {
        self.find_suit_of_flush().map(|suit| {
            self.find_rank_of_straight(self.suit_masks()[suit as usize])
                .map(Ranking::StraightFlush)
                .unwrap_or_else(|| Ranking::Flush(Rank::from(self.suit_masks()[suit as usize])))
        })
    }

    //

    fn find_rank_of_straight(&self, ranks: u16) -> Option<Rank> {
        const WHEEL: u16 = 0b_1000000001111;
        let mut bits = ranks;
        bits &= bits << 1;
        bits &= bits << 1;
        bits &= bits << 1;
        bits &= bits << 1;
        if bits > 0 {
            Some(Rank::from(bits))
        } else if WHEEL == (WHEEL & ranks) {
            Some(Rank::Five)
        } else {
            None
        }
    }
    fn find_suit_of_flush(&self) -> Option<Suit> {
        self.suit_count()
            .iter()
            .position(|&n| n >= 5)
            .map(|i| Suit::from(i as u8))
    }
    fn find_rank_of_n_oak(&self, n: usize) -> Option<Rank> {
        self.find_rank_of_n_oak_below(n, None)
    }
    /// Highest rank strictly below `below` (or any rank) held at least n times.
    fn find_rank_of_n_oak_below(&self, oak: usize, below: Option<Rank>) -> Option<Rank> {
        let ceiling = below.map(u8::from).unwrap_or(13) as u64;
        let cards = u64::from(self.0) & ((1u64 << (4 * ceiling)) - 1);
        let mut nibble = 0b_1111_u64 << (4 * ceiling) >> 4;
        while nibble > 0 {
            if oak <= (cards & nibble).count_ones() as usize {
                return Some(Rank::from((nibble.trailing_zeros() / 4) as u8));
            }
            nibble >>= 4;
        }
        None
    }
    /// Highest rank other than `skip` held at least twice.
    fn find_rank_of_pair_excluding(&self, skip: Rank) -> Option<Rank> {
        let cards = u64::from(self.0) & !(0b_1111_u64 << (4 * u8::from(skip) as u64));
        let mut nibble = 0b_1111_u64 << 48;
        while nibble > 0 {
            if 2 <= (cards & nibble).count_ones() as usize {
                return Some(Rank::from((nibble.trailing_zeros() / 4) as u8));
            }
            nibble >>= 4;
        }
        None
    }

    //

    /// Which ranks are in the hand, neglecting suit.
    fn rank_masks(&self) -> u16 {
        Vec::<Card>::from(self.0)
            .iter()
            .map(|c| u16::from(c.rank()))
            .fold(0, |acc, r| acc | r)
    }
    /// How many cards of each suit are in the hand, neglecting rank.
    fn suit_count(&self) -> [u8; 4] {
        Vec::<Card>::from(self.0)
            .iter()
            .map(|c| u8::from(c.suit()))
            .fold([0; 4], |mut counts, s| {
                counts[s as usize] += 1;
                counts
            })
    }
    /// Which ranks are in the hand, grouped by suit.
    fn suit_masks(&self) -> [u16; 4] {
        Vec::<Card>::from(self.0)
            .iter()
            .map(|c| (u8::from(c.suit()), u16::from(c.rank())))
            .fold([0; 4], |mut suits, (s, r)| {
                suits[s as usize] |= r;
                suits
            })
    }
}
