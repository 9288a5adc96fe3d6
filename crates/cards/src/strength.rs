use super::evaluator::Evaluator;
use super::hand::Hand;
use super::kicks::Kickers;
use super::ranking::Ranking;

/// A hand's totally ordered showdown strength.
///
/// Built from an unordered 5–7 card [`Hand`]; the derived ordering compares
/// category first, defining ranks second, kickers last, so
/// `a > b` exactly when hand a beats hand b and equality is a chop.
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord)]
pub struct Strength {
    ranking: Ranking,
    kicks: Kickers,
}

impl Strength {
    pub fn ranking(&self) -> Ranking {
        self.ranking
    }
    pub fn kicks(&self) -> Kickers {
        self.kicks
    }
}

impl From<Hand> for Strength {
    fn from(hand: Hand) -> Self {
        Self::from(Evaluator::from(hand))
    }
}

impl From<Evaluator> for Strength {
    fn from(e: Evaluator) -> Self {
        let ranking = e.find_ranking();
        let kicks = e.find_kickers(ranking);
        Self::from((ranking, kicks))
    }
}

impl From<(Ranking, Kickers)> for Strength {
    fn from((ranking, kicks): (Ranking, Kickers)) -> Self {
        Self { ranking, kicks }
    }
}

impl std::fmt::Display for Strength {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} {}", self.ranking, self.kicks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strength(s: &str) -> Strength {
        Strength::from(Hand::try_from(s).unwrap())
    }

    #[test]
    fn kickers_break_pair_ties() {
        let better = strength("As Ah Kd Qc Js");
        let worse = strength("Ac Ad Kh Qs Ts");
        assert!(better > worse);
    }
    #[test]
    fn identical_hands_chop() {
        let a = strength("As Ah Kd Qc Js");
        let b = strength("Ac Ad Ks Qh Jd");
        assert_eq!(a, b);
    }
    #[test]
    fn wheel_loses_to_six_high() {
        let wheel = strength("As 2h 3d 4c 5s");
        let six = strength("2s 3h 4d 5c 6s");
        assert!(wheel < six);
        assert!(wheel > strength("As Ah Kd Qc Js"));
    }
    #[test]
    fn flush_ranks_decide_between_flushes() {
        let better = strength("As Ks 9s 7s 3s");
        let worse = strength("Ah Kh 9h 6h 5h");
        assert!(better > worse);
    }
    #[test]
    fn permutation_invariant() {
        let a = strength("As Kh Qd Jc 9s 4h 2d");
        let b = strength("2d 4h 9s Jc Qd Kh As");
        assert_eq!(a, b);
    }
    #[test]
    fn seven_card_equals_best_five() {
        // best five of seven, checked against every 5-subset evaluated directly
        let cards =
            Vec::<crate::Card>::from(Hand::try_from("As Ah Kd Kc Qs Jh 9d").unwrap());
        let full = Strength::from(Hand::from(cards.clone()));
        let best = subsets(&cards, 5)
            .into_iter()
            .map(|five| Strength::from(Hand::from(five)))
            .max()
            .unwrap();
        assert_eq!(full, best);
    }
    #[test]
    fn irrelevant_card_never_weakens() {
        let six = strength("As Ah Kd Kc Qs Jh");
        let seven = strength("As Ah Kd Kc Qs Jh 2d");
        assert!(seven >= six);
    }

    fn subsets<T: Clone>(items: &[T], k: usize) -> Vec<Vec<T>> {
        if k == 0 {
            return vec![vec![]];
        }
        if items.len() < k {
            return vec![];
        }
        let mut out = Vec::new();
        for (i, item) in items.iter().enumerate() {
            for mut rest in subsets(&items[i + 1..], k - 1) {
                rest.insert(0, item.clone());
                out.push(rest);
            }
        }
        out
    }
}
