use crate::pot::Pot;
use crd_cards::Strength;
use crd_core::Chips;
use crd_core::Position;
use serde::Serialize;
use std::collections::BTreeMap;

/// Chips awarded to one seat from one pot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Payout {
    pub seat: Position,
    pub amount: Chips,
}

/// How a single pot was decided.
#[derive(Debug, Clone, Serialize)]
pub struct PotResult {
    pub label: String,
    pub amount: Chips,
    pub winners: Vec<Payout>,
}

/// Settles every pot against the contenders' hand strengths.
///
/// Pots are decided lowest cap first. Each pot goes to the eligible seats
/// holding the maximum strength; equal keys chop the pot with the floor
/// share each, and the remainder chips go to the winner with the smallest
/// clockwise distance from the button.
pub fn distribute(
    pots: &[Pot],
    strengths: &BTreeMap<Position, Strength>,
    button: Position,
    n_seats: usize,
) -> Vec<PotResult> {
    pots.iter()
        .map(|pot| {
            let best = pot
                .eligible
                .iter()
                .filter_map(|p| strengths.get(p))
                .max()
                .copied();
            let mut winners: Vec<Position> = pot
                .eligible
                .iter()
                .copied()
                .filter(|p| strengths.get(p) == best.as_ref())
                .collect();
            if winners.is_empty() {
                debug_assert!(false, "pot with no live contenders");
                return PotResult {
                    label: pot.label.clone(),
                    amount: pot.amount,
                    winners: Vec::<Payout>::new(),
                };
            }
            winners.sort_by_key(|&w| (w + n_seats - button) % n_seats);
            let share = pot.amount / winners.len() as Chips;
            let bonus = pot.amount % winners.len() as Chips;
            let mut payouts: Vec<Payout> = winners
                .iter()
                .map(|&seat| Payout { seat, amount: share })
                .collect();
            payouts[0].amount += bonus;
            payouts.sort_by_key(|p| p.seat);
            PotResult {
                label: pot.label.clone(),
                amount: pot.amount,
                winners: payouts,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crd_cards::Hand;
    use crd_core::MAX_SEATS;

    fn strength(s: &str) -> Strength {
        Strength::from(Hand::try_from(s).unwrap())
    }

    fn pot(label: &str, amount: Chips, eligible: &[Position]) -> Pot {
        Pot {
            label: label.into(),
            amount,
            cap: 0,
            eligible: eligible.to_vec(),
        }
    }

    #[test]
    fn best_hand_takes_the_pot() {
        let mut strengths = BTreeMap::new();
        strengths.insert(0, strength("As Ah Kd Qc Js"));
        strengths.insert(1, strength("Ks Kh Qd Jc 9s"));
        let results = distribute(&[pot("Main Pot", 100, &[0, 1])], &strengths, 0, MAX_SEATS);
        assert_eq!(results[0].winners, vec![Payout { seat: 0, amount: 100 }]);
    }

    #[test]
    fn odd_chip_goes_clockwise_from_button() {
        // seats 3 and 6 chop a 7-chip pot with the button at 1
        let tie = strength("As Ah Kd Qc Js");
        let mut strengths = BTreeMap::new();
        strengths.insert(3, tie);
        strengths.insert(6, tie);
        let results = distribute(&[pot("Main Pot", 7, &[3, 6])], &strengths, 1, MAX_SEATS);
        assert_eq!(
            results[0].winners,
            vec![
                Payout { seat: 3, amount: 4 },
                Payout { seat: 6, amount: 3 },
            ]
        );
    }

    #[test]
    fn odd_chip_wraps_around_the_table() {
        let tie = strength("As Ah Kd Qc Js");
        let mut strengths = BTreeMap::new();
        strengths.insert(1, tie);
        strengths.insert(8, tie);
        let results = distribute(&[pot("Main Pot", 9, &[1, 8])], &strengths, 7, MAX_SEATS);
        // distance from button 7: seat 8 is 1 away, seat 1 is 3 away
        assert_eq!(
            results[0].winners,
            vec![
                Payout { seat: 1, amount: 4 },
                Payout { seat: 8, amount: 5 },
            ]
        );
    }

    #[test]
    fn side_pots_decide_independently() {
        // short stack holds the nuts, middle stack beats the big stack
        let mut strengths = BTreeMap::new();
        strengths.insert(0, strength("As Ks Qs Js Ts"));
        strengths.insert(1, strength("Ah Ad Kh Qd Jh"));
        strengths.insert(2, strength("Kc Kd Qc Jc 9d"));
        let pots = vec![
            pot("Main Pot", 150, &[0, 1, 2]),
            pot("Side Pot 1", 100, &[1, 2]),
            pot("Side Pot 2", 100, &[2]),
        ];
        let results = distribute(&pots, &strengths, 0, MAX_SEATS);
        assert_eq!(results[0].winners, vec![Payout { seat: 0, amount: 150 }]);
        assert_eq!(results[1].winners, vec![Payout { seat: 1, amount: 100 }]);
        assert_eq!(results[2].winners, vec![Payout { seat: 2, amount: 100 }]);
    }

    #[test]
    fn folded_seats_never_win() {
        // folded seats simply have no strength entry
        let mut strengths = BTreeMap::new();
        strengths.insert(2, strength("2s 3h 5d 7c 9s"));
        let results = distribute(&[pot("Main Pot", 60, &[2])], &strengths, 0, MAX_SEATS);
        assert_eq!(results[0].winners, vec![Payout { seat: 2, amount: 60 }]);
    }
}
