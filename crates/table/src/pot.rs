use crate::seat::Seat;
use crd_core::Chips;
use crd_core::Position;
use serde::Serialize;

/// One layer of the pot with the seats that can win it.
///
/// `cap` is the per-seat contribution ceiling of the layer; eligibility is
/// every live seat whose hand-total reached that ceiling.
#[derive(Debug, Clone, Serialize)]
pub struct Pot {
    pub label: String,
    pub amount: Chips,
    pub cap: Chips,
    pub eligible: Vec<Position>,
}

/// Slices the hand's contributions into an ordered main pot and side pots.
///
/// Thresholds are the distinct hand-totals of live (active or all-in) seats.
/// Every seat that put chips in — folded seats included — funds each layer up
/// to its cap. Folded chips above every live cap are forfeit to the last pot.
/// Always satisfies `Σ pots == Σ total_bet`.
pub fn calculate(seats: &[Option<Seat>]) -> Vec<Pot> {
    let contributions: Vec<(Position, Chips, bool)> = seats
        .iter()
        .enumerate()
        .filter_map(|(i, s)| s.as_ref().map(|s| (i, s.total_bet, s.status.is_live())))
        .filter(|&(_, bet, _)| bet > 0)
        .collect();
    let mut caps: Vec<Chips> = contributions
        .iter()
        .filter(|&&(_, _, live)| live)
        .map(|&(_, bet, _)| bet)
        .collect();
    caps.sort_unstable();
    caps.dedup();
    let mut pots = Vec::with_capacity(caps.len());
    let mut prev: Chips = 0;
    for (i, &cap) in caps.iter().enumerate() {
        let amount = contributions
            .iter()
            .map(|&(_, bet, _)| bet.min(cap).saturating_sub(prev))
            .sum();
        let eligible = contributions
            .iter()
            .filter(|&&(_, bet, live)| live && bet >= cap)
            .map(|&(p, _, _)| p)
            .collect();
        let label = match i {
            0 => "Main Pot".to_string(),
            n => format!("Side Pot {}", n),
        };
        pots.push(Pot {
            label,
            amount,
            cap,
            eligible,
        });
        prev = cap;
    }
    if let Some(last) = pots.last_mut() {
        let forfeit: Chips = contributions
            .iter()
            .map(|&(_, bet, _)| bet.saturating_sub(prev))
            .sum();
        last.amount += forfeit;
    }
    pots
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seat::Status;
    use crd_core::Config;
    use crd_core::ID;

    fn seats(entries: &[(Chips, Status)]) -> Vec<Option<Seat>> {
        entries
            .iter()
            .map(|&(bet, status)| {
                let mut seat = Seat::new(ID::default(), "p".into(), 1000, &Config::default());
                seat.total_bet = bet;
                seat.status = status;
                Some(seat)
            })
            .collect()
    }

    #[test]
    fn no_all_in_is_one_main_pot() {
        let seats = seats(&[(20, Status::Active), (20, Status::Active), (4, Status::Folded)]);
        let pots = calculate(&seats);
        assert_eq!(pots.len(), 1);
        assert_eq!(pots[0].label, "Main Pot");
        assert_eq!(pots[0].amount, 44);
        assert_eq!(pots[0].eligible, vec![0, 1]);
    }

    #[test]
    fn three_way_all_in_layers() {
        let seats = seats(&[
            (50, Status::AllIn),
            (100, Status::AllIn),
            (200, Status::AllIn),
        ]);
        let pots = calculate(&seats);
        assert_eq!(pots.len(), 3);
        assert_eq!((pots[0].amount, pots[0].eligible.clone()), (150, vec![0, 1, 2]));
        assert_eq!((pots[1].amount, pots[1].eligible.clone()), (100, vec![1, 2]));
        assert_eq!((pots[2].amount, pots[2].eligible.clone()), (100, vec![2]));
        assert_eq!(pots[1].label, "Side Pot 1");
        assert_eq!(pots[2].label, "Side Pot 2");
    }

    #[test]
    fn folded_chips_fund_every_layer() {
        let seats = seats(&[
            (30, Status::Folded),
            (50, Status::AllIn),
            (100, Status::Active),
        ]);
        let pots = calculate(&seats);
        assert_eq!(pots.len(), 2);
        assert_eq!(pots[0].amount, 50 + 50 + 30);
        assert_eq!(pots[1].amount, 50);
        assert_eq!(pots[1].eligible, vec![2]);
    }

    #[test]
    fn uncalled_surplus_is_its_own_pot() {
        let seats = seats(&[(60, Status::AllIn), (100, Status::Active)]);
        let pots = calculate(&seats);
        assert_eq!(pots.len(), 2);
        assert_eq!(pots[0].amount, 120);
        assert_eq!((pots[1].amount, pots[1].eligible.clone()), (40, vec![1]));
    }

    #[test]
    fn folded_overage_is_forfeit_to_the_last_pot() {
        let seats = seats(&[(100, Status::Folded), (40, Status::AllIn)]);
        let pots = calculate(&seats);
        assert_eq!(pots.len(), 1);
        assert_eq!(pots[0].amount, 140);
        assert_eq!(pots[0].eligible, vec![1]);
    }

    #[test]
    fn conserves_chips() {
        let cases: &[&[(Chips, Status)]] = &[
            &[(3, Status::Active), (3, Status::Active)],
            &[(17, Status::Folded), (80, Status::AllIn), (80, Status::Active)],
            &[
                (5, Status::AllIn),
                (25, Status::AllIn),
                (125, Status::AllIn),
                (60, Status::Folded),
            ],
        ];
        for case in cases {
            let seats = seats(case);
            let banked: Chips = calculate(&seats).iter().map(|p| p.amount).sum();
            let committed: Chips = case.iter().map(|&(bet, _)| bet).sum();
            assert_eq!(banked, committed);
        }
    }

    #[test]
    fn equal_all_ins_share_one_layer() {
        let seats = seats(&[(75, Status::AllIn), (75, Status::AllIn)]);
        let pots = calculate(&seats);
        assert_eq!(pots.len(), 1);
        assert_eq!(pots[0].amount, 150);
        assert_eq!(pots[0].eligible, vec![0, 1]);
    }
}
