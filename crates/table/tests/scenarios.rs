//! End-to-end hands driven through the public table API.

use crd_cards::Hand;
use crd_cards::Strength;
use crd_core::Chips;
use crd_core::Config;
use crd_core::ID;
use crd_core::Session;
use crd_table::Action;
use crd_table::Phase;
use crd_table::Reason;
use crd_table::ShowdownEntry;
use crd_table::Table;
use crd_table::TableError;
use crd_table::TableEvent;

fn table() -> Table {
    Table::new("standard", Config::default())
}

fn join(table: &mut Table, name: &str, stack: Chips) -> ID<Session> {
    let token = ID::default();
    table.seat_player(token, name, stack).unwrap();
    token
}

fn strength_of(entry: &ShowdownEntry, board: &[String]) -> Strength {
    let cards = format!("{} {}", entry.cards.join(" "), board.join(" "));
    Strength::from(Hand::try_from(cards.as_str()).unwrap())
}

fn stack_sum(table: &Table) -> Chips {
    (0..9).filter_map(|p| table.seat(p)).map(|s| s.stack).sum()
}

#[test]
fn heads_up_preflop_fold() {
    let mut t = table();
    let alpha = join(&mut t, "alpha", 200);
    let beta = join(&mut t, "beta", 200);
    assert!(t.start_hand());
    assert_eq!(t.hand_number(), 1);
    // button posts small, acts first, folds
    t.act(alpha, Action::Fold).unwrap();
    assert_eq!(t.phase(), Phase::Waiting);
    assert_eq!(t.seat(0).unwrap().stack, 199);
    assert_eq!(t.seat(1).unwrap().stack, 201);
    // nothing was revealed
    let events = t.take_events();
    assert!(!events.iter().any(|e| matches!(e, TableEvent::Showdown { .. })));
    assert!(events.iter().any(|e| matches!(
        e,
        TableEvent::Ended {
            uncontested: true,
            ..
        }
    )));
    let _ = beta;
}

#[test]
fn full_streets_no_raise() {
    let mut t = table();
    let alpha = join(&mut t, "alpha", 200);
    let beta = join(&mut t, "beta", 200);
    assert!(t.start_hand());
    t.act(alpha, Action::Call).unwrap();
    t.act(beta, Action::Check).unwrap();
    for _ in 0..3 {
        // postflop the non-button acts first
        t.act(beta, Action::Check).unwrap();
        t.act(alpha, Action::Check).unwrap();
    }
    assert_eq!(t.phase(), Phase::Waiting);
    let events = t.take_events();
    assert_eq!(
        events
            .iter()
            .filter(|e| matches!(e, TableEvent::Community { .. }))
            .count(),
        3
    );
    let record = t.records(1).pop().unwrap();
    assert_eq!(record.pot, 4);
    assert_eq!(record.showdown.len(), 2);
    assert_eq!(record.board.len(), 5);
    // the evaluator decides the winner; settle must agree with it
    let a = strength_of(&record.showdown[0], &record.board);
    let b = strength_of(&record.showdown[1], &record.board);
    let stacks = (t.seat(0).unwrap().stack, t.seat(1).unwrap().stack);
    match a.cmp(&b) {
        std::cmp::Ordering::Greater => assert_eq!(stacks, (202, 198)),
        std::cmp::Ordering::Less => assert_eq!(stacks, (198, 202)),
        std::cmp::Ordering::Equal => assert_eq!(stacks, (200, 200)),
    }
    assert_eq!(stack_sum(&t), 400);
}

#[test]
fn three_way_side_pots() {
    let mut t = table();
    let a = join(&mut t, "a", 50);
    let b = join(&mut t, "b", 100);
    let c = join(&mut t, "c", 200);
    assert!(t.start_hand());
    // dealer 0, small 1, big 2; the button opens 3-handed
    t.act(a, Action::RaiseTo(50)).unwrap();
    t.act(b, Action::RaiseTo(100)).unwrap();
    t.act(c, Action::RaiseTo(200)).unwrap();
    // everyone all-in: board runs out, hand is over
    assert_eq!(t.phase(), Phase::Waiting);
    let record = t.records(1).pop().unwrap();
    assert_eq!(record.pot, 350);
    let shape: Vec<(&str, Chips)> = record
        .pots
        .iter()
        .map(|p| (p.label.as_str(), p.amount))
        .collect();
    assert_eq!(
        shape,
        vec![("Main Pot", 150), ("Side Pot 1", 100), ("Side Pot 2", 100)]
    );
    // the uncalled overage goes back to the deep stack alone
    assert_eq!(record.pots[2].winners.len(), 1);
    assert_eq!(record.pots[2].winners[0].seat, 2);
    assert_eq!(record.pots[2].winners[0].amount, 100);
    // each layer agrees with the evaluator
    let strengths: Vec<Strength> = record
        .showdown
        .iter()
        .map(|e| strength_of(e, &record.board))
        .collect();
    let best_of = |seats: &[usize]| -> Vec<usize> {
        let best = seats.iter().map(|&s| strengths[s]).max().unwrap();
        seats.iter().copied().filter(|&s| strengths[s] == best).collect()
    };
    let main_winners: Vec<usize> = record.pots[0].winners.iter().map(|w| w.seat).collect();
    assert_eq!(main_winners, best_of(&[0, 1, 2]));
    let side_winners: Vec<usize> = record.pots[1].winners.iter().map(|w| w.seat).collect();
    assert_eq!(side_winners, best_of(&[1, 2]));
    assert_eq!(stack_sum(&t), 350);
}

#[test]
fn incomplete_all_in_raise_does_not_reopen() {
    // a low floor lets the short stack buy in for exactly 14
    let config = Config {
        min_buy_in: 10,
        ..Config::default()
    };
    let mut t = Table::new("standard", config);
    let x = join(&mut t, "x", 14);
    let sb = join(&mut t, "sb", 200);
    let bb = join(&mut t, "bb", 200);
    let y = join(&mut t, "y", 200);
    assert!(t.start_hand());
    // dealer 0 (x), small 1, big 2, and y under the gun
    t.act(y, Action::RaiseTo(10)).unwrap();
    assert_eq!(t.public_view().min_raise, 8);
    // x shoves for 14: level rises, the minimum raise does not
    t.act(x, Action::RaiseTo(14)).unwrap();
    assert_eq!(t.public_view().current_bet_level, 14);
    assert_eq!(t.public_view().min_raise, 8);
    t.act(sb, Action::Fold).unwrap();
    t.act(bb, Action::Fold).unwrap();
    // y already closed action at 10 and may only call or fold
    assert_eq!(
        t.act(y, Action::RaiseTo(22)),
        Err(TableError::IllegalAction(Reason::NotReopened))
    );
    t.act(y, Action::Call).unwrap();
    assert_eq!(t.phase(), Phase::Waiting);
    let record = t.records(1).pop().unwrap();
    assert_eq!(record.pot, 14 + 14 + 1 + 2);
    assert_eq!(record.pots.len(), 1);
    assert_eq!(stack_sum(&t), 614);
}

#[test]
fn raise_boundaries_are_exact() {
    let mut t = table();
    let alpha = join(&mut t, "alpha", 200);
    let beta = join(&mut t, "beta", 200);
    assert!(t.start_hand());
    // level 2, min raise 2: raising to 3 is short, to 4 is legal
    assert_eq!(
        t.act(alpha, Action::RaiseTo(3)),
        Err(TableError::IllegalAction(Reason::RaiseTooSmall))
    );
    t.act(alpha, Action::RaiseTo(4)).unwrap();
    assert_eq!(t.public_view().min_raise, 2);
    let _ = beta;
}

fn held(t: &Table) -> Chips {
    t.public_view()
        .seats
        .iter()
        .flatten()
        .map(|s| s.stack + s.total_bet)
        .sum()
}

fn watermark(t: &Table, mark: &mut (Chips, Chips)) {
    let view = t.public_view();
    assert!(view.current_bet_level >= mark.0);
    assert!(view.min_raise >= mark.1);
    assert!(view.min_raise >= 2);
    assert!(view.action_on.is_some());
    *mark = (view.current_bet_level, view.min_raise);
}

#[test]
fn betting_invariants_hold_through_a_raised_hand() {
    let mut t = table();
    let a = join(&mut t, "a", 200);
    let b = join(&mut t, "b", 200);
    let c = join(&mut t, "c", 200);
    assert!(t.start_hand());
    let mut mark = (0, 0);
    t.act(a, Action::RaiseTo(6)).unwrap();
    watermark(&t, &mut mark);
    assert_eq!(held(&t), 600);
    t.act(b, Action::RaiseTo(14)).unwrap();
    watermark(&t, &mut mark);
    t.act(c, Action::Call).unwrap();
    watermark(&t, &mut mark);
    t.act(a, Action::Call).unwrap();
    // new street: level resets, minimum raise returns to the big blind
    let view = t.public_view();
    assert_eq!(view.current_bet_level, 0);
    assert_eq!(view.min_raise, 2);
    assert_eq!(held(&t), 600);
    let mut mark = (0, 0);
    // small blind acts first postflop
    t.act(b, Action::Check).unwrap();
    watermark(&t, &mut mark);
    t.act(c, Action::RaiseTo(10)).unwrap();
    watermark(&t, &mut mark);
    t.act(a, Action::Fold).unwrap();
    watermark(&t, &mut mark);
    t.act(b, Action::Call).unwrap();
    assert_eq!(held(&t), 600);
}

#[test]
fn hole_cards_go_to_their_owners_only() {
    let mut t = table();
    let alpha = join(&mut t, "alpha", 200);
    let beta = join(&mut t, "beta", 200);
    assert!(t.start_hand());
    let events = t.take_events();
    let holes: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            TableEvent::Holes { token, seat, .. } => Some((*seat, *token)),
            _ => None,
        })
        .collect();
    assert_eq!(holes.len(), 2);
    assert!(holes.contains(&(0, alpha)));
    assert!(holes.contains(&(1, beta)));
    // the private view shows only the caller's own cards
    let view = t.state_for(alpha).unwrap();
    assert_eq!(view.hole_cards.len(), 2);
    assert!(view.table.seats.iter().flatten().all(|s| {
        // no seat view carries cards at all
        serde_json::to_string(s).unwrap().contains("hole") == false
    }));
}

#[test]
fn button_rotates_between_hands() {
    let mut t = table();
    let a = join(&mut t, "a", 200);
    let b = join(&mut t, "b", 200);
    let c = join(&mut t, "c", 200);
    assert!(t.start_hand());
    assert_eq!(t.public_view().dealer, 0);
    t.act(a, Action::Fold).unwrap();
    t.act(b, Action::Fold).unwrap();
    assert_eq!(t.phase(), Phase::Waiting);
    assert!(t.start_hand());
    assert_eq!(t.hand_number(), 2);
    assert_eq!(t.public_view().dealer, 1);
    let _ = c;
}

#[test]
fn sitting_out_on_your_turn_folds() {
    let mut t = table();
    let a = join(&mut t, "a", 200);
    let b = join(&mut t, "b", 200);
    assert!(t.start_hand());
    // the button is to act and sits out instead
    t.sit_out(a).unwrap();
    assert_eq!(t.phase(), Phase::Waiting);
    assert_eq!(t.seat(1).unwrap().stack, 201);
    // sitting out twice is an illegal transition
    assert!(matches!(t.sit_out(a), Err(TableError::IllegalState(_))));
    // with one player present and one sitting out, no hand starts
    assert!(!t.start_hand());
    t.come_back(a).unwrap();
    assert!(t.start_hand());
    let _ = b;
}

#[test]
fn leaving_mid_hand_folds_and_vacates_after() {
    let mut t = table();
    let a = join(&mut t, "a", 200);
    let b = join(&mut t, "b", 200);
    let c = join(&mut t, "c", 200);
    assert!(t.start_hand());
    // the button leaves while the action is on them
    let refund = t.remove_player(a).unwrap();
    assert_eq!(refund, 200);
    // hand goes on heads-up between the blinds; the seat frees up after
    assert!(t.phase().is_betting());
    t.act(b, Action::Call).unwrap();
    t.act(c, Action::Check).unwrap();
    for _ in 0..3 {
        t.act(b, Action::Check).unwrap();
        t.act(c, Action::Check).unwrap();
    }
    assert_eq!(t.phase(), Phase::Waiting);
    assert!(t.seat(0).is_none());
    assert_eq!(stack_sum(&t), 400);
}

#[test]
fn rebuy_rules() {
    let mut t = table();
    let a = join(&mut t, "a", 200);
    let b = join(&mut t, "b", 200);
    assert_eq!(t.rebuy(a, 100).unwrap(), 300);
    assert_eq!(t.rebuy(a, 200), Err(TableError::ExceedsMaxBuyIn(200)));
    assert!(t.start_hand());
    assert!(matches!(t.rebuy(b, 50), Err(TableError::IllegalState(_))));
}

#[test]
fn aborting_a_hand_refunds_every_bet() {
    let mut t = table();
    let a = join(&mut t, "a", 200);
    let b = join(&mut t, "b", 200);
    assert!(t.start_hand());
    t.act(a, Action::RaiseTo(50)).unwrap();
    t.abort_hand("integration test");
    assert_eq!(t.phase(), Phase::Waiting);
    assert_eq!(t.seat(0).unwrap().stack, 200);
    assert_eq!(t.seat(1).unwrap().stack, 200);
    assert_eq!(t.public_view().pot, 0);
    let events = t.take_events();
    assert!(events.iter().any(|e| matches!(e, TableEvent::Aborted { .. })));
    let _ = b;
}
