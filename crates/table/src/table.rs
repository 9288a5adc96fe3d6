use crate::action::Action;
use crate::action::Deed;
use crate::error::Reason;
use crate::error::TableError;
use crate::event::Reveal;
use crate::event::TableEvent;
use crate::phase::Phase;
use crate::pot;
use crate::pot::Pot;
use crate::rating;
use crate::record::HandRecord;
use crate::record::History;
use crate::record::ShowdownEntry;
use crate::seat::Seat;
use crate::seat::Status;
use crate::showdown;
use crate::showdown::Payout;
use crate::showdown::PotResult;
use crate::view::PrivateView;
use crate::view::PublicView;
use crate::view::SeatView;
use crd_cards::Board;
use crd_cards::Deck;
use crd_cards::Hand;
use crd_cards::Hole;
use crd_cards::Strength;
use crd_core::Chips;
use crd_core::Config;
use crd_core::ID;
use crd_core::Position;
use crd_core::Session;
use std::collections::BTreeMap;

/// One poker table owning one hand at a time.
///
/// The table is the functional core: every operation is synchronous, either
/// fails without touching state or commits and appends [`TableEvent`]s to an
/// outbox. The room actor serializes calls into it and drains the outbox, so
/// none of the invariants here need locks.
pub struct Table {
    id: ID<Self>,
    label: String,
    config: Config,
    seats: Vec<Option<Seat>>,
    deck: Deck,
    board: Board,
    pot: Chips,
    pots: Vec<Pot>,
    phase: Phase,
    dealer: Position,
    /// Highest per-seat commitment this street.
    level: Chips,
    /// Smallest legal raise increment; grows with each full raise.
    min_raise: Chips,
    actor: Option<Position>,
    blinds: Option<(Position, Position)>,
    hand_number: u64,
    /// Chips on the table when the hand started, adjusted for withdrawals.
    opening: Chips,
    log: Vec<String>,
    history: History,
    outbox: Vec<TableEvent>,
}

impl Table {
    pub fn new(label: &str, config: Config) -> Self {
        Self {
            id: ID::default(),
            label: label.to_string(),
            config,
            seats: (0..config.max_seats).map(|_| None).collect(),
            deck: Deck::new(),
            board: Board::default(),
            pot: 0,
            pots: Vec::new(),
            phase: Phase::Waiting,
            dealer: 0,
            level: 0,
            min_raise: config.big_blind,
            actor: None,
            blinds: None,
            hand_number: 0,
            opening: 0,
            log: Vec::new(),
            history: History::new(config.max_hand_history),
            outbox: Vec::new(),
        }
    }

    pub fn id(&self) -> ID<Self> {
        self.id
    }
    pub fn label(&self) -> &str {
        &self.label
    }
    pub fn config(&self) -> &Config {
        &self.config
    }
    pub fn phase(&self) -> Phase {
        self.phase
    }
    pub fn actor(&self) -> Option<Position> {
        self.actor
    }
    pub fn hand_number(&self) -> u64 {
        self.hand_number
    }
    pub fn pot(&self) -> Chips {
        self.pot
    }
    pub fn seat(&self, pos: Position) -> Option<&Seat> {
        self.seats.get(pos).and_then(|s| s.as_ref())
    }
    pub fn seat_of(&self, token: ID<Session>) -> Option<Position> {
        self.seats
            .iter()
            .position(|s| s.as_ref().map(|s| s.token == token).unwrap_or(false))
    }
    pub fn has_space(&self) -> bool {
        self.seats.iter().any(|s| s.is_none())
    }
    pub fn occupancy(&self) -> usize {
        self.seats.iter().flatten().count()
    }
    pub fn time_bank_of(&self, pos: Position) -> u32 {
        self.seat(pos).map(|s| s.time_bank).unwrap_or(0)
    }
    pub fn can_start(&self) -> bool {
        self.phase == Phase::Waiting && self.eligible_count() >= self.config.min_players
    }
    /// Drains the events accumulated since the last drain.
    pub fn take_events(&mut self) -> Vec<TableEvent> {
        std::mem::take(&mut self.outbox)
    }
}

/// Seating and session lifecycle.
impl Table {
    pub fn seat_player(
        &mut self,
        token: ID<Session>,
        name: &str,
        buy_in: Chips,
    ) -> Result<Position, TableError> {
        let name = name.trim();
        if name.is_empty() || name.len() > 32 {
            return Err(TableError::InvalidName);
        }
        if buy_in < self.config.min_buy_in || buy_in > self.config.max_buy_in {
            return Err(TableError::InvalidBuyIn(buy_in));
        }
        if self
            .seats
            .iter()
            .flatten()
            .any(|s| s.name.eq_ignore_ascii_case(name))
        {
            return Err(TableError::DuplicateName);
        }
        let pos = self
            .seats
            .iter()
            .position(|s| s.is_none())
            .ok_or(TableError::TableFull)?;
        self.seats[pos] = Some(Seat::new(token, name.to_string(), buy_in, &self.config));
        self.logf(format!("{} takes seat {} with {}", name, pos, buy_in));
        self.push(TableEvent::Joined {
            seat: pos,
            token,
            name: name.to_string(),
            stack: buy_in,
        });
        Ok(pos)
    }

    /// Pays out the player's stack and frees the seat. A player dealt into a
    /// live hand is folded first; their committed chips stay in the pot and
    /// the seat is physically vacated when the hand completes.
    pub fn remove_player(&mut self, token: ID<Session>) -> Result<Chips, TableError> {
        let pos = self.seat_of(token).ok_or(TableError::UnknownPlayer)?;
        let in_live_hand = self.phase.is_betting() && self.seat_ref(pos).status.is_in_hand();
        if !in_live_hand {
            let seat = self.seats[pos].take().expect("occupied seat");
            self.logf(format!("{} leaves with {}", seat.name, seat.stack));
            self.push(TableEvent::Left {
                seat: pos,
                token,
                name: seat.name.clone(),
                stack: seat.stack,
            });
            return Ok(seat.stack);
        }
        let (payout, name) = {
            let seat = self.seat_mut(pos);
            seat.leaving = true;
            let payout = seat.stack;
            seat.stack = 0;
            (payout, seat.name.clone())
        };
        self.opening -= payout;
        self.logf(format!("{} leaves with {}", name, payout));
        self.push(TableEvent::Left {
            seat: pos,
            token,
            name,
            stack: payout,
        });
        if self.actor == Some(pos) {
            self.fold_out(pos, Deed::Folded);
        } else if self.seat_ref(pos).status.is_live() {
            self.seat_mut(pos).status = Status::Folded;
            if self.live_count() <= 1 {
                self.settle_uncontested();
            }
        }
        Ok(payout)
    }

    /// Flags the seat to skip coming hands; on the seat's own turn this is an
    /// auto-fold.
    pub fn sit_out(&mut self, token: ID<Session>) -> Result<(), TableError> {
        let pos = self.seat_of(token).ok_or(TableError::UnknownPlayer)?;
        if self.seat_ref(pos).sit_out {
            return Err(TableError::IllegalState("already sitting out"));
        }
        self.seat_mut(pos).sit_out = true;
        self.push(TableEvent::SatOut { seat: pos, token });
        if self.actor == Some(pos) && self.phase.is_betting() {
            self.fold_out(pos, Deed::Folded);
        } else if !self.seat_ref(pos).status.is_in_hand() {
            self.seat_mut(pos).status = Status::SittingOut;
        }
        Ok(())
    }

    pub fn come_back(&mut self, token: ID<Session>) -> Result<(), TableError> {
        let pos = self.seat_of(token).ok_or(TableError::UnknownPlayer)?;
        if !self.seat_ref(pos).sit_out {
            return Err(TableError::IllegalState("not sitting out"));
        }
        let seat = self.seat_mut(pos);
        seat.sit_out = false;
        if seat.status == Status::SittingOut && seat.stack > 0 {
            seat.status = Status::Waiting;
        }
        self.push(TableEvent::Returned { seat: pos, token });
        Ok(())
    }

    pub fn rebuy(&mut self, token: ID<Session>, amount: Chips) -> Result<Chips, TableError> {
        let pos = self.seat_of(token).ok_or(TableError::UnknownPlayer)?;
        let live = self.phase.is_betting() || self.phase == Phase::Showdown;
        if live && self.seat_ref(pos).status.is_in_hand() {
            return Err(TableError::IllegalState("cannot rebuy during a hand"));
        }
        if self.seat_ref(pos).stack + amount > self.config.max_buy_in {
            return Err(TableError::ExceedsMaxBuyIn(amount));
        }
        let seat = self.seat_mut(pos);
        seat.stack += amount;
        if seat.status == Status::SittingOut && !seat.sit_out && seat.stack > 0 {
            seat.status = Status::Waiting;
        }
        Ok(seat.stack)
    }

    /// Transport loss: mark the seat disconnected and translate it into a
    /// sit-out, folding on the seat's turn.
    pub fn drop_link(&mut self, token: ID<Session>) -> Result<(), TableError> {
        let pos = self.seat_of(token).ok_or(TableError::UnknownPlayer)?;
        self.seat_mut(pos).disconnected = true;
        if !self.seat_ref(pos).sit_out {
            self.sit_out(token)?;
        }
        Ok(())
    }

    /// A push channel came back; the seat still returns from sit-out itself.
    pub fn relink(&mut self, token: ID<Session>) -> Result<(), TableError> {
        let pos = self.seat_of(token).ok_or(TableError::UnknownPlayer)?;
        self.seat_mut(pos).disconnected = false;
        Ok(())
    }
}

/// Hand lifecycle.
impl Table {
    /// Deals a new hand if the table is waiting and enough players are
    /// funded and present. Returns whether a hand began.
    pub fn start_hand(&mut self) -> bool {
        if !self.can_start() {
            return false;
        }
        self.hand_number += 1;
        self.board.clear();
        self.pot = 0;
        self.pots.clear();
        self.log.clear();
        for seat in self.seats.iter_mut().flatten() {
            seat.reset_for_hand();
        }
        self.opening = self
            .seats
            .iter()
            .flatten()
            .filter(|s| s.status == Status::Active)
            .map(|s| s.stack)
            .sum();
        self.dealer = match self.hand_number {
            1 => self.next_active_after(self.seats.len() - 1),
            _ => self.next_active_after(self.dealer),
        }
        .expect("enough active seats to start");
        for seat in self.seats.iter_mut().flatten() {
            if seat.status == Status::Active {
                seat.hands_played += 1;
            }
        }
        self.deck.reset();
        self.deck.shuffle();
        self.logf(format!(
            "hand #{} begins, button at seat {}",
            self.hand_number, self.dealer
        ));
        self.push(TableEvent::HandStarted {
            hand: self.hand_number,
            dealer: self.dealer,
        });
        let bb = self.post_blinds();
        if let Err(e) = self.deal_holes() {
            self.abort_hand(&e.to_string());
            return true;
        }
        self.phase = Phase::Preflop;
        self.resume_round(bb);
        true
    }

    /// Primary entry point for a client betting decision.
    pub fn act(&mut self, token: ID<Session>, action: Action) -> Result<Deed, TableError> {
        let pos = self.seat_of(token).ok_or(TableError::UnknownPlayer)?;
        if !self.phase.is_betting() {
            return Err(TableError::NoActiveHand);
        }
        if self.actor != Some(pos) {
            return Err(TableError::NotYourTurn);
        }
        let deed = self.apply(pos, action)?;
        self.settle_action(pos, deed);
        Ok(deed)
    }

    /// Clock expiry translated into a fold through the normal action path.
    /// Ignored when the seat is no longer the actor.
    pub fn timeout_fold(&mut self, pos: Position) {
        if self.actor != Some(pos) || !self.phase.is_betting() {
            return;
        }
        self.fold_out(pos, Deed::TimedOut);
    }

    /// Burns one second of the seat's time bank and reports what remains.
    pub fn tick_bank(&mut self, pos: Position) -> u32 {
        if self.seats.get(pos).and_then(|s| s.as_ref()).is_none() {
            return 0;
        }
        let seat = self.seat_mut(pos);
        seat.time_bank = seat.time_bank.saturating_sub(1);
        let remaining = seat.time_bank;
        self.push(TableEvent::BankTick {
            seat: pos,
            remaining,
        });
        remaining
    }

    /// Unwinds a broken hand: every committed chip goes back to its stack
    /// and the table returns to waiting. Chips are conserved even here.
    pub fn abort_hand(&mut self, reason: &str) {
        if self.phase == Phase::Waiting {
            return;
        }
        log::error!(
            "[table {}] hand #{} aborted: {}",
            self.id,
            self.hand_number,
            reason
        );
        for seat in self.seats.iter_mut().flatten() {
            if seat.status.is_in_hand() {
                seat.stack += seat.total_bet;
            }
        }
        self.logf(format!("hand aborted: {}", reason));
        self.push(TableEvent::Aborted {
            hand: self.hand_number,
            reason: reason.to_string(),
        });
        self.clear_hand();
    }
}

/// Views and records.
impl Table {
    pub fn public_view(&self) -> PublicView {
        PublicView {
            table: self.id.to_string(),
            table_type: self.label.clone(),
            hand_number: self.hand_number,
            phase: self.phase,
            board: self.board.cards().iter().map(|c| c.to_string()).collect(),
            pot: self.pot,
            pots: self.pots.clone(),
            current_bet_level: self.level,
            min_raise: self.min_raise,
            action_on: self.actor,
            dealer: self.dealer,
            seats: self
                .seats
                .iter()
                .enumerate()
                .map(|(i, s)| s.as_ref().map(|s| Self::seat_view(i, s)))
                .collect(),
        }
    }

    /// The public view plus this player's own hole cards. Nobody else's
    /// cards ever appear here.
    pub fn state_for(&self, token: ID<Session>) -> Result<PrivateView, TableError> {
        let pos = self.seat_of(token).ok_or(TableError::UnknownPlayer)?;
        let seat = self.seat_ref(pos);
        Ok(PrivateView {
            table: self.public_view(),
            seat: pos,
            hole_cards: seat
                .hole
                .map(|h| h.cards().iter().map(|c| c.to_string()).collect())
                .unwrap_or_default(),
            to_call: match self.phase.is_betting() && seat.status == Status::Active {
                true => seat.to_call(self.level),
                false => 0,
            },
        })
    }

    pub fn records(&self, limit: usize) -> Vec<HandRecord> {
        self.history.recent(limit)
    }

    fn seat_view(pos: Position, seat: &Seat) -> SeatView {
        SeatView {
            seat: pos,
            name: seat.name.clone(),
            stack: seat.stack,
            status: seat.status,
            current_bet: seat.current_bet,
            total_bet: seat.total_bet,
            last_action: seat.deed.map(|d| d.label().to_string()),
            time_bank: seat.time_bank,
            sitting_out: seat.sit_out,
            disconnected: seat.disconnected,
            hands_played: seat.hands_played,
            hands_won: seat.hands_won,
            elo: seat.elo.round() as i32,
        }
    }
}

/// Betting machinery.
impl Table {
    fn apply(&mut self, pos: Position, action: Action) -> Result<Deed, TableError> {
        let level = self.level;
        let min_raise = self.min_raise;
        let (to_call, stack, already_acted) = {
            let seat = self.seat_ref(pos);
            (seat.to_call(level), seat.stack, seat.acted)
        };
        let deed = match action {
            Action::Fold => {
                self.seat_mut(pos).status = Status::Folded;
                Deed::Folded
            }
            Action::Check => {
                if to_call > 0 {
                    return Err(TableError::IllegalAction(Reason::CannotCheck));
                }
                Deed::Checked
            }
            Action::Call => {
                if to_call == 0 {
                    return Err(TableError::IllegalAction(Reason::NothingToCall));
                }
                let paid = self.commit(pos, to_call);
                match self.seat_ref(pos).stack {
                    0 => Deed::AllIn(self.seat_ref(pos).current_bet),
                    _ => Deed::Called(paid),
                }
            }
            Action::RaiseTo(target) => {
                if already_acted {
                    return Err(TableError::IllegalAction(Reason::NotReopened));
                }
                if target <= level {
                    return Err(TableError::IllegalAction(Reason::RaiseTooSmall));
                }
                let needed = target - (level - to_call);
                if needed > stack {
                    return Err(TableError::IllegalAction(Reason::InsufficientChips));
                }
                let full = target >= level + min_raise;
                let shove = needed == stack;
                if !full && !shove {
                    return Err(TableError::IllegalAction(Reason::RaiseTooSmall));
                }
                let paid = self.commit(pos, needed);
                debug_assert!(paid == needed);
                self.level = target;
                if full {
                    // a full raise reopens the action to everyone behind
                    self.min_raise = target - level;
                    for (i, slot) in self.seats.iter_mut().enumerate() {
                        if i == pos {
                            continue;
                        }
                        if let Some(seat) = slot {
                            if seat.status == Status::Active {
                                seat.acted = false;
                            }
                        }
                    }
                }
                match self.seat_ref(pos).stack {
                    0 => Deed::AllIn(target),
                    _ => Deed::RaisedTo(target),
                }
            }
        };
        let seat = self.seat_mut(pos);
        seat.acted = true;
        seat.deed = Some(deed);
        Ok(deed)
    }

    fn settle_action(&mut self, pos: Position, deed: Deed) {
        self.logf(format!("{} {}", self.name_of(pos), deed));
        self.push(TableEvent::Acted {
            seat: pos,
            deed,
            pot: self.pot,
        });
        self.actor = None;
        self.assert_conserved();
        self.resume_round(pos);
    }

    /// Folds a seat outside its own volition (timeout, sit-out, leave).
    fn fold_out(&mut self, pos: Position, deed: Deed) {
        {
            let seat = self.seat_mut(pos);
            seat.status = Status::Folded;
            seat.acted = true;
            seat.deed = Some(deed);
        }
        self.settle_action(pos, deed);
    }

    /// Hands the action to the next seat that still owes a decision, or
    /// closes the betting round when nobody does.
    fn resume_round(&mut self, from: Position) {
        if self.live_count() <= 1 {
            self.settle_uncontested();
            return;
        }
        match self.next_pending_after(from) {
            Some(pos) => {
                self.actor = Some(pos);
                self.prompt();
            }
            None => self.end_round(),
        }
    }

    fn prompt(&mut self) {
        let pos = self.actor.expect("actor armed");
        let event = {
            let seat = self.seat_ref(pos);
            TableEvent::ActionOn {
                seat: pos,
                pot: self.pot,
                level: self.level,
                bet: seat.current_bet,
                to_call: seat.to_call(self.level),
                min_raise: self.min_raise,
                time_bank: seat.time_bank,
            }
        };
        self.push(event);
    }

    fn end_round(&mut self) {
        let pots = pot::calculate(&self.seats);
        if let Err(e) = self.conserve(&pots) {
            self.abort_hand(&e.to_string());
            return;
        }
        // the pot breakdown is only interesting once someone is all-in
        self.pots = match self.seats.iter().flatten().any(|s| s.status == Status::AllIn) {
            true => pots,
            false => Vec::new(),
        };
        for seat in self.seats.iter_mut().flatten() {
            if seat.status.is_in_hand() {
                seat.reset_for_street();
            }
        }
        self.level = 0;
        self.min_raise = self.config.big_blind;
        self.actor = None;
        if self.phase == Phase::River {
            self.settle_showdown();
            return;
        }
        if self.active_count() <= 1 {
            self.run_out();
            return;
        }
        if let Err(e) = self.deal_next_street() {
            self.abort_hand(&e.to_string());
            return;
        }
        self.resume_round(self.dealer);
    }

    /// Betting is over early; deal the rest of the board, then show down.
    fn run_out(&mut self) {
        while self.board.len() < 5 {
            if let Err(e) = self.deal_next_street() {
                self.abort_hand(&e.to_string());
                return;
            }
        }
        self.settle_showdown();
    }

    fn deal_next_street(&mut self) -> anyhow::Result<()> {
        let street = self.board.street().next();
        self.deck.burn()?;
        for card in self.deck.deal(street.n_revealed())? {
            self.board.push(card);
        }
        self.phase = Phase::from(street);
        self.logf(format!("{}: {}", street, self.board));
        self.push(TableEvent::Community {
            street,
            cards: self.board.cards().to_vec(),
        });
        Ok(())
    }

    fn post_blinds(&mut self) -> Position {
        let heads_up = self.live_count() == 2;
        let small = match heads_up {
            true => self.dealer,
            false => self.next_active_after(self.dealer).expect("small blind seat"),
        };
        let big = self.next_active_after(small).expect("big blind seat");
        let small_paid = self.commit(small, self.config.small_blind);
        self.seat_mut(small).deed = Some(Deed::SmallBlind(small_paid));
        let big_paid = self.commit(big, self.config.big_blind);
        self.seat_mut(big).deed = Some(Deed::BigBlind(big_paid));
        self.level = self.config.big_blind;
        self.min_raise = self.config.big_blind;
        self.blinds = Some((small, big));
        self.logf(format!("{} posts small blind {}", self.name_of(small), small_paid));
        self.logf(format!("{} posts big blind {}", self.name_of(big), big_paid));
        self.push(TableEvent::Blinds {
            small: (small, small_paid),
            big: (big, big_paid),
        });
        big
    }

    fn deal_holes(&mut self) -> anyhow::Result<()> {
        let n = self.seats.len();
        for i in 1..=n {
            let pos = (self.dealer + i) % n;
            let dealt = self
                .seats[pos]
                .as_ref()
                .map(|s| s.status.is_live())
                .unwrap_or(false);
            if dealt {
                let cards = self.deck.deal(2)?;
                let hole = Hole::from((cards[0], cards[1]));
                let token = {
                    let seat = self.seats[pos].as_mut().expect("occupied seat");
                    seat.hole = Some(hole);
                    seat.token
                };
                self.push(TableEvent::Holes {
                    seat: pos,
                    token,
                    hole,
                });
            }
        }
        Ok(())
    }
}

/// Settlement.
impl Table {
    fn settle_uncontested(&mut self) {
        let winner = self
            .seats
            .iter()
            .position(|s| s.as_ref().map(|s| s.status.is_live()).unwrap_or(false))
            .expect("one live seat remains");
        let amount = self.pot;
        {
            let seat = self.seat_mut(winner);
            seat.stack += amount;
            seat.hands_won += 1;
        }
        self.actor = None;
        self.logf(format!("{} wins {} uncontested", self.name_of(winner), amount));
        let winners = vec![Payout {
            seat: winner,
            amount,
        }];
        self.push(TableEvent::Ended {
            hand: self.hand_number,
            winners: winners.clone(),
            uncontested: true,
        });
        self.finish_hand(Vec::new(), Vec::new(), winners);
    }

    fn settle_showdown(&mut self) {
        self.phase = Phase::Showdown;
        self.actor = None;
        let pots = pot::calculate(&self.seats);
        if let Err(e) = self.conserve(&pots) {
            self.abort_hand(&e.to_string());
            return;
        }
        self.pots = pots;
        let board = self.board.hand();
        let strengths: BTreeMap<Position, Strength> = self
            .seats
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().filter(|s| s.status.is_live()).map(|s| (i, s)))
            .filter_map(|(i, s)| {
                s.hole
                    .map(|h| (i, Strength::from(Hand::add(Hand::from(h), board))))
            })
            .collect();
        let results = showdown::distribute(&self.pots, &strengths, self.dealer, self.seats.len());
        let mut totals: BTreeMap<Position, Chips> = BTreeMap::new();
        for result in &results {
            for payout in &result.winners {
                *totals.entry(payout.seat).or_insert(0) += payout.amount;
            }
        }
        totals.retain(|_, amount| *amount > 0);
        for (&pos, &amount) in &totals {
            let seat = self.seat_mut(pos);
            seat.stack += amount;
            seat.hands_won += 1;
        }
        let field: Vec<(Position, f32, bool)> = strengths
            .keys()
            .map(|&p| (p, self.seat_ref(p).elo, totals.contains_key(&p)))
            .collect();
        for (pos, elo) in rating::update(&field, self.config.elo_k_factor) {
            self.seat_mut(pos).elo = elo;
        }
        let reveals: Vec<Reveal> = strengths
            .iter()
            .map(|(&seat, &strength)| Reveal {
                seat,
                hole: self.seat_ref(seat).hole.expect("live seat holds cards"),
                strength,
            })
            .collect();
        for reveal in &reveals {
            self.logf(format!(
                "{} shows {} ({})",
                self.name_of(reveal.seat),
                reveal.hole,
                reveal.strength.ranking()
            ));
        }
        for result in &results {
            for payout in &result.winners {
                self.logf(format!(
                    "{} wins {} from {}",
                    self.name_of(payout.seat),
                    payout.amount,
                    result.label
                ));
            }
        }
        let winners: Vec<Payout> = totals
            .into_iter()
            .map(|(seat, amount)| Payout { seat, amount })
            .collect();
        self.push(TableEvent::Showdown {
            reveals: reveals.clone(),
            pots: results.clone(),
        });
        self.push(TableEvent::Ended {
            hand: self.hand_number,
            winners: winners.clone(),
            uncontested: false,
        });
        self.finish_hand(reveals, results, winners);
    }

    fn finish_hand(&mut self, reveals: Vec<Reveal>, results: Vec<PotResult>, winners: Vec<Payout>) {
        let record = HandRecord {
            hand_number: self.hand_number,
            board: self.board.cards().iter().map(|c| c.to_string()).collect(),
            pot: self.pot,
            showdown: reveals
                .iter()
                .map(|r| ShowdownEntry {
                    seat: r.seat,
                    name: self.name_of(r.seat),
                    cards: r.hole.cards().iter().map(|c| c.to_string()).collect(),
                    category: r.strength.ranking().label().to_string(),
                })
                .collect(),
            pots: results,
            winners,
            log: self.log.clone(),
        };
        self.history.push(record);
        self.clear_hand();
    }

    fn clear_hand(&mut self) {
        for slot in self.seats.iter_mut() {
            let vacate = slot.as_ref().map(|s| s.leaving).unwrap_or(false);
            match vacate {
                true => *slot = None,
                false => {
                    if let Some(seat) = slot {
                        seat.reset_after_hand();
                    }
                }
            }
        }
        self.pot = 0;
        self.pots.clear();
        self.level = 0;
        self.min_raise = self.config.big_blind;
        self.blinds = None;
        self.actor = None;
        self.phase = Phase::Waiting;
    }
}

/// Bookkeeping helpers.
impl Table {
    fn commit(&mut self, pos: Position, amount: Chips) -> Chips {
        let paid = self.seat_mut(pos).commit(amount);
        self.pot += paid;
        paid
    }

    fn conserve(&self, pots: &[Pot]) -> Result<(), TableError> {
        let committed: Chips = self.seats.iter().flatten().map(|s| s.total_bet).sum();
        let banked: Chips = pots.iter().map(|p| p.amount).sum();
        if banked != committed || committed != self.pot {
            return Err(TableError::PotMismatch { banked, committed });
        }
        Ok(())
    }

    fn assert_conserved(&self) {
        if cfg!(debug_assertions) && self.phase.is_betting() {
            let on_table: Chips = self
                .seats
                .iter()
                .flatten()
                .filter(|s| s.status.is_in_hand())
                .map(|s| s.stack + s.total_bet)
                .sum();
            debug_assert_eq!(on_table, self.opening, "chip conservation violated");
        }
    }

    fn next_seat(&self, from: Position, pred: impl Fn(&Seat) -> bool) -> Option<Position> {
        let n = self.seats.len();
        (1..=n)
            .map(|i| (from + i) % n)
            .find(|&p| self.seats[p].as_ref().map(|s| pred(s)).unwrap_or(false))
    }
    fn next_active_after(&self, from: Position) -> Option<Position> {
        self.next_seat(from, |s| s.status == Status::Active)
    }
    fn next_pending_after(&self, from: Position) -> Option<Position> {
        let level = self.level;
        self.next_seat(from, move |s| {
            s.status == Status::Active && (!s.acted || s.current_bet < level)
        })
    }

    fn live_count(&self) -> usize {
        self.seats
            .iter()
            .flatten()
            .filter(|s| s.status.is_live())
            .count()
    }
    fn active_count(&self) -> usize {
        self.seats
            .iter()
            .flatten()
            .filter(|s| s.status == Status::Active)
            .count()
    }
    fn eligible_count(&self) -> usize {
        self.seats
            .iter()
            .flatten()
            .filter(|s| s.stack > 0 && !s.sit_out && !s.leaving)
            .count()
    }

    fn seat_ref(&self, pos: Position) -> &Seat {
        self.seats[pos].as_ref().expect("occupied seat")
    }
    fn seat_mut(&mut self, pos: Position) -> &mut Seat {
        self.seats[pos].as_mut().expect("occupied seat")
    }
    fn name_of(&self, pos: Position) -> String {
        self.seat_ref(pos).name.clone()
    }

    fn push(&mut self, event: TableEvent) {
        self.outbox.push(event);
    }
    fn logf(&mut self, line: String) {
        log::debug!("[table {}] {}", self.id, line);
        self.log.push(line);
    }
}
