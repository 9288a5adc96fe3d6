use crate::command::Command;
use crate::command::Handle;
use crate::message::Blind;
use crate::message::RevealView;
use crate::message::ServerMessage;
use crate::narrator;
use crate::scheduler::Fingerprint;
use crate::scheduler::Scheduler;
use crd_core::Config;
use crd_core::ID;
use crd_core::Position;
use crd_core::Session;
use crd_table::Phase;
use crd_table::Table;
use crd_table::TableError;
use crd_table::TableEvent;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::mpsc::unbounded_channel;

/// The clock currently armed for one actor's turn.
struct Turn {
    fingerprint: Fingerprint,
    bank_engaged: bool,
}

/// One table actor: owns a [`Table`] and serializes everything against it.
///
/// Client requests arrive as [`Command`]s with reply channels; timers are
/// delayed commands the actor sent itself. After every command the table's
/// event outbox is drained, clocks are re-armed, and pushes fan out — so
/// broadcasts for a change always land after the change committed and before
/// the next one does.
pub struct Room {
    table: Table,
    rx: tokio::sync::mpsc::UnboundedReceiver<Command>,
    scheduler: Scheduler,
    config: Config,
    channels: HashMap<ID<Session>, Vec<(u64, UnboundedSender<String>)>>,
    channel_seq: u64,
    armed: Option<Turn>,
    start_nonce: u64,
    evictions: HashMap<ID<Session>, u64>,
}

impl Room {
    /// Spawns the actor task and returns its address.
    pub fn spawn(label: &str, config: Config) -> Handle {
        let (tx, rx) = unbounded_channel();
        let table = Table::new(label, config);
        let id = table.id();
        let room = Self {
            table,
            rx,
            scheduler: Scheduler::new(tx.clone()),
            config,
            channels: HashMap::new(),
            channel_seq: 0,
            armed: None,
            start_nonce: 0,
            evictions: HashMap::new(),
        };
        tokio::spawn(room.run());
        Handle {
            id,
            label: label.to_string(),
            tx,
        }
    }

    async fn run(mut self) {
        log::info!("[room {}] open", self.table.id());
        while let Some(command) = self.rx.recv().await {
            self.handle(command);
            self.flush();
        }
        log::info!("[room {}] closed", self.table.id());
    }

    fn handle(&mut self, command: Command) {
        match command {
            Command::Join {
                token,
                name,
                buy_in,
                reply,
            } => {
                let _ = reply.send(self.table.seat_player(token, &name, buy_in));
            }
            Command::Act {
                token,
                action,
                reply,
            } => {
                let _ = reply.send(self.table.act(token, action));
            }
            Command::Leave { token, reply } => {
                let _ = reply.send(self.table.remove_player(token));
            }
            Command::SitOut { token, reply } => {
                let _ = reply.send(self.table.sit_out(token));
            }
            Command::ComeBack { token, reply } => {
                let _ = reply.send(self.table.come_back(token));
            }
            Command::Rebuy {
                token,
                amount,
                reply,
            } => {
                let _ = reply.send(self.table.rebuy(token, amount));
            }
            Command::State { token, reply } => {
                let _ = reply.send(self.table.state_for(token));
            }
            Command::Public { reply } => {
                let _ = reply.send(self.table.public_view());
            }
            Command::History { limit, reply } => {
                let _ = reply.send(self.table.records(limit));
            }
            Command::Subscribe {
                token,
                channel,
                reply,
            } => {
                let _ = reply.send(self.subscribe(token, channel));
            }
            Command::Unsubscribe { token, channel_id } => {
                self.unsubscribe(token, channel_id);
            }
            Command::StartHand { nonce } => {
                if nonce == self.start_nonce {
                    self.table.start_hand();
                }
            }
            Command::TurnExpired { fingerprint } => self.turn_expired(fingerprint),
            Command::BankTick { fingerprint } => self.bank_tick(fingerprint),
            Command::Evict { token, nonce } => self.evict(token, nonce),
        }
    }
}

/// Push channels and the disconnect policy.
impl Room {
    fn subscribe(
        &mut self,
        token: ID<Session>,
        channel: UnboundedSender<String>,
    ) -> Result<u64, TableError> {
        if self.table.seat_of(token).is_none() {
            return Err(TableError::UnknownPlayer);
        }
        self.channel_seq += 1;
        let id = self.channel_seq;
        self.channels.entry(token).or_default().push((id, channel));
        let _ = self.table.relink(token);
        log::debug!("[room {}] channel {} attached", self.table.id(), id);
        Ok(id)
    }

    fn unsubscribe(&mut self, token: ID<Session>, channel_id: u64) {
        let drained = match self.channels.get_mut(&token) {
            Some(channels) => {
                channels.retain(|(id, _)| *id != channel_id);
                channels.is_empty()
            }
            None => false,
        };
        if drained {
            self.channels.remove(&token);
            log::info!("[room {}] player lost last channel", self.table.id());
            let _ = self.table.drop_link(token);
        }
    }

    fn broadcast(&mut self, message: ServerMessage) {
        let json = message.to_json();
        for channels in self.channels.values_mut() {
            channels.retain(|(_, tx)| tx.send(json.clone()).is_ok());
        }
    }

    fn unicast(&mut self, token: ID<Session>, message: ServerMessage) {
        let json = message.to_json();
        if let Some(channels) = self.channels.get_mut(&token) {
            channels.retain(|(_, tx)| tx.send(json.clone()).is_ok());
        }
    }
}

/// Clocks and scheduling.
impl Room {
    fn turn_expired(&mut self, fingerprint: Fingerprint) {
        let Some(turn) = self.armed.as_mut() else {
            return;
        };
        if turn.fingerprint != fingerprint || turn.bank_engaged {
            return;
        }
        let seat = fingerprint.seat;
        if self.table.time_bank_of(seat) > 0 {
            turn.bank_engaged = true;
            log::debug!("[room {}] seat {} on the time bank", self.table.id(), seat);
            self.scheduler.tick(fingerprint);
        } else {
            self.armed = None;
            self.table.timeout_fold(seat);
        }
    }

    fn bank_tick(&mut self, fingerprint: Fingerprint) {
        let Some(turn) = self.armed.as_ref() else {
            return;
        };
        if turn.fingerprint != fingerprint || !turn.bank_engaged {
            return;
        }
        match self.table.tick_bank(fingerprint.seat) {
            0 => {
                self.armed = None;
                self.table.timeout_fold(fingerprint.seat);
            }
            _ => self.scheduler.tick(fingerprint),
        }
    }

    fn evict(&mut self, token: ID<Session>, nonce: u64) {
        if self.evictions.get(&token) != Some(&nonce) {
            return;
        }
        let idle = self
            .table
            .seat_of(token)
            .and_then(|pos| self.table.seat(pos))
            .map(|seat| seat.sit_out)
            .unwrap_or(false);
        if idle {
            log::info!("[room {}] evicting idle player", self.table.id());
            let _ = self.table.remove_player(token);
        }
    }

    fn arm(&mut self, seat: Position) {
        let fingerprint = Fingerprint {
            hand: self.table.hand_number(),
            phase: self.table.phase(),
            seat,
            nonce: self.scheduler.next_nonce(),
        };
        self.armed = Some(Turn {
            fingerprint,
            bank_engaged: false,
        });
        self.scheduler
            .turn(fingerprint, Duration::from_millis(self.config.turn_timer_ms));
    }

    fn schedule_start(&mut self, delay_ms: u64) {
        self.start_nonce += 1;
        self.scheduler
            .hand_start(self.start_nonce, Duration::from_millis(delay_ms));
    }
}

/// Event drain: timers, scheduling, and push fan-out.
impl Room {
    fn flush(&mut self) {
        let events = self.table.take_events();
        let mut prompted = None;
        let mut moved = false;
        for event in &events {
            match event {
                TableEvent::ActionOn { seat, .. } => prompted = Some(*seat),
                TableEvent::Acted { .. }
                | TableEvent::Ended { .. }
                | TableEvent::Aborted { .. } => {
                    prompted = None;
                    moved = true;
                }
                _ => {}
            }
        }
        match prompted {
            Some(seat) => self.arm(seat),
            None if moved => self.armed = None,
            None => {}
        }
        for event in &events {
            match event {
                TableEvent::Joined { .. } => {
                    if self.table.phase() == Phase::Waiting {
                        self.schedule_start(self.config.hand_start_delay_ms);
                    }
                }
                TableEvent::Returned { token, .. } => {
                    self.evictions.entry(*token).and_modify(|n| *n += 1);
                    if self.table.phase() == Phase::Waiting {
                        self.schedule_start(self.config.hand_start_delay_ms);
                    }
                }
                TableEvent::Ended { .. } | TableEvent::Aborted { .. } => {
                    self.schedule_start(self.config.showdown_delay_ms);
                }
                TableEvent::SatOut { token, .. } => {
                    let nonce = self.evictions.entry(*token).or_insert(0);
                    *nonce += 1;
                    self.scheduler.evict(
                        *token,
                        *nonce,
                        Duration::from_millis(self.config.sit_out_auto_remove_ms),
                    );
                }
                TableEvent::Left { token, .. } => {
                    self.evictions.remove(token);
                    self.channels.remove(token);
                }
                _ => {}
            }
        }
        for event in events {
            self.publish(event);
        }
    }

    fn publish(&mut self, event: TableEvent) {
        let table = self.table.id().to_string();
        let hand = self.table.hand_number();
        match event {
            TableEvent::Joined {
                seat, name, stack, ..
            } => self.broadcast(ServerMessage::PlayerJoined {
                table,
                hand,
                seat,
                name,
                stack,
            }),
            TableEvent::Left { seat, name, .. } => self.broadcast(ServerMessage::PlayerLeft {
                table,
                hand,
                seat,
                name,
            }),
            TableEvent::SatOut { seat, .. } => {
                self.broadcast(ServerMessage::PlayerSatOut { table, hand, seat })
            }
            TableEvent::Returned { seat, .. } => {
                self.broadcast(ServerMessage::PlayerReturned { table, hand, seat })
            }
            TableEvent::HandStarted { hand, .. } => {
                let line = narrator::deal(hand);
                self.broadcast(ServerMessage::Mitsuki { table, hand, line });
            }
            TableEvent::Blinds { small, big } => self.broadcast(ServerMessage::BlindsPosted {
                table,
                hand,
                small: Blind {
                    seat: small.0,
                    amount: small.1,
                },
                big: Blind {
                    seat: big.0,
                    amount: big.1,
                },
            }),
            TableEvent::Holes { seat, token, hole } => {
                let cards = hole.cards().iter().map(|c| c.to_string()).collect();
                self.unicast(
                    token,
                    ServerMessage::CardsDealt {
                        table,
                        hand,
                        seat,
                        cards,
                    },
                );
            }
            TableEvent::ActionOn {
                seat,
                pot,
                level,
                bet,
                to_call,
                min_raise,
                time_bank,
            } => self.broadcast(ServerMessage::ActionOn {
                table,
                hand,
                seat,
                pot,
                current_bet_level: level,
                current_bet: bet,
                to_call,
                min_raise,
                time_bank,
            }),
            TableEvent::Acted { seat, deed, pot } => self.broadcast(ServerMessage::PlayerAction {
                table,
                hand,
                seat,
                action: deed.label().to_string(),
                amount: deed.amount(),
                pot,
            }),
            TableEvent::Community { street, cards } => {
                self.broadcast(ServerMessage::CommunityCards {
                    table,
                    hand,
                    street: street.label().to_lowercase(),
                    cards: cards.iter().map(|c| c.to_string()).collect(),
                })
            }
            TableEvent::BankTick { seat, remaining } => {
                self.broadcast(ServerMessage::TimeBank {
                    table,
                    hand,
                    seat,
                    remaining,
                })
            }
            TableEvent::Showdown { reveals, pots } => {
                let reveals = reveals
                    .iter()
                    .map(|r| RevealView {
                        seat: r.seat,
                        cards: r.hole.cards().iter().map(|c| c.to_string()).collect(),
                        category: r.strength.ranking().label().to_string(),
                    })
                    .collect();
                self.broadcast(ServerMessage::Showdown {
                    table: table.clone(),
                    hand,
                    reveals,
                    pots,
                });
                let line = narrator::showdown(hand);
                self.broadcast(ServerMessage::Mitsuki { table, hand, line });
            }
            TableEvent::Ended {
                hand: ended_hand,
                winners,
                uncontested,
            } => {
                self.broadcast(ServerMessage::HandComplete {
                    table: table.clone(),
                    hand: ended_hand,
                    winners,
                    uncontested,
                });
                if uncontested {
                    let line = narrator::uncontested(ended_hand);
                    self.broadcast(ServerMessage::Mitsuki {
                        table,
                        hand: ended_hand,
                        line,
                    });
                }
            }
            TableEvent::Aborted {
                hand: ended_hand,
                reason,
            } => self.broadcast(ServerMessage::HandAborted {
                table,
                hand: ended_hand,
                reason,
            }),
        }
    }
}
