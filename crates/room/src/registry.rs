use crate::command::Command;
use crate::command::Handle;
use crate::narrator;
use crate::room::Room;
use crd_core::Chips;
use crd_core::Config;
use crd_core::ID;
use crd_core::Position;
use crd_core::Session;
use crd_table::Action;
use crd_table::Deed;
use crd_table::HandRecord;
use crd_table::PrivateView;
use crd_table::PublicView;
use crd_table::Table;
use crd_table::TableError;
use serde::Serialize;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::oneshot;

/// Everything a fresh client needs before its first action.
#[derive(Debug, Clone, Serialize)]
pub struct Welcome {
    pub message: String,
    pub small_blind: Chips,
    pub big_blind: Chips,
    pub min_buy_in: Chips,
    pub max_buy_in: Chips,
    pub turn_timer_ms: u64,
    pub time_bank_seconds: u32,
}

/// Successful join result.
#[derive(Debug, Clone, Serialize)]
pub struct Seated {
    pub token: String,
    pub table: String,
    pub seat: Position,
    pub welcome: Welcome,
}

/// The only cross-table structure: routes session tokens to their table
/// actor and creates tables on demand.
///
/// Holds the immutable process [`Config`]; both maps are mutated only on
/// join/leave/create and read under a shared lock everywhere else.
pub struct Registry {
    config: Config,
    tables: RwLock<HashMap<ID<Table>, Handle>>,
    sessions: RwLock<HashMap<ID<Session>, ID<Table>>>,
}

impl Registry {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            tables: RwLock::new(HashMap::new()),
            sessions: RwLock::new(HashMap::new()),
        }
    }
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Seats the client at the first table of the requested type with a free
    /// seat, opening a new table when none has room.
    pub async fn join(
        &self,
        name: &str,
        buy_in: Option<Chips>,
        table_type: &str,
    ) -> Result<Seated, TableError> {
        let buy_in = buy_in.unwrap_or(self.config.default_buy_in);
        // validate here too so a bad request cannot spawn an empty table
        let trimmed = name.trim();
        if trimmed.is_empty() || trimmed.len() > 32 {
            return Err(TableError::InvalidName);
        }
        if buy_in < self.config.min_buy_in || buy_in > self.config.max_buy_in {
            return Err(TableError::InvalidBuyIn(buy_in));
        }
        let token = ID::<Session>::default();
        let handles: Vec<Handle> = self
            .tables
            .read()
            .await
            .values()
            .filter(|h| h.label == table_type)
            .cloned()
            .collect();
        for handle in handles {
            match self.try_join(&handle, token, name, buy_in).await {
                Err(TableError::TableFull) => continue,
                Err(e) => return Err(e),
                Ok(seat) => return Ok(self.seated(token, &handle, seat, name).await),
            }
        }
        let handle = self.open(table_type).await;
        let seat = self.try_join(&handle, token, name, buy_in).await?;
        Ok(self.seated(token, &handle, seat, name).await)
    }

    pub async fn act(&self, token: ID<Session>, action: Action) -> Result<Deed, TableError> {
        let handle = self.handle_for(token).await?;
        let (reply, rx) = oneshot::channel();
        self.send(&handle, Command::Act { token, action, reply })?;
        self.settle(token, rx.await).await
    }

    pub async fn state(&self, token: ID<Session>) -> Result<PrivateView, TableError> {
        let handle = self.handle_for(token).await?;
        let (reply, rx) = oneshot::channel();
        self.send(&handle, Command::State { token, reply })?;
        self.settle(token, rx.await).await
    }

    pub async fn leave(&self, token: ID<Session>) -> Result<Chips, TableError> {
        let handle = self.handle_for(token).await?;
        let (reply, rx) = oneshot::channel();
        self.send(&handle, Command::Leave { token, reply })?;
        let result = self.settle(token, rx.await).await;
        if result.is_ok() {
            self.sessions.write().await.remove(&token);
        }
        result
    }

    pub async fn sit_out(&self, token: ID<Session>) -> Result<(), TableError> {
        let handle = self.handle_for(token).await?;
        let (reply, rx) = oneshot::channel();
        self.send(&handle, Command::SitOut { token, reply })?;
        self.settle(token, rx.await).await
    }

    pub async fn come_back(&self, token: ID<Session>) -> Result<(), TableError> {
        let handle = self.handle_for(token).await?;
        let (reply, rx) = oneshot::channel();
        self.send(&handle, Command::ComeBack { token, reply })?;
        self.settle(token, rx.await).await
    }

    pub async fn rebuy(&self, token: ID<Session>, amount: Chips) -> Result<Chips, TableError> {
        let handle = self.handle_for(token).await?;
        let (reply, rx) = oneshot::channel();
        self.send(&handle, Command::Rebuy { token, amount, reply })?;
        self.settle(token, rx.await).await
    }

    /// Attaches a push channel; returns the owning handle and channel id so
    /// the transport can detach it on hangup.
    pub async fn subscribe(
        &self,
        token: ID<Session>,
        channel: UnboundedSender<String>,
    ) -> Result<(Handle, u64), TableError> {
        let handle = self.handle_for(token).await?;
        let (reply, rx) = oneshot::channel();
        self.send(&handle, Command::Subscribe { token, channel, reply })?;
        let id = self.settle(token, rx.await).await?;
        Ok((handle, id))
    }

    pub async fn tables(&self) -> Vec<PublicView> {
        let handles: Vec<Handle> = self.tables.read().await.values().cloned().collect();
        let mut views = Vec::with_capacity(handles.len());
        for handle in handles {
            let (reply, rx) = oneshot::channel();
            if handle.tx.send(Command::Public { reply }).is_ok() {
                if let Ok(view) = rx.await {
                    views.push(view);
                }
            }
        }
        views
    }

    /// Hand history of one table, or of every table when none is named.
    pub async fn history(
        &self,
        table: Option<&str>,
        limit: usize,
    ) -> Result<Vec<HandRecord>, TableError> {
        let handles: Vec<Handle> = match table {
            Some(id) => {
                let id: ID<Table> =
                    ID::try_from(id).map_err(|_| TableError::UnknownTable)?;
                vec![
                    self.tables
                        .read()
                        .await
                        .get(&id)
                        .cloned()
                        .ok_or(TableError::UnknownTable)?,
                ]
            }
            None => self.tables.read().await.values().cloned().collect(),
        };
        let mut records = Vec::new();
        for handle in handles {
            let (reply, rx) = oneshot::channel();
            if handle.tx.send(Command::History { limit, reply }).is_ok() {
                if let Ok(mut batch) = rx.await {
                    records.append(&mut batch);
                }
            }
        }
        Ok(records)
    }
}

impl Registry {
    async fn open(&self, label: &str) -> Handle {
        let handle = Room::spawn(label, self.config);
        log::info!("[registry] opened table {} ({})", handle.id, label);
        self.tables.write().await.insert(handle.id, handle.clone());
        handle
    }

    async fn try_join(
        &self,
        handle: &Handle,
        token: ID<Session>,
        name: &str,
        buy_in: Chips,
    ) -> Result<Position, TableError> {
        let (reply, rx) = oneshot::channel();
        self.send(
            handle,
            Command::Join {
                token,
                name: name.to_string(),
                buy_in,
                reply,
            },
        )?;
        rx.await.map_err(|_| TableError::UnknownTable)?
    }

    async fn seated(
        &self,
        token: ID<Session>,
        handle: &Handle,
        seat: Position,
        name: &str,
    ) -> Seated {
        self.sessions.write().await.insert(token, handle.id);
        log::info!("[registry] {} seated at {} seat {}", name, handle.id, seat);
        Seated {
            token: token.to_string(),
            table: handle.id.to_string(),
            seat,
            welcome: Welcome {
                message: narrator::welcome(name),
                small_blind: self.config.small_blind,
                big_blind: self.config.big_blind,
                min_buy_in: self.config.min_buy_in,
                max_buy_in: self.config.max_buy_in,
                turn_timer_ms: self.config.turn_timer_ms,
                time_bank_seconds: self.config.time_bank_seconds,
            },
        }
    }

    async fn handle_for(&self, token: ID<Session>) -> Result<Handle, TableError> {
        let id = self
            .sessions
            .read()
            .await
            .get(&token)
            .copied()
            .ok_or(TableError::UnknownPlayer)?;
        self.tables
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(TableError::UnknownTable)
    }

    fn send(&self, handle: &Handle, command: Command) -> Result<(), TableError> {
        handle.tx.send(command).map_err(|_| TableError::UnknownTable)
    }

    /// Unwraps an actor reply, forgetting sessions the table no longer knows
    /// (e.g. an evicted player) so routing stays clean.
    async fn settle<T>(
        &self,
        token: ID<Session>,
        reply: Result<Result<T, TableError>, oneshot::error::RecvError>,
    ) -> Result<T, TableError> {
        let result = reply.map_err(|_| TableError::UnknownTable)?;
        if matches!(result, Err(TableError::UnknownPlayer)) {
            self.sessions.write().await.remove(&token);
        }
        result
    }
}
