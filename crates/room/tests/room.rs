//! Actor-level tests: clocks, scheduling, disconnects, and push fan-out,
//! all on tokio's paused test clock.

use crd_core::Config;
use crd_core::ID;
use crd_core::Session;
use crd_room::Command;
use crd_room::Registry;
use crd_room::Seated;
use crd_table::Action;
use crd_table::Phase;
use crd_table::Status;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::unbounded_channel;

fn config() -> Config {
    Config {
        hand_start_delay_ms: 100,
        // park the table after each hand so assertions see a stable state
        showdown_delay_ms: 60_000_000,
        time_bank_seconds: 5,
        ..Config::default()
    }
}

fn token(seated: &Seated) -> ID<Session> {
    ID::try_from(seated.token.as_str()).unwrap()
}

async fn sleep_ms(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

fn drain(rx: &mut UnboundedReceiver<String>) -> Vec<serde_json::Value> {
    let mut out = Vec::new();
    while let Ok(json) = rx.try_recv() {
        out.push(serde_json::from_str(&json).unwrap());
    }
    out
}

#[tokio::test(start_paused = true)]
async fn hand_starts_after_join_delay() {
    let registry = Registry::new(config());
    let a = registry.join("alpha", None, "standard").await.unwrap();
    let _b = registry.join("beta", None, "standard").await.unwrap();
    sleep_ms(200).await;
    let view = registry.state(token(&a)).await.unwrap();
    assert_eq!(view.table.hand_number, 1);
    assert!(view.table.phase.is_betting());
    assert_eq!(view.hole_cards.len(), 2);
    // heads-up: the button is the small blind and acts first
    assert_eq!(view.table.action_on, Some(0));
    assert_eq!(view.table.pot, 3);
}

#[tokio::test(start_paused = true)]
async fn time_bank_engages_and_is_spent_for_the_session() {
    let registry = Registry::new(config());
    let a = registry.join("alpha", None, "standard").await.unwrap();
    let _b = registry.join("beta", None, "standard").await.unwrap();
    let a = token(&a);
    sleep_ms(200).await;
    // primary clock runs out, five bank seconds remain
    sleep_ms(15_000).await;
    // three bank ticks burn down before the player finally calls
    sleep_ms(3_000).await;
    registry.act(a, Action::Call).await.unwrap();
    let view = registry.state(a).await.unwrap();
    let me = view.table.seats[view.seat].as_ref().unwrap();
    assert_eq!(me.status, Status::Active);
    assert_eq!(me.time_bank, 2);
}

#[tokio::test(start_paused = true)]
async fn exhausted_time_bank_folds_the_actor() {
    let registry = Registry::new(config());
    let a = registry.join("alpha", None, "standard").await.unwrap();
    let b = registry.join("beta", None, "standard").await.unwrap();
    sleep_ms(200).await;
    // 15s primary + 5s bank, then the synthesized fold
    sleep_ms(21_000).await;
    let view = registry.state(token(&b)).await.unwrap();
    assert_eq!(view.table.phase, Phase::Waiting);
    assert_eq!(view.table.seats[0].as_ref().unwrap().stack, 199);
    assert_eq!(view.table.seats[1].as_ref().unwrap().stack, 201);
    let _ = a;
}

#[tokio::test(start_paused = true)]
async fn stale_turn_timers_are_ignored() {
    let registry = Registry::new(config());
    let a = registry.join("alpha", None, "standard").await.unwrap();
    let b = registry.join("beta", None, "standard").await.unwrap();
    sleep_ms(200).await;
    registry.act(token(&a), Action::Call).await.unwrap();
    // the button's original clock expires now; it must not touch the hand
    sleep_ms(14_950).await;
    let view = registry.state(token(&b)).await.unwrap();
    assert!(view.table.phase.is_betting());
    assert_eq!(view.table.action_on, Some(1));
    assert_eq!(view.table.seats[0].as_ref().unwrap().status, Status::Active);
}

#[tokio::test(start_paused = true)]
async fn losing_the_last_channel_sits_out_and_folds() {
    let registry = Registry::new(config());
    let a = registry.join("alpha", None, "standard").await.unwrap();
    let _b = registry.join("beta", None, "standard").await.unwrap();
    let a = token(&a);
    let (tx, _rx) = unbounded_channel();
    let (handle, channel_id) = registry.subscribe(a, tx).await.unwrap();
    sleep_ms(200).await;
    // transport loss while the action is on the button
    handle
        .tx
        .send(Command::Unsubscribe {
            token: a,
            channel_id,
        })
        .unwrap();
    let view = registry.state(a).await.unwrap();
    let me = view.table.seats[view.seat].as_ref().unwrap();
    assert!(me.sitting_out);
    assert!(me.disconnected);
    assert_eq!(view.table.phase, Phase::Waiting);
    assert_eq!(view.table.seats[1].as_ref().unwrap().stack, 201);
}

#[tokio::test(start_paused = true)]
async fn idle_sit_out_is_evicted_after_ten_minutes() {
    let registry = Registry::new(config());
    let a = registry.join("alpha", None, "standard").await.unwrap();
    let b = registry.join("beta", None, "standard").await.unwrap();
    let a = token(&a);
    registry.sit_out(a).await.unwrap();
    sleep_ms(601_000).await;
    assert!(registry.state(a).await.is_err());
    assert!(registry.state(token(&b)).await.is_ok());
}

#[tokio::test(start_paused = true)]
async fn returning_from_sit_out_cancels_eviction() {
    let registry = Registry::new(config());
    let a = registry.join("alpha", None, "standard").await.unwrap();
    let _b = registry.join("beta", None, "standard").await.unwrap();
    let a = token(&a);
    registry.sit_out(a).await.unwrap();
    sleep_ms(300_000).await;
    registry.come_back(a).await.unwrap();
    sleep_ms(400_000).await;
    assert!(registry.state(a).await.is_ok());
}

#[tokio::test(start_paused = true)]
async fn pushes_reveal_only_your_own_cards() {
    let registry = Registry::new(config());
    let a = registry.join("alpha", None, "standard").await.unwrap();
    let b = registry.join("beta", None, "standard").await.unwrap();
    let (tx, mut rx) = unbounded_channel();
    registry.subscribe(token(&b), tx).await.unwrap();
    sleep_ms(200).await;
    let messages = drain(&mut rx);
    let types: Vec<&str> = messages
        .iter()
        .map(|m| m["type"].as_str().unwrap())
        .collect();
    assert_eq!(
        types,
        vec!["mitsuki", "blinds_posted", "cards_dealt", "action_on"]
    );
    // the one cards_dealt this channel sees is beta's own
    let dealt = &messages[2];
    assert_eq!(dealt["seat"], 1);
    assert_eq!(dealt["cards"].as_array().unwrap().len(), 2);
    // the prompt carries the full decision context
    let prompt = &messages[3];
    assert_eq!(prompt["seat"], 0);
    assert_eq!(prompt["pot"], 3);
    assert_eq!(prompt["current_bet_level"], 2);
    assert_eq!(prompt["to_call"], 1);
    assert_eq!(prompt["min_raise"], 2);
    assert_eq!(prompt["time_bank"], 5);
    let _ = a;
}

#[tokio::test(start_paused = true)]
async fn full_tables_overflow_into_new_ones() {
    let registry = Registry::new(config());
    for i in 0..10 {
        registry
            .join(&format!("bot{}", i), None, "standard")
            .await
            .unwrap();
    }
    assert_eq!(registry.tables().await.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn history_records_completed_hands() {
    let registry = Registry::new(config());
    let a = registry.join("alpha", None, "standard").await.unwrap();
    let _b = registry.join("beta", None, "standard").await.unwrap();
    sleep_ms(200).await;
    registry.act(token(&a), Action::Fold).await.unwrap();
    let records = registry.history(None, 10).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].hand_number, 1);
    assert!(records[0].showdown.is_empty());
    assert!(registry.history(Some("not-a-table"), 10).await.is_err());
}
