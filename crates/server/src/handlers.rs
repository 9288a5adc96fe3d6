use actix_web::HttpRequest;
use actix_web::HttpResponse;
use actix_web::Responder;
use actix_web::web;
use crd_core::Chips;
use crd_core::ID;
use crd_core::Session;
use crd_room::Command;
use crd_room::Registry;
use crd_table::Action;
use crd_table::TableError;
use serde::Deserialize;
use tokio::sync::mpsc::unbounded_channel;

#[derive(Debug, Deserialize)]
pub struct JoinRequest {
    name: String,
    buy_in: Option<Chips>,
    #[serde(default = "default_table_type")]
    table_type: String,
}

fn default_table_type() -> String {
    "standard".to_string()
}

#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    token: String,
}

#[derive(Debug, Deserialize)]
pub struct ActionRequest {
    token: String,
    action: String,
    amount: Option<Chips>,
}

#[derive(Debug, Deserialize)]
pub struct RebuyRequest {
    token: String,
    amount: Chips,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    table: Option<String>,
    limit: Option<usize>,
}

/// Maps the error taxonomy onto HTTP statuses; the body always carries
/// `{kind, message}`.
fn failure(e: &TableError) -> HttpResponse {
    let body = serde_json::json!({ "kind": e.kind(), "message": e.to_string() });
    match e {
        TableError::UnknownPlayer | TableError::UnknownTable => HttpResponse::NotFound().json(body),
        _ => match e.category() {
            "validation" => HttpResponse::BadRequest().json(body),
            "routing" | "state" => HttpResponse::Conflict().json(body),
            _ => HttpResponse::InternalServerError().json(body),
        },
    }
}

fn parse_token(s: &str) -> Result<ID<Session>, TableError> {
    ID::try_from(s).map_err(|_| TableError::UnknownPlayer)
}

pub async fn join(registry: web::Data<Registry>, body: web::Json<JoinRequest>) -> impl Responder {
    match registry.join(&body.name, body.buy_in, &body.table_type).await {
        Ok(seated) => HttpResponse::Ok().json(seated),
        Err(e) => failure(&e),
    }
}

pub async fn state(
    registry: web::Data<Registry>,
    query: web::Query<TokenRequest>,
) -> impl Responder {
    let result = async {
        let token = parse_token(&query.token)?;
        registry.state(token).await
    }
    .await;
    match result {
        Ok(view) => HttpResponse::Ok().json(view),
        Err(e) => failure(&e),
    }
}

pub async fn action(
    registry: web::Data<Registry>,
    body: web::Json<ActionRequest>,
) -> impl Responder {
    let result = async {
        let token = parse_token(&body.token)?;
        let action = Action::try_from((body.action.as_str(), body.amount))?;
        registry.act(token, action).await
    }
    .await;
    match result {
        Ok(deed) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "action": deed.label(),
            "amount": deed.amount(),
        })),
        Err(e) => failure(&e),
    }
}

pub async fn leave(
    registry: web::Data<Registry>,
    body: web::Json<TokenRequest>,
) -> impl Responder {
    let result = async {
        let token = parse_token(&body.token)?;
        registry.leave(token).await
    }
    .await;
    match result {
        Ok(stack) => HttpResponse::Ok().json(serde_json::json!({ "final_stack": stack })),
        Err(e) => failure(&e),
    }
}

pub async fn sit_out(
    registry: web::Data<Registry>,
    body: web::Json<TokenRequest>,
) -> impl Responder {
    let result = async {
        let token = parse_token(&body.token)?;
        registry.sit_out(token).await
    }
    .await;
    match result {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "status": "ok" })),
        Err(e) => failure(&e),
    }
}

pub async fn come_back(
    registry: web::Data<Registry>,
    body: web::Json<TokenRequest>,
) -> impl Responder {
    let result = async {
        let token = parse_token(&body.token)?;
        registry.come_back(token).await
    }
    .await;
    match result {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "status": "ok" })),
        Err(e) => failure(&e),
    }
}

pub async fn rebuy(
    registry: web::Data<Registry>,
    body: web::Json<RebuyRequest>,
) -> impl Responder {
    let result = async {
        let token = parse_token(&body.token)?;
        registry.rebuy(token, body.amount).await
    }
    .await;
    match result {
        Ok(stack) => HttpResponse::Ok().json(serde_json::json!({ "stack": stack })),
        Err(e) => failure(&e),
    }
}

pub async fn tables(registry: web::Data<Registry>) -> impl Responder {
    HttpResponse::Ok().json(registry.tables().await)
}

pub async fn history(
    registry: web::Data<Registry>,
    query: web::Query<HistoryQuery>,
) -> impl Responder {
    let limit = query.limit.unwrap_or(20);
    match registry.history(query.table.as_deref(), limit).await {
        Ok(records) => HttpResponse::Ok().json(records),
        Err(e) => failure(&e),
    }
}

/// Upgrades to a WebSocket push channel and pumps table pushes into it until
/// either side hangs up; hangup is reported to the table as channel loss.
pub async fn push(
    registry: web::Data<Registry>,
    path: web::Path<String>,
    body: web::Payload,
    req: HttpRequest,
) -> impl Responder {
    let token = match parse_token(&path) {
        Ok(token) => token,
        Err(e) => return failure(&e),
    };
    let (tx, mut rx) = unbounded_channel::<String>();
    let (handle, channel_id) = match registry.subscribe(token, tx).await {
        Ok(subscription) => subscription,
        Err(e) => return failure(&e),
    };
    match actix_ws::handle(&req, body) {
        Ok((response, mut session, mut stream)) => {
            actix_web::rt::spawn(async move {
                use futures::StreamExt;
                'sesh: loop {
                    tokio::select! {
                        biased;
                        msg = rx.recv() => match msg {
                            Some(json) => if session.text(json).await.is_err() { break 'sesh },
                            None => break 'sesh,
                        },
                        msg = stream.next() => match msg {
                            Some(Ok(actix_ws::Message::Close(_))) => break 'sesh,
                            Some(Ok(_)) => continue 'sesh,
                            Some(Err(_)) => break 'sesh,
                            None => break 'sesh,
                        },
                    }
                }
                let _ = handle.tx.send(Command::Unsubscribe { token, channel_id });
                log::debug!("[push {}] channel {} closed", handle.id, channel_id);
            });
            response
        }
        Err(e) => HttpResponse::InternalServerError().body(e.to_string()),
    }
}
