//! Transport layer for cardroom.
//!
//! A thin actix-web surface over the [`Registry`]: JSON request/response for
//! every table operation plus a WebSocket push channel per session. The
//! transport holds no game state; it parses, routes, and relays.
//!
//! ## Submodules
//!
//! - [`handlers`] — Request handlers and error → status mapping
pub mod handlers;

use actix_cors::Cors;
use actix_web::App;
use actix_web::HttpResponse;
use actix_web::HttpServer;
use actix_web::Responder;
use actix_web::middleware::Logger;
use actix_web::web;
use crd_core::Config;
use crd_room::Registry;

async fn health() -> impl Responder {
    HttpResponse::Ok().body("ok")
}

#[rustfmt::skip]
pub async fn run(bind: (String, u16), config: Config) -> Result<(), std::io::Error> {
    let registry = web::Data::new(Registry::new(config));
    log::info!("starting cardroom server on {}:{}", bind.0, bind.1);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::new("%r %s %Ts"))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header(),
            )
            .app_data(registry.clone())
            .route("/health",      web::get().to(health))
            .route("/api/join",    web::post().to(handlers::join))
            .route("/api/state",   web::get().to(handlers::state))
            .route("/api/action",  web::post().to(handlers::action))
            .route("/api/leave",   web::post().to(handlers::leave))
            .route("/api/sitout",  web::post().to(handlers::sit_out))
            .route("/api/return",  web::post().to(handlers::come_back))
            .route("/api/rebuy",   web::post().to(handlers::rebuy))
            .route("/api/tables",  web::get().to(handlers::tables))
            .route("/api/history", web::get().to(handlers::history))
            .route("/push/{token}", web::get().to(handlers::push))
    })
    .bind((bind.0.as_str(), bind.1))?
    .run()
    .await
}
