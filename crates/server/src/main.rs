use clap::Parser;
use crd_core::Chips;
use crd_core::Config;

/// Multi-table No-Limit Hold'em server for programmatic clients.
#[derive(Debug, Parser)]
#[command(name = "cardroomd")]
struct Options {
    /// Address to bind.
    #[arg(long, default_value = "127.0.0.1")]
    bind: String,
    /// Port to listen on.
    #[arg(long, default_value_t = 8080)]
    port: u16,
    /// Small blind in chips.
    #[arg(long)]
    small_blind: Option<Chips>,
    /// Big blind in chips.
    #[arg(long)]
    big_blind: Option<Chips>,
    /// Primary turn clock in milliseconds.
    #[arg(long)]
    turn_timer_ms: Option<u64>,
    /// Per-session time bank in seconds.
    #[arg(long)]
    time_bank_seconds: Option<u32>,
    /// Delay between hands in milliseconds.
    #[arg(long)]
    hand_start_delay_ms: Option<u64>,
}

#[actix_web::main]
async fn main() -> Result<(), std::io::Error> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    let options = Options::parse();
    let mut config = Config::default();
    if let Some(n) = options.small_blind {
        config.small_blind = n;
    }
    if let Some(n) = options.big_blind {
        config.big_blind = n;
    }
    if let Some(n) = options.turn_timer_ms {
        config.turn_timer_ms = n;
    }
    if let Some(n) = options.time_bank_seconds {
        config.time_bank_seconds = n;
    }
    if let Some(n) = options.hand_start_delay_ms {
        config.hand_start_delay_ms = n;
    }
    crd_server::run((options.bind, options.port), config).await
}
