use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use meet_room::{
    create_router, ActionClient, AppState, Config, LocalRoomCreator, Lobby, LoopbackRtc,
    MeetingParams, MeetingSession, PeerId, SignedTokenIssuer, Viewport,
};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "meet-room", version, about = "Video meeting rooms: action server and terminal client")]
struct Cli {
    /// Config file (extension optional)
    #[arg(short, long, default_value = "config/meet-room")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP action server (room creation, token issuance)
    Serve,
    /// Join an existing room as a guest
    Join {
        /// Room code, e.g. abc-defg-hij
        code: String,
    },
    /// Create a new room and join it as host
    Create,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("meet_room=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();
    let cfg = Config::load(&cli.config)
        .with_context(|| format!("Failed to load config from {}", cli.config))?;

    info!("{} v{}", cfg.service.name, env!("CARGO_PKG_VERSION"));

    match cli.command {
        Command::Serve => serve(&cfg).await,
        Command::Join { code } => run_client(&cfg, Some(code)).await,
        Command::Create => run_client(&cfg, None).await,
    }
}

async fn serve(cfg: &Config) -> Result<()> {
    let tokens = SignedTokenIssuer::new(cfg.tokens.secret.clone(), cfg.tokens.ttl_secs)
        .context("Invalid token settings")?;
    let state = AppState::new(Arc::new(tokens), Arc::new(LocalRoomCreator::new()));
    let app = create_router(state);

    let addr = cfg.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("HTTP server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
    }
}

/// Entry page, then meeting page over a loopback RTC client.
/// `code` joins an existing room; `None` creates one.
async fn run_client(cfg: &Config, code: Option<String>) -> Result<()> {
    let actions = Arc::new(ActionClient::new(cfg.client.action_url.clone())?);
    let lobby = Lobby::new(actions.clone(), actions.clone());

    let route = match code {
        Some(code) => lobby.join(&code).await,
        None => lobby.create().await,
    };
    let Some(route) = route else {
        warn!("Staying on the entry page");
        return Ok(());
    };

    info!("Navigating to {}", route);

    let rtc = Arc::new(LoopbackRtc::new());
    let mut session = MeetingSession::mount(
        rtc.clone(),
        actions,
        MeetingParams::from_location(&route.path()),
    );

    if let Some(redirect) = session.initialize().await {
        warn!("Redirected to {}", redirect);
        return Ok(());
    }
    session.drain_events().await;

    let viewport = Viewport::new(cfg.client.viewport_width);
    print_view(&session, viewport)?;
    println!("commands: mic | cam | share | pin <peer> | add <peer> | drop <peer> | leave");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let mut words = line.split_whitespace();
        match (words.next(), words.next().and_then(PeerId::new)) {
            (None, _) => continue,
            (Some("mic"), _) => session.toggle_audio().await,
            (Some("cam"), _) => session.toggle_video().await,
            (Some("share"), _) => session.toggle_screen_share().await,
            (Some("pin"), Some(peer)) => session.toggle_pin(peer),
            (Some("add"), Some(peer)) => rtc.add_peer(peer).await,
            (Some("drop"), Some(peer)) => rtc.remove_peer(&peer).await,
            (Some("leave"), _) => {
                let route = session.leave().await;
                session.drain_events().await;
                info!("Navigating to {}", route);
                break;
            }
            _ => {
                warn!("Unknown command: {}", line.trim());
                continue;
            }
        }

        session.drain_events().await;
        if let Some(redirect) = session.redirect() {
            info!("Navigating to {}", redirect);
            break;
        }
        print_view(&session, viewport)?;
    }

    session.release().await;
    Ok(())
}

fn print_view(session: &MeetingSession, viewport: Viewport) -> Result<()> {
    if let Some(plan) = session.view(viewport) {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        println!("{}", serde_json::to_string(&session.controls())?);
    }
    Ok(())
}
