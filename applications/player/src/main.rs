/// Segue Player - headless terminal host
use clap::{Parser, Subcommand};
use segue_core::{PlayMode, PlaylistProvider};
use segue_player::{PlayerCommand, PlayerConfig, Response, Session};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "segue-player")]
#[command(about = "Segue music player driven from the terminal", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "SEGUE_CONFIG")]
    config: Option<PathBuf>,

    /// Library directory (overrides the configuration)
    #[arg(short, long, global = true)]
    library: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the library, reading commands from stdin (default)
    Play {
        /// Starting play mode: sequential, repeat-one, repeat-all, shuffle
        #[arg(short, long)]
        mode: Option<String>,

        /// Seed for shuffle order
        #[arg(long)]
        seed: Option<u64>,

        /// Position of the first track in the visible list
        #[arg(long)]
        start: Option<usize>,
    },
    /// Print the library in display order and exit
    List,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "segue_player=info,segue_transition=info,segue_library=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = PlayerConfig::load(cli.config.as_deref())?;
    if let Some(library) = cli.library {
        config.library.directory = library;
    }

    match cli.command.unwrap_or(Commands::Play {
        mode: None,
        seed: None,
        start: None,
    }) {
        Commands::Play { mode, seed, start } => {
            if let Some(mode) = mode {
                config.playback.mode = PlayMode::from_str(&mode)
                    .ok_or_else(|| anyhow::anyhow!("Unknown play mode: {}", mode))?;
            }
            if seed.is_some() {
                config.playback.shuffle_seed = seed;
            }
            if let Some(start) = start {
                config.playback.start_index = start;
            }
            play(config).await?;
        }
        Commands::List => {
            list(&config).await?;
        }
    }

    Ok(())
}

async fn play(config: PlayerConfig) -> anyhow::Result<()> {
    tracing::info!("Starting Segue Player");
    tracing::info!("Library: {}", config.library.directory.display());
    tracing::info!("Mode: {}", config.playback.mode);

    let session = Arc::new(Session::new(&config)?);
    if session.library().is_empty() {
        tracing::warn!("Library is empty, nothing to play");
    }

    // Startup transition runs in the background so input is read (and
    // ignored while locked) from the first moment
    {
        let session = Arc::clone(&session);
        tokio::spawn(async move {
            let outcome = session.start().await;
            tracing::debug!("Startup transition: {:?}", outcome);
        });
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = tokio::time::interval(config.tick_interval());
    let mut last_tick = Instant::now();

    println!("Type 'help' for commands.");

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                let command = match line.parse::<PlayerCommand>() {
                    Ok(command) => command,
                    Err(e) => {
                        println!("{}", e);
                        continue;
                    }
                };
                if command == PlayerCommand::Quit {
                    break;
                }
                let session = Arc::clone(&session);
                tokio::spawn(async move {
                    match session.execute(command).await {
                        Ok(response) => print_response(&response),
                        Err(e) => println!("{}", e),
                    }
                });
            }
            _ = ticker.tick() => {
                let now = Instant::now();
                let elapsed = now - last_tick;
                last_tick = now;

                let session = Arc::clone(&session);
                tokio::spawn(async move {
                    for outcome in session.tick(elapsed).await {
                        tracing::debug!("Tick: {:?}", outcome);
                    }
                });
            }
            _ = tokio::signal::ctrl_c() => {
                break;
            }
        }
    }

    tracing::info!("Segue Player stopped");
    Ok(())
}

async fn list(config: &PlayerConfig) -> anyhow::Result<()> {
    let session = Session::new(config)?;
    if let Response::Message(text) = session.execute(PlayerCommand::List).await? {
        println!("{}", text);
    }
    Ok(())
}

fn print_response(response: &Response) {
    match response {
        Response::Message(text) if !text.is_empty() => println!("{}", text),
        Response::Control(outcome) => tracing::debug!("Control: {:?}", outcome),
        Response::Message(_) | Response::Quit => {}
    }
}
