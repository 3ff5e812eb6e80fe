mod session;
mod upload;

use anyhow::{Context, Result};
use providers::{CompletionTransport, Corrector, OpenAIClient, Responder};
use session::{help_text, parse_command, ChatSession, Command, GREETING};
use shared::{ResponseEnvelope, ServiceSettings};
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_envelope(envelope: &ResponseEnvelope) {
    println!("\n{}\n", envelope.content);
    if let Some(url) = &envelope.image_url {
        // Uploaded images come back as data URLs; only show links.
        if url.starts_with("http") {
            println!("  image: {}", url);
        }
    }
    println!("  [{}]\n", envelope.model_id);
}

fn prompt(session: &ChatSession) -> Result<()> {
    print!("({}) > ", session.mode);
    std::io::stdout().flush()?;
    Ok(())
}

async fn send(responder: &Responder, session: &mut ChatSession) {
    let envelope = responder
        .respond(session.transcript().to_vec(), session.mode)
        .await;
    print_envelope(&envelope);
    session.record(&envelope);
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let settings = ServiceSettings::load().context("failed to load settings")?;
    let client: Arc<dyn CompletionTransport> =
        Arc::new(OpenAIClient::from_settings(&settings).context("failed to build HTTP client")?);
    let responder = Responder::new(&settings, client.clone());
    let corrector = Corrector::new(&settings, client);
    tracing::info!(base_url = %settings.base_url, "PandaNexus ready");

    let mut session = ChatSession::new();
    println!("{}\n\nType /help for commands.\n", GREETING);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt(&session)?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        match command {
            Command::Send(text) => {
                session.push(shared::ChatTurn::user(text));
                send(&responder, &mut session).await;
            }
            Command::Mode(Some(mode)) => {
                session.mode = mode;
                println!("Mode: {} ({})", mode, mode.description());
            }
            Command::Mode(None) => {
                println!("Current mode: {}", session.mode);
                println!("{}", help_text());
            }
            Command::Fix(text) => {
                let corrected = corrector.correct(&text).await;
                println!("\n{}\n", corrected);
            }
            Command::Image(path) => match upload::image_turn(&path) {
                Ok(turn) => {
                    session.push(turn);
                    send(&responder, &mut session).await;
                }
                Err(e) => println!("{:#}", e),
            },
            Command::File(path) => match upload::text_file_turn(&path) {
                Ok(turn) => {
                    session.push(turn);
                    println!("Added {} to the conversation.", path.display());
                }
                Err(e) => println!("{:#}", e),
            },
            Command::Clear => {
                session.clear();
                println!("Started a new conversation.");
            }
            Command::Help => println!("{}", help_text()),
            Command::Quit => break,
        }
    }

    Ok(())
}
