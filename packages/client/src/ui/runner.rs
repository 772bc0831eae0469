//! Client runner: wires configuration, the WebSocket transport and one
//! channel variant to the terminal.

use std::{sync::Arc, thread};

use rustyline::{DefaultEditor, error::ReadlineError};
use thiserror::Error;
use tokio::sync::mpsc::{self, UnboundedReceiver};

use super::{
    command::{Command, parse_command},
    formatter::format_update,
};
use crate::{
    channel::{ChannelError, ChatChannel, GameChannel},
    config::{ClientArgs, Mode},
    domain::Transport,
    infrastructure::WebSocketTransport,
};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("failed to start line editor: {0}")]
    Readline(String),
}

/// Run the interactive client until the user quits or stdin closes.
pub async fn run_client(args: ClientArgs) -> Result<(), ClientError> {
    let transport: Arc<dyn Transport> =
        Arc::new(WebSocketTransport::connect(args.transport_options()));
    tracing::info!("Connecting to '{}'", args.server_url);

    let lines = spawn_line_reader()?;
    match args.mode {
        Mode::Game => run_game(transport, &args.username, lines).await,
        Mode::Chat { to } => run_chat(transport, &args.username, to, lines).await,
    }
    Ok(())
}

/// Read stdin on a dedicated thread; the receiver closes on EOF or Ctrl-C.
fn spawn_line_reader() -> Result<UnboundedReceiver<String>, ClientError> {
    let (tx, rx) = mpsc::unbounded_channel();
    let (ready_tx, ready_rx) = std::sync::mpsc::channel();

    thread::spawn(move || {
        let mut editor = match DefaultEditor::new() {
            Ok(editor) => {
                let _ = ready_tx.send(Ok(()));
                editor
            }
            Err(e) => {
                let _ = ready_tx.send(Err(e.to_string()));
                return;
            }
        };

        loop {
            match editor.readline("> ") {
                Ok(line) => {
                    let _ = editor.add_history_entry(line.as_str());
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
                Err(e) => {
                    tracing::error!("Readline error: {}", e);
                    break;
                }
            }
        }
    });

    ready_rx
        .recv()
        .map_err(|e| ClientError::Readline(e.to_string()))?
        .map_err(ClientError::Readline)?;
    Ok(rx)
}

fn report<T>(result: Result<T, ChannelError>) {
    if let Err(e) = result {
        println!("! {e}");
    }
}

async fn run_game(
    transport: Arc<dyn Transport>,
    username: &str,
    mut lines: UnboundedReceiver<String>,
) {
    let mut channel = GameChannel::mount(transport);
    report(channel.join(username).await);

    loop {
        tokio::select! {
            line = lines.recv() => {
                let Some(line) = line else { break };
                match parse_command(&line) {
                    Command::Quit => break,
                    Command::Join => report(channel.join(username).await),
                    Command::To(_) => println!("! /to is only available in chat mode"),
                    Command::Text(text) => {
                        channel.set_input(text);
                        report(channel.submit_input().await);
                    }
                }
            }
            update = channel.next_update() => {
                let Some(update) = update else { break };
                println!("{}", format_update(&update, username));
            }
        }
    }

    channel.unmount();
}

async fn run_chat(
    transport: Arc<dyn Transport>,
    username: &str,
    recipient: Option<String>,
    mut lines: UnboundedReceiver<String>,
) {
    let mut channel = ChatChannel::new(transport);
    if let Some(recipient) = recipient {
        channel.set_recipient(recipient);
    }
    report(channel.join(username).await);

    loop {
        tokio::select! {
            line = lines.recv() => {
                let Some(line) = line else { break };
                match parse_command(&line) {
                    Command::Quit => break,
                    Command::Join => report(channel.join(username).await),
                    Command::To(recipient) => {
                        println!("* now messaging '{recipient}'");
                        channel.set_recipient(recipient);
                    }
                    Command::Text(text) => {
                        channel.set_body(text);
                        report(channel.submit_input().await);
                    }
                }
            }
            update = channel.next_update() => {
                let Some(update) = update else { break };
                println!("{}", format_update(&update, username));
            }
        }
    }

    channel.unmount().await;
}
