//! Command-line configuration for the client binary.

use std::time::Duration;

use clap::{Parser, Subcommand};

use crate::infrastructure::transport::{
    DEFAULT_OUTBOUND_CAPACITY, DEFAULT_SERVER_URL, TransportOptions,
};

#[derive(Debug, Clone, Parser)]
#[command(name = "parley-client", version, about = "Realtime game and chat client")]
pub struct ClientArgs {
    /// Relay server WebSocket endpoint
    #[arg(long, default_value = DEFAULT_SERVER_URL)]
    pub server_url: String,

    /// Delay between reconnection attempts, in milliseconds
    #[arg(long, default_value_t = 1000)]
    pub reconnect_delay_ms: u64,

    /// Give up after this many consecutive failed attempts (retries forever when omitted)
    #[arg(long)]
    pub max_reconnect_attempts: Option<u32>,

    /// Frames held while disconnected before sends are refused
    #[arg(long, default_value_t = DEFAULT_OUTBOUND_CAPACITY)]
    pub outbound_capacity: usize,

    /// Name to join with
    #[arg(short, long)]
    pub username: String,

    #[command(subcommand)]
    pub mode: Mode,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Mode {
    /// Direct-message chat
    Chat {
        /// Initial recipient
        #[arg(long)]
        to: Option<String>,
    },
    /// Turn-based game
    Game,
}

impl ClientArgs {
    pub fn transport_options(&self) -> TransportOptions {
        TransportOptions {
            url: self.server_url.clone(),
            reconnect_delay: Duration::from_millis(self.reconnect_delay_ms),
            max_reconnect_attempts: self.max_reconnect_attempts,
            outbound_capacity: self.outbound_capacity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        // テスト項目: オプション未指定時はデフォルトの接続先と再接続設定が使われる
        // when (操作):
        let args = ClientArgs::parse_from(["parley-client", "--username", "alice", "game"]);

        // then (期待する結果):
        let options = args.transport_options();
        assert_eq!(options.url, "ws://127.0.0.1:3000/ws");
        assert_eq!(options.reconnect_delay, Duration::from_millis(1000));
        assert_eq!(options.max_reconnect_attempts, None);
        assert_eq!(options.outbound_capacity, 1024);
        assert_eq!(args.mode, Mode::Game);
    }

    #[test]
    fn test_chat_mode_with_overrides() {
        // テスト項目: 接続先・再接続設定・初期宛先を指定できる
        // when (操作):
        let args = ClientArgs::parse_from([
            "parley-client",
            "--server-url",
            "ws://chat.example:4000/ws",
            "--reconnect-delay-ms",
            "250",
            "--max-reconnect-attempts",
            "3",
            "--outbound-capacity",
            "16",
            "-u",
            "alice",
            "chat",
            "--to",
            "bob",
        ]);

        // then (期待する結果):
        let options = args.transport_options();
        assert_eq!(options.url, "ws://chat.example:4000/ws");
        assert_eq!(options.reconnect_delay, Duration::from_millis(250));
        assert_eq!(options.max_reconnect_attempts, Some(3));
        assert_eq!(options.outbound_capacity, 16);
        assert_eq!(
            args.mode,
            Mode::Chat {
                to: Some("bob".to_string())
            }
        );
    }
}
