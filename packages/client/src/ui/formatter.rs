use chrono::{DateTime, Local};

use crate::{channel::ChannelUpdate, domain::ChatMessage};

/// Render a channel update as one terminal line.
pub fn format_update(update: &ChannelUpdate, me: &str) -> String {
    match update {
        ChannelUpdate::GameEvent(line) => format!("* {line}"),
        ChannelUpdate::MessageReceived(message) => format_chat_message(message, me),
        ChannelUpdate::ConnectionLost { reason } => {
            format!("! Failed to connect to the server ({reason}). Type /join to try again.")
        }
    }
}

fn format_chat_message(message: &ChatMessage, me: &str) -> String {
    let sender = if message.sender == me {
        format!("{} (you)", message.sender)
    } else {
        message.sender.clone()
    };
    format!(
        "[{}] {} -> {}: {}",
        format_time(&message.sent_at),
        sender,
        message.recipient,
        message.body
    )
}

/// Local wall-clock time, or the raw value when it is not RFC 3339.
fn format_time(sent_at: &str) -> String {
    DateTime::parse_from_rfc3339(sent_at)
        .map(|time| time.with_timezone(&Local).format("%H:%M:%S").to_string())
        .unwrap_or_else(|_| sent_at.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(sender: &str, sent_at: &str) -> ChatMessage {
        ChatMessage {
            sender: sender.to_string(),
            recipient: "alice".to_string(),
            body: "hi".to_string(),
            sent_at: sent_at.to_string(),
        }
    }

    #[test]
    fn test_format_received_message() {
        // テスト項目: 他人からのメッセージが時刻・送信者・宛先・本文付きで表示される
        // given (前提条件):
        let update = ChannelUpdate::MessageReceived(message("bob", "2024-01-01T00:00:00Z"));

        // when (操作):
        let line = format_update(&update, "alice");

        // then (期待する結果):
        assert!(line.ends_with("] bob -> alice: hi"), "line: {line}");
        assert!(line.starts_with('['));
    }

    #[test]
    fn test_format_own_message_is_marked() {
        // テスト項目: 自分のメッセージには (you) が付き、不正な時刻はそのまま表示される
        // given (前提条件):
        let update = ChannelUpdate::MessageReceived(message("alice", "yesterday"));

        // when (操作):
        let line = format_update(&update, "alice");

        // then (期待する結果):
        assert_eq!(line, "[yesterday] alice (you) -> alice: hi");
    }

    #[test]
    fn test_format_connection_lost_prompts_rejoin() {
        // テスト項目: 接続エラー時は再参加を促すメッセージが表示される
        // when (操作):
        let line = format_update(
            &ChannelUpdate::ConnectionLost {
                reason: "refused".to_string(),
            },
            "alice",
        );

        // then (期待する結果):
        assert!(line.contains("refused"));
        assert!(line.contains("/join"));
    }

    #[test]
    fn test_format_game_event() {
        // テスト項目: ゲームイベントはそのまま表示される
        // when (操作):
        let line = format_update(&ChannelUpdate::GameEvent("bob: e7e5".to_string()), "alice");

        // then (期待する結果):
        assert_eq!(line, "* bob: e7e5");
    }
}
