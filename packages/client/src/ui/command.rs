/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    /// Join again with the configured username
    Join,
    /// Change the chat recipient
    To(String),
    /// A move (game) or message body (chat)
    Text(String),
}

pub fn parse_command(line: &str) -> Command {
    match line.trim() {
        "/quit" | "/exit" => Command::Quit,
        "/join" => Command::Join,
        trimmed => match trimmed.strip_prefix("/to ") {
            Some(recipient) => Command::To(recipient.trim().to_string()),
            None => Command::Text(line.to_string()),
        },
    }
}
