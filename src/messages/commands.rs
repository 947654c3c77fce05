//! Console commands - parsed from interactive input lines
//!
//! Parsing stops at shape only: arity and token splitting. Field-level
//! validation (empty values, dates, vote codes) belongs to the operation
//! constructors so it applies no matter where a command came from.

use crate::error::ConsoleError;

/// One parsed console action
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleCommand {
    /// Record the endpoint and fetch reference data
    Configure { endpoint: String },
    ShowSession,
    Help,
    Quit,
    /// Select the blah type used by classified operations
    SelectType { name_or_id: String },

    CreateUser { username: String, password: String },
    Login { username: String, password: String },
    LoginCheck,
    Logout,
    CheckUsername { username: String },
    UserById { user_id: Option<String> },
    UserByName { username: String },
    UpdateUsername { username: String },
    UpdatePassword { password: String },
    Account,
    Profile,
    RecoverUser { username: String, email: String },
    VoteInfo { blah_id: Option<String> },
    Inbox { channel_id: Option<String> },

    ChannelTypes,
    ChannelTypeById { id: Option<String> },
    CreateChannelType { name: String },
    UpdateChannelType { id: String, name: String },
    CreateChannel { name: String, description: Option<String> },
    UpdateChannel { id: String, name: String },
    ChannelById { id: Option<String> },
    JoinChannel { channel_id: Option<String> },

    CreateBlah { text: String, expiration: Option<String> },
    BlahById { id: Option<String> },
    MyBlahs,
    FetchBlahTypes,
    Vote(VoteCommand),

    CreateComment { text: String, blah_id: Option<String> },
    CommentById { id: Option<String> },
    CommentAuthor { comment_id: Option<String> },

    BadgeAuthorities,
    CreateBadge {
        authority_id: Option<String>,
        badge_type_id: Option<String>,
    },
}

/// Vote sub-commands; which shape is legal depends on the selected blah type
#[derive(Debug, Clone, PartialEq)]
pub enum VoteCommand {
    Up { blah_id: Option<String> },
    Down { blah_id: Option<String> },
    Prediction {
        phase: String,
        choice: String,
        blah_id: Option<String>,
    },
    Info { phase: String, blah_id: Option<String> },
}

/// Parse one input line into a command
pub fn parse_command(line: &str) -> Result<ConsoleCommand, ConsoleError> {
    let tokens = tokenize(line);
    let mut it = tokens.into_iter();
    let Some(head) = it.next() else {
        return Err(ConsoleError::validation("empty command (try: help)"));
    };
    let rest: Vec<String> = it.collect();

    match head.as_str() {
        "endpoint" => Ok(ConsoleCommand::Configure {
            endpoint: arg(&rest, 0, "endpoint <host[:port]>")?,
        }),
        "session" => Ok(ConsoleCommand::ShowSession),
        "help" => Ok(ConsoleCommand::Help),
        "quit" | "exit" => Ok(ConsoleCommand::Quit),
        "type" => Ok(ConsoleCommand::SelectType {
            name_or_id: arg(&rest, 0, "type <name-or-id>")?,
        }),
        "inbox" => Ok(ConsoleCommand::Inbox {
            channel_id: rest.first().cloned(),
        }),
        "user" => parse_user(&rest),
        "ctype" => parse_channel_type(&rest),
        "channel" => parse_channel(&rest),
        "blah" => parse_blah(&rest),
        "vote" => parse_vote(&rest).map(ConsoleCommand::Vote),
        "comment" => parse_comment(&rest),
        "badge" => parse_badge(&rest),
        other => Err(ConsoleError::Validation(format!(
            "unknown command: {} (try: help)",
            other
        ))),
    }
}

fn parse_user(rest: &[String]) -> Result<ConsoleCommand, ConsoleError> {
    match sub(rest, "user")? {
        "create" => Ok(ConsoleCommand::CreateUser {
            username: arg(rest, 1, "user create <name> <password>")?,
            password: arg(rest, 2, "user create <name> <password>")?,
        }),
        "login" => Ok(ConsoleCommand::Login {
            username: arg(rest, 1, "user login <name> <password>")?,
            password: arg(rest, 2, "user login <name> <password>")?,
        }),
        "login-check" => Ok(ConsoleCommand::LoginCheck),
        "logout" => Ok(ConsoleCommand::Logout),
        "check" => Ok(ConsoleCommand::CheckUsername {
            username: arg(rest, 1, "user check <name>")?,
        }),
        "get" => Ok(ConsoleCommand::UserById {
            user_id: rest.get(1).cloned(),
        }),
        "find" => Ok(ConsoleCommand::UserByName {
            username: arg(rest, 1, "user find <name>")?,
        }),
        "set-name" => Ok(ConsoleCommand::UpdateUsername {
            username: arg(rest, 1, "user set-name <new-name>")?,
        }),
        "set-password" => Ok(ConsoleCommand::UpdatePassword {
            password: arg(rest, 1, "user set-password <new-password>")?,
        }),
        "account" => Ok(ConsoleCommand::Account),
        "profile" => Ok(ConsoleCommand::Profile),
        "recover" => Ok(ConsoleCommand::RecoverUser {
            username: arg(rest, 1, "user recover <name> <email>")?,
            email: arg(rest, 2, "user recover <name> <email>")?,
        }),
        "vote-info" => Ok(ConsoleCommand::VoteInfo {
            blah_id: rest.get(1).cloned(),
        }),
        other => Err(unknown_sub("user", other)),
    }
}

fn parse_channel_type(rest: &[String]) -> Result<ConsoleCommand, ConsoleError> {
    match sub(rest, "ctype")? {
        "list" => Ok(ConsoleCommand::ChannelTypes),
        "get" => Ok(ConsoleCommand::ChannelTypeById {
            id: rest.get(1).cloned(),
        }),
        "create" => Ok(ConsoleCommand::CreateChannelType {
            name: arg(rest, 1, "ctype create <name>")?,
        }),
        "update" => Ok(ConsoleCommand::UpdateChannelType {
            id: arg(rest, 1, "ctype update <id> <name>")?,
            name: arg(rest, 2, "ctype update <id> <name>")?,
        }),
        other => Err(unknown_sub("ctype", other)),
    }
}

fn parse_channel(rest: &[String]) -> Result<ConsoleCommand, ConsoleError> {
    match sub(rest, "channel")? {
        "create" => Ok(ConsoleCommand::CreateChannel {
            name: arg(rest, 1, "channel create <name> [description]")?,
            description: rest.get(2).cloned(),
        }),
        "get" => Ok(ConsoleCommand::ChannelById {
            id: rest.get(1).cloned(),
        }),
        "update" => Ok(ConsoleCommand::UpdateChannel {
            id: arg(rest, 1, "channel update <id> <name>")?,
            name: arg(rest, 2, "channel update <id> <name>")?,
        }),
        "join" => Ok(ConsoleCommand::JoinChannel {
            channel_id: rest.get(1).cloned(),
        }),
        other => Err(unknown_sub("channel", other)),
    }
}

fn parse_blah(rest: &[String]) -> Result<ConsoleCommand, ConsoleError> {
    match sub(rest, "blah")? {
        "create" => Ok(ConsoleCommand::CreateBlah {
            text: arg(rest, 1, "blah create <text> [expiration]")?,
            expiration: rest.get(2).cloned(),
        }),
        "get" => Ok(ConsoleCommand::BlahById {
            id: rest.get(1).cloned(),
        }),
        "mine" => Ok(ConsoleCommand::MyBlahs),
        "types" => Ok(ConsoleCommand::FetchBlahTypes),
        other => Err(unknown_sub("blah", other)),
    }
}

fn parse_vote(rest: &[String]) -> Result<VoteCommand, ConsoleError> {
    match sub(rest, "vote")? {
        "up" => Ok(VoteCommand::Up {
            blah_id: rest.get(1).cloned(),
        }),
        "down" => Ok(VoteCommand::Down {
            blah_id: rest.get(1).cloned(),
        }),
        "pre" | "post" => Ok(VoteCommand::Prediction {
            phase: rest[0].clone(),
            choice: arg(rest, 1, "vote pre|post y|n|u [blahId]")?,
            blah_id: rest.get(2).cloned(),
        }),
        "info" => Ok(VoteCommand::Info {
            phase: arg(rest, 1, "vote info pre|post [blahId]")?,
            blah_id: rest.get(2).cloned(),
        }),
        other => Err(unknown_sub("vote", other)),
    }
}

fn parse_comment(rest: &[String]) -> Result<ConsoleCommand, ConsoleError> {
    match sub(rest, "comment")? {
        "create" => Ok(ConsoleCommand::CreateComment {
            text: arg(rest, 1, "comment create <text> [blahId]")?,
            blah_id: rest.get(2).cloned(),
        }),
        "get" => Ok(ConsoleCommand::CommentById {
            id: rest.get(1).cloned(),
        }),
        "author" => Ok(ConsoleCommand::CommentAuthor {
            comment_id: rest.get(1).cloned(),
        }),
        other => Err(unknown_sub("comment", other)),
    }
}

fn parse_badge(rest: &[String]) -> Result<ConsoleCommand, ConsoleError> {
    match sub(rest, "badge")? {
        "authorities" => Ok(ConsoleCommand::BadgeAuthorities),
        "create" => Ok(ConsoleCommand::CreateBadge {
            authority_id: rest.get(1).cloned(),
            badge_type_id: rest.get(2).cloned(),
        }),
        other => Err(unknown_sub("badge", other)),
    }
}

fn sub<'a>(rest: &'a [String], group: &str) -> Result<&'a str, ConsoleError> {
    rest.first()
        .map(String::as_str)
        .ok_or_else(|| ConsoleError::Validation(format!("{} needs a sub-command (try: help)", group)))
}

fn arg(rest: &[String], index: usize, usage: &str) -> Result<String, ConsoleError> {
    rest.get(index)
        .cloned()
        .ok_or_else(|| ConsoleError::Validation(format!("usage: {}", usage)))
}

fn unknown_sub(group: &str, sub: &str) -> ConsoleError {
    ConsoleError::Validation(format!("unknown {} sub-command: {}", group, sub))
}

/// Tokenize an input line, respecting double and single quotes
fn tokenize(input: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_single_quote = false;
    let mut in_double_quote = false;

    for c in input.chars() {
        match c {
            '\'' if !in_double_quote => {
                in_single_quote = !in_single_quote;
            }
            '"' if !in_single_quote => {
                in_double_quote = !in_double_quote;
            }
            ' ' | '\t' if !in_single_quote && !in_double_quote => {
                if !current.is_empty() {
                    tokens.push(current.clone());
                    current.clear();
                }
            }
            _ => {
                current.push(c);
            }
        }
    }

    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_configure() {
        assert_eq!(
            parse_command("endpoint localhost:8080").unwrap(),
            ConsoleCommand::Configure {
                endpoint: "localhost:8080".into()
            }
        );
    }

    #[test]
    fn test_parse_quoted_blah_text() {
        assert_eq!(
            parse_command(r#"blah create "it will rain tomorrow" 2026-09-01"#).unwrap(),
            ConsoleCommand::CreateBlah {
                text: "it will rain tomorrow".into(),
                expiration: Some("2026-09-01".into()),
            }
        );
    }

    #[test]
    fn test_parse_vote_variants() {
        assert_eq!(
            parse_command("vote up").unwrap(),
            ConsoleCommand::Vote(VoteCommand::Up { blah_id: None })
        );
        assert_eq!(
            parse_command("vote pre y B1").unwrap(),
            ConsoleCommand::Vote(VoteCommand::Prediction {
                phase: "pre".into(),
                choice: "y".into(),
                blah_id: Some("B1".into()),
            })
        );
    }

    #[test]
    fn test_missing_argument_is_validation_error() {
        assert!(matches!(
            parse_command("user create alice"),
            Err(ConsoleError::Validation(_))
        ));
    }

    #[test]
    fn test_unknown_command_is_validation_error() {
        assert!(matches!(
            parse_command("frobnicate"),
            Err(ConsoleError::Validation(_))
        ));
    }
}
