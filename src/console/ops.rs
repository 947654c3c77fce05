//! Operation constructors - the console's supported REST surface
//!
//! Each constructor validates its inputs and builds an `Operation`
//! descriptor; nothing here performs I/O. A missing or whitespace required
//! field is a validation error and blocks dispatch entirely. Where an id
//! argument is optional, the last-known session id fills in.
//!
//! Field names follow the backend's canonical payload schema: long names
//! (`displayName`, `authorId`, `groupId`, `typeId`, `text`, `pwd`) for
//! entity payloads, single-letter names (`e`, `t`, `v`, `I`, `T`, `U`,
//! `E`) where the backend defines them that way.

use serde_json::json;

use crate::classify::{classify, parse_expiration, BlahVariant};
use crate::constants::BLAH_TYPES_PATH;
use crate::error::ConsoleError;
use crate::messages::VoteCommand;
use crate::models::{Extract, HttpMethod, Operation};
use crate::session::SessionState;

// ========================
// Users
// ========================

pub fn create_user(username: &str, password: &str) -> Result<Operation, ConsoleError> {
    let username = require(username, "User Name")?;
    let password = require(password, "Password")?;
    Ok(Operation::new(HttpMethod::POST, "users")
        .with_body(json!({ "displayName": username, "pwd": password }))
        .with_extract(Extract::Identity))
}

pub fn login(username: &str, password: &str) -> Result<Operation, ConsoleError> {
    let username = require(username, "User Name")?;
    let password = require(password, "Password")?;
    Ok(Operation::new(HttpMethod::POST, "users/login")
        .with_body(json!({ "displayName": username, "pwd": password })))
}

pub fn login_check() -> Operation {
    Operation::new(HttpMethod::GET, "users/login/check")
}

pub fn logout() -> Operation {
    Operation::new(HttpMethod::POST, "users/logout")
}

pub fn check_username(username: &str) -> Result<Operation, ConsoleError> {
    let username = require(username, "User Name")?;
    Ok(Operation::new(
        HttpMethod::GET,
        format!("users/check/username/{}", username),
    ))
}

pub fn user_by_id(
    session: &SessionState,
    user_id: Option<&String>,
) -> Result<Operation, ConsoleError> {
    let id = resolve(user_id, session.user.as_ref().map(|u| u.user_id.as_str()), "User Id")?;
    Ok(Operation::new(HttpMethod::GET, format!("users/{}", id)).with_extract(Extract::Identity))
}

pub fn user_by_name(username: &str) -> Result<Operation, ConsoleError> {
    let username = require(username, "User Name")?;
    Ok(Operation::new(HttpMethod::GET, format!("users/{}?u=true", username))
        .with_extract(Extract::Identity))
}

pub fn update_username(username: &str) -> Result<Operation, ConsoleError> {
    let username = require(username, "User Name")?;
    Ok(Operation::new(HttpMethod::PUT, "users/update/username")
        .with_body(json!({ "displayName": username })))
}

pub fn update_password(password: &str) -> Result<Operation, ConsoleError> {
    let password = require(password, "Password")?;
    Ok(Operation::new(HttpMethod::PUT, "users/update/password")
        .with_body(json!({ "pwd": password })))
}

pub fn account() -> Operation {
    Operation::new(HttpMethod::GET, "users/account")
}

pub fn profile() -> Operation {
    Operation::new(HttpMethod::GET, "users/profile/info")
}

pub fn recover_user(username: &str, email: &str) -> Result<Operation, ConsoleError> {
    let username = require(username, "User Name")?;
    let email = require(email, "Email Address")?;
    Ok(Operation::new(HttpMethod::POST, "users/recover/user")
        .with_body(json!({ "U": username, "E": email })))
}

/// Per-user vote info for a blah
pub fn vote_info(
    session: &SessionState,
    blah_id: Option<&String>,
) -> Result<Operation, ConsoleError> {
    let id = resolve(blah_id, session.blah_id.as_deref(), "Blah Id")?;
    Ok(Operation::new(HttpMethod::GET, format!("users/info/{}", id)))
}

pub fn inbox(
    session: &SessionState,
    channel_id: Option<&String>,
) -> Result<Operation, ConsoleError> {
    let id = resolve(channel_id, session.channel_id.as_deref(), "Channel Id")?;
    Ok(Operation::new(HttpMethod::GET, format!("users/inbox?groupId={}", id)))
}

// ========================
// Channel types and channels
// ========================

pub fn channel_types() -> Operation {
    Operation::new(HttpMethod::GET, "groupTypes")
}

pub fn channel_type_by_id(
    session: &SessionState,
    id: Option<&String>,
) -> Result<Operation, ConsoleError> {
    let id = resolve(id, session.channel_type_id.as_deref(), "Channel Type Id")?;
    Ok(Operation::new(HttpMethod::GET, format!("groupTypes/{}", id))
        .with_extract(Extract::ChannelType))
}

pub fn create_channel_type(name: &str) -> Result<Operation, ConsoleError> {
    let name = require(name, "Channel Type Name")?;
    Ok(Operation::new(HttpMethod::POST, "groupTypes")
        .with_body(json!({ "displayName": name }))
        .with_extract(Extract::ChannelType))
}

pub fn update_channel_type(id: &str, name: &str) -> Result<Operation, ConsoleError> {
    let id = require(id, "Channel Type Id")?;
    let name = require(name, "Channel Type Name")?;
    Ok(Operation::new(HttpMethod::PUT, format!("groupTypes/{}", id))
        .with_body(json!({ "displayName": name })))
}

pub fn create_channel(
    session: &SessionState,
    name: &str,
    description: Option<&String>,
) -> Result<Operation, ConsoleError> {
    let name = require(name, "Channel Name")?;
    let type_id = session
        .channel_type_id
        .as_deref()
        .ok_or_else(|| ConsoleError::validation("missing Channel Type Id (use: ctype get <id>)"))?;
    let mut body = json!({ "groupTypeId": type_id, "displayName": name });
    if let Some(description) = description {
        body["description"] = json!(description);
    }
    Ok(Operation::new(HttpMethod::POST, "groups")
        .with_body(body)
        .with_extract(Extract::Channel))
}

pub fn update_channel(id: &str, name: &str) -> Result<Operation, ConsoleError> {
    let id = require(id, "Channel Id")?;
    let name = require(name, "Channel Name")?;
    Ok(Operation::new(HttpMethod::PUT, format!("groups/{}", id))
        .with_body(json!({ "displayName": name })))
}

pub fn channel_by_id(
    session: &SessionState,
    id: Option<&String>,
) -> Result<Operation, ConsoleError> {
    let id = resolve(id, session.channel_id.as_deref(), "Channel Id")?;
    Ok(Operation::new(HttpMethod::GET, format!("groups/{}", id)).with_extract(Extract::Channel))
}

pub fn join_channel(
    session: &SessionState,
    channel_id: Option<&String>,
) -> Result<Operation, ConsoleError> {
    let user_id = resolve(None, session.user.as_ref().map(|u| u.user_id.as_str()), "User Id")?;
    let channel_id = resolve(channel_id, session.channel_id.as_deref(), "Channel Id")?;
    Ok(Operation::new(HttpMethod::POST, "userGroups")
        .with_body(json!({ "userId": user_id, "groupId": channel_id })))
}

// ========================
// Blahs
// ========================

/// Reference-data fetch; its extractor populates the type cache
pub fn blah_types() -> Operation {
    Operation::new(HttpMethod::GET, BLAH_TYPES_PATH).with_extract(Extract::BlahTypes)
}

/// Create a blah, classified by the selected type id.
///
/// Simple blahs send `{authorId, groupId, typeId, text}`; predictions add
/// the expiration date in field `e`; polls are a declared stub.
pub fn create_blah(
    session: &SessionState,
    text: &str,
    expiration: Option<&String>,
) -> Result<Operation, ConsoleError> {
    let text = require(text, "Blah Text")?;
    let author_id = resolve(None, session.user.as_ref().map(|u| u.user_id.as_str()), "User Id")?;
    let channel_id = resolve(None, session.channel_id.as_deref(), "Channel Id")?;
    let type_id = resolve(None, session.selected_type_id.as_deref(), "Blah Type Id")?;

    let mut body = json!({
        "authorId": author_id,
        "groupId": channel_id,
        "typeId": type_id,
        "text": text,
    });

    match classify(&type_id, &session.types) {
        BlahVariant::Simple => {}
        BlahVariant::Prediction => {
            let expires = parse_expiration(expiration.map(String::as_str).unwrap_or(""))?;
            body["e"] = json!(expires);
        }
        BlahVariant::Poll => {
            return Err(ConsoleError::NotImplemented("poll blah creation"));
        }
    }

    Ok(Operation::new(HttpMethod::POST, "blahs")
        .with_body(body)
        .with_extract(Extract::Blah))
}

pub fn blah_by_id(
    session: &SessionState,
    id: Option<&String>,
) -> Result<Operation, ConsoleError> {
    let id = resolve(id, session.blah_id.as_deref(), "Blah Id")?;
    Ok(Operation::new(HttpMethod::GET, format!("blahs/{}", id)).with_extract(Extract::Blah))
}

pub fn blahs_by_author(session: &SessionState) -> Result<Operation, ConsoleError> {
    let user_id = resolve(None, session.user.as_ref().map(|u| u.user_id.as_str()), "User Id")?;
    Ok(Operation::new(HttpMethod::GET, format!("blahs?authorId={}", user_id)))
}

/// Vote on a blah, classified by the selected type id.
///
/// The vote's shape must match the variant: up/down for simple blahs,
/// phase + choice codes for predictions. Poll voting is a declared stub.
pub fn vote(session: &SessionState, command: &VoteCommand) -> Result<Operation, ConsoleError> {
    let type_id = session.selected_type_id.as_deref().unwrap_or("");
    match classify(type_id, &session.types) {
        BlahVariant::Simple => match command {
            VoteCommand::Up { blah_id } => simple_vote(session, blah_id.as_ref(), 1),
            VoteCommand::Down { blah_id } => simple_vote(session, blah_id.as_ref(), -1),
            VoteCommand::Prediction { .. } => Err(ConsoleError::validation(
                "selected type is not a prediction (use: vote up|down)",
            )),
            VoteCommand::Info { phase, blah_id } => prediction_vote_info(session, phase, blah_id.as_ref()),
        },
        BlahVariant::Prediction => match command {
            VoteCommand::Prediction {
                phase,
                choice,
                blah_id,
            } => prediction_vote(session, phase, choice, blah_id.as_ref()),
            VoteCommand::Info { phase, blah_id } => prediction_vote_info(session, phase, blah_id.as_ref()),
            _ => Err(ConsoleError::validation(
                "prediction blahs take: vote pre|post y|n|u [blahId]",
            )),
        },
        BlahVariant::Poll => Err(ConsoleError::NotImplemented("poll voting")),
    }
}

fn simple_vote(
    session: &SessionState,
    blah_id: Option<&String>,
    value: i64,
) -> Result<Operation, ConsoleError> {
    let id = resolve(blah_id, session.blah_id.as_deref(), "Blah Id")?;
    Ok(Operation::new(HttpMethod::PUT, format!("blahs/{}", id)).with_body(json!({ "vote": value })))
}

fn prediction_vote(
    session: &SessionState,
    phase: &str,
    choice: &str,
    blah_id: Option<&String>,
) -> Result<Operation, ConsoleError> {
    let id = resolve(blah_id, session.blah_id.as_deref(), "Blah Id")?;
    let phase = vote_phase(phase)?;
    let choice = vote_choice(choice)?;
    Ok(Operation::new(HttpMethod::PUT, format!("blahs/{}/predicts", id))
        .with_body(json!({ "t": phase, "v": choice })))
}

fn prediction_vote_info(
    session: &SessionState,
    phase: &str,
    blah_id: Option<&String>,
) -> Result<Operation, ConsoleError> {
    let id = resolve(blah_id, session.blah_id.as_deref(), "Blah Id")?;
    let phase = vote_phase(phase)?;
    Ok(Operation::new(
        HttpMethod::GET,
        format!("blahs/{}/predicts?t={}", id, phase),
    ))
}

/// Pre-expiration votes are agree/disagree, post-expiration votes judge
/// the prediction's resolution
fn vote_phase(phase: &str) -> Result<&str, ConsoleError> {
    match phase {
        "pre" | "post" => Ok(phase),
        other => Err(ConsoleError::Validation(format!(
            "vote phase must be pre or post, got: {}",
            other
        ))),
    }
}

fn vote_choice(choice: &str) -> Result<&str, ConsoleError> {
    match choice {
        "y" | "n" | "u" => Ok(choice),
        other => Err(ConsoleError::Validation(format!(
            "vote choice must be y, n or u, got: {}",
            other
        ))),
    }
}

// ========================
// Comments
// ========================

pub fn create_comment(
    session: &SessionState,
    text: &str,
    blah_id: Option<&String>,
) -> Result<Operation, ConsoleError> {
    let text = require(text, "Comment Text")?;
    let blah_id = resolve(blah_id, session.blah_id.as_deref(), "Blah Id")?;
    Ok(Operation::new(HttpMethod::POST, "comments")
        .with_body(json!({ "blahId": blah_id, "text": text }))
        .with_extract(Extract::Comment))
}

pub fn comment_by_id(
    session: &SessionState,
    id: Option<&String>,
) -> Result<Operation, ConsoleError> {
    let id = resolve(id, session.comment_id.as_deref(), "Comment Id")?;
    Ok(Operation::new(HttpMethod::GET, format!("comments/{}", id)))
}

pub fn comment_author(
    session: &SessionState,
    comment_id: Option<&String>,
) -> Result<Operation, ConsoleError> {
    let id = resolve(comment_id, session.comment_id.as_deref(), "Comment Id")?;
    Ok(Operation::new(HttpMethod::POST, "comments/author").with_body(json!({ "I": id })))
}

// ========================
// Badges
// ========================

pub fn badge_authorities() -> Operation {
    Operation::new(HttpMethod::GET, "badges/authorities").with_extract(Extract::BadgeAuthority)
}

pub fn create_badge(
    session: &SessionState,
    authority_id: Option<&String>,
    badge_type_id: Option<&String>,
) -> Result<Operation, ConsoleError> {
    let authority = resolve(
        authority_id,
        session.badge_authority_id.as_deref(),
        "Badge Authority Id",
    )?;
    let mut body = json!({ "I": authority });
    if let Some(badge_type) = badge_type_id {
        body["T"] = json!(badge_type);
    }
    Ok(Operation::new(HttpMethod::POST, "badges").with_body(body))
}

// ========================
// Validation helpers
// ========================

fn require(value: &str, what: &str) -> Result<String, ConsoleError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ConsoleError::Validation(format!("missing {}", what)))
    } else {
        Ok(trimmed.to_string())
    }
}

/// Prefer an explicit argument, fall back to the remembered session value
fn resolve(
    explicit: Option<&String>,
    session_value: Option<&str>,
    what: &str,
) -> Result<String, ConsoleError> {
    match explicit.map(String::as_str).or(session_value) {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(ConsoleError::Validation(format!("missing {}", what))),
    }
}
