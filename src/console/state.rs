//! Console state - session data plus in-flight request bookkeeping
//!
//! Pure data and decisions, no I/O: commands become network commands or
//! rendered output, network responses become rendered output plus session
//! mutations. The actor owns the channels.

use std::collections::HashMap;

use crate::error::ConsoleError;
use crate::messages::{ConsoleCommand, HttpRequest, NetworkCommand, NetworkResponse};
use crate::models::{Extract, Operation};
use crate::render::{apply_extract, Rendered};
use crate::session::SessionState;

/// What a handled command asks the actor to do next
#[derive(Debug)]
pub enum CommandOutcome {
    /// Send this to the network actor
    Dispatch(NetworkCommand),
    /// Print this; nothing was dispatched
    Output(Rendered),
    Quit,
}

/// Main console state
pub struct ConsoleState {
    pub session: SessionState,
    next_request_id: u64,
    /// Success handlers for in-flight requests, by request id
    pending: HashMap<u64, Extract>,
}

impl Default for ConsoleState {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleState {
    pub fn new() -> Self {
        ConsoleState {
            session: SessionState::new(),
            next_request_id: 1,
            pending: HashMap::new(),
        }
    }

    /// Generate a unique request ID
    fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    /// Record the endpoint and build the reference-data fetch.
    ///
    /// An empty endpoint is a configuration error and nothing is dispatched.
    /// The fetch itself is an ordinary dispatch; its extractor populates the
    /// type cache and its failure renders as a configuration problem without
    /// ending the session.
    pub fn configure(&mut self, endpoint: &str) -> Result<NetworkCommand, ConsoleError> {
        let endpoint = endpoint.trim();
        if endpoint.is_empty() {
            return Err(ConsoleError::Configuration(
                "missing the hostname and optional port for the endpoint (e.g., localhost:8080)"
                    .into(),
            ));
        }
        self.session.endpoint = Some(endpoint.to_string());
        self.dispatch(super::ops::blah_types())
    }

    /// Turn an operation into a network command.
    ///
    /// Fails synchronously with `MissingEndpoint` when unconfigured, so the
    /// caller reacts without waiting on I/O. Each dispatch is independent;
    /// no ordering is imposed across in-flight requests.
    pub fn dispatch(&mut self, op: Operation) -> Result<NetworkCommand, ConsoleError> {
        let endpoint = self
            .session
            .endpoint()
            .ok_or(ConsoleError::MissingEndpoint)?;
        let request = HttpRequest {
            method: op.method,
            url: op.url(endpoint),
            body: op.body,
        };
        let id = self.next_id();
        self.pending.insert(id, op.extract);
        tracing::debug!(id, url = %request.url, "Dispatching");
        Ok(NetworkCommand::Dispatch { id, request })
    }

    /// Route one completed request: render it and feed extracted fields
    /// back into the session. Failures never mutate the session. With
    /// concurrent requests, whichever response arrives last wins.
    pub fn handle_response(&mut self, response: NetworkResponse) -> Rendered {
        let extract = self.pending.remove(&response.id()).unwrap_or_default();
        match response {
            NetworkResponse::Success {
                status,
                body,
                time_ms,
                ..
            } => {
                let mut rendered = Rendered::success(&body, status, time_ms);
                match apply_extract(extract, &body, &mut self.session) {
                    Ok(notes) => rendered.notes = notes,
                    Err(err) => {
                        // Session untouched; report and stay interactive
                        rendered.ok = false;
                        rendered.notes = vec![err.to_string()];
                    }
                }
                rendered
            }
            NetworkResponse::Failure {
                status,
                status_text,
                body,
                time_ms,
                ..
            } => Rendered::failure(status, &status_text, &body, time_ms),
        }
    }

    /// Select the blah type used by classified operations; accepts a
    /// symbolic name from the cache or a raw id
    pub fn select_type(&mut self, name_or_id: &str) -> Rendered {
        let resolved = self
            .session
            .types
            .id_for(name_or_id)
            .map(str::to_string)
            .unwrap_or_else(|| name_or_id.to_string());
        self.session.selected_type_id = Some(resolved.clone());
        Rendered::message(format!("selected blah type {}", resolved))
    }

    /// Handle one parsed command
    pub fn handle_command(&mut self, command: ConsoleCommand) -> CommandOutcome {
        use super::ops;
        use ConsoleCommand::*;

        let session = &self.session;
        let result: Result<Operation, ConsoleError> = match &command {
            Quit => return CommandOutcome::Quit,
            Help => return CommandOutcome::Output(Rendered::message(help_text())),
            ShowSession => {
                return CommandOutcome::Output(Rendered::message(self.session.summary().join("\n")))
            }
            SelectType { name_or_id } => {
                let rendered = self.select_type(name_or_id);
                return CommandOutcome::Output(rendered);
            }
            Configure { endpoint } => {
                return match self.configure(endpoint) {
                    Ok(cmd) => CommandOutcome::Dispatch(cmd),
                    Err(err) => CommandOutcome::Output(Rendered::local_error(&err)),
                }
            }

            CreateUser { username, password } => ops::create_user(username, password),
            Login { username, password } => ops::login(username, password),
            LoginCheck => Ok(ops::login_check()),
            Logout => Ok(ops::logout()),
            CheckUsername { username } => ops::check_username(username),
            UserById { user_id } => ops::user_by_id(session, user_id.as_ref()),
            UserByName { username } => ops::user_by_name(username),
            UpdateUsername { username } => ops::update_username(username),
            UpdatePassword { password } => ops::update_password(password),
            Account => Ok(ops::account()),
            Profile => Ok(ops::profile()),
            RecoverUser { username, email } => ops::recover_user(username, email),
            VoteInfo { blah_id } => ops::vote_info(session, blah_id.as_ref()),
            Inbox { channel_id } => ops::inbox(session, channel_id.as_ref()),

            ChannelTypes => Ok(ops::channel_types()),
            ChannelTypeById { id } => ops::channel_type_by_id(session, id.as_ref()),
            CreateChannelType { name } => ops::create_channel_type(name),
            UpdateChannelType { id, name } => ops::update_channel_type(id, name),
            CreateChannel { name, description } => {
                ops::create_channel(session, name, description.as_ref())
            }
            UpdateChannel { id, name } => ops::update_channel(id, name),
            ChannelById { id } => ops::channel_by_id(session, id.as_ref()),
            JoinChannel { channel_id } => ops::join_channel(session, channel_id.as_ref()),

            CreateBlah { text, expiration } => {
                ops::create_blah(session, text, expiration.as_ref())
            }
            BlahById { id } => ops::blah_by_id(session, id.as_ref()),
            MyBlahs => ops::blahs_by_author(session),
            FetchBlahTypes => Ok(ops::blah_types()),
            Vote(vote) => ops::vote(session, vote),

            CreateComment { text, blah_id } => {
                ops::create_comment(session, text, blah_id.as_ref())
            }
            CommentById { id } => ops::comment_by_id(session, id.as_ref()),
            CommentAuthor { comment_id } => ops::comment_author(session, comment_id.as_ref()),

            BadgeAuthorities => Ok(ops::badge_authorities()),
            CreateBadge {
                authority_id,
                badge_type_id,
            } => ops::create_badge(session, authority_id.as_ref(), badge_type_id.as_ref()),
        };

        match result.and_then(|op| self.dispatch(op)) {
            Ok(cmd) => CommandOutcome::Dispatch(cmd),
            Err(err) => CommandOutcome::Output(Rendered::local_error(&err)),
        }
    }
}

fn help_text() -> String {
    "\
endpoint <host[:port]>            configure the endpoint and fetch blah types
session                           show everything remembered this session
type <name-or-id>                 select the blah type for create/vote
user create|login <name> <pwd>    create or log in a user
user login-check | logout         session checks
user check|find <name>            availability / lookup by name
user get [id]                     lookup by id
user set-name|set-password <v>    update credentials
user account | profile            account and profile data
user recover <name> <email>       account recovery
user vote-info [blahId]           per-user vote info for a blah
inbox [channelId]                 fetch a channel inbox
ctype list|get|create|update      channel types
channel create|get|update|join    channels
blah create <text> [expiration]   create a blah (classified by type)
blah get [id] | mine | types      fetch blahs / reference data
vote up|down [blahId]             simple vote
vote pre|post y|n|u [blahId]      prediction vote
vote info pre|post [blahId]       prediction vote info
comment create <text> [blahId]    comment on a blah
comment get [id] | author [id]    fetch comment / its author
badge authorities | create        badge authorities and badges
help | quit"
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HttpMethod;
    use crate::session::Identity;
    use serde_json::json;

    fn configured() -> ConsoleState {
        let mut state = ConsoleState::new();
        state.session.endpoint = Some("localhost:8080".into());
        state
    }

    fn success(id: u64, body: &str) -> NetworkResponse {
        NetworkResponse::Success {
            id,
            status: 200,
            body: body.to_string(),
            time_ms: 3,
        }
    }

    #[test]
    fn test_dispatch_without_endpoint_fails_synchronously() {
        let mut state = ConsoleState::new();
        let err = state
            .dispatch(super::super::ops::login_check())
            .unwrap_err();
        assert!(matches!(err, ConsoleError::MissingEndpoint));
    }

    #[test]
    fn test_configure_rejects_empty_endpoint() {
        let mut state = ConsoleState::new();
        assert!(matches!(
            state.configure("   "),
            Err(ConsoleError::Configuration(_))
        ));
        assert!(state.session.endpoint.is_none());
    }

    #[test]
    fn test_configure_dispatches_reference_data_fetch() {
        let mut state = ConsoleState::new();
        let NetworkCommand::Dispatch { id, request } = state.configure("localhost:8080").unwrap()
        else {
            panic!("expected a dispatch");
        };
        assert_eq!(request.method, HttpMethod::GET);
        assert_eq!(request.url, "http://localhost:8080/v2/blahs/types");

        let rendered = state.handle_response(success(
            id,
            r#"[{"_id":"T2","name":"predicts"},{"_id":"T3","name":"polls"}]"#,
        ));
        assert!(rendered.ok);
        assert_eq!(state.session.types.prediction_id(), Some("T2"));
        assert_eq!(state.session.types.poll_id(), Some("T3"));
    }

    #[test]
    fn test_reference_data_parse_failure_keeps_console_usable() {
        let mut state = ConsoleState::new();
        let NetworkCommand::Dispatch { id, .. } = state.configure("localhost:8080").unwrap()
        else {
            panic!("expected a dispatch");
        };
        let rendered = state.handle_response(success(id, "<html>busted</html>"));
        assert!(!rendered.ok);
        assert!(state.session.types.is_empty());
        // Subsequent manual operations still dispatch
        assert!(state.dispatch(super::super::ops::login_check()).is_ok());
    }

    #[test]
    fn test_failure_routes_to_error_renderer_and_leaves_session_alone() {
        let mut state = configured();
        let op = super::super::ops::user_by_id(&state.session, Some(&"U1".to_string())).unwrap();
        let NetworkCommand::Dispatch { id, .. } = state.dispatch(op).unwrap() else {
            panic!("expected a dispatch");
        };
        let rendered = state.handle_response(NetworkResponse::Failure {
            id,
            status: Some(404),
            status_text: "Not Found".into(),
            body: r#"{"error":"not found"}"#.into(),
            time_ms: 2,
        });
        assert!(!rendered.ok);
        assert_eq!(rendered.status, Some(404));
        assert!(rendered.body.contains("not found"));
        assert!(state.session.user.is_none());
    }

    #[test]
    fn test_unordered_completion_last_write_wins() {
        let deliver = |first: u64, second: u64| {
            let mut state = configured();
            let mut ids = Vec::new();
            for _ in 0..2 {
                let op = super::super::ops::user_by_name("alice").unwrap();
                let NetworkCommand::Dispatch { id, .. } = state.dispatch(op).unwrap() else {
                    panic!("expected a dispatch");
                };
                ids.push(id);
            }
            let bodies = [
                json!({ "_id": "U-first", "displayName": "alice" }),
                json!({ "_id": "U-second", "displayName": "alice" }),
            ];
            state.handle_response(success(ids[first as usize], &bodies[first as usize].to_string()));
            state.handle_response(success(ids[second as usize], &bodies[second as usize].to_string()));
            state.session.user.map(|u| u.user_id)
        };

        assert_eq!(deliver(0, 1).as_deref(), Some("U-second"));
        assert_eq!(deliver(1, 0).as_deref(), Some("U-first"));
    }

    #[test]
    fn test_exactly_one_handler_invocation_per_request() {
        let mut state = configured();
        let op = super::super::ops::user_by_name("alice").unwrap();
        let NetworkCommand::Dispatch { id, .. } = state.dispatch(op).unwrap() else {
            panic!("expected a dispatch");
        };
        state.handle_response(success(id, r#"{"_id":"U1","displayName":"alice"}"#));
        state.session.user = None;
        // A duplicate completion for the same id finds no pending extractor
        state.handle_response(success(id, r#"{"_id":"U2","displayName":"bob"}"#));
        assert!(state.session.user.is_none());
    }

    #[test]
    fn test_validation_blocks_dispatch_entirely() {
        let mut state = configured();
        let outcome = state.handle_command(ConsoleCommand::CreateUser {
            username: "".into(),
            password: "pw".into(),
        });
        assert!(matches!(outcome, CommandOutcome::Output(ref r) if !r.ok));
        // Nothing pending means nothing was dispatched
        assert!(state.pending.is_empty());
    }

    #[test]
    fn test_select_type_resolves_symbolic_names() {
        let mut state = configured();
        state.session.types = crate::session::TypeCache::from_records(vec![
            crate::models::BlahTypeRecord {
                id: "T2".into(),
                name: "predicts".into(),
            },
        ]);
        state.select_type("predicts");
        assert_eq!(state.session.selected_type_id.as_deref(), Some("T2"));
        state.select_type("raw-id");
        assert_eq!(state.session.selected_type_id.as_deref(), Some("raw-id"));
    }

    #[test]
    fn test_command_flow_create_blah_updates_session() {
        let mut state = configured();
        state.session.user = Some(Identity {
            user_id: "U1".into(),
            display_name: "alice".into(),
        });
        state.session.channel_id = Some("C1".into());
        state.session.selected_type_id = Some("T1".into());

        let outcome = state.handle_command(ConsoleCommand::CreateBlah {
            text: "hello".into(),
            expiration: None,
        });
        let CommandOutcome::Dispatch(NetworkCommand::Dispatch { id, request }) = outcome else {
            panic!("expected a dispatch");
        };
        assert_eq!(request.url, "http://localhost:8080/v2/blahs");
        assert_eq!(
            request.body.unwrap(),
            json!({ "authorId": "U1", "groupId": "C1", "typeId": "T1", "text": "hello" })
        );

        let rendered = state.handle_response(success(id, r#"{"_id":"B7"}"#));
        assert!(rendered.ok);
        assert_eq!(state.session.blah_id.as_deref(), Some("B7"));
    }
}
