//! Console actor - message loop processing commands and network responses

use tokio::sync::mpsc;

use crate::console::state::{CommandOutcome, ConsoleState};
use crate::messages::{ConsoleCommand, NetworkCommand, NetworkResponse};
use crate::render::Rendered;

/// Console actor that processes parsed commands and network responses
pub struct ConsoleActor {
    state: ConsoleState,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    render_tx: mpsc::UnboundedSender<Rendered>,
}

impl ConsoleActor {
    pub fn new(
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        render_tx: mpsc::UnboundedSender<Rendered>,
    ) -> Self {
        ConsoleActor {
            state: ConsoleState::new(),
            network_tx,
            render_tx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut cmd_rx: mpsc::UnboundedReceiver<ConsoleCommand>,
        mut net_rx: mpsc::UnboundedReceiver<NetworkResponse>,
    ) {
        loop {
            tokio::select! {
                Some(command) = cmd_rx.recv() => {
                    match self.state.handle_command(command) {
                        CommandOutcome::Dispatch(cmd) => {
                            let _ = self.network_tx.send(cmd);
                        }
                        CommandOutcome::Output(rendered) => {
                            let _ = self.render_tx.send(rendered);
                        }
                        CommandOutcome::Quit => {
                            let _ = self.network_tx.send(NetworkCommand::Shutdown);
                            break;
                        }
                    }
                }
                Some(response) = net_rx.recv() => {
                    let rendered = self.state.handle_response(response);
                    let _ = self.render_tx.send(rendered);
                }
                else => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::NetworkResponse;

    #[tokio::test]
    async fn test_quit_shuts_down_network_and_exits() {
        let (net_tx, mut net_cmd_rx) = mpsc::unbounded_channel();
        let (render_tx, _render_rx) = mpsc::unbounded_channel();
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (_resp_tx, resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();

        let actor = ConsoleActor::new(net_tx, render_tx);
        let handle = tokio::spawn(actor.run(cmd_rx, resp_rx));

        cmd_tx.send(ConsoleCommand::Quit).unwrap();
        handle.await.unwrap();
        assert!(matches!(
            net_cmd_rx.recv().await,
            Some(NetworkCommand::Shutdown)
        ));
    }

    #[tokio::test]
    async fn test_local_validation_error_renders_without_dispatch() {
        let (net_tx, mut net_cmd_rx) = mpsc::unbounded_channel();
        let (render_tx, mut render_rx) = mpsc::unbounded_channel();
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (_resp_tx, resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();

        let actor = ConsoleActor::new(net_tx, render_tx);
        let handle = tokio::spawn(actor.run(cmd_rx, resp_rx));

        // No endpoint configured: synchronous MissingEndpoint, rendered locally
        cmd_tx.send(ConsoleCommand::LoginCheck).unwrap();
        let rendered = render_rx.recv().await.unwrap();
        assert!(!rendered.ok);
        assert!(rendered.body.contains("endpoint"));

        cmd_tx.send(ConsoleCommand::Quit).unwrap();
        handle.await.unwrap();
        assert!(matches!(
            net_cmd_rx.recv().await,
            Some(NetworkCommand::Shutdown)
        ));
    }
}
