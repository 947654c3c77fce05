//! Blah Console - actor-based REST console binary
//!
//! Architecture:
//! - Input Layer - line-oriented stdin reading
//! - Console Layer - central state machine processing commands
//! - Network Layer (Tokio) - async HTTP execution

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use blah_console::constants::LOG_FILE;
use blah_console::messages::{ConsoleCommand, NetworkCommand, NetworkResponse};
use blah_console::render::Rendered;
use blah_console::{parse_command, ConsoleActor, NetworkActor};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging to file
    let file_appender = tracing_appender::rolling::never(".", LOG_FILE);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    // Create channels
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<ConsoleCommand>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, render_rx) = mpsc::unbounded_channel::<Rendered>();

    // Spawn network actor
    let network_actor = NetworkActor::new(net_resp_tx);
    tokio::spawn(network_actor.run(net_cmd_rx));

    // Spawn console actor
    let console_actor = ConsoleActor::new(net_cmd_tx, render_tx);
    let console_handle = tokio::spawn(console_actor.run(cmd_rx, net_resp_rx));

    // Print completed responses as they arrive, in whatever order
    tokio::spawn(print_loop(render_rx));

    println!("blah-console {} - type 'help' for commands, 'quit' to exit", blah_console::constants::APP_VERSION);
    run_input_loop(cmd_tx).await;

    let _ = console_handle.await;
    Ok(())
}

/// Read stdin lines, parse them, and feed the console actor
async fn run_input_loop(cmd_tx: mpsc::UnboundedSender<ConsoleCommand>) {
    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            // EOF or read error ends the session
            _ => {
                let _ = cmd_tx.send(ConsoleCommand::Quit);
                return;
            }
        };
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match parse_command(trimmed) {
            Ok(ConsoleCommand::Quit) => {
                let _ = cmd_tx.send(ConsoleCommand::Quit);
                return;
            }
            Ok(command) => {
                if cmd_tx.send(command).is_err() {
                    return;
                }
            }
            Err(err) => println!("{}", err),
        }
    }
}

/// Print rendered output from the console actor
async fn print_loop(mut render_rx: mpsc::UnboundedReceiver<Rendered>) {
    while let Some(rendered) = render_rx.recv().await {
        match rendered.status {
            Some(status) => {
                let tag = if rendered.ok { "ok" } else { "error" };
                println!("-- {} {} ({} ms)", tag, status, rendered.time_ms);
            }
            None if !rendered.ok => println!("-- error"),
            None => {}
        }
        if !rendered.body.is_empty() {
            println!("{}", rendered.body);
        }
        for note in &rendered.notes {
            println!("   {}", note);
        }
    }
}
