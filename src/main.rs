//! Terminal client for the aircraft battle game.
//!
//! Connects to the game server, starts the game client actor, and feeds it
//! commands read from stdin, or lets the autopilot play when enabled.

use actix::{Actor, Addr};
use log::{error, info};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::{self, UnboundedReceiver};

use aircraft_combat::client::autopilot::Autopilot;
use aircraft_combat::client::channel::ChannelHandle;
use aircraft_combat::client::commands::{HELP, Input, parse_line};
use aircraft_combat::client::connection;
use aircraft_combat::client::machine::preview;
use aircraft_combat::client::messages::{GetSession, Notice};
use aircraft_combat::client::session::GameClient;
use aircraft_combat::config::client::ClientConfig;
use aircraft_combat::error::ClientError;
use aircraft_combat::game::systems::{render_preview, render_session};

#[actix::main]
async fn main() -> Result<(), ClientError> {
    // Initialize logger from environment variable.
    env_logger::init();

    let config = ClientConfig::from_env();
    info!("[Main] {:?}", config);

    let (handle, outbound) = ChannelHandle::new();
    let (notices_tx, notices) = mpsc::unbounded_channel();
    let mut client = GameClient::new(handle).with_notices(notices_tx);
    if config.autopilot {
        client = client.with_autopilot(Autopilot::new(config.seed, config.join_room.clone()));
    }
    let addr = client.start();
    actix::spawn(print_notices(notices));

    if !config.autopilot {
        println!("{HELP}");
        actix::spawn(read_commands(addr.clone()));
    }

    connection::run(&config.server_url, addr, outbound).await
}

/// Forward stdin lines to the game client until stdin closes.
async fn read_commands(addr: Addr<GameClient>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(err) => {
                error!("[Main] Failed to read stdin: {}", err);
                break;
            }
        };
        match parse_line(&line) {
            Ok(None) => {}
            Ok(Some(Input::Help)) => println!("{HELP}"),
            Ok(Some(Input::Show)) => match addr.send(GetSession).await {
                Ok(session) => println!("{}", render_session(&session)),
                Err(err) => error!("[Main] Game client unavailable: {}", err),
            },
            Ok(Some(Input::Preview(cell))) => match addr.send(GetSession).await {
                Ok(session) => match preview(&session, cell) {
                    Some((plane, valid)) => println!("{}", render_preview(&session, &plane, valid)),
                    None => println!("Nothing to preview: not placing, or the plane leaves the board"),
                },
                Err(err) => error!("[Main] Game client unavailable: {}", err),
            },
            Ok(Some(Input::Command(command))) => addr.do_send(command),
            Err(err) => eprintln!("{err}"),
        }
    }
}

/// Print server errors, peer loss and status changes as they happen.
async fn print_notices(mut notices: UnboundedReceiver<Notice>) {
    while let Some(notice) = notices.recv().await {
        match notice {
            Notice::ServerError(text) => eprintln!("Server error: {text}"),
            Notice::OpponentDisconnected => println!("Opponent disconnected!"),
            Notice::Status(text) => println!("{text}"),
        }
    }
}
