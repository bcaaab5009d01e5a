use actix::prelude::*;
use actix::MessageResult;
use log::{debug, info, warn};
use tokio::sync::mpsc::UnboundedSender;

use crate::client::autopilot::Autopilot;
use crate::client::channel::Outbound;
use crate::client::machine::{apply_command, apply_event, apply_link};
use crate::client::messages::{ClientAction, GetSession, LinkStatus, Notice, ServerEvent, UserCommand};
use crate::game::state::Session;
use crate::game::systems::status_line;

/// Commands the autopilot may chain after a single transition.
const AUTOPILOT_STEPS: usize = 32;

/// Owns the session and applies every event and command to it in arrival
/// order, one at a time.
pub struct GameClient {
    session: Session,
    outbound: Box<dyn Outbound>,
    autopilot: Option<Autopilot>,
    notices: Option<UnboundedSender<Notice>>,
}

impl Actor for GameClient {
    type Context = Context<Self>;

    fn started(&mut self, _: &mut Self::Context) {
        info!("[GameClient {}] Started", self.session.connection_id);
    }
}

impl GameClient {
    pub fn new(outbound: impl Outbound + 'static) -> Self {
        Self {
            session: Session::default(),
            outbound: Box::new(outbound),
            autopilot: None,
            notices: None,
        }
    }

    /// Deliver notices and status changes to the front-end.
    pub fn with_notices(mut self, notices: UnboundedSender<Notice>) -> Self {
        self.notices = Some(notices);
        self
    }

    pub fn with_autopilot(mut self, autopilot: Autopilot) -> Self {
        self.autopilot = Some(autopilot);
        self
    }

    fn send(&self, action: ClientAction) {
        debug!("[GameClient {}] -> {:?}", self.session.connection_id, action);
        if self.outbound.send(action).is_err() {
            warn!("[GameClient {}] Action lost, channel closed", self.session.connection_id);
        }
    }

    fn notify(&self, notice: Notice) {
        match &notice {
            Notice::ServerError(text) => {
                warn!("[GameClient {}] Server error: {}", self.session.connection_id, text)
            }
            Notice::OpponentDisconnected => {
                warn!("[GameClient {}] Opponent disconnected", self.session.connection_id)
            }
            Notice::Status(text) => info!("[GameClient {}] {}", self.session.connection_id, text),
        }
        if let Some(notices) = &self.notices {
            if notices.send(notice).is_err() {
                debug!("[GameClient {}] Notice dropped, front-end gone", self.session.connection_id);
            }
        }
    }

    /// Swap in the next session, then let the autopilot react to the change.
    fn commit(&mut self, before: Session, next: Session) {
        self.session = next;
        self.announce_phase(&before);
        self.drive_autopilot(before);
    }

    fn drive_autopilot(&mut self, mut before: Session) {
        let Some(mut autopilot) = self.autopilot.take() else {
            return;
        };
        for _ in 0..AUTOPILOT_STEPS {
            let Some(command) = autopilot.next_command(&before, &self.session) else {
                break;
            };
            debug!("[GameClient {}] Autopilot plays {:?}", self.session.connection_id, command);
            let (next, action) = apply_command(self.session.clone(), &command);
            if next == self.session && action.is_none() {
                break;
            }
            before = std::mem::replace(&mut self.session, next);
            if let Some(action) = action {
                self.send(action);
            }
            self.announce_phase(&before);
        }
        self.autopilot = Some(autopilot);
    }

    fn announce_phase(&self, before: &Session) {
        if before.phase() != self.session.phase() {
            self.notify(Notice::Status(status_line(&self.session)));
        }
    }
}

impl Handler<ServerEvent> for GameClient {
    type Result = ();

    fn handle(&mut self, event: ServerEvent, _: &mut Context<Self>) {
        debug!("[GameClient {}] <- {}", self.session.connection_id, event.kind());
        let before = self.session.clone();
        let (next, notice) = apply_event(before.clone(), &event);
        if let Some(notice) = notice {
            self.notify(notice);
        }
        self.commit(before, next);
    }
}

impl Handler<UserCommand> for GameClient {
    type Result = ();

    fn handle(&mut self, command: UserCommand, _: &mut Context<Self>) {
        let before = self.session.clone();
        let (next, action) = apply_command(before.clone(), &command);
        if let Some(action) = action {
            self.send(action);
        }
        self.commit(before, next);
    }
}

impl Handler<LinkStatus> for GameClient {
    type Result = ();

    fn handle(&mut self, status: LinkStatus, _: &mut Context<Self>) {
        info!("[GameClient {}] Link {:?}", self.session.connection_id, status);
        let before = self.session.clone();
        let next = apply_link(before.clone(), status);
        self.commit(before, next);
    }
}

impl Handler<GetSession> for GameClient {
    type Result = MessageResult<GetSession>;

    fn handle(&mut self, _: GetSession, _: &mut Context<Self>) -> Self::Result {
        MessageResult(self.session.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::channel::ChannelHandle;
    use crate::client::messages::AttackReport;
    use crate::game::state::{Phase, Status};

    #[actix::test]
    async fn test_events_and_commands_in_order() {
        let (handle, mut rx) = ChannelHandle::new();
        let client = GameClient::new(handle).start();

        client.do_send(LinkStatus::Opened);
        client.do_send(UserCommand::CreateRoom);
        client.do_send(ServerEvent::RoomCreated { room_id: "room_1".into(), player_id: "1".into() });
        let session = client.send(GetSession).await.unwrap();

        assert_eq!(session.phase(), Phase::Waiting { room_id: Some("room_1".into()) });
        assert_eq!(rx.try_recv().unwrap(), ClientAction::CreateRoom);
        assert!(rx.try_recv().is_err());
    }

    #[actix::test]
    async fn test_rejected_command_sends_nothing() {
        let (handle, mut rx) = ChannelHandle::new();
        let client = GameClient::new(handle).start();

        client.do_send(LinkStatus::Opened);
        client.do_send(UserCommand::Attack(3));
        client.do_send(UserCommand::Ready);
        let session = client.send(GetSession).await.unwrap();

        assert_eq!(session.status, Status::Connecting);
        assert!(rx.try_recv().is_err());
    }

    #[actix::test]
    async fn test_closed_channel_keeps_local_state() {
        let (handle, rx) = ChannelHandle::new();
        drop(rx);
        let client = GameClient::new(handle).start();

        client.do_send(LinkStatus::Opened);
        client.do_send(ServerEvent::GameStart { player_id: "1".into(), placement_phase: true, my_turn: false });
        client.do_send(UserCommand::Place(55));
        let session = client.send(GetSession).await.unwrap();

        assert_eq!(session.planes_placed, 1);
    }

    #[actix::test]
    async fn test_autopilot_plays_a_turn() {
        let (handle, mut rx) = ChannelHandle::new();
        let client = GameClient::new(handle)
            .with_autopilot(Autopilot::new(Some(11), None))
            .start();

        client.do_send(LinkStatus::Opened);
        client.do_send(ServerEvent::RoomCreated { room_id: "room_1".into(), player_id: "1".into() });
        client.do_send(ServerEvent::GameStart { player_id: "1".into(), placement_phase: true, my_turn: false });
        let session = client.send(GetSession).await.unwrap();
        assert!(session.ready);

        client.do_send(ServerEvent::GameStart { player_id: "1".into(), placement_phase: false, my_turn: false });
        client.do_send(ServerEvent::OpponentAttack(AttackReport { position: 4, ..AttackReport::default() }));
        let session = client.send(GetSession).await.unwrap();
        assert_eq!(session.shots.shots.len(), 1);
        assert!(!session.my_turn);

        let mut sent = Vec::new();
        while let Ok(action) = rx.try_recv() {
            sent.push(action);
        }
        assert_eq!(sent.first(), Some(&ClientAction::CreateRoom));
        assert!(sent.contains(&ClientAction::PlayerReady));
        assert!(matches!(sent.last(), Some(ClientAction::Attack { room_id: Some(room), .. }) if room == "room_1"));
    }

    #[actix::test]
    async fn test_server_error_and_turn_reach_the_front_end() {
        let (handle, _rx) = ChannelHandle::new();
        let (notices_tx, mut notices) = tokio::sync::mpsc::unbounded_channel();
        let client = GameClient::new(handle).with_notices(notices_tx).start();

        client.do_send(LinkStatus::Opened);
        client.do_send(ServerEvent::Error { data: serde_json::json!("Room not found") });
        client.do_send(ServerEvent::GameStart { player_id: "1".into(), placement_phase: false, my_turn: true });
        client.send(GetSession).await.unwrap();

        let received: Vec<Notice> = std::iter::from_fn(|| notices.try_recv().ok()).collect();
        assert_eq!(
            received,
            vec![
                Notice::Status("Create a room or join one".into()),
                Notice::ServerError("Room not found".into()),
                Notice::Status("Your turn to attack!".into()),
            ]
        );
    }
}
