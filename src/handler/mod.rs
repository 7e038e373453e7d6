pub mod alert;
pub mod channels;
pub mod dispatch;
pub mod resolve;

use std::sync::Arc;

use tokio::sync::broadcast::{self, error::RecvError};
use tokio::sync::mpsc;

use hue::api::{AlertMode, FullGroup};

use crate::backend::{GroupEvent, HueClient};
use crate::error::{ApiError, ApiResult};
use crate::handler::alert::{AlertExpired, AlertRestorer};
use crate::model::channel::{ChannelKind, ChannelState, ChannelUpdate, Command};
use crate::model::session::CommandSession;

#[derive(Clone, Debug, PartialEq)]
pub enum HandlerRequest {
    Command(ChannelKind, Command),
    SetTransitionTime(Option<u16>),
    Refresh,
}

/// Host-side handle for a running [`GroupHandler`]
#[derive(Clone, Debug)]
pub struct GroupHandle {
    id: String,
    tx: mpsc::UnboundedSender<HandlerRequest>,
}

impl GroupHandle {
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    fn send(&self, req: HandlerRequest) -> ApiResult<()> {
        self.tx
            .send(req)
            .map_err(|_| ApiError::HandlerStopped(self.id.clone()))
    }

    pub fn command(&self, channel: ChannelKind, command: Command) -> ApiResult<()> {
        self.send(HandlerRequest::Command(channel, command))
    }

    pub fn set_transition_time(&self, transition_time: Option<u16>) -> ApiResult<()> {
        self.send(HandlerRequest::SetTransitionTime(transition_time))
    }

    pub fn refresh(&self) -> ApiResult<()> {
        self.send(HandlerRequest::Refresh)
    }
}

/// Translates channel commands for one bridge group, and reports the
/// group's state back as channel values.
///
/// All session state is owned by the handler and only touched from
/// [`GroupHandler::run`], so commands, bridge notifications and alert
/// expiries are processed strictly one at a time.
pub struct GroupHandler<C: HueClient> {
    id: String,
    client: Arc<C>,
    session: CommandSession,
    alerts: AlertRestorer,
    alert_rx: mpsc::UnboundedReceiver<AlertExpired>,
    requests: mpsc::UnboundedReceiver<HandlerRequest>,
    updates: broadcast::Sender<ChannelUpdate>,
}

impl<C: HueClient> GroupHandler<C> {
    pub fn new(
        id: impl Into<String>,
        client: Arc<C>,
        updates: broadcast::Sender<ChannelUpdate>,
        session: CommandSession,
    ) -> (Self, GroupHandle) {
        let id = id.into();
        let (alert_tx, alert_rx) = mpsc::unbounded_channel();
        let (tx, requests) = mpsc::unbounded_channel();

        let handler = Self {
            id: id.clone(),
            client,
            session,
            alerts: AlertRestorer::new(alert_tx),
            alert_rx,
            requests,
            updates,
        };

        (handler, GroupHandle { id, tx })
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub const fn session(&self) -> &CommandSession {
        &self.session
    }

    #[must_use]
    pub const fn alerts(&self) -> &AlertRestorer {
        &self.alerts
    }

    fn publish(&self, channel: ChannelKind, state: ChannelState) {
        log::trace!("[{}] {channel} -> {state}", self.id);

        // nobody listening is not an error
        let _ = self.updates.send(ChannelUpdate {
            group: self.id.clone(),
            channel,
            state,
        });
    }

    pub async fn handle_command(&mut self, channel: ChannelKind, command: Command) {
        let Some(group) = self.client.group_by_id(&self.id).await else {
            log::debug!(
                "[{}] Hue group not known on bridge. Cannot handle command.",
                self.id
            );
            return;
        };

        let Some(upd) = dispatch::dispatch(channel, &command, &group.action, &mut self.session)
        else {
            if let (ChannelKind::Alert, Command::String(token)) = (channel, &command) {
                log::warn!(
                    "[{}] Unsupported alert command: {token:?}. Supported commands are: {}",
                    self.id,
                    AlertMode::TOKENS.join(", ")
                );
            } else {
                log::warn!(
                    "[{}] Command {command:?} not supported by channel {channel}",
                    self.id
                );
            }
            return;
        };

        log::debug!("[{}] Sending {channel} update: {upd:?}", self.id);

        let alert = upd.alert().filter(|_| channel == ChannelKind::Alert);

        if let Err(err) = self.client.update_group_state(&self.id, upd).await {
            log::error!("[{}] Failed to update group state: {err}", self.id);
            return;
        }

        if let Some(mode) = alert {
            self.alerts.schedule(mode);
        }
    }

    /// Publish channel values for a bridge state report, and drop the
    /// last-sent cache, since the report is now authoritative.
    pub fn on_group_state_changed(&mut self, group: &FullGroup) {
        if group.id() != self.id {
            log::trace!(
                "[{}] Received state change for another group ({}). Will be ignored.",
                self.id,
                group.id()
            );
            return;
        }

        self.session.invalidate();

        let range = self.session.mirek_range();
        for (channel, state) in channels::channel_states(&group.action, range) {
            self.publish(channel, state);
        }

        if let Some(alert) = group.action.alert.filter(|alert| !alert.is_idle()) {
            self.alerts.schedule(alert);
        }
    }

    pub fn on_group_added(&mut self, group: &FullGroup) {
        if group.id() == self.id {
            log::info!("[{}] Group added to bridge", self.id);
            self.on_group_state_changed(group);
        }
    }

    pub fn on_group_removed(&mut self, id: &str) {
        if id == self.id {
            log::warn!("[{}] Group removed from bridge", self.id);
            self.alerts.cancel_pending();
        }
    }

    /// Pull the current group state from the bridge and publish it
    pub async fn refresh(&mut self) {
        match self.client.group_by_id(&self.id).await {
            Some(group) => self.on_group_state_changed(&group),
            None => log::debug!("[{}] Hue group not known on bridge", self.id),
        }
    }

    pub fn set_transition_time(&mut self, transition_time: Option<u16>) {
        log::info!(
            "[{}] Transition time set to {transition_time:?}",
            self.id
        );
        self.session.set_transition_time(transition_time);
    }

    pub fn on_alert_expired(&mut self, expired: AlertExpired) {
        match self.alerts.expire(expired) {
            Some(alert) => {
                log::debug!("[{}] {} alert finished", self.id, alert.mode);
                self.publish(
                    ChannelKind::Alert,
                    ChannelState::String(AlertMode::None.token().to_string()),
                );
            }
            None => log::trace!(
                "[{}] Ignoring superseded alert timer (generation {})",
                self.id,
                expired.generation
            ),
        }
    }

    async fn handle_request(&mut self, req: HandlerRequest) {
        match req {
            HandlerRequest::Command(channel, command) => {
                self.handle_command(channel, command).await;
            }
            HandlerRequest::SetTransitionTime(transition_time) => {
                self.set_transition_time(transition_time);
            }
            HandlerRequest::Refresh => self.refresh().await,
        }
    }

    fn handle_event(&mut self, event: &GroupEvent) {
        log::trace!("[{}] Bridge event for group {}", self.id, event.group_id());

        match event {
            GroupEvent::StateChanged(group) => self.on_group_state_changed(group),
            GroupEvent::Added(group) => self.on_group_added(group),
            GroupEvent::Removed(id) => self.on_group_removed(id),
        }
    }

    /// Serve requests until every [`GroupHandle`] is dropped, or the bridge
    /// goes away.
    pub async fn run(mut self) -> ApiResult<()> {
        let mut events = self.client.subscribe();

        log::info!("[{}] Group handler started", self.id);
        self.refresh().await;

        loop {
            tokio::select! {
                req = self.requests.recv() => {
                    let Some(req) = req else { break };
                    self.handle_request(req).await;
                }
                event = events.recv() => {
                    match event {
                        Ok(event) => self.handle_event(&event),
                        Err(RecvError::Lagged(count)) => {
                            log::warn!("[{}] Missed {count} bridge events, refreshing", self.id);
                            self.refresh().await;
                        }
                        Err(RecvError::Closed) => break,
                    }
                }
                Some(expired) = self.alert_rx.recv() => {
                    self.on_alert_expired(expired);
                }
            }
        }

        self.alerts.cancel_pending();
        log::info!("[{}] Group handler stopped", self.id);

        Ok(())
    }
}
