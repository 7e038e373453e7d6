use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::{Mutex, broadcast};

use hue::api::{AlertMode, DeviceState, FullGroup, StateUpdate};

use crate::backend::{GroupEvent, HueClient};
use crate::config::AppConfig;
use crate::error::{ApiError, ApiResult};

/// Simulated bridge holding group state in memory.
///
/// Updates are applied the way the bridge applies them, and every change is
/// announced to subscribers.
#[derive(Debug)]
pub struct MemoryBridge {
    groups: Mutex<BTreeMap<String, FullGroup>>,
    sent: Mutex<Vec<(String, StateUpdate)>>,
    events: broadcast::Sender<GroupEvent>,
}

impl MemoryBridge {
    const EVENT_CAPACITY: usize = 32;

    #[must_use]
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(Self::EVENT_CAPACITY);
        Self {
            groups: Mutex::new(BTreeMap::new()),
            sent: Mutex::new(vec![]),
            events,
        }
    }

    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        let groups = config
            .groups
            .iter()
            .map(|(id, group)| (id.clone(), group.to_full_group(id)))
            .collect();

        Self {
            groups: Mutex::new(groups),
            ..Self::new()
        }
    }

    fn notify(&self, event: GroupEvent) {
        // no subscribers is fine
        let _ = self.events.send(event);
    }

    pub async fn add_group(&self, group: FullGroup) {
        let id = group.id().to_string();
        self.groups.lock().await.insert(id, group.clone());
        self.notify(GroupEvent::Added(group));
    }

    pub async fn remove_group(&self, id: &str) -> Option<FullGroup> {
        let group = self.groups.lock().await.remove(id)?;
        self.notify(GroupEvent::Removed(id.to_string()));
        Some(group)
    }

    /// Change group state behind our back, as a switch or another app would
    pub async fn set_action(&self, id: &str, action: DeviceState) -> ApiResult<()> {
        let mut groups = self.groups.lock().await;
        let group = groups
            .get_mut(id)
            .ok_or_else(|| ApiError::GroupNotFound(id.to_string()))?;

        group.action = action;
        self.notify(GroupEvent::StateChanged(group.clone()));
        drop(groups);

        Ok(())
    }

    /// Updates received so far, oldest first
    pub async fn sent_updates(&self) -> Vec<(String, StateUpdate)> {
        self.sent.lock().await.clone()
    }

    pub async fn to_yaml(&self) -> ApiResult<String> {
        let groups = self.groups.lock().await;
        Ok(serde_yml::to_string(&*groups)?)
    }
}

impl Default for MemoryBridge {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HueClient for MemoryBridge {
    async fn group_by_id(&self, id: &str) -> Option<FullGroup> {
        self.groups.lock().await.get(id).cloned()
    }

    async fn update_group_state(&self, id: &str, upd: StateUpdate) -> ApiResult<()> {
        let mut groups = self.groups.lock().await;
        let group = groups
            .get_mut(id)
            .ok_or_else(|| ApiError::GroupNotFound(id.to_string()))?;

        if !group.group.is_modifiable() {
            return Err(ApiError::GroupNotModifiable(id.to_string()));
        }

        log::debug!(
            "PUT /groups/{id}/action {}",
            serde_json::to_string(&upd)?
        );

        group.action += &upd;
        let event = GroupEvent::StateChanged(group.clone());

        // alerts are one-shot, later reports show the group idle again
        if upd.alert().is_some() {
            group.action.alert = Some(AlertMode::None);
        }
        drop(groups);

        self.sent.lock().await.push((id.to_string(), upd));
        self.notify(event);

        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<GroupEvent> {
        self.events.subscribe()
    }
}
