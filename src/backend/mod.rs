pub mod memory;

use async_trait::async_trait;
use tokio::sync::broadcast;

use hue::api::{FullGroup, StateUpdate};

use crate::error::ApiResult;

/// Notification from the bridge about a group
#[derive(Clone, Debug, PartialEq)]
pub enum GroupEvent {
    StateChanged(FullGroup),
    Added(FullGroup),
    Removed(String),
}

impl GroupEvent {
    #[must_use]
    pub fn group_id(&self) -> &str {
        match self {
            Self::StateChanged(group) | Self::Added(group) => group.id(),
            Self::Removed(id) => id,
        }
    }
}

#[async_trait]
pub trait HueClient: Send + Sync + 'static {
    /// Current bridge-side view of a group, if the bridge knows it
    async fn group_by_id(&self, id: &str) -> Option<FullGroup>;

    async fn update_group_state(&self, id: &str, upd: StateUpdate) -> ApiResult<()>;

    fn subscribe(&self) -> broadcast::Receiver<GroupEvent>;
}
