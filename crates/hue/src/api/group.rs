use serde::{Deserialize, Serialize};

use crate::api::DeviceState;

#[derive(Copy, Clone, Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub enum GroupType {
    Entertainment,
    #[default]
    LightGroup,
    Room,
    Zone,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Group {
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub group_type: GroupType,
    /// Only meaningful for [`GroupType::Room`]
    #[serde(rename = "class", default)]
    pub room_class: String,
}

impl Group {
    pub const ALL_LIGHTS_ID: &'static str = "0";

    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Only the all-lights pseudo group is read-only
    #[must_use]
    pub fn is_modifiable(&self) -> bool {
        self.id != Self::ALL_LIGHTS_ID
    }
}

impl Default for Group {
    fn default() -> Self {
        Self {
            id: Self::ALL_LIGHTS_ID.to_string(),
            name: "Group 0".to_string(),
            group_type: GroupType::LightGroup,
            room_class: String::new(),
        }
    }
}

/// A group together with its member lights and last known action.
///
/// `action` is the last state sent to the group, which does not have to
/// match what every member light is doing.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct FullGroup {
    #[serde(flatten)]
    pub group: Group,
    pub action: DeviceState,
    #[serde(default)]
    pub lights: Vec<String>,
}

impl FullGroup {
    #[must_use]
    pub fn new(group: Group, action: DeviceState) -> Self {
        Self {
            group,
            action,
            lights: vec![],
        }
    }

    #[must_use]
    pub fn with_lights(self, lights: Vec<String>) -> Self {
        Self { lights, ..self }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.group.id
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::api::{DeviceState, FullGroup, Group, GroupType};

    #[test]
    fn all_lights_group_is_read_only() {
        assert!(!Group::default().is_modifiable());
        assert!(Group::new("3", "Kitchen").is_modifiable());
    }

    #[test]
    fn deserialize_full_group() {
        let group: FullGroup = serde_json::from_value(json!({
            "id": "1",
            "name": "Living room",
            "type": "Room",
            "class": "Living room",
            "lights": ["1", "2"],
            "action": { "on": true, "bri": 200 }
        }))
        .unwrap();

        assert_eq!(group.id(), "1");
        assert_eq!(group.group.group_type, GroupType::Room);
        assert_eq!(group.group.room_class, "Living room");
        assert_eq!(group.lights, ["1", "2"]);
        assert_eq!(group.action, DeviceState::on(200));
    }
}
