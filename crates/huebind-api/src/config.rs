use std::collections::BTreeMap;

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

use hue::api::{DeviceState, FullGroup, Group, GroupType};
use hue::convert::MirekRange;

#[derive(Clone, Debug, Serialize, Deserialize, Eq, PartialEq)]
pub struct BridgeConfig {
    pub name: String,
    /// Where `dump` writes the simulated bridge state
    pub state_file: Utf8PathBuf,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, Eq, PartialEq)]
pub struct DefaultsConfig {
    pub mirek_min: u16,
    pub mirek_max: u16,
    #[serde(default)]
    pub transitiontime: Option<u16>,
}

#[derive(Clone, Debug, Serialize, Deserialize, Eq, PartialEq)]
pub struct GroupConfig {
    pub name: String,
    #[serde(rename = "type", default)]
    pub group_type: GroupType,
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default)]
    pub lights: Vec<String>,
    #[serde(default)]
    pub transitiontime: Option<u16>,
    #[serde(default)]
    pub mirek_min: Option<u16>,
    #[serde(default)]
    pub mirek_max: Option<u16>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppConfig {
    pub bridge: BridgeConfig,
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub groups: BTreeMap<String, GroupConfig>,
}

impl AppConfig {
    #[must_use]
    pub fn has_groups(&self) -> bool {
        !self.groups.is_empty()
    }
}

impl GroupConfig {
    #[must_use]
    pub fn mirek_range(&self, defaults: &DefaultsConfig) -> MirekRange {
        MirekRange::new(
            self.mirek_min.unwrap_or(defaults.mirek_min),
            self.mirek_max.unwrap_or(defaults.mirek_max),
        )
    }

    #[must_use]
    pub fn transition_time(&self, defaults: &DefaultsConfig) -> Option<u16> {
        self.transitiontime.or(defaults.transitiontime)
    }

    /// Initial bridge-side representation of this group (all lights off)
    #[must_use]
    pub fn to_full_group(&self, id: &str) -> FullGroup {
        let group = Group {
            id: id.to_string(),
            name: self.name.clone(),
            group_type: self.group_type,
            room_class: self.class.clone().unwrap_or_default(),
        };
        FullGroup::new(group, DeviceState::off()).with_lights(self.lights.clone())
    }
}
