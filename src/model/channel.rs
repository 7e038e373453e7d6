use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use hue::color::{Hsb, Percent};

use crate::error::{ApiError, ApiResult};

/// Controllable attribute of a light group, as seen by the host
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    Color,
    ColorTemperature,
    Brightness,
    Switch,
    Alert,
    Effect,
}

impl ChannelKind {
    pub const ALL: [Self; 6] = [
        Self::Color,
        Self::ColorTemperature,
        Self::Brightness,
        Self::Switch,
        Self::Alert,
        Self::Effect,
    ];

    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Color => "color",
            Self::ColorTemperature => "color_temperature",
            Self::Brightness => "brightness",
            Self::Switch => "switch",
            Self::Alert => "alert",
            Self::Effect => "effect",
        }
    }
}

impl Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ChannelKind {
    type Err = ApiError;

    fn from_str(s: &str) -> ApiResult<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.id() == s)
            .ok_or_else(|| ApiError::UnknownChannel(s.to_string()))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OnOff {
    On,
    Off,
}

impl OnOff {
    #[must_use]
    pub const fn is_on(self) -> bool {
        matches!(self, Self::On)
    }
}

impl From<bool> for OnOff {
    fn from(value: bool) -> Self {
        if value { Self::On } else { Self::Off }
    }
}

impl Display for OnOff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.is_on() { "ON" } else { "OFF" })
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Increase,
    Decrease,
}

/// Command sent by the host to a channel
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Percent(Percent),
    OnOff(OnOff),
    IncreaseDecrease(Direction),
    Hsb(Hsb),
    String(String),
}

impl Command {
    /// Parse command text the way the host types it for `channel`.
    ///
    /// The alert channel only takes free-form strings, so its input is never
    /// interpreted.
    pub fn parse(channel: ChannelKind, text: &str) -> ApiResult<Self> {
        let text = text.trim();

        if channel == ChannelKind::Alert {
            return Ok(Self::String(text.to_string()));
        }

        let cmd = match text.to_ascii_uppercase().as_str() {
            "ON" => Self::OnOff(OnOff::On),
            "OFF" => Self::OnOff(OnOff::Off),
            "INCREASE" => Self::IncreaseDecrease(Direction::Increase),
            "DECREASE" => Self::IncreaseDecrease(Direction::Decrease),
            _ if text.contains(',') => Self::Hsb(text.parse()?),
            _ if text.parse::<i64>().is_ok() => Self::Percent(text.parse()?),
            _ => Self::String(text.to_string()),
        };

        Ok(cmd)
    }
}

/// Value published to the host for a channel
#[derive(Clone, Debug, PartialEq)]
pub enum ChannelState {
    Hsb(Hsb),
    Percent(Percent),
    OnOff(OnOff),
    String(String),
    Undefined,
}

impl Display for ChannelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hsb(hsb) => write!(f, "{hsb}"),
            Self::Percent(pct) => write!(f, "{pct}"),
            Self::OnOff(onoff) => write!(f, "{onoff}"),
            Self::String(text) => f.write_str(text),
            Self::Undefined => f.write_str("UNDEF"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChannelUpdate {
    pub group: String,
    pub channel: ChannelKind,
    pub state: ChannelState,
}
