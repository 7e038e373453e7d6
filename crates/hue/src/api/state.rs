use std::fmt::{self, Display};
use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

use crate::api::StateUpdate;

#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    Ct,
    Xy,
    Hs,
}

#[derive(Copy, Clone, Debug, Serialize, Deserialize, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AlertMode {
    #[default]
    None,
    Select,
    LSelect,
}

impl AlertMode {
    /// Host-facing command tokens
    pub const TOKENS: [&'static str; 3] = ["NONE", "SELECT", "LSELECT"];

    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim() {
            "NONE" => Some(Self::None),
            "SELECT" => Some(Self::Select),
            "LSELECT" => Some(Self::LSelect),
            _ => None,
        }
    }

    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Select => "SELECT",
            Self::LSelect => "LSELECT",
        }
    }

    #[must_use]
    pub const fn is_idle(self) -> bool {
        matches!(self, Self::None)
    }
}

impl Display for AlertMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[derive(Copy, Clone, Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Effect {
    #[default]
    None,
    ColorLoop,
}

/// Group action as last reported by the bridge
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceState {
    pub on: bool,
    #[serde(default)]
    pub bri: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ct: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hue: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sat: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xy: Option<[f64; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colormode: Option<ColorMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert: Option<AlertMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect: Option<Effect>,
}

impl DeviceState {
    #[must_use]
    pub fn off() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn on(bri: u8) -> Self {
        Self {
            on: true,
            bri,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn with_ct(mut self, mirek: u16) -> Self {
        self.ct = Some(mirek);
        self.colormode = Some(ColorMode::Ct);
        self
    }

    #[must_use]
    pub const fn with_hs(mut self, hue: u16, sat: u8) -> Self {
        self.hue = Some(hue);
        self.sat = Some(sat);
        self.colormode = Some(ColorMode::Hs);
        self
    }

    #[must_use]
    pub const fn with_xy(mut self, xy: [f64; 2]) -> Self {
        self.xy = Some(xy);
        self.colormode = Some(ColorMode::Xy);
        self
    }

    #[must_use]
    pub const fn with_alert(mut self, alert: AlertMode) -> Self {
        self.alert = Some(alert);
        self
    }
}

/// Applies an update the way the bridge does: the last color field written
/// decides the color mode.
impl AddAssign<&StateUpdate> for DeviceState {
    fn add_assign(&mut self, upd: &StateUpdate) {
        if let Some(on) = upd.on() {
            self.on = on;
        }
        if let Some(bri) = upd.brightness() {
            self.bri = bri;
        }
        if let Some(hs) = upd.hs() {
            self.hue = Some(hs.hue);
            self.sat = Some(hs.sat);
            self.colormode = Some(ColorMode::Hs);
        }
        if let Some(xy) = upd.xy() {
            self.xy = Some(xy);
            self.colormode = Some(ColorMode::Xy);
        }
        if let Some(ct) = upd.color_temperature() {
            self.ct = Some(ct);
            self.colormode = Some(ColorMode::Ct);
        }
        if let Some(alert) = upd.alert() {
            self.alert = Some(alert);
        }
        if let Some(effect) = upd.effect() {
            self.effect = Some(effect);
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::api::{AlertMode, ColorMode, DeviceState, Effect, StateUpdate};

    #[test]
    fn alert_tokens() {
        for token in AlertMode::TOKENS {
            let mode = AlertMode::from_token(token).unwrap();
            assert_eq!(mode.token(), token);
        }
        assert_eq!(AlertMode::from_token("select"), None);
        assert_eq!(AlertMode::from_token("BLINK"), None);
        assert!(AlertMode::None.is_idle());
        assert!(!AlertMode::LSelect.is_idle());
    }

    #[test]
    fn deserialize_group_action() {
        let action: DeviceState = serde_json::from_value(json!({
            "on": true,
            "bri": 144,
            "hue": 7688,
            "sat": 199,
            "effect": "none",
            "xy": [0.5016, 0.4151],
            "ct": 443,
            "alert": "lselect",
            "colormode": "ct"
        }))
        .unwrap();

        assert!(action.on);
        assert_eq!(action.bri, 144);
        assert_eq!(action.ct, Some(443));
        assert_eq!(action.colormode, Some(ColorMode::Ct));
        assert_eq!(action.alert, Some(AlertMode::LSelect));
        assert_eq!(action.effect, Some(Effect::None));
    }

    #[test]
    fn apply_update() {
        let mut state = DeviceState::off().with_hs(100, 100);

        state += &StateUpdate::new()
            .turn_on()
            .with_brightness(80)
            .with_color_temperature(300);

        assert_eq!(state, DeviceState::on(80).with_hs(100, 100).with_ct(300));

        state += &StateUpdate::new().turn_off();
        assert!(!state.on);
        assert_eq!(state.bri, 80);
    }
}
