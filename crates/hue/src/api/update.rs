use serde::{Deserialize, Serialize};

use crate::api::{AlertMode, Effect};

#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawHs {
    pub hue: u16,
    pub sat: u8,
}

/// Partial group state, sent to the bridge as a v1 `action` body.
///
/// Built with chainable setters. A zero brightness is the same as turning
/// the group off, so an update never carries both `on: false` and a
/// brightness.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StateUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    on: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bri: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ct: Option<u16>,
    #[serde(flatten)]
    hs: Option<RawHs>,
    #[serde(skip_serializing_if = "Option::is_none")]
    xy: Option<[f64; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    transitiontime: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    alert: Option<AlertMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    effect: Option<Effect>,
}

impl StateUpdate {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            on: None,
            bri: None,
            ct: None,
            hs: None,
            xy: None,
            transitiontime: None,
            alert: None,
            effect: None,
        }
    }

    #[must_use]
    pub const fn turn_on(mut self) -> Self {
        self.on = Some(true);
        self
    }

    #[must_use]
    pub const fn turn_off(mut self) -> Self {
        self.on = Some(false);
        self.bri = None;
        self
    }

    #[must_use]
    pub const fn with_on(self, on: bool) -> Self {
        if on { self.turn_on() } else { self.turn_off() }
    }

    #[must_use]
    pub const fn with_brightness(mut self, bri: u8) -> Self {
        if bri == 0 {
            return self.turn_off();
        }
        self.bri = Some(bri);
        self
    }

    #[must_use]
    pub const fn with_color_temperature(mut self, mirek: u16) -> Self {
        self.ct = Some(mirek);
        self
    }

    #[must_use]
    pub const fn with_hs(mut self, hue: u16, sat: u8) -> Self {
        self.hs = Some(RawHs { hue, sat });
        self.xy = None;
        self
    }

    #[must_use]
    pub const fn with_xy(mut self, xy: [f64; 2]) -> Self {
        self.xy = Some(xy);
        self.hs = None;
        self
    }

    /// Transition time, in multiples of 100ms
    #[must_use]
    pub const fn with_transition_time(mut self, transitiontime: u16) -> Self {
        self.transitiontime = Some(transitiontime);
        self
    }

    #[must_use]
    pub const fn with_alert(mut self, alert: AlertMode) -> Self {
        self.alert = Some(alert);
        self
    }

    #[must_use]
    pub const fn with_effect(mut self, effect: Effect) -> Self {
        self.effect = Some(effect);
        self
    }

    #[must_use]
    pub const fn on(&self) -> Option<bool> {
        self.on
    }

    #[must_use]
    pub const fn brightness(&self) -> Option<u8> {
        self.bri
    }

    #[must_use]
    pub const fn color_temperature(&self) -> Option<u16> {
        self.ct
    }

    #[must_use]
    pub const fn hs(&self) -> Option<RawHs> {
        self.hs
    }

    #[must_use]
    pub const fn xy(&self) -> Option<[f64; 2]> {
        self.xy
    }

    #[must_use]
    pub const fn transition_time(&self) -> Option<u16> {
        self.transitiontime
    }

    #[must_use]
    pub const fn alert(&self) -> Option<AlertMode> {
        self.alert
    }

    #[must_use]
    pub const fn effect(&self) -> Option<Effect> {
        self.effect
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.on.is_none()
            && self.bri.is_none()
            && self.ct.is_none()
            && self.hs.is_none()
            && self.xy.is_none()
            && self.transitiontime.is_none()
            && self.alert.is_none()
            && self.effect.is_none()
    }
}
