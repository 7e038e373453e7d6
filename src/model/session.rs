use hue::api::{DeviceState, StateUpdate};
use hue::convert::MirekRange;

/// Per-group memory of what was last commanded.
///
/// The bridge reports group state lazily, so repeated relative commands
/// (INCREASE, DECREASE) are resolved against the values we sent last rather
/// than the possibly stale bridge snapshot. Any authoritative state report
/// from the bridge invalidates this cache.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandSession {
    last_sent_color_temperature: Option<u16>,
    last_sent_brightness: Option<u8>,
    transition_time: Option<u16>,
    mirek_range: MirekRange,
}

impl CommandSession {
    #[must_use]
    pub const fn new(mirek_range: MirekRange, transition_time: Option<u16>) -> Self {
        Self {
            last_sent_color_temperature: None,
            last_sent_brightness: None,
            transition_time,
            mirek_range,
        }
    }

    #[must_use]
    pub const fn mirek_range(&self) -> MirekRange {
        self.mirek_range
    }

    #[must_use]
    pub const fn transition_time(&self) -> Option<u16> {
        self.transition_time
    }

    pub const fn set_transition_time(&mut self, transition_time: Option<u16>) {
        self.transition_time = transition_time;
    }

    #[must_use]
    pub const fn last_sent_brightness(&self) -> Option<u8> {
        self.last_sent_brightness
    }

    #[must_use]
    pub const fn last_sent_color_temperature(&self) -> Option<u16> {
        self.last_sent_color_temperature
    }

    /// Forget last-sent values. The transition time override is kept.
    pub const fn invalidate(&mut self) {
        self.last_sent_brightness = None;
        self.last_sent_color_temperature = None;
    }

    /// Brightness relative commands start from. A group that is off counts
    /// as zero, unless we have sent a brightness since the last report.
    #[must_use]
    pub const fn current_brightness(&self, state: &DeviceState) -> u8 {
        match self.last_sent_brightness {
            Some(bri) => bri,
            None if !state.on => 0,
            None => state.bri,
        }
    }

    #[must_use]
    pub fn current_color_temperature(&self, state: &DeviceState) -> Option<u16> {
        self.last_sent_color_temperature.or(state.ct)
    }

    /// Stamp the last sent color temperature onto `upd`, if there is one
    #[must_use]
    pub const fn keep_color_temperature(&self, upd: StateUpdate) -> StateUpdate {
        match self.last_sent_color_temperature {
            Some(ct) => upd.with_color_temperature(ct),
            None => upd,
        }
    }

    /// Finalize an update right before it is sent: apply the transition time
    /// override and remember what is being sent.
    #[must_use]
    pub fn commit(&mut self, mut upd: StateUpdate) -> StateUpdate {
        if let Some(tt) = self.transition_time {
            upd = upd.with_transition_time(tt);
        }
        if let Some(bri) = upd.brightness() {
            self.last_sent_brightness = Some(bri);
        }
        if let Some(ct) = upd.color_temperature() {
            self.last_sent_color_temperature = Some(ct);
        }
        upd
    }
}
