use hue::api::{ColorMode, DeviceState};
use hue::color::{Hsb, Percent};
use hue::convert::{self, MirekRange};

use crate::model::channel::{ChannelKind, ChannelState, OnOff};

fn brightness(state: &DeviceState) -> Percent {
    if state.on {
        convert::brightness_to_percent(state.bri)
    } else {
        Percent::ZERO
    }
}

fn color(state: &DeviceState) -> Hsb {
    let hsb = match (state.colormode, state.xy) {
        (Some(ColorMode::Xy), Some(xy)) => Hsb::from_xy(xy),
        _ => Hsb::new(
            convert::hue_to_degrees(state.hue.unwrap_or_default()),
            convert::saturation_to_percent(state.sat.unwrap_or_default()),
            Percent::ZERO,
        ),
    };

    hsb.with_brightness(brightness(state))
}

fn color_temperature(state: &DeviceState, range: MirekRange) -> ChannelState {
    match (state.colormode, state.ct) {
        (Some(ColorMode::Ct), Some(ct)) => ChannelState::Percent(range.to_percent(ct)),
        _ => ChannelState::Undefined,
    }
}

/// Channel values to publish for a reported group state
#[must_use]
pub fn channel_states(state: &DeviceState, range: MirekRange) -> Vec<(ChannelKind, ChannelState)> {
    let mut res = vec![
        (ChannelKind::Color, ChannelState::Hsb(color(state))),
        (
            ChannelKind::ColorTemperature,
            color_temperature(state, range),
        ),
        (
            ChannelKind::Brightness,
            ChannelState::Percent(brightness(state)),
        ),
        (
            ChannelKind::Switch,
            ChannelState::OnOff(OnOff::from(state.on)),
        ),
    ];

    if let Some(alert) = state.alert.filter(|alert| !alert.is_idle()) {
        res.push((
            ChannelKind::Alert,
            ChannelState::String(alert.token().to_string()),
        ));
    }

    res
}
