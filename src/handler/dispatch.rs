use hue::api::{AlertMode, ColorMode, DeviceState, Effect, StateUpdate};
use hue::color::{Hsb, Percent};
use hue::convert;

use crate::handler::resolve;
use crate::model::channel::{ChannelKind, Command, OnOff};
use crate::model::session::CommandSession;

fn on_off(onoff: OnOff) -> StateUpdate {
    StateUpdate::new().with_on(onoff.is_on())
}

fn brightness(pct: Percent) -> StateUpdate {
    let upd = StateUpdate::new();
    if pct.is_zero() {
        upd.turn_off()
    } else {
        upd.turn_on()
            .with_brightness(convert::brightness_from_percent(pct))
    }
}

fn color(hsb: Hsb, state: &DeviceState) -> StateUpdate {
    if hsb.brightness.is_zero() {
        return on_off(OnOff::Off);
    }

    let upd = if state.colormode == Some(ColorMode::Xy) {
        StateUpdate::new().with_xy(hsb.to_xy())
    } else {
        StateUpdate::new().with_hs(
            convert::hue_from_degrees(hsb.hue),
            convert::saturation_from_percent(hsb.saturation),
        )
    };

    upd.turn_on()
        .with_brightness(convert::brightness_from_percent(hsb.brightness))
}

const fn effect(onoff: OnOff) -> StateUpdate {
    let effect = match onoff {
        OnOff::On => Effect::ColorLoop,
        OnOff::Off => Effect::None,
    };
    StateUpdate::new().with_effect(effect)
}

fn alert(token: &str) -> Option<StateUpdate> {
    AlertMode::from_token(token).map(|mode| StateUpdate::new().with_alert(mode))
}

/// Translate a host command into the update to send for this group.
///
/// Returns [`None`] for combinations a channel does not support, and for
/// unknown alert tokens. When an update is returned, it has already been
/// recorded in `session`.
pub fn dispatch(
    channel: ChannelKind,
    command: &Command,
    state: &DeviceState,
    session: &mut CommandSession,
) -> Option<StateUpdate> {
    let upd = match (channel, command) {
        (ChannelKind::ColorTemperature, cmd) => match cmd {
            Command::Percent(pct) => Some(
                StateUpdate::new()
                    .with_color_temperature(session.mirek_range().from_percent(*pct)),
            ),
            Command::OnOff(onoff) => Some(on_off(*onoff)),
            Command::IncreaseDecrease(dir) => {
                Some(resolve::color_temp_change(*dir, state, session))
            }
            Command::Hsb(_) | Command::String(_) => None,
        },

        (ChannelKind::Brightness, cmd) => match cmd {
            Command::Percent(pct) => Some(brightness(*pct)),
            Command::OnOff(onoff) => Some(on_off(*onoff)),
            Command::IncreaseDecrease(dir) => {
                Some(resolve::brightness_change(*dir, state, session))
            }
            Command::Hsb(_) | Command::String(_) => None,
        }
        .map(|upd| session.keep_color_temperature(upd)),

        (ChannelKind::Switch, cmd) => match cmd {
            Command::OnOff(onoff) => Some(on_off(*onoff)),
            Command::Percent(_)
            | Command::IncreaseDecrease(_)
            | Command::Hsb(_)
            | Command::String(_) => None,
        }
        .map(|upd| session.keep_color_temperature(upd)),

        (ChannelKind::Color, cmd) => match cmd {
            Command::Hsb(hsb) => Some(color(*hsb, state)),
            Command::Percent(pct) => Some(brightness(*pct)),
            Command::OnOff(onoff) => Some(on_off(*onoff)),
            Command::IncreaseDecrease(dir) => {
                Some(resolve::brightness_change(*dir, state, session))
            }
            Command::String(_) => None,
        },

        (ChannelKind::Alert, cmd) => match cmd {
            Command::String(token) => alert(token),
            Command::Percent(_)
            | Command::OnOff(_)
            | Command::IncreaseDecrease(_)
            | Command::Hsb(_) => None,
        },

        (ChannelKind::Effect, cmd) => match cmd {
            Command::OnOff(onoff) => Some(effect(*onoff)),
            Command::Percent(_)
            | Command::IncreaseDecrease(_)
            | Command::Hsb(_)
            | Command::String(_) => None,
        },
    }?;

    Some(session.commit(upd))
}

#[cfg(test)]
mod tests {
    use hue::api::{AlertMode, DeviceState, Effect, StateUpdate};
    use hue::color::{Hsb, Percent};
    use hue::convert::MirekRange;

    use crate::handler::dispatch::dispatch;
    use crate::model::channel::{ChannelKind, Command, Direction, OnOff};
    use crate::model::session::CommandSession;

    fn pct(value: u8) -> Percent {
        Percent::new(value).unwrap()
    }

    #[test]
    fn increase_from_off() {
        let mut session = CommandSession::default();
        let upd = dispatch(
            ChannelKind::Brightness,
            &Command::IncreaseDecrease(Direction::Increase),
            &DeviceState::off(),
            &mut session,
        )
        .unwrap();

        assert_eq!(upd, StateUpdate::new().turn_on().with_brightness(30));
        assert_eq!(session.last_sent_brightness(), Some(30));
    }

    #[test]
    fn repeated_increase_uses_last_sent() {
        let mut session = CommandSession::default();
        let state = DeviceState::off();
        let cmd = Command::IncreaseDecrease(Direction::Increase);

        dispatch(ChannelKind::Brightness, &cmd, &state, &mut session).unwrap();
        let upd = dispatch(ChannelKind::Brightness, &cmd, &state, &mut session).unwrap();

        assert_eq!(upd, StateUpdate::new().with_brightness(60));
    }

    #[test]
    fn brightness_percent() {
        let mut session = CommandSession::default();
        let state = DeviceState::on(10);

        let upd = dispatch(
            ChannelKind::Brightness,
            &Command::Percent(pct(50)),
            &state,
            &mut session,
        )
        .unwrap();
        assert_eq!(upd, StateUpdate::new().turn_on().with_brightness(127));

        let upd = dispatch(
            ChannelKind::Brightness,
            &Command::Percent(Percent::ZERO),
            &state,
            &mut session,
        )
        .unwrap();
        assert_eq!(upd, StateUpdate::new().turn_off());
    }

    #[test]
    fn switch_keeps_color_temperature() {
        let mut session = CommandSession::default();
        let state = DeviceState::off();

        dispatch(
            ChannelKind::ColorTemperature,
            &Command::Percent(Percent::HUNDRED),
            &state,
            &mut session,
        )
        .unwrap();

        let upd = dispatch(
            ChannelKind::Switch,
            &Command::OnOff(OnOff::On),
            &state,
            &mut session,
        )
        .unwrap();

        assert_eq!(
            upd,
            StateUpdate::new().turn_on().with_color_temperature(500)
        );
    }

    #[test]
    fn state_report_clears_stale_color_temperature() {
        let mut session = CommandSession::default();
        let state = DeviceState::on(100);

        dispatch(
            ChannelKind::ColorTemperature,
            &Command::Percent(Percent::ZERO),
            &state,
            &mut session,
        )
        .unwrap();
        session.invalidate();

        let upd = dispatch(
            ChannelKind::Brightness,
            &Command::Percent(pct(20)),
            &state,
            &mut session,
        )
        .unwrap();

        assert_eq!(upd.color_temperature(), None);
    }

    #[test]
    fn color_with_zero_brightness_is_off() {
        let mut session = CommandSession::default();
        let state = DeviceState::on(100);

        let off = dispatch(
            ChannelKind::Color,
            &Command::OnOff(OnOff::Off),
            &state,
            &mut session,
        );
        let dark = dispatch(
            ChannelKind::Color,
            &Command::Hsb(Hsb::new(120.0, Percent::HUNDRED, Percent::ZERO)),
            &state,
            &mut session,
        );

        assert_eq!(dark, off);
        assert_eq!(dark, Some(StateUpdate::new().turn_off()));
    }

    #[test]
    fn color_follows_device_color_mode() {
        let mut session = CommandSession::default();
        let hsb = Hsb::new(180.0, Percent::HUNDRED, Percent::HUNDRED);

        let upd = dispatch(
            ChannelKind::Color,
            &Command::Hsb(hsb),
            &DeviceState::on(100).with_hs(0, 0),
            &mut session,
        )
        .unwrap();
        assert_eq!(
            upd,
            StateUpdate::new()
                .with_hs(32768, 254)
                .turn_on()
                .with_brightness(254)
        );

        let upd = dispatch(
            ChannelKind::Color,
            &Command::Hsb(hsb),
            &DeviceState::on(100).with_xy([0.3, 0.3]),
            &mut session,
        )
        .unwrap();
        assert_eq!(upd.hs(), None);
        assert_eq!(upd.xy(), Some(hsb.to_xy()));
    }

    #[test]
    fn color_temperature_decrease_from_unknown() {
        let mut session = CommandSession::new(MirekRange::new(200, 400), None);
        let upd = dispatch(
            ChannelKind::ColorTemperature,
            &Command::IncreaseDecrease(Direction::Decrease),
            &DeviceState::on(100),
            &mut session,
        )
        .unwrap();

        assert_eq!(upd.color_temperature(), Some(200));
        assert_eq!(session.last_sent_color_temperature(), Some(200));
    }

    #[test]
    fn alert_tokens() {
        let mut session = CommandSession::default();
        let state = DeviceState::on(100);

        let upd = dispatch(
            ChannelKind::Alert,
            &Command::String("LSELECT".into()),
            &state,
            &mut session,
        );
        assert_eq!(upd, Some(StateUpdate::new().with_alert(AlertMode::LSelect)));

        let upd = dispatch(
            ChannelKind::Alert,
            &Command::String("BLINK".into()),
            &state,
            &mut session,
        );
        assert_eq!(upd, None);
    }

    #[test]
    fn effect_on_off() {
        let mut session = CommandSession::default();
        let upd = dispatch(
            ChannelKind::Effect,
            &Command::OnOff(OnOff::On),
            &DeviceState::on(100),
            &mut session,
        );
        assert_eq!(upd, Some(StateUpdate::new().with_effect(Effect::ColorLoop)));
    }

    #[test]
    fn unsupported_combinations() {
        let mut session = CommandSession::new(MirekRange::DEFAULT, Some(4));
        let state = DeviceState::on(100);

        for (channel, cmd) in [
            (ChannelKind::Switch, Command::Percent(pct(10))),
            (ChannelKind::Effect, Command::String("colorloop".into())),
            (ChannelKind::Alert, Command::OnOff(OnOff::On)),
            (ChannelKind::Brightness, Command::String("bright".into())),
        ] {
            assert_eq!(dispatch(channel, &cmd, &state, &mut session), None);
        }
        assert_eq!(session.last_sent_brightness(), None);
    }

    #[test]
    fn transition_time_is_applied() {
        let mut session = CommandSession::new(MirekRange::DEFAULT, Some(0));
        let upd = dispatch(
            ChannelKind::Switch,
            &Command::OnOff(OnOff::Off),
            &DeviceState::on(100),
            &mut session,
        )
        .unwrap();

        assert_eq!(upd, StateUpdate::new().turn_off().with_transition_time(0));
    }
}
