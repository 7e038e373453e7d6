use hue::api::{DeviceState, StateUpdate};
use hue::convert::{BRIGHTNESS_MAX, MirekRange};

use crate::model::channel::Direction;
use crate::model::session::CommandSession;

/// Step size for relative commands, in bridge units (brightness and mirek)
pub const DIM_STEP: i32 = 30;

const fn step(direction: Direction) -> i32 {
    match direction {
        Direction::Increase => DIM_STEP,
        Direction::Decrease => -DIM_STEP,
    }
}

#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn resolve_brightness_change(direction: Direction, current: u8) -> u8 {
    (i32::from(current) + step(direction)).clamp(0, i32::from(BRIGHTNESS_MAX)) as u8
}

#[must_use]
pub fn resolve_color_temp_change(direction: Direction, current: u16, range: MirekRange) -> u16 {
    range.clamp(i32::from(current) + step(direction))
}

/// Update moving a group from brightness `current` to `new`.
///
/// Zero means off. Leaving zero also switches the group on.
#[must_use]
pub const fn create_brightness_state_update(current: u8, new: u8) -> StateUpdate {
    let upd = StateUpdate::new();
    if new == 0 {
        return upd.turn_off();
    }
    if current == 0 {
        upd.turn_on().with_brightness(new)
    } else {
        upd.with_brightness(new)
    }
}

#[must_use]
pub fn brightness_change(
    direction: Direction,
    state: &DeviceState,
    session: &CommandSession,
) -> StateUpdate {
    let current = session.current_brightness(state);
    let new = resolve_brightness_change(direction, current);
    create_brightness_state_update(current, new)
}

#[must_use]
pub fn color_temp_change(
    direction: Direction,
    state: &DeviceState,
    session: &CommandSession,
) -> StateUpdate {
    let current = session.current_color_temperature(state).unwrap_or(0);
    let new = resolve_color_temp_change(direction, current, session.mirek_range());
    StateUpdate::new().with_color_temperature(new)
}
