use serde::{Deserialize, Serialize};

use crate::color::Percent;

pub const HUE_FACTOR: f64 = 65535.0 / 360.0;
pub const SATURATION_FACTOR: f64 = 2.54;
pub const BRIGHTNESS_FACTOR: f64 = 2.54;

pub const BRIGHTNESS_MAX: u8 = 255;

/// Brightness for a commanded percentage. Rounds up, so any non-zero
/// percentage yields a non-zero brightness.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn brightness_from_percent(pct: Percent) -> u8 {
    (pct.as_f64() * BRIGHTNESS_FACTOR).ceil() as u8
}

#[must_use]
pub fn brightness_to_percent(bri: u8) -> Percent {
    Percent::saturating(f64::from(bri) / BRIGHTNESS_FACTOR)
}

#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn saturation_from_percent(pct: Percent) -> u8 {
    (pct.as_f64() * SATURATION_FACTOR).round() as u8
}

#[must_use]
pub fn saturation_to_percent(sat: u8) -> Percent {
    Percent::saturating(f64::from(sat) / SATURATION_FACTOR)
}

#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn hue_from_degrees(degrees: f64) -> u16 {
    (degrees.rem_euclid(360.0) * HUE_FACTOR)
        .round()
        .clamp(0.0, f64::from(u16::MAX)) as u16
}

#[must_use]
pub fn hue_to_degrees(hue: u16) -> f64 {
    (f64::from(hue) / HUE_FACTOR).round()
}

/// Color temperature range a group supports, in mirek
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MirekRange {
    pub min: u16,
    pub max: u16,
}

impl MirekRange {
    pub const DEFAULT: Self = Self { min: 153, max: 500 };

    #[must_use]
    pub const fn new(min: u16, max: u16) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    #[must_use]
    pub const fn span(self) -> u16 {
        self.max - self.min
    }

    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn clamp(self, mirek: i32) -> u16 {
        mirek.clamp(i32::from(self.min), i32::from(self.max)) as u16
    }

    /// 0% is the coolest (lowest mirek) end of the range
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_percent(self, pct: Percent) -> u16 {
        let offset = (f64::from(self.span()) * pct.as_f64() / 100.0).round() as u16;
        self.min + offset.min(self.span())
    }

    #[must_use]
    pub fn to_percent(self, mirek: u16) -> Percent {
        if self.span() == 0 {
            return Percent::ZERO;
        }
        let offset = f64::from(mirek) - f64::from(self.min);
        Percent::saturating(offset * 100.0 / f64::from(self.span()))
    }
}

impl Default for MirekRange {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use crate::color::Percent;
    use crate::convert::{self, MirekRange};

    fn pct(value: u8) -> Percent {
        Percent::new(value).unwrap()
    }

    #[test]
    fn brightness_scale() {
        assert_eq!(convert::brightness_from_percent(Percent::ZERO), 0);
        assert_eq!(convert::brightness_from_percent(pct(1)), 3);
        assert_eq!(convert::brightness_from_percent(pct(50)), 127);
        assert_eq!(convert::brightness_from_percent(Percent::HUNDRED), 254);

        assert_eq!(convert::brightness_to_percent(30), pct(12));
        assert_eq!(convert::brightness_to_percent(254), Percent::HUNDRED);
        assert_eq!(convert::brightness_to_percent(255), Percent::HUNDRED);
    }

    #[test]
    fn hue_scale() {
        assert_eq!(convert::hue_from_degrees(0.0), 0);
        assert_eq!(convert::hue_from_degrees(180.0), 32768);
        assert!((convert::hue_to_degrees(32768) - 180.0).abs() < f64::EPSILON);
        assert!((convert::hue_to_degrees(u16::MAX) - 360.0).abs() < f64::EPSILON);
    }

    #[test]
    fn mirek_range_percent() {
        let range = MirekRange::DEFAULT;
        assert_eq!(range.from_percent(Percent::ZERO), 153);
        assert_eq!(range.from_percent(Percent::HUNDRED), 500);
        assert_eq!(range.from_percent(pct(50)), 327);

        assert_eq!(range.to_percent(153), Percent::ZERO);
        assert_eq!(range.to_percent(500), Percent::HUNDRED);
        assert_eq!(range.to_percent(100), Percent::ZERO);
        assert_eq!(range.to_percent(600), Percent::HUNDRED);
    }

    #[test]
    fn mirek_range_normalizes_bounds() {
        let range = MirekRange::new(400, 200);
        assert_eq!(range, MirekRange { min: 200, max: 400 });
        assert_eq!(range.clamp(0), 200);
        assert_eq!(range.clamp(1000), 400);

        assert_eq!(MirekRange::new(300, 300).to_percent(300), Percent::ZERO);
    }
}
