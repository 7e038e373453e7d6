use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{HueError, HueResult};

/// Whole-number percentage in `0..=100`
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Percent(u8);

impl Percent {
    pub const ZERO: Self = Self(0);
    pub const HUNDRED: Self = Self(100);

    pub fn new(value: u8) -> HueResult<Self> {
        if value > 100 {
            Err(HueError::PercentOutOfRange(i64::from(value)))
        } else {
            Ok(Self(value))
        }
    }

    /// Round and clamp an arbitrary value into a percentage
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn saturating(value: f64) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        Self(value.round().clamp(0.0, 100.0) as u8)
    }

    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    #[must_use]
    pub fn as_f64(self) -> f64 {
        f64::from(self.0)
    }

    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl TryFrom<u8> for Percent {
    type Error = HueError;

    fn try_from(value: u8) -> HueResult<Self> {
        Self::new(value)
    }
}

impl From<Percent> for u8 {
    fn from(value: Percent) -> Self {
        value.0
    }
}

impl Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Percent {
    type Err = HueError;

    fn from_str(s: &str) -> HueResult<Self> {
        let value: i64 = s.trim().parse()?;
        u8::try_from(value)
            .ok()
            .filter(|v| *v <= 100)
            .map(Self)
            .ok_or(HueError::PercentOutOfRange(value))
    }
}

/// Hue (degrees), saturation and brightness, as used by the host color channel
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hsb {
    pub hue: f64,
    pub saturation: Percent,
    pub brightness: Percent,
}

/* CIE 1931 white point (D65), reported for inputs without chromaticity */
const WHITE_POINT: [f64; 2] = [0.3127, 0.3290];

fn gamma_expand(c: f64) -> f64 {
    if c > 0.04045 {
        ((c + 0.055) / 1.055).powf(2.4)
    } else {
        c / 12.92
    }
}

fn gamma_compress(c: f64) -> f64 {
    if c <= 0.003_130_8 {
        12.92 * c
    } else {
        1.055f64.mul_add(c.powf(1.0 / 2.4), -0.055)
    }
}

impl Hsb {
    #[must_use]
    pub fn new(hue: f64, saturation: Percent, brightness: Percent) -> Self {
        Self {
            hue: hue.rem_euclid(360.0),
            saturation,
            brightness,
        }
    }

    #[must_use]
    pub const fn with_brightness(self, brightness: Percent) -> Self {
        Self { brightness, ..self }
    }

    fn to_rgb(self) -> [f64; 3] {
        let v = self.brightness.as_f64() / 100.0;
        let s = self.saturation.as_f64() / 100.0;
        let h = self.hue.rem_euclid(360.0) / 60.0;

        let c = v * s;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let m = v - c;

        let (r, g, b) = match h {
            h if h < 1.0 => (c, x, 0.0),
            h if h < 2.0 => (x, c, 0.0),
            h if h < 3.0 => (0.0, c, x),
            h if h < 4.0 => (0.0, x, c),
            h if h < 5.0 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        [r + m, g + m, b + m]
    }

    fn from_rgb([r, g, b]: [f64; 3]) -> Self {
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let hue = if delta <= f64::EPSILON {
            0.0
        } else if (max - r).abs() <= f64::EPSILON {
            60.0 * ((g - b) / delta).rem_euclid(6.0)
        } else if (max - g).abs() <= f64::EPSILON {
            60.0 * ((b - r) / delta + 2.0)
        } else {
            60.0 * ((r - g) / delta + 4.0)
        };

        let saturation = if max <= f64::EPSILON {
            0.0
        } else {
            delta / max
        };

        Self::new(
            hue,
            Percent::saturating(saturation * 100.0),
            Percent::saturating(max * 100.0),
        )
    }

    /// CIE xy chromaticity for this color (brightness is not represented)
    #[must_use]
    pub fn to_xy(self) -> [f64; 2] {
        let [r, g, b] = self.with_brightness(Percent::HUNDRED).to_rgb().map(gamma_expand);

        let x = r.mul_add(0.664_511, g.mul_add(0.154_324, b * 0.162_028));
        let y = r.mul_add(0.283_881, g.mul_add(0.668_433, b * 0.047_685));
        let z = r.mul_add(0.000_088, g.mul_add(0.072_310, b * 0.986_039));

        let sum = x + y + z;
        if sum <= f64::EPSILON {
            return WHITE_POINT;
        }

        [x / sum, y / sum]
    }

    /// Color for a CIE xy chromaticity, at full brightness
    #[must_use]
    pub fn from_xy([x, y]: [f64; 2]) -> Self {
        if y <= f64::EPSILON {
            return Self::new(0.0, Percent::ZERO, Percent::HUNDRED);
        }

        let z = 1.0 - x - y;
        let big_x = x / y;
        let big_z = z / y;

        let rgb = [
            big_x.mul_add(1.656_492, big_z.mul_add(-0.255_038, -0.354_851)),
            big_x.mul_add(-0.707_196, big_z.mul_add(0.036_152, 1.655_397)),
            big_x.mul_add(0.051_713, big_z.mul_add(1.011_530, -0.121_364)),
        ]
        .map(|c| c.max(0.0));

        let max = rgb.iter().copied().fold(0.0, f64::max);
        if max <= f64::EPSILON {
            return Self::new(0.0, Percent::ZERO, Percent::HUNDRED);
        }
        let rgb = rgb.map(|c| gamma_compress(c / max.max(1.0)));

        let max = rgb.iter().copied().fold(0.0, f64::max);
        Self::from_rgb(rgb.map(|c| c / max)).with_brightness(Percent::HUNDRED)
    }
}

impl Display for Hsb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.hue, self.saturation, self.brightness)
    }
}

impl FromStr for Hsb {
    type Err = HueError;

    fn from_str(s: &str) -> HueResult<Self> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        let [hue, sat, bri] = parts.as_slice() else {
            return Err(HueError::InvalidColor(s.to_string()));
        };

        let hue: f64 = hue.parse()?;
        let sat: f64 = sat.parse()?;
        let bri: f64 = bri.parse()?;

        if !(0.0..=360.0).contains(&hue)
            || !(0.0..=100.0).contains(&sat)
            || !(0.0..=100.0).contains(&bri)
        {
            return Err(HueError::InvalidColor(s.to_string()));
        }

        Ok(Self::new(
            hue,
            Percent::saturating(sat),
            Percent::saturating(bri),
        ))
    }
}
