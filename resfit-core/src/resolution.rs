//! Pixel dimensions of a video frame.
//!
//! A [`Resolution`] is an immutable `(width, height)` pair of strictly
//! positive integers. It prints and parses as `{width}x{height}` with a
//! lowercase `x`, the same form used in input and output filenames.

use crate::error::{CoreError, CoreResult};

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Frame dimensions in pixels. Both axes are always non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Resolution {
    width: u32,
    height: u32,
}

impl Resolution {
    /// Creates a resolution, rejecting a zero width or height.
    pub fn new(width: u32, height: u32) -> CoreResult<Self> {
        if width == 0 || height == 0 {
            return Err(CoreError::InvalidResolution(format!(
                "{width}x{height}: both dimensions must be positive"
            )));
        }
        Ok(Self { width, height })
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Squared Euclidean distance in (width, height) space.
    ///
    /// Exact integer arithmetic, so equal distances compare equal.
    #[must_use]
    pub fn squared_distance(&self, other: &Resolution) -> u128 {
        let dw = u128::from(self.width.abs_diff(other.width));
        let dh = u128::from(self.height.abs_diff(other.height));
        dw * dw + dh * dh
    }

    /// Euclidean distance in (width, height) space.
    #[must_use]
    pub fn distance(&self, other: &Resolution) -> f64 {
        (self.squared_distance(other) as f64).sqrt()
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for Resolution {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        let (w, h) = s.split_once('x').ok_or_else(|| {
            CoreError::InvalidResolution(format!("'{s}' is not of the form WIDTHxHEIGHT"))
        })?;

        let parse_axis = |axis: &str| -> CoreResult<u32> {
            if axis.is_empty() || !axis.bytes().all(|b| b.is_ascii_digit()) {
                return Err(CoreError::InvalidResolution(format!(
                    "'{s}' is not of the form WIDTHxHEIGHT"
                )));
            }
            axis.parse::<u32>().map_err(|e| {
                CoreError::InvalidResolution(format!("'{s}': {e}"))
            })
        };

        Resolution::new(parse_axis(w)?, parse_axis(h)?)
    }
}

// Catalog files may spell entries either as objects or as "WxH" strings.
impl<'de> Deserialize<'de> for Resolution {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawResolution {
            Pair { width: u32, height: u32 },
            Text(String),
        }

        let parsed = match RawResolution::deserialize(deserializer)? {
            RawResolution::Pair { width, height } => Resolution::new(width, height),
            RawResolution::Text(text) => text.parse(),
        };
        parsed.map_err(serde::de::Error::custom)
    }
}
