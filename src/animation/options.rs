use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::animation::ease::Easing;
use crate::foundation::error::{MorphError, MorphResult};
use crate::values::scalar::Scalar;

pub const DEFAULT_DURATION_MS: f64 = 1000.0;

/// Run length of an animation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Timing {
    Millis(f64),
    /// No time-based run; queued values land on `stop(true)`.
    Untimed,
}

impl Default for Timing {
    fn default() -> Self {
        Self::Millis(DEFAULT_DURATION_MS)
    }
}

impl From<f64> for Timing {
    fn from(ms: f64) -> Self {
        Self::Millis(ms)
    }
}

impl FromStr for Timing {
    type Err = MorphError;

    /// `"="` is untimed; anything else is a duration (`"250"`, `"2s"`).
    fn from_str(s: &str) -> MorphResult<Self> {
        if s.trim() == "=" {
            return Ok(Self::Untimed);
        }
        parse_millis(s).map(Self::Millis)
    }
}

fn parse_millis(s: &str) -> MorphResult<f64> {
    s.parse::<Scalar>()
        .map(|v| v.value)
        .map_err(|e| MorphError::parse(format!("invalid duration \"{s}\": {e}")))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MillisRepr {
    Number(f64),
    Text(String),
}

impl Serialize for Timing {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Millis(ms) => serializer.serialize_f64(*ms),
            Self::Untimed => serializer.serialize_str("="),
        }
    }
}

impl<'de> Deserialize<'de> for Timing {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match MillisRepr::deserialize(deserializer)? {
            MillisRepr::Number(ms) => Ok(Self::Millis(ms)),
            MillisRepr::Text(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}

fn deserialize_millis<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    match MillisRepr::deserialize(deserializer)? {
        MillisRepr::Number(ms) => Ok(ms),
        MillisRepr::Text(s) => parse_millis(&s).map_err(serde::de::Error::custom),
    }
}

/// Repeat policy after a run completes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Loop {
    Forever,
    /// Total number of runs, including the first.
    Times(u32),
}

impl From<u32> for Loop {
    /// `0` means forever.
    fn from(n: u32) -> Self {
        if n == 0 { Self::Forever } else { Self::Times(n) }
    }
}

impl From<bool> for Loop {
    fn from(forever: bool) -> Self {
        if forever { Self::Forever } else { Self::Times(1) }
    }
}

impl<'de> Deserialize<'de> for Loop {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Flag(bool),
            Count(u32),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Flag(b) => b.into(),
            Repr::Count(n) => n.into(),
        })
    }
}

/// Parameters of one `animate` call.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnimOptions {
    pub duration: Timing,
    pub ease: Easing,
    /// Start delay in milliseconds.
    #[serde(deserialize_with = "deserialize_millis")]
    pub delay: f64,
}

impl Default for AnimOptions {
    fn default() -> Self {
        Self {
            duration: Timing::default(),
            ease: Easing::default(),
            delay: 0.0,
        }
    }
}

impl AnimOptions {
    pub fn new(duration_ms: f64) -> Self {
        Self {
            duration: Timing::Millis(duration_ms),
            ..Self::default()
        }
    }

    pub fn untimed() -> Self {
        Self {
            duration: Timing::Untimed,
            ..Self::default()
        }
    }

    pub fn ease(mut self, ease: impl Into<Easing>) -> Self {
        self.ease = ease.into();
        self
    }

    pub fn delay(mut self, ms: f64) -> Self {
        self.delay = ms;
        self
    }

    /// Parse and validate options from JSON.
    pub fn from_json(json: &str) -> MorphResult<Self> {
        let opts: Self = serde_json::from_str(json)?;
        opts.validate()?;
        Ok(opts)
    }

    pub fn validate(&self) -> MorphResult<()> {
        if let Timing::Millis(ms) = self.duration
            && !(ms.is_finite() && ms >= 0.0)
        {
            return Err(MorphError::validation(format!(
                "duration must be a finite, non-negative number of ms (got {ms})"
            )));
        }
        if !(self.delay.is_finite() && self.delay >= 0.0) {
            return Err(MorphError::validation(format!(
                "delay must be a finite, non-negative number of ms (got {})",
                self.delay
            )));
        }
        Ok(())
    }
}

impl From<f64> for AnimOptions {
    fn from(duration_ms: f64) -> Self {
        Self::new(duration_ms)
    }
}

impl From<Timing> for AnimOptions {
    fn from(duration: Timing) -> Self {
        Self {
            duration,
            ..Self::default()
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/options.rs"]
mod tests;
