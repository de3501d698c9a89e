use std::fmt;
use std::str::FromStr;

use crate::foundation::core::{Num, leading_float};
use crate::foundation::error::{MorphError, MorphResult};
use crate::values::Morphable;

/// Largest magnitude a non-finite input is clamped to.
pub const SCALAR_LIMIT: f64 = 3.4e38;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Unit {
    #[default]
    None,
    /// Stored as a fraction: `"50%"` holds `0.5`.
    Percent,
    /// Stored in milliseconds: `"2s"` holds `2000`.
    Seconds,
    /// Any other short unit code, kept verbatim (`px`, `em`, `ms`).
    Other(String),
}

impl Unit {
    pub fn suffix(&self) -> &str {
        match self {
            Self::None => "",
            Self::Percent => "%",
            Self::Seconds => "s",
            Self::Other(code) => code,
        }
    }

    fn from_suffix(code: &str) -> Self {
        match code {
            "" => Self::None,
            "%" => Self::Percent,
            "s" => Self::Seconds,
            other => Self::Other(other.to_owned()),
        }
    }
}

/// Unit-aware number.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scalar {
    pub value: f64,
    pub unit: Unit,
    destination: Option<Box<Scalar>>,
}

impl Scalar {
    /// Wrap a raw number; NaN becomes `0`, infinities clamp to `±3.4e38`.
    pub fn new(value: f64) -> Self {
        Self::with_unit(value, Unit::None)
    }

    pub fn with_unit(value: f64, unit: Unit) -> Self {
        let value = if value.is_nan() {
            0.0
        } else if value.is_infinite() {
            SCALAR_LIMIT.copysign(value)
        } else {
            value
        };
        Self {
            value,
            unit,
            destination: None,
        }
    }

    /// Lenient parse: anything that does not read as `<number><unit>` is `0`.
    pub fn parse(s: &str) -> Self {
        s.parse().unwrap_or_else(|err| {
            tracing::debug!(input = s, %err, "scalar fallback to 0");
            Self::default()
        })
    }

    /// Whether `s` reads as `<number><unit>` with a unit of at most two characters.
    pub fn is_unit_number(s: &str) -> bool {
        s == s.trim() && s.parse::<Self>().is_ok()
    }

    pub fn destination(&self) -> Option<&Scalar> {
        self.destination.as_deref()
    }

    pub fn plus(mut self, other: impl Into<Scalar>) -> Self {
        self.value += other.into().value;
        self
    }

    pub fn minus(mut self, other: impl Into<Scalar>) -> Self {
        self.value -= other.into().value;
        self
    }

    pub fn times(mut self, other: impl Into<Scalar>) -> Self {
        self.value *= other.into().value;
        self
    }

    pub fn divide(mut self, other: impl Into<Scalar>) -> Self {
        self.value /= other.into().value;
        self
    }

    /// Relabel the unit; the magnitude is not converted.
    pub fn to(mut self, unit: Unit) -> Self {
        self.unit = unit;
        self
    }

    pub fn morph(mut self, destination: impl Into<Scalar>) -> Self {
        let mut dest = destination.into();
        dest.destination = None;
        self.destination = Some(Box::new(dest));
        self
    }

    fn detached(&self) -> Self {
        Self {
            value: self.value,
            unit: self.unit.clone(),
            destination: None,
        }
    }
}

impl Morphable for Scalar {
    fn at(&self, pos: f64) -> Self {
        match &self.destination {
            Some(dest) => dest
                .detached()
                .minus(self.detached())
                .times(pos)
                .plus(self.detached()),
            None => self.clone(),
        }
    }

    fn has_destination(&self) -> bool {
        self.destination.is_some()
    }
}

impl FromStr for Scalar {
    type Err = MorphError;

    fn from_str(s: &str) -> MorphResult<Self> {
        let s = s.trim();
        let bytes = s.as_bytes();
        let mut i = usize::from(bytes.first() == Some(&b'-'));
        while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b'.') {
            i += 1;
        }
        let (number, unit) = s.split_at(i);
        let unit_ok = unit.len() <= 2
            && unit
                .bytes()
                .all(|b| b.is_ascii_lowercase() || b == b'%');
        if !unit_ok {
            return Err(MorphError::parse(format!("invalid unit in \"{s}\"")));
        }
        let mut value = leading_float(number)
            .ok_or_else(|| MorphError::parse(format!("invalid number in \"{s}\"")))?;

        let unit = Unit::from_suffix(unit);
        match unit {
            Unit::Percent => value /= 100.0,
            Unit::Seconds => value *= 1000.0,
            _ => {}
        }
        Ok(Self::with_unit(value, unit))
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown = match self.unit {
            Unit::Percent => (self.value * 1e8).trunc() / 1e6,
            Unit::Seconds => self.value / 1e3,
            _ => self.value,
        };
        write!(f, "{}{}", Num(shown), self.unit.suffix())
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Self::new(f64::from(value))
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<&Scalar> for Scalar {
    fn from(s: &Scalar) -> Self {
        s.detached()
    }
}

impl serde::Serialize for Scalar {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for Scalar {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(f64),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Number(v) => Ok(Self::new(v)),
            Repr::Text(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/values/scalar.rs"]
mod tests;
