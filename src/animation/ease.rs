use std::f64::consts::PI;
use std::fmt;
use std::rc::Rc;

/// Easing presets, named by their short codes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    /// Cosine ease-in-out.
    #[default]
    #[serde(rename = "<>", alias = "in-out")]
    InOut,
    /// Sine ease-out.
    #[serde(rename = ">", alias = "out")]
    Out,
    /// Cosine ease-in.
    #[serde(rename = "<", alias = "in")]
    In,
    #[serde(rename = "-", alias = "linear")]
    Linear,
}

impl Ease {
    /// Map normalized progress `t` in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        match self {
            Self::InOut => -(t * PI).cos() / 2.0 + 0.5,
            Self::Out => (t * PI / 2.0).sin(),
            Self::In => -(t * PI / 2.0).cos() + 1.0,
            Self::Linear => t,
        }
    }
}

/// A preset or a caller-supplied curve.
#[derive(Clone)]
pub enum Easing {
    Preset(Ease),
    Custom(Rc<dyn Fn(f64) -> f64>),
}

impl Easing {
    pub fn custom(f: impl Fn(f64) -> f64 + 'static) -> Self {
        Self::Custom(Rc::new(f))
    }

    pub fn apply(&self, t: f64) -> f64 {
        match self {
            Self::Preset(e) => e.apply(t),
            Self::Custom(f) => f(t),
        }
    }
}

impl Default for Easing {
    fn default() -> Self {
        Self::Preset(Ease::default())
    }
}

impl From<Ease> for Easing {
    fn from(e: Ease) -> Self {
        Self::Preset(e)
    }
}

impl fmt::Debug for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Preset(e) => f.debug_tuple("Preset").field(e).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl<'de> serde::Deserialize<'de> for Easing {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Ease::deserialize(deserializer).map(Self::Preset)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
