use crate::host::value::PropValue;
use crate::values::Morphable;
use crate::values::color::Color;
use crate::values::scalar::Scalar;

/// Queued change of one attribute or style.
#[derive(Clone, Debug, PartialEq)]
pub enum Morph {
    Scalar(Scalar),
    Color(Color),
    /// Non-numeric value: holds `from` until the run completes.
    Discrete {
        from: Option<PropValue>,
        to: PropValue,
    },
}

impl Morph {
    /// Choose how to interpolate from the current value.
    ///
    /// Colors morph per channel, unit numbers as [`Scalar`], everything else
    /// switches at the end.
    pub fn select(from: Option<PropValue>, to: PropValue) -> Self {
        match from {
            Some(PropValue::Color(c)) => Self::Color(c.morph(to.to_color())),
            Some(PropValue::Number(v)) => Self::Scalar(Scalar::new(v).morph(to.to_scalar())),
            Some(PropValue::Scalar(s)) => Self::Scalar(s.morph(to.to_scalar())),
            Some(other) => {
                let text = other.to_string();
                if Color::is_color(&text) {
                    Self::Color(Color::parse(&text).morph(to.to_color()))
                } else if Scalar::is_unit_number(&text) {
                    Self::Scalar(Scalar::parse(&text).morph(to.to_scalar()))
                } else {
                    Self::Discrete {
                        from: Some(other),
                        to,
                    }
                }
            }
            None => Self::Discrete { from: None, to },
        }
    }

    /// Value at eased position `pos`; `None` while a discrete morph has no source.
    pub fn at(&self, pos: f64) -> Option<PropValue> {
        match self {
            Self::Scalar(s) => Some(PropValue::Scalar(s.at(pos))),
            Self::Color(c) => Some(PropValue::Color(c.at(pos))),
            Self::Discrete { from, to } => {
                if pos < 1.0 {
                    from.clone()
                } else {
                    Some(to.clone())
                }
            }
        }
    }
}

/// Interpolation helper handed to `during` callbacks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sampler {
    pos: f64,
}

impl Sampler {
    pub(crate) fn new(pos: f64) -> Self {
        Self { pos }
    }

    /// Eased position of the current frame.
    pub fn pos(&self) -> f64 {
        self.pos
    }

    pub fn number(&self, from: f64, to: f64) -> f64 {
        from + (to - from) * self.pos
    }

    /// Interpolate arbitrary values with the same rules as queued attributes.
    pub fn value(&self, from: impl Into<PropValue>, to: impl Into<PropValue>) -> Option<PropValue> {
        Morph::select(Some(from.into()), to.into()).at(self.pos)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/morph.rs"]
mod tests;
