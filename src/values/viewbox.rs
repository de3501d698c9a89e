use std::fmt;
use std::str::FromStr;

use crate::foundation::core::{BBox, Num};
use crate::foundation::error::{MorphError, MorphResult};
use crate::values::{Lerp, Morphable};

/// `viewBox` rectangle (`"x y width height"`).
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ViewBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(skip)]
    destination: Option<[f64; 4]>,
}

impl ViewBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            destination: None,
        }
    }

    /// Lenient parse; malformed input is the zero box.
    pub fn parse(s: &str) -> Self {
        s.parse().unwrap_or_else(|err| {
            tracing::debug!(input = s, %err, "viewbox fallback");
            Self::default()
        })
    }

    pub fn morph(mut self, destination: impl Into<ViewBox>) -> Self {
        let d = destination.into();
        self.destination = Some([d.x, d.y, d.width, d.height]);
        self
    }

    pub fn destination(&self) -> Option<ViewBox> {
        self.destination.map(|[x, y, w, h]| Self::new(x, y, w, h))
    }

    pub fn to_bbox(self) -> BBox {
        BBox::new(self.x, self.y, self.width, self.height)
    }
}

impl Morphable for ViewBox {
    fn at(&self, pos: f64) -> Self {
        let Some([x, y, w, h]) = self.destination else {
            return *self;
        };
        Self::new(
            f64::lerp(&self.x, &x, pos),
            f64::lerp(&self.y, &y, pos),
            f64::lerp(&self.width, &w, pos),
            f64::lerp(&self.height, &h, pos),
        )
    }

    fn has_destination(&self) -> bool {
        self.destination.is_some()
    }
}

impl FromStr for ViewBox {
    type Err = MorphError;

    fn from_str(s: &str) -> MorphResult<Self> {
        let parts = s
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|p| !p.is_empty())
            .map(|p| {
                p.parse::<f64>()
                    .map_err(|_| MorphError::parse(format!("invalid viewbox number \"{p}\"")))
            })
            .collect::<MorphResult<Vec<_>>>()?;
        match parts[..] {
            [x, y, w, h] => Ok(Self::new(x, y, w, h)),
            _ => Err(MorphError::parse(format!(
                "viewbox needs 4 numbers, got {} in \"{s}\"",
                parts.len()
            ))),
        }
    }
}

impl fmt::Display for ViewBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            Num(self.x),
            Num(self.y),
            Num(self.width),
            Num(self.height)
        )
    }
}

impl From<BBox> for ViewBox {
    fn from(b: BBox) -> Self {
        Self::new(b.x, b.y, b.width, b.height)
    }
}

impl From<(f64, f64, f64, f64)> for ViewBox {
    fn from((x, y, w, h): (f64, f64, f64, f64)) -> Self {
        Self::new(x, y, w, h)
    }
}

impl From<&str> for ViewBox {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}
