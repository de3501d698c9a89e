use std::fmt;
use std::str::FromStr;

use crate::foundation::core::Num;
use crate::foundation::error::{MorphError, MorphResult};
use crate::values::{Lerp, Morphable};

/// Ordered sequence with a length-reconciling morph.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OrderedList<T> {
    value: Vec<T>,
    destination: Option<Vec<T>>,
    padded: usize,
}

impl<T> OrderedList<T>
where
    T: Lerp + Clone + PartialEq,
{
    /// Take `value`, or `fallback` when `value` is empty.
    pub fn new(value: Vec<T>, fallback: &[T]) -> Self {
        let value = if value.is_empty() {
            fallback.to_vec()
        } else {
            value
        };
        Self {
            value,
            destination: None,
            padded: 0,
        }
    }

    pub fn values(&self) -> &[T] {
        &self.value
    }

    pub fn values_mut(&mut self) -> &mut [T] {
        &mut self.value
    }

    pub fn into_values(self) -> Vec<T> {
        self.value
    }

    pub fn destination(&self) -> Option<&[T]> {
        self.destination.as_deref()
    }

    pub fn len(&self) -> usize {
        self.value.len()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Attach `destination`, padding the shorter side with its own last element.
    ///
    /// An empty side takes the other side's entries.
    pub fn morph(mut self, destination: Vec<T>) -> Self {
        let mut destination = destination;
        if self.value.is_empty() {
            self.value = destination.clone();
        } else if destination.is_empty() {
            destination = self.value.clone();
        }
        self.padded = self.value.len().saturating_sub(destination.len());
        if let (Some(last_value), Some(last_dest)) =
            (self.value.last().cloned(), destination.last().cloned())
        {
            while self.value.len() > destination.len() {
                destination.push(last_dest.clone());
            }
            while self.value.len() < destination.len() {
                self.value.push(last_value.clone());
            }
        }
        self.destination = Some(destination);
        self
    }

    /// Destination without the entries `morph` appended to it.
    pub fn settled_destination(&self) -> Option<&[T]> {
        let dest = self.destination.as_deref()?;
        Some(&dest[..dest.len() - self.padded.min(dest.len())])
    }

    /// Drop repeated entries, keeping the first occurrence of each value.
    pub fn settle(&mut self) -> &[T] {
        let mut seen: Vec<T> = Vec::with_capacity(self.value.len());
        for v in self.value.drain(..) {
            if !seen.contains(&v) {
                seen.push(v);
            }
        }
        self.value = seen;
        &self.value
    }

    /// Collapse runs of equal adjacent entries.
    pub fn dedup(&mut self) -> &[T] {
        self.value.dedup();
        &self.value
    }

    pub fn reverse(&mut self) -> &mut Self {
        self.value.reverse();
        self
    }
}

impl<T> Morphable for OrderedList<T>
where
    T: Lerp + Clone + PartialEq,
{
    fn at(&self, pos: f64) -> Self {
        let Some(dest) = &self.destination else {
            return self.clone();
        };
        Self {
            value: self
                .value
                .iter()
                .zip(dest)
                .map(|(a, b)| T::lerp(a, b, pos))
                .collect(),
            destination: None,
            padded: 0,
        }
    }

    fn has_destination(&self) -> bool {
        self.destination.is_some()
    }
}

/// Collapse whitespace runs and split into tokens.
pub(crate) fn split_tokens(s: &str) -> impl Iterator<Item = &str> {
    s.split_whitespace()
}

impl FromStr for OrderedList<f64> {
    type Err = MorphError;

    fn from_str(s: &str) -> MorphResult<Self> {
        let value = split_tokens(s)
            .map(|tok| {
                tok.parse::<f64>()
                    .map_err(|_| MorphError::parse(format!("invalid list number \"{tok}\"")))
            })
            .collect::<MorphResult<Vec<_>>>()?;
        Ok(Self {
            value,
            destination: None,
            padded: 0,
        })
    }
}

impl OrderedList<f64> {
    /// Lenient parse; malformed or empty input yields `fallback`.
    pub fn parse(s: &str, fallback: &[f64]) -> Self {
        match s.parse::<Self>() {
            Ok(list) => Self::new(list.value, fallback),
            Err(err) => {
                tracing::debug!(input = s, %err, "number list fallback");
                Self::new(Vec::new(), fallback)
            }
        }
    }
}

impl<T> From<Vec<T>> for OrderedList<T> {
    fn from(value: Vec<T>) -> Self {
        Self {
            value,
            destination: None,
            padded: 0,
        }
    }
}

impl fmt::Display for OrderedList<f64> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.value.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", Num(*v))?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/values/list.rs"]
mod tests;
