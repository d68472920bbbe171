//! Declaration modifiers.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// A single source modifier.
///
/// Variants are ordered the way modifiers are conventionally written, so a
/// [`Modifiers`] set always renders in canonical order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Modifier {
    Public,
    Protected,
    Private,
    Abstract,
    Static,
    Final,
}

/// An ordered set of modifiers.
///
/// ## Examples
///
/// ```
/// use rxgen_define::{Modifier, Modifiers};
///
/// let modifiers = Modifiers::from_iter([Modifier::Static, Modifier::Public]);
/// assert!(modifiers.is_public());
/// assert_eq!(modifiers.to_string(), "public static");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Modifiers(BTreeSet<Modifier>);

impl Modifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, modifier: Modifier) -> bool {
        self.0.contains(&modifier)
    }

    pub fn insert(&mut self, modifier: Modifier) {
        self.0.insert(modifier);
    }

    pub fn remove(&mut self, modifier: Modifier) {
        self.0.remove(&modifier);
    }

    /// Returns a copy with `modifier` added.
    pub fn with(mut self, modifier: Modifier) -> Self {
        self.insert(modifier);
        self
    }

    pub fn is_public(&self) -> bool {
        self.contains(Modifier::Public)
    }

    pub fn is_protected(&self) -> bool {
        self.contains(Modifier::Protected)
    }

    pub fn is_static(&self) -> bool {
        self.contains(Modifier::Static)
    }

    pub fn is_abstract(&self) -> bool {
        self.contains(Modifier::Abstract)
    }

    pub fn is_final(&self) -> bool {
        self.contains(Modifier::Final)
    }

    /// Neither public nor private: protected or package-private.
    pub fn is_restricted(&self) -> bool {
        !self.contains(Modifier::Public) && !self.contains(Modifier::Private)
    }

    pub fn iter(&self) -> impl Iterator<Item = Modifier> + '_ {
        self.0.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Modifier> for Modifiers {
    fn from_iter<I: IntoIterator<Item = Modifier>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, modifier) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{modifier}")?;
        }
        Ok(())
    }
}
