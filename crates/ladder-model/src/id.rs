//! Identifier normalization.
//!
//! Every name that takes part in a lookup or a ban ("Focus Sash", "Drizzle",
//! "[Gen 9] OU") is reduced to an [`Id`]: ASCII lowercase with every
//! non-alphanumeric character removed.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Normalize a display name into its identifier form.
///
/// ```
/// assert_eq!(ladder_model::to_id("[Gen 9] OU"), "gen9ou");
/// assert_eq!(ladder_model::to_id("Will-O-Wisp"), "willowisp");
/// ```
pub fn to_id(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// A normalized identifier.
///
/// Construction always normalizes, so two `Id`s compare equal exactly when
/// their source names normalize to the same string.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Id(String);

impl Id {
    /// Normalize `name` into an identifier.
    pub fn new(name: &str) -> Self {
        Self(to_id(name))
    }

    /// Borrow the normalized form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the source name had no alphanumeric characters.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Id {
    fn from(name: String) -> Self {
        Self::new(&name)
    }
}

impl From<Id> for String {
    fn from(id: Id) -> Self {
        id.0
    }
}

impl Borrow<str> for Id {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Id {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
