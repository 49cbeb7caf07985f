use crate::core::utils::elements;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Integer code identifying the chemical species of an atom.
///
/// The code is usually the atomic number, but any integer is accepted as long as
/// the parameter set uses the same convention. An `AtomType` is only ever used as
/// a lookup key into the per-type and per-pair parameter tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AtomType(pub i32);

#[derive(Debug, Error, PartialEq, Eq)]
#[error("'{0}' is neither an integer atom type nor a known element symbol")]
pub struct AtomTypeParseError(pub String);

impl AtomType {
    pub const fn new(code: i32) -> Self {
        Self(code)
    }

    #[inline]
    pub const fn code(self) -> i32 {
        self.0
    }

    /// Resolves an element symbol (e.g. `"O"`) to the type carrying its atomic number.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        elements::atomic_number(symbol).map(Self)
    }

    /// Returns the element symbol for this type if the code is a valid atomic number.
    pub fn symbol(self) -> Option<&'static str> {
        elements::element_symbol(self.0)
    }

    /// Orders two types so that the smaller one comes first.
    ///
    /// Used to normalize keys of symmetric per-pair tables.
    #[inline]
    pub fn ordered_pair(self, other: AtomType) -> (AtomType, AtomType) {
        if self <= other {
            (self, other)
        } else {
            (other, self)
        }
    }
}

impl From<i32> for AtomType {
    fn from(code: i32) -> Self {
        Self(code)
    }
}

impl FromStr for AtomType {
    type Err = AtomTypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(code) = trimmed.parse::<i32>() {
            return Ok(Self(code));
        }
        Self::from_symbol(trimmed).ok_or_else(|| AtomTypeParseError(s.to_string()))
    }
}

impl fmt::Display for AtomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.symbol() {
            Some(symbol) => write!(f, "{} ({})", self.0, symbol),
            None => write!(f, "{}", self.0),
        }
    }
}
