//! Cell resolutions and the active resolution set.

use crate::error::{HexmapError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Granularity level of the hexagonal grid (0 = coarsest, 15 = finest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Resolution(u8);

impl Resolution {
    /// Finest supported resolution.
    pub const MAX: u8 = 15;

    /// Numeric level.
    pub fn get(self) -> u8 {
        self.0
    }

    /// All resolutions, coarsest first.
    pub fn all() -> impl Iterator<Item = Resolution> {
        (0..=Self::MAX).map(Resolution)
    }
}

impl TryFrom<u8> for Resolution {
    type Error = HexmapError;

    fn try_from(value: u8) -> Result<Self> {
        if value > Self::MAX {
            return Err(HexmapError::InvalidResolution(value));
        }
        Ok(Self(value))
    }
}

impl From<Resolution> for u8 {
    fn from(res: Resolution) -> Self {
        res.0
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Non-empty set of active resolutions.
///
/// Keeps first-insertion order: clicks resolve at [`ResolutionSet::primary`],
/// which is whichever resolution was listed first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Resolution>", into = "Vec<Resolution>")]
pub struct ResolutionSet(Vec<Resolution>);

impl ResolutionSet {
    /// Build a set, dropping repeats. Fails if nothing is left.
    pub fn new(resolutions: impl IntoIterator<Item = Resolution>) -> Result<Self> {
        let mut out: Vec<Resolution> = Vec::new();
        for res in resolutions {
            if !out.contains(&res) {
                out.push(res);
            }
        }
        if out.is_empty() {
            return Err(HexmapError::EmptyResolutionSet);
        }
        Ok(Self(out))
    }

    /// Set containing a single resolution.
    pub fn single(res: Resolution) -> Self {
        Self(vec![res])
    }

    /// Parse raw levels, validating each one.
    pub fn from_levels(levels: &[u8]) -> Result<Self> {
        let resolutions = levels
            .iter()
            .map(|&r| Resolution::try_from(r))
            .collect::<Result<Vec<_>>>()?;
        Self::new(resolutions)
    }

    /// Resolution used for clicks.
    pub fn primary(&self) -> Resolution {
        self.0[0]
    }

    pub fn iter(&self) -> impl Iterator<Item = Resolution> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for the `len` lint.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, res: Resolution) -> bool {
        self.0.contains(&res)
    }

    pub fn as_slice(&self) -> &[Resolution] {
        &self.0
    }
}

impl TryFrom<Vec<Resolution>> for ResolutionSet {
    type Error = HexmapError;

    fn try_from(value: Vec<Resolution>) -> Result<Self> {
        Self::new(value)
    }
}

impl From<ResolutionSet> for Vec<Resolution> {
    fn from(set: ResolutionSet) -> Self {
        set.0
    }
}

impl Default for ResolutionSet {
    fn default() -> Self {
        Self(vec![Resolution(7)])
    }
}
