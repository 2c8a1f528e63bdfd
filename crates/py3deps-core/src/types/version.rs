//! Interpreter version types.
//!
//! Provides the `(major, minor)` Version used for ABI and shebang versions,
//! and VersionRange, the optional min/max window passed to maintenance scripts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Interpreter version (major.minor), ordered lexicographically
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version {
    pub major: u32,
    pub minor: u32,
}

/// Version window: `>= min` and `<< max`, either side may be open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VersionRange {
    pub min: Option<Version>,
    pub max: Option<Version>,
}

/// Version and range parsing errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    #[error("Invalid version format: {input}")]
    InvalidFormat { input: String },

    #[error("Invalid number in version: {component}")]
    InvalidNumber { component: String },

    #[error("Version range is inverted: {min} is greater than {max}")]
    InvertedRange { min: Version, max: Version },

    #[error("Minor version {minor} has no successor")]
    MinorOutOfRange { minor: u32 },
}

impl Version {
    /// Create a new version
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// The exclusive upper bound one minor release past this version.
    ///
    /// Never rolls over into the next major: `3.9` becomes `3.10`.
    /// Saturates at `u32::MAX`, which parsing never produces.
    pub const fn bump_minor(self) -> Self {
        Self {
            major: self.major,
            minor: self.minor.saturating_add(1),
        }
    }

    /// Versioned interpreter package name, e.g. `python3.6`
    pub fn interpreter_name(self) -> String {
        format!("python{}", self)
    }

    /// Parse an interpreter name such as `python3.6` into its version
    pub fn from_interpreter_name(name: &str) -> Result<Self, VersionError> {
        let trimmed = name.trim();
        let version = trimmed
            .strip_prefix("python")
            .ok_or_else(|| VersionError::InvalidFormat {
                input: trimmed.to_string(),
            })?;
        version.parse()
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();

        let (major, minor) = input
            .split_once('.')
            .ok_or_else(|| VersionError::InvalidFormat {
                input: input.to_string(),
            })?;

        let major = major.parse().map_err(|_| VersionError::InvalidNumber {
            component: major.to_string(),
        })?;
        let minor: u32 = minor.parse().map_err(|_| VersionError::InvalidNumber {
            component: minor.to_string(),
        })?;
        if minor == u32::MAX {
            return Err(VersionError::MinorOutOfRange { minor });
        }

        Ok(Version { major, minor })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl TryFrom<String> for Version {
    type Error = VersionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Version> for String {
    fn from(version: Version) -> Self {
        version.to_string()
    }
}

impl From<(u32, u32)> for Version {
    fn from((major, minor): (u32, u32)) -> Self {
        Self::new(major, minor)
    }
}

impl VersionRange {
    /// Create a range from optional bounds
    pub const fn new(min: Option<Version>, max: Option<Version>) -> Self {
        Self { min, max }
    }

    /// Range with only a lower bound
    pub const fn at_least(min: Version) -> Self {
        Self::new(Some(min), None)
    }

    /// Range with only an upper bound
    pub const fn below(max: Version) -> Self {
        Self::new(None, Some(max))
    }

    /// Range covering exactly one version
    pub const fn exact(version: Version) -> Self {
        Self::new(Some(version), Some(version))
    }

    /// Smallest range covering every version in the iterator
    pub fn spanning<I>(versions: I) -> Option<Self>
    where
        I: IntoIterator<Item = Version>,
    {
        let mut iter = versions.into_iter();
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(min, max), v| (min.min(v), max.max(v)));
        Some(Self::new(Some(min), Some(max)))
    }

    /// True when neither side is bounded
    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// Parse a range string; empty input and `-` mean "no window"
    ///
    /// Accepted forms: `3.5`, `3.5-`, `-3.8`, `3.5-3.8`, `>= 3.5, << 3.8`.
    pub fn parse(input: &str) -> Result<Option<Self>, VersionError> {
        let range: VersionRange = input.parse()?;
        if range.is_unbounded() {
            Ok(None)
        } else {
            Ok(Some(range))
        }
    }

    fn parse_relational(input: &str) -> Result<Self, VersionError> {
        let mut range = VersionRange::default();

        for part in input.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            if let Some(v) = part.strip_prefix(">=") {
                range.min = Some(v.parse()?);
            } else if let Some(v) = part.strip_prefix("<<") {
                range.max = Some(v.parse()?);
            } else if let Some(v) = part.strip_prefix('<') {
                range.max = Some(v.parse()?);
            } else {
                return Err(VersionError::InvalidFormat {
                    input: input.to_string(),
                });
            }
        }

        Ok(range)
    }

    fn validate(self) -> Result<Self, VersionError> {
        if let (Some(min), Some(max)) = (self.min, self.max) {
            if min > max {
                return Err(VersionError::InvertedRange { min, max });
            }
        }
        Ok(self)
    }
}

impl FromStr for VersionRange {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();

        if input.is_empty() || input == "-" {
            return Ok(VersionRange::default());
        }

        if input.starts_with(">=") || input.starts_with('<') {
            return Self::parse_relational(input)?.validate();
        }

        let range = match input.split_once('-') {
            None => VersionRange::exact(input.parse()?),
            Some(("", max)) => VersionRange::below(max.parse()?),
            Some((min, "")) => VersionRange::at_least(min.parse()?),
            Some((min, max)) => VersionRange::new(Some(min.parse()?), Some(max.parse()?)),
        };

        range.validate()
    }
}

/// Compact `-V` token: `-`, `3.5`, `3.5-`, `-3.8` or `3.5-3.8`
impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.min, self.max) {
            (None, None) => write!(f, "-"),
            (Some(min), Some(max)) if min == max => write!(f, "{}", min),
            (Some(min), None) => write!(f, "{}-", min),
            (None, Some(max)) => write!(f, "-{}", max),
            (Some(min), Some(max)) => write!(f, "{}-{}", min, max),
        }
    }
}

impl TryFrom<String> for VersionRange {
    type Error = VersionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<VersionRange> for String {
    fn from(range: VersionRange) -> Self {
        range.to_string()
    }
}
