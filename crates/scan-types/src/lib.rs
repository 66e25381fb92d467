//! Validated primitive types shared across the body scanner crates.
//!
//! Each type guarantees its invariant once constructed, so code that receives a
//! [`LocationId`] or a [`Severity`] never has to re-check it.

/// Errors that can occur when creating validated primitive types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypesError {
    /// The location identifier was empty or contained only whitespace
    #[error("location identifier cannot be empty")]
    EmptyLocation,
    /// The location identifier exceeded the maximum length
    #[error("location identifier exceeds maximum length of {max} characters")]
    LocationTooLong { max: usize },
    /// The location identifier contained whitespace or control characters
    #[error("location identifier contains invalid characters: {0:?}")]
    InvalidLocationCharacters(String),
    /// The severity score was outside of the accepted range
    #[error("severity must be between {min} and {max}, got {value}")]
    SeverityOutOfRange { value: i64, min: u8, max: u8 },
    /// The severity text was not an integer
    #[error("severity must be an integer, got {0:?}")]
    InvalidSeverity(String),
}

/// A body-location identifier such as `hand_left` or `upper_arm_right`.
///
/// Identifiers are used verbatim as diagram targets and as the unique key of the
/// pain-area collection, so no trimming or case folding is applied. Construction
/// rejects empty input, whitespace, control characters and overlong values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocationId(String);

impl LocationId {
    /// Longest identifier accepted.
    pub const MAX_LEN: usize = 64;

    /// Creates a new `LocationId` from the given input.
    ///
    /// # Errors
    ///
    /// Returns [`TypesError::EmptyLocation`] for empty or whitespace-only input,
    /// [`TypesError::LocationTooLong`] when the input is longer than
    /// [`LocationId::MAX_LEN`] characters, and
    /// [`TypesError::InvalidLocationCharacters`] when it contains whitespace or
    /// control characters.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TypesError> {
        let input = input.as_ref();
        if input.trim().is_empty() {
            return Err(TypesError::EmptyLocation);
        }
        if input.chars().count() > Self::MAX_LEN {
            return Err(TypesError::LocationTooLong { max: Self::MAX_LEN });
        }
        if input
            .chars()
            .any(|c| c.is_whitespace() || c.is_control())
        {
            return Err(TypesError::InvalidLocationCharacters(input.to_owned()));
        }
        Ok(Self(input.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LocationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for LocationId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for LocationId {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl serde::Serialize for LocationId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for LocationId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        LocationId::new(&s).map_err(serde::de::Error::custom)
    }
}

/// A pain severity score in the closed range `1..=10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Severity(u8);

impl Severity {
    /// Lowest accepted score.
    pub const MIN: u8 = 1;
    /// Highest accepted score.
    pub const MAX: u8 = 10;

    /// Creates a new `Severity` from any integer value.
    ///
    /// # Errors
    ///
    /// Returns [`TypesError::SeverityOutOfRange`] if `value` is not within
    /// `Severity::MIN..=Severity::MAX`.
    pub fn new(value: i64) -> Result<Self, TypesError> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            // Range checked above, the cast cannot truncate.
            Ok(Self(value as u8))
        } else {
            Err(TypesError::SeverityOutOfRange {
                value,
                min: Self::MIN,
                max: Self::MAX,
            })
        }
    }

    /// Returns the score as a plain integer.
    pub fn get(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Severity {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<i64>()
            .map_err(|_| TypesError::InvalidSeverity(s.to_owned()))?;
        Self::new(value)
    }
}

impl serde::Serialize for Severity {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u8(self.0)
    }
}

impl<'de> serde::Deserialize<'de> for Severity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = i64::deserialize(deserializer)?;
        Severity::new(value).map_err(serde::de::Error::custom)
    }
}
