//! Shared demographic enums for the PFT workspace.
//!
//! These are the only values the presentation boundaries (CLI, REST) accept for gender and
//! ethnicity. Parsing is strict: an unrecognised string is an error rather than a silent
//! fallback, so the estimators only ever see one of the listed variants.

use std::str::FromStr;

/// Errors that can occur when parsing demographic values.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TypesError {
    /// The input did not name a supported gender
    #[error("unknown gender: {0:?} (expected Male, Female or Other)")]
    UnknownGender(String),
    /// The input did not name a supported ethnicity
    #[error("unknown ethnicity: {0:?} (expected Caucasian, African American, Asian or Other)")]
    UnknownEthnicity(String),
}

/// Patient gender as collected by the intake form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// All variants, in the order the intake form lists them.
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    /// Returns the display form used in reports and on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl FromStr for Gender {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            _ => Err(TypesError::UnknownGender(s.to_owned())),
        }
    }
}

/// Patient ethnicity, used to select the LLN adjustment factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ethnicity {
    Caucasian,
    AfricanAmerican,
    Asian,
    Other,
}

impl Ethnicity {
    /// All variants, in the order the intake form lists them.
    pub const ALL: [Ethnicity; 4] = [
        Ethnicity::Caucasian,
        Ethnicity::AfricanAmerican,
        Ethnicity::Asian,
        Ethnicity::Other,
    ];

    /// Returns the display form used in reports and on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Ethnicity::Caucasian => "Caucasian",
            Ethnicity::AfricanAmerican => "African American",
            Ethnicity::Asian => "Asian",
            Ethnicity::Other => "Other",
        }
    }
}

impl FromStr for Ethnicity {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "caucasian" => Ok(Ethnicity::Caucasian),
            "african american" | "african-american" | "africanamerican" => {
                Ok(Ethnicity::AfricanAmerican)
            }
            "asian" => Ok(Ethnicity::Asian),
            "other" => Ok(Ethnicity::Other),
            _ => Err(TypesError::UnknownEthnicity(s.to_owned())),
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Display for Ethnicity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl serde::Serialize for Gender {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> serde::Deserialize<'de> for Gender {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl serde::Serialize for Ethnicity {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> serde::Deserialize<'de> for Ethnicity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
