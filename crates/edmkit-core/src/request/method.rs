use crate::config::ConfigError;
use std::{fmt, str::FromStr};

///
/// HttpMethod
///
/// Verbs a mutation request can carry, on the wire or in the override
/// header.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum HttpMethod {
    Delete,
    Merge,
    Patch,
    Post,
    Put,
}

impl HttpMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Delete => "DELETE",
            Self::Merge => "MERGE",
            Self::Patch => "PATCH",
            Self::Post => "POST",
            Self::Put => "PUT",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

///
/// UpdateKind
///
/// How an update applies to the stored resource.
///

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum UpdateKind {
    /// Full replacement.
    Replace,

    /// Partial update.
    #[default]
    Patch,

    /// Partial update using the legacy MERGE verb.
    Merge,
}

impl UpdateKind {
    pub const ALL: [Self; 3] = [Self::Replace, Self::Patch, Self::Merge];

    #[must_use]
    pub const fn method(self) -> HttpMethod {
        match self {
            Self::Replace => HttpMethod::Put,
            Self::Patch => HttpMethod::Patch,
            Self::Merge => HttpMethod::Merge,
        }
    }
}

impl FromStr for UpdateKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "replace" => Ok(Self::Replace),
            "patch" => Ok(Self::Patch),
            "merge" => Ok(Self::Merge),
            _ => Err(ConfigError::UnknownUpdateKind(s.to_string())),
        }
    }
}

///
/// MutationKind
///
/// Logical intent of a request, independent of how the verb travels.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum MutationKind {
    Create,
    Update(UpdateKind),
    Delete,
}

impl MutationKind {
    #[must_use]
    pub const fn method(self) -> HttpMethod {
        match self {
            Self::Create => HttpMethod::Post,
            Self::Update(kind) => kind.method(),
            Self::Delete => HttpMethod::Delete,
        }
    }
}

///
/// TESTS
///
