use crate::{
    config::ConfigError, edm::SchemaError, operation::ResolveError, request::RequestError,
};
use std::fmt;
use thiserror::Error as ThisError;

///
/// Error
///
/// Classified error returned by every fallible core operation.
/// Lookup misses are not errors; they come back as `None`.
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct Error {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,

    /// Typed subsystem error; its variant corresponds to `origin`.
    pub detail: ErrorDetail,
}

impl Error {
    fn from_detail(class: ErrorClass, origin: ErrorOrigin, detail: ErrorDetail) -> Self {
        Self {
            class,
            origin,
            message: detail.to_string(),
            detail,
        }
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}:{}: {}", self.origin, self.class, self.message)
    }

    #[must_use]
    pub const fn is_malformed_schema(&self) -> bool {
        matches!(self.class, ErrorClass::MalformedSchema)
    }

    #[must_use]
    pub const fn is_ambiguous_overload(&self) -> bool {
        matches!(self.class, ErrorClass::AmbiguousOverload)
    }

    #[must_use]
    pub const fn is_no_matching_overload(&self) -> bool {
        matches!(self.class, ErrorClass::NoMatchingOverload)
    }

    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self.class, ErrorClass::InvalidArgument)
    }
}

impl From<SchemaError> for Error {
    fn from(err: SchemaError) -> Self {
        let origin = err.origin();
        Self::from_detail(err.class(), origin, ErrorDetail::Schema(err))
    }
}

impl From<ResolveError> for Error {
    fn from(err: ResolveError) -> Self {
        Self::from_detail(err.class(), ErrorOrigin::Resolver, ErrorDetail::Resolve(err))
    }
}

impl From<RequestError> for Error {
    fn from(err: RequestError) -> Self {
        Self::from_detail(err.class(), ErrorOrigin::Request, ErrorDetail::Request(err))
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::from_detail(err.class(), ErrorOrigin::Config, ErrorDetail::Config(err))
    }
}

///
/// ErrorDetail
///

#[derive(Debug, ThisError)]
pub enum ErrorDetail {
    #[error("{0}")]
    Schema(SchemaError),

    #[error("{0}")]
    Resolve(ResolveError),

    #[error("{0}")]
    Request(RequestError),

    #[error("{0}")]
    Config(ConfigError),
}

///
/// ErrorClass
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    MalformedSchema,
    AmbiguousOverload,
    NoMatchingOverload,
    InvalidArgument,
    Configuration,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::MalformedSchema => "malformed_schema",
            Self::AmbiguousOverload => "ambiguous_overload",
            Self::NoMatchingOverload => "no_matching_overload",
            Self::InvalidArgument => "invalid_argument",
            Self::Configuration => "configuration",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Schema,
    Registry,
    Resolver,
    Request,
    Config,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Schema => "schema",
            Self::Registry => "registry",
            Self::Resolver => "resolver",
            Self::Request => "request",
            Self::Config => "config",
        };
        write!(f, "{label}")
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subsystem_errors_carry_class_and_origin() {
        let err: Error = RequestError::MissingEditLink.into();

        assert_eq!(err.class, ErrorClass::InvalidArgument);
        assert_eq!(err.origin, ErrorOrigin::Request);
        assert_eq!(err.message, "missing edit link");
        assert_eq!(
            err.display_with_class(),
            "request:invalid_argument: missing edit link"
        );
        assert!(matches!(
            err.detail,
            ErrorDetail::Request(RequestError::MissingEditLink)
        ));
    }

    #[test]
    fn config_errors_classify_as_configuration() {
        let err: Error = ConfigError::UnknownUpdateKind("upsert".to_string()).into();

        assert_eq!(err.class, ErrorClass::Configuration);
        assert!(!err.is_invalid_argument());
    }
}
