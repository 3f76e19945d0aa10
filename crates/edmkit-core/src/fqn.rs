use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt, str::FromStr};
use thiserror::Error as ThisError;

///
/// FullQualifiedName
///
/// `(namespace, name)` pair identifying one model element. Rendered and
/// parsed as `Namespace.Name`, splitting on the last dot so dotted
/// namespaces survive the round trip.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct FullQualifiedName {
    namespace: String,
    name: String,
}

impl FullQualifiedName {
    #[must_use]
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Split a reference that load-time validation already proved qualified.
    /// A name without a dot lands in the empty namespace and so never
    /// resolves, which is how the registry reports it later.
    #[must_use]
    pub fn split(qualified: &str) -> Self {
        match qualified.rsplit_once('.') {
            Some((namespace, name)) => Self::new(namespace, name),
            None => Self::new("", qualified),
        }
    }

    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Same local name, different namespace.
    #[must_use]
    pub fn with_namespace(&self, namespace: impl Into<String>) -> Self {
        Self::new(namespace, self.name.clone())
    }
}

impl fmt::Display for FullQualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.namespace, self.name)
    }
}

///
/// NamespaceAliases
///
/// Alias → namespace map shared by every schema of one model. References
/// written against an alias are rewritten to the real namespace so FQN
/// equality is the only comparison the registry ever needs.
///

#[derive(Clone, Debug, Default)]
pub struct NamespaceAliases {
    aliases: BTreeMap<String, String>,
}

impl NamespaceAliases {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, alias: impl Into<String>, namespace: impl Into<String>) {
        self.aliases.insert(alias.into(), namespace.into());
    }

    /// Namespace for `namespace_or_alias`; unknown input passes through.
    #[must_use]
    pub fn namespace_of<'a>(&'a self, namespace_or_alias: &'a str) -> &'a str {
        self.aliases
            .get(namespace_or_alias)
            .map_or(namespace_or_alias, String::as_str)
    }

    #[must_use]
    pub fn canonical(&self, fqn: &FullQualifiedName) -> FullQualifiedName {
        match self.aliases.get(fqn.namespace()) {
            Some(namespace) => fqn.with_namespace(namespace.clone()),
            None => fqn.clone(),
        }
    }

    /// Split and canonicalise a declared reference in one step.
    #[must_use]
    pub fn qualify(&self, qualified: &str) -> FullQualifiedName {
        self.canonical(&FullQualifiedName::split(qualified))
    }
}

///
/// FqnParseError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("'{0}' is not a namespace-qualified name")]
pub struct FqnParseError(pub String);

impl FromStr for FullQualifiedName {
    type Err = FqnParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.rsplit_once('.') {
            Some((namespace, name)) if !namespace.is_empty() && !name.is_empty() => {
                Ok(Self::new(namespace, name))
            }
            _ => Err(FqnParseError(s.to_string())),
        }
    }
}

///
/// TESTS
///
