use crate::{MAX_IDENTIFIER_LEN, MAX_NAMESPACE_LEN};

/// Qualifiers owned by the vocabulary itself. No schema may take one as its
/// namespace or alias.
pub const RESERVED_QUALIFIERS: [&str; 4] = ["Edm", "odata", "System", "Transient"];

/// Ensure a simple identifier is non-empty, bounded, and shaped like
/// `[A-Za-z_][A-Za-z0-9_]*`.
pub(crate) fn validate_identifier(ident: &str) -> Result<(), String> {
    if ident.is_empty() {
        return Err("identifier is empty".to_string());
    }
    if ident.len() > MAX_IDENTIFIER_LEN {
        return Err(format!(
            "identifier '{ident}' exceeds max length {MAX_IDENTIFIER_LEN}"
        ));
    }

    let mut chars = ident.chars();
    let first_ok = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    if !first_ok || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(format!("identifier '{ident}' is not a simple identifier"));
    }

    Ok(())
}

/// Ensure a namespace is a dot-separated list of simple identifiers.
pub(crate) fn validate_namespace(namespace: &str) -> Result<(), String> {
    if namespace.is_empty() {
        return Err("namespace is empty".to_string());
    }
    if namespace.len() > MAX_NAMESPACE_LEN {
        return Err(format!(
            "namespace '{namespace}' exceeds max length {MAX_NAMESPACE_LEN}"
        ));
    }

    for part in namespace.split('.') {
        validate_identifier(part).map_err(|e| format!("namespace '{namespace}': {e}"))?;
    }

    Ok(())
}

/// Reject namespaces and aliases that shadow a reserved qualifier.
pub(crate) fn validate_unreserved(qualifier: &str) -> Result<(), String> {
    if RESERVED_QUALIFIERS.contains(&qualifier) {
        return Err(format!("'{qualifier}' is a reserved qualifier"));
    }

    Ok(())
}

/// Ensure a type or element reference is namespace-qualified.
pub(crate) fn validate_qualified_name(name: &str) -> Result<(), String> {
    let Some((namespace, local)) = name.rsplit_once('.') else {
        return Err(format!("reference '{name}' is not namespace-qualified"));
    };

    validate_namespace(namespace).map_err(|e| format!("reference '{name}': {e}"))?;
    validate_identifier(local).map_err(|e| format!("reference '{name}': {e}"))?;

    Ok(())
}

///
/// TESTS
///
