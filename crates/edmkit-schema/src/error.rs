use std::{collections::BTreeMap, fmt};

///
/// ErrorTree
///
/// Route-keyed accumulator for validation messages.
/// Messages attach to the current node; child trees attach under a route
/// segment (e.g. a namespace or element name) so the flattened output reads
/// `Namespace.Element: message`.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ErrorTree {
    messages: Vec<String>,
    children: BTreeMap<String, Self>,
}

impl ErrorTree {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message at this node.
    pub fn add(&mut self, message: impl fmt::Display) {
        self.messages.push(message.to_string());
    }

    /// Merge a child tree under `route`; empty trees are dropped.
    pub fn add_child(&mut self, route: impl Into<String>, child: Self) {
        if child.is_empty() {
            return;
        }

        let route = route.into();
        match self.children.get_mut(&route) {
            Some(existing) => existing.merge(child),
            None => {
                self.children.insert(route, child);
            }
        }
    }

    /// Fold another tree into this one at the same level.
    pub fn merge(&mut self, other: Self) {
        self.messages.extend(other.messages);
        for (route, child) in other.children {
            self.add_child(route, child);
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty() && self.children.values().all(Self::is_empty)
    }

    /// Total number of messages in this tree and all descendants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len() + self.children.values().map(Self::len).sum::<usize>()
    }

    /// Flatten into `(route, message)` pairs, depth first.
    #[must_use]
    pub fn flatten(&self) -> Vec<(String, String)> {
        let mut out = Vec::new();
        self.flatten_into("", &mut out);

        out
    }

    fn flatten_into(&self, prefix: &str, out: &mut Vec<(String, String)>) {
        for message in &self.messages {
            out.push((prefix.to_string(), message.clone()));
        }

        for (route, child) in &self.children {
            let next = if prefix.is_empty() {
                route.clone()
            } else {
                format!("{prefix}.{route}")
            };
            child.flatten_into(&next, out);
        }
    }

    /// `Ok(())` when nothing was recorded, otherwise the tree itself.
    pub fn result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ErrorTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flat = self.flatten();
        for (i, (route, message)) in flat.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            if route.is_empty() {
                write!(f, "{message}")?;
            } else {
                write!(f, "{route}: {message}")?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for ErrorTree {}

/// Record a formatted message on an [`ErrorTree`].
#[macro_export]
macro_rules! err {
    ($errs:expr, $($arg:tt)*) => {
        $errs.add(format!($($arg)*))
    };
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tree_is_ok() {
        assert!(ErrorTree::new().result().is_ok());

        let mut tree = ErrorTree::new();
        tree.add_child("Namespace", ErrorTree::new());
        assert!(tree.result().is_ok(), "empty children should not count");
    }

    #[test]
    fn flatten_joins_routes() {
        let mut leaf = ErrorTree::new();
        err!(leaf, "name '{}' is invalid", "1abc");

        let mut ns = ErrorTree::new();
        ns.add_child("Person", leaf);

        let mut root = ErrorTree::new();
        root.add("top level");
        root.add_child("Demo", ns);

        assert_eq!(root.len(), 2);
        assert_eq!(
            root.flatten(),
            vec![
                (String::new(), "top level".to_string()),
                (
                    "Demo.Person".to_string(),
                    "name '1abc' is invalid".to_string()
                ),
            ]
        );
        assert_eq!(
            root.to_string(),
            "top level\nDemo.Person: name '1abc' is invalid"
        );
    }

    #[test]
    fn children_with_same_route_merge() {
        let mut a = ErrorTree::new();
        a.add("first");
        let mut b = ErrorTree::new();
        b.add("second");

        let mut root = ErrorTree::new();
        root.add_child("X", a);
        root.add_child("X", b);

        assert_eq!(root.len(), 2);
        assert_eq!(root.flatten()[1].0, "X");
    }
}
