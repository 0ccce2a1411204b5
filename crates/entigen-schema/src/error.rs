use serde::Serialize;
use std::fmt;

///
/// ErrorTree
///
/// Collects validation issues keyed by route.
/// Validation is non-failing at the traversal level: all issues are
/// gathered and returned together so the caller can act on each one.
///

#[derive(Clone, Debug, Default, Serialize)]
pub struct ErrorTree {
    entries: Vec<Entry>,
}

#[derive(Clone, Debug, Serialize)]
struct Entry {
    route: String,
    message: String,
}

impl ErrorTree {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Record an issue with no specific route.
    pub fn add(&mut self, message: impl Into<String>) {
        self.add_at(String::new(), message);
    }

    /// Record an issue at a route within the node being validated.
    pub fn add_at(&mut self, route: impl Into<String>, message: impl Into<String>) {
        self.entries.push(Entry {
            route: route.into(),
            message: message.into(),
        });
    }

    /// Fold a child tree into this one under a route prefix.
    pub fn merge(&mut self, route: impl Into<String>, child: Self) {
        let route = route.into();

        for entry in child.entries {
            let route = if entry.route.is_empty() {
                route.clone()
            } else {
                format!("{route}.{}", entry.route)
            };

            self.entries.push(Entry {
                route,
                message: entry.message,
            });
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterate `(route, message)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|e| (e.route.as_str(), e.message.as_str()))
    }

    /// Resolve into a Result, consuming the tree.
    pub fn result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ErrorTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} issue(s)", self.entries.len())?;

        for entry in &self.entries {
            if entry.route.is_empty() {
                write!(f, "; {}", entry.message)?;
            } else {
                write!(f, "; {}: {}", entry.route, entry.message)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for ErrorTree {}

/// Push a formatted issue onto an [`ErrorTree`].
#[macro_export]
macro_rules! err {
    ($errs:expr, $($arg:tt)*) => {
        $errs.add(format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tree_resolves_ok() {
        assert!(ErrorTree::new().result().is_ok());
    }

    #[test]
    fn entries_are_kept_in_insertion_order() {
        let mut errs = ErrorTree::new();
        err!(errs, "first");
        errs.add_at("properties.0", "second");

        let collected: Vec<_> = errs.iter().collect();
        assert_eq!(collected, vec![("", "first"), ("properties.0", "second")]);
    }

    #[test]
    fn merge_prefixes_child_routes() {
        let mut child = ErrorTree::new();
        child.add("missing type");
        child.add_at("name", "empty");

        let mut parent = ErrorTree::new();
        parent.merge("properties.2", child);

        let collected: Vec<_> = parent.iter().collect();
        assert_eq!(
            collected,
            vec![
                ("properties.2", "missing type"),
                ("properties.2.name", "empty"),
            ]
        );
    }
}
