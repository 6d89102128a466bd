//! Identifiers for named facts about the world.

use std::fmt;
use std::sync::Arc;

/// An opaque identifier for a named fact, such as `"Wood"` or `"HasAxe"`.
///
/// Identifiers are compared and hashed by name. Cloning is cheap: the name is
/// shared behind an `Arc`, so the same identifier can be copied into every
/// world state, precondition and effect that mentions it.
///
/// # Examples
///
/// ```
/// use forward_goap::SymbolId;
///
/// let wood = SymbolId::new("Wood");
/// assert_eq!(wood, SymbolId::from("Wood"));
/// assert_eq!(wood.name(), "Wood");
/// assert_eq!(wood.to_string(), "Wood");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SymbolId(Arc<str>);

impl SymbolId {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SymbolId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for SymbolId {
    fn from(name: String) -> Self {
        Self(Arc::from(name))
    }
}

impl From<&SymbolId> for SymbolId {
    fn from(symbol: &SymbolId) -> Self {
        symbol.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_equality_by_name() {
        assert_eq!(SymbolId::new("Stone"), SymbolId::from(String::from("Stone")));
        assert_ne!(SymbolId::new("Stone"), SymbolId::new("stone"));
    }

    #[test]
    fn test_hash_by_name() {
        let mut set = HashSet::new();
        set.insert(SymbolId::new("Wood"));
        set.insert(SymbolId::from("Wood"));
        set.insert(SymbolId::new("Stone"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_ordering_is_lexicographic() {
        let mut symbols = vec![SymbolId::new("Wood"), SymbolId::new("AxesAvailable")];
        symbols.sort();
        assert_eq!(symbols[0].name(), "AxesAvailable");
    }
}
