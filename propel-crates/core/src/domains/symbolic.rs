use std::collections::BTreeSet;
use std::sync::Arc;

/// A finite set of symbols (strings or labels).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SymbolicDomain {
    symbols: BTreeSet<Arc<str>>,
}

impl SymbolicDomain {
    pub fn new<S: Into<Arc<str>>>(symbols: impl IntoIterator<Item = S>) -> Self {
        SymbolicDomain {
            symbols: symbols.into_iter().map(Into::into).collect(),
        }
    }

    pub fn symbols(&self) -> impl Iterator<Item = &Arc<str>> + '_ {
        self.symbols.iter()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn is_singleton(&self) -> bool {
        self.symbols.len() == 1
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.contains(symbol)
    }

    pub(crate) fn retain_common(&mut self, other: &SymbolicDomain) -> bool {
        let before = self.symbols.len();
        self.symbols.retain(|symbol| other.symbols.contains(symbol));
        before != self.symbols.len()
    }

    pub(crate) fn remove(&mut self, symbol: &str) -> bool {
        self.symbols.remove(symbol)
    }
}
