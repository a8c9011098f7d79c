//! This module contains the definition of the symbolic state's variable
//! storage.

use imbl::{HashMap, Vector};
use serde::{ser::SerializeMap, Serialize, Serializer};

use crate::term::Term;

/// A mapping from program variables to the symbolic terms they currently
/// denote.
///
/// # Ordering
///
/// Iteration yields the variables in the order in which they were _first_
/// bound. Rebinding a variable replaces its term but keeps its position, while
/// a variable that is removed and later bound again moves to the end.
///
/// # Structural Sharing
///
/// Both the ordering and the bindings are held in `imbl` persistent
/// structures, so cloning a storage is `O(1)` and a clone that is then updated
/// shares all untouched structure with the storage it came from. This is what
/// makes forking a state at a branch cheap.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Storage {
    /// The variable names in first-binding order.
    order: Vector<String>,

    /// The term bound to each variable.
    bindings: HashMap<String, Term>,
}

impl Storage {
    /// Creates a new, empty storage.
    #[must_use]
    pub fn new() -> Self {
        let order = Vector::new();
        let bindings = HashMap::new();
        Self { order, bindings }
    }

    /// Binds `variable` to `term`, replacing any existing binding for that
    /// variable.
    pub fn insert(&mut self, variable: impl Into<String>, term: Term) {
        let variable = variable.into();
        if !self.bindings.contains_key(&variable) {
            self.order.push_back(variable.clone());
        }
        self.bindings.insert(variable, term);
    }

    /// Gets the term bound to `variable`, or [`None`] if it is not bound.
    #[must_use]
    pub fn get(&self, variable: &str) -> Option<&Term> {
        self.bindings.get(variable)
    }

    /// Checks if `variable` is bound in this storage.
    #[must_use]
    pub fn contains(&self, variable: &str) -> bool {
        self.bindings.contains_key(variable)
    }

    /// Removes every binding whose variable is not bound in `scope`, returning
    /// the names of the removed variables in binding order.
    ///
    /// Variables that survive keep both their current term and their position.
    pub fn retain_bound_in(&mut self, scope: &Storage) -> Vec<String> {
        let (kept, removed): (Vec<String>, Vec<String>) = self
            .order
            .iter()
            .cloned()
            .partition(|variable| scope.contains(variable));

        // Untouched storage keeps sharing its structure with the scope.
        if !removed.is_empty() {
            for variable in &removed {
                self.bindings.remove(variable);
            }
            self.order = kept.into_iter().collect();
        }

        removed
    }

    /// Gets the bound variable names in binding order.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Gets the `(variable, term)` pairs in binding order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Term)> {
        self.order.iter().filter_map(|variable| {
            self.bindings.get(variable).map(|term| (variable.as_str(), term))
        })
    }

    /// Gets the number of bound variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Checks if no variables are bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Serializes as a map that preserves binding order.
impl Serialize for Storage {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (variable, term) in self.iter() {
            map.serialize_entry(variable, term)?;
        }
        map.end()
    }
}
