//! Predecessor wiring: turn "each item names the item before it" into an execution sequence.
//!
//! Every item in a [`Catalog`] declares at most one predecessor by key through
//! [`Sequenced::predecessor`]. Wiring checks the declarations (unique keys, known
//! predecessors, exactly one root), adds one dependency per declaration to a
//! [`TopoGraph`] and sorts it.
//!
//! The resulting sequence is cached. Any mutation of the catalog drops the cache, so the next
//! call to [`Catalog::sequence`] wires and sorts again.

use std::fmt;

use parking_lot::Mutex;

#[cfg(feature = "tracing")]
use tracing::debug;

use crate::diagnostics::{self, SharedDiagnostics};
use crate::error::{WiringError, WiringResult};
use crate::graph::TopoGraph;

/// An item that statically declares which item must run before it.
///
/// # Examples
///
/// ```
/// use topograph::{Catalog, Sequenced};
///
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// enum Stage { Load, Transform, Store }
///
/// struct Step(Stage);
///
/// impl Sequenced for Step {
///     type Key = Stage;
///
///     fn key(&self) -> Stage {
///         self.0
///     }
///
///     fn predecessor(&self) -> Option<Stage> {
///         match self.0 {
///             Stage::Load => None,
///             Stage::Transform => Some(Stage::Load),
///             Stage::Store => Some(Stage::Transform),
///         }
///     }
/// }
///
/// let mut catalog = Catalog::new();
/// catalog.extend([Step(Stage::Store), Step(Stage::Load), Step(Stage::Transform)]);
///
/// let order: Vec<Stage> = catalog.sequence().unwrap().iter().map(|s| s.key()).collect();
/// assert_eq!(order, [Stage::Load, Stage::Transform, Stage::Store]);
/// ```
pub trait Sequenced {
    type Key: Clone + PartialEq + fmt::Debug;

    /// Identifier of this item, unique within a catalog.
    fn key(&self) -> Self::Key;

    /// Key of the item that must come directly before this one, if any.
    fn predecessor(&self) -> Option<Self::Key>;
}

/// A closed set of [`Sequenced`] items with a lazily computed, cached sequence.
pub struct Catalog<S> {
    items: Vec<S>,
    sequence: Mutex<Option<Vec<usize>>>,
    diagnostics: SharedDiagnostics,
}

impl<S: Sequenced> Default for Catalog<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Sequenced> Catalog<S> {
    pub fn new() -> Self {
        Self::with_diagnostics(diagnostics::null())
    }

    /// Create an empty catalog that reports wiring problems to `diagnostics`.
    pub fn with_diagnostics(diagnostics: SharedDiagnostics) -> Self {
        Self {
            items: Vec::new(),
            sequence: Mutex::new(None),
            diagnostics,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in the order they were added.
    pub fn items(&self) -> &[S] {
        &self.items
    }

    /// The first item whose key equals `key`.
    pub fn get(&self, key: &S::Key) -> Option<&S> {
        self.items.iter().find(|item| item.key() == *key)
    }

    pub fn add(&mut self, item: S) {
        self.items.push(item);
        self.invalidate();
    }

    /// Remove every item whose key equals `key`. Returns whether anything was removed.
    pub fn remove(&mut self, key: &S::Key) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.key() != *key);

        let removed = self.items.len() != before;
        if removed {
            self.invalidate();
        }
        removed
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.invalidate();
    }

    /// True if the next [`Catalog::sequence`] call has to wire and sort again.
    pub fn is_stale(&self) -> bool {
        self.sequence.lock().is_none()
    }

    /// The items in execution order, root first.
    ///
    /// The order is computed on first use and cached until the catalog changes.
    ///
    /// # Errors
    ///
    /// Returns a [`WiringError`] describing the first configuration problem found, or
    /// [`WiringError::Sort`] if the declarations could not be ordered.
    pub fn sequence(&self) -> WiringResult<Vec<&S>> {
        let mut cached = self.sequence.lock();

        let indices = match cached.as_ref() {
            Some(indices) => indices.clone(),
            None => {
                let indices = match self.wire() {
                    Ok(indices) => indices,
                    Err(err) => {
                        self.diagnostics.error(&err.to_string());
                        return Err(err);
                    }
                };
                *cached = Some(indices.clone());
                indices
            }
        };

        Ok(indices.iter().map(|&index| &self.items[index]).collect())
    }

    fn invalidate(&mut self) {
        *self.sequence.get_mut() = None;
    }

    fn wire(&self) -> WiringResult<Vec<usize>> {
        let keys: Vec<S::Key> = self.items.iter().map(Sequenced::key).collect();
        let index_of = |key: &S::Key| keys.iter().position(|k| k == key);

        for (index, key) in keys.iter().enumerate() {
            if index_of(key) != Some(index) {
                return Err(WiringError::DuplicateKey {
                    key: format!("{key:?}"),
                });
            }
        }

        // Register every item up front so ties follow catalog order
        let mut graph = TopoGraph::new();
        for index in 0..self.items.len() {
            graph.add_value(index);
        }

        let mut roots = Vec::new();

        for (index, item) in self.items.iter().enumerate() {
            let Some(predecessor) = item.predecessor() else {
                roots.push(index);
                continue;
            };

            if predecessor == keys[index] {
                return Err(WiringError::SelfPredecessor {
                    item: format!("{:?}", keys[index]),
                });
            }

            let Some(predecessor_index) = index_of(&predecessor) else {
                return Err(WiringError::UnknownPredecessor {
                    item: format!("{:?}", keys[index]),
                    predecessor: format!("{predecessor:?}"),
                });
            };

            graph.add_dependency(predecessor_index, index);
        }

        match roots.len() {
            0 => return Err(WiringError::NoRoot),
            1 => {}
            _ => {
                return Err(WiringError::MultipleRoots {
                    roots: roots
                        .iter()
                        .map(|&index| format!("{:?}", keys[index]))
                        .collect(),
                })
            }
        }

        #[cfg(feature = "tracing")]
        debug!(
            items = self.items.len(),
            dependencies = graph.dependency_count(),
            "wired catalog"
        );

        let order = graph.sort()?;
        let order: Vec<usize> = order.into_iter().copied().collect();

        self.diagnostics.info(&format!(
            "created execution sequence of {} items starting at {:?}",
            order.len(),
            keys[roots[0]]
        ));

        Ok(order)
    }
}

impl<S: Sequenced> Extend<S> for Catalog<S> {
    fn extend<I: IntoIterator<Item = S>>(&mut self, items: I) {
        self.items.extend(items);
        self.invalidate();
    }
}

impl<S: Sequenced> FromIterator<S> for Catalog<S> {
    fn from_iter<I: IntoIterator<Item = S>>(items: I) -> Self {
        let mut catalog = Self::new();
        catalog.extend(items);
        catalog
    }
}

impl<S: fmt::Debug> fmt::Debug for Catalog<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Catalog")
            .field("items", &self.items)
            .field("cached", &self.sequence.lock().is_some())
            .finish()
    }
}
