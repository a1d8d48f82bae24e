//! Pluggable equality strategies.
//!
//! Every identity decision a [`crate::TopoGraph`] makes (node lookup, deduplication, edge
//! deduplication, removal) goes through one [`Comparer`]. Swapping the comparer changes that
//! behavior consistently everywhere.
//!
//! - [`DefaultComparer`]: the value type's own [`PartialEq`]
//! - [`ByKey`]: equality of a derived key
//! - [`CaseInsensitive`]: Unicode case-insensitive string equality
//! - [`FnComparer`]: any closure

use std::fmt;
use std::marker::PhantomData;

/// A binary equality predicate over `T`.
///
/// Implementations must be an equivalence relation (reflexive, symmetric and transitive).
/// The graph trusts this: a comparer that breaks it can register duplicate nodes and skew
/// incoming-edge counts.
///
/// # Examples
///
/// ```
/// use topograph::{Comparer, TopoGraph};
///
/// struct Parity;
///
/// impl Comparer<u32> for Parity {
///     fn equals(&self, a: &u32, b: &u32) -> bool {
///         a % 2 == b % 2
///     }
/// }
///
/// let mut graph = TopoGraph::with_comparer(Parity);
/// graph.add_value(1);
/// graph.add_value(3); // same node as 1
/// assert_eq!(graph.len(), 1);
/// ```
pub trait Comparer<T: ?Sized> {
    fn equals(&self, a: &T, b: &T) -> bool;
}

impl<T: ?Sized, C: Comparer<T> + ?Sized> Comparer<T> for &C {
    fn equals(&self, a: &T, b: &T) -> bool {
        (**self).equals(a, b)
    }
}

/// Uses the value type's own [`PartialEq`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultComparer;

impl<T: PartialEq + ?Sized> Comparer<T> for DefaultComparer {
    fn equals(&self, a: &T, b: &T) -> bool {
        a == b
    }
}

/// Compares values by a key derived from them.
///
/// ```
/// use topograph::{ByKey, TopoGraph};
///
/// #[derive(Debug)]
/// struct Job { id: u32, label: &'static str }
///
/// let mut graph = TopoGraph::with_comparer(ByKey::new(|job: &Job| job.id));
/// let first = graph.add_value(Job { id: 7, label: "build" });
/// let again = graph.add_value(Job { id: 7, label: "rebuild" });
///
/// assert_eq!(first, again);
/// assert_eq!(graph.value(first).map(|j| j.label), Some("build"));
/// ```
pub struct ByKey<F, K> {
    key: F,
    _phantom: PhantomData<fn() -> K>,
}

impl<F, K> ByKey<F, K> {
    pub fn new(key: F) -> Self {
        Self {
            key,
            _phantom: PhantomData,
        }
    }
}

impl<F: Clone, K> Clone for ByKey<F, K> {
    fn clone(&self) -> Self {
        Self::new(self.key.clone())
    }
}

impl<F, K> fmt::Debug for ByKey<F, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByKey")
            .field("key", &std::any::type_name::<K>())
            .finish()
    }
}

impl<T, K, F> Comparer<T> for ByKey<F, K>
where
    T: ?Sized,
    K: PartialEq,
    F: Fn(&T) -> K,
{
    fn equals(&self, a: &T, b: &T) -> bool {
        (self.key)(a) == (self.key)(b)
    }
}

/// Case-insensitive equality for anything that reads as a string.
#[derive(Debug, Clone, Copy, Default)]
pub struct CaseInsensitive;

impl<T: AsRef<str> + ?Sized> Comparer<T> for CaseInsensitive {
    fn equals(&self, a: &T, b: &T) -> bool {
        let (a, b) = (a.as_ref(), b.as_ref());

        // Fast path for ASCII, which covers most identifiers
        if a.is_ascii() && b.is_ascii() {
            return a.eq_ignore_ascii_case(b);
        }

        a.to_lowercase() == b.to_lowercase()
    }
}

/// Adapts a closure into a [`Comparer`].
pub struct FnComparer<F>(F);

impl<F> FnComparer<F> {
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F: Clone> Clone for FnComparer<F> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<F> fmt::Debug for FnComparer<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnComparer")
    }
}

impl<T, F> Comparer<T> for FnComparer<F>
where
    T: ?Sized,
    F: Fn(&T, &T) -> bool,
{
    fn equals(&self, a: &T, b: &T) -> bool {
        (self.0)(a, b)
    }
}
