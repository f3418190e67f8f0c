//! `PropertySet` for pass communication.
//!
//! Passes share flags and results through a [`PropertySet`]. The set holds a
//! few standard fields and any number of custom values keyed by type.
//!
//! # Examples
//!
//! ```
//! use machgrover_compile::{PropertySet, SynthesisStats};
//!
//! let mut props = PropertySet::new().with_toffoli_expansion();
//! assert!(props.expand_toffoli);
//!
//! props.insert(SynthesisStats { mcx_lowered: 3, ops_emitted: 40 });
//! assert_eq!(props.get::<SynthesisStats>().unwrap().mcx_lowered, 3);
//! ```

use rustc_hash::FxHashMap;
use std::any::{Any, TypeId};

/// Counters written by [`McxSynthesis`](crate::passes::McxSynthesis).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SynthesisStats {
    /// Multi-controlled X gates that were lowered.
    pub mcx_lowered: usize,
    /// Elementary gates emitted in their place.
    pub ops_emitted: usize,
}

/// Counters written by [`CancelInversePairs`](crate::passes::CancelInversePairs).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CancellationStats {
    /// Gates removed, counted individually.
    pub removed: usize,
}

/// Shared properties passed between compilation passes.
#[derive(Default)]
pub struct PropertySet {
    /// Lower every Toffoli to Clifford+T.
    ///
    /// Read by [`ToffoliExpansion`](crate::passes::ToffoliExpansion).
    pub expand_toffoli: bool,

    /// Custom properties storage (type-erased).
    custom: FxHashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl PropertySet {
    /// Create a new empty property set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request Toffoli expansion.
    #[must_use]
    pub fn with_toffoli_expansion(mut self) -> Self {
        self.expand_toffoli = true;
        self
    }

    /// Insert a custom property.
    pub fn insert<T: Any + Send + Sync>(&mut self, value: T) {
        self.custom.insert(TypeId::of::<T>(), Box::new(value));
    }

    /// Get a custom property.
    pub fn get<T: Any>(&self) -> Option<&T> {
        self.custom
            .get(&TypeId::of::<T>())
            .and_then(|v| v.downcast_ref())
    }

    /// Get a mutable custom property.
    pub fn get_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.custom
            .get_mut(&TypeId::of::<T>())
            .and_then(|v| v.downcast_mut())
    }

    /// Remove a custom property.
    pub fn remove<T: Any>(&mut self) -> Option<T> {
        self.custom
            .remove(&TypeId::of::<T>())
            .and_then(|v| v.downcast().ok())
            .map(|v| *v)
    }
}

impl std::fmt::Debug for PropertySet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertySet")
            .field("expand_toffoli", &self.expand_toffoli)
            .field("custom", &self.custom.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(clippy::items_after_statements)]
    fn test_property_set_custom() {
        let mut props = PropertySet::new();

        #[derive(Debug, PartialEq)]
        struct CustomData(i32);

        props.insert(CustomData(42));
        assert_eq!(props.get::<CustomData>(), Some(&CustomData(42)));

        let removed = props.remove::<CustomData>();
        assert_eq!(removed, Some(CustomData(42)));
        assert_eq!(props.get::<CustomData>(), None);
    }

    #[test]
    fn test_get_mut_updates_in_place() {
        let mut props = PropertySet::new();
        props.insert(CancellationStats { removed: 2 });
        if let Some(stats) = props.get_mut::<CancellationStats>() {
            stats.removed += 4;
        }
        assert_eq!(props.get::<CancellationStats>().unwrap().removed, 6);
        assert!(props.get_mut::<SynthesisStats>().is_none());
        assert!(!props.expand_toffoli);
    }
}
