//! Airport registry assigning dense indices.

use std::collections::HashMap;

use crate::domain::Iata;

/// Maps airport codes to dense indices in first-seen order.
///
/// Indices are assigned monotonically starting at 0 and never change;
/// codes are never removed. The registry and its inverse table stay in
/// lockstep, so `index_of` and `code_of` form a bijection over
/// `0..len()`.
#[derive(Debug, Clone, Default)]
pub struct AirportRegistry {
    indices: HashMap<Iata, usize>,
    codes: Vec<Iata>,
}

impl AirportRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a code, assigning the next free index if it is new.
    ///
    /// Returns the code's index and whether it was newly added.
    pub fn intern(&mut self, code: Iata) -> (usize, bool) {
        if let Some(&index) = self.indices.get(&code) {
            return (index, false);
        }
        let index = self.codes.len();
        self.indices.insert(code, index);
        self.codes.push(code);
        (index, true)
    }

    /// Index of a registered code, if any.
    pub fn index_of(&self, code: Iata) -> Option<usize> {
        self.indices.get(&code).copied()
    }

    /// Code at a dense index, if the index has been assigned.
    pub fn code_of(&self, index: usize) -> Option<Iata> {
        self.codes.get(index).copied()
    }

    /// All registered codes in index order.
    pub fn codes(&self) -> &[Iata] {
        &self.codes
    }

    /// Number of registered airports.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Whether no airport has been registered yet.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn iata_strategy() -> impl Strategy<Value = Iata> {
        proptest::string::string_regex("[A-Z]{3}")
            .unwrap()
            .prop_map(|s| Iata::parse(&s).unwrap())
    }

    proptest! {
        /// After any registration sequence, indices are a contiguous
        /// bijection with the stored codes.
        #[test]
        fn registration_preserves_bijection(codes in prop::collection::vec(iata_strategy(), 0..40)) {
            let mut registry = AirportRegistry::new();
            for code in codes {
                registry.intern(code);
            }

            for index in 0..registry.len() {
                let code = registry.code_of(index).unwrap();
                prop_assert_eq!(registry.index_of(code), Some(index));
            }
            prop_assert_eq!(registry.code_of(registry.len()), None);
        }

        /// Interning the same code twice yields the same index, and only
        /// the first call reports a new entry.
        #[test]
        fn intern_is_idempotent(code in iata_strategy(), others in prop::collection::vec(iata_strategy(), 0..10)) {
            let mut registry = AirportRegistry::new();
            let (first, created) = registry.intern(code);
            prop_assert!(created);
            for other in others {
                registry.intern(other);
            }
            prop_assert_eq!(registry.intern(code), (first, false));
        }
    }
}
