//! Finite state and action spaces.
//!
//! A space is an ordered, non-empty sequence of distinct elements. Position
//! matters: ground-truth mappings are built by aligning spaces index-to-index.

use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpaceError {
    #[error("{kind} space is empty")]
    Empty { kind: SpaceKind },

    #[error("{kind} space contains duplicate element {element}")]
    Duplicate { kind: SpaceKind, element: String },
}

/// Which side of the game a space belongs to (used in error messages).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpaceKind {
    State,
    Action,
}

impl std::fmt::Display for SpaceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpaceKind::State => write!(f, "state"),
            SpaceKind::Action => write!(f, "action"),
        }
    }
}

/// An ordered, immutable, non-empty sequence of distinct elements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Space<T> {
    elements: Vec<T>,
}

pub type StateSpace<S> = Space<S>;
pub type ActionSpace<A> = Space<A>;

impl<T> Space<T>
where
    T: Eq + Hash + Debug,
{
    /// Validate and wrap a sequence of elements.
    pub fn new(kind: SpaceKind, elements: Vec<T>) -> Result<Self, SpaceError> {
        if elements.is_empty() {
            return Err(SpaceError::Empty { kind });
        }

        let mut seen = HashSet::with_capacity(elements.len());
        for element in &elements {
            if !seen.insert(element) {
                return Err(SpaceError::Duplicate {
                    kind,
                    element: format!("{element:?}"),
                });
            }
        }

        Ok(Self { elements })
    }

    pub fn states(elements: Vec<T>) -> Result<Self, SpaceError> {
        Self::new(SpaceKind::State, elements)
    }

    pub fn actions(elements: Vec<T>) -> Result<Self, SpaceError> {
        Self::new(SpaceKind::Action, elements)
    }
}

impl<T: PartialEq> Space<T> {
    pub fn contains(&self, element: &T) -> bool {
        self.elements.contains(element)
    }
}

impl<T> Space<T> {
    pub fn as_slice(&self) -> &[T] {
        &self.elements
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.elements.iter()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Always false for a constructed space.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Uniform draw. Spaces are non-empty, so this always yields an element.
    pub fn sample<R: rand::Rng + ?Sized>(&self, rng: &mut R) -> &T {
        &self.elements[rng.gen_range(0..self.elements.len())]
    }
}

impl<'a, T> IntoIterator for &'a Space<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::stream_rng;

    #[test]
    fn test_empty_space_rejected() {
        let err = Space::<String>::states(vec![]).unwrap_err();
        assert_eq!(err, SpaceError::Empty { kind: SpaceKind::State });
        assert_eq!(err.to_string(), "state space is empty");
    }

    #[test]
    fn test_duplicate_element_rejected() {
        let err = Space::actions(vec!["Left", "Right", "Left"]).unwrap_err();
        assert!(matches!(
            err,
            SpaceError::Duplicate {
                kind: SpaceKind::Action,
                ..
            }
        ));
    }

    #[test]
    fn test_order_preserved() {
        let space = Space::states(vec![3, 1, 2]).unwrap();
        assert_eq!(space.as_slice(), &[3, 1, 2]);
        assert_eq!(space.len(), 3);
        assert!(space.contains(&1));
        assert!(!space.contains(&4));
    }

    #[test]
    fn test_sample_stays_in_space() {
        let space = Space::states(vec!["a", "b", "c"]).unwrap();
        let mut rng = stream_rng(7, 0);
        for _ in 0..100 {
            assert!(space.contains(space.sample(&mut rng)));
        }
    }
}
