use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An element stored inline inside a parent document.
///
/// Every element carries its own identifier, generated when the element is
/// built and never derived from its position in the collection.
pub trait Element {
    fn element_id(&self) -> Uuid;
}

/// Ordered sub-collection embedded in a parent document, newest first.
///
/// The only ways to change membership are [`Embedded::insert_head`] and the
/// identifier-based removals; existing elements are never reordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Embedded<T>(Vec<T>);

impl<T> Default for Embedded<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T: Element> Embedded<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend an element so it is iterated first
    pub fn insert_head(&mut self, element: T) -> &T {
        self.0.insert(0, element);
        &self.0[0]
    }

    /// Remove exactly the element whose identifier equals `id`
    pub fn remove_by_id(&mut self, id: Uuid) -> Option<T> {
        let index = self.0.iter().position(|e| e.element_id() == id)?;
        Some(self.0.remove(index))
    }

    pub fn find(&self, id: Uuid) -> Option<&T> {
        self.0.iter().find(|e| e.element_id() == id)
    }

    pub fn find_by<P>(&self, predicate: P) -> Option<&T>
    where
        P: FnMut(&&T) -> bool,
    {
        self.0.iter().find(predicate)
    }

    pub fn contains_where<P>(&self, predicate: P) -> bool
    where
        P: FnMut(&T) -> bool,
    {
        self.0.iter().any(predicate)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<T> From<Vec<T>> for Embedded<T> {
    fn from(items: Vec<T>) -> Self {
        Self(items)
    }
}

impl<'a, T> IntoIterator for &'a Embedded<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Prepend `element` to the collection selected by `field` and hand the
/// updated parent back for a single whole-document save.
pub fn insert_head<P, T, F>(mut parent: P, field: F, element: T) -> P
where
    T: Element,
    F: FnOnce(&mut P) -> &mut Embedded<T>,
{
    field(&mut parent).insert_head(element);
    parent
}

/// Remove the element with identifier `element_id` from the collection
/// selected by `field`. Returns `None` when no element matches, leaving the
/// parent untouched.
pub fn remove_by_element_id<P, T, F>(mut parent: P, field: F, element_id: Uuid) -> Option<P>
where
    T: Element,
    F: FnOnce(&mut P) -> &mut Embedded<T>,
{
    field(&mut parent).remove_by_id(element_id)?;
    Some(parent)
}
