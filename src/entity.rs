//! Entity descriptor: a named callable that carries its own doc string.
//!
//! Decorators only need two capabilities from a target, expressed as the
//! [`Documented`] and [`Invoke`] traits, so wrappers can stack.

use std::fmt;

/// What sort of callable an entity is. Drives the wording of warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Function,
    StaticMethod,
    ClassMethod,
    Method,
    /// Calling a class constructs an instance.
    Class,
}

/// Read/write access to an entity's name and doc string.
pub trait Documented {
    fn name(&self) -> &str;
    fn entity_kind(&self) -> EntityKind;
    fn doc(&self) -> Option<&str>;
    fn set_doc(&mut self, doc: String);
}

/// Call an entity. Multi-argument callables take a tuple.
pub trait Invoke<A> {
    type Output;

    fn invoke(&self, args: A) -> Self::Output;
}

/// A named callable with a mutable doc string.
#[derive(Clone)]
pub struct Entity<F> {
    name: String,
    kind: EntityKind,
    doc: Option<String>,
    inner: F,
}

impl<F> Entity<F> {
    pub fn new(name: impl Into<String>, kind: EntityKind, inner: F) -> Self {
        Entity {
            name: name.into(),
            kind,
            doc: None,
            inner,
        }
    }

    pub fn function(name: impl Into<String>, inner: F) -> Self {
        Self::new(name, EntityKind::Function, inner)
    }

    pub fn method(name: impl Into<String>, inner: F) -> Self {
        Self::new(name, EntityKind::Method, inner)
    }

    /// A class, represented by its constructor.
    pub fn class(name: impl Into<String>, constructor: F) -> Self {
        Self::new(name, EntityKind::Class, constructor)
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }
}

impl<F> fmt::Debug for Entity<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("doc", &self.doc)
            .finish_non_exhaustive()
    }
}

impl<F> Documented for Entity<F> {
    fn name(&self) -> &str {
        &self.name
    }

    fn entity_kind(&self) -> EntityKind {
        self.kind
    }

    fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    fn set_doc(&mut self, doc: String) {
        self.doc = Some(doc);
    }
}

impl<F, A, R> Invoke<A> for Entity<F>
where
    F: Fn(A) -> R,
{
    type Output = R;

    fn invoke(&self, args: A) -> R {
        (self.inner)(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_calls_through() {
        let add = Entity::function("add", |(a, b): (i32, i32)| a + b);
        assert_eq!(add.invoke((2, 3)), 5);
        assert_eq!(add.entity_kind(), EntityKind::Function);
    }

    #[test]
    fn doc_is_replaced() {
        let mut f = Entity::function("f", |_: ()| ()).with_doc("Old.");
        assert_eq!(f.doc(), Some("Old."));
        f.set_doc("New.".to_string());
        assert_eq!(f.doc(), Some("New."));
    }
}
