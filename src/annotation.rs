//! The annotation adapter: writes a life-cycle directive into an entity's
//! doc string and, for deprecations, wraps the entity so calls warn.

use crate::directive::{DirectiveBlock, DirectiveKind};
use crate::docstring;
use crate::entity::{Documented, EntityKind, Invoke};
use crate::error::{Error, Result};
use crate::warning::{
    Deprecated, MessageFormat, PlainFormat, WarningAdapter, WarningOptions, WarningSink,
};
use regex::Regex;
use std::panic::Location;
use std::sync::{Arc, LazyLock};

/// Cross-reference markup such as `:func:`name`` or `:py:meth:`name``.
static RE_CROSS_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?::[a-zA-Z]+)?:[a-zA-Z]+:(`[^`]*`)").unwrap());

/// Replace every `:role:`text`` / `:domain:role:`text`` with `` `text` ``.
pub fn strip_cross_references(message: &str) -> String {
    RE_CROSS_REF.replace_all(message, "$1").into_owned()
}

/// Classic wording with documentation markup removed.
#[derive(Debug, Default, Clone, Copy)]
pub struct DirectiveFormat;

impl MessageFormat for DirectiveFormat {
    fn format(&self, adapter: &WarningAdapter, name: &str, kind: EntityKind) -> String {
        strip_cross_references(&PlainFormat.format(adapter, name, kind))
    }
}

/// A directive of a given kind, ready to be applied to one entity.
#[derive(Debug, Clone)]
pub struct Annotation {
    kind: DirectiveKind,
    line_length: isize,
    adapter: WarningAdapter,
}

impl Annotation {
    /// Fails with [`Error::MissingVersion`] when `version` is empty.
    /// A `line_length` of 3 or less disables wrapping.
    pub fn new(
        kind: DirectiveKind,
        reason: impl Into<String>,
        version: impl Into<String>,
        line_length: isize,
        options: WarningOptions,
    ) -> Result<Self> {
        let version = version.into();
        if version.is_empty() {
            return Err(Error::MissingVersion { kind });
        }
        let adapter = WarningAdapter::new(reason, version, options)
            .with_format(Arc::new(DirectiveFormat));
        Ok(Annotation {
            kind,
            line_length,
            adapter,
        })
    }

    /// Send runtime warnings to `sink` instead of the log.
    pub fn with_sink(mut self, sink: Arc<dyn WarningSink>) -> Self {
        self.adapter = self.adapter.with_sink(sink);
        self
    }

    pub fn kind(&self) -> DirectiveKind {
        self.kind
    }

    pub fn line_length(&self) -> isize {
        self.line_length
    }

    pub fn adapter(&self) -> &WarningAdapter {
        &self.adapter
    }

    pub fn render(&self) -> DirectiveBlock {
        DirectiveBlock::render(
            self.kind,
            self.adapter.version(),
            self.adapter.reason(),
            self.line_length,
        )
    }

    /// Plain-text warning message for `target`.
    pub fn build_message<E: Documented + ?Sized>(&self, target: &E) -> String {
        self.adapter.build_message(target)
    }

    /// Append the directive to `target`'s doc string. Applying the same
    /// annotation twice appends a second block.
    pub fn annotate<E: Documented + ?Sized>(&self, target: &mut E) {
        let block = self.render();
        let doc = docstring::splice(target.doc(), &block);
        tracing::debug!(
            entity = target.name(),
            directive = %self.kind,
            version = self.adapter.version(),
            lines = block.lines.len(),
            "annotated doc string"
        );
        target.set_doc(doc);
    }

    /// Annotate `target`, then wrap it if the directive is a deprecation.
    pub fn decorate<E: Documented>(self, mut target: E) -> Decorated<E> {
        self.annotate(&mut target);
        match self.kind {
            DirectiveKind::VersionAdded | DirectiveKind::VersionChanged => {
                Decorated::Annotated(target)
            }
            DirectiveKind::Deprecated => Decorated::Deprecated(self.adapter.wrap(target)),
        }
    }
}

/// Result of [`Annotation::decorate`].
pub enum Decorated<E> {
    /// Doc string updated, behaviour untouched.
    Annotated(E),
    /// Doc string updated and every call warns.
    Deprecated(Deprecated<E>),
}

impl<E: Documented> Decorated<E> {
    #[track_caller]
    pub fn call<A>(&self, args: A) -> Result<<E as Invoke<A>>::Output>
    where
        E: Invoke<A>,
    {
        let caller = Location::caller();
        match self {
            Decorated::Annotated(target) => Ok(target.invoke(args)),
            Decorated::Deprecated(wrapped) => {
                tracing::trace!(entity = wrapped.name(), %caller, "calling deprecated entity");
                wrapped.call(args)
            }
        }
    }

    pub fn is_deprecated(&self) -> bool {
        matches!(self, Decorated::Deprecated(_))
    }

    pub fn into_inner(self) -> E {
        match self {
            Decorated::Annotated(target) => target,
            Decorated::Deprecated(wrapped) => wrapped.into_inner(),
        }
    }
}

impl<E: Documented> Documented for Decorated<E> {
    fn name(&self) -> &str {
        match self {
            Decorated::Annotated(target) => target.name(),
            Decorated::Deprecated(wrapped) => wrapped.name(),
        }
    }

    fn entity_kind(&self) -> EntityKind {
        match self {
            Decorated::Annotated(target) => target.entity_kind(),
            Decorated::Deprecated(wrapped) => wrapped.entity_kind(),
        }
    }

    fn doc(&self) -> Option<&str> {
        match self {
            Decorated::Annotated(target) => target.doc(),
            Decorated::Deprecated(wrapped) => wrapped.doc(),
        }
    }

    fn set_doc(&mut self, doc: String) {
        match self {
            Decorated::Annotated(target) => target.set_doc(doc),
            Decorated::Deprecated(wrapped) => wrapped.set_doc(doc),
        }
    }
}

impl<E, A> Invoke<A> for Decorated<E>
where
    E: Documented + Invoke<A>,
{
    type Output = Result<<E as Invoke<A>>::Output>;

    #[track_caller]
    fn invoke(&self, args: A) -> Self::Output {
        match self {
            Decorated::Annotated(target) => Ok(target.invoke(args)),
            Decorated::Deprecated(wrapped) => wrapped.invoke(args),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Entity;
    use crate::warning::Recorder;

    #[test]
    fn strips_domain_and_role() {
        assert_eq!(
            strip_cross_references("Use :py:func:`old_thing` instead"),
            "Use `old_thing` instead"
        );
    }

    #[test]
    fn strips_role_only() {
        assert_eq!(strip_cross_references(":func:`bar`"), "`bar`");
    }

    #[test]
    fn strips_each_match_independently() {
        assert_eq!(
            strip_cross_references("see :class:`A` and :py:meth:`B.c`, not `D`"),
            "see `A` and `B.c`, not `D`"
        );
    }

    #[test]
    fn leaves_other_text_alone() {
        let msg = "plain `code` and :notarole: text";
        assert_eq!(strip_cross_references(msg), msg);
    }

    #[test]
    fn missing_version_is_rejected() {
        let err = Annotation::new(DirectiveKind::VersionAdded, "why", "", 70, WarningOptions::default())
            .unwrap_err();
        assert!(matches!(
            err,
            Error::MissingVersion {
                kind: DirectiveKind::VersionAdded
            }
        ));
        assert_eq!(
            err.to_string(),
            "'version' argument is required in versionadded directives"
        );
    }

    #[test]
    fn empty_reason_and_odd_width_are_accepted() {
        for line_length in [0, -5, 3, 200] {
            assert!(Annotation::new(
                DirectiveKind::Deprecated,
                "",
                "1.0",
                line_length,
                WarningOptions::default()
            )
            .is_ok());
        }
    }

    #[test]
    fn message_has_markup_stripped() {
        let annotation = Annotation::new(
            DirectiveKind::Deprecated,
            "Use :py:func:`new_thing` instead",
            "2.0",
            70,
            WarningOptions::default(),
        )
        .unwrap();
        let target = Entity::function("old_thing", |_: ()| ());
        assert_eq!(
            annotation.build_message(&target),
            "Call to deprecated function (or staticmethod) old_thing. \
             (Use `new_thing` instead) -- Deprecated since version 2.0."
        );
    }

    #[test]
    fn version_added_does_not_wrap() {
        let recorder = Arc::new(Recorder::new());
        let decorated = Annotation::new(DirectiveKind::VersionAdded, "", "1.0", 70, WarningOptions::default())
            .unwrap()
            .with_sink(recorder.clone())
            .decorate(Entity::function("f", |x: u8| x + 1));
        assert!(!decorated.is_deprecated());
        assert_eq!(decorated.doc(), Some("\n.. versionadded:: 1.0\n"));
        assert_eq!(decorated.call(1).unwrap(), 2);
        assert!(recorder.is_empty());
    }

    #[test]
    fn deprecated_wraps() {
        let recorder = Arc::new(Recorder::new());
        let decorated = Annotation::new(DirectiveKind::Deprecated, "", "1.0", 70, WarningOptions::default())
            .unwrap()
            .with_sink(recorder.clone())
            .decorate(Entity::function("f", |x: u8| x + 1));
        assert!(decorated.is_deprecated());
        assert!(recorder.is_empty(), "decoration itself must not warn");
        assert_eq!(decorated.call(1).unwrap(), 2);
        assert_eq!(recorder.len(), 1);
    }
}
