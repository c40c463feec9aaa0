//! lifedoc — document the life cycle of functions and classes.
//!
//! Appends `versionadded`, `versionchanged` or `deprecated` directives to
//! an entity's doc string:
//!
//! ```text
//! Summary line.
//!
//! .. deprecated:: 2.1.0
//!    Use `new_func` instead.
//! ```
//!
//! Deprecated entities are also wrapped so that every call emits a runtime
//! warning with the directive's reason, stripped of cross-reference markup.
//!
//! ```
//! use lifedoc::{deprecated, Entity, WarningOptions, DEFAULT_LINE_LENGTH};
//!
//! let old = deprecated("Use :func:`new_func` instead.", "2.1.0", DEFAULT_LINE_LENGTH, WarningOptions::default())?
//!     .decorate(Entity::function("old_func", |x: i32| x + 1).with_doc("Add one."));
//! assert_eq!(old.call(1)?, 2);
//! # Ok::<(), lifedoc::Error>(())
//! ```

pub mod annotation;
pub mod directive;
pub mod docstring;
pub mod entity;
pub mod error;
pub mod text;
pub mod warning;

pub use annotation::{strip_cross_references, Annotation, Decorated, DirectiveFormat};
pub use directive::{DirectiveBlock, DirectiveKind};
pub use entity::{Documented, Entity, EntityKind, Invoke};
pub use error::{Error, Result};
pub use warning::{
    Category, Deprecated, MessageFormat, PlainFormat, Recorder, TracingSink, Warning,
    WarningAction, WarningAdapter, WarningOptions, WarningSink,
};

/// Default maximum directive line length, indent included.
pub const DEFAULT_LINE_LENGTH: isize = 70;

/// A `versionadded` directive. The decorated entity keeps its behaviour.
pub fn version_added(reason: &str, version: &str, line_length: isize) -> Result<Annotation> {
    Annotation::new(
        DirectiveKind::VersionAdded,
        reason,
        version,
        line_length,
        WarningOptions::default(),
    )
}

/// A `versionchanged` directive. The decorated entity keeps its behaviour.
pub fn version_changed(reason: &str, version: &str, line_length: isize) -> Result<Annotation> {
    Annotation::new(
        DirectiveKind::VersionChanged,
        reason,
        version,
        line_length,
        WarningOptions::default(),
    )
}

/// A `deprecated` directive. The decorated entity warns on every call,
/// filtered by `options.action`.
pub fn deprecated(
    reason: &str,
    version: &str,
    line_length: isize,
    options: WarningOptions,
) -> Result<Annotation> {
    Annotation::new(DirectiveKind::Deprecated, reason, version, line_length, options)
}
