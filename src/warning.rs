//! Runtime deprecation warnings.
//!
//! [`WarningAdapter`] builds the user-facing message and [`Deprecated`]
//! wraps a callable so every invocation goes through the warning filter
//! before calling through. Where a warning ends up is decided by a
//! [`WarningSink`]; the default sink logs through `tracing`, so an
//! unconfigured action defers to the installed subscriber's filter.

use crate::entity::{Documented, EntityKind, Invoke};
use crate::error::{Error, Result};
use std::collections::HashSet;
use std::fmt;
use std::panic::Location;
use std::sync::{Arc, Mutex, PoisonError};

/// Filter action applied to a wrapped entity's warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningAction {
    /// Once per call site.
    Default,
    /// Refuse the call with [`Error::Warning`].
    Error,
    Ignore,
    Always,
    /// Once per calling source file.
    Module,
    /// Once per wrapped entity.
    Once,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Category {
    #[default]
    Deprecation,
    PendingDeprecation,
    Future,
    User,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Category::Deprecation => "DeprecationWarning",
            Category::PendingDeprecation => "PendingDeprecationWarning",
            Category::Future => "FutureWarning",
            Category::User => "UserWarning",
        })
    }
}

/// A single emitted warning, attributed to the code that made the call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub category: Category,
    pub message: String,
    pub location: &'static Location<'static>,
    /// Frames between the warning and user code, wrapper included.
    pub stacklevel: usize,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: {}: {}",
            self.location.file(),
            self.location.line(),
            self.category,
            self.message
        )
    }
}

/// Destination for emitted warnings.
pub trait WarningSink: Send + Sync {
    fn emit(&self, warning: &Warning);
}

/// Logs warnings as `tracing` events at WARN level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl WarningSink for TracingSink {
    fn emit(&self, warning: &Warning) {
        tracing::warn!(
            category = %warning.category,
            location = %warning.location,
            stacklevel = warning.stacklevel,
            "{}",
            warning.message
        );
    }
}

/// Keeps every warning in memory.
#[derive(Debug, Default)]
pub struct Recorder {
    warnings: Mutex<Vec<Warning>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warnings(&self) -> Vec<Warning> {
        self.warnings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.warnings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl WarningSink for Recorder {
    fn emit(&self, warning: &Warning) {
        self.warnings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(warning.clone());
    }
}

/// Builds the message shown when a deprecated entity is called.
pub trait MessageFormat: Send + Sync {
    fn format(&self, adapter: &WarningAdapter, name: &str, kind: EntityKind) -> String;
}

/// The classic wording, e.g.
/// `Call to deprecated function (or staticmethod) foo. (reason) -- Deprecated since version 1.0.`
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainFormat;

impl MessageFormat for PlainFormat {
    fn format(&self, adapter: &WarningAdapter, name: &str, kind: EntityKind) -> String {
        let mut msg = match kind {
            EntityKind::Class => format!("Call to deprecated class {}.", name),
            EntityKind::Function | EntityKind::StaticMethod => {
                format!("Call to deprecated function (or staticmethod) {}.", name)
            }
            EntityKind::ClassMethod => format!("Call to deprecated class method {}.", name),
            EntityKind::Method => format!("Call to deprecated method {}.", name),
        };
        if !adapter.reason.is_empty() {
            msg.push_str(&format!(" ({})", adapter.reason));
        }
        if !adapter.version.is_empty() {
            msg.push_str(&format!(" -- Deprecated since version {}.", adapter.version));
        }
        msg
    }
}

/// Filter and attribution settings passed through to the call wrapper.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WarningOptions {
    /// `None` hands every warning to the sink and leaves filtering to it.
    pub action: Option<WarningAction>,
    pub category: Category,
    /// Extra wrapper frames to report between the warning and user code.
    pub extra_stacklevel: usize,
}

/// Decides what to say about a deprecated entity and where to say it.
#[derive(Clone)]
pub struct WarningAdapter {
    reason: String,
    version: String,
    options: WarningOptions,
    format: Arc<dyn MessageFormat>,
    sink: Arc<dyn WarningSink>,
}

impl WarningAdapter {
    pub fn new(reason: impl Into<String>, version: impl Into<String>, options: WarningOptions) -> Self {
        WarningAdapter {
            reason: reason.into(),
            version: version.into(),
            options,
            format: Arc::new(PlainFormat),
            sink: Arc::new(TracingSink),
        }
    }

    pub fn with_format(mut self, format: Arc<dyn MessageFormat>) -> Self {
        self.format = format;
        self
    }

    pub fn with_sink(mut self, sink: Arc<dyn WarningSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn options(&self) -> &WarningOptions {
        &self.options
    }

    /// Message a caller of `target` sees.
    pub fn build_message<E: Documented + ?Sized>(&self, target: &E) -> String {
        self.format.format(self, target.name(), target.entity_kind())
    }

    /// Wrap `target` so each call warns before calling through.
    pub fn wrap<E: Documented>(self, target: E) -> Deprecated<E> {
        tracing::debug!(entity = target.name(), version = %self.version, "wrapping deprecated entity");
        Deprecated {
            target,
            adapter: self,
            seen: Mutex::new(HashSet::new()),
        }
    }
}

impl fmt::Debug for WarningAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WarningAdapter")
            .field("reason", &self.reason)
            .field("version", &self.version)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// A callable that warns on every invocation, then calls through.
pub struct Deprecated<E> {
    target: E,
    adapter: WarningAdapter,
    /// Filter keys already reported, for the deduplicating actions.
    seen: Mutex<HashSet<String>>,
}

impl<E: Documented> Deprecated<E> {
    /// Warn according to the configured action, then call the target.
    ///
    /// The warning is attributed to the caller of this method.
    #[track_caller]
    pub fn call<A>(&self, args: A) -> Result<<E as Invoke<A>>::Output>
    where
        E: Invoke<A>,
    {
        self.warn(Location::caller())?;
        Ok(self.target.invoke(args))
    }

    pub fn adapter(&self) -> &WarningAdapter {
        &self.adapter
    }

    pub fn target(&self) -> &E {
        &self.target
    }

    pub fn into_inner(self) -> E {
        self.target
    }

    fn warn(&self, location: &'static Location<'static>) -> Result<()> {
        let options = self.adapter.options;
        let key = match options.action {
            None | Some(WarningAction::Always) => None,
            Some(WarningAction::Ignore) => return Ok(()),
            Some(WarningAction::Error) => return Err(Error::Warning(self.warning(location))),
            Some(WarningAction::Default) => Some(format!(
                "{}:{}:{}",
                location.file(),
                location.line(),
                location.column()
            )),
            Some(WarningAction::Module) => Some(location.file().to_string()),
            Some(WarningAction::Once) => Some(String::new()),
        };

        if let Some(key) = key {
            let mut seen = self.seen.lock().unwrap_or_else(PoisonError::into_inner);
            if !seen.insert(key) {
                return Ok(());
            }
        }

        self.adapter.sink.emit(&self.warning(location));
        Ok(())
    }

    fn warning(&self, location: &'static Location<'static>) -> Warning {
        Warning {
            category: self.adapter.options.category,
            message: self.adapter.build_message(&self.target),
            location,
            stacklevel: 1 + self.adapter.options.extra_stacklevel,
        }
    }
}

impl<E: Documented> Documented for Deprecated<E> {
    fn name(&self) -> &str {
        self.target.name()
    }

    fn entity_kind(&self) -> EntityKind {
        self.target.entity_kind()
    }

    fn doc(&self) -> Option<&str> {
        self.target.doc()
    }

    fn set_doc(&mut self, doc: String) {
        self.target.set_doc(doc);
    }
}

impl<E, A> Invoke<A> for Deprecated<E>
where
    E: Documented + Invoke<A>,
{
    type Output = Result<<E as Invoke<A>>::Output>;

    #[track_caller]
    fn invoke(&self, args: A) -> Self::Output {
        self.warn(Location::caller())?;
        Ok(self.target.invoke(args))
    }
}
