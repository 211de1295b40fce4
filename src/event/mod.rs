pub mod hw;
pub mod raw;
pub mod resolve;
pub mod sw;

use hw::Hardware;
use raw::RawRef;
use sw::Software;

use crate::ffi::bindings as b;

/// The category of a countable metric.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    Hardware,
    Software,
    /// Implementation-specific, either a fixed config value or a
    /// sysfs-discovered PMU event.
    Raw,
}

/// One countable metric.
///
/// Catalog entries are immutable except for the `name`/`ty`/`code` fields,
/// which the [resolver](resolve::Resolver) populates lazily for
/// sysfs-discovered events on first use.
#[derive(Clone, Debug)]
pub struct CounterDesc {
    pub(crate) name: Option<String>,
    pub(crate) kind: Kind,
    pub(crate) raw_ref: Option<String>,
    pub(crate) ty: u32,
    pub(crate) code: u64,
    pub(crate) resolved: bool,
}

impl CounterDesc {
    pub fn hardware(ev: Hardware) -> Self {
        Self {
            name: Some(ev.label().into()),
            kind: Kind::Hardware,
            raw_ref: None,
            ty: b::PERF_TYPE_HARDWARE,
            code: ev.id(),
            resolved: true,
        }
    }

    pub fn software(ev: Software) -> Self {
        Self {
            name: Some(ev.label().into()),
            kind: Kind::Software,
            raw_ref: None,
            ty: b::PERF_TYPE_SOFTWARE,
            code: ev.id(),
            resolved: true,
        }
    }

    /// A raw event with a known config value, e.g. a vendor-documented
    /// PMU event id.
    pub fn raw(config: u64) -> Self {
        Self {
            name: Some(format!("r{config:x}")),
            kind: Kind::Raw,
            raw_ref: None,
            ty: b::PERF_TYPE_RAW,
            code: config,
            resolved: true,
        }
    }

    /// A raw event referenced by `"<device>/<event-file>"` under the sysfs
    /// event source tree. Stays unresolved until the resolver reads the
    /// device metadata.
    pub fn sysfs(reference: impl Into<String>) -> Self {
        Self {
            name: None,
            kind: Kind::Raw,
            raw_ref: Some(reference.into()),
            ty: 0,
            code: 0,
            resolved: false,
        }
    }

    /// Overrides the auto-derived label.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Resolved perf event type id.
    pub fn ty(&self) -> u32 {
        self.ty
    }

    /// Resolved config value, zero while unresolved.
    pub fn code(&self) -> u64 {
        self.code
    }

    /// An unresolved descriptor cannot produce a usable counter handle.
    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    /// Report label: the explicit or resolver-derived name, falling back
    /// to the event-file component of the sysfs reference.
    pub fn label(&self) -> &str {
        if let Some(name) = &self.name {
            return name;
        }
        match &self.raw_ref {
            Some(r) => RawRef::parse(r).map(|r| r.event).unwrap_or(r.as_str()),
            None => "?",
        }
    }
}
