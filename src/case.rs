//! The workload contract the run engine drives.

use std::io::Result;

use crate::catalog::EventSet;
use crate::session::Session;

/// What the engine exposes to a workload: the bound measurement session
/// (for self-bracketed timing) and the raw pass-through arguments.
pub struct CaseCtx<'a> {
    pub session: &'a mut Session,
    pub args: &'a [String],
}

/// A pluggable workload.
///
/// The engine calls `init`, `body`, `exit` once per measurement session.
/// A failing `init` or `exit` aborts the whole run; `body` cannot fail.
pub trait Case {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// Counter set this workload prefers when the operator names none.
    fn preferred_events(&self) -> Option<EventSet> {
        None
    }

    /// When true, the engine does not bracket `body` with
    /// [`Session::begin`]/[`Session::end`]; the body calls them itself at
    /// whatever finer boundary excludes setup it does not want measured.
    fn brackets_timing(&self) -> bool {
        false
    }

    fn init(&mut self, _ctx: &mut CaseCtx) -> Result<()> {
        Ok(())
    }

    fn body(&mut self, ctx: &mut CaseCtx);

    fn exit(&mut self, _ctx: &mut CaseCtx) -> Result<()> {
        Ok(())
    }
}
