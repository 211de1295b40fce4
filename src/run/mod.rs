//! One logical measurement of a workload against an event list of any
//! length: capacity partitioning, per-session orchestration and
//! aggregation.

mod report;
#[cfg(test)]
mod test;

use std::io::Result as IoResult;
use std::slice::Chunks;
use std::time::Duration;

use thiserror::Error;

pub use report::{RunReport, SessionReport};

use crate::case::{Case, CaseCtx};
use crate::catalog::{self, EventSet};
use crate::event::resolve::Resolver;
use crate::event::CounterDesc;
use crate::ffi::syscall;
use crate::session::{CpuScope, Session, SessionError, MAX_SESSION_EVENTS};

/// Per-run configuration, scoped to one [`execute`] call.
#[derive(Clone, Debug, Default)]
pub struct RunConfig {
    pub cpu: CpuScope,
    /// Operator override; takes priority over the workload's preferred
    /// set and the harness default.
    pub events: Option<EventSet>,
    /// Raw pass-through arguments for workload-specific options.
    pub args: Vec<String>,
}

#[derive(Debug, Error)]
pub enum RunError {
    /// A workload lifecycle hook failed; the run is aborted with no
    /// partial report.
    #[error("workload init failed: {0}")]
    InitFailed(#[source] std::io::Error),

    #[error("workload exit failed: {0}")]
    ExitFailed(#[source] std::io::Error),

    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Pins the whole process to one CPU.
///
/// This is process-wide mutable state and is not restored afterward; the
/// caller opts in once before a run.
pub fn pin_to_cpu(cpu: u32) -> IoResult<()> {
    syscall::sched_setaffinity(cpu)
}

/// Order-preserving split into the minimum number of capacity-bounded
/// groups: every group holds exactly K events except the last, which
/// holds the remainder (or K on an exact multiple).
fn partition(events: &[CounterDesc]) -> Chunks<'_, CounterDesc> {
    events.chunks(MAX_SESSION_EVENTS)
}

/// Min/max/mean over session durations. Min and max start from the
/// first duration rather than a zero sentinel; the mean uses integer
/// nanosecond division.
fn aggregate(durations: &[Duration]) -> (Duration, Duration, Duration) {
    let mut iter = durations.iter().copied();
    let first = iter.next().unwrap_or_default();

    let mut min = first;
    let mut max = first;
    let mut sum = first;
    for d in iter {
        min = min.min(d);
        max = max.max(d);
        sum += d;
    }
    let mean = sum / durations.len().max(1) as u32;

    (min, max, mean)
}

/// Runs the workload once per event partition and aggregates the
/// sessions into a report.
///
/// The kernel exposes only [`MAX_SESSION_EVENTS`] live counters per
/// context, so an over-capacity list re-executes the workload once per
/// partition instead of relying on kernel-side counter rotation. That
/// trades wall-clock time for exact counts.
///
/// Sessions run strictly sequentially; each session's handles are closed
/// before the next session is created.
pub fn execute(case: &mut dyn Case, config: &RunConfig) -> Result<RunReport, RunError> {
    let mut set = config
        .events
        .clone()
        .or_else(|| case.preferred_events())
        .unwrap_or_else(catalog::default_set);
    if set.is_empty() {
        return Err(SessionError::NoEvents.into());
    }

    // Unresolvable events are warned about and stay unresolved; they
    // degrade to zero counts when their session opens them.
    Resolver::new().resolve_all(set.events_mut());

    let bracketed = case.brackets_timing();
    let mut sessions = Vec::new();
    let mut durations = Vec::new();

    for chunk in partition(set.events()) {
        let mut session = Session::new(chunk.to_vec(), config.cpu)?;
        let mut ctx = CaseCtx {
            session: &mut session,
            args: &config.args,
        };

        case.init(&mut ctx).map_err(RunError::InitFailed)?;

        if !bracketed {
            ctx.session.begin()?;
        }
        case.body(&mut ctx);
        if !bracketed {
            ctx.session.end()?;
        }

        case.exit(&mut ctx).map_err(RunError::ExitFailed)?;

        durations.push(session.duration());
        sessions.push(SessionReport::new(&session));
    }

    let (min, max, mean) = aggregate(&durations);

    Ok(RunReport {
        case: case.name().to_owned(),
        sessions,
        min,
        max,
        mean,
    })
}
