
use std::fs::File;
use std::time::{Duration, Instant};

use arrayvec::ArrayVec;
use log::warn;
use thiserror::Error;

use crate::event::CounterDesc;
use crate::ffi::bindings as b;
use crate::ffi::syscall::{ioctl, perf_event_open, read_count};
use crate::ffi::Attr;

/// Maximum counters a single session may hold open simultaneously,
/// bounded by hardware/kernel counter limits.
pub const MAX_SESSION_EVENTS: usize = 6;

/// Which CPU a session's counters watch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CpuScope {
    /// The calling process, on whichever CPU it runs.
    #[default]
    Any,
    /// That CPU, across any process.
    Cpu(u32),
}

impl CpuScope {
    fn target(self) -> (i32, i32) {
        match self {
            CpuScope::Any => (0, -1),
            CpuScope::Cpu(n) => (-1, n as _),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    Idle,
    Armed,
    Running,
    Finished,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("a session requires at least one event")]
    NoEvents,

    #[error("{0} events exceed the session capacity of {MAX_SESSION_EVENTS}")]
    TooManyEvents(usize),

    /// `begin`/`end` called out of lifecycle order, a programming error.
    #[error("expected session state {expected:?}, found {found:?}")]
    InvalidState { expected: State, found: State },
}

/// Why a single counter produced no handle. Never escalates past the
/// session; the affected metric reads as zero.
#[derive(Debug, Error)]
pub enum CounterOpenError {
    #[error("event was never resolved")]
    Unresolved,

    #[error(transparent)]
    Os(#[from] std::io::Error),
}

fn open_counter(desc: &CounterDesc, scope: CpuScope) -> Result<File, CounterOpenError> {
    if !desc.is_resolved() {
        return Err(CounterOpenError::Unresolved);
    }

    let mut attr = Attr::sized();
    attr.type_ = desc.ty();
    attr.config = desc.code();
    attr.flags = b::PERF_ATTR_FLAG_DISABLED;

    let (pid, cpu) = scope.target();
    let file = perf_event_open(&attr, pid, cpu, -1, b::PERF_FLAG_FD_CLOEXEC)?;
    Ok(file)
}

/// One bounded-size measurement: up to [`MAX_SESSION_EVENTS`] counters
/// plus wall-clock timestamps around one workload execution.
///
/// Lifecycle is `Idle -> Armed -> Running -> Finished`, driven by
/// [`new`](Self::new), [`begin`](Self::begin) and [`end`](Self::end).
/// No transition skips a state and no state is revisited.
#[derive(Debug)]
pub struct Session {
    events: Vec<CounterDesc>,
    scope: CpuScope,
    handles: ArrayVec<Option<File>, MAX_SESSION_EVENTS>,
    counts: ArrayVec<u64, MAX_SESSION_EVENTS>,
    start: Instant,
    duration: Duration,
    state: State,
}

impl Session {
    /// `Idle -> Armed`: validates the event list and zeroes the count
    /// and handle slots.
    pub fn new(events: Vec<CounterDesc>, scope: CpuScope) -> Result<Self, SessionError> {
        if events.is_empty() {
            return Err(SessionError::NoEvents);
        }
        if events.len() > MAX_SESSION_EVENTS {
            return Err(SessionError::TooManyEvents(events.len()));
        }

        let mut handles = ArrayVec::new();
        let mut counts = ArrayVec::new();
        for _ in &events {
            handles.push(None);
            counts.push(0);
        }

        Ok(Self {
            events,
            scope,
            handles,
            counts,
            start: Instant::now(),
            duration: Duration::ZERO,
            state: State::Armed,
        })
    }

    /// `Armed -> Running`: opens a counter handle per event, captures the
    /// start timestamp, then enables the handles that opened.
    ///
    /// All opens are issued before the timestamp so their syscall latency
    /// stays outside the measured interval; the enable step is the true
    /// start-of-measurement boundary. An event whose open fails keeps an
    /// empty slot and reads as zero, without blocking the others.
    pub fn begin(&mut self) -> Result<(), SessionError> {
        self.begin_with(open_counter)
    }

    fn begin_with<F>(&mut self, open: F) -> Result<(), SessionError>
    where
        F: Fn(&CounterDesc, CpuScope) -> Result<File, CounterOpenError>,
    {
        if self.state != State::Armed {
            return Err(SessionError::InvalidState {
                expected: State::Armed,
                found: self.state,
            });
        }

        for (i, event) in self.events.iter().enumerate() {
            self.handles[i] = match open(event, self.scope) {
                Ok(file) => Some(file),
                Err(err) => {
                    warn!("counter {} will read as zero: {err}", event.label());
                    None
                }
            };
        }

        self.start = Instant::now();

        for file in self.handles.iter().flatten() {
            if let Err(err) = ioctl(file, b::PERF_IOC_OP_ENABLE) {
                warn!("failed to enable counter: {err}");
            }
        }

        self.state = State::Running;
        Ok(())
    }

    /// `Running -> Finished`: disables every valid handle, captures the
    /// end timestamp, then reads and closes the handles.
    ///
    /// Reading after the disable keeps the counts stable under read
    /// latency: they cover exactly the enabled interval. A failed read
    /// degrades that one count to zero.
    pub fn end(&mut self) -> Result<(), SessionError> {
        if self.state != State::Running {
            return Err(SessionError::InvalidState {
                expected: State::Running,
                found: self.state,
            });
        }

        for file in self.handles.iter().flatten() {
            if let Err(err) = ioctl(file, b::PERF_IOC_OP_DISABLE) {
                warn!("failed to disable counter: {err}");
            }
        }

        self.duration = self.start.elapsed();

        for (i, slot) in self.handles.iter_mut().enumerate() {
            if let Some(file) = slot.take() {
                self.counts[i] = read_count(&file).unwrap_or_else(|err| {
                    warn!("failed to read counter {}: {err}", self.events[i].label());
                    0
                });
                // dropping the file closes the handle
            }
        }

        self.state = State::Finished;
        Ok(())
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn events(&self) -> &[CounterDesc] {
        &self.events
    }

    /// Per-event accumulated counts, in event order. All zero until the
    /// session finishes.
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Wall-clock time between `begin` and `end`, zero until finished.
    pub fn duration(&self) -> Duration {
        self.duration
    }
}
