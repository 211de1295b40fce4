//! Performance-counter measurement harness for short, pluggable workloads.
//!
//! A workload (a [`case::Case`]) is executed under a set of hardware,
//! software or raw PMU counters plus wall-clock timing. The kernel can
//! only keep a bounded number of counters live per context, so an
//! over-capacity event set is split into sequential measurement sessions
//! and the workload is re-executed once per session; the report carries
//! every count plus the min/max/mean duration across sessions.
//!
//! ## Example
//!
//! Measure a buffer fill under the default counter set:
//!
//! ```rust
//! use perf_case::cases::Memset;
//! use perf_case::run::{execute, RunConfig};
//!
//! let mut case = Memset::with_size(1 << 20);
//! let report = execute(&mut case, &RunConfig::default()).unwrap();
//! print!("{report}");
//! ```
//!
//! Counters that cannot be resolved or opened on the running machine
//! (missing PMU, strict `perf_event_paranoid`) report a zero count; the
//! other counters and the measured duration are unaffected.

pub mod case;
pub mod cases;
pub mod catalog;
pub mod event;
mod ffi;
pub mod registry;
pub mod run;
pub mod session;
