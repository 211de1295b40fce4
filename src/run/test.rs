use std::hint::black_box;
use std::io::{Error, Result as IoResult};
use std::time::Duration;

use super::{aggregate, execute, partition, RunConfig, RunError};
use crate::case::{Case, CaseCtx};
use crate::catalog::EventSet;
use crate::cases::MemLat;
use crate::event::hw::Hardware;
use crate::event::sw::Software;
use crate::event::CounterDesc;
use crate::session::{SessionError, MAX_SESSION_EVENTS};

struct Spin;

impl Case for Spin {
    fn name(&self) -> &str {
        "spin"
    }

    fn description(&self) -> &str {
        "busy loop"
    }

    fn body(&mut self, _ctx: &mut CaseCtx) {
        let mut acc = 0_u64;
        for i in 0..50_000_u64 {
            acc = acc.wrapping_add(black_box(i));
        }
        black_box(acc);
    }
}

struct Preferring;

impl Case for Preferring {
    fn name(&self) -> &str {
        "preferring"
    }

    fn description(&self) -> &str {
        "declares a preferred event set"
    }

    fn preferred_events(&self) -> Option<EventSet> {
        Some(EventSet::new(
            "preferred",
            vec![
                CounterDesc::hardware(Hardware::CpuCycle),
                CounterDesc::software(Software::PageFault),
            ],
        ))
    }

    fn body(&mut self, _ctx: &mut CaseCtx) {}
}

enum FailOn {
    Init,
    Exit,
}

struct Failing(FailOn);

impl Case for Failing {
    fn name(&self) -> &str {
        "failing"
    }

    fn description(&self) -> &str {
        "fails a lifecycle hook"
    }

    fn init(&mut self, _ctx: &mut CaseCtx) -> IoResult<()> {
        match self.0 {
            FailOn::Init => Err(Error::other("init boom")),
            FailOn::Exit => Ok(()),
        }
    }

    fn body(&mut self, _ctx: &mut CaseCtx) {}

    fn exit(&mut self, _ctx: &mut CaseCtx) -> IoResult<()> {
        match self.0 {
            FailOn::Exit => Err(Error::other("exit boom")),
            FailOn::Init => Ok(()),
        }
    }
}

fn hw_events(n: usize) -> Vec<CounterDesc> {
    (0..n)
        .map(|_| CounterDesc::hardware(Hardware::Instr))
        .collect()
}

#[test]
fn test_partition_sizes() {
    let sizes = |n: usize| -> Vec<usize> { partition(&hw_events(n)).map(<[_]>::len).collect() };

    assert_eq!(sizes(14), vec![6, 6, 2]);
    assert_eq!(sizes(12), vec![6, 6]);
    assert_eq!(sizes(7), vec![6, 1]);
    assert_eq!(sizes(6), vec![6]);
    assert_eq!(sizes(1), vec![1]);
}

#[test]
fn test_partition_count_is_minimal() {
    for n in 1..40 {
        let chunks = partition(&hw_events(n)).count();
        assert_eq!(chunks, n.div_ceil(MAX_SESSION_EVENTS));
    }
}

#[test]
fn test_aggregate_ordering() {
    let ds: Vec<Duration> = [5, 1, 3].iter().map(|&ms| Duration::from_millis(ms)).collect();
    let (min, max, mean) = aggregate(&ds);
    assert_eq!(min, Duration::from_millis(1));
    assert_eq!(max, Duration::from_millis(5));
    assert_eq!(mean, Duration::from_millis(3));
    assert!(min <= mean && mean <= max);
}

#[test]
fn test_aggregate_single_session() {
    let ds = [Duration::from_micros(1234)];
    let (min, max, mean) = aggregate(&ds);
    assert_eq!(min, mean);
    assert_eq!(max, mean);
}

#[test]
fn test_execute_over_capacity_set() {
    let _ = env_logger::builder().is_test(true).try_init();

    let config = RunConfig {
        events: Some(EventSet::new("seven", hw_events(7))),
        ..RunConfig::default()
    };

    let report = execute(&mut Spin, &config).unwrap();
    assert_eq!(report.sessions.len(), 2);
    assert_eq!(report.sessions[0].entries.len(), 6);
    assert_eq!(report.sessions[1].entries.len(), 1);
    assert!(report.min <= report.mean && report.mean <= report.max);

    let text = report.to_string();
    assert!(text.contains("finished with 2 runs"));
    assert!(text.contains("min time:"));
    assert!(text.contains("avg time:"));
}

#[test]
fn test_execute_single_session_report() {
    let config = RunConfig {
        events: Some(EventSet::new("three", hw_events(3))),
        ..RunConfig::default()
    };

    let report = execute(&mut Spin, &config).unwrap();
    assert_eq!(report.sessions.len(), 1);
    assert_eq!(report.min, report.mean);
    assert_eq!(report.max, report.mean);
    assert!(report.to_string().contains("time:"));
}

#[test]
fn test_event_list_priority() {
    // No override: the workload's preferred set wins.
    let report = execute(&mut Preferring, &RunConfig::default()).unwrap();
    let labels: Vec<_> = report.sessions[0]
        .entries
        .iter()
        .map(|(label, _)| label.as_str())
        .collect();
    assert_eq!(labels, vec!["cpu-cycles", "page-faults"]);

    // An operator override beats the preferred set.
    let config = RunConfig {
        events: Some(EventSet::new(
            "override",
            vec![CounterDesc::hardware(Hardware::BranchMiss)],
        )),
        ..RunConfig::default()
    };
    let report = execute(&mut Preferring, &config).unwrap();
    let labels: Vec<_> = report.sessions[0]
        .entries
        .iter()
        .map(|(label, _)| label.as_str())
        .collect();
    assert_eq!(labels, vec!["branch-misses"]);
}

#[test]
fn test_default_set_is_the_fallback() {
    let report = execute(&mut Spin, &RunConfig::default()).unwrap();
    let total: usize = report.sessions.iter().map(|s| s.entries.len()).sum();
    assert_eq!(total, crate::catalog::default_set().len());
}

#[test]
fn test_init_failure_aborts_run() {
    let err = execute(&mut Failing(FailOn::Init), &RunConfig::default()).unwrap_err();
    assert!(matches!(err, RunError::InitFailed(_)));
}

#[test]
fn test_exit_failure_aborts_run() {
    let err = execute(&mut Failing(FailOn::Exit), &RunConfig::default()).unwrap_err();
    assert!(matches!(err, RunError::ExitFailed(_)));
}

#[test]
fn test_empty_override_is_rejected() {
    let config = RunConfig {
        events: Some(EventSet::new("empty", vec![])),
        ..RunConfig::default()
    };
    let err = execute(&mut Spin, &config).unwrap_err();
    assert!(matches!(err, RunError::Session(SessionError::NoEvents)));
}

#[test]
fn test_self_bracketed_case() {
    let config = RunConfig {
        args: vec!["len=1024".into(), "steps=4096".into()],
        ..RunConfig::default()
    };

    let report = execute(&mut MemLat::default(), &config).unwrap();
    assert_eq!(report.sessions.len(), 1);
    assert!(report.mean > Duration::ZERO);
}

#[test]
fn test_degraded_events_still_report() {
    let mut events = hw_events(2);
    events.push(CounterDesc::sysfs("no_such_pmu/cycles"));
    let config = RunConfig {
        events: Some(EventSet::new("mixed", events)),
        ..RunConfig::default()
    };

    let report = execute(&mut Spin, &config).unwrap();
    assert_eq!(report.sessions[0].entries.len(), 3);
    let (label, count) = &report.sessions[0].entries[2];
    assert_eq!(label, "cycles");
    assert_eq!(*count, 0);
}
