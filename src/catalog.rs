//! Named counter tables selectable by the operator or a workload.

use crate::event::hw::Hardware;
use crate::event::sw::Software;
use crate::event::CounterDesc;

/// Named, ordered list of counter descriptors.
///
/// Lookups hand out a fresh copy each time, so resolution performed for
/// one run never leaks into the next.
#[derive(Clone, Debug)]
pub struct EventSet {
    name: &'static str,
    events: Vec<CounterDesc>,
}

impl EventSet {
    pub fn new(name: &'static str, events: Vec<CounterDesc>) -> Self {
        Self { name, events }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn events(&self) -> &[CounterDesc] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub(crate) fn events_mut(&mut self) -> &mut [CounterDesc] {
        &mut self.events
    }
}

/// The harness-wide default: the portable hardware spread plus page
/// faults, usable on any machine with a PMU.
pub fn default_set() -> EventSet {
    EventSet::new(
        "default",
        vec![
            CounterDesc::hardware(Hardware::CpuCycle),
            CounterDesc::hardware(Hardware::Instr),
            CounterDesc::hardware(Hardware::CacheAccess),
            CounterDesc::hardware(Hardware::CacheMiss),
            CounterDesc::hardware(Hardware::FrontendStalledCycle),
            CounterDesc::hardware(Hardware::BackendStalledCycle),
            CounterDesc::software(Software::PageFault),
        ],
    )
}

/// Sysfs-discovered events of the core CPU PMU. Entries that do not
/// exist on the running machine stay unresolved and report zero.
pub fn cpu_pmu_set() -> EventSet {
    EventSet::new(
        "cpu-pmu",
        vec![
            CounterDesc::sysfs("armv8_pmuv3/cpu_cycles"),
            CounterDesc::sysfs("armv8_pmuv3/inst_retired"),
            CounterDesc::sysfs("armv8_pmuv3/inst_spec"),
            CounterDesc::sysfs("armv8_pmuv3/br_retired"),
            CounterDesc::sysfs("armv8_pmuv3/br_mis_pred_retired"),
            CounterDesc::sysfs("armv8_pmuv3/stall_frontend"),
            CounterDesc::sysfs("armv8_pmuv3/stall_backend"),
            CounterDesc::sysfs("armv8_pmuv3/mem_access"),
            CounterDesc::sysfs("armv8_pmuv3/l1d_cache"),
            CounterDesc::sysfs("armv8_pmuv3/l1d_cache_refill"),
            CounterDesc::sysfs("armv8_pmuv3/l2d_cache_refill"),
            CounterDesc::sysfs("armv8_pmuv3/dtlb_walk"),
            CounterDesc::sysfs("arm_dsu_0/cycles").named("dsu_cycles"),
            CounterDesc::sysfs("arm_dsu_0/l3d_cache"),
            CounterDesc::sysfs("arm_dsu_0/l3d_cache_refill"),
        ],
    )
}

pub fn find(name: &str) -> Option<EventSet> {
    match name {
        "default" => Some(default_set()),
        "cpu-pmu" => Some(cpu_pmu_set()),
        _ => None,
    }
}

pub fn names() -> &'static [&'static str] {
    &["default", "cpu-pmu"]
}
