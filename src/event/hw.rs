use crate::ffi::bindings as b;

/// Generalized hardware event.
///
/// These are portable symbolic ids; the kernel maps them onto whatever the
/// PMU actually provides, so some of them may not count on a given chip.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hardware {
    CpuCycle,
    BusCycle,
    RefCpuCycle,

    CacheAccess,
    CacheMiss,

    BranchInstr,
    BranchMiss,

    FrontendStalledCycle,
    BackendStalledCycle,

    Instr,
}

impl Hardware {
    pub(crate) fn id(self) -> u64 {
        match self {
            Hardware::CpuCycle => b::PERF_COUNT_HW_CPU_CYCLES,
            Hardware::BusCycle => b::PERF_COUNT_HW_BUS_CYCLES,
            Hardware::RefCpuCycle => b::PERF_COUNT_HW_REF_CPU_CYCLES,

            Hardware::CacheAccess => b::PERF_COUNT_HW_CACHE_REFERENCES,
            Hardware::CacheMiss => b::PERF_COUNT_HW_CACHE_MISSES,

            Hardware::BranchInstr => b::PERF_COUNT_HW_BRANCH_INSTRUCTIONS,
            Hardware::BranchMiss => b::PERF_COUNT_HW_BRANCH_MISSES,

            Hardware::FrontendStalledCycle => b::PERF_COUNT_HW_STALLED_CYCLES_FRONTEND,
            Hardware::BackendStalledCycle => b::PERF_COUNT_HW_STALLED_CYCLES_BACKEND,

            Hardware::Instr => b::PERF_COUNT_HW_INSTRUCTIONS,
        }
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            Hardware::CpuCycle => "cpu-cycles",
            Hardware::BusCycle => "bus-cycles",
            Hardware::RefCpuCycle => "ref-cycles",

            Hardware::CacheAccess => "cache-refs",
            Hardware::CacheMiss => "cache-misses",

            Hardware::BranchInstr => "branches",
            Hardware::BranchMiss => "branch-misses",

            Hardware::FrontendStalledCycle => "stall-frontend",
            Hardware::BackendStalledCycle => "stall-backend",

            Hardware::Instr => "instructions",
        }
    }
}
