use crate::ffi::bindings as b;

/// Software event counted by the kernel itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Software {
    CpuClock,
    TaskClock,

    PageFault,
    MinorPageFault,
    MajorPageFault,

    CtxSwitch,
    CpuMigration,

    AlignFault,
    EmuFault,
}

impl Software {
    pub(crate) fn id(self) -> u64 {
        match self {
            Software::CpuClock => b::PERF_COUNT_SW_CPU_CLOCK,
            Software::TaskClock => b::PERF_COUNT_SW_TASK_CLOCK,

            Software::PageFault => b::PERF_COUNT_SW_PAGE_FAULTS,
            Software::MinorPageFault => b::PERF_COUNT_SW_PAGE_FAULTS_MIN,
            Software::MajorPageFault => b::PERF_COUNT_SW_PAGE_FAULTS_MAJ,

            Software::CtxSwitch => b::PERF_COUNT_SW_CONTEXT_SWITCHES,
            Software::CpuMigration => b::PERF_COUNT_SW_CPU_MIGRATIONS,

            Software::AlignFault => b::PERF_COUNT_SW_ALIGNMENT_FAULTS,
            Software::EmuFault => b::PERF_COUNT_SW_EMULATION_FAULTS,
        }
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            Software::CpuClock => "cpu-clock",
            Software::TaskClock => "task-clock",

            Software::PageFault => "page-faults",
            Software::MinorPageFault => "minor-faults",
            Software::MajorPageFault => "major-faults",

            Software::CtxSwitch => "ctx-switches",
            Software::CpuMigration => "cpu-migrations",

            Software::AlignFault => "align-faults",
            Software::EmuFault => "emu-faults",
        }
    }
}
