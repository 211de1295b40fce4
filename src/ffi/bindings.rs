#![allow(non_camel_case_types)]

//! Hand-declared subset of the `perf_event_open` ABI.
//!
//! Only the pieces the counting path needs: the attribute struct up to
//! `PERF_ATTR_SIZE_VER1`, the symbolic event ids used by the catalog, and
//! the enable/disable/reset ioctl opcodes. Later attribute fields are
//! covered by the `size` field, which the kernel uses to zero-extend.

pub const PERF_TYPE_HARDWARE: u32 = 0;
pub const PERF_TYPE_SOFTWARE: u32 = 1;
pub const PERF_TYPE_RAW: u32 = 4;

pub const PERF_COUNT_HW_CPU_CYCLES: u64 = 0;
pub const PERF_COUNT_HW_INSTRUCTIONS: u64 = 1;
pub const PERF_COUNT_HW_CACHE_REFERENCES: u64 = 2;
pub const PERF_COUNT_HW_CACHE_MISSES: u64 = 3;
pub const PERF_COUNT_HW_BRANCH_INSTRUCTIONS: u64 = 4;
pub const PERF_COUNT_HW_BRANCH_MISSES: u64 = 5;
pub const PERF_COUNT_HW_BUS_CYCLES: u64 = 6;
pub const PERF_COUNT_HW_STALLED_CYCLES_FRONTEND: u64 = 7;
pub const PERF_COUNT_HW_STALLED_CYCLES_BACKEND: u64 = 8;
pub const PERF_COUNT_HW_REF_CPU_CYCLES: u64 = 9;

pub const PERF_COUNT_SW_CPU_CLOCK: u64 = 0;
pub const PERF_COUNT_SW_TASK_CLOCK: u64 = 1;
pub const PERF_COUNT_SW_PAGE_FAULTS: u64 = 2;
pub const PERF_COUNT_SW_CONTEXT_SWITCHES: u64 = 3;
pub const PERF_COUNT_SW_CPU_MIGRATIONS: u64 = 4;
pub const PERF_COUNT_SW_PAGE_FAULTS_MIN: u64 = 5;
pub const PERF_COUNT_SW_PAGE_FAULTS_MAJ: u64 = 6;
pub const PERF_COUNT_SW_ALIGNMENT_FAULTS: u64 = 7;
pub const PERF_COUNT_SW_EMULATION_FAULTS: u64 = 8;

// _IO('$', 0..) from include/uapi/linux/perf_event.h
pub const PERF_IOC_OP_ENABLE: u64 = 0x2400;
pub const PERF_IOC_OP_DISABLE: u64 = 0x2401;

pub const PERF_FLAG_FD_CLOEXEC: u64 = 1 << 3;

pub const PERF_ATTR_FLAG_DISABLED: u64 = 1 << 0;

/// `struct perf_event_attr` through `PERF_ATTR_SIZE_VER1` (72 bytes).
///
/// The kernel bitfield word (`disabled`, `inherit`, ...) is kept as a
/// single `u64` set via the `PERF_ATTR_FLAG_*` constants.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default)]
pub struct perf_event_attr {
    pub type_: u32,
    pub size: u32,
    pub config: u64,
    pub sample_period_or_freq: u64,
    pub sample_type: u64,
    pub read_format: u64,
    pub flags: u64,
    pub wakeup_events: u32,
    pub bp_type: u32,
    pub config1: u64,
    pub config2: u64,
}

impl perf_event_attr {
    pub fn sized() -> Self {
        Self {
            size: size_of::<Self>() as _,
            ..Self::default()
        }
    }
}
