pub(crate) mod bindings;
pub(crate) mod syscall;

pub(crate) type Attr = bindings::perf_event_attr;
