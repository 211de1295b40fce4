use std::fs::File;
use std::io::{Error, Result};
use std::os::fd::{AsRawFd, FromRawFd};

use super::Attr;

pub fn perf_event_open(attr: &Attr, pid: i32, cpu: i32, group_fd: i32, flags: u64) -> Result<File> {
    let num = libc::SYS_perf_event_open;
    let fd = unsafe { libc::syscall(num, attr, pid, cpu, group_fd, flags) };
    if fd != -1 {
        Ok(unsafe { File::from_raw_fd(fd as _) })
    } else {
        Err(Error::last_os_error())
    }
}

pub fn ioctl(file: &File, op: u64) -> Result<i32> {
    let fd = file.as_raw_fd();
    let result = unsafe { libc::ioctl(fd, op as _) };
    if result != -1 {
        Ok(result)
    } else {
        Err(Error::last_os_error())
    }
}

/// Reads the accumulated value of a counting-mode event.
///
/// With no read format flags set the kernel returns a single `u64`.
pub fn read_count(file: &File) -> Result<u64> {
    let fd = file.as_raw_fd();
    let mut count = 0_u64;
    let buf = &mut count as *mut u64 as _;
    let bytes = unsafe { libc::read(fd, buf, size_of::<u64>()) };
    if bytes == size_of::<u64>() as isize {
        Ok(count)
    } else if bytes != -1 {
        Err(Error::other("short read from counter fd"))
    } else {
        Err(Error::last_os_error())
    }
}

pub fn sched_setaffinity(cpu: u32) -> Result<()> {
    let mut mask = unsafe { std::mem::zeroed::<libc::cpu_set_t>() };
    unsafe { libc::CPU_SET(cpu as usize, &mut mask) };
    let result = unsafe { libc::sched_setaffinity(0, size_of::<libc::cpu_set_t>(), &mask) };
    if result != -1 {
        Ok(())
    } else {
        Err(Error::last_os_error())
    }
}
