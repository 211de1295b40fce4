//! Built-in demo workloads.
//!
//! Small, self-contained payloads that exercise the measurement engine;
//! real users plug in their own [`Case`](crate::case::Case)
//! implementations.

use std::hint::black_box;
use std::io::{Error, Result};

use log::warn;

use crate::case::{Case, CaseCtx};
use crate::catalog::EventSet;
use crate::event::hw::Hardware;
use crate::event::CounterDesc;

fn arg_value<'a>(args: &'a [String], key: &str) -> Option<&'a str> {
    args.iter()
        .find_map(|a| a.strip_prefix(key).and_then(|rest| rest.strip_prefix('=')))
}

/// Sequential write bandwidth: fills a heap buffer once per session.
pub struct Memset {
    size: usize,
    buf: Vec<u8>,
}

impl Default for Memset {
    fn default() -> Self {
        Self {
            size: 8 << 20,
            buf: Vec::new(),
        }
    }
}

impl Memset {
    pub fn with_size(size: usize) -> Self {
        Self {
            size,
            buf: Vec::new(),
        }
    }
}

impl Case for Memset {
    fn name(&self) -> &str {
        "memset"
    }

    fn description(&self) -> &str {
        "Fill a heap buffer, sequential stores. (size=<bytes>)"
    }

    fn init(&mut self, ctx: &mut CaseCtx) -> Result<()> {
        if let Some(v) = arg_value(ctx.args, "size") {
            self.size = v.parse().map_err(Error::other)?;
        }
        if self.size == 0 {
            return Err(Error::other("memset: size must be non-zero"));
        }
        self.buf = vec![0; self.size];
        Ok(())
    }

    fn body(&mut self, _ctx: &mut CaseCtx) {
        self.buf.fill(0xa5);
        black_box(self.buf.as_slice());
    }

    fn exit(&mut self, _ctx: &mut CaseCtx) -> Result<()> {
        self.buf = Vec::new();
        Ok(())
    }
}

fn xorshift(state: &mut u64) -> u64 {
    let mut x = *state;
    x ^= x << 13;
    x ^= x >> 7;
    x ^= x << 17;
    *state = x;
    x
}

/// Memory latency: a dependent pointer chase over a single-cycle random
/// permutation. Self-bracketed so chain construction stays outside the
/// measured interval.
pub struct MemLat {
    len: usize,
    steps: usize,
    next: Vec<u32>,
}

impl Default for MemLat {
    fn default() -> Self {
        Self {
            len: 1 << 18,
            steps: 1 << 18,
            next: Vec::new(),
        }
    }
}

impl Case for MemLat {
    fn name(&self) -> &str {
        "memlat"
    }

    fn description(&self) -> &str {
        "Random-walk load latency, dependent loads. (len=<entries>, steps=<n>)"
    }

    fn preferred_events(&self) -> Option<EventSet> {
        Some(EventSet::new(
            "memlat",
            vec![
                CounterDesc::hardware(Hardware::CpuCycle),
                CounterDesc::hardware(Hardware::Instr),
                CounterDesc::hardware(Hardware::CacheAccess),
                CounterDesc::hardware(Hardware::CacheMiss),
            ],
        ))
    }

    fn brackets_timing(&self) -> bool {
        true
    }

    fn init(&mut self, ctx: &mut CaseCtx) -> Result<()> {
        if let Some(v) = arg_value(ctx.args, "len") {
            self.len = v.parse().map_err(Error::other)?;
        }
        if let Some(v) = arg_value(ctx.args, "steps") {
            self.steps = v.parse().map_err(Error::other)?;
        }
        if self.len < 2 {
            return Err(Error::other("memlat: len must be at least 2"));
        }

        // Sattolo shuffle: one cycle covering every entry.
        let mut next: Vec<u32> = (0..self.len as u32).collect();
        let mut state = 0x9e3779b97f4a7c15_u64;
        for i in (1..self.len).rev() {
            let j = (xorshift(&mut state) % i as u64) as usize;
            next.swap(i, j);
        }
        self.next = next;
        Ok(())
    }

    fn body(&mut self, ctx: &mut CaseCtx) {
        if let Err(err) = ctx.session.begin() {
            warn!("memlat: {err}");
            return;
        }

        let mut idx = 0_u32;
        for _ in 0..self.steps {
            idx = self.next[idx as usize];
        }
        black_box(idx);

        if let Err(err) = ctx.session.end() {
            warn!("memlat: {err}");
        }
    }

    fn exit(&mut self, _ctx: &mut CaseCtx) -> Result<()> {
        self.next = Vec::new();
        Ok(())
    }
}
