
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use log::warn;
use thiserror::Error;

use super::raw::RawRef;
use super::CounterDesc;

const DEVICES_PATH: &str = "/sys/bus/event_source/devices";

#[derive(Debug, Error)]
pub enum ResolutionError {
    /// The `"<device>/<event-file>"` reference is missing a component.
    #[error("malformed raw event reference {0:?}")]
    MalformedReference(String),

    /// Device metadata is missing or unparsable, typically because the
    /// PMU does not exist on this machine.
    #[error("PMU metadata unavailable: {0}")]
    Unavailable(#[from] std::io::Error),
}

fn read_field<P>(path: P, skip: &str) -> io::Result<String>
where
    P: AsRef<Path>,
{
    let mut file = File::open(path)?;
    file.seek(SeekFrom::Start(skip.len() as _))?;

    let mut acc = Vec::with_capacity(8);
    let mut buf = [0];
    while file.read(&mut buf)? > 0 {
        if matches!(buf[0], b'\n' | b',' | b'-') {
            break;
        }
        acc.extend(buf);
    }

    String::from_utf8(acc).map_err(io::Error::other)
}

// The type value can be found in the sysfs filesystem: there is a
// subdirectory per PMU instance under `/sys/bus/event_source/devices`,
// containing a `type` file whose content is a plain integer.
fn get_type<P>(path: P) -> io::Result<u32>
where
    P: AsRef<Path>,
{
    read_field(path, "")?.parse::<u32>().map_err(io::Error::other)
}

// `format/event` declares where the event id sub-field sits within the
// config value, as `config:<lo>-<hi>` (or `config:<bit>` for one bit).
fn get_event_shift<P>(path: P) -> io::Result<u32>
where
    P: AsRef<Path>,
{
    read_field(path, "config:")?
        .parse::<u32>()
        .map_err(io::Error::other)
}

// `events/<name>` holds the raw event code, as `event=0x<hex>`, possibly
// followed by more comma-separated fields.
fn get_event_code<P>(path: P) -> io::Result<u64>
where
    P: AsRef<Path>,
{
    let field = read_field(path, "event=")?;
    let hex = field.strip_prefix("0x").unwrap_or(&field);
    u64::from_str_radix(hex, 16).map_err(io::Error::other)
}

/// Finalizes sysfs-discovered raw events against the event source
/// metadata the kernel exposes.
#[derive(Clone, Debug)]
pub struct Resolver {
    root: PathBuf,
}

impl Default for Resolver {
    fn default() -> Self {
        Self {
            root: DEVICES_PATH.into(),
        }
    }
}

impl Resolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves against an alternate event source tree instead of sysfs.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Fills in the descriptor's type, config value and label from the
    /// device metadata. A no-op for already-resolved descriptors, so
    /// resolution never repeats metadata reads.
    ///
    /// On failure the descriptor is left unresolved; it will degrade to a
    /// zero count when a session tries to open it.
    pub fn resolve(&self, desc: &mut CounterDesc) -> Result<(), ResolutionError> {
        if desc.resolved {
            return Ok(());
        }
        let Some(reference) = &desc.raw_ref else {
            return Ok(());
        };

        let raw = RawRef::parse(reference)
            .ok_or_else(|| ResolutionError::MalformedReference(reference.clone()))?;

        let device = self.root.join(raw.device);
        let ty = get_type(device.join("type"))?;
        let shift = get_event_shift(device.join("format").join("event"))?;
        let code = get_event_code(device.join("events").join(raw.event))?;

        if desc.name.is_none() {
            desc.name = Some(raw.event.to_owned());
        }
        desc.ty = ty;
        desc.code = code << shift;
        desc.resolved = true;

        Ok(())
    }

    /// Resolves every descriptor in the list, warning and continuing on
    /// failure. The same catalog is expected to run across heterogeneous
    /// hardware, so a PMU that is missing here is not an error.
    pub fn resolve_all(&self, events: &mut [CounterDesc]) {
        for desc in events {
            if let Err(err) = self.resolve(desc) {
                warn!("event {} left unresolved: {err}", desc.label());
            }
        }
    }
}
