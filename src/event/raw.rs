/// Split `"<device>/<event-file>"` reference to a sysfs-discovered event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawRef<'a> {
    pub device: &'a str,
    pub event: &'a str,
}

impl<'a> RawRef<'a> {
    /// Both components must be present and non-empty, with no extras.
    pub fn parse(reference: &'a str) -> Option<Self> {
        let mut parts = reference.split('/');
        let device = parts.next().filter(|s| !s.is_empty())?;
        let event = parts.next().filter(|s| !s.is_empty())?;
        if parts.next().is_some() {
            return None;
        }
        Some(Self { device, event })
    }
}

#[cfg(test)]
mod test {
    use super::RawRef;

    #[test]
    fn test_parse_ref() {
        let r = RawRef::parse("armv8_pmuv3/stall_slot").unwrap();
        assert_eq!(r.device, "armv8_pmuv3");
        assert_eq!(r.event, "stall_slot");
    }

    #[test]
    fn test_parse_ref_rejects_partial() {
        assert_eq!(RawRef::parse("armv8_pmuv3"), None);
        assert_eq!(RawRef::parse("armv8_pmuv3/"), None);
        assert_eq!(RawRef::parse("/stall_slot"), None);
        assert_eq!(RawRef::parse("a/b/c"), None);
    }
}
