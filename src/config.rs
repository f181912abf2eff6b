//! Per-codec configuration.

/// Tunables for one [`crate::protocol::CompactProtocol`] instance.
///
/// This is deliberately the only configuration surface the codec exposes:
/// schema evolution and transport negotiation are out of scope (see the
/// crate's non-goals), which would otherwise be the next candidates for a
/// config knob.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Ceiling applied to every decoded list/set/map size and every decoded
    /// string/binary length. The design notes call this out as
    /// intentionally conservative versus the full unsigned varint range.
    pub max_size: i32,
}

/// The conservative ceiling used unless a caller overrides it.
pub const DEFAULT_MAX_SIZE: i32 = 0x7FFF;

impl Default for Config {
    fn default() -> Self {
        Config {
            max_size: DEFAULT_MAX_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_wire_compatible_ceiling() {
        assert_eq!(Config::default().max_size, 0x7FFF);
    }
}
