//! Sizing configuration for the connection index.

/// Default horizon: connections up to this many days past the start date.
pub const MAX_DAYS: usize = 360;

/// Default stop-count ceiling: up to two intermediate stops.
pub const MAX_STOPS: u8 = 2;

/// Configuration parameters for the connection index.
///
/// Both dimensions are fixed at construction; the defaults match the
/// published constants and are what external collaborators rely on.
#[derive(Debug, Clone)]
pub struct IndexConfig {
    /// Number of days the index can address, counted from the start date.
    pub max_days: usize,

    /// Highest admissible stop count for a connection.
    pub max_stops: u8,
}

impl IndexConfig {
    /// Create a configuration with explicit dimensions.
    pub fn new(max_days: usize, max_stops: u8) -> Self {
        Self {
            max_days,
            max_stops,
        }
    }

    /// Number of stop tiers a store cell holds (stop counts 0..=max_stops).
    pub fn stop_tiers(&self) -> usize {
        usize::from(self.max_stops) + 1
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            max_days: MAX_DAYS,
            max_stops: MAX_STOPS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = IndexConfig::default();

        assert_eq!(config.max_days, 360);
        assert_eq!(config.max_stops, 2);
    }

    #[test]
    fn stop_tiers_includes_direct() {
        assert_eq!(IndexConfig::default().stop_tiers(), 3);
        assert_eq!(IndexConfig::new(30, 0).stop_tiers(), 1);
    }

    #[test]
    fn custom_config() {
        let config = IndexConfig::new(90, 1);

        assert_eq!(config.max_days, 90);
        assert_eq!(config.max_stops, 1);
    }
}
