//! Feed rate selection

use shoptools_settings::ConfigurationProfile;
use tracing::{debug, warn};

/// Feed rate (mm/min) used when no material type is configured at all
pub const DEFAULT_FEED_RATE: f64 = 100.0;

/// Resolve the feed rate for a material (mm/min)
///
/// The matching material type wins. Without a match the slowest configured
/// feed rate is used, and without any configured materials
/// [`DEFAULT_FEED_RATE`].
pub fn resolve_feed_rate(config: &ConfigurationProfile, material_name: &str) -> f64 {
    let unit = config.default_unit();

    if let Some(material) = config.find_material(material_name) {
        let rate = material.feed_rate_mm(unit);
        if rate > 0.0 {
            debug!("Feed rate {} mm/min for '{}'", rate, material.name);
            return rate;
        }
        warn!("Material '{}' has no usable feed rate", material.name);
    } else if !material_name.trim().is_empty() {
        warn!("Material '{}' is not configured", material_name);
    }

    let slowest = config
        .material_types
        .iter()
        .map(|m| m.feed_rate_mm(unit))
        .filter(|rate| *rate > 0.0)
        .min_by(|a, b| a.total_cmp(b));

    match slowest {
        Some(rate) => {
            debug!("Using slowest configured feed rate {} mm/min", rate);
            rate
        }
        None => {
            warn!("No feed rates configured, using {} mm/min", DEFAULT_FEED_RATE);
            DEFAULT_FEED_RATE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shoptools_core::data::MaterialType;

    #[test]
    fn test_matching_material() {
        let config = ConfigurationProfile::new();
        assert_eq!(resolve_feed_rate(&config, "plywood"), 1200.0);
    }

    #[test]
    fn test_slowest_when_unmatched() {
        let config = ConfigurationProfile::new();
        assert_eq!(resolve_feed_rate(&config, ""), 600.0);
        assert_eq!(resolve_feed_rate(&config, "Granite"), 600.0);
    }

    #[test]
    fn test_default_without_materials() {
        let mut config = ConfigurationProfile::new();
        config.material_types.clear();
        assert_eq!(resolve_feed_rate(&config, "Oak"), DEFAULT_FEED_RATE);

        config.material_types.push(MaterialType::new("Foam", "fast"));
        assert_eq!(resolve_feed_rate(&config, "Foam"), DEFAULT_FEED_RATE);
    }
}
