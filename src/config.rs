//! Mount options passed from the page.

use serde::Deserialize;

/// Element id the background mounts into when the page gives no override.
pub const DEFAULT_MOUNT_ID: &str = "hero-tsx-mount";

/// Accessible label of the canvas; the background is purely decorative.
pub const DEFAULT_ARIA_LABEL: &str = "Animated aurora waves background";

/// Options accepted by `AuroraHandle.mount({ ... })`.
///
/// Every field is optional on the JS side; keys are camelCase.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AuroraConfig {
    pub mount_id: String,
    /// Palette seed. `None` draws one from `Math.random()` at mount.
    pub seed: Option<u64>,
    pub aria_label: String,
}

impl Default for AuroraConfig {
    fn default() -> Self {
        Self {
            mount_id: DEFAULT_MOUNT_ID.to_string(),
            seed: None,
            aria_label: DEFAULT_ARIA_LABEL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_hero_mount() {
        let config = AuroraConfig::default();
        assert_eq!(config.mount_id, "hero-tsx-mount");
        assert_eq!(config.seed, None);
        assert_eq!(config.aria_label, DEFAULT_ARIA_LABEL);
    }
}
