//! # Pricing Configuration
//!
//! Policy, catalog amounts and the dynamic tier schedule.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     DISCOUNT_CAP_BPS=2500                                              │
//! │     DISCOUNT_GROUP_ORDER=campaign,vip,coupon                           │
//! │     DISCOUNT_MAX_TIER_RATE_BPS=800                                     │
//! │     DISCOUNT_VIP_RATE_BPS=1200                                         │
//! │     DISCOUNT_COUPON_CENTS=7500                                         │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/discount-engine/pricing.toml (Linux)                     │
//! │     ~/Library/Application Support/com.discount.engine/pricing.toml     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     30% cap, CAMPAIGN → VIP → COUPON, COUPON ⇄ CAMPAIGN exclusive      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # pricing.toml
//! [policy]
//! cap_bps = 3000
//! group_order = ["campaign", "vip", "coupon"]
//!
//! [[policy.blocks]]
//! group = "coupon"
//! blocks = ["campaign"]
//!
//! [[policy.blocks]]
//! group = "campaign"
//! blocks = ["coupon"]
//!
//! [catalog]
//! vip_rate_bps = 1000
//! coupon_cents = 5000
//!
//! [tiers]
//! base_threshold_cents = 50000
//! threshold_step_cents = 50000
//! base_rate_bps = 200
//! rate_step_bps = 100
//! max_rate_bps = 1000
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use discount_core::orchestrator::{DEFAULT_CAP_BPS, DEFAULT_GROUP_ORDER};
use discount_core::{CapPolicy, DiscountGroup, ExclusivityPolicy, Money, PricingPolicy, Rate};

use crate::error::{QuoteError, QuoteResult};
use crate::tiers::TierSchedule;

/// 100% in basis points.
const FULL_RATE_BPS: u32 = Rate::FULL.bps();

// =============================================================================
// Policy Settings
// =============================================================================

/// One directed exclusivity edge set: once `group` applies, `blocks` may not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockSetting {
    pub group: DiscountGroup,
    pub blocks: Vec<DiscountGroup>,
}

/// Stacking policy for the grouped pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicySettings {
    /// Lifetime cap as basis points of the subtotal.
    #[serde(default = "default_cap_bps")]
    pub cap_bps: u32,

    /// Group visitation order.
    #[serde(default = "default_group_order")]
    pub group_order: Vec<DiscountGroup>,

    /// Exclusivity edges.
    #[serde(default = "default_blocks")]
    pub blocks: Vec<BlockSetting>,
}

fn default_cap_bps() -> u32 {
    DEFAULT_CAP_BPS
}

fn default_group_order() -> Vec<DiscountGroup> {
    DEFAULT_GROUP_ORDER.to_vec()
}

fn default_blocks() -> Vec<BlockSetting> {
    vec![
        BlockSetting {
            group: DiscountGroup::Coupon,
            blocks: vec![DiscountGroup::Campaign],
        },
        BlockSetting {
            group: DiscountGroup::Campaign,
            blocks: vec![DiscountGroup::Coupon],
        },
    ]
}

impl Default for PolicySettings {
    fn default() -> Self {
        PolicySettings {
            cap_bps: default_cap_bps(),
            group_order: default_group_order(),
            blocks: default_blocks(),
        }
    }
}

// =============================================================================
// Catalog Settings
// =============================================================================

/// Amounts for the fixed catalog rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSettings {
    /// VIP discount rate in basis points.
    #[serde(default = "default_vip_rate_bps")]
    pub vip_rate_bps: u32,

    /// Flat coupon amount in cents.
    #[serde(default = "default_coupon_cents")]
    pub coupon_cents: i64,
}

fn default_vip_rate_bps() -> u32 {
    1000
}

fn default_coupon_cents() -> i64 {
    5000
}

impl Default for CatalogSettings {
    fn default() -> Self {
        CatalogSettings {
            vip_rate_bps: default_vip_rate_bps(),
            coupon_cents: default_coupon_cents(),
        }
    }
}

impl CatalogSettings {
    pub fn vip_rate(&self) -> Rate {
        Rate::from_bps(self.vip_rate_bps)
    }

    pub fn coupon_amount(&self) -> Money {
        Money::from_cents(self.coupon_cents)
    }
}

// =============================================================================
// Tier Settings
// =============================================================================

/// Shape of the dynamic campaign tier sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierSettings {
    #[serde(default = "default_base_threshold")]
    pub base_threshold_cents: i64,

    #[serde(default = "default_threshold_step")]
    pub threshold_step_cents: i64,

    #[serde(default = "default_base_rate")]
    pub base_rate_bps: u32,

    #[serde(default = "default_rate_step")]
    pub rate_step_bps: u32,

    /// Tiers above this rate are never generated.
    #[serde(default = "default_max_rate")]
    pub max_rate_bps: u32,
}

fn default_base_threshold() -> i64 {
    50_000
}
fn default_threshold_step() -> i64 {
    50_000
}
fn default_base_rate() -> u32 {
    200
}
fn default_rate_step() -> u32 {
    100
}
fn default_max_rate() -> u32 {
    1000
}

impl Default for TierSettings {
    fn default() -> Self {
        TierSettings {
            base_threshold_cents: default_base_threshold(),
            threshold_step_cents: default_threshold_step(),
            base_rate_bps: default_base_rate(),
            rate_step_bps: default_rate_step(),
            max_rate_bps: default_max_rate(),
        }
    }
}

impl TierSettings {
    pub fn schedule(&self) -> TierSchedule {
        TierSchedule {
            base_threshold: Money::from_cents(self.base_threshold_cents),
            threshold_step: Money::from_cents(self.threshold_step_cents),
            base_rate: Rate::from_bps(self.base_rate_bps),
            rate_step: Rate::from_bps(self.rate_step_bps),
            max_rate: Rate::from_bps(self.max_rate_bps),
        }
    }
}

// =============================================================================
// Main Quote Configuration
// =============================================================================

/// Complete boundary configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteConfig {
    #[serde(default)]
    pub policy: PolicySettings,

    #[serde(default)]
    pub catalog: CatalogSettings,

    #[serde(default)]
    pub tiers: TierSettings,
}

impl QuoteConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (pricing.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> QuoteResult<Self> {
        Self::load_with(config_path, |key| std::env::var(key).ok())
    }

    /// [`load`](QuoteConfig::load) with the `DISCOUNT_*` variables read
    /// through `lookup` instead of the process environment.
    pub fn load_with(
        config_path: Option<PathBuf>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> QuoteResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading pricing config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(lookup);
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load pricing config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> QuoteResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| QuoteError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Pricing config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> QuoteResult<()> {
        let rates = [
            ("cap_bps", self.policy.cap_bps),
            ("vip_rate_bps", self.catalog.vip_rate_bps),
            ("base_rate_bps", self.tiers.base_rate_bps),
            ("max_rate_bps", self.tiers.max_rate_bps),
        ];
        if let Some((name, bps)) = rates.iter().find(|(_, bps)| *bps > FULL_RATE_BPS) {
            return Err(QuoteError::InvalidConfig(format!(
                "{} must not exceed {}, got: {}",
                name, FULL_RATE_BPS, bps
            )));
        }

        if self.policy.group_order.is_empty() {
            return Err(QuoteError::InvalidConfig("group_order must not be empty".into()));
        }

        let mut seen = BTreeSet::new();
        if let Some(repeated) = self.policy.group_order.iter().find(|group| !seen.insert(**group)) {
            return Err(QuoteError::InvalidConfig(format!(
                "group_order lists {} more than once",
                repeated
            )));
        }

        if self.catalog.coupon_cents < 0 {
            return Err(QuoteError::InvalidConfig("coupon_cents must not be negative".into()));
        }

        if self.tiers.base_threshold_cents < 0 {
            return Err(QuoteError::InvalidConfig(
                "base_threshold_cents must not be negative".into(),
            ));
        }

        if self.tiers.threshold_step_cents <= 0 || self.tiers.rate_step_bps == 0 {
            return Err(QuoteError::InvalidConfig(
                "tier steps must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies `DISCOUNT_*` overrides read through `lookup`.
    ///
    /// Unparseable values are logged and ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(cap) = lookup("DISCOUNT_CAP_BPS") {
            match cap.trim().parse::<u32>() {
                Ok(bps) => {
                    debug!(cap_bps = bps, "Overriding cap from environment");
                    self.policy.cap_bps = bps;
                }
                Err(_) => warn!(value = %cap, "Ignoring unparseable DISCOUNT_CAP_BPS"),
            }
        }

        if let Some(order) = lookup("DISCOUNT_GROUP_ORDER") {
            let parsed: Result<Vec<DiscountGroup>, _> = order
                .split(',')
                .filter(|part| !part.trim().is_empty())
                .map(str::parse)
                .collect();
            match parsed {
                Ok(groups) => {
                    debug!(order = %order, "Overriding group order from environment");
                    self.policy.group_order = groups;
                }
                Err(e) => warn!(value = %order, error = %e, "Ignoring DISCOUNT_GROUP_ORDER"),
            }
        }

        if let Some(rate) = lookup("DISCOUNT_MAX_TIER_RATE_BPS") {
            match rate.trim().parse::<u32>() {
                Ok(bps) => self.tiers.max_rate_bps = bps,
                Err(_) => warn!(value = %rate, "Ignoring unparseable DISCOUNT_MAX_TIER_RATE_BPS"),
            }
        }

        if let Some(rate) = lookup("DISCOUNT_VIP_RATE_BPS") {
            match rate.trim().parse::<u32>() {
                Ok(bps) => self.catalog.vip_rate_bps = bps,
                Err(_) => warn!(value = %rate, "Ignoring unparseable DISCOUNT_VIP_RATE_BPS"),
            }
        }

        if let Some(cents) = lookup("DISCOUNT_COUPON_CENTS") {
            match cents.trim().parse::<i64>() {
                Ok(value) => self.catalog.coupon_cents = value,
                Err(_) => warn!(value = %cents, "Ignoring unparseable DISCOUNT_COUPON_CENTS"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "discount", "engine")
            .map(|dirs| dirs.config_dir().join("pricing.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Builds the core stacking policy.
    pub fn pricing_policy(&self) -> PricingPolicy {
        let exclusivity = self
            .policy
            .blocks
            .iter()
            .fold(ExclusivityPolicy::new(), |policy, edge| {
                policy.block(edge.group, edge.blocks.iter().copied())
            });

        PricingPolicy {
            group_order: self.policy.group_order.clone(),
            exclusivity,
            cap: CapPolicy::new(Rate::from_bps(self.policy.cap_bps)),
        }
    }

    pub fn tier_schedule(&self) -> TierSchedule {
        self.tiers.schedule()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config_matches_core_default_policy() {
        let config = QuoteConfig::default();
        assert_eq!(config.pricing_policy(), PricingPolicy::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = QuoteConfig::default();

        config.policy.cap_bps = 10_001;
        assert!(config.validate().is_err());
        config.policy.cap_bps = 10_000;
        assert!(config.validate().is_ok());

        config.policy.group_order = vec![];
        assert!(config.validate().is_err());

        config.policy.group_order = vec![DiscountGroup::Vip, DiscountGroup::Vip];
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("VIP more than once"));

        config.policy.group_order = vec![DiscountGroup::Vip];
        config.tiers.rate_step_bps = 0;
        assert!(config.validate().is_err());
    }

    #[rstest]
    #[case("DISCOUNT_VIP_RATE_BPS", "vip_rate_bps")]
    #[case("DISCOUNT_MAX_TIER_RATE_BPS", "max_rate_bps")]
    #[case("DISCOUNT_CAP_BPS", "cap_bps")]
    fn test_rates_above_full_are_rejected(#[case] var: &str, #[case] field: &str) {
        let mut config = QuoteConfig::default();
        config.apply_overrides(lookup(&[(var, "4000000000")]));

        let err = config.validate().unwrap_err();
        assert!(err.is_config_error());
        assert_eq!(
            err.to_string(),
            format!("Invalid pricing configuration: {field} must not exceed 10000, got: 4000000000")
        );

        let mut config = QuoteConfig::default();
        config.apply_overrides(lookup(&[(var, "10000")]));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_base_rate_above_full_is_rejected() {
        let mut config = QuoteConfig::default();
        config.tiers.base_rate_bps = 10_001;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = QuoteConfig::default();
        config.apply_overrides(lookup(&[
            ("DISCOUNT_CAP_BPS", "2500"),
            ("DISCOUNT_GROUP_ORDER", "vip, coupon"),
            ("DISCOUNT_COUPON_CENTS", "7500"),
            ("DISCOUNT_VIP_RATE_BPS", "not-a-number"),
        ]));

        assert_eq!(config.policy.cap_bps, 2500);
        assert_eq!(config.policy.group_order, [DiscountGroup::Vip, DiscountGroup::Coupon]);
        assert_eq!(config.catalog.coupon_cents, 7500);
        assert_eq!(config.catalog.vip_rate_bps, 1000);
    }

    #[test]
    fn test_bad_group_order_override_is_ignored() {
        let mut config = QuoteConfig::default();
        config.apply_overrides(lookup(&[("DISCOUNT_GROUP_ORDER", "vip,loyalty")]));
        assert_eq!(config.policy.group_order, DEFAULT_GROUP_ORDER);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: QuoteConfig = toml::from_str(
            r#"
            [policy]
            cap_bps = 2000

            [tiers]
            max_rate_bps = 500
            "#,
        )
        .unwrap();

        assert_eq!(config.policy.cap_bps, 2000);
        assert_eq!(config.policy.group_order, DEFAULT_GROUP_ORDER);
        assert_eq!(config.tiers.max_rate_bps, 500);
        assert_eq!(config.tiers.base_rate_bps, 200);
        assert_eq!(config.catalog, CatalogSettings::default());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = QuoteConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[policy]"));
        assert!(toml_str.contains("[tiers]"));
        let parsed: QuoteConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!("discount-quote-{}.toml", std::process::id()));
        let mut config = QuoteConfig::default();
        config.policy.cap_bps = 1500;
        config.save(Some(path.clone())).unwrap();

        let loaded = QuoteConfig::load_with(Some(path.clone()), lookup(&[])).unwrap();
        let overridden =
            QuoteConfig::load_with(Some(path.clone()), lookup(&[("DISCOUNT_CAP_BPS", "2000")])).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded.policy.cap_bps, 1500);
        assert_eq!(overridden.policy.cap_bps, 2000);
    }

    #[test]
    fn test_invalid_file_fails_to_load() {
        let path = std::env::temp_dir().join(format!("discount-quote-bad-{}.toml", std::process::id()));
        std::fs::write(&path, "[catalog]\nvip_rate_bps = 20000\n").unwrap();

        let result = QuoteConfig::load_with(Some(path.clone()), lookup(&[]));
        let _ = std::fs::remove_file(&path);
        assert!(matches!(result, Err(QuoteError::InvalidConfig(_))));
    }
}
