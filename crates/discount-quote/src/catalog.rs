//! Rules offered to every quote.

use discount_core::{DiscountGroup, DiscountRule, Money, Rate};

use crate::config::CatalogSettings;
use crate::tiers::{share_of_total, TierSchedule};

pub const VIP_RULE_NAME: &str = "VIP_10_PERCENT";
pub const COUPON_RULE_NAME: &str = "COUPON_50_FLAT";

const VIP_PRIORITY: i32 = 10;
const COUPON_PRIORITY: i32 = 5;

/// Fixed VIP and coupon rules plus the dynamic campaign tiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleCatalog {
    vip_rate: Rate,
    coupon_amount: Money,
    tiers: TierSchedule,
}

impl Default for RuleCatalog {
    fn default() -> Self {
        RuleCatalog::new(&CatalogSettings::default(), TierSchedule::default())
    }
}

impl RuleCatalog {
    pub fn new(settings: &CatalogSettings, tiers: TierSchedule) -> Self {
        RuleCatalog {
            vip_rate: settings.vip_rate(),
            coupon_amount: settings.coupon_amount(),
            tiers,
        }
    }

    /// VIPs get `vip_rate` of the current total.
    pub fn vip_rule(&self) -> DiscountRule {
        let rate = self.vip_rate;
        DiscountRule::new(
            VIP_RULE_NAME,
            DiscountGroup::Vip,
            VIP_PRIORITY,
            |ctx| Ok(ctx.vip),
            move |ctx| share_of_total(ctx, rate),
        )
    }

    /// Coupon holders get a flat amount.
    pub fn coupon_rule(&self) -> DiscountRule {
        let amount = self.coupon_amount;
        DiscountRule::new(
            COUPON_RULE_NAME,
            DiscountGroup::Coupon,
            COUPON_PRIORITY,
            |ctx| Ok(ctx.has_coupon),
            move |_| Ok(amount),
        )
    }

    /// Every rule for an order with this subtotal: VIP, coupon, then the
    /// reachable tiers in ascending order.
    pub fn rules_for(&self, subtotal: Money) -> Vec<DiscountRule> {
        [self.vip_rule(), self.coupon_rule()]
            .into_iter()
            .chain(self.tiers.applicable(subtotal).map(|tier| tier.to_rule()))
            .collect()
    }
}
