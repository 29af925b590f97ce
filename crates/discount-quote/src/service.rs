//! # Pricing Service
//!
//! Request in, reply out.
//!
//! ```text
//!   PricingRequest ──parse_request──► OrderContext ──RuleCatalog──► rules
//!                                                                    │
//!   QuoteReply ◄── From<Outcome> ◄── DiscountOrchestrator::price ◄────┘
//!                                     (validates context and rules)
//! ```

use tracing::{debug, info};

use discount_core::{DiscountOrchestrator, Outcome, PricingResult, RuleDraft};

use crate::catalog::RuleCatalog;
use crate::config::QuoteConfig;
use crate::request::{parse_request, PricingRequest};
use crate::response::QuoteReply;

/// Stateless between calls; one instance can serve any number of requests.
#[derive(Debug, Clone, Default)]
pub struct PricingService {
    catalog: RuleCatalog,
    orchestrator: DiscountOrchestrator,
}

impl PricingService {
    pub fn new(config: &QuoteConfig) -> Self {
        PricingService {
            catalog: RuleCatalog::new(&config.catalog, config.tier_schedule()),
            orchestrator: DiscountOrchestrator::new(config.pricing_policy()),
        }
    }

    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    /// Parses `request`, builds the catalog for its subtotal and prices it.
    ///
    /// Catalog rules go through the same validation as any other rule set,
    /// so a misconfigured catalog (e.g. clashing tier names) is rejected.
    pub fn quote(&self, request: Option<&PricingRequest>) -> Outcome<PricingResult> {
        parse_request(request).into_outcome().and_then(|ctx| {
            let drafts: Vec<RuleDraft> = self
                .catalog
                .rules_for(ctx.pricing().subtotal())
                .into_iter()
                .map(RuleDraft::from)
                .collect();
            debug!(
                subtotal = %ctx.pricing().subtotal(),
                rules = drafts.len(),
                "Quoting with catalog rules"
            );
            self.orchestrator.price(Some(&ctx), &drafts)
        })
    }

    pub fn quote_reply(&self, request: Option<&PricingRequest>) -> QuoteReply {
        let reply = QuoteReply::from(self.quote(request));
        info!(status = reply.status_code(), "Quote answered");
        reply
    }
}
