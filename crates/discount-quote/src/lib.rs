//! # discount-quote: Request Boundary for the Discount Engine
//!
//! Parses a quote request, assembles the rule catalog for it, runs the
//! [`discount_core`] orchestrator and shapes the reply.
//!
//! ## Modules
//!
//! - [`request`] - Request DTO and error-accumulating parsing
//! - [`tiers`] - Unbounded campaign tier sequence
//! - [`catalog`] - VIP, coupon and tier rules
//! - [`response`] - Quote/error DTOs and outcome → reply mapping
//! - [`service`] - The end-to-end quote call
//! - [`config`] - `pricing.toml` + environment configuration
//! - [`error`] - Boundary errors
//!
//! ## Example Usage
//!
//! ```rust
//! use discount_quote::{PricingRequest, PricingService, QuoteConfig};
//!
//! let service = PricingService::new(&QuoteConfig::default());
//! let reply = service.quote_reply(Some(&PricingRequest::new("1200.00", true, true)));
//! assert_eq!(reply.status_code(), 200);
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod request;
pub mod response;
pub mod service;
pub mod tiers;

pub use catalog::RuleCatalog;
pub use config::QuoteConfig;
pub use error::{QuoteError, QuoteResult};
pub use request::{parse_request, PricingRequest};
pub use response::{ErrorResponse, QuoteReply, QuoteResponse, StepResponse};
pub use service::PricingService;
pub use tiers::{CampaignTier, TierSchedule};
