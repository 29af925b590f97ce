//! # Validation Module
//!
//! Checks a pricing request before any rule runs.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Independent Checks                                 │
//! │                                                                         │
//! │  validate_context(ctx)              validate_rules(drafts)              │
//! │  ├── present?                       ├── non-empty?                      │
//! │  ├── subtotal >= 0?                 ├── each: name / group /            │
//! │  ├── discount_total >= 0?           │         eligibility / amount      │
//! │  └── discount_total <= subtotal?    └── names unique?                   │
//! │           │                                   │                         │
//! │           └──────────── Validation::map2 ─────┘                         │
//! │                               │                                         │
//! │                               ▼                                         │
//! │          Valid(PricingCommand)  or  Invalid(EVERY complaint)            │
//! │                                                                         │
//! │  Nothing here short-circuits: a caller sees all problems at once.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use discount_core::validation::validate;
//!
//! let outcome = validate(None, &[]);
//! assert_eq!(
//!     outcome.errors(),
//!     ["OrderContext is required", "At least one discount rule is required"]
//! );
//! ```

use std::collections::BTreeSet;

use crate::effect::Validation;
use crate::error::ValidationError;
use crate::pricing::OrderContext;
use crate::rule::{DiscountRule, RuleDraft};

/// A request that passed validation: a context and fully-formed rules.
#[derive(Debug, Clone)]
pub struct PricingCommand {
    pub context: OrderContext,
    pub rules: Vec<DiscountRule>,
}

/// Validates the whole request, accumulating every complaint.
pub fn validate(ctx: Option<&OrderContext>, rules: &[RuleDraft]) -> Validation<PricingCommand> {
    Validation::map2(validate_context(ctx), validate_rules(rules), |context, rules| {
        PricingCommand { context, rules }
    })
}

// =============================================================================
// Context
// =============================================================================

/// Checks that the context exists and carries a sane ledger.
pub fn validate_context(ctx: Option<&OrderContext>) -> Validation<OrderContext> {
    let Some(ctx) = ctx else {
        return Validation::invalid(ValidationError::ContextRequired);
    };

    let pricing = ctx.pricing();
    let mut errors = Vec::new();

    if pricing.subtotal().is_negative() {
        errors.push(ValidationError::NegativeSubtotal.to_string());
    }
    if pricing.discount_total().is_negative() {
        errors.push(ValidationError::NegativeDiscountTotal.to_string());
    }
    if pricing.discount_total() > pricing.subtotal() {
        errors.push(ValidationError::DiscountExceedsSubtotal.to_string());
    }

    Validation::check(*ctx, errors)
}

// =============================================================================
// Rules
// =============================================================================

/// Checks the rule list as a whole and every rule in it.
pub fn validate_rules(rules: &[RuleDraft]) -> Validation<Vec<DiscountRule>> {
    if rules.is_empty() {
        return Validation::invalid(ValidationError::NoRules);
    }

    let each: Validation<Vec<DiscountRule>> = rules
        .iter()
        .enumerate()
        .map(|(index, draft)| validate_rule(index, draft))
        .collect();

    each.zip(unique_names(rules)).map(|(rules, ())| rules)
}

/// Checks one draft and builds the rule when every component is present.
///
/// ## Rules
/// - Name must be present and not blank
/// - Group, eligibility predicate and amount function must be present
///
/// Complaints about an unnamed rule refer to it as `#<index>`.
pub fn validate_rule(index: usize, draft: &RuleDraft) -> Validation<DiscountRule> {
    let name = draft.name.as_deref().map(str::trim).filter(|name| !name.is_empty());
    let label = name.map_or_else(|| format!("#{index}"), str::to_string);

    let mut errors = Vec::new();
    if name.is_none() {
        errors.push(ValidationError::MissingRuleName { index }.to_string());
    }
    if draft.group.is_none() {
        errors.push(ValidationError::MissingGroup { rule: label.clone() }.to_string());
    }
    if draft.eligibility.is_none() {
        errors.push(ValidationError::MissingEligibility { rule: label.clone() }.to_string());
    }
    if draft.amount.is_none() {
        errors.push(ValidationError::MissingAmountFn { rule: label }.to_string());
    }

    match (name, draft.group, &draft.eligibility, &draft.amount) {
        (Some(name), Some(group), Some(eligibility), Some(amount)) => Validation::valid(
            DiscountRule::from_capabilities(name, group, draft.priority, eligibility.clone(), amount.clone()),
        ),
        _ => Validation::Invalid(errors),
    }
}

/// One complaint per repeated name, in first-repeat order.
fn unique_names(rules: &[RuleDraft]) -> Validation<()> {
    let mut seen = BTreeSet::new();
    let mut reported = BTreeSet::new();
    let mut errors = Vec::new();

    for name in rules
        .iter()
        .filter_map(|draft| draft.name.as_deref().map(str::trim))
        .filter(|name| !name.is_empty())
    {
        if !seen.insert(name) && reported.insert(name) {
            errors.push(ValidationError::DuplicateRuleName { rule: name.to_string() }.to_string());
        }
    }

    Validation::check((), errors)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::pricing::OrderPricing;
    use crate::types::DiscountGroup;

    fn complete(name: &str) -> RuleDraft {
        RuleDraft::new()
            .name(name)
            .group(DiscountGroup::Vip)
            .eligible(|_| Ok(true))
            .amount(|_| Ok(Money::zero()))
    }

    fn ctx(subtotal: i64, discount: i64) -> OrderContext {
        OrderContext::new(
            false,
            false,
            OrderPricing::from_parts(Money::from_cents(subtotal), Money::from_cents(discount)),
        )
    }

    #[test]
    fn test_valid_request() {
        let context = ctx(1000, 0);
        let command = validate(Some(&context), &[complete("A"), complete("B")]);
        match command {
            Validation::Valid(command) => {
                assert_eq!(command.context, context);
                assert_eq!(command.rules.len(), 2);
                assert_eq!(command.rules[1].name(), "B");
            }
            Validation::Invalid(errors) => panic!("unexpected errors: {errors:?}"),
        }
    }

    #[test]
    fn test_bad_ledger_reports_everything() {
        let errors = validate_context(Some(&ctx(-100, -50))).errors().to_vec();
        assert_eq!(
            errors,
            ["Subtotal cannot be negative", "Discount total cannot be negative"]
        );

        let over = validate_context(Some(&ctx(100, 200)));
        assert_eq!(over.errors(), ["Discount total cannot exceed subtotal"]);
    }

    #[test]
    fn test_unnamed_rule_reports_all_missing_parts() {
        let errors = validate_rule(3, &RuleDraft::new()).errors().to_vec();
        assert_eq!(
            errors,
            [
                "Rule at index 3 must have a name",
                "Rule '#3' must have a group",
                "Rule '#3' must have an eligibility predicate",
                "Rule '#3' must have a calculation function",
            ]
        );
    }

    #[test]
    fn test_blank_name_is_missing() {
        let draft = complete("   ");
        assert_eq!(validate_rule(0, &draft).errors(), ["Rule at index 0 must have a name"]);
    }

    #[test]
    fn test_name_is_trimmed() {
        let rule = validate_rule(0, &complete("  VIP10 ")).into_result().unwrap();
        assert_eq!(rule.name(), "VIP10");
    }

    #[test]
    fn test_duplicate_names_reported_once() {
        let rules = [complete("A"), complete("A"), complete("A"), complete("B")];
        assert_eq!(validate_rules(&rules).errors(), ["Rule name 'A' is duplicated"]);
    }

    #[test]
    fn test_context_and_rules_errors_accumulate_in_order() {
        let errors = validate(None, &[complete("A"), RuleDraft::new().name("B")]).errors().to_vec();
        assert_eq!(
            errors,
            [
                "OrderContext is required",
                "Rule 'B' must have a group",
                "Rule 'B' must have an eligibility predicate",
                "Rule 'B' must have a calculation function",
            ]
        );
    }
}
