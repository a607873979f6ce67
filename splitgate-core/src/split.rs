use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;

/// How a split rule's amount is interpreted: percentage points that
/// must sum to 100 across the plan, or a flat value in cents that must
/// sum to the payable total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitMode {
    #[default]
    Percentage,
    Flat,
}

impl SplitMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SplitMode::Percentage => "percentage",
            SplitMode::Flat => "flat",
        }
    }
}

impl fmt::Display for SplitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recipient's share of a payment.
///
/// `amount` and `liable` arrive from the caller and may be absent;
/// validation rejects a plan before any payload is built from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitRule {
    pub recipient_id: String,
    pub amount: Option<i32>,
    #[serde(rename = "type", default)]
    pub mode: SplitMode,
    pub liable: Option<bool>,
}

/// Fee-liability flags derived for a split recipient.
///
/// The liable recipient absorbs both the processing fee and the
/// remainder fee; everyone else pays neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RecipientFeeFlags {
    pub charge_processing_fee: bool,
    pub charge_remainder_fee: bool,
}

impl RecipientFeeFlags {
    pub fn derive(rule: &SplitRule) -> Self {
        let liable = rule.liable.unwrap_or(false);
        Self {
            charge_processing_fee: liable,
            charge_remainder_fee: liable,
        }
    }
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum SplitError {
    #[error("split recipient id must start with 'rp_' or 're_', got '{0}'")]
    InvalidRecipientId(String),

    #[error("split rule for '{0}' is missing an amount")]
    MissingAmount(String),

    #[error("split rule for '{0}' is missing the liable flag")]
    MissingLiableFlag(String),

    #[error("split amount {amount} for '{recipient_id}' is out of range for {mode} mode")]
    AmountOutOfRange {
        recipient_id: String,
        amount: i32,
        mode: SplitMode,
    },

    #[error("split amounts must sum to {expected}, got {actual}")]
    SumMismatch { expected: i32, actual: i32 },
}

/// An ordered list of split rules. Order is preserved so payloads are
/// deterministic; it carries no other meaning.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SplitPlan(pub Vec<SplitRule>);

impl SplitPlan {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn rules(&self) -> &[SplitRule] {
        &self.0
    }

    /// The plan's canonical mode is the first rule's mode. Empty plans
    /// default to percentage; they are trivially valid anyway.
    pub fn canonical_mode(&self) -> SplitMode {
        self.0.first().map(|r| r.mode).unwrap_or_default()
    }

    /// Validate the plan against the amount it will divide.
    ///
    /// Stops at the first violated rule. An empty plan is valid: the
    /// split is optional. Each rule's amount is range-checked against
    /// its own mode; the aggregate sum is checked against the
    /// canonical (first rule's) mode: percentage plans must sum to
    /// exactly 100, flat plans to `total_amount`.
    pub fn validate(&self, total_amount: i32) -> Result<(), SplitError> {
        if self.0.is_empty() {
            return Ok(());
        }

        for rule in &self.0 {
            let id = rule.recipient_id.trim();
            if id.is_empty() || !(id.starts_with("rp_") || id.starts_with("re_")) {
                return Err(SplitError::InvalidRecipientId(rule.recipient_id.clone()));
            }

            let amount = rule
                .amount
                .ok_or_else(|| SplitError::MissingAmount(rule.recipient_id.clone()))?;

            if rule.liable.is_none() {
                return Err(SplitError::MissingLiableFlag(rule.recipient_id.clone()));
            }

            let in_range = match rule.mode {
                SplitMode::Percentage => (1..=100).contains(&amount),
                SplitMode::Flat => amount > 0,
            };
            if !in_range {
                return Err(SplitError::AmountOutOfRange {
                    recipient_id: rule.recipient_id.clone(),
                    amount,
                    mode: rule.mode,
                });
            }
        }

        let actual: i32 = self.0.iter().filter_map(|r| r.amount).sum();
        let expected = match self.canonical_mode() {
            SplitMode::Percentage => 100,
            SplitMode::Flat => total_amount,
        };
        if actual != expected {
            return Err(SplitError::SumMismatch { expected, actual });
        }

        Ok(())
    }

    /// Provider wire shape for the plan's rules. Must only be called
    /// on a validated plan. `mode_override` pins every rule to one
    /// mode (the legacy checkout surface always sends percentage).
    pub fn to_wire(&self, mode_override: Option<SplitMode>) -> Vec<Value> {
        self.0
            .iter()
            .map(|rule| {
                let flags = RecipientFeeFlags::derive(rule);
                json!({
                    "amount": rule.amount,
                    "type": mode_override.unwrap_or(rule.mode).as_str(),
                    "recipient_id": rule.recipient_id,
                    "options": {
                        "liable": rule.liable.unwrap_or(false),
                        "charge_processing_fee": flags.charge_processing_fee,
                        "charge_remainder_fee": flags.charge_remainder_fee,
                    },
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(recipient_id: &str, amount: i32, mode: SplitMode, liable: bool) -> SplitRule {
        SplitRule {
            recipient_id: recipient_id.to_string(),
            amount: Some(amount),
            mode,
            liable: Some(liable),
        }
    }

    #[test]
    fn empty_plan_is_valid() {
        assert_eq!(SplitPlan::default().validate(10000), Ok(()));
    }

    #[test]
    fn percentage_plan_summing_to_100_passes() {
        let plan = SplitPlan(vec![
            rule("rp_1", 90, SplitMode::Percentage, true),
            rule("rp_2", 10, SplitMode::Percentage, false),
        ]);
        assert_eq!(plan.validate(10000), Ok(()));
    }

    #[test]
    fn percentage_plan_summing_to_95_fails() {
        let plan = SplitPlan(vec![
            rule("rp_1", 90, SplitMode::Percentage, true),
            rule("rp_2", 5, SplitMode::Percentage, false),
        ]);
        assert_eq!(
            plan.validate(10000),
            Err(SplitError::SumMismatch {
                expected: 100,
                actual: 95
            })
        );
    }

    #[test]
    fn flat_plan_is_checked_against_the_total() {
        let plan = SplitPlan(vec![
            rule("rp_1", 3000, SplitMode::Flat, true),
            rule("re_2", 7000, SplitMode::Flat, false),
        ]);
        assert_eq!(plan.validate(10000), Ok(()));
        assert_eq!(
            plan.validate(9000),
            Err(SplitError::SumMismatch {
                expected: 9000,
                actual: 10000
            })
        );
    }

    #[test]
    fn bad_recipient_prefix_is_rejected() {
        let plan = SplitPlan(vec![rule("acct_1", 100, SplitMode::Percentage, true)]);
        assert_eq!(
            plan.validate(10000),
            Err(SplitError::InvalidRecipientId("acct_1".to_string()))
        );
    }

    #[test]
    fn missing_amount_and_liable_are_rejected_in_order() {
        let plan = SplitPlan(vec![SplitRule {
            recipient_id: "rp_1".to_string(),
            amount: None,
            mode: SplitMode::Percentage,
            liable: Some(true),
        }]);
        assert_eq!(
            plan.validate(10000),
            Err(SplitError::MissingAmount("rp_1".to_string()))
        );

        let plan = SplitPlan(vec![SplitRule {
            recipient_id: "rp_1".to_string(),
            amount: Some(100),
            mode: SplitMode::Percentage,
            liable: None,
        }]);
        assert_eq!(
            plan.validate(10000),
            Err(SplitError::MissingLiableFlag("rp_1".to_string()))
        );
    }

    #[test]
    fn percentage_amount_over_100_is_out_of_range() {
        let plan = SplitPlan(vec![rule("rp_1", 120, SplitMode::Percentage, true)]);
        assert_eq!(
            plan.validate(10000),
            Err(SplitError::AmountOutOfRange {
                recipient_id: "rp_1".to_string(),
                amount: 120,
                mode: SplitMode::Percentage,
            })
        );
    }

    #[test]
    fn fee_flags_mirror_the_liable_flag() {
        let liable = rule("rp_1", 90, SplitMode::Percentage, true);
        let passive = rule("rp_2", 10, SplitMode::Percentage, false);

        let flags = RecipientFeeFlags::derive(&liable);
        assert!(flags.charge_processing_fee);
        assert!(flags.charge_remainder_fee);

        let flags = RecipientFeeFlags::derive(&passive);
        assert!(!flags.charge_processing_fee);
        assert!(!flags.charge_remainder_fee);
    }

    #[test]
    fn wire_shape_carries_options_and_type() {
        let plan = SplitPlan(vec![rule("rp_1", 100, SplitMode::Percentage, true)]);
        let wire = plan.to_wire(None);
        assert_eq!(wire.len(), 1);
        assert_eq!(wire[0]["recipient_id"], "rp_1");
        assert_eq!(wire[0]["type"], "percentage");
        assert_eq!(wire[0]["options"]["liable"], true);
        assert_eq!(wire[0]["options"]["charge_processing_fee"], true);

        let flat = SplitPlan(vec![rule("rp_1", 100, SplitMode::Flat, false)]);
        let wire = flat.to_wire(Some(SplitMode::Percentage));
        assert_eq!(wire[0]["type"], "percentage");
    }
}
