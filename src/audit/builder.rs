//! Builder API for protocol rules.

use crate::audit::context::OperationContext;
use crate::audit::rules::{ProtocolCheck, ProtocolRules};
use crate::audit::violations::{ProtocolViolation, ViolationStrategy};
use crate::core::Guard;
use crate::model::ParcelStatus;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Builder for [`ProtocolRules`]. Starts with every check disabled.
pub struct RulesBuilder {
    attempt_requires_scan: bool,
    proof_requires_success: bool,
    terminal_lock: bool,
    weight_non_negative: bool,
    required_checks: Vec<ProtocolCheck>,
    on_violation: ViolationStrategy,
}

impl RulesBuilder {
    pub fn new() -> Self {
        Self {
            attempt_requires_scan: false,
            proof_requires_success: false,
            terminal_lock: false,
            weight_non_negative: false,
            required_checks: Vec::new(),
            on_violation: ViolationStrategy::Reject,
        }
    }

    /// Flag delivery attempts on parcels that were never scanned
    pub fn scan_before_attempt(mut self) -> Self {
        self.attempt_requires_scan = true;
        self
    }

    /// Flag proof unless the latest delivery attempt succeeded
    pub fn success_before_proof(mut self) -> Self {
        self.proof_requires_success = true;
        self
    }

    /// Flag any operation on a `DELIVERED` or `RETURNED` parcel
    pub fn terminal_states_locked(mut self) -> Self {
        self.terminal_lock = true;
        self
    }

    /// Flag negative or NaN weights
    pub fn non_negative_weight(mut self) -> Self {
        self.weight_non_negative = true;
        self
    }

    /// Add a custom validation check
    pub fn require<F>(mut self, check: F) -> Self
    where
        F: Fn(&OperationContext<'_>) -> Validation<(), NonEmptyVec<ProtocolViolation>>
            + Send
            + Sync
            + 'static,
    {
        self.required_checks.push(Box::new(check));
        self
    }

    /// Add a simple predicate check with error message
    pub fn require_pred<F>(mut self, predicate: F, error_msg: String) -> Self
    where
        F: Fn(&OperationContext<'_>) -> bool + Send + Sync + 'static,
    {
        let check = move |ctx: &OperationContext<'_>| {
            if predicate(ctx) {
                Validation::success(())
            } else {
                Validation::fail(ProtocolViolation::CustomCheckFailed {
                    message: error_msg.clone(),
                })
            }
        };
        self.required_checks.push(Box::new(check));
        self
    }

    /// Require the parcel's current status to pass `guard`
    pub fn require_status(self, guard: Guard<ParcelStatus>, error_msg: String) -> Self {
        self.require_pred(move |ctx| guard.check(&ctx.parcel.status()), error_msg)
    }

    /// Set violation handling strategy
    pub fn on_violation(mut self, strategy: ViolationStrategy) -> Self {
        self.on_violation = strategy;
        self
    }

    pub fn build(self) -> ProtocolRules {
        ProtocolRules {
            attempt_requires_scan: self.attempt_requires_scan,
            proof_requires_success: self.proof_requires_success,
            terminal_lock: self.terminal_lock,
            weight_non_negative: self.weight_non_negative,
            required_checks: self.required_checks,
            on_violation: self.on_violation,
        }
    }
}

impl Default for RulesBuilder {
    fn default() -> Self {
        Self::new()
    }
}
