//! Protocol rules, checked with `Validation` so every violation is reported.

use crate::audit::context::OperationContext;
use crate::audit::violations::{ProtocolViolation, ViolationStrategy};
use crate::core::State;
use crate::model::LifecycleEvent;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use tracing::warn;

/// Type alias for custom check functions
pub type ProtocolCheck = Box<
    dyn Fn(&OperationContext<'_>) -> Validation<(), NonEmptyVec<ProtocolViolation>> + Send + Sync,
>;

/// Set of checks a caller runs before applying an operation to a parcel.
///
/// Parcels never consult these rules themselves.
pub struct ProtocolRules {
    pub(crate) attempt_requires_scan: bool,
    pub(crate) proof_requires_success: bool,
    pub(crate) terminal_lock: bool,
    pub(crate) weight_non_negative: bool,
    pub(crate) required_checks: Vec<ProtocolCheck>,
    pub(crate) on_violation: ViolationStrategy,
}

impl ProtocolRules {
    /// Scan before attempt, success before proof, non-negative weight;
    /// violations are rejected.
    pub fn recommended() -> Self {
        super::RulesBuilder::new()
            .scan_before_attempt()
            .success_before_proof()
            .non_negative_weight()
            .build()
    }

    /// Run every enabled check, accumulating ALL violations.
    pub fn enforce(
        &self,
        context: &OperationContext<'_>,
    ) -> Validation<(), NonEmptyVec<ProtocolViolation>> {
        let parcel = context.parcel;
        let mut checks: Vec<Validation<(), NonEmptyVec<ProtocolViolation>>> = Vec::new();

        if self.terminal_lock && parcel.status().is_final() {
            checks.push(Validation::fail(ProtocolViolation::TerminalStatus {
                parcel: parcel.id().clone(),
                status: parcel.status(),
                operation: context.event.cause(),
            }));
        }

        let weight = parcel.weight_kg();
        if self.weight_non_negative && (weight < 0.0 || weight.is_nan()) {
            checks.push(Validation::fail(ProtocolViolation::InvalidWeight {
                parcel: parcel.id().clone(),
                weight_kg: weight,
            }));
        }

        match context.event {
            LifecycleEvent::DeliveryAttempt { .. }
                if self.attempt_requires_scan && parcel.scans().is_empty() =>
            {
                checks.push(Validation::fail(ProtocolViolation::AttemptWithoutScan {
                    parcel: parcel.id().clone(),
                }));
            }
            LifecycleEvent::ProofAttached if self.proof_requires_success => {
                let succeeded = parcel.latest_attempt().is_some_and(|a| a.is_success());
                if !succeeded {
                    checks.push(Validation::fail(
                        ProtocolViolation::ProofWithoutSuccessfulAttempt {
                            parcel: parcel.id().clone(),
                        },
                    ));
                }
            }
            _ => {}
        }

        for check_fn in &self.required_checks {
            checks.push(check_fn(context));
        }

        Validation::all_vec(checks).map(|_| ())
    }

    /// Enforce, then apply the violation strategy.
    ///
    /// With `LogAndProceed` this always returns `Ok(())`.
    pub fn admit(&self, context: &OperationContext<'_>) -> Result<(), NonEmptyVec<ProtocolViolation>> {
        match self.enforce(context) {
            Validation::Success(_) => Ok(()),
            Validation::Failure(errors) => match self.on_violation {
                ViolationStrategy::Reject => Err(errors),
                ViolationStrategy::LogAndProceed => {
                    for violation in errors.iter() {
                        warn!(parcel = %context.parcel.id(), %violation, "protocol violation admitted");
                    }
                    Ok(())
                }
            },
        }
    }

    pub fn violation_strategy(&self) -> ViolationStrategy {
        self.on_violation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::builder::RulesBuilder;
    use crate::clock::ManualClock;
    use crate::core::Guard;
    use crate::model::{Customer, Hub, Parcel, ParcelStatus};
    use chrono::{TimeZone, Utc};
    use std::rc::Rc;

    fn parcel(weight_kg: f64) -> Parcel {
        Parcel::new(
            "P001",
            Rc::new(Customer::new("C001", "Alice", "12 Park Street")),
            Rc::new(Customer::new("C002", "Bob", "45 Lake Road")),
            weight_kg,
            Rc::new(ManualClock::new(
                Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            )),
        )
    }

    fn hub() -> Rc<Hub> {
        Rc::new(Hub::new("H001", "Chennai Hub"))
    }

    #[test]
    fn enforcement_accumulates_all_violations() {
        let rules = RulesBuilder::new()
            .scan_before_attempt()
            .non_negative_weight()
            .require_pred(|_ctx| false, "Custom check always fails".to_string())
            .build();

        let p = parcel(-1.0);
        let ctx = OperationContext::new(&p, LifecycleEvent::DeliveryAttempt { success: true });

        match rules.enforce(&ctx) {
            Validation::Failure(errors) => {
                assert_eq!(errors.len(), 3);

                assert!(errors
                    .iter()
                    .any(|e| matches!(e, ProtocolViolation::AttemptWithoutScan { .. })));
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, ProtocolViolation::InvalidWeight { .. })));
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, ProtocolViolation::CustomCheckFailed { .. })));
            }
            Validation::Success(_) => panic!("Expected failures, got success"),
        }
    }

    #[test]
    fn recommended_rules_accept_the_normal_flow() {
        let rules = ProtocolRules::recommended();
        let mut p = parcel(1.2);

        let scan = LifecycleEvent::Scan;
        assert!(rules.admit(&OperationContext::new(&p, scan)).is_ok());
        p.record_scan(hub(), Some("Arrived"));

        let attempt = LifecycleEvent::DeliveryAttempt { success: true };
        assert!(rules.admit(&OperationContext::new(&p, attempt)).is_ok());
        p.record_delivery_attempt(true, None, None);

        let proof = LifecycleEvent::ProofAttached;
        assert!(rules.admit(&OperationContext::new(&p, proof)).is_ok());
    }

    #[test]
    fn proof_after_failed_attempt_is_flagged() {
        let rules = ProtocolRules::recommended();
        let mut p = parcel(1.2);
        p.record_scan(hub(), None);
        p.record_delivery_attempt(true, None, None);
        p.record_delivery_attempt(false, Some("No one home"), None);

        let result = rules.enforce(&OperationContext::new(&p, LifecycleEvent::ProofAttached));
        assert!(result.is_failure());
        if let Validation::Failure(errors) = result {
            assert!(errors
                .iter()
                .any(|e| matches!(e, ProtocolViolation::ProofWithoutSuccessfulAttempt { .. })));
        }
    }

    #[test]
    fn proof_without_any_attempt_is_flagged() {
        let rules = ProtocolRules::recommended();
        let p = parcel(1.2);

        let result = rules.admit(&OperationContext::new(&p, LifecycleEvent::ProofAttached));
        assert!(result.is_err());
    }

    #[test]
    fn terminal_lock_refuses_everything_after_delivery() {
        let rules = RulesBuilder::new().terminal_states_locked().build();
        let mut p = parcel(1.2);

        assert!(rules
            .enforce(&OperationContext::new(&p, LifecycleEvent::Returned))
            .is_success());

        p.record_delivery_attempt(true, None, None);

        for event in [
            LifecycleEvent::Scan,
            LifecycleEvent::DeliveryAttempt { success: false },
            LifecycleEvent::ProofAttached,
            LifecycleEvent::Returned,
        ] {
            let result = rules.enforce(&OperationContext::new(&p, event));
            assert!(result.is_failure(), "{event:?} should be refused");
        }
    }

    #[test]
    fn nan_weight_is_invalid() {
        let rules = RulesBuilder::new().non_negative_weight().build();
        let p = parcel(f64::NAN);

        assert!(rules
            .enforce(&OperationContext::new(&p, LifecycleEvent::Scan))
            .is_failure());
    }

    #[test]
    fn status_guard_check_works() {
        let rules = RulesBuilder::new()
            .require_status(
                Guard::new(|s: &ParcelStatus| *s != ParcelStatus::Returned),
                "returned parcels stay put".to_string(),
            )
            .build();
        let mut p = parcel(1.2);

        assert!(rules
            .enforce(&OperationContext::new(&p, LifecycleEvent::Scan))
            .is_success());

        p.mark_returned(None);
        assert!(rules
            .enforce(&OperationContext::new(&p, LifecycleEvent::Scan))
            .is_failure());
    }

    #[test]
    fn custom_check_sees_projected_status() {
        let rules = RulesBuilder::new()
            .require(|ctx: &OperationContext<'_>| {
                if ctx.projected_status() != ParcelStatus::DeliveryFailed {
                    Validation::success(())
                } else {
                    Validation::fail(ProtocolViolation::CustomCheckFailed {
                        message: "failed attempts need a supervisor".to_string(),
                    })
                }
            })
            .build();
        let p = parcel(1.2);

        let ok = LifecycleEvent::DeliveryAttempt { success: true };
        let failed = LifecycleEvent::DeliveryAttempt { success: false };
        assert!(rules.enforce(&OperationContext::new(&p, ok)).is_success());
        assert!(rules.enforce(&OperationContext::new(&p, failed)).is_failure());
    }

    #[test]
    fn log_and_proceed_admits_violations() {
        let rules = RulesBuilder::new()
            .success_before_proof()
            .on_violation(ViolationStrategy::LogAndProceed)
            .build();
        let p = parcel(1.2);

        assert_eq!(rules.violation_strategy(), ViolationStrategy::LogAndProceed);
        assert!(rules
            .admit(&OperationContext::new(&p, LifecycleEvent::ProofAttached))
            .is_ok());
    }

    #[test]
    fn empty_rules_admit_anything() {
        let rules = RulesBuilder::new().build();
        let p = parcel(-5.0);

        for event in [
            LifecycleEvent::Scan,
            LifecycleEvent::DeliveryAttempt { success: true },
            LifecycleEvent::ProofAttached,
            LifecycleEvent::Returned,
        ] {
            assert!(rules.admit(&OperationContext::new(&p, event)).is_ok());
        }
    }
}
