//! Bounded retry budget for auth-class failures
//!
//! A logical call gets the original attempt plus at most one retry after a
//! successful re-login. The budget is a plain state machine fed with
//! classified send outcomes, so the contract is testable without a backend.

use serde_json::Value;

/// Original attempt plus exactly one retry after re-login.
pub(crate) const MAX_ATTEMPTS: u32 = 2;

/// Classified result of one send attempt.
pub(crate) enum SendOutcome {
    /// 200 with a (possibly degraded) JSON body
    Success(Value),
    /// Auth-class status: 401, 403, 418, 502
    AuthFault(u16),
    /// Network error or any other status
    Soft,
}

/// What the transport must do after feeding one outcome into the budget.
pub(crate) enum RetryStep {
    /// Hand the body to the caller
    Deliver(Value),
    /// Soft failure, no data this call
    GiveUp,
    /// Re-login, then send again
    Reauthenticate(u16),
    /// Auth fault with no attempts left; the session is unusable
    Fatal(u16),
}

pub(crate) struct RetryBudget {
    attempts_left: u32,
}

impl RetryBudget {
    pub(crate) fn new(max_attempts: u32) -> Self {
        Self {
            attempts_left: max_attempts,
        }
    }

    /// Consume one attempt and decide the next step
    pub(crate) fn next(&mut self, outcome: SendOutcome) -> RetryStep {
        self.attempts_left = self.attempts_left.saturating_sub(1);
        match outcome {
            SendOutcome::Success(value) => RetryStep::Deliver(value),
            SendOutcome::Soft => RetryStep::GiveUp,
            SendOutcome::AuthFault(status) if self.attempts_left == 0 => RetryStep::Fatal(status),
            SendOutcome::AuthFault(status) => RetryStep::Reauthenticate(status),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn first_attempt_success_delivers_the_body() {
        let mut budget = RetryBudget::new(MAX_ATTEMPTS);
        let step = budget.next(SendOutcome::Success(json!({"result": true})));
        assert!(matches!(step, RetryStep::Deliver(_)));
    }

    #[test]
    fn soft_failure_gives_up_without_retrying() {
        let mut budget = RetryBudget::new(MAX_ATTEMPTS);
        assert!(matches!(budget.next(SendOutcome::Soft), RetryStep::GiveUp));
    }

    #[test]
    fn auth_fault_gets_exactly_one_relogin() {
        let mut budget = RetryBudget::new(MAX_ATTEMPTS);
        assert!(matches!(
            budget.next(SendOutcome::AuthFault(401)),
            RetryStep::Reauthenticate(401)
        ));
        // The same fault after the re-login exhausts the budget
        assert!(matches!(
            budget.next(SendOutcome::AuthFault(401)),
            RetryStep::Fatal(401)
        ));
    }

    #[test]
    fn relogin_cures_a_transient_auth_fault() {
        let mut budget = RetryBudget::new(MAX_ATTEMPTS);
        assert!(matches!(
            budget.next(SendOutcome::AuthFault(502)),
            RetryStep::Reauthenticate(502)
        ));
        assert!(matches!(
            budget.next(SendOutcome::Success(json!({}))),
            RetryStep::Deliver(_)
        ));
    }

    #[test]
    fn soft_failure_on_the_retry_still_gives_up() {
        let mut budget = RetryBudget::new(MAX_ATTEMPTS);
        assert!(matches!(
            budget.next(SendOutcome::AuthFault(403)),
            RetryStep::Reauthenticate(403)
        ));
        assert!(matches!(budget.next(SendOutcome::Soft), RetryStep::GiveUp));
    }
}
