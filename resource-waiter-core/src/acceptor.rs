//! Classification of describe results into waiter states.
//!
//! An [`Acceptors`] set holds the predicates for one kind of resource. Success
//! matchers are always evaluated before failure matchers, for responses and for
//! errors alike.

use serde::Serialize;
use std::fmt;

/// Classification of a single poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum WaiterState {
    Success,
    Failure,
    Retry,
}

impl fmt::Display for WaiterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "SUCCESS"),
            Self::Failure => write!(f, "FAILURE"),
            Self::Retry => write!(f, "RETRY"),
        }
    }
}

/// What a poll observed: the describe response or the error it returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reason<R, E> {
    Response(R),
    Error(E),
}

impl<R, E> Reason<R, E> {
    pub fn response(&self) -> Option<&R> {
        match self {
            Self::Response(r) => Some(r),
            Self::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&E> {
        match self {
            Self::Response(_) => None,
            Self::Error(e) => Some(e),
        }
    }

    pub fn into_response(self) -> Option<R> {
        match self {
            Self::Response(r) => Some(r),
            Self::Error(_) => None,
        }
    }
}

impl<R, E> From<Result<R, E>> for Reason<R, E> {
    fn from(result: Result<R, E>) -> Self {
        match result {
            Ok(r) => Self::Response(r),
            Err(e) => Self::Error(e),
        }
    }
}

/// A classified poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollResult<R, E> {
    pub state: WaiterState,
    pub reason: Reason<R, E>,
}

/// What to do with an error no matcher recognises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnmatchedErrors {
    /// Assume the error is transient and poll again.
    #[default]
    Retry,
    /// Stop waiting and surface the error as unexpected.
    Fail,
}

type ResponseMatcher<R> = Box<dyn Fn(&R) -> bool + Send + Sync>;
type ErrorMatcher<E> = Box<dyn Fn(&E) -> bool + Send + Sync>;
type ResponseSummary<R> = Box<dyn Fn(&R) -> String + Send + Sync>;

/// Result of [`Acceptors::classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Matched(WaiterState),
    /// An error that no matcher recognised and the policy is [`UnmatchedErrors::Fail`].
    Unexpected,
}

/// Predicates that decide when a waiter stops.
pub struct Acceptors<R, E> {
    success: Vec<ResponseMatcher<R>>,
    failure: Vec<ResponseMatcher<R>>,
    error_success: Vec<ErrorMatcher<E>>,
    error_failure: Vec<ErrorMatcher<E>>,
    unmatched_errors: UnmatchedErrors,
    summarize: Option<ResponseSummary<R>>,
}

impl<R, E> Default for Acceptors<R, E> {
    fn default() -> Self {
        Self {
            success: Vec::new(),
            failure: Vec::new(),
            error_success: Vec::new(),
            error_failure: Vec::new(),
            unmatched_errors: UnmatchedErrors::default(),
            summarize: None,
        }
    }
}

impl<R, E> fmt::Debug for Acceptors<R, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Acceptors")
            .field("success", &self.success.len())
            .field("failure", &self.failure.len())
            .field("error_success", &self.error_success.len())
            .field("error_failure", &self.error_failure.len())
            .field("unmatched_errors", &self.unmatched_errors)
            .finish_non_exhaustive()
    }
}

impl<R, E> Acceptors<R, E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop with success when `matcher` holds for a response.
    #[must_use]
    pub fn success_when(mut self, matcher: impl Fn(&R) -> bool + Send + Sync + 'static) -> Self {
        self.success.push(Box::new(matcher));
        self
    }

    /// Stop with failure when `matcher` holds for a response.
    #[must_use]
    pub fn failure_when(mut self, matcher: impl Fn(&R) -> bool + Send + Sync + 'static) -> Self {
        self.failure.push(Box::new(matcher));
        self
    }

    /// Stop with success when the describe call fails with a matching error,
    /// e.g. "not found" while waiting for a deletion.
    #[must_use]
    pub fn success_on_error(
        mut self,
        matcher: impl Fn(&E) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.error_success.push(Box::new(matcher));
        self
    }

    /// Treat a matching error as non-retryable.
    #[must_use]
    pub fn failure_on_error(
        mut self,
        matcher: impl Fn(&E) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.error_failure.push(Box::new(matcher));
        self
    }

    #[must_use]
    pub fn unmatched_errors(mut self, policy: UnmatchedErrors) -> Self {
        self.unmatched_errors = policy;
        self
    }

    /// Short text used to tally responses in [`ObservedResponses`](crate::ObservedResponses).
    #[must_use]
    pub fn summarize_with(mut self, summarize: impl Fn(&R) -> String + Send + Sync + 'static) -> Self {
        self.summarize = Some(Box::new(summarize));
        self
    }

    pub fn classify(&self, result: &Result<R, E>) -> Classification {
        match result {
            Ok(response) => {
                if self.success.iter().any(|m| m(response)) {
                    Classification::Matched(WaiterState::Success)
                } else if self.failure.iter().any(|m| m(response)) {
                    Classification::Matched(WaiterState::Failure)
                } else {
                    Classification::Matched(WaiterState::Retry)
                }
            }
            Err(error) => {
                if self.error_success.iter().any(|m| m(error)) {
                    Classification::Matched(WaiterState::Success)
                } else if self.error_failure.iter().any(|m| m(error)) {
                    Classification::Matched(WaiterState::Failure)
                } else {
                    match self.unmatched_errors {
                        UnmatchedErrors::Retry => Classification::Matched(WaiterState::Retry),
                        UnmatchedErrors::Fail => Classification::Unexpected,
                    }
                }
            }
        }
    }

    pub(crate) fn summarize(&self, result: &Result<R, E>) -> String
    where
        E: fmt::Display,
    {
        match result {
            Ok(response) => self
                .summarize
                .as_ref()
                .map_or_else(|| "response received".to_string(), |s| s(response)),
            Err(error) => error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Described {
        status: &'static str,
    }

    fn endpoint_acceptors() -> Acceptors<Described, String> {
        Acceptors::new()
            .success_when(|r: &Described| r.status == "InService")
            .failure_when(|r: &Described| r.status == "Failed")
            .failure_on_error(|e: &String| e == "ValidationException")
    }

    #[test]
    fn test_response_classification() {
        let acceptors = endpoint_acceptors();
        assert_eq!(
            acceptors.classify(&Ok(Described { status: "InService" })),
            Classification::Matched(WaiterState::Success)
        );
        assert_eq!(
            acceptors.classify(&Ok(Described { status: "Failed" })),
            Classification::Matched(WaiterState::Failure)
        );
        assert_eq!(
            acceptors.classify(&Ok(Described { status: "Creating" })),
            Classification::Matched(WaiterState::Retry)
        );
    }

    #[test]
    fn test_success_checked_before_failure() {
        let acceptors = Acceptors::<Described, String>::new()
            .failure_when(|_| true)
            .success_when(|_| true);
        assert_eq!(
            acceptors.classify(&Ok(Described { status: "Anything" })),
            Classification::Matched(WaiterState::Success)
        );
    }

    #[test]
    fn test_error_classification() {
        let acceptors = endpoint_acceptors();
        assert_eq!(
            acceptors.classify(&Err("ValidationException".to_string())),
            Classification::Matched(WaiterState::Failure)
        );
        assert_eq!(
            acceptors.classify(&Err("ThrottlingException".to_string())),
            Classification::Matched(WaiterState::Retry)
        );

        let strict = endpoint_acceptors().unmatched_errors(UnmatchedErrors::Fail);
        assert_eq!(
            strict.classify(&Err("ThrottlingException".to_string())),
            Classification::Unexpected
        );
    }

    #[test]
    fn test_error_success_for_deletion() {
        let acceptors = Acceptors::<Described, String>::new()
            .failure_when(|r| r.status == "Failed")
            .success_on_error(|e| e == "ValidationException");
        assert_eq!(
            acceptors.classify(&Err("ValidationException".to_string())),
            Classification::Matched(WaiterState::Success)
        );
        assert_eq!(
            acceptors.classify(&Ok(Described { status: "Deleting" })),
            Classification::Matched(WaiterState::Retry)
        );
    }

    #[test]
    fn test_summaries() {
        let acceptors = endpoint_acceptors().summarize_with(|r| format!("status={}", r.status));
        assert_eq!(
            acceptors.summarize(&Ok(Described { status: "Creating" })),
            "status=Creating"
        );
        assert_eq!(
            acceptors.summarize(&Err("boom".to_string())),
            "boom"
        );
        assert_eq!(
            Acceptors::<Described, String>::new().summarize(&Ok(Described { status: "x" })),
            "response received"
        );
    }

    #[test]
    fn test_reason_accessors() {
        let reason: Reason<u8, String> = Ok(7).into();
        assert_eq!(reason.response(), Some(&7));
        assert!(reason.error().is_none());
        let reason: Reason<u8, String> = Err("e".to_string()).into();
        assert_eq!(reason.error().map(String::as_str), Some("e"));
        assert_eq!(reason.into_response(), None);
    }
}
