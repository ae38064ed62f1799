//! Transaction-style operation surface.
//!
//! An execution environment hands the registry an [`Invocation`] (who is
//! calling, and how much work a single call may do) together with an
//! [`Operation`]. [`Registry::submit`] either commits and returns an
//! [`Outcome`] or rejects with an [`Error`] and leaves state untouched.
//! [`Receipt`] is the serializable report of either result.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::registry::Registry;
use crate::revoker::Progress;
use crate::types::{Identity, Level, WorkBudget};

/// An operation submitted to the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
#[non_exhaustive]
pub enum Operation {
    /// One-time level configuration.
    Configure {
        /// New maximum level
        max_level: Level,
        /// New delegation threshold
        authorizer_level: Level,
    },
    /// Grant, change, or (with level 0) revoke a level.
    Authorize {
        /// Identity whose level changes
        target: Identity,
        /// Level to set
        level: Level,
    },
    /// Caller revokes its own grant.
    DeAuthorize,
    /// One bounded step of bulk revocation.
    DeAuthorizeAllStep,
    /// Read an identity's level.
    Authorized {
        /// Identity to look up
        identity: Identity,
    },
    /// Read whether the caller is authorized.
    AmIAuthorized,
    /// Read the slot snapshot.
    GetAuthorizedAddresses,
}

impl Operation {
    /// Stable name of the operation.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Configure { .. } => "configure",
            Operation::Authorize { .. } => "authorize",
            Operation::DeAuthorize => "de_authorize",
            Operation::DeAuthorizeAllStep => "de_authorize_all_step",
            Operation::Authorized { .. } => "authorized",
            Operation::AmIAuthorized => "am_i_authorized",
            Operation::GetAuthorizedAddresses => "get_authorized_addresses",
        }
    }

    /// Returns `true` if a committed result may have changed state.
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Operation::Configure { .. }
                | Operation::Authorize { .. }
                | Operation::DeAuthorize
                | Operation::DeAuthorizeAllStep
        )
    }
}

/// Context supplied by the execution environment with every submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Calling identity. Not spoofable through operation arguments.
    pub caller: Identity,
    /// Slots a bulk-revocation step may examine during this call.
    pub work_budget: WorkBudget,
}

impl Invocation {
    /// Creates an invocation with the default work budget.
    pub fn new(caller: impl Into<Identity>) -> Self {
        Self {
            caller: caller.into(),
            work_budget: WorkBudget::default(),
        }
    }

    /// Sets the work budget for this invocation.
    pub fn with_work_budget(mut self, work_budget: WorkBudget) -> Self {
        self.work_budget = work_budget;
        self
    }
}

/// Confirmation of a committed operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// Level bounds were set.
    Configured {
        /// Applied maximum level
        max_level: Level,
        /// Applied delegation threshold
        authorizer_level: Level,
    },
    /// A target's level was set.
    LevelSet {
        /// Identity whose level changed
        target: Identity,
        /// Level now held
        level: Level,
    },
    /// The caller's own grant was dropped.
    Revoked {
        /// Level held before the call
        previous: Level,
    },
    /// A bulk-revocation step ran.
    Step(Progress),
    /// A level was read.
    Level {
        /// Level held
        level: Level,
    },
    /// A boolean was read.
    Flag {
        /// The answer
        value: bool,
    },
    /// The slot snapshot was read.
    Slots {
        /// Slot layout, `null` for empty slots
        slots: Vec<Option<Identity>>,
    },
}

impl Registry {
    /// Dispatches `operation` on behalf of `invocation.caller`.
    pub fn submit(&mut self, invocation: &Invocation, operation: Operation) -> Result<Outcome> {
        let caller = &invocation.caller;
        match operation {
            Operation::Configure {
                max_level,
                authorizer_level,
            } => {
                self.configure(caller, max_level, authorizer_level)?;
                Ok(Outcome::Configured {
                    max_level,
                    authorizer_level,
                })
            }
            Operation::Authorize { target, level } => {
                self.authorize(caller, &target, level)?;
                Ok(Outcome::LevelSet { target, level })
            }
            Operation::DeAuthorize => Ok(Outcome::Revoked {
                previous: self.de_authorize(caller),
            }),
            Operation::DeAuthorizeAllStep => self
                .de_authorize_all_step(caller, invocation.work_budget)
                .map(Outcome::Step),
            Operation::Authorized { identity } => Ok(Outcome::Level {
                level: self.authorized(&identity),
            }),
            Operation::AmIAuthorized => Ok(Outcome::Flag {
                value: self.am_i_authorized(caller),
            }),
            Operation::GetAuthorizedAddresses => self
                .get_authorized_addresses(caller)
                .map(|slots| Outcome::Slots { slots }),
        }
    }
}

/// Whether a submission committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// State was updated (or read) successfully.
    Committed,
    /// The registry refused the operation; state is unchanged.
    Rejected,
    /// The environment failed around the operation.
    Failed,
}

/// Report of one submission, as returned to the submitter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    /// Calling identity
    pub caller: Identity,
    /// Operation name
    pub op: String,
    /// Commit status
    pub status: Status,
    /// Confirmation, when committed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
    /// Rejection reason code, when not committed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Human-readable error, when not committed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Receipt {
    /// Builds a receipt from the result of a submission.
    pub fn new(caller: &Identity, operation: &str, result: &Result<Outcome>) -> Self {
        match result {
            Ok(outcome) => Self {
                caller: caller.clone(),
                op: operation.to_string(),
                status: Status::Committed,
                outcome: Some(outcome.clone()),
                reason: None,
                message: None,
            },
            Err(err) => Self::failure(caller, operation, err),
        }
    }

    /// Builds a receipt for an error.
    pub fn failure(caller: &Identity, operation: &str, err: &Error) -> Self {
        Self {
            caller: caller.clone(),
            op: operation.to_string(),
            status: if err.is_rejection() {
                Status::Rejected
            } else {
                Status::Failed
            },
            outcome: None,
            reason: Some(err.reason().to_string()),
            message: Some(err.to_string()),
        }
    }

    /// Returns `true` if the submission committed.
    pub fn is_committed(&self) -> bool {
        self.status == Status::Committed
    }
}
