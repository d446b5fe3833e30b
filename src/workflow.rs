use crate::models::UsageStatus;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageAction {
    Approve,
    Reject,
    Issue,
}

impl UsageAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::Issue => "issue",
        }
    }
}

/// The transition table the backend enforces. Screens consult this to decide
/// which action buttons to render; issued and rejected are terminal.
pub fn available_actions(status: UsageStatus) -> &'static [UsageAction] {
    match status {
        UsageStatus::Pending => &[UsageAction::Approve, UsageAction::Reject],
        UsageStatus::Approved => &[UsageAction::Issue],
        UsageStatus::Rejected | UsageStatus::Issued => &[],
    }
}

pub fn transition(status: UsageStatus, action: UsageAction) -> Option<UsageStatus> {
    match (status, action) {
        (UsageStatus::Pending, UsageAction::Approve) => Some(UsageStatus::Approved),
        (UsageStatus::Pending, UsageAction::Reject) => Some(UsageStatus::Rejected),
        (UsageStatus::Approved, UsageAction::Issue) => Some(UsageStatus::Issued),
        _ => None,
    }
}
