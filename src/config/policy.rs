//! Order status transition policy.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::database::schema::types::OrderStatus;

/// Controls whether order status updates must follow the lifecycle graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionPolicy {
    /// Only edges of the order lifecycle are accepted.
    #[default]
    Strict,
    /// Any update target is accepted from any current status.
    Permissive,
}

impl TransitionPolicy {
    /// Whether moving an order from `from` to `to` is acceptable under this policy.
    ///
    /// Re-applying the current status is always acceptable; it results in no change.
    pub fn permits(&self, from: OrderStatus, to: OrderStatus) -> bool {
        if from == to {
            return true;
        }
        match self {
            TransitionPolicy::Permissive => to.is_update_target(),
            TransitionPolicy::Strict => from.next_statuses().contains(&to),
        }
    }
}

impl FromStr for TransitionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(TransitionPolicy::Strict),
            "permissive" => Ok(TransitionPolicy::Permissive),
            other => Err(format!(
                "unknown transition policy '{}', expected 'strict' or 'permissive'",
                other
            )),
        }
    }
}

impl fmt::Display for TransitionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransitionPolicy::Strict => write!(f, "strict"),
            TransitionPolicy::Permissive => write!(f, "permissive"),
        }
    }
}
