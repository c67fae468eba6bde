// Database enum types shared by the repositories and the HTTP layer.
// The SQL definitions live in migrations/.

pub mod types {
    use serde::{Deserialize, Serialize};
    use std::fmt;
    use std::str::FromStr;
    use utoipa::ToSchema;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
    #[sqlx(type_name = "user_role", rename_all = "lowercase")]
    #[serde(rename_all = "lowercase")]
    pub enum UserRole {
        User,
        Vendor,
        Admin,
    }

    impl UserRole {
        pub fn as_str(&self) -> &'static str {
            match self {
                UserRole::User => "user",
                UserRole::Vendor => "vendor",
                UserRole::Admin => "admin",
            }
        }

        /// Roles a client may pick for itself at registration.
        pub fn is_self_registrable(&self) -> bool {
            matches!(self, UserRole::User | UserRole::Vendor)
        }
    }

    impl FromStr for UserRole {
        type Err = String;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            match s {
                "user" => Ok(UserRole::User),
                "vendor" => Ok(UserRole::Vendor),
                "admin" => Ok(UserRole::Admin),
                _ => Err(format!("Invalid role: {}", s)),
            }
        }
    }

    impl fmt::Display for UserRole {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.as_str())
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
    #[sqlx(type_name = "order_status", rename_all = "snake_case")]
    #[serde(rename_all = "snake_case")]
    pub enum OrderStatus {
        Pending,
        Confirmed,
        InProgress,
        Completed,
        Cancelled,
    }

    impl OrderStatus {
        /// Statuses a vendor may request through a status update.
        /// `Pending` is initial-only.
        pub const UPDATE_TARGETS: [OrderStatus; 4] = [
            OrderStatus::Confirmed,
            OrderStatus::InProgress,
            OrderStatus::Completed,
            OrderStatus::Cancelled,
        ];

        pub fn as_str(&self) -> &'static str {
            match self {
                OrderStatus::Pending => "pending",
                OrderStatus::Confirmed => "confirmed",
                OrderStatus::InProgress => "in_progress",
                OrderStatus::Completed => "completed",
                OrderStatus::Cancelled => "cancelled",
            }
        }

        pub fn is_update_target(&self) -> bool {
            Self::UPDATE_TARGETS.contains(self)
        }

        /// Lifecycle edges out of this status.
        pub fn next_statuses(&self) -> &'static [OrderStatus] {
            match self {
                OrderStatus::Pending => &[OrderStatus::Confirmed, OrderStatus::Cancelled],
                OrderStatus::Confirmed => &[OrderStatus::InProgress, OrderStatus::Cancelled],
                OrderStatus::InProgress => &[OrderStatus::Completed, OrderStatus::Cancelled],
                OrderStatus::Completed | OrderStatus::Cancelled => &[],
            }
        }
    }

    impl FromStr for OrderStatus {
        type Err = String;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            match s {
                "pending" => Ok(OrderStatus::Pending),
                "confirmed" => Ok(OrderStatus::Confirmed),
                "in_progress" => Ok(OrderStatus::InProgress),
                "completed" => Ok(OrderStatus::Completed),
                "cancelled" => Ok(OrderStatus::Cancelled),
                _ => Err(format!("Invalid order status: {}", s)),
            }
        }
    }

    impl fmt::Display for OrderStatus {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.as_str())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_order_status_round_trips_through_str() {
            for status in [
                OrderStatus::Pending,
                OrderStatus::Confirmed,
                OrderStatus::InProgress,
                OrderStatus::Completed,
                OrderStatus::Cancelled,
            ] {
                assert_eq!(status.as_str().parse::<OrderStatus>(), Ok(status));
            }
        }

        #[test]
        fn test_pending_is_not_an_update_target() {
            assert!(!OrderStatus::Pending.is_update_target());
            assert!(OrderStatus::InProgress.is_update_target());
        }

        #[test]
        fn test_terminal_statuses_have_no_edges() {
            assert!(OrderStatus::Completed.next_statuses().is_empty());
            assert!(OrderStatus::Cancelled.next_statuses().is_empty());
        }

        #[test]
        fn test_self_registrable_roles() {
            assert!(UserRole::User.is_self_registrable());
            assert!(UserRole::Vendor.is_self_registrable());
            assert!(!UserRole::Admin.is_self_registrable());
            assert!("superuser".parse::<UserRole>().is_err());
        }
    }
}
