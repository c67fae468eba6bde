// Data models shared by services, repositories and handlers

pub mod order;
pub mod user;
pub mod vendor;

pub use order::{NewOrder, Order, OrderId, OrderOwnership, StatusUpdate};
pub use user::{
    CredentialRecord, NewAccount, NewVendorProfile, Principal, RegistrationOutcome, UserId,
};
pub use vendor::{ApprovalOutcome, VendorId, VendorSummary};
