// Business logic services
// Identity, vendor approval, order lifecycle and redirect notices

pub mod approval;
pub mod flash;
pub mod identity;
pub mod order;

pub use approval::ApprovalService;
pub use flash::{FlashStore, NoticeKind};
pub use identity::{IdentityService, Registration};
pub use order::OrderService;
