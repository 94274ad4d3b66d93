// Types layer - All data structures
pub mod application;
pub mod context;
pub mod request;
pub mod user;

pub use application::{
    format_application_id, InterviewStatus, RenewStatus,
    VisaApplication, VisaStatus, APPLICATION_ID_PREFIX,
};
pub use context::{OperationContext, OperationSource};
pub use request::{Decision, DetailsUpdate, NewApplication};
pub use user::{Identity, Role, UserAccount};
