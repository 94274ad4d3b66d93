// Services layer - Business logic and orchestration
pub mod clock;
pub mod crypto;
pub mod identity_service;
pub mod lifecycle_service;

pub use clock::{Clock, FixedClock, SystemClock};
pub use crypto::CredentialHasher;
pub use identity_service::IdentityService;
pub use lifecycle_service::LifecycleService;
