//! Request middleware: session extraction, role guard, sign-in throttling

pub mod session;
pub mod guard;
pub mod rate_limit;

pub use session::{bearer_token, session_middleware};
pub use guard::require_role;
pub use rate_limit::SignInLimiter;
