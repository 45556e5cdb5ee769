pub mod session_user;

pub use self::session_user::{current_caller, DashboardUser, SessionUser, USER_ID};
