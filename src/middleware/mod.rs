/// Middleware module
///
/// Request-scoped concerns shared by the routes: session authentication,
/// access logging and the static file hit counter.

mod access_log;
mod authenticated_user;
mod hit_counter;

pub use access_log::AccessLog;
pub use authenticated_user::authorization_header;
pub use authenticated_user::AuthenticatedUser;
pub use hit_counter::HitCounterMiddleware;
