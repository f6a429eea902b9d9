/// Router Module Index
///
/// Splits the API surface into two routers so access control is applied at
/// the module level rather than per handler: anonymous visitors never reach
/// an admin handler by accident.

/// Routes accessible to all users (site visitors and the public widgets).
/// Handlers must only serve `live` content from the repository.
pub mod public;

/// The `/admin` surface: session endpoints plus the content-management
/// routes, which sit behind the session-token guard.
pub mod admin;
