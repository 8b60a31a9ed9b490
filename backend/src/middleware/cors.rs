//! Cross-origin policy for browser clients.
//!
//! Any origin may call the API; responses echo `*` rather than the caller's
//! origin, and no credentials are allowed.

use actix_cors::Cors;

const PREFLIGHT_MAX_AGE_SECS: usize = 3600;

/// Permissive CORS middleware wrapped around the whole app.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use inventory_backend::cors;
///
/// let _app = App::new().wrap(cors());
/// ```
#[must_use]
pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .send_wildcard()
        .allow_any_method()
        .allow_any_header()
        .max_age(PREFLIGHT_MAX_AGE_SECS)
}
