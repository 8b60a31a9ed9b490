//! Request-scoped trace identifier.
//!
//! The HTTP middleware installs a [`TraceId`] in task-local storage for the
//! lifetime of each request, so domain errors created anywhere inside the
//! request can be correlated with the log lines emitted for it.
//!
//! Task-locals do not follow `tokio::spawn` or `spawn_blocking`; wrap such
//! work in [`TraceId::scope`] to keep the identifier visible.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use tokio::task_local;
use uuid::Uuid;

/// Response header carrying the trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";

task_local! {
    static CURRENT: TraceId;
}

/// Correlation identifier for a single request.
///
/// # Examples
/// ```
/// use inventory_backend::domain::TraceId;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let id = TraceId::generate();
/// let seen = TraceId::scope(id, async { TraceId::current() }).await;
/// assert_eq!(seen, Some(id));
/// # });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Generate a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// The identifier of the request currently being served, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        CURRENT.try_with(|id| *id).ok()
    }

    /// Run `fut` with `trace_id` installed as the current identifier.
    pub async fn scope<Fut>(trace_id: Self, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        CURRENT.scope(trace_id, fut).await
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn current_is_visible_inside_scope_only() {
        let id = TraceId::generate();
        assert_eq!(TraceId::scope(id, async { TraceId::current() }).await, Some(id));
        assert!(TraceId::current().is_none());
    }

    #[test]
    fn parses_surrounding_whitespace() {
        let id: TraceId = " 00000000-0000-0000-0000-000000000000 "
            .parse()
            .expect("valid uuid");
        assert_eq!(id.to_string(), Uuid::nil().to_string());
    }

    #[test]
    fn rejects_garbage() {
        assert!("not-a-trace".parse::<TraceId>().is_err());
    }
}
