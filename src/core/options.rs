//! Per-call configuration for the triangulator.
//!
//! The insertion loop is quadratic in the worst case, so a caller serving
//! untrusted input can bound a call three ways: a cap on the number of points,
//! a timeout, and a cooperative [`CancellationToken`]. The timeout and the token
//! are checked once per inserted point.
//!
//! Options can be built in code:
//!
//! ```rust
//! use delaunay_mesh::core::options::{CancellationToken, TriangulationOptionsBuilder};
//! use std::time::Duration;
//!
//! let token = CancellationToken::new();
//! let options = TriangulationOptionsBuilder::default()
//!     .timeout(Duration::from_millis(250))
//!     .max_points(50_000_usize)
//!     .cancellation(token.clone())
//!     .build()
//!     .unwrap();
//! assert_eq!(options.max_points, Some(50_000));
//! ```
//!
//! or read from the environment with [`TriangulationOptions::from_env`]:
//!
//! | Variable | Field |
//! |---|---|
//! | `DELAUNAY_MESH_TIMEOUT_MS` | [`timeout`](TriangulationOptions::timeout) |
//! | `DELAUNAY_MESH_MAX_POINTS` | [`max_points`](TriangulationOptions::max_points) |
//! | `DELAUNAY_MESH_VALIDATE` | [`validate_output`](TriangulationOptions::validate_output) (`1`/`true`) |

#![forbid(unsafe_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Environment variable holding the timeout in milliseconds.
pub const TIMEOUT_ENV_VAR: &str = "DELAUNAY_MESH_TIMEOUT_MS";

/// Environment variable holding the maximum accepted point count.
pub const MAX_POINTS_ENV_VAR: &str = "DELAUNAY_MESH_MAX_POINTS";

/// Environment variable enabling post-construction Delaunay validation.
pub const VALIDATE_ENV_VAR: &str = "DELAUNAY_MESH_VALIDATE";

// =============================================================================
// CANCELLATION
// =============================================================================

/// Shared flag for cooperative cancellation of a running triangulation.
///
/// Clones share the flag; cancelling any clone cancels them all.
///
/// # Examples
///
/// ```rust
/// use delaunay_mesh::core::options::CancellationToken;
///
/// let token = CancellationToken::new();
/// let handle = token.clone();
/// assert!(!token.is_cancelled());
/// handle.cancel();
/// assert!(token.is_cancelled());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates a token that is not cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Returns `true` once [`cancel`](Self::cancel) has been called on any clone.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

// =============================================================================
// OPTIONS
// =============================================================================

/// Options for one triangulation call.
///
/// The default places no limits and skips output validation, which matches the
/// plain [`triangulate`](crate::core::algorithms::bowyer_watson::triangulate)
/// entry point.
#[derive(Builder, Clone, Debug, Default)]
#[builder(default)]
pub struct TriangulationOptions {
    /// Abort with `DeadlineExceeded` once this much time has elapsed.
    #[builder(setter(into, strip_option))]
    pub timeout: Option<Duration>,

    /// Abort with `Cancelled` once this token is cancelled.
    #[builder(setter(strip_option))]
    pub cancellation: Option<CancellationToken>,

    /// Reject inputs with more points than this with `TooManyPoints`.
    #[builder(setter(into, strip_option))]
    pub max_points: Option<usize>,

    /// Check the empty-circumcircle property of the result before returning it.
    /// A violation is reported as an internal invariant violation.
    pub validate_output: bool,
}

impl TriangulationOptions {
    /// Reads options from the process environment.
    ///
    /// Unset variables keep their defaults; unparsable values are ignored with a
    /// warning.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Reads options through `lookup`, which maps a variable name to its value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use delaunay_mesh::core::options::TriangulationOptions;
    /// use std::time::Duration;
    ///
    /// let options = TriangulationOptions::from_env_with(|key| match key {
    ///     "DELAUNAY_MESH_TIMEOUT_MS" => Some("1500".to_string()),
    ///     _ => None,
    /// });
    /// assert_eq!(options.timeout, Some(Duration::from_millis(1500)));
    /// assert_eq!(options.max_points, None);
    /// ```
    #[must_use]
    pub fn from_env_with<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let timeout = parse_var::<u64>(&lookup, TIMEOUT_ENV_VAR).map(Duration::from_millis);
        let max_points = parse_var::<usize>(&lookup, MAX_POINTS_ENV_VAR);
        let validate_output = lookup(VALIDATE_ENV_VAR)
            .is_some_and(|value| matches!(value.trim(), "1" | "true" | "TRUE" | "yes"));

        Self {
            timeout,
            cancellation: None,
            max_points,
            validate_output,
        }
    }

    /// Returns `true` if the cancellation token, if any, has been cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("ignoring {key}={raw:?}: not a valid value");
            None
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
