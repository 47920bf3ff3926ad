//! Flag collection and the missing-attribute policy.
//!
//! The collector performs three ambient reads and nothing else: the
//! resulting [`StartupFlags`] carries the observed values unchanged.
//!
//! The version token lives in a data attribute on a known root element.
//! When that attribute is absent, the chosen [`VsnPolicy`] decides between
//! substituting an empty string (the default) and aborting startup.

// ============================================================================
// Imports
// ============================================================================

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};

use super::environment::HostEnvironment;

// ============================================================================
// Constants
// ============================================================================

/// Default identifier of the element carrying the version attribute.
pub const DEFAULT_ROOT_ID: &str = "body";

/// Default name of the version data attribute.
pub const DEFAULT_VSN_ATTRIBUTE: &str = "data-vsn";

// ============================================================================
// StartupFlags
// ============================================================================

/// The configuration record passed to the application at construction time.
///
/// Created once at process start from environment reads, never mutated.
/// The version token is opaque; no structure is assumed or validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartupFlags {
    /// Viewport height in pixels.
    pub height: u32,

    /// Viewport width in pixels.
    pub width: u32,

    /// Opaque version identifier. May be empty.
    pub vsn: String,
}

impl StartupFlags {
    /// Creates a flags record from explicit values.
    #[inline]
    #[must_use]
    pub fn new(height: u32, width: u32, vsn: impl Into<String>) -> Self {
        Self {
            height,
            width,
            vsn: vsn.into(),
        }
    }
}

// ============================================================================
// VsnPolicy
// ============================================================================

/// Policy for a missing version attribute.
///
/// No downstream logic inspects the token's structure, so either policy is
/// sound; the choice only affects whether startup proceeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VsnPolicy {
    /// Substitute an empty string and continue. The default.
    #[default]
    SubstituteEmpty,

    /// Abort startup with [`Error::MissingAttribute`].
    Fatal,
}

// ============================================================================
// FlagCollector
// ============================================================================

/// Collects [`StartupFlags`] from a [`HostEnvironment`].
///
/// # Example
///
/// ```
/// use portwire::flags::{FlagCollector, StaticEnvironment};
///
/// # fn example() -> portwire::Result<()> {
/// let env = StaticEnvironment::new(1200, 800).with_attribute("body", "data-vsn", "v3");
/// let flags = FlagCollector::new().collect(&env)?;
///
/// assert_eq!(flags.width, 1200);
/// assert_eq!(flags.vsn, "v3");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct FlagCollector {
    /// Identifier of the element carrying the version attribute.
    root_id: String,
    /// Name of the version attribute.
    attribute: String,
    /// Policy for a missing attribute.
    policy: VsnPolicy,
}

impl Default for FlagCollector {
    fn default() -> Self {
        Self {
            root_id: DEFAULT_ROOT_ID.to_string(),
            attribute: DEFAULT_VSN_ATTRIBUTE.to_string(),
            policy: VsnPolicy::default(),
        }
    }
}

impl FlagCollector {
    /// Creates a collector with the default root element, attribute, and policy.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the identifier of the element carrying the version attribute.
    #[inline]
    #[must_use]
    pub fn root_id(mut self, id: impl Into<String>) -> Self {
        self.root_id = id.into();
        self
    }

    /// Sets the name of the version attribute.
    #[inline]
    #[must_use]
    pub fn attribute(mut self, name: impl Into<String>) -> Self {
        self.attribute = name.into();
        self
    }

    /// Sets the policy for a missing version attribute.
    #[inline]
    #[must_use]
    pub fn policy(mut self, policy: VsnPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Collects startup flags from the environment.
    ///
    /// Performs exactly three reads; the observed values pass through
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingAttribute`] if the version attribute is
    /// absent and the policy is [`VsnPolicy::Fatal`].
    pub fn collect(&self, env: &impl HostEnvironment) -> Result<StartupFlags> {
        let height = env.viewport_height();
        let width = env.viewport_width();

        let vsn = match env.attribute(&self.root_id, &self.attribute) {
            Some(vsn) => vsn,
            None => match self.policy {
                VsnPolicy::SubstituteEmpty => {
                    warn!(
                        element_id = %self.root_id,
                        attribute = %self.attribute,
                        "Version attribute absent, substituting empty string"
                    );
                    String::new()
                }
                VsnPolicy::Fatal => {
                    return Err(Error::missing_attribute(&self.root_id, &self.attribute));
                }
            },
        };

        debug!(height, width, vsn = %vsn, "Collected startup flags");

        Ok(StartupFlags { height, width, vsn })
    }
}

// ============================================================================
// Tests
// ============================================================================
