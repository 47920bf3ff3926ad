//! Builder pattern for application configuration.
//!
//! Provides a fluent API for configuring and creating [`App`] instances.
//!
//! # Example
//!
//! ```
//! use portwire::{App, StartupFlags};
//!
//! # fn example() -> portwire::Result<()> {
//! let app = App::builder()
//!     .flags(StartupFlags::new(800, 1200, "v3"))
//!     .build()?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use crate::error::{Error, Result};
use crate::flags::StartupFlags;

use super::core::App;

// ============================================================================
// AppBuilder
// ============================================================================

/// Builder for configuring an [`App`] instance.
///
/// Use [`App::builder()`] to create a new builder.
#[derive(Debug, Default, Clone)]
pub struct AppBuilder {
    /// Startup flags collected from the host environment.
    flags: Option<StartupFlags>,
}

// ============================================================================
// AppBuilder Implementation
// ============================================================================

impl AppBuilder {
    /// Creates a new application builder with no configuration.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the startup flags.
    ///
    /// # Arguments
    ///
    /// * `flags` - The record produced by the flag collector
    #[inline]
    #[must_use]
    pub fn flags(mut self, flags: StartupFlags) -> Self {
        self.flags = Some(flags);
        self
    }

    /// Builds the application with validation.
    ///
    /// Construction is synchronous and atomic: on success the handle and
    /// its full port surface exist; on failure nothing does.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Initialization`] if flags were not provided.
    pub fn build(self) -> Result<App> {
        let flags = self.validate_flags()?;
        Ok(App::init(flags))
    }
}

// ============================================================================
// Validation
// ============================================================================

impl AppBuilder {
    /// Validates the flags configuration.
    fn validate_flags(&self) -> Result<StartupFlags> {
        self.flags.clone().ok_or_else(|| {
            Error::initialization(
                "Startup flags are required. Use .flags() to set them.\n\
                 Example: App::builder().flags(FlagCollector::new().collect(&env)?)",
            )
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_creates_empty_builder() {
        let builder = AppBuilder::new();
        assert!(builder.flags.is_none());
    }

    #[test]
    fn test_flags_sets_record() {
        let builder = AppBuilder::new().flags(StartupFlags::new(800, 1200, "v3"));
        assert_eq!(builder.flags, Some(StartupFlags::new(800, 1200, "v3")));
    }

    #[test]
    fn test_build_fails_without_flags() {
        let result = AppBuilder::new().build();
        let err = result.expect_err("build must fail");

        assert!(err.is_fatal());
        assert!(err.to_string().contains("flags"));
    }

    #[test]
    fn test_build_succeeds_with_flags() {
        let app = AppBuilder::new()
            .flags(StartupFlags::new(800, 1200, "v3"))
            .build()
            .expect("build");

        assert_eq!(app.flags().vsn, "v3");
    }

    #[test]
    fn test_builder_is_clone() {
        let builder = AppBuilder::new().flags(StartupFlags::new(1, 2, ""));
        let cloned = builder.clone();
        assert_eq!(builder.flags, cloned.flags);
    }
}
