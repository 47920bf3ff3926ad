//! Host environment abstraction.
//!
//! The flag collector reads ambient values through [`HostEnvironment`]
//! rather than touching the runtime directly, so embedders decide where
//! the values come from (a live DOM, a windowing system, a config source)
//! and tests run against a fixed snapshot.

// ============================================================================
// HostEnvironment
// ============================================================================

/// Read-only view of the runtime environment at startup.
///
/// Implementors expose exactly the three ambient reads the flag collector
/// needs. Reads must have no side effects.
pub trait HostEnvironment {
    /// Current viewport width in pixels.
    fn viewport_width(&self) -> u32;

    /// Current viewport height in pixels.
    fn viewport_height(&self) -> u32;

    /// Reads a data attribute from the element with the given identifier.
    ///
    /// Returns `None` if the element or the attribute is absent.
    fn attribute(&self, element_id: &str, name: &str) -> Option<String>;
}

// ============================================================================
// StaticEnvironment
// ============================================================================

/// A fixed snapshot of the host environment.
///
/// Useful for embedders that capture values up front and for tests.
///
/// # Example
///
/// ```
/// use portwire::flags::{HostEnvironment, StaticEnvironment};
///
/// let env = StaticEnvironment::new(1200, 800).with_attribute("body", "data-vsn", "v3");
/// assert_eq!(env.viewport_width(), 1200);
/// assert_eq!(env.attribute("body", "data-vsn").as_deref(), Some("v3"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticEnvironment {
    /// Viewport width in pixels.
    width: u32,
    /// Viewport height in pixels.
    height: u32,
    /// Attributes keyed by (element id, attribute name).
    attributes: Vec<((String, String), String)>,
}

impl StaticEnvironment {
    /// Creates a snapshot with the given viewport dimensions and no attributes.
    #[inline]
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            attributes: Vec::new(),
        }
    }

    /// Adds an attribute to the snapshot.
    #[must_use]
    pub fn with_attribute(
        mut self,
        element_id: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.attributes
            .push(((element_id.into(), name.into()), value.into()));
        self
    }
}

impl HostEnvironment for StaticEnvironment {
    #[inline]
    fn viewport_width(&self) -> u32 {
        self.width
    }

    #[inline]
    fn viewport_height(&self) -> u32 {
        self.height
    }

    fn attribute(&self, element_id: &str, name: &str) -> Option<String> {
        self.attributes
            .iter()
            .find(|((id, attr), _)| id == element_id && attr == name)
            .map(|(_, value)| value.clone())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_environment_dimensions() {
        let env = StaticEnvironment::new(1920, 1080);
        assert_eq!(env.viewport_width(), 1920);
        assert_eq!(env.viewport_height(), 1080);
    }

    #[test]
    fn test_static_environment_attribute_lookup() {
        let env = StaticEnvironment::new(0, 0)
            .with_attribute("body", "data-vsn", "abc123")
            .with_attribute("root", "data-theme", "dark");

        assert_eq!(env.attribute("body", "data-vsn").as_deref(), Some("abc123"));
        assert_eq!(env.attribute("root", "data-theme").as_deref(), Some("dark"));
    }

    #[test]
    fn test_static_environment_missing_attribute() {
        let env = StaticEnvironment::new(0, 0).with_attribute("body", "data-vsn", "v1");

        assert!(env.attribute("body", "data-other").is_none());
        assert!(env.attribute("main", "data-vsn").is_none());
    }

    #[test]
    fn test_default_is_empty() {
        let env = StaticEnvironment::default();
        assert_eq!(env.viewport_width(), 0);
        assert_eq!(env.viewport_height(), 0);
        assert!(env.attribute("body", "data-vsn").is_none());
    }
}
