#![forbid(unsafe_code)]

//! Payload delivered to observers.

/// Property name meaning "every property on the source changed".
///
/// Bindings that see this name should refresh everything they read from
/// the source.
pub const ALL_PROPERTIES: &str = "";

/// Arguments for a single property-changed notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PropertyChangedEventArgs<'a> {
    property_name: &'a str,
}

impl<'a> PropertyChangedEventArgs<'a> {
    /// Arguments for a change to `property_name`.
    #[must_use]
    pub fn new(property_name: &'a str) -> Self {
        Self { property_name }
    }

    /// Name of the property that changed, or [`ALL_PROPERTIES`].
    #[must_use]
    pub fn property_name(&self) -> &'a str {
        self.property_name
    }

    /// True when the notification covers every property.
    #[must_use]
    pub fn is_all(&self) -> bool {
        self.property_name == ALL_PROPERTIES
    }

    /// True if a binding on `name` should refresh.
    #[must_use]
    pub fn affects(&self, name: &str) -> bool {
        self.is_all() || self.property_name == name
    }
}
