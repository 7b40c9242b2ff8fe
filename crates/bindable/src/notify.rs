#![forbid(unsafe_code)]

//! Guarded mutation plus notification for view-models.
//!
//! A view-model owns a [`PropertyChanged<Self>`] field and implements
//! [`NotifyPropertyChanged`] by returning it. Setters then go through
//! [`set_property`](NotifyPropertyChanged::set_property) (or the
//! [`set_property!`](crate::set_property) macro), which only writes and
//! notifies when the value actually differs.
//!
//! ```
//! use bindable::{NotifyPropertyChanged, PropertyChanged, set_property};
//!
//! #[derive(Default)]
//! struct Counter {
//!     count: i32,
//!     changed: PropertyChanged<Self>,
//! }
//!
//! impl NotifyPropertyChanged for Counter {
//!     fn property_changed(&self) -> &PropertyChanged<Self> {
//!         &self.changed
//!     }
//! }
//!
//! impl Counter {
//!     fn set_count(&mut self, value: i32) -> bool {
//!         set_property!(self.count = value)
//!     }
//! }
//!
//! let mut vm = Counter::default();
//! vm.changed.subscribe(|vm: &Counter, args| {
//!     println!("{} is now {}", args.property_name(), vm.count);
//! });
//! assert!(!vm.set_count(0));
//! assert!(vm.set_count(5));
//! ```

use crate::event::ALL_PROPERTIES;
use crate::property_changed::PropertyChanged;

/// A source of property-changed notifications.
///
/// Only [`property_changed`](Self::property_changed) is required; everything
/// else is provided on top of it.
pub trait NotifyPropertyChanged: Sized {
    /// The observer list owned by this instance.
    fn property_changed(&self) -> &PropertyChanged<Self>;

    /// Tell every observer that `property_name` changed.
    fn notify_property_changed(&self, property_name: &str) {
        self.property_changed().raise(self, property_name);
    }

    /// Tell every observer that all properties changed.
    fn notify_all_properties(&self) {
        self.notify_property_changed(ALL_PROPERTIES);
    }

    /// Store `value` in the field selected by `field` if it differs from the
    /// current value (by `PartialEq`), then notify with `property_name`.
    ///
    /// Two values that are each unequal to themselves (`NaN`) count as the
    /// same, so re-storing `NaN` into a `NaN` field does not notify.
    ///
    /// Returns whether the field changed.
    fn set_property<T, F>(&mut self, field: F, value: T, property_name: &str) -> bool
    where
        T: PartialEq,
        F: FnOnce(&mut Self) -> &mut T,
    {
        self.set_property_with(field, value, property_name, same_value)
    }

    /// Like [`set_property`](Self::set_property) with a caller-supplied
    /// equality, e.g. `Rc::ptr_eq` for reference identity or a tolerance for
    /// floats.
    fn set_property_with<T, F, E>(
        &mut self,
        field: F,
        value: T,
        property_name: &str,
        same: E,
    ) -> bool
    where
        F: FnOnce(&mut Self) -> &mut T,
        E: FnOnce(&T, &T) -> bool,
    {
        let slot = field(self);
        if same(slot, &value) {
            return false;
        }
        *slot = value;
        self.notify_property_changed(property_name);
        true
    }
}

/// Equality used by [`NotifyPropertyChanged::set_property`]: `PartialEq`,
/// plus reflexivity for values like `NaN` that are unequal to themselves.
#[allow(clippy::eq_op)]
fn same_value<T: PartialEq>(current: &T, new: &T) -> bool {
    current == new || (current != current && new != new)
}

/// Set a field through [`NotifyPropertyChanged::set_property`], using the
/// field's identifier as the property name.
///
/// `set_property!(self.count = value)` notifies `"count"`. Nested fields work
/// too and use the last segment: `set_property!(self.inner.count = value)`
/// also notifies `"count"`. Pass a second argument to override the name:
/// `set_property!(self.count = value, "Count")`. Evaluates to the `bool`
/// returned by `set_property`.
#[macro_export]
macro_rules! set_property {
    (@last $head:ident) => {
        ::core::stringify!($head)
    };
    (@last $head:ident $($rest:ident)+) => {
        $crate::set_property!(@last $($rest)+)
    };
    ($target:ident $(. $field:ident)+ = $value:expr, $name:expr) => {{
        use $crate::NotifyPropertyChanged as _;
        $target.set_property(|this| &mut this $(.$field)+, $value, $name)
    }};
    ($target:ident $(. $field:ident)+ = $value:expr) => {
        $crate::set_property!(
            $target $(.$field)+ = $value,
            $crate::set_property!(@last $($field)+)
        )
    };
}
