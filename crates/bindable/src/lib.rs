#![forbid(unsafe_code)]

//! Change notification for view-model data binding.
//!
//! # Role
//! A view-model stores its state in ordinary fields and owns a
//! [`PropertyChanged<Self>`] observer list. Setters route through
//! [`NotifyPropertyChanged::set_property`], which writes the field only when
//! the new value differs and then tells every observer which property
//! changed. Binding layers (widgets, renderers, loggers) subscribe to the
//! list and decide for themselves what to do with the notification.
//!
//! # Primary pieces
//! - [`NotifyPropertyChanged`]: trait with the guarded setter and `notify`.
//! - [`PropertyChanged`]: ordered, instance-owned observer list.
//! - [`set_property!`]: setter macro that uses the field name as the
//!   property name.
//! - [`NotifyConfig`]: diagnostics knobs, read from the environment.
//!
//! # Threading
//! Everything is single-threaded (`Rc`/`RefCell` inside), and observers run
//! synchronously on the caller's thread before the setter returns.

pub mod config;
pub mod error;
pub mod event;
pub mod notify;
pub mod property_changed;

pub use config::NotifyConfig;
pub use error::ConfigError;
pub use event::{ALL_PROPERTIES, PropertyChangedEventArgs};
pub use notify::NotifyPropertyChanged;
pub use property_changed::{PropertyChanged, SubscriptionId};
