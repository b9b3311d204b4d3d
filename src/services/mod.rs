//! Grid selection engine and supporting services

pub mod border;
pub mod box_state;
pub mod config;
pub mod geometry;
pub mod grid_file;
pub mod listeners;
pub mod logging;
pub mod merge;
pub mod selection;
pub mod throttle;

pub use border::BorderStates;
pub use config::{Config, ConfigService, ThemeChoice};
pub use listeners::{Listener, ListenerGuard, ListenerRegistry};
pub use selection::SelectionEngine;
pub use throttle::Throttle;
