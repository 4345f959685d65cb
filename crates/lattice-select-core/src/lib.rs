//! Core systems for Lattice Select.
//!
//! This crate provides the observer plumbing the option crate is built on:
//!
//! - **Signal/Slot System**: Type-safe, synchronous change and intent notification
//! - **Property System**: Values with change detection
//! - **Logging**: `tracing` targets and span names shared across the workspace
//!
//! # Signal/Slot Example
//!
//! ```
//! use lattice_select_core::Signal;
//!
//! // Create a signal that notifies when a value changes
//! let value_changed = Signal::<i32>::new();
//!
//! // Connect a slot to handle the signal
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! // Emit the signal
//! value_changed.emit(42);
//!
//! // Disconnect when done
//! value_changed.disconnect(conn_id);
//! ```

pub mod logging;
pub mod property;
pub mod signal;

pub use property::Property;
pub use signal::{ConnectionGuard, ConnectionId, Signal};
