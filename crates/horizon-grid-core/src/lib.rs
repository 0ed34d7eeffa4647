//! Core systems for Horizon Grid.
//!
//! This crate provides the foundational pieces the grid data-binding layer
//! is built on:
//!
//! - **Signal/Slot System**: Type-safe change notifications
//! - **Task Queue**: Deferred work that runs after the current call completes
//! - **Logging**: `tracing` targets, span names and helpers
//!
//! # Example
//!
//! ```
//! use horizon_grid_core::{Signal, TaskQueue};
//!
//! let changed = Signal::<()>::new();
//! changed.connect(|_| println!("redraw requested"));
//!
//! let mut queue = TaskQueue::new();
//! queue.post(());
//! for () in queue.drain() {
//!     changed.emit(());
//! }
//! ```

pub mod logging;
pub mod signal;
mod task;

pub use logging::PerfSpan;
pub use signal::{ConnectionId, Signal};
pub use task::{TaskId, TaskQueue};
