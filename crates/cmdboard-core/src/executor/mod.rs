//! Command execution.
//!
//! A resolved command runs in one of two modes:
//! - **Captured**: run through the shell with stdout and stderr redirected;
//!   the output comes back in the [`ExecutionResult`].
//! - **Visible**: opened in a persistent console the user can see (and, for
//!   system file checks, with elevated privileges); nothing is captured.
//!
//! Every execution runs on its own task so the caller is never blocked.
//!
//! # Example
//!
//! ```rust,no_run
//! use cmdboard_core::executor::ExecutionEngine;
//! use cmdboard_core::model::{PageNumber, SlotRef};
//!
//! # async fn example() {
//! let engine = ExecutionEngine::new();
//! let handle = engine.execute("echo hello".to_string(), SlotRef::new(PageNumber::FIRST, 0));
//! let result = handle.await.unwrap();
//! println!("{}", result.output);
//! # }
//! ```

mod engine;
mod mode;
mod platform;

pub use engine::{
    CommandRunner, EXTERNAL_WINDOW_MESSAGE, ExecutionEngine, ExecutionRequest, ExecutionResult,
};
pub use mode::ExecutionMode;
