//! # fedflow
//!
//! Batch fedpkg operations across the branches of a package repository.
//!
//! The operator selects lifecycle steps with flags; fedflow plans the
//! matching external commands for every branch, then runs them in order.
//! Steps that create state register compensating commands, which are
//! replayed if a later step fails.
//!
//! ## Features
//!
//! - **Plan/commit/rollback**: forward and rollback queues of external
//!   commands, committed sequentially with best-effort rollback
//! - **Pretend mode**: print the fully resolved forward and rollback plans
//! - **Private branches**: `private-<branch>-rh<bug>` working branches that
//!   vanish again when the run aborts
//! - **Multi-package runs**: one checkout per package under `~/fedora-scm`
//!
//! ## Usage
//!
//! ```bash
//! fedflow --master --push                     # push the default branch
//! fedflow --branches=f39,f40 --merge --build  # merge and build two branches
//! fedflow -p --master --bump=1.2 --commit     # show what a bump would run
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod cli;
pub mod error;
pub mod options;
pub mod specfile;
pub mod transaction;
pub mod workflow;

pub use cli::Args;
pub use error::{ConfigError, ExecError, FlowError, Result};
pub use options::{BumpRequest, RunOptions, UpdateType};
pub use transaction::{Command, Committer, Executor, ProcessExecutor, RollbackReport};
pub use workflow::{BranchSelection, Session, WorkflowDriver};
