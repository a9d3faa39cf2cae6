//! Field hook dispatcher for blockhook.
//!
//! Given a lifecycle stage, a document's JSON data and the shape it conforms
//! to, [`Dispatcher::run_stage`] calls every registered field hook in
//! declaration order and descends depth-first into nested block instances
//! (rich-text `block` nodes and `blocks` array entries). Every stage takes the
//! same path, so nested fields see exactly the hooks top-level fields see.
//!
//! Each operation carries an [`OperationContext`] whose [`CallLog`] records
//! every invocation; callers inspect the log instead of global counters.

mod call_log;
mod config;
mod dispatcher;
mod error;
mod validate;
mod walk;

pub use call_log::{CallLog, InvocationOutcome, InvocationRecord, OperationContext};
pub use config::{DispatchConfig, FailureMode};
pub use dispatcher::Dispatcher;
pub use error::{
    ConfigError, DispatchError, DispatchResult, HookExecutionError, ValidationError,
};
pub use validate::Validator;
