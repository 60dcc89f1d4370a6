//! The asynchronous execution engine: coerces variables, resolves a
//! document's selection sets against a host [`Resolver`], and applies
//! list/non-null propagation to produce a result map — or, for a
//! subscription operation, a lazy sequence of them, split into a
//! `CreateSourceEventStream` phase and a per-event completion phase.

mod arguments;
mod cancellation;
mod executor;
mod instrumentation;
mod intermediate;
mod join;
mod operation;
mod resolver;
mod subscribe;
mod typename;
mod variables;

pub use cancellation::CancellationToken;
pub use executor::{execute, ExecutionInput, ExecutionOutcome};
pub use instrumentation::{Instrumentation, NoopInstrumentation};
pub use intermediate::Intermediate;
pub use operation::select_operation;
pub use resolver::{Info, Resolver};
pub use subscribe::{subscribe, EventResolver};
pub use typename::Typename;
