//! Core anonymization policy engine
//!
//! Business logic of the service: the column transform engine, the tabular
//! orchestrator applying it across a record set, and the free-text entity
//! anonymization pipeline. Transport layers consume this module; the policy
//! lives here exactly once.

pub mod tabular;
pub mod text;
pub mod transform;

pub use tabular::TabularAnonymizer;
pub use text::TextAnonymizer;
pub use transform::ColumnTransformer;
