//! Field transformers applied by the cleaning pipeline.
//!
//! Each transformer resolves its input through the alias table in the run
//! context and writes one canonical output column, leaving the rest of the
//! frame untouched. A transformer whose source is absent is a no-op unless
//! its contract defines a synthesized default.

mod benefits;
mod categorical;
mod identifier;
mod notes;
mod numeric;
mod temporal;

pub use benefits::derive_benefit_columns;
pub use categorical::standardize_categorical_fields;
pub use identifier::assign_identifiers;
pub use notes::standardize_notes;
pub use numeric::standardize_numeric_fields;
pub use temporal::standardize_submit_time;
