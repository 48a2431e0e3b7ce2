pub mod aliases;
pub mod columns;
pub mod config;
pub mod datetime;
pub mod dedupe;
pub mod pipeline;
pub mod quality;
pub mod schema;
pub mod transformers;

pub use aliases::{AliasEntry, ResolvedSources, SourceAliases};
pub use columns::{
    any_to_f64, any_to_i64, any_to_string, format_numeric, has_column, numeric_column_f64,
    numeric_column_i64, opt_string_column, parse_f64, parse_i64, set_bool_column, set_f64_column,
    set_i64_column, set_opt_string_column, set_string_column, string_column, truth_value,
};
pub use config::{
    BenefitRule, CleaningConfig, CleaningContext, NotesRules, NumericRule, ValueMap,
};
pub use datetime::{SUBMIT_TIME_FORMAT, parse_submit_time, standardize_datetime};
pub use dedupe::flag_duplicates;
pub use pipeline::{
    BenefitsStep, CategoricalFieldsStep, CleaningPipeline, CleaningStep, DuplicateDetectionStep,
    IdentifierStep, NotesStep, NumericFieldsStep, ProjectionStep, QualityFlagStep, SubmitTimeStep,
    build_default_pipeline, process,
};
pub use quality::{QualityContext, assign_quality_flags};
pub use transformers::{
    assign_identifiers, derive_benefit_columns, standardize_categorical_fields,
    standardize_notes, standardize_numeric_fields, standardize_submit_time,
};
