//! Record cleaning pipeline with ordered step execution.
//!
//! Each step implements the `CleaningStep` trait and is executed in order
//! against the working frame. Later stages read the typed columns earlier
//! stages wrote, so the standard order is fixed.
//!
//! # Standard Pipeline Order
//!
//! 1. **SubmitTimeStep** - Standardize the submission timestamp
//! 2. **IdentifierStep** - Synthesize or coerce the record id
//! 3. **NumericFieldsStep** - Clean the six numeric fields
//! 4. **CategoricalFieldsStep** - Map the five categorical fields
//! 5. **BenefitsStep** - Derive the benefit boolean columns
//! 6. **NotesStep** - Normalize free-text notes
//! 7. **DuplicateDetectionStep** - Mark repeat submissions
//! 8. **QualityFlagStep** - Resolve one quality flag per record
//! 9. **ProjectionStep** - Keep the canonical columns, in order
//!
//! # Example
//!
//! ```ignore
//! use survey_core::{CleaningConfig, process};
//!
//! let config = CleaningConfig::standard();
//! let cleaned = process(&raw, &config)?;
//! ```

use anyhow::Result;
use polars::prelude::DataFrame;
use tracing::{debug, warn};

use crate::columns::has_column;
use crate::config::{CleaningConfig, CleaningContext};
use crate::dedupe::flag_duplicates;
use crate::quality::assign_quality_flags;
use crate::schema;
use crate::transformers;

/// A single cleaning step.
///
/// Steps mutate the working frame in place and must leave columns they do
/// not own untouched.
pub trait CleaningStep: Send + Sync {
    /// Apply this step to the working frame.
    fn apply(&self, df: &mut DataFrame, ctx: &CleaningContext<'_>) -> Result<()>;

    /// Human-readable name for this step (for logging/debugging).
    fn step_name(&self) -> &str;

    /// Whether this step should be skipped for the given run.
    ///
    /// Default implementation always runs the step.
    fn should_skip(&self, _ctx: &CleaningContext<'_>) -> bool {
        false
    }
}

/// An ordered pipeline of cleaning steps.
pub struct CleaningPipeline {
    steps: Vec<Box<dyn CleaningStep>>,
}

impl Default for CleaningPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl CleaningPipeline {
    /// Create an empty pipeline.
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Add a step to the end of the pipeline.
    pub fn add_step(mut self, step: Box<dyn CleaningStep>) -> Self {
        self.steps.push(step);
        self
    }

    /// Insert a step at a specific position.
    pub fn insert_step(mut self, index: usize, step: Box<dyn CleaningStep>) -> Self {
        self.steps.insert(index, step);
        self
    }

    /// Remove a step by name.
    pub fn remove_step(mut self, step_name: &str) -> Self {
        self.steps.retain(|s| s.step_name() != step_name);
        self
    }

    /// Execute all steps in order.
    pub fn execute(&self, df: &mut DataFrame, ctx: &CleaningContext<'_>) -> Result<()> {
        for step in &self.steps {
            if step.should_skip(ctx) {
                debug!(step = step.step_name(), "skipping cleaning step");
                continue;
            }
            debug!(step = step.step_name(), rows = df.height(), "applying cleaning step");
            step.apply(df, ctx)?;
        }
        Ok(())
    }

    /// List step names in execution order.
    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.step_name()).collect()
    }
}

// ============================================================================
// Standard Cleaning Steps
// ============================================================================

/// Step 1: standardize the submission timestamp.
pub struct SubmitTimeStep;

impl CleaningStep for SubmitTimeStep {
    fn apply(&self, df: &mut DataFrame, ctx: &CleaningContext<'_>) -> Result<()> {
        transformers::standardize_submit_time(df, ctx)
    }

    fn step_name(&self) -> &str {
        "submit_time"
    }
}

/// Step 2: synthesize or coerce the record id.
pub struct IdentifierStep;

impl CleaningStep for IdentifierStep {
    fn apply(&self, df: &mut DataFrame, ctx: &CleaningContext<'_>) -> Result<()> {
        transformers::assign_identifiers(df, ctx)
    }

    fn step_name(&self) -> &str {
        "identifier"
    }
}

/// Step 3: clean the six numeric fields.
pub struct NumericFieldsStep;

impl CleaningStep for NumericFieldsStep {
    fn apply(&self, df: &mut DataFrame, ctx: &CleaningContext<'_>) -> Result<()> {
        transformers::standardize_numeric_fields(df, ctx)
    }

    fn step_name(&self) -> &str {
        "numeric_fields"
    }
}

/// Step 4: map the five categorical fields.
pub struct CategoricalFieldsStep;

impl CleaningStep for CategoricalFieldsStep {
    fn apply(&self, df: &mut DataFrame, ctx: &CleaningContext<'_>) -> Result<()> {
        transformers::standardize_categorical_fields(df, ctx)
    }

    fn step_name(&self) -> &str {
        "categorical_fields"
    }
}

/// Step 5: derive the benefit boolean columns.
pub struct BenefitsStep;

impl CleaningStep for BenefitsStep {
    fn apply(&self, df: &mut DataFrame, ctx: &CleaningContext<'_>) -> Result<()> {
        transformers::derive_benefit_columns(df, ctx)
    }

    fn step_name(&self) -> &str {
        "benefits"
    }
}

/// Step 6: normalize free-text notes.
pub struct NotesStep;

impl CleaningStep for NotesStep {
    fn apply(&self, df: &mut DataFrame, ctx: &CleaningContext<'_>) -> Result<()> {
        transformers::standardize_notes(df, ctx)
    }

    fn step_name(&self) -> &str {
        "notes"
    }
}

/// Step 7: mark repeat submissions.
pub struct DuplicateDetectionStep;

impl CleaningStep for DuplicateDetectionStep {
    fn apply(&self, df: &mut DataFrame, _ctx: &CleaningContext<'_>) -> Result<()> {
        flag_duplicates(df)
    }

    fn step_name(&self) -> &str {
        "duplicate_detection"
    }
}

/// Step 8: resolve one quality flag per record.
pub struct QualityFlagStep;

impl CleaningStep for QualityFlagStep {
    fn apply(&self, df: &mut DataFrame, _ctx: &CleaningContext<'_>) -> Result<()> {
        assign_quality_flags(df)
    }

    fn step_name(&self) -> &str {
        "quality_flags"
    }
}

/// Step 9: keep the canonical columns, in output order.
pub struct ProjectionStep;

impl CleaningStep for ProjectionStep {
    fn apply(&self, df: &mut DataFrame, _ctx: &CleaningContext<'_>) -> Result<()> {
        project_canonical_columns(df)
    }

    fn step_name(&self) -> &str {
        "column_projection"
    }
}

/// Selects the canonical columns in output order, silently dropping
/// everything else and omitting canonical columns the frame never gained.
fn project_canonical_columns(df: &mut DataFrame) -> Result<()> {
    let keep: Vec<&str> = schema::CANONICAL_COLUMNS
        .iter()
        .copied()
        .filter(|name| has_column(df, name))
        .collect();
    *df = df.select(keep)?;
    Ok(())
}

/// Build the default cleaning pipeline in the standard order.
pub fn build_default_pipeline() -> CleaningPipeline {
    CleaningPipeline::new()
        .add_step(Box::new(SubmitTimeStep))
        .add_step(Box::new(IdentifierStep))
        .add_step(Box::new(NumericFieldsStep))
        .add_step(Box::new(CategoricalFieldsStep))
        .add_step(Box::new(BenefitsStep))
        .add_step(Box::new(NotesStep))
        .add_step(Box::new(DuplicateDetectionStep))
        .add_step(Box::new(QualityFlagStep))
        .add_step(Box::new(ProjectionStep))
}

/// Clean a raw survey frame into the canonical schema.
///
/// The input is copied; source resolution happens once against the copy and
/// every step reads the same resolved view.
pub fn process(raw: &DataFrame, config: &CleaningConfig) -> Result<DataFrame> {
    let mut working = raw.clone();
    let ctx = CleaningContext::new(config, &working);
    if ctx.sources.is_empty() {
        warn!("no recognized source columns in input frame");
    }
    build_default_pipeline().execute(&mut working, &ctx)?;
    Ok(working)
}
