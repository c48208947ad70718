//! Store Assess Common Library
//!
//! CLIとWeb(WASM)で共有される型・正規化・レポートモデル

pub mod types;
pub mod error;
pub mod config;
pub mod citation;
pub mod series;
pub mod format;
pub mod charts;
pub mod report;
pub mod form;
pub mod export;

pub use types::{AssessmentData, EvaluationResult, FormPayload};
pub use error::{Error, Result};
pub use config::ReportConfig;
pub use citation::SourceCollector;
pub use series::parse_csv_series;
pub use charts::{ChartBackend, ChartFailure, ChartKind, ChartRegistry, ChartSlot, ChartSpec};
pub use report::{parse_input, Binding, MapBinding, ReportView, SlotBinding};
pub use form::{
    collect_form_data, other_industry_field_state, submit, Evaluator, FormSchema,
    OtherFieldState, StepProgress, StepState, StepTicker, SubmitOutcome, SubmitView,
};
pub use export::{ExportKind, PdfOptions, PngOptions};
