//! Heuristic policy analysis.
//!
//! Every analysis here is a pure function of the document text plus a
//! [`HeuristicProfile`]: impact scoring by keyword density, framing-bias
//! detection between opposing vocabularies, date/stakeholder extraction,
//! Federal-Register section extraction, and the extractive summary used
//! when the remote model is unavailable.

pub mod bias;
pub mod facts;
pub mod impact;
pub mod profile;
pub mod report;
pub mod result;
pub mod sections;
pub mod summary;
pub mod text;

pub use bias::{BiasAxisResult, BiasVerdict, Leaning};
pub use facts::KeyFacts;
pub use impact::{ImpactDimension, ImpactLevel, ImpactScore, ImpactScores};
pub use profile::HeuristicProfile;
pub use report::{export_filename, render, render_text, ExportFormat};
pub use result::{AnalysisOptions, AnalysisResult, Analyzer};
pub use sections::KeySections;
pub use summary::{fallback_summary, Summary, SummarySource, SummaryTier};
