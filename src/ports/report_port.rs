//! Report generation port trait.

use crate::domain::analysis::AnalysisReport;
use crate::domain::error::AnalyzerError;

/// Port for writing analysis reports.
pub trait ReportPort {
    fn write(
        &self,
        report: &AnalysisReport,
        coin: &str,
        output_path: &str,
    ) -> Result<(), AnalyzerError>;
}
