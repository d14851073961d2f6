use crate::domain::TrendMethod;
use crate::models::{ComparisonReport, EvaluationMetrics, SeriesAnalysis};

/// `"<Label> <Method> Metrics: R2 = X.XXX, MAE = X.XXX, RMSE = X.XXX"`
pub fn format_metric_line(label: &str, method: TrendMethod, metrics: &EvaluationMetrics) -> String {
    format!(
        "{} {} Metrics: R2 = {:.3}, MAE = {:.3}, RMSE = {:.3}",
        label,
        method.metrics_label(),
        metrics.r2,
        metrics.mae,
        metrics.rmse
    )
}

fn best_method_line(analysis: &SeriesAnalysis) -> String {
    match analysis.best_method {
        Some(method) => format!("{} best fit: {}", analysis.label, method.metrics_label()),
        None => format!("{} best fit: none (no comparable metrics)", analysis.label),
    }
}

/// Metric lines grouped by method (local then reference), then one best-fit line per series.
pub fn report_lines(report: &ComparisonReport) -> Vec<String> {
    let mut lines = Vec::new();

    for method in TrendMethod::EVALUATED {
        for analysis in report.analyses() {
            if let Some(metrics) = analysis.metrics_for(method) {
                lines.push(format_metric_line(&analysis.label, method, metrics));
            }
        }
    }

    lines.extend(report.analyses().into_iter().map(best_method_line));
    lines
}

/// Print the report to stdout; skipped methods go to the log.
pub fn print_report(report: &ComparisonReport) {
    println!("{}", report.title);
    for line in report_lines(report) {
        println!("{}", line);
    }
}
