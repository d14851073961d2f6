// The comparison pipeline: fit -> evaluate -> select -> report
pub mod core;
pub mod report;

pub use self::core::{Focus, analyse_series, resolve_focus, run_comparison};
pub use report::{format_metric_line, print_report, report_lines};
