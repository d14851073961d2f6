//! Debugging feature flags.
//!
//! Toggle individual diagnostics here; keep them `false` by default so release
//! builds remain quiet.

pub struct DebugFlags {
    /// Emit one line per CSV row skipped by the loader (the summary count is always logged).
    pub print_skipped_rows: bool,
    /// Emit the residual scale of every LOESS robustness pass.
    pub print_loess_iterations: bool,
    /// Emit the fitted polynomial coefficients.
    pub print_polynomial_coefficients: bool,
    /// Emit plot window lifecycle messages.
    pub print_shutdown: bool,
}

pub const DEBUG_FLAGS: DebugFlags = DebugFlags {
    print_skipped_rows: false,
    print_loess_iterations: false,
    print_polynomial_coefficients: false,
    print_shutdown: false,
};
