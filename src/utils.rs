//!
//! Small helpers shared by the batch runs
//!
use indicatif::ProgressStyle;

///
/// Style of progress bars of batch runs
///
pub fn progress_common_style() -> ProgressStyle {
    ProgressStyle::with_template("[{elapsed_precise}] {bar:40} {pos}/{len} ({eta})")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
}
