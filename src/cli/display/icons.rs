//! Status icons for CLI output

use crate::infrastructure::constants::UNGROUPED_BUCKET;

/// Status icons for different states
pub struct StatusIcon;

impl StatusIcon {
    pub const SUCCESS: &'static str = "✓";

    pub const WARNING: &'static str = "⚠";

    pub const ERROR: &'static str = "✗";

    /// Icon for a written group; the ungrouped bucket gets a warning
    pub fn get_group_icon(key: &str) -> &'static str {
        if key == UNGROUPED_BUCKET {
            Self::WARNING
        } else {
            Self::SUCCESS
        }
    }
}
