//! Parse options

/// Limits and switches applied while scanning and resolving
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum number of directories visited in one resolve pass
    pub max_directories: usize,
    /// Bytes skipped while looking for the start-of-image marker
    pub max_prefix_search: u64,
    /// Length ASCII values are clamped to when formatted for display
    pub ascii_display_limit: usize,
    /// Walk maker-note directories that look like plain IFDs
    pub follow_maker_notes: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            max_directories: 32,
            max_prefix_search: 64 * 1024,
            ascii_display_limit: 64,
            follow_maker_notes: true,
        }
    }
}
