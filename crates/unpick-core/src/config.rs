//! Configuration for staging and copying.

/// Name of the staging directory created inside the destination root.
pub const DEFAULT_STAGING_DIR: &str = ".temp";

/// Settings for a process run.
///
/// # Examples
///
/// ```
/// use unpick_core::ExtractConfig;
///
/// let config = ExtractConfig {
///     max_total_size: 100 * 1024 * 1024, // 100 MB
///     ..Default::default()
/// };
/// assert_eq!(config.staging_dir_name, ".temp");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractConfig {
    /// Directory name used for staging, relative to the destination root.
    pub staging_dir_name: String,

    /// Maximum number of bytes written while staging the whole archive.
    pub max_total_size: u64,

    /// Maximum number of archive entries accepted while staging.
    pub max_file_count: usize,
}

impl Default for ExtractConfig {
    /// Default values:
    /// - `staging_dir_name`: `.temp`
    /// - `max_total_size`: 4 GiB
    /// - `max_file_count`: 100,000
    fn default() -> Self {
        Self {
            staging_dir_name: DEFAULT_STAGING_DIR.to_string(),
            max_total_size: 4 * 1024 * 1024 * 1024,
            max_file_count: 100_000,
        }
    }
}

impl ExtractConfig {
    /// Sets the staging directory name.
    #[must_use]
    pub fn with_staging_dir_name(mut self, name: impl Into<String>) -> Self {
        self.staging_dir_name = name.into();
        self
    }

    /// Sets the total staged size limit.
    #[must_use]
    pub const fn with_max_total_size(mut self, bytes: u64) -> Self {
        self.max_total_size = bytes;
        self
    }

    /// Sets the entry count limit.
    #[must_use]
    pub const fn with_max_file_count(mut self, count: usize) -> Self {
        self.max_file_count = count;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ExtractConfig::default();
        assert_eq!(config.staging_dir_name, ".temp");
        assert_eq!(config.max_total_size, 4 * 1024 * 1024 * 1024);
        assert_eq!(config.max_file_count, 100_000);
    }

    #[test]
    fn test_builder_methods() {
        let config = ExtractConfig::default()
            .with_staging_dir_name(".staging")
            .with_max_total_size(10)
            .with_max_file_count(2);
        assert_eq!(config.staging_dir_name, ".staging");
        assert_eq!(config.max_total_size, 10);
        assert_eq!(config.max_file_count, 2);
    }
}
