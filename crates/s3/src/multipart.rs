//! Transfer policy
//!
//! Decides between a single PutObject and a multipart upload, and sizes the
//! parts so a file never needs more parts than S3 accepts.

use std::time::Duration;

/// Default part size and single-request threshold: 5 MiB
pub const DEFAULT_PART_SIZE: u64 = 5 * 1024 * 1024;

/// Minimum part size: 5 MiB (S3 requirement)
pub const MIN_PART_SIZE: u64 = 5 * 1024 * 1024;

/// Maximum part size: 5 GiB
pub const MAX_PART_SIZE: u64 = 5 * 1024 * 1024 * 1024;

/// Maximum number of parts: 10,000 (S3 limit)
pub const MAX_PARTS: u64 = 10_000;

/// How long a delete waits for the object to disappear
pub const DEFAULT_DELETE_WAIT: Duration = Duration::from_secs(100);

/// Transfer configuration
#[derive(Debug, Clone)]
pub struct TransferConfig {
    /// Preferred part size in bytes
    pub part_size: u64,

    /// Files larger than this use multipart upload
    pub multipart_threshold: u64,

    /// Upper bound on the post-delete existence wait
    pub delete_wait: Duration,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            part_size: DEFAULT_PART_SIZE,
            multipart_threshold: DEFAULT_PART_SIZE,
            delete_wait: DEFAULT_DELETE_WAIT,
        }
    }
}

impl TransferConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delete_wait(mut self, wait: Duration) -> Self {
        self.delete_wait = wait;
        self
    }

    /// Whether a file of this size goes through the multipart API
    pub fn use_multipart(&self, file_size: u64) -> bool {
        file_size > self.multipart_threshold
    }

    /// Calculate appropriate part size for a file
    pub fn calculate_part_size(&self, file_size: u64) -> u64 {
        let parts = file_size.div_ceil(self.part_size);

        if parts <= MAX_PARTS {
            self.part_size
        } else {
            // Need larger parts to fit within 10,000 limit
            file_size
                .div_ceil(MAX_PARTS)
                .clamp(MIN_PART_SIZE, MAX_PART_SIZE)
        }
    }
}

/// Calculate number of parts for a file
pub fn calculate_parts(file_size: u64, part_size: u64) -> u64 {
    file_size.div_ceil(part_size)
}

/// Get the byte range `[start, end)` of a 1-based part
pub fn part_byte_range(part_number: i32, part_size: u64, total_size: u64) -> (u64, u64) {
    let start = (part_number as u64 - 1) * part_size;
    let end = (start + part_size).min(total_size);
    (start, end)
}
