use std::collections::HashSet;

/// Processing lane selected for a file reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingLane {
    Image,
    Video,
    Unknown,
}

impl ProcessingLane {
    /// Classify a bucket against the configured bucket sets.
    ///
    /// The sets are validated disjoint at startup, so the image check
    /// running first is unobservable in a validated deployment.
    pub fn classify(
        bucket: &str,
        image_buckets: &HashSet<String>,
        video_buckets: &HashSet<String>,
    ) -> Self {
        if image_buckets.contains(bucket) {
            ProcessingLane::Image
        } else if video_buckets.contains(bucket) {
            ProcessingLane::Video
        } else {
            ProcessingLane::Unknown
        }
    }
}
