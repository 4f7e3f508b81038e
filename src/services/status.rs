//! Status classification seam
//!
//! The engine consumes delivery/workflow classifications; it never computes
//! them from business data itself. The registry contents (saved/published
//! ids, platform delivery states) come from an external collaborator.

use std::collections::{HashMap, HashSet};

use crate::types::{Classification, DeliveryStatus, MergedCreative, WorkflowStatus};

/// Maps a merged creative to its delivery and workflow status
pub trait StatusClassifier: Send + Sync {
    fn classify(&self, creative: &MergedCreative) -> Classification;
}

/// Classifier backed by externally supplied registries.
///
/// Workflow precedence: published > saved > draft > none.
#[derive(Debug, Default)]
pub struct RegistryClassifier {
    published: HashSet<String>,
    saved: HashSet<String>,
    drafts: HashSet<String>,
    /// Platform delivery state strings keyed by creative id
    delivery: HashMap<String, String>,
}

impl RegistryClassifier {
    pub fn new(
        published: HashSet<String>,
        saved: HashSet<String>,
        drafts: HashSet<String>,
        delivery: HashMap<String, String>,
    ) -> Self {
        Self {
            published,
            saved,
            drafts,
            delivery,
        }
    }

    fn delivery_of(&self, creative_id: &str) -> DeliveryStatus {
        match self.delivery.get(creative_id).map(|s| s.to_uppercase()) {
            Some(s) if s == "ACTIVE" => DeliveryStatus::Active,
            Some(s) if s == "PAUSED" => DeliveryStatus::Paused,
            Some(_) => DeliveryStatus::Inactive,
            None => DeliveryStatus::Unknown,
        }
    }

    fn workflow_of(&self, creative_id: &str) -> WorkflowStatus {
        if self.published.contains(creative_id) {
            WorkflowStatus::Published
        } else if self.saved.contains(creative_id) {
            WorkflowStatus::Saved
        } else if self.drafts.contains(creative_id) {
            WorkflowStatus::Draft
        } else {
            WorkflowStatus::None
        }
    }
}

impl StatusClassifier for RegistryClassifier {
    fn classify(&self, creative: &MergedCreative) -> Classification {
        Classification {
            delivery: self.delivery_of(&creative.creative_id),
            workflow: self.workflow_of(&creative.creative_id),
        }
    }
}

/// Attach classifications to freshly aggregated creatives, in place
pub fn attach_statuses(creatives: &mut [MergedCreative], classifier: &dyn StatusClassifier) {
    for creative in creatives {
        let classification = classifier.classify(creative);
        creative.delivery_status = Some(classification.delivery);
        creative.workflow_status = Some(classification.workflow);
    }
}
