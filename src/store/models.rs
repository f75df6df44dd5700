use crate::generation::DesignResult;
use crate::workflow::DesignForm;
use serde::{Deserialize, Serialize};

/// A saved design keeps at most this many image URLs.
pub const MAX_SAVED_IMAGES: usize = 6;

/// Persistent snapshot of an accepted design. Immutable once created.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SavedDesign {
    pub id: String,
    pub room_type: String,
    pub dimensions: String,
    pub style: String,
    pub budget: String,
    pub vibe: String,
    pub summary: String,
    pub images: Vec<String>,
    pub created_at: String,
}

impl SavedDesign {
    /// Snapshot the submitted form and the accepted result. Callers only
    /// save results with a non-empty summary.
    pub fn new(form: &DesignForm, result: &DesignResult) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            room_type: form.room_type.clone(),
            dimensions: form.dimensions.clone(),
            style: form.style.clone(),
            budget: form.budget.clone(),
            vibe: form.vibe.clone(),
            summary: result.summary.clone(),
            images: result.images.iter().take(MAX_SAVED_IMAGES).cloned().collect(),
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eight_image_result() -> DesignResult {
        DesignResult {
            summary: "Cozy plan".into(),
            images: (0..8).map(|i| format!("img-{}.png", i)).collect(),
            posts: vec![],
        }
    }

    #[test]
    fn test_new_copies_form_and_caps_images() {
        let mut form = DesignForm::default();
        form.room_type = "Bedroom".into();
        form.vibe = "plants".into();

        let design = SavedDesign::new(&form, &eight_image_result());
        assert_eq!(design.room_type, "Bedroom");
        assert_eq!(design.vibe, "plants");
        assert_eq!(design.summary, "Cozy plan");
        assert_eq!(design.images.len(), MAX_SAVED_IMAGES);
        assert_eq!(design.images[0], "img-0.png");
        assert_eq!(design.images[5], "img-5.png");
        assert!(!design.created_at.is_empty());
    }

    #[test]
    fn test_new_assigns_unique_ids() {
        let form = DesignForm::default();
        let result = eight_image_result();
        let first = SavedDesign::new(&form, &result);
        let second = SavedDesign::new(&form, &result);
        assert_ne!(first.id, second.id);
    }
}
