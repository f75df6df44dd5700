use crate::generation::{DesignRequest, DesignResult, GenerationBackend};
use crate::store::{SavedDesign, SavedDesignStore, StoreError};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// Style options offered by the generate form. The wire format stays free
/// text, so a backend can accept anything.
pub const STYLE_PRESETS: &[&str] = &[
    "Modern cozy",
    "Minimalist",
    "Luxury glam",
    "Boho",
    "Industrial",
    "Scandinavian",
    "Japandi",
    "Art Deco",
    "Farmhouse",
    "Mid-century modern",
    "Urban chic",
    "Vintage",
    "Coastal",
    "Dark academia",
];

#[derive(Debug, Clone, Serialize)]
pub struct DesignForm {
    pub room_type: String,
    pub dimensions: String,
    pub style: String,
    pub budget: String,
    pub vibe: String,
}

impl Default for DesignForm {
    fn default() -> Self {
        Self {
            room_type: "Living room".to_string(),
            dimensions: "12x15".to_string(),
            style: "Modern cozy".to_string(),
            budget: "500".to_string(),
            vibe: String::new(),
        }
    }
}

impl DesignForm {
    fn to_request(&self) -> DesignRequest {
        DesignRequest {
            room_type: self.room_type.clone(),
            dimensions: self.dimensions.clone(),
            style: self.style.clone(),
            budget: self.budget.clone(),
            vibe: self.vibe.clone(),
        }
    }
}

/// User-facing submit outcomes. Transport, status and parse failures all
/// collapse into `Failed`; the cause is logged, not surfaced.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("A design request is already running.")]
    InFlight,
    #[error("Backend URL missing.")]
    MissingBackend,
    #[error("Design generation failed.")]
    Failed,
}

#[derive(Default)]
struct WorkflowState {
    form: DesignForm,
    result: Option<DesignResult>,
    error: Option<String>,
}

/// Owns the generate form and the request/response cycle for the window.
pub struct DesignWorkflow {
    state: Mutex<WorkflowState>,
    in_flight: AtomicBool,
}

impl DesignWorkflow {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(WorkflowState::default()),
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn form(&self) -> DesignForm {
        self.state.lock().unwrap().form.clone()
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub fn current_result(&self) -> Option<DesignResult> {
        self.state.lock().unwrap().result.clone()
    }

    pub fn last_error(&self) -> Option<String> {
        self.state.lock().unwrap().error.clone()
    }

    /// Store one form field. Field names follow the wire names.
    pub fn update_field(&self, name: &str, value: String) -> Result<(), String> {
        let mut state = self.state.lock().unwrap();
        match name {
            "room_type" => state.form.room_type = value,
            "dimensions" => state.form.dimensions = value,
            "style" => state.form.style = value,
            "budget" => state.form.budget = value,
            "vibe" => state.form.vibe = value,
            _ => return Err(format!("Unknown form field: {}", name)),
        }
        Ok(())
    }

    /// Run one generation round trip. The flag rejects overlapping submits
    /// from the same window; it is not a lock, the UI stays responsive.
    pub async fn submit(
        &self,
        backend: Option<&dyn GenerationBackend>,
    ) -> Result<DesignResult, SubmitError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(SubmitError::InFlight);
        }

        let request = {
            let mut state = self.state.lock().unwrap();
            state.result = None;
            state.error = None;
            state.form.to_request()
        }; // lock released before the await below

        let outcome = match backend {
            None => Err(SubmitError::MissingBackend),
            Some(backend) => backend.generate(&request).await.map_err(|e| {
                tracing::warn!(error = %e, "design generation failed");
                SubmitError::Failed
            }),
        };

        let result = {
            let mut state = self.state.lock().unwrap();
            match outcome {
                Ok(result) => {
                    state.result = Some(result.clone());
                    Ok(result)
                }
                Err(e) => {
                    state.error = Some(e.to_string());
                    Err(e)
                }
            }
        };

        self.in_flight.store(false, Ordering::SeqCst);
        result
    }

    /// Persist the current result. Saving without a summary is a no-op, so
    /// a stale button click can never store an empty card.
    pub fn save_current_result(
        &self,
        store: &SavedDesignStore,
    ) -> Result<Option<SavedDesign>, StoreError> {
        let design = {
            let state = self.state.lock().unwrap();
            match &state.result {
                Some(result) if !result.summary.is_empty() => {
                    SavedDesign::new(&state.form, result)
                }
                _ => return Ok(None),
            }
        };
        store.prepend(design.clone())?;
        Ok(Some(design))
    }
}
