use crate::db::Database;
use crate::generation::{DesignResult, GenerationBackend, HttpGenerator};
use crate::store::{SavedDesign, SavedDesignStore};
use crate::workflow::{DesignForm, DesignWorkflow, STYLE_PRESETS};
use tauri::State;

/// Settings key holding the design generation backend base URL.
const BACKEND_URL_KEY: &str = "backend_url";

fn resolve_generator(db: &Database) -> Option<HttpGenerator> {
    db.get_setting(BACKEND_URL_KEY)
        .ok()
        .flatten()
        .filter(|url| !url.is_empty())
        .map(HttpGenerator::new)
}

#[tauri::command]
pub fn get_design_form(workflow: State<'_, DesignWorkflow>) -> Result<DesignForm, String> {
    Ok(workflow.form())
}

#[tauri::command]
pub fn list_style_presets() -> Vec<String> {
    STYLE_PRESETS.iter().map(|s| s.to_string()).collect()
}

#[tauri::command]
pub fn update_design_field(
    workflow: State<'_, DesignWorkflow>,
    name: String,
    value: String,
) -> Result<(), String> {
    workflow.update_field(&name, value)
}

#[tauri::command]
pub async fn generate_design(
    workflow: State<'_, DesignWorkflow>,
    db: State<'_, Database>,
) -> Result<DesignResult, String> {
    let generator = resolve_generator(&db);
    let backend = generator.as_ref().map(|g| g as &dyn GenerationBackend);
    workflow.submit(backend).await.map_err(|e| e.to_string())
}

#[tauri::command]
pub fn save_design(
    workflow: State<'_, DesignWorkflow>,
    store: State<'_, SavedDesignStore>,
) -> Result<Vec<SavedDesign>, String> {
    workflow
        .save_current_result(&store)
        .map_err(|e| e.to_string())?;
    Ok(store.list())
}

#[tauri::command]
pub fn list_saved_designs(store: State<'_, SavedDesignStore>) -> Result<Vec<SavedDesign>, String> {
    Ok(store.list())
}
