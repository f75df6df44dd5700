mod auth;
mod commands;
mod db;
mod generation;
mod logging;
mod store;
mod workflow;

use db::Database;
use store::SavedDesignStore;
use tauri::Manager;
use workflow::DesignWorkflow;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    logging::init();

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .setup(|app| {
            let app_dir = app.path().app_data_dir()?;
            let database =
                Database::new(&app_dir).expect("Failed to initialize database");
            let designs = SavedDesignStore::open(Box::new(database.clone()));
            app.manage(database);
            app.manage(designs);
            app.manage(DesignWorkflow::new());
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::session::get_session,
            commands::session::login,
            commands::session::signup,
            commands::session::logout,
            commands::settings::get_settings,
            commands::settings::set_setting,
            commands::settings::delete_setting,
            commands::design::get_design_form,
            commands::design::update_design_field,
            commands::design::list_style_presets,
            commands::design::generate_design,
            commands::design::save_design,
            commands::design::list_saved_designs,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
