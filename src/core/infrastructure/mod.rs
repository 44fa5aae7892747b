pub mod app_config;
pub mod io_manager;
pub mod reporter;
