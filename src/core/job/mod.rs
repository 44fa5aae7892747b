pub mod job_store;
pub mod preference_store;
