pub mod atomic_file;
pub mod instance_lock;
pub mod logging;
pub mod temp_file_guard;
