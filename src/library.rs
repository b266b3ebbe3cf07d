pub mod delayed_task;
pub mod logger;
