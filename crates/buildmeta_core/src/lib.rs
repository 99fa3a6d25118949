pub mod core_api;
pub mod filters;
pub mod options;
