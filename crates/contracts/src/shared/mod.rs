pub mod debounce;
pub mod error;
pub mod list_query;
pub mod record;
pub mod record_view;
pub mod reference;
pub mod reference_cache;
pub mod report_source;
