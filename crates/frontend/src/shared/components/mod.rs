pub mod card_animated;
pub mod page_header;
pub mod pagination_controls;
pub mod ui;

pub use card_animated::CardAnimated;
pub use page_header::PageHeader;
pub use pagination_controls::PaginationControls;
