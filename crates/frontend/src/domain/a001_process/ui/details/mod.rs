//! Форма процесса (MVVM):
//! - view_model.rs: команды и производные значения поверх `ProcessFormController`
//! - page.rs: модальное окно
//! - tabs: поля по вкладкам

mod page;
mod tabs;
mod view_model;

pub use page::ProcessFormModal;
pub use view_model::ProcessFormVm;
