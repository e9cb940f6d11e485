pub mod checkbox;
pub mod input;
pub mod select;
pub mod textarea;

pub use checkbox::{CheckboxGroup, ReadonlyCheckbox};
pub use input::Input;
pub use select::Select;
pub use textarea::Textarea;
