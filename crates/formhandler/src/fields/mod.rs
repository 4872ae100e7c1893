//! Shorthand constructors for common fields.

mod checkbox;
mod hidden;
mod select;
mod text;

pub use checkbox::{checkbox_field, switch_field};
pub use hidden::hidden_field;
pub use select::{multiple_select_field, radio_field, select_field};
pub use text::{date_field, email_field, password_field, text_field, textarea_field, url_field};
