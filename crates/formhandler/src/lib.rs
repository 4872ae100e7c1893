//! # formhandler
//!
//! Server-side form construction, validation and Bootstrap 5 rendering.
//!
//! This crate provides:
//! - Fields (text, email, date, select, ...) collected in a [`Form`]
//! - Validators attached to fields and evaluated once per submission
//! - A flush step that binds submitted input, validates and renders
//! - Injectable message catalogs and DNS resolvers
//!
//! ## Quick Start
//!
//! ```rust
//! use formhandler::{fields, Field, Form, Submission};
//! use formhandler::validation::DateValidator;
//!
//! let mut form = Form::new("signup").action("/signup");
//! form.add_field(fields::text_field("username", "Username", 150, true)).unwrap();
//! form.add_field(fields::email_field("email", "Email", true)).unwrap();
//! form.add_field(
//!     Field::text("start", "Start month")
//!         .help_text("e.g. March 2024")
//!         .validator(DateValidator::new().required(false)),
//! ).unwrap();
//!
//! // A request body as the browser would send it.
//! let body = "signup_submit=1&username=jane&email=jane%40example.com&start=March+2024";
//! let html = form.flush(&Submission::from_urlencoded(body).unwrap()).unwrap();
//!
//! assert!(form.is_processed());
//! assert!(html.contains(r#"name="signup_submit""#));
//! ```
//!
//! ## Validation
//!
//! Validators answer `Ok(false)` for bad input and keep a message for
//! display; they return an error only when misused, e.g. when a list is
//! handed to a scalar-only rule.
//!
//! ```rust
//! use formhandler::{fields, Form, FormError, Submission};
//!
//! let mut form = Form::new("contact");
//! form.add_field(fields::email_field("email", "Email", true)).unwrap();
//!
//! let bad = Submission::new().with("contact_submit", "1").with("email", "nope");
//! form.flush(&bad).unwrap();
//! assert_eq!(
//!     form.errors().get("email"),
//!     Some(&vec!["Invalid email address.".to_string()]),
//! );
//!
//! let mut form = Form::new("contact");
//! form.add_field(fields::email_field("email", "Email", true)).unwrap();
//! let misuse = Submission::new()
//!     .with("contact_submit", "1")
//!     .with("email", vec!["a".to_string(), "b".to_string()]);
//! assert!(matches!(form.flush(&misuse), Err(FormError::ScalarRequired { .. })));
//! ```
//!
//! ## Widgets
//!
//! Available Bootstrap 5 widgets:
//! - `BootstrapTextInput` - Text, email, password, number, date inputs
//! - `BootstrapTextarea` - Multi-line text input
//! - `BootstrapSelect` - Dropdown select, single or multiple
//! - `BootstrapCheckbox` - Checkbox with optional switch style
//! - `BootstrapRadioSelect` - Radio button group

mod config;
pub mod date;
pub mod dns;
mod error;
mod field;
pub mod fields;
mod form;
pub mod messages;
mod submission;
pub mod validation;
mod value;
pub mod widgets;

pub use config::FormConfig;
pub use error::{FormError, Result, ValidationErrors};
pub use field::Field;
pub use form::{render_bootstrap_field, render_bootstrap_form, Form, NON_FIELD_ERRORS};
pub use submission::Submission;
pub use validation::{FieldId, Validator, Verdict};
pub use value::FieldValue;
