//! Contact submissions: the stored record and the inbound form

pub mod model;
pub mod validation;

pub use model::{ContactRecord, ContactSubmission, NewContact};
pub use validation::{validate_email_shape, validate_submission, SubmissionError, REQUIRED_FIELDS};
