//! Onboarding wizard: step sequence, applicant profile and screen state.
//!
//! The wizard walks a nurse applicant through six data sections and a
//! summary. `WizardStore` owns the profile and persists it after every
//! change; the screens read their section from it and report whether the
//! applicant may continue.

pub mod debounce;
pub mod form;
pub mod indicator;
pub mod model;
pub mod screens;
pub mod state;
pub mod store;
pub mod submission;
pub mod validation;

pub use form::PersonalInfoForm;
pub use indicator::{IndicatorEntry, StepIndicator, StepStatus};
pub use model::{ApplicantProfile, ListField, ToggleList};
pub use screens::StepChrome;
pub use state::Step;
pub use store::WizardStore;
pub use submission::{LogSubmission, SubmissionReceipt, SubmissionSink};
pub use validation::{FieldError, PersonalField};
