//! Nurse onboarding: multi-step applicant wizard with local persistence.

pub mod config;
pub mod error;
pub mod onboarding;
pub mod shell;
pub mod store;
