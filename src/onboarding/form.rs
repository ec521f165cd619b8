//! Interactive state of the personal information screen.
//!
//! Tracks which fields were blurred, the inline error on display per field,
//! and one debounce timer per field. Values themselves live in the store;
//! every method that validates reads them from the `PersonalInfo` it is given.

use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

use chrono::{Local, NaiveDate};

use super::debounce::FieldTimers;
use super::model::{ApplicantProfile, PersonalInfo};
use super::screens;
use super::state::Step;
use super::store::WizardStore;
use super::validation::{FieldError, PersonalField, personal_info_is_valid, validate_field};

#[derive(Debug)]
pub struct PersonalInfoForm {
    touched: BTreeSet<PersonalField>,
    errors: BTreeMap<PersonalField, FieldError>,
    timers: FieldTimers<PersonalField>,
    today: Option<NaiveDate>,
}

impl PersonalInfoForm {
    pub fn new(debounce: Duration) -> Self {
        Self {
            touched: BTreeSet::new(),
            errors: BTreeMap::new(),
            timers: FieldTimers::new(debounce),
            today: None,
        }
    }

    /// Pin the date used for the age check instead of the local clock.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    /// The applicant typed into `field`.
    ///
    /// The value goes straight to the store. Validation is deferred by the
    /// debounce delay, and only scheduled for fields already blurred once or
    /// for the birth date.
    pub async fn change(&mut self, store: &mut WizardStore, field: PersonalField, value: String) {
        store.update_personal_info(field.patch(value)).await;
        if self.touched.contains(&field) || field.validates_untouched() {
            self.timers.arm(field);
        }
    }

    /// The applicant left `field`: mark it touched and validate right away.
    pub fn blur(&mut self, info: &PersonalInfo, field: PersonalField) {
        self.touched.insert(field);
        self.timers.cancel(field);
        self.validate(info, field);
    }

    /// Focusing a field hides its error, except for the birth date.
    pub fn focus(&mut self, field: PersonalField) {
        if !field.validates_untouched() {
            self.errors.remove(&field);
        }
    }

    /// Re-run the rule for `field` against its current value.
    pub fn validate(&mut self, info: &PersonalInfo, field: PersonalField) {
        match validate_field(field, field.value(info), self.today()) {
            Some(error) => {
                self.errors.insert(field, error);
            }
            None => {
                self.errors.remove(&field);
            }
        }
    }

    pub fn apply_expired(&mut self, info: &PersonalInfo, fields: &[PersonalField]) {
        for field in fields {
            self.validate(info, *field);
        }
    }

    pub fn has_pending(&self) -> bool {
        !self.timers.is_empty()
    }

    /// Wait for the next debounce deadline. Cancel-safe.
    pub async fn next_expiry(&mut self) -> Vec<PersonalField> {
        self.timers.expired().await
    }

    /// Run every pending debounce to completion against `store`'s values.
    pub async fn settle(&mut self, store: &WizardStore) {
        while self.has_pending() {
            let fired = self.timers.expired().await;
            self.apply_expired(&store.data().personal_info, &fired);
        }
    }

    pub fn is_validating(&self, field: PersonalField) -> bool {
        self.timers.is_pending(field)
    }

    pub fn is_touched(&self, field: PersonalField) -> bool {
        self.touched.contains(&field)
    }

    pub fn error(&self, field: PersonalField) -> Option<FieldError> {
        self.errors.get(&field).copied()
    }

    pub fn errors(&self) -> impl Iterator<Item = (PersonalField, FieldError)> + '_ {
        self.errors.iter().map(|(field, error)| (*field, *error))
    }

    /// Touched, filled in and currently without error.
    pub fn is_success(&self, info: &PersonalInfo, field: PersonalField) -> bool {
        self.is_touched(field) && self.error(field).is_none() && !field.value(info).is_empty()
    }

    /// Every field passes its rule and nothing is flagged on screen.
    pub fn can_go_next(&self, info: &PersonalInfo) -> bool {
        self.errors.is_empty() && personal_info_is_valid(info, self.today())
    }

    pub fn completion_percentage(&self, profile: &ApplicantProfile) -> f32 {
        screens::completion_percentage(Step::PersonalInfo, profile)
    }

    /// Drop pending timers without validating, for when the screen goes away.
    pub fn cancel_pending(&mut self) {
        self.timers.cancel_all();
    }

    /// Forget all interaction state, including pending timers.
    pub fn reset(&mut self) {
        self.touched.clear();
        self.errors.clear();
        self.timers.cancel_all();
    }
}
