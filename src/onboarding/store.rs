//! WizardStore: the single source of truth for the wizard.
//!
//! Holds the current `ApplicantProfile` plus the two UI flags, applies
//! section patches, drives the step cursor and persists every new profile to
//! local storage. Each mutation replaces the whole profile and publishes it
//! on a watch channel so renderers can react to changes.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::indicator::StepIndicator;
use super::model::{
    ApplicantProfile, EnglishProficiencyPatch, ListField, NclexStatusPatch, PersonalInfoPatch,
    ProfessionalInfoPatch, UsPreferencesPatch, WorkExperiencePatch,
};
use super::state::{Step, can_access, completed_steps};
use super::submission::{SubmissionReceipt, SubmissionSink};
use crate::error::Result;
use crate::store::ProfileStorage;

pub struct WizardStore {
    storage: Arc<dyn ProfileStorage>,
    submission: Arc<dyn SubmissionSink>,
    key: String,
    data: Arc<ApplicantProfile>,
    show_onboarding: bool,
    show_success_modal: bool,
    last_saved_at: Option<DateTime<Utc>>,
    tx: watch::Sender<Arc<ApplicantProfile>>,
}

impl WizardStore {
    /// Rehydrate from `storage`. A missing, unreadable or corrupt snapshot
    /// yields the default profile.
    pub async fn load(
        storage: Arc<dyn ProfileStorage>,
        submission: Arc<dyn SubmissionSink>,
        key: impl Into<String>,
    ) -> Self {
        let key = key.into();
        let data = match storage.load(&key).await {
            Ok(Some(raw)) => ApplicantProfile::restore(&raw),
            Ok(None) => ApplicantProfile::default(),
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to read onboarding snapshot");
                ApplicantProfile::default()
            }
        };
        debug!(key = %key, step = data.current_step, "Onboarding store loaded");

        let data = Arc::new(data);
        let (tx, _) = watch::channel(Arc::clone(&data));
        Self {
            storage,
            submission,
            key,
            data,
            show_onboarding: false,
            show_success_modal: false,
            last_saved_at: None,
            tx,
        }
    }

    pub fn data(&self) -> &ApplicantProfile {
        &self.data
    }

    /// Shared handle to the current profile.
    pub fn snapshot(&self) -> Arc<ApplicantProfile> {
        Arc::clone(&self.data)
    }

    /// Receive every profile the store publishes from now on.
    pub fn subscribe(&self) -> watch::Receiver<Arc<ApplicantProfile>> {
        self.tx.subscribe()
    }

    pub fn show_onboarding(&self) -> bool {
        self.show_onboarding
    }

    pub fn show_success_modal(&self) -> bool {
        self.show_success_modal
    }

    /// Time of the last snapshot write that succeeded.
    pub fn last_saved_at(&self) -> Option<DateTime<Utc>> {
        self.last_saved_at
    }

    pub fn current_step(&self) -> Step {
        self.data.step()
    }

    pub fn completed_steps(&self) -> Vec<usize> {
        completed_steps(&self.data)
    }

    pub fn indicator(&self) -> StepIndicator {
        StepIndicator::new(&self.data)
    }

    // ── Section mutators ────────────────────────────────────────────

    pub async fn update_personal_info(&mut self, patch: PersonalInfoPatch) {
        let next = self.data.with_personal_info(patch);
        self.replace(next).await;
    }

    pub async fn update_professional_info(&mut self, patch: ProfessionalInfoPatch) {
        let next = self.data.with_professional_info(patch);
        self.replace(next).await;
    }

    pub async fn update_work_experience(&mut self, patch: WorkExperiencePatch) {
        let next = self.data.with_work_experience(patch);
        self.replace(next).await;
    }

    pub async fn update_english_proficiency(&mut self, patch: EnglishProficiencyPatch) {
        let next = self.data.with_english_proficiency(patch);
        self.replace(next).await;
    }

    pub async fn update_us_preferences(&mut self, patch: UsPreferencesPatch) {
        let next = self.data.with_us_preferences(patch);
        self.replace(next).await;
    }

    pub async fn update_nclex_status(&mut self, patch: NclexStatusPatch) {
        let next = self.data.with_nclex_status(patch);
        self.replace(next).await;
    }

    /// Remove `value` from the list if present, append it otherwise.
    pub async fn toggle(&mut self, field: ListField, value: &str) {
        let list = self.data.list(field).with_toggled(value);
        let next = self.data.with_list(field, list);
        self.replace(next).await;
    }

    pub async fn add_to_list(&mut self, field: ListField, value: &str) {
        let list = self.data.list(field).with_added(value);
        let next = self.data.with_list(field, list);
        self.replace(next).await;
    }

    pub async fn remove_from_list(&mut self, field: ListField, value: &str) {
        let list = self.data.list(field).with_removed(value);
        let next = self.data.with_list(field, list);
        self.replace(next).await;
    }

    // ── Navigation ──────────────────────────────────────────────────

    pub async fn next_step(&mut self) {
        let next = self.data.with_current_step(self.data.current_step + 1);
        self.replace(next).await;
    }

    pub async fn previous_step(&mut self) {
        let next = self
            .data
            .with_current_step(self.data.current_step.saturating_sub(1));
        self.replace(next).await;
    }

    /// Jump to `index` if it is reachable. Returns whether the cursor moved
    /// (or already sat there).
    pub async fn go_to_step(&mut self, index: usize) -> bool {
        if !can_access(&self.data, index) {
            debug!(index, current = self.data.current_step, "Step jump denied");
            return false;
        }
        if index != self.data.current_step {
            let next = self.data.with_current_step(index);
            self.replace(next).await;
        }
        true
    }

    /// Indicator click: only completed or current steps react.
    pub async fn click_step(&mut self, index: usize) -> bool {
        if !self.indicator().is_clickable(index) {
            return false;
        }
        self.go_to_step(index).await
    }

    // ── Flags and lifecycle ─────────────────────────────────────────

    pub async fn start_onboarding(&mut self) {
        self.show_onboarding = true;
        let next = self.data.with_current_step(0);
        self.replace(next).await;
        info!("Onboarding started");
    }

    pub fn set_show_onboarding(&mut self, show: bool) {
        self.show_onboarding = show;
    }

    pub fn set_show_success_modal(&mut self, show: bool) {
        self.show_success_modal = show;
    }

    /// Hand the profile to the submission sink.
    ///
    /// Only acts on the summary step while no confirmation is open; returns
    /// `Ok(None)` otherwise. On success the persisted snapshot is cleared and
    /// the confirmation opens. A sink error leaves everything as it was.
    pub async fn handle_submit(&mut self) -> Result<Option<SubmissionReceipt>> {
        if self.current_step() != Step::Summary || self.show_success_modal {
            debug!(step = %self.current_step(), "Submit ignored");
            return Ok(None);
        }

        let receipt = self.submission.submit(&self.data).await?;
        info!(submission_id = %receipt.id, "Application accepted");

        self.clear_storage().await;
        self.show_success_modal = true;
        Ok(Some(receipt))
    }

    /// Close the confirmation and start over from a blank profile.
    pub async fn handle_success_modal_close(&mut self) {
        self.reset_data().await;
    }

    /// Discard all answers and the persisted snapshot, and hide the wizard
    /// and the confirmation.
    pub async fn reset_data(&mut self) {
        self.show_onboarding = false;
        self.show_success_modal = false;
        self.publish(ApplicantProfile::default());
        self.clear_storage().await;
        self.last_saved_at = None;
    }

    // ── Internals ───────────────────────────────────────────────────

    async fn replace(&mut self, next: ApplicantProfile) {
        self.publish(next);
        self.persist().await;
    }

    fn publish(&mut self, next: ApplicantProfile) {
        self.data = Arc::new(next);
        self.tx.send_replace(Arc::clone(&self.data));
    }

    /// Write the current profile. Failures are logged and dropped.
    async fn persist(&mut self) {
        let raw = match self.data.to_snapshot() {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "Failed to serialize onboarding snapshot");
                return;
            }
        };
        match self.storage.save(&self.key, &raw).await {
            Ok(()) => self.last_saved_at = Some(Utc::now()),
            Err(e) => warn!(key = %self.key, error = %e, "Failed to persist onboarding snapshot"),
        }
    }

    async fn clear_storage(&self) {
        if let Err(e) = self.storage.remove(&self.key).await {
            warn!(key = %self.key, error = %e, "Failed to clear onboarding snapshot");
        }
    }
}
