//! Step indicator view model.

use super::model::ApplicantProfile;
use super::state::{Step, completed_steps};

/// Display state of one step in the indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Pending,
    Current,
    Completed,
}

/// One row of the indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndicatorEntry {
    pub step: Step,
    pub status: StepStatus,
    pub clickable: bool,
}

/// Snapshot of the indicator for a given profile.
///
/// A step counts as completed when it passes the loose completion rule or
/// when the cursor has already moved past it, so visited steps always look
/// done even if the applicant has since cleared a field.
#[derive(Debug, Clone)]
pub struct StepIndicator {
    current: usize,
    completed: Vec<usize>,
}

impl StepIndicator {
    pub fn new(profile: &ApplicantProfile) -> Self {
        Self {
            current: profile.current_step,
            completed: completed_steps(profile),
        }
    }

    pub fn is_completed(&self, index: usize) -> bool {
        self.completed.contains(&index) || index < self.current
    }

    pub fn status(&self, index: usize) -> StepStatus {
        if index == self.current {
            StepStatus::Current
        } else if self.is_completed(index) {
            StepStatus::Completed
        } else {
            StepStatus::Pending
        }
    }

    /// Completed steps and the current step accept clicks.
    pub fn is_clickable(&self, index: usize) -> bool {
        index < Step::COUNT && (self.is_completed(index) || index == self.current)
    }

    /// Share of the sequence reached, counting the current step.
    pub fn progress_percentage(&self) -> f32 {
        (self.current + 1) as f32 / Step::COUNT as f32 * 100.0
    }

    pub fn entries(&self) -> Vec<IndicatorEntry> {
        Step::ORDER
            .iter()
            .map(|step| IndicatorEntry {
                step: *step,
                status: self.status(step.index()),
                clickable: self.is_clickable(step.index()),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::onboarding::model::{PersonalInfoPatch, ProfessionalInfoPatch};

    #[test]
    fn fresh_profile_shows_only_the_first_step_current() {
        let indicator = StepIndicator::new(&ApplicantProfile::default());
        let entries = indicator.entries();
        assert_eq!(entries[0].status, StepStatus::Current);
        assert!(entries[0].clickable);
        assert!(entries[1..].iter().all(|e| e.status == StepStatus::Pending && !e.clickable));
    }

    #[test]
    fn passed_steps_show_completed_even_when_empty() {
        let profile = ApplicantProfile::default().with_current_step(3);
        let indicator = StepIndicator::new(&profile);

        for i in 0..3 {
            assert_eq!(indicator.status(i), StepStatus::Completed);
            assert!(indicator.is_clickable(i));
        }
        assert_eq!(indicator.status(3), StepStatus::Current);
        assert_eq!(indicator.status(4), StepStatus::Pending);
        assert!(!indicator.is_clickable(4));
    }

    #[test]
    fn loosely_complete_steps_ahead_of_cursor_are_clickable() {
        let profile = ApplicantProfile::default().with_professional_info(ProfessionalInfoPatch {
            nursing_degree: Some("tecnico".to_string()),
            graduation_year: Some("2019".to_string()),
            ..Default::default()
        });
        let indicator = StepIndicator::new(&profile);
        assert_eq!(indicator.status(1), StepStatus::Completed);
        assert!(indicator.is_clickable(1));
        assert!(!indicator.is_clickable(2));
    }

    #[test]
    fn current_step_wins_over_completed() {
        let profile = ApplicantProfile::default().with_personal_info(PersonalInfoPatch {
            first_name: Some("Ana".to_string()),
            last_name: Some("Ruiz".to_string()),
            email: Some("ana@x.com".to_string()),
            ..Default::default()
        });
        assert_eq!(StepIndicator::new(&profile).status(0), StepStatus::Current);
    }

    #[test]
    fn progress_counts_the_current_step() {
        let first = StepIndicator::new(&ApplicantProfile::default());
        assert!((first.progress_percentage() - 100.0 / 7.0).abs() < 1e-4);

        let last = StepIndicator::new(&ApplicantProfile::default().with_current_step(6));
        assert!((last.progress_percentage() - 100.0).abs() < 1e-4);
    }

    #[test]
    fn out_of_range_is_never_clickable() {
        let indicator = StepIndicator::new(&ApplicantProfile::default().with_current_step(6));
        assert!(!indicator.is_clickable(Step::COUNT));
    }
}
