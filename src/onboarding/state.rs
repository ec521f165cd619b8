//! Wizard step sequence and the loose completion rule.

use super::model::ApplicantProfile;

/// The screens of the wizard, in order.
///
/// Progresses linearly: PersonalInfo → ProfessionalInfo → WorkExperience →
/// EnglishProficiency → UsPreferences → NclexStatus → Summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Step {
    PersonalInfo,
    ProfessionalInfo,
    WorkExperience,
    EnglishProficiency,
    UsPreferences,
    NclexStatus,
    Summary,
}

impl Step {
    pub const ORDER: [Step; 7] = [
        Step::PersonalInfo,
        Step::ProfessionalInfo,
        Step::WorkExperience,
        Step::EnglishProficiency,
        Step::UsPreferences,
        Step::NclexStatus,
        Step::Summary,
    ];

    pub const COUNT: usize = Self::ORDER.len();

    pub const FIRST: Step = Step::PersonalInfo;

    pub const LAST: Step = Step::Summary;

    /// 0-based position in [`Step::ORDER`].
    pub fn index(&self) -> usize {
        match self {
            Self::PersonalInfo => 0,
            Self::ProfessionalInfo => 1,
            Self::WorkExperience => 2,
            Self::EnglishProficiency => 3,
            Self::UsPreferences => 4,
            Self::NclexStatus => 5,
            Self::Summary => 6,
        }
    }

    pub fn from_index(index: usize) -> Option<Step> {
        Self::ORDER.get(index).copied()
    }

    /// Get the next step in the linear progression, if any.
    pub fn next(&self) -> Option<Step> {
        Self::from_index(self.index() + 1)
    }

    pub fn previous(&self) -> Option<Step> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }

    pub fn is_last(&self) -> bool {
        *self == Self::LAST
    }

    /// Short title used by the step indicator.
    pub fn title(&self) -> &'static str {
        match self {
            Self::PersonalInfo => "Personal",
            Self::ProfessionalInfo => "Profesional",
            Self::WorkExperience => "Experiencia",
            Self::EnglishProficiency => "Inglés",
            Self::UsPreferences => "Preferencias",
            Self::NclexStatus => "NCLEX-RN",
            Self::Summary => "Resumen",
        }
    }

    /// Loose "enough to move on" completion for this step's section.
    ///
    /// Only gates which steps can be jumped to. It checks a
    /// smaller field set than the screen's own `can_go_next`:
    ///
    /// - PersonalInfo: first name, last name, email
    /// - ProfessionalInfo: degree, graduation year
    /// - WorkExperience: hospital name, position
    /// - EnglishProficiency: speaking and listening level
    /// - UsPreferences: at least one preferred state, start date
    /// - NclexStatus: plan and study timeframe
    /// - Summary: never complete
    pub fn is_complete(&self, profile: &ApplicantProfile) -> bool {
        match self {
            Self::PersonalInfo => {
                let p = &profile.personal_info;
                !p.first_name.is_empty() && !p.last_name.is_empty() && !p.email.is_empty()
            }
            Self::ProfessionalInfo => {
                let p = &profile.professional_info;
                !p.nursing_degree.is_empty() && !p.graduation_year.is_empty()
            }
            Self::WorkExperience => {
                let w = &profile.work_experience;
                !w.hospital_name.is_empty() && !w.position.is_empty()
            }
            Self::EnglishProficiency => {
                let e = &profile.english_proficiency;
                e.speaking_level.is_some() && e.listening_level.is_some()
            }
            Self::UsPreferences => {
                let u = &profile.us_preferences;
                !u.preferred_states.is_empty() && u.start_date.is_some()
            }
            Self::NclexStatus => {
                let n = &profile.nclex_status;
                n.plan_to_take.is_some() && n.study_timeframe.is_some()
            }
            Self::Summary => false,
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::PersonalInfo => "personal_info",
            Self::ProfessionalInfo => "professional_info",
            Self::WorkExperience => "work_experience",
            Self::EnglishProficiency => "english_proficiency",
            Self::UsPreferences => "us_preferences",
            Self::NclexStatus => "nclex_status",
            Self::Summary => "summary",
        };
        write!(f, "{s}")
    }
}

/// Indices of every loosely complete step, ascending.
pub fn completed_steps(profile: &ApplicantProfile) -> Vec<usize> {
    Step::ORDER
        .iter()
        .filter(|step| step.is_complete(profile))
        .map(Step::index)
        .collect()
}

/// Whether the cursor may jump to `index`: the first step, the current step,
/// or any step whose predecessor is loosely complete.
pub fn can_access(profile: &ApplicantProfile, index: usize) -> bool {
    if index >= Step::COUNT {
        return false;
    }
    if index == 0 || index == profile.current_step {
        return true;
    }
    Step::from_index(index - 1).is_some_and(|prev| prev.is_complete(profile))
}
