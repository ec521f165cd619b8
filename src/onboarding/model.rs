//! Applicant profile data model.
//!
//! `ApplicantProfile` is the aggregate the wizard collects: six sections plus
//! the step cursor. It is treated as an immutable value. Every mutator returns
//! a new root with exactly one section replaced, which is what lets the store
//! publish whole snapshots to its subscribers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::state::Step;
use crate::error::ChoiceError;

/// Declares a closed set of options stored as their wire string.
///
/// Generates the enum with per-variant serde renames, an `ALL` table, the
/// wire value (`as_str`), the Spanish label, `Display` and `FromStr`.
macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident ($kind:literal) {
            $( $variant:ident => $wire:literal, $label:literal; )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( #[serde(rename = $wire)] $variant, )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Value as written to the persisted snapshot.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $wire, )+
                }
            }

            /// Label shown to the applicant.
            pub fn label(&self) -> &'static str {
                match self {
                    $( Self::$variant => $label, )+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ChoiceError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|choice| choice.as_str() == s)
                    .ok_or_else(|| ChoiceError {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }
    };
}

/// Declares a profile section together with its patch type.
///
/// Each field carries its default value. The patch mirrors the section with
/// every field optional, and `merged` applies it as a shallow merge.
macro_rules! section {
    (
        $(#[$meta:meta])*
        pub struct $name:ident, $patch:ident {
            $( $(#[$fmeta:meta])* $field:ident : $ty:ty = $default:expr ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase", default)]
        pub struct $name {
            $( $(#[$fmeta])* pub $field: $ty, )+
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    $( $field: $default, )+
                }
            }
        }

        #[doc = concat!("Partial update for [`", stringify!($name), "`]. `None` keeps the current value.")]
        #[derive(Debug, Clone, Default, PartialEq, Eq)]
        pub struct $patch {
            $( pub $field: Option<$ty>, )+
        }

        impl $name {
            /// Shallow-merge `patch` into a copy of this section.
            pub fn merged(&self, patch: $patch) -> Self {
                Self {
                    $( $field: patch.$field.unwrap_or_else(|| self.$field.clone()), )+
                }
            }
        }
    };
}

choice_enum! {
    /// Self-assessed English level for one skill.
    pub enum ProficiencyLevel ("proficiency level") {
        Basic => "basico", "Básico";
        Intermediate => "intermedio", "Intermedio";
        Advanced => "avanzado", "Avanzado";
        Native => "nativo", "Nativo o Casi Nativo";
    }
}

choice_enum! {
    /// Outcome of a previous NCLEX-RN attempt.
    pub enum NclexResult ("NCLEX result") {
        Passed => "aprobado", "Aprobado";
        Failed => "no-aprobado", "No aprobado";
        Pending => "pendiente", "Resultado pendiente";
    }
}

choice_enum! {
    /// When the applicant plans to sit the NCLEX-RN.
    pub enum NclexPlan ("NCLEX plan") {
        TakeSoon => "tomar-pronto", "Quiero tomarlo lo antes posible";
        Study3Months => "estudiar-3-meses", "Necesito 3 meses de preparación";
        Study6Months => "estudiar-6-meses", "Necesito 6 meses de preparación";
        StudyOver6Months => "estudiar-mas-6-meses", "Necesito más de 6 meses de preparación";
        AlreadyPassed => "ya-aprobado", "Ya lo aprobé";
        Retake => "retomar", "Necesito retomarlo";
    }
}

choice_enum! {
    /// Study time the applicant expects to need.
    pub enum StudyTimeframe ("study timeframe") {
        OneToThreeMonths => "1-3-meses", "1-3 meses";
        ThreeToSixMonths => "3-6-meses", "3-6 meses";
        SixToTwelveMonths => "6-12-meses", "6-12 meses";
        OverTwelveMonths => "mas-12-meses", "Más de 12 meses";
        Completed => "ya-completado", "Ya completado";
    }
}

choice_enum! {
    /// Desired start date bucket for a US position.
    pub enum StartDate ("start date") {
        Immediately => "inmediato", "Inmediatamente (ya tengo visa)";
        OneToThreeMonths => "1-3-meses", "En 1-3 meses";
        ThreeToSixMonths => "3-6-meses", "En 3-6 meses";
        SixToTwelveMonths => "6-12-meses", "En 6-12 meses";
        OverTwelveMonths => "mas-12-meses", "Más de 12 meses";
    }
}

choice_enum! {
    /// Expected yearly salary bucket (USD).
    pub enum SalaryRange ("salary range") {
        From50kTo60k => "50000-60000", "$50,000 - $60,000";
        From60kTo70k => "60000-70000", "$60,000 - $70,000";
        From70kTo80k => "70000-80000", "$70,000 - $80,000";
        From80kTo90k => "80000-90000", "$80,000 - $90,000";
        From90kTo100k => "90000-100000", "$90,000 - $100,000";
        From100kTo120k => "100000-120000", "$100,000 - $120,000";
        Over120k => "120000+", "$120,000+";
    }
}

/// Serde adapter for optional choices: `None` is written as `""` and an empty
/// string reads back as `None`.
mod blank_as_none {
    use serde::de::IntoDeserializer;
    use serde::de::value::StrDeserializer;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Serialize,
        S: Serializer,
    {
        match value {
            Some(v) => v.serialize(serializer),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref() {
            None | Some("") => Ok(None),
            Some(s) => {
                let de: StrDeserializer<'_, D::Error> = s.into_deserializer();
                T::deserialize(de).map(Some)
            }
        }
    }
}

/// Order-preserving list without duplicates, mutated by add/remove.
///
/// Decoding keeps the first occurrence of any repeated entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct ToggleList(Vec<String>);

impl ToggleList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, value: &str) -> bool {
        self.0.iter().any(|v| v == value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Copy with `value` appended, unless already present.
    pub fn with_added(&self, value: &str) -> Self {
        let mut items = self.0.clone();
        if !self.contains(value) {
            items.push(value.to_string());
        }
        Self(items)
    }

    /// Copy with `value` filtered out.
    pub fn with_removed(&self, value: &str) -> Self {
        Self(self.0.iter().filter(|v| *v != value).cloned().collect())
    }

    /// Remove `value` if present, append it otherwise.
    pub fn with_toggled(&self, value: &str) -> Self {
        if self.contains(value) {
            self.with_removed(value)
        } else {
            self.with_added(value)
        }
    }
}

impl From<Vec<String>> for ToggleList {
    fn from(values: Vec<String>) -> Self {
        let mut items: Vec<String> = Vec::with_capacity(values.len());
        for value in values {
            if !items.contains(&value) {
                items.push(value);
            }
        }
        Self(items)
    }
}

impl From<ToggleList> for Vec<String> {
    fn from(list: ToggleList) -> Self {
        list.0
    }
}

impl<S: Into<String>> FromIterator<S> for ToggleList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from(iter.into_iter().map(Into::into).collect::<Vec<String>>())
    }
}

section! {
    /// Identity and contact details.
    pub struct PersonalInfo, PersonalInfoPatch {
        first_name: String = String::new(),
        last_name: String = String::new(),
        email: String = String::new(),
        phone: String = String::new(),
        /// `YYYY-MM-DD`, as produced by a date input.
        date_of_birth: String = String::new(),
        nationality: String = String::new(),
        current_country: String = String::new(),
        current_city: String = String::new(),
    }
}

section! {
    /// Nursing education and licensing.
    pub struct ProfessionalInfo, ProfessionalInfoPatch {
        nursing_degree: String = String::new(),
        graduation_year: String = String::new(),
        nursing_school: String = String::new(),
        nursing_license: String = String::new(),
        license_expiry: String = String::new(),
        specializations: ToggleList = ToggleList::new(),
        years_of_experience: String = String::new(),
    }
}

section! {
    /// Current or most recent nursing position.
    pub struct WorkExperience, WorkExperiencePatch {
        currently_working: bool = true,
        hospital_name: String = String::new(),
        position: String = String::new(),
        start_date: String = String::new(),
        end_date: String = String::new(),
        responsibilities: String = String::new(),
        clinical_areas: ToggleList = ToggleList::new(),
    }
}

section! {
    /// English skills and test certificates.
    pub struct EnglishProficiency, EnglishProficiencyPatch {
        #[serde(with = "blank_as_none")]
        speaking_level: Option<ProficiencyLevel> = None,
        #[serde(with = "blank_as_none")]
        listening_level: Option<ProficiencyLevel> = None,
        #[serde(with = "blank_as_none")]
        reading_level: Option<ProficiencyLevel> = None,
        #[serde(with = "blank_as_none")]
        writing_level: Option<ProficiencyLevel> = None,
        #[serde(rename = "hasIELTS")]
        has_ielts: bool = false,
        ielts_score: String = String::new(),
        #[serde(rename = "hasTOEFL")]
        has_toefl: bool = false,
        toefl_score: String = String::new(),
        willing_to_take_test: bool = true,
    }
}

section! {
    /// Where and how the applicant wants to work in the US.
    pub struct UsPreferences, UsPreferencesPatch {
        preferred_states: ToggleList = ToggleList::new(),
        hospital_types: ToggleList = ToggleList::new(),
        work_settings: ToggleList = ToggleList::new(),
        shift_preferences: ToggleList = ToggleList::new(),
        #[serde(with = "blank_as_none")]
        start_date: Option<StartDate> = None,
        #[serde(with = "blank_as_none")]
        salary_expectations: Option<SalaryRange> = None,
    }
}

section! {
    /// NCLEX-RN exam situation and study plan.
    pub struct NclexStatus, NclexStatusPatch {
        #[serde(rename = "hasTakenNCLEX")]
        has_taken_nclex: bool = false,
        #[serde(with = "blank_as_none")]
        nclex_result: Option<NclexResult> = None,
        #[serde(with = "blank_as_none")]
        plan_to_take: Option<NclexPlan> = None,
        #[serde(with = "blank_as_none")]
        study_timeframe: Option<StudyTimeframe> = None,
        needs_support: bool = true,
        study_materials: ToggleList = ToggleList::new(),
    }
}

/// The list-valued fields of the profile, addressable for toggle operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListField {
    Specializations,
    ClinicalAreas,
    PreferredStates,
    HospitalTypes,
    WorkSettings,
    ShiftPreferences,
    StudyMaterials,
}

impl ListField {
    pub const ALL: [ListField; 7] = [
        ListField::Specializations,
        ListField::ClinicalAreas,
        ListField::PreferredStates,
        ListField::HospitalTypes,
        ListField::WorkSettings,
        ListField::ShiftPreferences,
        ListField::StudyMaterials,
    ];

    /// The step whose section owns this list.
    pub fn step(&self) -> Step {
        match self {
            Self::Specializations => Step::ProfessionalInfo,
            Self::ClinicalAreas => Step::WorkExperience,
            Self::PreferredStates
            | Self::HospitalTypes
            | Self::WorkSettings
            | Self::ShiftPreferences => Step::UsPreferences,
            Self::StudyMaterials => Step::NclexStatus,
        }
    }

    /// Field name in the snapshot.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::Specializations => "specializations",
            Self::ClinicalAreas => "clinicalAreas",
            Self::PreferredStates => "preferredStates",
            Self::HospitalTypes => "hospitalTypes",
            Self::WorkSettings => "workSettings",
            Self::ShiftPreferences => "shiftPreferences",
            Self::StudyMaterials => "studyMaterials",
        }
    }

    pub fn from_wire_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.wire_name() == name)
    }
}

/// One applicant's answers plus the wizard cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicantProfile {
    pub personal_info: PersonalInfo,
    pub professional_info: ProfessionalInfo,
    pub work_experience: WorkExperience,
    pub english_proficiency: EnglishProficiency,
    pub us_preferences: UsPreferences,
    pub nclex_status: NclexStatus,
    /// Index into [`Step::ORDER`]; always `< Step::COUNT`.
    pub current_step: usize,
}

impl ApplicantProfile {
    pub fn with_personal_info(&self, patch: PersonalInfoPatch) -> Self {
        Self {
            personal_info: self.personal_info.merged(patch),
            ..self.clone()
        }
    }

    pub fn with_professional_info(&self, patch: ProfessionalInfoPatch) -> Self {
        Self {
            professional_info: self.professional_info.merged(patch),
            ..self.clone()
        }
    }

    pub fn with_work_experience(&self, patch: WorkExperiencePatch) -> Self {
        Self {
            work_experience: self.work_experience.merged(patch),
            ..self.clone()
        }
    }

    pub fn with_english_proficiency(&self, patch: EnglishProficiencyPatch) -> Self {
        Self {
            english_proficiency: self.english_proficiency.merged(patch),
            ..self.clone()
        }
    }

    pub fn with_us_preferences(&self, patch: UsPreferencesPatch) -> Self {
        Self {
            us_preferences: self.us_preferences.merged(patch),
            ..self.clone()
        }
    }

    pub fn with_nclex_status(&self, patch: NclexStatusPatch) -> Self {
        Self {
            nclex_status: self.nclex_status.merged(patch),
            ..self.clone()
        }
    }

    /// Copy with the cursor moved to `step`, clamped to the last step.
    pub fn with_current_step(&self, step: usize) -> Self {
        Self {
            current_step: step.min(Step::COUNT - 1),
            ..self.clone()
        }
    }

    pub fn list(&self, field: ListField) -> &ToggleList {
        match field {
            ListField::Specializations => &self.professional_info.specializations,
            ListField::ClinicalAreas => &self.work_experience.clinical_areas,
            ListField::PreferredStates => &self.us_preferences.preferred_states,
            ListField::HospitalTypes => &self.us_preferences.hospital_types,
            ListField::WorkSettings => &self.us_preferences.work_settings,
            ListField::ShiftPreferences => &self.us_preferences.shift_preferences,
            ListField::StudyMaterials => &self.nclex_status.study_materials,
        }
    }

    /// Copy with one list field replaced, routed through its section's patch.
    pub fn with_list(&self, field: ListField, list: ToggleList) -> Self {
        match field {
            ListField::Specializations => self.with_professional_info(ProfessionalInfoPatch {
                specializations: Some(list),
                ..Default::default()
            }),
            ListField::ClinicalAreas => self.with_work_experience(WorkExperiencePatch {
                clinical_areas: Some(list),
                ..Default::default()
            }),
            ListField::PreferredStates => self.with_us_preferences(UsPreferencesPatch {
                preferred_states: Some(list),
                ..Default::default()
            }),
            ListField::HospitalTypes => self.with_us_preferences(UsPreferencesPatch {
                hospital_types: Some(list),
                ..Default::default()
            }),
            ListField::WorkSettings => self.with_us_preferences(UsPreferencesPatch {
                work_settings: Some(list),
                ..Default::default()
            }),
            ListField::ShiftPreferences => self.with_us_preferences(UsPreferencesPatch {
                shift_preferences: Some(list),
                ..Default::default()
            }),
            ListField::StudyMaterials => self.with_nclex_status(NclexStatusPatch {
                study_materials: Some(list),
                ..Default::default()
            }),
        }
    }

    /// The step the cursor points at.
    pub fn step(&self) -> Step {
        Step::from_index(self.current_step).unwrap_or(Step::LAST)
    }

    /// Encode for local storage.
    pub fn to_snapshot(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Decode a stored snapshot. Out-of-range cursors are clamped.
    ///
    /// Accepts both the bare profile this crate writes and the
    /// `{"state": {"data": …}, "version": 0}` envelope the web wizard's
    /// persisted store leaves under the same key.
    pub fn from_snapshot(raw: &str) -> Result<Self, serde_json::Error> {
        let profile = match serde_json::from_str::<StoredSnapshot>(raw)? {
            StoredSnapshot::Envelope { state } => state.data,
            StoredSnapshot::Bare(profile) => profile,
        };
        Ok(profile.normalized())
    }

    /// Decode a stored snapshot, falling back to defaults when it is unreadable.
    pub fn restore(raw: &str) -> Self {
        match Self::from_snapshot(raw) {
            Ok(profile) => profile,
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unreadable onboarding snapshot");
                Self::default()
            }
        }
    }

    fn normalized(mut self) -> Self {
        if self.current_step >= Step::COUNT {
            self.current_step = Step::COUNT - 1;
        }
        self
    }
}

/// Shapes a stored snapshot may take.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredSnapshot {
    Envelope { state: PersistedState },
    Bare(ApplicantProfile),
}

#[derive(Deserialize)]
struct PersistedState {
    data: ApplicantProfile,
}

/// Local storage keys.
pub mod storage_keys {
    /// Key holding the serialized `ApplicantProfile`.
    pub const APPLICANT_PROFILE: &str = "mora-health-onboarding";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_matches_initial_data() {
        let p = ApplicantProfile::default();
        assert!(p.personal_info.first_name.is_empty());
        assert!(p.work_experience.currently_working);
        assert!(p.english_proficiency.willing_to_take_test);
        assert!(!p.english_proficiency.has_ielts);
        assert!(p.nclex_status.needs_support);
        assert!(!p.nclex_status.has_taken_nclex);
        assert!(p.us_preferences.start_date.is_none());
        assert_eq!(p.current_step, 0);
    }

    #[test]
    fn personal_patch_touches_only_its_section() {
        let base = ApplicantProfile::default().with_professional_info(ProfessionalInfoPatch {
            nursing_degree: Some("licenciatura".to_string()),
            ..Default::default()
        });

        let updated = base.with_personal_info(PersonalInfoPatch {
            first_name: Some("Ana".to_string()),
            ..Default::default()
        });

        assert_eq!(updated.personal_info.first_name, "Ana");
        assert!(updated.personal_info.last_name.is_empty());
        assert_eq!(updated.professional_info, base.professional_info);
        assert_eq!(updated.work_experience, base.work_experience);
        assert_eq!(updated.nclex_status, base.nclex_status);
        assert_eq!(updated.current_step, base.current_step);
    }

    /// Every section other than `changed` is equal between the two profiles.
    fn assert_only_changed(before: &ApplicantProfile, after: &ApplicantProfile, changed: Step) {
        let sections = [
            (Step::PersonalInfo, before.personal_info == after.personal_info),
            (Step::ProfessionalInfo, before.professional_info == after.professional_info),
            (Step::WorkExperience, before.work_experience == after.work_experience),
            (Step::EnglishProficiency, before.english_proficiency == after.english_proficiency),
            (Step::UsPreferences, before.us_preferences == after.us_preferences),
            (Step::NclexStatus, before.nclex_status == after.nclex_status),
        ];
        for (step, same) in sections {
            assert_eq!(same, step != changed, "section {step}");
        }
        assert_eq!(before.current_step, after.current_step);
    }

    fn filled_profile() -> ApplicantProfile {
        ApplicantProfile::default()
            .with_personal_info(PersonalInfoPatch {
                first_name: Some("Ana".to_string()),
                ..Default::default()
            })
            .with_professional_info(ProfessionalInfoPatch {
                nursing_degree: Some("licenciatura".to_string()),
                ..Default::default()
            })
            .with_work_experience(WorkExperiencePatch {
                hospital_name: Some("Hospital Civil".to_string()),
                ..Default::default()
            })
            .with_english_proficiency(EnglishProficiencyPatch {
                speaking_level: Some(Some(ProficiencyLevel::Basic)),
                ..Default::default()
            })
            .with_us_preferences(UsPreferencesPatch {
                preferred_states: Some(["Ohio"].into_iter().collect()),
                ..Default::default()
            })
            .with_nclex_status(NclexStatusPatch {
                plan_to_take: Some(Some(NclexPlan::TakeSoon)),
                ..Default::default()
            })
            .with_current_step(2)
    }

    #[test]
    fn each_section_mutator_leaves_other_sections_alone() {
        let base = filled_profile();

        let after = base.with_personal_info(PersonalInfoPatch {
            phone: Some("5551234567".to_string()),
            ..Default::default()
        });
        assert_only_changed(&base, &after, Step::PersonalInfo);

        let after = base.with_professional_info(ProfessionalInfoPatch {
            graduation_year: Some("2015".to_string()),
            ..Default::default()
        });
        assert_only_changed(&base, &after, Step::ProfessionalInfo);
        assert_eq!(after.professional_info.nursing_degree, "licenciatura");

        let after = base.with_work_experience(WorkExperiencePatch {
            currently_working: Some(false),
            ..Default::default()
        });
        assert_only_changed(&base, &after, Step::WorkExperience);
        assert_eq!(after.work_experience.hospital_name, "Hospital Civil");

        let after = base.with_english_proficiency(EnglishProficiencyPatch {
            has_toefl: Some(true),
            ..Default::default()
        });
        assert_only_changed(&base, &after, Step::EnglishProficiency);
        assert_eq!(after.english_proficiency.speaking_level, Some(ProficiencyLevel::Basic));

        let after = base.with_us_preferences(UsPreferencesPatch {
            salary_expectations: Some(Some(SalaryRange::Over120k)),
            ..Default::default()
        });
        assert_only_changed(&base, &after, Step::UsPreferences);
        assert!(after.us_preferences.preferred_states.contains("Ohio"));

        let after = base.with_nclex_status(NclexStatusPatch {
            needs_support: Some(false),
            ..Default::default()
        });
        assert_only_changed(&base, &after, Step::NclexStatus);
        assert_eq!(after.nclex_status.plan_to_take, Some(NclexPlan::TakeSoon));
    }

    #[test]
    fn list_routing_leaves_other_sections_alone() {
        let base = filled_profile();
        for field in ListField::ALL {
            let list = base.list(field).with_added("Nuevo");
            let after = base.with_list(field, list);
            assert_only_changed(&base, &after, field.step());
            assert!(after.list(field).contains("Nuevo"));
        }
    }

    #[test]
    fn merge_keeps_unpatched_fields() {
        let english = EnglishProficiency {
            speaking_level: Some(ProficiencyLevel::Advanced),
            has_ielts: true,
            ielts_score: "7.0".to_string(),
            ..Default::default()
        };
        let merged = english.merged(EnglishProficiencyPatch {
            speaking_level: Some(None),
            listening_level: Some(Some(ProficiencyLevel::Basic)),
            ..Default::default()
        });
        assert_eq!(merged.speaking_level, None);
        assert_eq!(merged.listening_level, Some(ProficiencyLevel::Basic));
        assert!(merged.has_ielts);
        assert_eq!(merged.ielts_score, "7.0");
    }

    #[test]
    fn toggle_list_add_is_idempotent() {
        let list = ToggleList::new().with_added("ICU").with_added("ICU");
        assert_eq!(list.as_slice(), &["ICU".to_string()]);
    }

    #[test]
    fn toggle_list_add_then_remove_restores_order() {
        let before: ToggleList = ["UWorld", "Kaplan"].into_iter().collect();
        let after = before.with_added("ATI").with_removed("ATI");
        assert_eq!(after, before);

        let toggled_twice = before.with_toggled("Kaplan").with_toggled("Kaplan");
        assert_eq!(toggled_twice.as_slice(), &["UWorld".to_string(), "Kaplan".to_string()]);
    }

    #[test]
    fn clinical_areas_scenario() {
        let profile = ApplicantProfile::default();
        let list = profile.list(ListField::ClinicalAreas).with_added("ICU");
        let profile = profile.with_list(ListField::ClinicalAreas, list);
        let list = profile.list(ListField::ClinicalAreas).with_added("ER");
        let profile = profile.with_list(ListField::ClinicalAreas, list);
        let list = profile.list(ListField::ClinicalAreas).with_removed("ICU");
        let profile = profile.with_list(ListField::ClinicalAreas, list);

        assert_eq!(profile.work_experience.clinical_areas.as_slice(), &["ER".to_string()]);
    }

    #[test]
    fn decoding_duplicates_keeps_first_occurrence() {
        let list: ToggleList = serde_json::from_str(r#"["B","A","B","C","A"]"#).unwrap();
        assert_eq!(list.iter().collect::<Vec<_>>(), vec!["B", "A", "C"]);
    }

    #[test]
    fn snapshot_uses_camel_case_keys() {
        let profile = ApplicantProfile::default();
        let json: serde_json::Value = serde_json::from_str(&profile.to_snapshot().unwrap()).unwrap();

        assert_eq!(json["personalInfo"]["firstName"], "");
        assert_eq!(json["professionalInfo"]["nursingDegree"], "");
        assert_eq!(json["englishProficiency"]["hasIELTS"], false);
        assert_eq!(json["englishProficiency"]["speakingLevel"], "");
        assert_eq!(json["nclexStatus"]["hasTakenNCLEX"], false);
        assert_eq!(json["usPreferences"]["salaryExpectations"], "");
        assert_eq!(json["currentStep"], 0);
    }

    #[test]
    fn snapshot_roundtrip() {
        let profile = ApplicantProfile::default()
            .with_personal_info(PersonalInfoPatch {
                first_name: Some("Ana".to_string()),
                date_of_birth: Some("1990-04-12".to_string()),
                ..Default::default()
            })
            .with_english_proficiency(EnglishProficiencyPatch {
                reading_level: Some(Some(ProficiencyLevel::Native)),
                has_toefl: Some(true),
                ..Default::default()
            })
            .with_us_preferences(UsPreferencesPatch {
                preferred_states: Some(["Texas", "Florida"].into_iter().collect()),
                start_date: Some(Some(StartDate::ThreeToSixMonths)),
                salary_expectations: Some(Some(SalaryRange::Over120k)),
                ..Default::default()
            })
            .with_nclex_status(NclexStatusPatch {
                plan_to_take: Some(Some(NclexPlan::Study3Months)),
                nclex_result: Some(Some(NclexResult::Failed)),
                ..Default::default()
            })
            .with_current_step(4);

        let raw = profile.to_snapshot().unwrap();
        let parsed = ApplicantProfile::from_snapshot(&raw).unwrap();
        assert_eq!(parsed, profile);
    }

    #[test]
    fn reads_partial_bare_snapshot() {
        let raw = r#"{
            "personalInfo": {"firstName": "Ana", "lastName": "Ruiz", "email": "ana@x.com"},
            "englishProficiency": {"speakingLevel": "intermedio", "listeningLevel": "", "hasIELTS": true},
            "nclexStatus": {"planToTake": "estudiar-mas-6-meses", "studyTimeframe": "ya-completado"},
            "currentStep": 2
        }"#;
        let profile = ApplicantProfile::from_snapshot(raw).unwrap();

        assert_eq!(profile.personal_info.last_name, "Ruiz");
        assert!(profile.personal_info.phone.is_empty());
        assert_eq!(profile.english_proficiency.speaking_level, Some(ProficiencyLevel::Intermediate));
        assert_eq!(profile.english_proficiency.listening_level, None);
        assert!(profile.english_proficiency.has_ielts);
        assert!(profile.english_proficiency.willing_to_take_test);
        assert_eq!(profile.nclex_status.plan_to_take, Some(NclexPlan::StudyOver6Months));
        assert_eq!(profile.nclex_status.study_timeframe, Some(StudyTimeframe::Completed));
        assert!(profile.work_experience.currently_working);
        assert_eq!(profile.current_step, 2);
    }

    #[test]
    fn reads_persisted_store_envelope() {
        let raw = r#"{
            "state": {
                "data": {
                    "personalInfo": {"firstName": "Lucía", "email": "lucia@x.com"},
                    "usPreferences": {"preferredStates": ["Texas", "Ohio"], "startDate": "1-3-meses"},
                    "currentStep": 4
                }
            },
            "version": 0
        }"#;
        let profile = ApplicantProfile::from_snapshot(raw).unwrap();

        assert_eq!(profile.personal_info.first_name, "Lucía");
        assert_eq!(
            profile.us_preferences.preferred_states.iter().collect::<Vec<_>>(),
            vec!["Texas", "Ohio"]
        );
        assert_eq!(profile.us_preferences.start_date, Some(StartDate::OneToThreeMonths));
        assert_eq!(profile.current_step, 4);
        assert!(profile.work_experience.currently_working);
    }

    #[test]
    fn malformed_envelope_restores_defaults() {
        let raw = r#"{"state": {"data": {"currentStep": "two"}}, "version": 0}"#;
        assert_eq!(ApplicantProfile::restore(raw), ApplicantProfile::default());
    }

    #[test]
    fn malformed_snapshot_restores_defaults() {
        assert_eq!(ApplicantProfile::restore("{not json"), ApplicantProfile::default());
        assert_eq!(
            ApplicantProfile::restore(r#"{"workExperience": {"currentlyWorking": "yes"}}"#),
            ApplicantProfile::default()
        );
        assert_eq!(
            ApplicantProfile::restore(r#"{"usPreferences": {"startDate": "mañana"}}"#),
            ApplicantProfile::default()
        );
    }

    #[test]
    fn out_of_range_cursor_is_clamped() {
        let profile = ApplicantProfile::from_snapshot(r#"{"currentStep": 42}"#).unwrap();
        assert_eq!(profile.current_step, Step::COUNT - 1);
        assert_eq!(profile.step(), Step::Summary);
    }

    #[test]
    fn choice_from_str() {
        assert_eq!("nativo".parse::<ProficiencyLevel>(), Ok(ProficiencyLevel::Native));
        assert_eq!("120000+".parse::<SalaryRange>(), Ok(SalaryRange::Over120k));
        let err = "fluent".parse::<ProficiencyLevel>().unwrap_err();
        assert_eq!(err.kind, "proficiency level");
        assert_eq!(err.value, "fluent");
    }

    #[test]
    fn list_fields_are_owned_by_their_step() {
        assert_eq!(ListField::Specializations.step(), Step::ProfessionalInfo);
        assert_eq!(ListField::ShiftPreferences.step(), Step::UsPreferences);
        assert_eq!(ListField::from_wire_name("studyMaterials"), Some(ListField::StudyMaterials));
        assert_eq!(ListField::from_wire_name("hobbies"), None);
    }
}
