//! Maps `set`/`toggle` input onto the active section.
//!
//! Field names are the snapshot's camelCase keys. Only the section of the
//! step on screen accepts input.

use crate::error::ChoiceError;
use crate::onboarding::model::{
    EnglishProficiencyPatch, ListField, NclexStatusPatch, ProfessionalInfoPatch,
    UsPreferencesPatch, WorkExperiencePatch,
};
use crate::onboarding::{PersonalField, PersonalInfoForm, Step, WizardStore};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldInputError {
    #[error("El paso '{step}' no tiene un campo '{field}'")]
    UnknownField { step: &'static str, field: String },

    #[error("'{0}' es una lista: usa 'toggle {0} <valor>'")]
    ListNeedsToggle(String),

    #[error("'{0}' no es una lista")]
    NotAList(String),

    #[error("Valor no válido para '{field}': usa si/no")]
    InvalidFlag { field: String },

    #[error(transparent)]
    Choice(#[from] ChoiceError),
}

/// Apply `set <field> <value>` on the current step.
pub async fn set_field(
    store: &mut WizardStore,
    form: &mut PersonalInfoForm,
    field: &str,
    value: &str,
) -> Result<(), FieldInputError> {
    let step = store.current_step();
    let unknown = || FieldInputError::UnknownField {
        step: step.title(),
        field: field.to_string(),
    };

    if ListField::from_wire_name(field).is_some_and(|list| list.step() == step) {
        return Err(FieldInputError::ListNeedsToggle(field.to_string()));
    }

    let text = || Some(value.to_string());
    match step {
        Step::PersonalInfo => {
            let field: PersonalField = field.parse().map_err(|_| unknown())?;
            form.change(store, field, value.to_string()).await;
        }
        Step::ProfessionalInfo => {
            let mut patch = ProfessionalInfoPatch::default();
            match field {
                "nursingDegree" => patch.nursing_degree = text(),
                "graduationYear" => patch.graduation_year = text(),
                "nursingSchool" => patch.nursing_school = text(),
                "nursingLicense" => patch.nursing_license = text(),
                "licenseExpiry" => patch.license_expiry = text(),
                "yearsOfExperience" => patch.years_of_experience = text(),
                _ => return Err(unknown()),
            }
            store.update_professional_info(patch).await;
        }
        Step::WorkExperience => {
            let mut patch = WorkExperiencePatch::default();
            match field {
                "currentlyWorking" => patch.currently_working = Some(parse_flag(field, value)?),
                "hospitalName" => patch.hospital_name = text(),
                "position" => patch.position = text(),
                "startDate" => patch.start_date = text(),
                "endDate" => patch.end_date = text(),
                "responsibilities" => patch.responsibilities = text(),
                _ => return Err(unknown()),
            }
            store.update_work_experience(patch).await;
        }
        Step::EnglishProficiency => {
            let mut patch = EnglishProficiencyPatch::default();
            match field {
                "speakingLevel" => patch.speaking_level = Some(parse_choice(value)?),
                "listeningLevel" => patch.listening_level = Some(parse_choice(value)?),
                "readingLevel" => patch.reading_level = Some(parse_choice(value)?),
                "writingLevel" => patch.writing_level = Some(parse_choice(value)?),
                "hasIELTS" => patch.has_ielts = Some(parse_flag(field, value)?),
                "ieltsScore" => patch.ielts_score = text(),
                "hasTOEFL" => patch.has_toefl = Some(parse_flag(field, value)?),
                "toeflScore" => patch.toefl_score = text(),
                "willingToTakeTest" => patch.willing_to_take_test = Some(parse_flag(field, value)?),
                _ => return Err(unknown()),
            }
            store.update_english_proficiency(patch).await;
        }
        Step::UsPreferences => {
            let mut patch = UsPreferencesPatch::default();
            match field {
                "startDate" => patch.start_date = Some(parse_choice(value)?),
                "salaryExpectations" => patch.salary_expectations = Some(parse_choice(value)?),
                _ => return Err(unknown()),
            }
            store.update_us_preferences(patch).await;
        }
        Step::NclexStatus => {
            let mut patch = NclexStatusPatch::default();
            match field {
                "hasTakenNCLEX" => patch.has_taken_nclex = Some(parse_flag(field, value)?),
                "nclexResult" => patch.nclex_result = Some(parse_choice(value)?),
                "planToTake" => patch.plan_to_take = Some(parse_choice(value)?),
                "studyTimeframe" => patch.study_timeframe = Some(parse_choice(value)?),
                "needsSupport" => patch.needs_support = Some(parse_flag(field, value)?),
                _ => return Err(unknown()),
            }
            store.update_nclex_status(patch).await;
        }
        Step::Summary => return Err(unknown()),
    }
    Ok(())
}

/// Apply `toggle <field> <value>` on the current step.
pub async fn toggle_field(
    store: &mut WizardStore,
    field: &str,
    value: &str,
) -> Result<(), FieldInputError> {
    let step = store.current_step();
    let list = ListField::from_wire_name(field).ok_or_else(|| FieldInputError::NotAList(field.to_string()))?;
    if list.step() != step {
        return Err(FieldInputError::UnknownField {
            step: step.title(),
            field: field.to_string(),
        });
    }
    store.toggle(list, value).await;
    Ok(())
}

/// Resolve a personal field name for `blur`/`focus`.
pub fn personal_field(step: Step, field: &str) -> Result<PersonalField, FieldInputError> {
    let unknown = || FieldInputError::UnknownField {
        step: step.title(),
        field: field.to_string(),
    };
    if step != Step::PersonalInfo {
        return Err(unknown());
    }
    field.parse().map_err(|_| unknown())
}

fn parse_flag(field: &str, value: &str) -> Result<bool, FieldInputError> {
    match value.trim().to_lowercase().as_str() {
        "si" | "sí" | "true" | "1" => Ok(true),
        "no" | "false" | "0" => Ok(false),
        _ => Err(FieldInputError::InvalidFlag {
            field: field.to_string(),
        }),
    }
}

/// An empty value clears the choice.
fn parse_choice<T>(value: &str) -> Result<Option<T>, ChoiceError>
where
    T: std::str::FromStr<Err = ChoiceError>,
{
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    value.parse().map(Some)
}
