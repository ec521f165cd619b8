//! Per-screen copy, option catalogues and the strict advance rule.
//!
//! [`can_go_next`] is the screen-level gate for the Continue action. It is
//! stricter than [`Step::is_complete`], which only unlocks indicator jumps.

use chrono::{DateTime, NaiveDate, Utc};

use super::model::ApplicantProfile;
use super::state::Step;
use super::validation::{PersonalField, personal_info_is_valid};

/// Static copy shown at the top of a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenCopy {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub estimated_time: Option<&'static str>,
    pub next_label: &'static str,
}

pub const NEXT_LABEL: &str = "Continuar";
pub const SUBMIT_LABEL: &str = "Enviar aplicación";

pub fn copy(step: Step) -> ScreenCopy {
    let (title, subtitle, estimated_time) = match step {
        Step::PersonalInfo => (
            "Información Personal",
            "Comencemos conociendo un poco más sobre ti",
            Some("3-5 min"),
        ),
        Step::ProfessionalInfo => (
            "Información Profesional",
            "Cuéntanos sobre tu formación y credenciales en enfermería",
            None,
        ),
        Step::WorkExperience => (
            "Experiencia Laboral",
            "Dinos sobre tu experiencia trabajando como enfermera",
            None,
        ),
        Step::EnglishProficiency => (
            "Nivel de Inglés",
            "El inglés médico es fundamental para brindar atención de calidad en Estados Unidos",
            None,
        ),
        Step::UsPreferences => (
            "Preferencias para Estados Unidos",
            "Ayúdanos a encontrar la oportunidad perfecta que se adapte a tus necesidades y objetivos profesionales",
            Some("5-7 min"),
        ),
        Step::NclexStatus => (
            "Estado del NCLEX-RN",
            "El NCLEX-RN es el examen requerido para ejercer como enfermera en Estados Unidos",
            None,
        ),
        Step::Summary => (
            "Resumen de tu aplicación",
            "Revisa tu información antes de enviar tu aplicación a nuestro equipo",
            None,
        ),
    };
    ScreenCopy {
        title,
        subtitle,
        estimated_time,
        next_label: if step.is_last() { SUBMIT_LABEL } else { NEXT_LABEL },
    }
}

/// Fixed choices offered by the screens, as `(value, label)` or plain values.
pub mod options {
    pub const NATIONALITIES: &[(&str, &str)] = &[
        ("mexicana", "Mexicana"),
        ("colombiana", "Colombiana"),
        ("peruana", "Peruana"),
        ("argentina", "Argentina"),
        ("chilena", "Chilena"),
        ("ecuatoriana", "Ecuatoriana"),
        ("venezolana", "Venezolana"),
        ("guatemalteca", "Guatemalteca"),
        ("otra", "Otra"),
    ];

    pub const COUNTRIES: &[(&str, &str)] = &[
        ("mexico", "México"),
        ("colombia", "Colombia"),
        ("peru", "Perú"),
        ("argentina", "Argentina"),
        ("chile", "Chile"),
        ("ecuador", "Ecuador"),
        ("venezuela", "Venezuela"),
        ("guatemala", "Guatemala"),
        ("otro", "Otro"),
    ];

    pub const DEGREES: &[(&str, &str)] = &[
        ("licenciatura", "Licenciatura en Enfermería"),
        ("tecnico", "Técnico en Enfermería"),
        ("especialidad", "Especialidad en Enfermería"),
        ("maestria", "Maestría en Enfermería"),
    ];

    pub const YEARS_OF_EXPERIENCE: &[(&str, &str)] = &[
        ("menos-1", "Menos de 1 año"),
        ("1-2", "1-2 años"),
        ("3-5", "3-5 años"),
        ("6-10", "6-10 años"),
        ("mas-10", "Más de 10 años"),
    ];

    pub const SPECIALIZATIONS: &[&str] = &[
        "Enfermería General",
        "Cuidados Intensivos",
        "Urgencias",
        "Pediatría",
        "Ginecología y Obstetricia",
        "Quirófano",
        "Cardiología",
        "Oncología",
        "Geriatría",
        "Salud Mental",
        "Medicina Interna",
        "Neonatología",
    ];

    pub const CLINICAL_AREAS: &[&str] = &[
        "Unidad de Cuidados Intensivos (UCI)",
        "Urgencias",
        "Hospitalización General",
        "Quirófano",
        "Pediatría",
        "Ginecología y Obstetricia",
        "Cardiología",
        "Oncología",
        "Geriatría",
        "Salud Mental/Psiquiatría",
        "Medicina Interna",
        "Consulta Externa",
        "Neonatología",
        "Rehabilitación",
    ];

    pub const US_STATES: &[&str] = &[
        "California", "Texas", "Florida", "New York", "Pennsylvania", "Illinois",
        "Ohio", "Georgia", "North Carolina", "Michigan", "New Jersey", "Virginia",
        "Washington", "Arizona", "Massachusetts", "Tennessee", "Maryland", "Colorado",
        "Minnesota", "Louisiana", "Oregon", "Nevada", "Connecticut", "Utah",
        "Wisconsin", "Indiana", "Missouri", "Alabama", "South Carolina", "Kentucky",
        "Iowa", "Arkansas", "Kansas", "Oklahoma", "Mississippi", "New Mexico",
        "Nebraska", "West Virginia", "Idaho", "Hawaii", "New Hampshire", "Maine",
        "Rhode Island", "Montana", "Delaware", "South Dakota", "North Dakota",
        "Alaska", "Vermont", "Wyoming",
    ];

    pub const HOSPITAL_TYPES: &[&str] = &[
        "Hospital General/Académico",
        "Hospital Comunitario",
        "Centro Médico de Trauma",
        "Hospital Pediátrico",
        "Hospital de Rehabilitación",
        "Centro de Cáncer",
        "Hospital Psiquiátrico",
        "Clínica Ambulatoria",
        "Hospital de Veteranos (VA)",
        "Centro Médico Universitario",
        "Hospital de Especialidades",
        "Centro de Cirugía Ambulatoria",
    ];

    pub const WORK_SETTINGS: &[&str] = &[
        "Unidad de Cuidados Intensivos (ICU)",
        "Urgencias/Emergencias (ER)",
        "Hospitalización General (Med-Surg)",
        "Quirófano (OR)",
        "Unidad de Cuidados Coronarios (CCU)",
        "Unidad de Cuidados Intensivos Neonatales (NICU)",
        "Unidad de Cuidados Intensivos Pediátricos (PICU)",
        "Oncología",
        "Consulta Externa",
        "Cuidados Ambulatorios",
        "Rehabilitación",
        "Cuidados Paliativos",
        "Sala de Partos (L&D)",
        "Psiquiatría",
        "Geriatría",
    ];

    pub const SHIFTS: &[&str] = &[
        "Turno diurno (7am-7pm)",
        "Turno nocturno (7pm-7am)",
        "Turnos de 8 horas",
        "Turnos de 12 horas",
        "Fines de semana",
        "Flexible/PRN (Por Necesidad)",
        "Turnos rotativos",
        "Solo días laborables",
    ];

    pub const STUDY_MATERIALS: &[&str] = &[
        "UWorld",
        "Kaplan",
        "ATI",
        "Hurst Review",
        "NCSBN Learning Extension",
        "Saunders Comprehensive Review",
        "Mark Klimek Lectures",
        "BoardVitals",
        "Archer Review",
        "Simple Nursing",
    ];
}

/// The checklist behind a screen's completion percentage.
///
/// For the personal screen this is field presence only; whether the values
/// pass their rules is [`can_go_next`]'s concern.
pub fn requirements(step: Step, profile: &ApplicantProfile) -> Vec<bool> {
    match step {
        Step::PersonalInfo => PersonalField::ALL
            .iter()
            .map(|field| !field.value(&profile.personal_info).is_empty())
            .collect(),
        Step::ProfessionalInfo => {
            let p = &profile.professional_info;
            vec![
                !p.nursing_degree.is_empty(),
                !p.graduation_year.is_empty(),
                !p.nursing_school.is_empty(),
                !p.nursing_license.is_empty(),
                !p.license_expiry.is_empty(),
                !p.years_of_experience.is_empty(),
            ]
        }
        Step::WorkExperience => {
            let w = &profile.work_experience;
            vec![!w.clinical_areas.is_empty(), !w.responsibilities.is_empty()]
        }
        Step::EnglishProficiency => {
            let e = &profile.english_proficiency;
            vec![
                e.speaking_level.is_some(),
                e.listening_level.is_some(),
                e.reading_level.is_some(),
                e.writing_level.is_some(),
            ]
        }
        Step::UsPreferences => {
            let u = &profile.us_preferences;
            vec![
                !u.preferred_states.is_empty(),
                !u.hospital_types.is_empty(),
                !u.work_settings.is_empty(),
                !u.shift_preferences.is_empty(),
                u.start_date.is_some(),
                u.salary_expectations.is_some(),
            ]
        }
        Step::NclexStatus => {
            let n = &profile.nclex_status;
            vec![n.plan_to_take.is_some(), n.study_timeframe.is_some()]
        }
        Step::Summary => Vec::new(),
    }
}

/// Inline prompts for required inputs that are still empty, keyed by wire
/// field name. Only the preferences screen prompts before Continue.
pub fn missing_hints(step: Step, profile: &ApplicantProfile) -> Vec<(&'static str, &'static str)> {
    if step != Step::UsPreferences {
        return Vec::new();
    }
    let u = &profile.us_preferences;
    [
        (
            u.preferred_states.is_empty(),
            "preferredStates",
            "Selecciona al menos un estado donde te gustaría trabajar",
        ),
        (
            u.hospital_types.is_empty(),
            "hospitalTypes",
            "Selecciona al menos un tipo de hospital",
        ),
        (
            u.work_settings.is_empty(),
            "workSettings",
            "Selecciona al menos un entorno de trabajo",
        ),
        (
            u.shift_preferences.is_empty(),
            "shiftPreferences",
            "Selecciona al menos una preferencia de turno",
        ),
        (
            u.start_date.is_none(),
            "startDate",
            "Selecciona cuándo podrías comenzar",
        ),
        (
            u.salary_expectations.is_none(),
            "salaryExpectations",
            "Selecciona tus expectativas salariales",
        ),
    ]
    .into_iter()
    .filter_map(|(missing, field, hint)| missing.then_some((field, hint)))
    .collect()
}

/// Share of the screen's requirements that are met, 0 to 100.
/// The summary has no requirements and reports 100.
pub fn completion_percentage(step: Step, profile: &ApplicantProfile) -> f32 {
    let reqs = requirements(step, profile);
    if reqs.is_empty() {
        return 100.0;
    }
    let met = reqs.iter().filter(|met| **met).count();
    met as f32 / reqs.len() as f32 * 100.0
}

/// Strict advance rule for `step`.
///
/// The personal screen additionally requires that no inline error is on
/// display; that part lives in the form, which owns the error state.
pub fn can_go_next(step: Step, profile: &ApplicantProfile, today: NaiveDate) -> bool {
    match step {
        Step::PersonalInfo => personal_info_is_valid(&profile.personal_info, today),
        Step::Summary => true,
        _ => requirements(step, profile).into_iter().all(|met| met),
    }
}

/// Everything the step wrapper renders around a screen.
#[derive(Debug, Clone, PartialEq)]
pub struct StepChrome {
    pub copy: ScreenCopy,
    /// 1-based.
    pub step_number: usize,
    pub total_steps: usize,
    pub is_first: bool,
    pub is_last: bool,
    pub can_go_next: bool,
    pub completion_percentage: f32,
}

impl StepChrome {
    pub fn new(step: Step, profile: &ApplicantProfile, today: NaiveDate) -> Self {
        Self {
            copy: copy(step),
            step_number: step.index() + 1,
            total_steps: Step::COUNT,
            is_first: step == Step::FIRST,
            is_last: step.is_last(),
            can_go_next: can_go_next(step, profile, today),
            completion_percentage: completion_percentage(step, profile),
        }
    }
}

/// How long the "just saved" badge stays up.
pub const SAVE_BADGE_SECS: i64 = 3;

/// Text of the auto-save indicator, or `None` before the first save.
pub fn save_indicator(last_saved: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Option<String> {
    let saved = last_saved?;
    let elapsed = (now - saved).num_seconds().max(0);
    if elapsed < SAVE_BADGE_SECS {
        return Some("Guardado automáticamente".to_string());
    }
    Some(format!("Guardado {}", format_elapsed(elapsed)))
}

fn format_elapsed(secs: i64) -> String {
    if secs < 60 {
        "hace unos segundos".to_string()
    } else if secs < 3600 {
        format!("hace {} min", secs / 60)
    } else {
        format!("hace {} h", secs / 3600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::onboarding::model::{
        NclexPlan, NclexStatusPatch, PersonalInfoPatch, SalaryRange, StartDate, StudyTimeframe,
        UsPreferencesPatch, WorkExperiencePatch,
    };
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn last_step_uses_submit_label() {
        assert_eq!(copy(Step::Summary).next_label, "Enviar aplicación");
        assert_eq!(copy(Step::NclexStatus).next_label, "Continuar");
        assert_eq!(copy(Step::PersonalInfo).estimated_time, Some("3-5 min"));
        assert_eq!(copy(Step::WorkExperience).estimated_time, None);
    }

    #[test]
    fn personal_presence_is_not_validity() {
        let profile = ApplicantProfile::default().with_personal_info(PersonalInfoPatch {
            first_name: Some("Ana".to_string()),
            last_name: Some("Ruiz".to_string()),
            email: Some("ana@x.com".to_string()),
            phone: Some("123".to_string()),
            ..Default::default()
        });
        assert!((completion_percentage(Step::PersonalInfo, &profile) - 50.0).abs() < 1e-4);
        assert!(!can_go_next(Step::PersonalInfo, &profile, today()));
    }

    #[test]
    fn experience_needs_area_and_responsibilities() {
        let mut profile = ApplicantProfile::default().with_work_experience(WorkExperiencePatch {
            hospital_name: Some("Hospital Ángeles".to_string()),
            position: Some("Enfermera".to_string()),
            ..Default::default()
        });
        assert!(Step::WorkExperience.is_complete(&profile));
        assert!(!can_go_next(Step::WorkExperience, &profile, today()));

        profile = profile.with_work_experience(WorkExperiencePatch {
            responsibilities: Some("Cuidado de pacientes críticos".to_string()),
            clinical_areas: Some(["Urgencias"].into_iter().collect()),
            ..Default::default()
        });
        assert!(can_go_next(Step::WorkExperience, &profile, today()));
    }

    #[test]
    fn preferences_strict_rule_is_wider_than_loose() {
        let profile = ApplicantProfile::default().with_us_preferences(UsPreferencesPatch {
            preferred_states: Some(["Texas"].into_iter().collect()),
            start_date: Some(Some(StartDate::Immediately)),
            ..Default::default()
        });
        assert!(Step::UsPreferences.is_complete(&profile));
        assert!(!can_go_next(Step::UsPreferences, &profile, today()));
        assert!((completion_percentage(Step::UsPreferences, &profile) - 100.0 / 3.0).abs() < 1e-3);

        let full = profile.with_us_preferences(UsPreferencesPatch {
            hospital_types: Some(["Hospital Comunitario"].into_iter().collect()),
            work_settings: Some(["Oncología"].into_iter().collect()),
            shift_preferences: Some(["Turnos de 12 horas"].into_iter().collect()),
            salary_expectations: Some(Some(SalaryRange::From70kTo80k)),
            ..Default::default()
        });
        assert!(can_go_next(Step::UsPreferences, &full, today()));
    }

    #[test]
    fn preferences_hints_follow_missing_inputs() {
        let empty = ApplicantProfile::default();
        let hints = missing_hints(Step::UsPreferences, &empty);
        assert_eq!(hints.len(), 6);
        assert_eq!(
            hints[0],
            ("preferredStates", "Selecciona al menos un estado donde te gustaría trabajar")
        );

        let partial = empty.with_us_preferences(UsPreferencesPatch {
            preferred_states: Some(["Texas"].into_iter().collect()),
            salary_expectations: Some(Some(SalaryRange::From50kTo60k)),
            ..Default::default()
        });
        let fields: Vec<&str> = missing_hints(Step::UsPreferences, &partial)
            .into_iter()
            .map(|(field, _)| field)
            .collect();
        assert_eq!(fields, vec!["hospitalTypes", "workSettings", "shiftPreferences", "startDate"]);

        assert!(missing_hints(Step::ProfessionalInfo, &empty).is_empty());
    }

    #[test]
    fn nclex_and_summary() {
        let profile = ApplicantProfile::default().with_nclex_status(NclexStatusPatch {
            plan_to_take: Some(Some(NclexPlan::Retake)),
            study_timeframe: Some(Some(StudyTimeframe::ThreeToSixMonths)),
            ..Default::default()
        });
        assert!(can_go_next(Step::NclexStatus, &profile, today()));
        assert!(can_go_next(Step::Summary, &ApplicantProfile::default(), today()));
        assert!((completion_percentage(Step::Summary, &profile) - 100.0).abs() < 1e-4);
    }

    #[test]
    fn chrome_reports_position() {
        let chrome = StepChrome::new(Step::EnglishProficiency, &ApplicantProfile::default(), today());
        assert_eq!(chrome.step_number, 4);
        assert_eq!(chrome.total_steps, 7);
        assert!(!chrome.is_first);
        assert!(!chrome.is_last);
        assert!(!chrome.can_go_next);
        assert_eq!(chrome.completion_percentage, 0.0);
    }

    #[test]
    fn save_indicator_ages() {
        let saved = Utc::now();
        assert_eq!(save_indicator(None, saved), None);
        assert_eq!(
            save_indicator(Some(saved), saved + Duration::seconds(1)).as_deref(),
            Some("Guardado automáticamente")
        );
        assert_eq!(
            save_indicator(Some(saved), saved + Duration::seconds(10)).as_deref(),
            Some("Guardado hace unos segundos")
        );
        assert_eq!(
            save_indicator(Some(saved), saved + Duration::seconds(150)).as_deref(),
            Some("Guardado hace 2 min")
        );
        assert_eq!(
            save_indicator(Some(saved), saved + Duration::hours(3)).as_deref(),
            Some("Guardado hace 3 h")
        );
    }

    #[test]
    fn catalogues_are_populated() {
        assert_eq!(options::US_STATES.len(), 50);
        assert!(options::SHIFTS.contains(&"Turnos rotativos"));
        assert!(options::DEGREES.iter().any(|(value, _)| *value == "licenciatura"));
    }
}
