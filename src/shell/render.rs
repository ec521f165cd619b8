//! Text rendering of the wizard.
//!
//! Every function returns a `String` so the shell decides where it goes.

use std::fmt::Write;

use chrono::{DateTime, NaiveDate, Utc};

use crate::onboarding::model::{ApplicantProfile, ToggleList};
use crate::onboarding::screens::{self, StepChrome};
use crate::onboarding::{PersonalField, PersonalInfoForm, Step, StepIndicator, StepStatus};

const RULE: &str = "────────────────────────────────────────────────────────";

pub fn header() -> String {
    format!(
        "Mora Health · Enfermeras para Estados Unidos\n\
         Tu carrera de enfermería en EE. UU. empieza aquí.\n{RULE}"
    )
}

pub fn landing() -> String {
    format!(
        "{}\nCompleta tu perfil en unos 15 minutos. Tu progreso se guarda automáticamente.\n\
         Escribe 'start' para comenzar o 'help' para ver los comandos.",
        header()
    )
}

pub fn help() -> String {
    [
        "Comandos:",
        "  start                   abrir el formulario",
        "  show                    volver a mostrar el paso actual",
        "  set <campo> <valor>     escribir un campo (vacío para borrarlo)",
        "  blur <campo>            salir de un campo (valida de inmediato)",
        "  focus <campo>           entrar a un campo",
        "  toggle <campo> <valor>  agregar o quitar un valor de una lista",
        "  next                    continuar (en el resumen: enviar)",
        "  back                    paso anterior",
        "  goto <n>                ir al paso n (si está disponible)",
        "  close                   cerrar el formulario o la confirmación",
        "  reset                   borrar todos los datos",
        "  quit                    salir",
    ]
    .join("\n")
}

pub fn indicator(indicator: &StepIndicator) -> String {
    let mut out = String::new();
    for (n, entry) in indicator.entries().iter().enumerate() {
        let mark = match entry.status {
            StepStatus::Completed => "✓",
            StepStatus::Current => "●",
            StepStatus::Pending => "○",
        };
        if n > 0 {
            out.push_str(" ─ ");
        }
        let _ = write!(out, "{mark} {} {}", n + 1, entry.step.title());
    }
    let _ = write!(out, "\nProgreso: {:.0}%", indicator.progress_percentage());
    out
}

/// The active step: indicator, chrome, fields and save status.
pub fn screen(
    profile: &ApplicantProfile,
    form: &PersonalInfoForm,
    last_saved: Option<DateTime<Utc>>,
    today: NaiveDate,
    now: DateTime<Utc>,
) -> String {
    let step = profile.step();
    let mut chrome = StepChrome::new(step, profile, today);
    if step == Step::PersonalInfo {
        chrome.can_go_next = form.can_go_next(&profile.personal_info);
    }

    let mut out = String::new();
    let _ = writeln!(out, "{}", indicator(&StepIndicator::new(profile)));
    let _ = writeln!(out, "{RULE}");
    let _ = write!(out, "Paso {} de {} · {}", chrome.step_number, chrome.total_steps, chrome.copy.title);
    if let Some(time) = chrome.copy.estimated_time {
        let _ = write!(out, " · {time}");
    }
    let _ = writeln!(out, "\n{}", chrome.copy.subtitle);
    if !chrome.is_last {
        let _ = writeln!(out, "Completado: {:.0}%", chrome.completion_percentage);
    }
    let _ = writeln!(out);

    match step {
        Step::PersonalInfo => personal_fields(&mut out, profile, form),
        Step::Summary => out.push_str(&summary(profile)),
        _ => section_fields(&mut out, step, profile),
    }

    let _ = writeln!(out, "\n{RULE}");
    let back = if chrome.is_first { "" } else { "[back] Anterior   " };
    let next = if chrome.can_go_next {
        format!("[next] {}", chrome.copy.next_label)
    } else {
        format!("({} no disponible)", chrome.copy.next_label)
    };
    let _ = write!(out, "{back}{next}");
    if let Some(saved) = screens::save_indicator(last_saved, now) {
        let _ = write!(out, "   · {saved}");
    }
    out
}

fn personal_fields(out: &mut String, profile: &ApplicantProfile, form: &PersonalInfoForm) {
    let info = &profile.personal_info;
    for field in PersonalField::ALL {
        let marker = if form.is_validating(field) {
            " …"
        } else if form.is_success(info, field) {
            " ✓"
        } else {
            ""
        };
        let _ = writeln!(
            out,
            "  {:<16} {:<22} {}{marker}",
            field.wire_name(),
            field.label(),
            display(field.value(info))
        );
        if let Some(error) = form.error(field) {
            let _ = writeln!(out, "  {:<16} ⚠ {error}", "");
        }
    }
}

fn section_fields(out: &mut String, step: Step, profile: &ApplicantProfile) {
    let hints = screens::missing_hints(step, profile);
    for (name, value) in section_rows(step, profile) {
        let _ = writeln!(out, "  {name:<20} {value}");
        if let Some((_, hint)) = hints.iter().find(|(field, _)| *field == name) {
            let _ = writeln!(out, "  {:<20} ⚠ {hint}", "");
        }
    }
}

fn section_rows(step: Step, profile: &ApplicantProfile) -> Vec<(&'static str, String)> {
    let opt = |label: Option<&'static str>| label.unwrap_or("—").to_string();
    match step {
        Step::ProfessionalInfo => {
            let p = &profile.professional_info;
            vec![
                ("nursingDegree", display(&p.nursing_degree)),
                ("graduationYear", display(&p.graduation_year)),
                ("nursingSchool", display(&p.nursing_school)),
                ("nursingLicense", display(&p.nursing_license)),
                ("licenseExpiry", display(&p.license_expiry)),
                ("yearsOfExperience", display(&p.years_of_experience)),
                ("specializations", list(&p.specializations)),
            ]
        }
        Step::WorkExperience => {
            let w = &profile.work_experience;
            vec![
                ("currentlyWorking", flag(w.currently_working)),
                ("hospitalName", display(&w.hospital_name)),
                ("position", display(&w.position)),
                ("startDate", display(&w.start_date)),
                ("endDate", display(&w.end_date)),
                ("responsibilities", display(&w.responsibilities)),
                ("clinicalAreas", list(&w.clinical_areas)),
            ]
        }
        Step::EnglishProficiency => {
            let e = &profile.english_proficiency;
            vec![
                ("speakingLevel", opt(e.speaking_level.map(|l| l.label()))),
                ("listeningLevel", opt(e.listening_level.map(|l| l.label()))),
                ("readingLevel", opt(e.reading_level.map(|l| l.label()))),
                ("writingLevel", opt(e.writing_level.map(|l| l.label()))),
                ("hasIELTS", flag(e.has_ielts)),
                ("ieltsScore", display(&e.ielts_score)),
                ("hasTOEFL", flag(e.has_toefl)),
                ("toeflScore", display(&e.toefl_score)),
                ("willingToTakeTest", flag(e.willing_to_take_test)),
            ]
        }
        Step::UsPreferences => {
            let u = &profile.us_preferences;
            vec![
                ("preferredStates", list(&u.preferred_states)),
                ("hospitalTypes", list(&u.hospital_types)),
                ("workSettings", list(&u.work_settings)),
                ("shiftPreferences", list(&u.shift_preferences)),
                ("startDate", opt(u.start_date.map(|s| s.label()))),
                ("salaryExpectations", opt(u.salary_expectations.map(|s| s.label()))),
            ]
        }
        Step::NclexStatus => {
            let n = &profile.nclex_status;
            vec![
                ("hasTakenNCLEX", flag(n.has_taken_nclex)),
                ("nclexResult", opt(n.nclex_result.map(|r| r.label()))),
                ("planToTake", opt(n.plan_to_take.map(|p| p.label()))),
                ("studyTimeframe", opt(n.study_timeframe.map(|t| t.label()))),
                ("needsSupport", flag(n.needs_support)),
                ("studyMaterials", list(&n.study_materials)),
            ]
        }
        Step::PersonalInfo | Step::Summary => Vec::new(),
    }
}

/// Review of every section, shown on the last step.
pub fn summary(profile: &ApplicantProfile) -> String {
    let mut out = String::new();
    let p = &profile.personal_info;
    let _ = writeln!(out, "Información Personal");
    let _ = writeln!(out, "  {} {}", display(&p.first_name), p.last_name);
    let _ = writeln!(out, "  {} · {}", display(&p.email), display(&p.phone));
    let _ = writeln!(out, "  {}, {}", display(&p.current_city), display(&p.current_country));

    for step in &Step::ORDER[1..Step::COUNT - 1] {
        let _ = writeln!(out, "{}", screens::copy(*step).title);
        for (name, value) in section_rows(*step, profile) {
            let _ = writeln!(out, "  {name:<20} {value}");
        }
    }
    out
}

pub fn success_modal(email: &str) -> String {
    let mut out = format!(
        "{RULE}\n¡Aplicación enviada exitosamente!\n\
         Hemos recibido tu aplicación y estamos emocionados de ayudarte a comenzar\n\
         tu carrera de enfermería en Estados Unidos.\n\n\
         Próximos pasos\n\
         \x20 24-48 horas: Nuestro equipo revisará tu aplicación\n\
         \x20 1-3 días: Te contactaremos para una consulta inicial gratuita\n\
         \x20 1 semana: Recibirás tu plan personalizado\n\n\
         ¿Tienes preguntas? talent@mora.health"
    );
    if !email.is_empty() {
        let _ = write!(out, "\nTe escribiremos a {email}.");
    }
    let _ = write!(out, "\nEscribe 'close' para cerrar.\n{RULE}");
    out
}

fn display(value: &str) -> String {
    if value.is_empty() {
        "—".to_string()
    } else {
        value.to_string()
    }
}

fn flag(value: bool) -> String {
    let text = if value { "sí" } else { "no" };
    text.to_string()
}

fn list(values: &ToggleList) -> String {
    if values.is_empty() {
        "—".to_string()
    } else {
        values.iter().collect::<Vec<_>>().join(", ")
    }
}
