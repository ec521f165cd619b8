//! Field-level validation rules for the personal information screen.

use std::str::FromStr;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use super::model::{PersonalInfo, PersonalInfoPatch};

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-ZáéíóúÁÉÍÓÚñÑüÜ\s]+$").expect("valid name regex"));

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+]?[0-9\s\-()]{10,}$").expect("valid phone regex"));

/// Minimum applicant age in whole years.
pub const MIN_AGE: u32 = 18;

/// Ages above this are treated as a likely typo in the birth date.
pub const MAX_PLAUSIBLE_AGE: u32 = 80;

/// A user-correctable problem with one field. `Display` is the inline message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("El nombre es requerido")]
    FirstNameRequired,
    #[error("El nombre debe tener al menos 2 caracteres")]
    FirstNameTooShort,
    #[error("El nombre solo puede contener letras")]
    FirstNameNotLetters,
    #[error("Los apellidos son requeridos")]
    LastNameRequired,
    #[error("Los apellidos deben tener al menos 2 caracteres")]
    LastNameTooShort,
    #[error("Los apellidos solo pueden contener letras")]
    LastNameNotLetters,
    #[error("El correo electrónico es requerido")]
    EmailRequired,
    #[error("Ingresa un correo electrónico válido")]
    EmailInvalid,
    #[error("El teléfono es requerido")]
    PhoneRequired,
    #[error("Ingresa un número de teléfono válido (mínimo 10 dígitos)")]
    PhoneInvalid,
    #[error("La fecha de nacimiento es requerida")]
    BirthDateRequired,
    #[error("Ingresa una fecha válida")]
    BirthDateInvalid,
    #[error("Debes ser mayor de 18 años")]
    Underage,
    #[error("Por favor verifica la fecha de nacimiento")]
    ImplausibleAge,
    #[error("La nacionalidad es requerida")]
    NationalityRequired,
    #[error("Este campo es requerido")]
    Required,
    #[error("Debe tener al menos 2 caracteres")]
    TooShort,
}

/// The inputs of the personal information screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PersonalField {
    FirstName,
    LastName,
    Email,
    Phone,
    DateOfBirth,
    Nationality,
    CurrentCountry,
    CurrentCity,
}

impl PersonalField {
    pub const ALL: [PersonalField; 8] = [
        PersonalField::FirstName,
        PersonalField::LastName,
        PersonalField::Email,
        PersonalField::Phone,
        PersonalField::DateOfBirth,
        PersonalField::Nationality,
        PersonalField::CurrentCountry,
        PersonalField::CurrentCity,
    ];

    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::DateOfBirth => "dateOfBirth",
            Self::Nationality => "nationality",
            Self::CurrentCountry => "currentCountry",
            Self::CurrentCity => "currentCity",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::FirstName => "Nombre",
            Self::LastName => "Apellidos",
            Self::Email => "Correo electrónico",
            Self::Phone => "Teléfono",
            Self::DateOfBirth => "Fecha de nacimiento",
            Self::Nationality => "Nacionalidad",
            Self::CurrentCountry => "País actual",
            Self::CurrentCity => "Ciudad actual",
        }
    }

    pub fn value<'a>(&self, info: &'a PersonalInfo) -> &'a str {
        match self {
            Self::FirstName => &info.first_name,
            Self::LastName => &info.last_name,
            Self::Email => &info.email,
            Self::Phone => &info.phone,
            Self::DateOfBirth => &info.date_of_birth,
            Self::Nationality => &info.nationality,
            Self::CurrentCountry => &info.current_country,
            Self::CurrentCity => &info.current_city,
        }
    }

    /// Patch that sets only this field.
    pub fn patch(&self, value: String) -> PersonalInfoPatch {
        let mut patch = PersonalInfoPatch::default();
        let slot = match self {
            Self::FirstName => &mut patch.first_name,
            Self::LastName => &mut patch.last_name,
            Self::Email => &mut patch.email,
            Self::Phone => &mut patch.phone,
            Self::DateOfBirth => &mut patch.date_of_birth,
            Self::Nationality => &mut patch.nationality,
            Self::CurrentCountry => &mut patch.current_country,
            Self::CurrentCity => &mut patch.current_city,
        };
        *slot = Some(value);
        patch
    }

    /// The birth date validates on every change, touched or not.
    pub fn validates_untouched(&self) -> bool {
        matches!(self, Self::DateOfBirth)
    }
}

impl FromStr for PersonalField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.wire_name() == s)
            .ok_or_else(|| format!("unknown personal field: {s}"))
    }
}

/// Validate one personal field. `today` anchors the age check.
pub fn validate_field(field: PersonalField, value: &str, today: NaiveDate) -> Option<FieldError> {
    match field {
        PersonalField::FirstName => validate_name(
            value,
            FieldError::FirstNameRequired,
            FieldError::FirstNameTooShort,
            FieldError::FirstNameNotLetters,
        ),
        PersonalField::LastName => validate_name(
            value,
            FieldError::LastNameRequired,
            FieldError::LastNameTooShort,
            FieldError::LastNameNotLetters,
        ),
        PersonalField::Email => {
            if value.is_empty() {
                Some(FieldError::EmailRequired)
            } else if !EMAIL_RE.is_match(value) {
                Some(FieldError::EmailInvalid)
            } else {
                None
            }
        }
        PersonalField::Phone => {
            if value.is_empty() {
                Some(FieldError::PhoneRequired)
            } else if !PHONE_RE.is_match(value) {
                Some(FieldError::PhoneInvalid)
            } else {
                None
            }
        }
        PersonalField::DateOfBirth => validate_birth_date(value, today),
        PersonalField::Nationality => value.is_empty().then_some(FieldError::NationalityRequired),
        PersonalField::CurrentCountry | PersonalField::CurrentCity => {
            if value.is_empty() {
                Some(FieldError::Required)
            } else if value.chars().count() < 2 {
                Some(FieldError::TooShort)
            } else {
                None
            }
        }
    }
}

/// Every field of the section passes its rule.
pub fn personal_info_is_valid(info: &PersonalInfo, today: NaiveDate) -> bool {
    PersonalField::ALL
        .iter()
        .all(|field| validate_field(*field, field.value(info), today).is_none())
}

fn validate_name(
    value: &str,
    required: FieldError,
    too_short: FieldError,
    not_letters: FieldError,
) -> Option<FieldError> {
    if value.is_empty() {
        Some(required)
    } else if value.chars().count() < 2 {
        Some(too_short)
    } else if !NAME_RE.is_match(value) {
        Some(not_letters)
    } else {
        None
    }
}

fn validate_birth_date(value: &str, today: NaiveDate) -> Option<FieldError> {
    if value.is_empty() {
        return Some(FieldError::BirthDateRequired);
    }
    let Ok(birth) = NaiveDate::parse_from_str(value, "%Y-%m-%d") else {
        return Some(FieldError::BirthDateInvalid);
    };
    // A birth date in the future has no age at all.
    match today.years_since(birth) {
        None => Some(FieldError::Underage),
        Some(age) if age < MIN_AGE => Some(FieldError::Underage),
        Some(age) if age > MAX_PLAUSIBLE_AGE => Some(FieldError::ImplausibleAge),
        Some(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Months;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn complete_info() -> PersonalInfo {
        PersonalInfo {
            first_name: "Ana".to_string(),
            last_name: "Ruiz".to_string(),
            email: "ana@x.com".to_string(),
            phone: "+52 555 123 4567".to_string(),
            date_of_birth: "1990-04-12".to_string(),
            nationality: "mexicana".to_string(),
            current_country: "mexico".to_string(),
            current_city: "Guadalajara".to_string(),
        }
    }

    #[test]
    fn names_accept_spanish_letters() {
        assert_eq!(validate_field(PersonalField::FirstName, "María José", today()), None);
        assert_eq!(validate_field(PersonalField::LastName, "Núñez Güell", today()), None);
    }

    #[test]
    fn name_rules_in_order() {
        assert_eq!(
            validate_field(PersonalField::FirstName, "", today()),
            Some(FieldError::FirstNameRequired)
        );
        assert_eq!(
            validate_field(PersonalField::FirstName, "Á", today()),
            Some(FieldError::FirstNameTooShort)
        );
        assert_eq!(
            validate_field(PersonalField::LastName, "R2D2", today()),
            Some(FieldError::LastNameNotLetters)
        );
    }

    #[test]
    fn email_rules() {
        assert_eq!(
            validate_field(PersonalField::Email, "", today()),
            Some(FieldError::EmailRequired)
        );
        assert_eq!(
            validate_field(PersonalField::Email, "ana@x", today()),
            Some(FieldError::EmailInvalid)
        );
        assert_eq!(
            validate_field(PersonalField::Email, "ana @x.com", today()),
            Some(FieldError::EmailInvalid)
        );
        assert_eq!(validate_field(PersonalField::Email, "ana@x.com", today()), None);
    }

    #[test]
    fn phone_rules() {
        assert_eq!(
            validate_field(PersonalField::Phone, "", today()),
            Some(FieldError::PhoneRequired)
        );
        assert_eq!(
            validate_field(PersonalField::Phone, "555-1234", today()),
            Some(FieldError::PhoneInvalid)
        );
        assert_eq!(
            validate_field(PersonalField::Phone, "55+5123456789", today()),
            Some(FieldError::PhoneInvalid)
        );
        assert_eq!(validate_field(PersonalField::Phone, "+52 (555) 123-4567", today()), None);
        assert_eq!(validate_field(PersonalField::Phone, "5551234567", today()), None);
    }

    #[test]
    fn seventeen_year_old_is_underage() {
        let birth = today().checked_sub_months(Months::new(17 * 12)).unwrap();
        let error = validate_field(
            PersonalField::DateOfBirth,
            &birth.format("%Y-%m-%d").to_string(),
            today(),
        );
        assert_eq!(error, Some(FieldError::Underage));
        assert_eq!(error.unwrap().to_string(), "Debes ser mayor de 18 años");
    }

    #[test]
    fn age_uses_whole_years() {
        assert_eq!(validate_field(PersonalField::DateOfBirth, "2006-06-15", today()), None);
        assert_eq!(
            validate_field(PersonalField::DateOfBirth, "2006-06-16", today()),
            Some(FieldError::Underage)
        );
    }

    #[test]
    fn birth_date_edge_cases() {
        assert_eq!(
            validate_field(PersonalField::DateOfBirth, "", today()),
            Some(FieldError::BirthDateRequired)
        );
        assert_eq!(
            validate_field(PersonalField::DateOfBirth, "12/04/1990", today()),
            Some(FieldError::BirthDateInvalid)
        );
        assert_eq!(
            validate_field(PersonalField::DateOfBirth, "2030-01-01", today()),
            Some(FieldError::Underage)
        );
        assert_eq!(
            validate_field(PersonalField::DateOfBirth, "1930-01-01", today()),
            Some(FieldError::ImplausibleAge)
        );
    }

    #[test]
    fn location_rules() {
        assert_eq!(
            validate_field(PersonalField::CurrentCity, "", today()),
            Some(FieldError::Required)
        );
        assert_eq!(
            validate_field(PersonalField::CurrentCountry, "M", today()),
            Some(FieldError::TooShort)
        );
        assert_eq!(
            validate_field(PersonalField::Nationality, "", today()),
            Some(FieldError::NationalityRequired)
        );
    }

    #[test]
    fn section_validity() {
        assert!(personal_info_is_valid(&complete_info(), today()));

        let missing_phone = PersonalInfo {
            phone: String::new(),
            ..complete_info()
        };
        assert!(!personal_info_is_valid(&missing_phone, today()));
    }

    #[test]
    fn patch_sets_a_single_field() {
        let patch = PersonalField::CurrentCity.patch("Lima".to_string());
        assert_eq!(patch.current_city.as_deref(), Some("Lima"));
        assert!(patch.first_name.is_none());
        assert!(patch.date_of_birth.is_none());
    }

    #[test]
    fn wire_names_parse_back() {
        for field in PersonalField::ALL {
            assert_eq!(field.wire_name().parse::<PersonalField>(), Ok(field));
        }
        assert!("middleName".parse::<PersonalField>().is_err());
    }
}
