//! Data-quality warnings and the `(result, warnings)` carrier every stage returns.

use serde::{Deserialize, Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WarningSeverity {
    High,
    Medium,
    Low,
}

/// Fixed warning codes. The serialized form is the `WARN_*` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningCode {
    PhoneMissing,
    EmailMissing,
    AddressMissing,
    AddressPartialMissingStreet,
    AddressPartialFromText,
    AddressBlob,
    HoursMissing,
    HoursBlob,
    NameFromDomain,
    NameFromTitle,
    LogoMissing,
    LogoOversized,
    CtaUnclear,
    PrimaryCtaNotIntent,
    ServicesMissing,
    TrustMissing,
    ContactFormMissing,
    CityMissing,
    ScreenshotsMissing,
}

impl WarningCode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            WarningCode::PhoneMissing => "WARN_PHONE_MISSING",
            WarningCode::EmailMissing => "WARN_EMAIL_MISSING",
            WarningCode::AddressMissing => "WARN_ADDRESS_MISSING",
            WarningCode::AddressPartialMissingStreet => "WARN_ADDRESS_PARTIAL_MISSING_STREET",
            WarningCode::AddressPartialFromText => "WARN_ADDRESS_PARTIAL_FROM_TEXT",
            WarningCode::AddressBlob => "WARN_ADDRESS_BLOB",
            WarningCode::HoursMissing => "WARN_HOURS_MISSING",
            WarningCode::HoursBlob => "WARN_HOURS_BLOB",
            WarningCode::NameFromDomain => "WARN_NAME_FROM_DOMAIN",
            WarningCode::NameFromTitle => "WARN_NAME_FROM_TITLE",
            WarningCode::LogoMissing => "WARN_LOGO_MISSING",
            WarningCode::LogoOversized => "WARN_LOGO_OVERSIZED",
            WarningCode::CtaUnclear => "WARN_CTA_UNCLEAR",
            WarningCode::PrimaryCtaNotIntent => "WARN_PRIMARY_CTA_NOT_INTENT",
            WarningCode::ServicesMissing => "WARN_SERVICES_MISSING",
            WarningCode::TrustMissing => "WARN_TRUST_MISSING",
            WarningCode::ContactFormMissing => "WARN_CONTACT_FORM_MISSING",
            WarningCode::CityMissing => "WARN_CITY_MISSING",
            WarningCode::ScreenshotsMissing => "WARN_SCREENSHOTS_MISSING",
        }
    }

    #[must_use]
    pub fn severity(self) -> WarningSeverity {
        match self {
            WarningCode::PhoneMissing | WarningCode::CtaUnclear => WarningSeverity::High,
            WarningCode::AddressMissing
            | WarningCode::AddressPartialFromText
            | WarningCode::AddressBlob
            | WarningCode::NameFromDomain
            | WarningCode::NameFromTitle
            | WarningCode::PrimaryCtaNotIntent
            | WarningCode::ServicesMissing
            | WarningCode::CityMissing => WarningSeverity::Medium,
            WarningCode::EmailMissing
            | WarningCode::AddressPartialMissingStreet
            | WarningCode::HoursMissing
            | WarningCode::HoursBlob
            | WarningCode::LogoMissing
            | WarningCode::LogoOversized
            | WarningCode::TrustMissing
            | WarningCode::ContactFormMissing
            | WarningCode::ScreenshotsMissing => WarningSeverity::Low,
        }
    }
}

impl std::fmt::Display for WarningCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for WarningCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataQualityWarning {
    pub code: WarningCode,
    pub severity: WarningSeverity,
    pub message: String,
}

impl DataQualityWarning {
    #[must_use]
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            severity: code.severity(),
            message: message.into(),
        }
    }
}

/// A stage result paired with the warnings raised while producing it.
#[derive(Debug, Clone, PartialEq)]
pub struct Staged<T> {
    pub value: T,
    pub warnings: Vec<DataQualityWarning>,
}

impl<T> Staged<T> {
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_warning(mut self, code: WarningCode, message: impl Into<String>) -> Self {
        self.warnings.push(DataQualityWarning::new(code, message));
        self
    }

    pub fn warn(&mut self, code: WarningCode, message: impl Into<String>) {
        self.warnings.push(DataQualityWarning::new(code, message));
    }

    /// Moves `other`'s warnings into `self` and returns its value.
    pub fn absorb<U>(&mut self, other: Staged<U>) -> U {
        self.warnings.extend(other.warnings);
        other.value
    }

    pub fn map<U, F>(self, f: F) -> Staged<U>
    where
        F: FnOnce(T) -> U,
    {
        Staged {
            value: f(self.value),
            warnings: self.warnings,
        }
    }

    #[must_use]
    pub fn has_warning(&self, code: WarningCode) -> bool {
        self.warnings.iter().any(|w| w.code == code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_serializes_as_warn_string() {
        let w = DataQualityWarning::new(WarningCode::HoursBlob, "kept verbatim");
        let json = serde_json::to_value(&w).unwrap();
        assert_eq!(json["code"], "WARN_HOURS_BLOB");
        assert_eq!(json["severity"], "low");
    }

    #[test]
    fn absorb_moves_warnings_and_returns_value() {
        let mut outer = Staged::new(());
        let inner = Staged::new(7).with_warning(WarningCode::PhoneMissing, "none");
        let v = outer.absorb(inner);
        assert_eq!(v, 7);
        assert!(outer.has_warning(WarningCode::PhoneMissing));
    }

    #[test]
    fn phone_missing_is_high_severity() {
        assert_eq!(WarningCode::PhoneMissing.severity(), WarningSeverity::High);
        assert_eq!(WarningCode::EmailMissing.severity(), WarningSeverity::Low);
    }
}
