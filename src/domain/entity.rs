//! Entity span data models
//!
//! Detected entity spans and the fixed allow-list of entity categories the
//! service will ever redact. Spans for categories outside the allow-list are
//! discarded regardless of which recognizer produced them.

use serde::{Deserialize, Serialize};

/// Entity category allow-list covering global and region-specific sensitive identifiers
///
/// This is a closed set: detection results are filtered against it before
/// redaction, and model labels with no mapping into it are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityCategory {
    // Global
    CreditCard,
    Crypto,
    DateTime,
    EmailAddress,
    IbanCode,
    IpAddress,
    /// Nationality, religious or political group
    Nrp,
    Location,
    Person,
    PhoneNumber,
    MedicalLicense,
    Url,

    // USA
    UsBankNumber,
    UsDriverLicense,
    UsItin,
    UsPassport,
    UsSsn,

    // UK
    UkNhs,

    // Spain
    EsNif,

    // Italy
    ItFiscalCode,
    ItDriverLicense,
    ItVatCode,
    ItPassport,
    ItIdentityCard,

    // Poland
    PlPesel,

    // Singapore
    SgNricFin,
    SgUen,

    // Australia
    AuAbn,
    AuAcn,
    AuTfn,
    AuMedicare,

    // India
    InPan,
    InAadhaar,
    InVehicleRegistration,
}

impl EntityCategory {
    /// Every allow-listed category, in declaration order
    pub const ALL: [EntityCategory; 34] = [
        Self::CreditCard,
        Self::Crypto,
        Self::DateTime,
        Self::EmailAddress,
        Self::IbanCode,
        Self::IpAddress,
        Self::Nrp,
        Self::Location,
        Self::Person,
        Self::PhoneNumber,
        Self::MedicalLicense,
        Self::Url,
        Self::UsBankNumber,
        Self::UsDriverLicense,
        Self::UsItin,
        Self::UsPassport,
        Self::UsSsn,
        Self::UkNhs,
        Self::EsNif,
        Self::ItFiscalCode,
        Self::ItDriverLicense,
        Self::ItVatCode,
        Self::ItPassport,
        Self::ItIdentityCard,
        Self::PlPesel,
        Self::SgNricFin,
        Self::SgUen,
        Self::AuAbn,
        Self::AuAcn,
        Self::AuTfn,
        Self::AuMedicare,
        Self::InPan,
        Self::InAadhaar,
        Self::InVehicleRegistration,
    ];

    /// Canonical label for the category (the wire/redaction-marker form)
    pub fn label(&self) -> &'static str {
        match self {
            Self::CreditCard => "CREDIT_CARD",
            Self::Crypto => "CRYPTO",
            Self::DateTime => "DATE_TIME",
            Self::EmailAddress => "EMAIL_ADDRESS",
            Self::IbanCode => "IBAN_CODE",
            Self::IpAddress => "IP_ADDRESS",
            Self::Nrp => "NRP",
            Self::Location => "LOCATION",
            Self::Person => "PERSON",
            Self::PhoneNumber => "PHONE_NUMBER",
            Self::MedicalLicense => "MEDICAL_LICENSE",
            Self::Url => "URL",
            Self::UsBankNumber => "US_BANK_NUMBER",
            Self::UsDriverLicense => "US_DRIVER_LICENSE",
            Self::UsItin => "US_ITIN",
            Self::UsPassport => "US_PASSPORT",
            Self::UsSsn => "US_SSN",
            Self::UkNhs => "UK_NHS",
            Self::EsNif => "ES_NIF",
            Self::ItFiscalCode => "IT_FISCAL_CODE",
            Self::ItDriverLicense => "IT_DRIVER_LICENSE",
            Self::ItVatCode => "IT_VAT_CODE",
            Self::ItPassport => "IT_PASSPORT",
            Self::ItIdentityCard => "IT_IDENTITY_CARD",
            Self::PlPesel => "PL_PESEL",
            Self::SgNricFin => "SG_NRIC_FIN",
            Self::SgUen => "SG_UEN",
            Self::AuAbn => "AU_ABN",
            Self::AuAcn => "AU_ACN",
            Self::AuTfn => "AU_TFN",
            Self::AuMedicare => "AU_MEDICARE",
            Self::InPan => "IN_PAN",
            Self::InAadhaar => "IN_AADHAAR",
            Self::InVehicleRegistration => "IN_VEHICLE_REGISTRATION",
        }
    }

    /// Parse a canonical label back into a category
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.label() == label)
    }
}

impl std::fmt::Display for EntityCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// How a span was detected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionSource {
    /// Regex pattern matching
    Pattern,
    /// Named entity recognition model
    NerModel,
}

/// A detected entity span within free text
///
/// Offsets are byte offsets into the original text, `start` inclusive and
/// `end` exclusive, and always fall on UTF-8 character boundaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySpan {
    /// Allow-listed category of the entity
    pub category: EntityCategory,
    /// Start byte offset (inclusive)
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
    /// Confidence score (0.0 - 1.0)
    pub score: f32,
    /// Which recognizer produced the span
    pub source: DetectionSource,
}

impl EntitySpan {
    /// Create a new span, clamping the score into [0, 1]
    pub fn new(
        category: EntityCategory,
        start: usize,
        end: usize,
        score: f32,
        source: DetectionSource,
    ) -> Self {
        Self {
            category,
            start,
            end,
            score: score.clamp(0.0, 1.0),
            source,
        }
    }

    /// Span length in bytes
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the span is empty
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Whether two spans overlap
    pub fn overlaps(&self, other: &EntitySpan) -> bool {
        self.start < other.end && other.start < self.end
    }
}
