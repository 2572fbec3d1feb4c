//! Liqueur aggregate and its value types.
//!
//! A liqueur is the only entity the service manages. Every persisted record
//! carries a store-assigned [`LiqueurId`] plus the three required fields.
//! Updates are expressed as a [`LiqueurPatch`] where absent fields keep
//! their stored value.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use uuid::Uuid;

/// Validation errors raised by the liqueur value constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiqueurValidationError {
    /// The identifier is not a canonical UUID.
    InvalidId,
    /// The name is empty once trimmed.
    EmptyName,
    /// The alcohol degree is NaN or infinite.
    NonFiniteDegree,
    /// The date cannot be parsed or lies outside the storable range.
    InvalidManufacturingDate,
}

impl fmt::Display for LiqueurValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "liqueur id must be a valid UUID"),
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::NonFiniteDegree => write!(f, "degreeOfAlcohol must be a finite number"),
            Self::InvalidManufacturingDate => write!(
                f,
                "manufacturingDate must be a date (YYYY-MM-DD) or an RFC 3339 timestamp \
                 no earlier than 4713 BC",
            ),
        }
    }
}

impl std::error::Error for LiqueurValidationError {}

/// Store-assigned liqueur identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LiqueurId(Uuid);

impl LiqueurId {
    /// Parse an identifier from its textual form.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::LiqueurId;
    ///
    /// let id = LiqueurId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("valid id");
    /// assert_eq!(id.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
    /// assert!(LiqueurId::new("5f8d0d55b54764421b7156c9").is_err());
    /// ```
    pub fn new(id: impl AsRef<str>) -> Result<Self, LiqueurValidationError> {
        let raw = id.as_ref();
        if raw.trim() != raw {
            return Err(LiqueurValidationError::InvalidId);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| LiqueurValidationError::InvalidId)
    }

    /// Generate a fresh identifier for a new record.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an identifier loaded from storage.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for LiqueurId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Liqueur display name; never blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiqueurName(String);

impl LiqueurName {
    /// Validate and construct a name.
    pub fn new(name: impl Into<String>) -> Result<Self, LiqueurValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(LiqueurValidationError::EmptyName);
        }
        Ok(Self(name))
    }
}

impl AsRef<str> for LiqueurName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for LiqueurName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Alcohol content as a percentage by volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DegreeOfAlcohol(f64);

impl DegreeOfAlcohol {
    /// Validate and construct an alcohol degree.
    pub fn new(value: f64) -> Result<Self, LiqueurValidationError> {
        if !value.is_finite() {
            return Err(LiqueurValidationError::NonFiniteDegree);
        }
        Ok(Self(value))
    }

    /// Raw numeric value.
    pub fn value(self) -> f64 {
        self.0
    }
}

/// Manufacturing date stored as a UTC instant.
///
/// Textual input is lenient. A bare calendar date means midnight UTC and a
/// timestamp without an offset is read as UTC; RFC 3339 timestamps keep their
/// instant.
///
/// # Examples
/// ```
/// use backend::domain::ManufacturingDate;
///
/// let date: ManufacturingDate = "2020-01-01".parse().expect("valid date");
/// assert_eq!(date.to_string(), "2020-01-01T00:00:00.000Z");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ManufacturingDate(DateTime<Utc>);

/// Earliest year PostgreSQL `timestamptz` holds: 4713 BC in proleptic
/// Gregorian numbering.
const EARLIEST_STORABLE_YEAR: i32 = -4712;

impl ManufacturingDate {
    /// Wrap an instant, rejecting years before 4713 BC.
    pub fn new(value: DateTime<Utc>) -> Result<Self, LiqueurValidationError> {
        if value.year() < EARLIEST_STORABLE_YEAR {
            return Err(LiqueurValidationError::InvalidManufacturingDate);
        }
        Ok(Self(value))
    }

    /// Build a date from milliseconds since the Unix epoch.
    pub fn from_timestamp_millis(millis: i64) -> Result<Self, LiqueurValidationError> {
        DateTime::from_timestamp_millis(millis)
            .ok_or(LiqueurValidationError::InvalidManufacturingDate)
            .and_then(Self::new)
    }

    /// Underlying instant.
    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }
}

impl FromStr for ManufacturingDate {
    type Err = LiqueurValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
            return Self::new(timestamp.with_timezone(&Utc));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
            return Self::new(naive.and_utc());
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .ok_or(LiqueurValidationError::InvalidManufacturingDate)
            .and_then(|naive| Self::new(naive.and_utc()))
    }
}

impl fmt::Display for ManufacturingDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

/// Field values for a liqueur that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLiqueur {
    /// Display name.
    pub name: LiqueurName,
    /// Alcohol content.
    pub degree_of_alcohol: DegreeOfAlcohol,
    /// Manufacturing instant.
    pub manufacturing_date: ManufacturingDate,
}

/// Persisted liqueur record.
///
/// ## Invariants
/// - `id` is assigned once at insertion and never changes.
/// - All three descriptive fields are always present.
#[derive(Debug, Clone, PartialEq)]
pub struct Liqueur {
    id: LiqueurId,
    name: LiqueurName,
    degree_of_alcohol: DegreeOfAlcohol,
    manufacturing_date: ManufacturingDate,
}

impl Liqueur {
    /// Combine an identifier with validated field values.
    pub fn new(id: LiqueurId, fields: NewLiqueur) -> Self {
        let NewLiqueur {
            name,
            degree_of_alcohol,
            manufacturing_date,
        } = fields;
        Self {
            id,
            name,
            degree_of_alcohol,
            manufacturing_date,
        }
    }

    /// Store-assigned identifier.
    pub fn id(&self) -> LiqueurId {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &LiqueurName {
        &self.name
    }

    /// Alcohol content.
    pub fn degree_of_alcohol(&self) -> DegreeOfAlcohol {
        self.degree_of_alcohol
    }

    /// Manufacturing instant.
    pub fn manufacturing_date(&self) -> ManufacturingDate {
        self.manufacturing_date
    }
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LiqueurPatch {
    /// Replacement name.
    pub name: Option<LiqueurName>,
    /// Replacement alcohol content.
    pub degree_of_alcohol: Option<DegreeOfAlcohol>,
    /// Replacement manufacturing instant.
    pub manufacturing_date: Option<ManufacturingDate>,
}

impl LiqueurPatch {
    /// Apply the patch in place and report whether any stored value changed.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{
    ///     DegreeOfAlcohol, Liqueur, LiqueurId, LiqueurName, LiqueurPatch, NewLiqueur,
    /// };
    ///
    /// let mut liqueur = Liqueur::new(
    ///     LiqueurId::random(),
    ///     NewLiqueur {
    ///         name: LiqueurName::new("Chartreuse").expect("name"),
    ///         degree_of_alcohol: DegreeOfAlcohol::new(55.0).expect("degree"),
    ///         manufacturing_date: "2019-05-01".parse().expect("date"),
    ///     },
    /// );
    /// let patch = LiqueurPatch {
    ///     degree_of_alcohol: Some(DegreeOfAlcohol::new(40.0).expect("degree")),
    ///     ..LiqueurPatch::default()
    /// };
    /// assert!(patch.apply_to(&mut liqueur));
    /// assert!(!patch.apply_to(&mut liqueur));
    /// assert_eq!(liqueur.name().as_ref(), "Chartreuse");
    /// ```
    pub fn apply_to(&self, liqueur: &mut Liqueur) -> bool {
        let mut changed = false;
        if let Some(name) = self.name.as_ref().filter(|name| **name != liqueur.name) {
            liqueur.name = name.clone();
            changed = true;
        }
        if let Some(degree) = self
            .degree_of_alcohol
            .filter(|degree| *degree != liqueur.degree_of_alcohol)
        {
            liqueur.degree_of_alcohol = degree;
            changed = true;
        }
        if let Some(date) = self
            .manufacturing_date
            .filter(|date| *date != liqueur.manufacturing_date)
        {
            liqueur.manufacturing_date = date;
            changed = true;
        }
        changed
    }
}

/// Result of a partial update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// Records carrying the requested identifier (0 or 1).
    pub matched_count: u64,
    /// Records whose stored values changed (0 or 1).
    pub modified_count: u64,
}

impl UpdateOutcome {
    /// No record carried the requested identifier.
    pub const fn unmatched() -> Self {
        Self {
            matched_count: 0,
            modified_count: 0,
        }
    }

    /// One record matched; `modified` tells whether any value changed.
    pub const fn matched(modified: bool) -> Self {
        Self {
            matched_count: 1,
            modified_count: if modified { 1 } else { 0 },
        }
    }
}

/// Result of a delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteOutcome {
    /// Records removed (0 or 1).
    pub deleted_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::{fixture, rstest};

    #[fixture]
    fn liqueur() -> Liqueur {
        Liqueur::new(
            LiqueurId::random(),
            NewLiqueur {
                name: LiqueurName::new("Johnnie Walker").expect("valid name"),
                degree_of_alcohol: DegreeOfAlcohol::new(40.0).expect("valid degree"),
                manufacturing_date: "2020-01-01".parse().expect("valid date"),
            },
        )
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t\n")]
    fn name_rejects_blank_values(#[case] raw: &str) {
        assert_eq!(
            LiqueurName::new(raw),
            Err(LiqueurValidationError::EmptyName)
        );
    }

    #[rstest]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    #[case(f64::NEG_INFINITY)]
    fn degree_rejects_non_finite_values(#[case] value: f64) {
        assert_eq!(
            DegreeOfAlcohol::new(value),
            Err(LiqueurValidationError::NonFiniteDegree)
        );
    }

    #[rstest]
    #[case("not-a-uuid")]
    #[case("5f8d0d55b54764421b7156c9")]
    #[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    fn id_rejects_malformed_values(#[case] raw: &str) {
        assert_eq!(LiqueurId::new(raw), Err(LiqueurValidationError::InvalidId));
    }

    #[rstest]
    #[case("2020-01-01", Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap())]
    #[case("2020-01-01T10:30:00", Utc.with_ymd_and_hms(2020, 1, 1, 10, 30, 0).unwrap())]
    #[case("2020-01-01T10:30:00Z", Utc.with_ymd_and_hms(2020, 1, 1, 10, 30, 0).unwrap())]
    #[case("2020-01-01T12:30:00+02:00", Utc.with_ymd_and_hms(2020, 1, 1, 10, 30, 0).unwrap())]
    fn manufacturing_date_accepts_lenient_forms(
        #[case] raw: &str,
        #[case] expected: DateTime<Utc>,
    ) {
        let parsed: ManufacturingDate = raw.parse().expect("valid date");
        assert_eq!(parsed.as_datetime(), expected);
    }

    #[rstest]
    #[case("yesterday")]
    #[case("2020-13-01")]
    #[case("")]
    fn manufacturing_date_rejects_garbage(#[case] raw: &str) {
        assert_eq!(
            raw.parse::<ManufacturingDate>(),
            Err(LiqueurValidationError::InvalidManufacturingDate)
        );
    }

    #[rstest]
    #[case("-5000-01-01")]
    #[case("-4713-12-31T23:59:59")]
    #[case("-4713-06-15T12:00:00")]
    fn manufacturing_date_rejects_instants_postgres_cannot_store(#[case] raw: &str) {
        assert_eq!(
            raw.parse::<ManufacturingDate>(),
            Err(LiqueurValidationError::InvalidManufacturingDate)
        );
    }

    #[rstest]
    fn manufacturing_date_accepts_the_earliest_storable_year() {
        let parsed: ManufacturingDate = "-4712-01-01".parse().expect("storable date");
        assert_eq!(parsed.as_datetime().year(), -4712);
    }

    #[rstest]
    fn manufacturing_date_rejects_out_of_range_epoch_millis() {
        let millis = Utc
            .with_ymd_and_hms(-5000, 1, 1, 0, 0, 0)
            .unwrap()
            .timestamp_millis();
        assert_eq!(
            ManufacturingDate::from_timestamp_millis(millis),
            Err(LiqueurValidationError::InvalidManufacturingDate)
        );
    }

    #[rstest]
    fn manufacturing_date_renders_with_millisecond_precision() {
        let date = ManufacturingDate::from_timestamp_millis(1_577_836_800_123).expect("in range");
        assert_eq!(date.to_string(), "2020-01-01T00:00:00.123Z");
    }

    #[rstest]
    fn empty_patch_changes_nothing(mut liqueur: Liqueur) {
        let before = liqueur.clone();
        let patch = LiqueurPatch::default();

        assert!(!patch.apply_to(&mut liqueur));
        assert_eq!(liqueur, before);
    }

    #[rstest]
    fn patch_replaces_only_present_fields(mut liqueur: Liqueur) {
        let before = liqueur.clone();
        let patch = LiqueurPatch {
            name: Some(LiqueurName::new("Jameson").expect("valid name")),
            ..LiqueurPatch::default()
        };

        assert!(patch.apply_to(&mut liqueur));
        assert_eq!(liqueur.name().as_ref(), "Jameson");
        assert_eq!(liqueur.id(), before.id());
        assert_eq!(liqueur.degree_of_alcohol(), before.degree_of_alcohol());
        assert_eq!(liqueur.manufacturing_date(), before.manufacturing_date());
    }

    #[rstest]
    fn patch_with_identical_values_reports_no_change(mut liqueur: Liqueur) {
        let patch = LiqueurPatch {
            name: Some(liqueur.name().clone()),
            degree_of_alcohol: Some(liqueur.degree_of_alcohol()),
            manufacturing_date: Some(liqueur.manufacturing_date()),
        };

        assert!(!patch.apply_to(&mut liqueur));
    }

    #[rstest]
    fn update_outcome_constructors() {
        assert_eq!(UpdateOutcome::unmatched().matched_count, 0);
        assert_eq!(UpdateOutcome::matched(false).modified_count, 0);
        assert_eq!(UpdateOutcome::matched(true).modified_count, 1);
    }
}
