//! Maintenance record model.
//!
//! A record logs one maintenance event for a piece of equipment at a site
//! ("sede"). Field inputs are normalised here so every adapter sees the same
//! canonical shape: sites are trimmed, equipment identifiers are uppercased.

use std::fmt;

use chrono::NaiveDate;
use uuid::Uuid;

use super::technician::TechnicianId;

/// Maximum length accepted for short text fields (site, equipment, brand...).
pub const FIELD_MAX: usize = 100;

/// Validation errors returned by the record constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValidationError {
    /// Site was blank once trimmed.
    EmptySite,
    /// Equipment name was blank once trimmed.
    EmptyEquipment,
    /// A short text field exceeded [`FIELD_MAX`] characters.
    FieldTooLong { field: &'static str, max: usize },
}

impl fmt::Display for RecordValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySite => write!(f, "sede must not be empty"),
            Self::EmptyEquipment => write!(f, "equipment must not be empty"),
            Self::FieldTooLong { field, max } => {
                write!(f, "{field} must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for RecordValidationError {}

/// Site ("sede") facet used to scope and filter records.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Site(String);

impl Site {
    /// Validate and construct a [`Site`]. Input is trimmed first.
    pub fn new(site: impl AsRef<str>) -> Result<Self, RecordValidationError> {
        let trimmed = site.as_ref().trim();
        if trimmed.is_empty() {
            return Err(RecordValidationError::EmptySite);
        }
        if trimmed.chars().count() > FIELD_MAX {
            return Err(RecordValidationError::FieldTooLong {
                field: "sede",
                max: FIELD_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Site {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Site> for String {
    fn from(value: Site) -> Self {
        value.0
    }
}

/// Raw field inputs for a draft, prior to validation.
#[derive(Debug, Clone, Default)]
pub struct RecordDraftParts {
    /// Site where the maintenance happened.
    pub site: String,
    /// Date the maintenance was performed.
    pub performed_on: Option<NaiveDate>,
    /// Department or area within the site.
    pub area: String,
    /// Machine name, e.g. the hostname on the asset label.
    pub equipment: String,
    /// Equipment category, e.g. "Portatil".
    pub equipment_type: String,
    /// Manufacturer.
    pub brand: String,
    /// Model designation.
    pub model: String,
    /// Serial number.
    pub serial: String,
    /// Free-text observations describing the work done.
    pub notes: String,
}

/// Validated field set for creating or updating a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDraft {
    site: Site,
    performed_on: NaiveDate,
    area: String,
    equipment: String,
    equipment_type: String,
    brand: String,
    model: String,
    serial: String,
    notes: String,
}

fn bounded(value: &str, field: &'static str) -> Result<String, RecordValidationError> {
    let trimmed = value.trim();
    if trimmed.chars().count() > FIELD_MAX {
        return Err(RecordValidationError::FieldTooLong {
            field,
            max: FIELD_MAX,
        });
    }
    Ok(trimmed.to_owned())
}

// Uppercasing can lengthen a string (one "ß" becomes "SS"), so the bound
// is checked on the canonical form that will actually be stored.
fn bounded_upper(value: &str, field: &'static str) -> Result<String, RecordValidationError> {
    let upper = value.trim().to_uppercase();
    if upper.chars().count() > FIELD_MAX {
        return Err(RecordValidationError::FieldTooLong {
            field,
            max: FIELD_MAX,
        });
    }
    Ok(upper)
}

impl RecordDraft {
    /// Validate raw inputs into a canonical draft.
    ///
    /// Asset-tag style fields (equipment, brand, model, serial) are
    /// uppercased so searches and exports see one casing.
    pub fn new(parts: RecordDraftParts) -> Result<Self, RecordValidationError> {
        let site = Site::new(&parts.site)?;
        let equipment = bounded_upper(&parts.equipment, "equipment")?;
        if equipment.is_empty() {
            return Err(RecordValidationError::EmptyEquipment);
        }
        Ok(Self {
            site,
            performed_on: parts
                .performed_on
                .unwrap_or_else(|| chrono::Utc::now().date_naive()),
            area: bounded(&parts.area, "area")?,
            equipment,
            equipment_type: bounded(&parts.equipment_type, "equipmentType")?,
            brand: bounded_upper(&parts.brand, "brand")?,
            model: bounded_upper(&parts.model, "model")?,
            serial: bounded_upper(&parts.serial, "serial")?,
            notes: parts.notes.trim().to_owned(),
        })
    }

    /// Site where the maintenance happened.
    pub fn site(&self) -> &Site {
        &self.site
    }

    /// Date the maintenance was performed.
    pub fn performed_on(&self) -> NaiveDate {
        self.performed_on
    }

    /// Department or area within the site.
    pub fn area(&self) -> &str {
        &self.area
    }

    /// Machine name.
    pub fn equipment(&self) -> &str {
        &self.equipment
    }

    /// Equipment category.
    pub fn equipment_type(&self) -> &str {
        &self.equipment_type
    }

    /// Manufacturer.
    pub fn brand(&self) -> &str {
        &self.brand
    }

    /// Model designation.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Serial number.
    pub fn serial(&self) -> &str {
        &self.serial
    }

    /// Free-text observations.
    pub fn notes(&self) -> &str {
        &self.notes
    }
}

/// Persisted maintenance record.
///
/// ## Invariants
/// - `technician_id` resolves to an existing [`super::Technician`]
///   (enforced by the persistence layer's foreign key).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaintenanceRecord {
    id: Uuid,
    technician_id: TechnicianId,
    draft: RecordDraft,
}

impl MaintenanceRecord {
    /// Assemble a record from its identifier, owner, and validated fields.
    pub fn new(id: Uuid, technician_id: TechnicianId, draft: RecordDraft) -> Self {
        Self {
            id,
            technician_id,
            draft,
        }
    }

    /// Stable record identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Owning technician.
    pub fn technician_id(&self) -> &TechnicianId {
        &self.technician_id
    }

    /// Site where the maintenance happened.
    pub fn site(&self) -> &Site {
        self.draft.site()
    }

    /// Date the maintenance was performed.
    pub fn performed_on(&self) -> NaiveDate {
        self.draft.performed_on()
    }

    /// Department or area within the site.
    pub fn area(&self) -> &str {
        self.draft.area()
    }

    /// Machine name.
    pub fn equipment(&self) -> &str {
        self.draft.equipment()
    }

    /// Equipment category.
    pub fn equipment_type(&self) -> &str {
        self.draft.equipment_type()
    }

    /// Manufacturer.
    pub fn brand(&self) -> &str {
        self.draft.brand()
    }

    /// Model designation.
    pub fn model(&self) -> &str {
        self.draft.model()
    }

    /// Serial number.
    pub fn serial(&self) -> &str {
        self.draft.serial()
    }

    /// Free-text observations.
    pub fn notes(&self) -> &str {
        self.draft.notes()
    }

    /// Borrow the validated field set.
    pub fn draft(&self) -> &RecordDraft {
        &self.draft
    }
}

/// Records returned per listing page.
pub const PER_PAGE: i64 = 20;

/// Listing criteria: every field is optional and composes with the others.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    /// Exact site match.
    pub site: Option<Site>,
    /// Case-insensitive substring over sede, area, equipment, equipment
    /// type, brand, model, serial, and notes.
    pub search: Option<String>,
    /// One-based page number. Defaults to the first page.
    pub page: Option<u32>,
}

impl RecordFilter {
    /// One-based page this filter selects.
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    /// Row offset for the selected page.
    pub fn offset(&self) -> i64 {
        i64::from(self.page() - 1) * PER_PAGE
    }
}

/// One page of listing results plus pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordPage {
    /// Records on this page, oldest first.
    pub records: Vec<MaintenanceRecord>,
    /// Total records matching the filter across all pages.
    pub total: i64,
    /// One-based page number that was requested.
    pub page: u32,
}

impl RecordPage {
    /// Number of pages needed for `total` records at [`PER_PAGE`] per page.
    pub fn total_pages(&self) -> u32 {
        let pages = (self.total + PER_PAGE - 1) / PER_PAGE;
        u32::try_from(pages.max(1)).unwrap_or(u32::MAX)
    }
}

/// Record joined with its owner's display name, as rendered into exports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRecord {
    /// The maintenance record itself.
    pub record: MaintenanceRecord,
    /// Display name of the owning technician.
    pub technician: String,
}

/// Aggregate counts over the whole record set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordStats {
    /// Total number of records.
    pub total: i64,
    /// Distinct technicians with at least one record.
    pub technicians: i64,
    /// Record count per site, descending by count.
    pub by_site: Vec<(String, i64)>,
    /// Record count per equipment type, descending by count.
    pub by_equipment_type: Vec<(String, i64)>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parts() -> RecordDraftParts {
        RecordDraftParts {
            site: "Barranquilla".into(),
            performed_on: NaiveDate::from_ymd_opt(2025, 6, 14),
            area: "Contabilidad".into(),
            equipment: "pc-conta-07".into(),
            equipment_type: "Portatil".into(),
            brand: "lenovo".into(),
            model: "t14".into(),
            serial: "pf-3xk9".into(),
            notes: "Limpieza interna y cambio de pasta termica".into(),
        }
    }

    #[rstest]
    fn draft_normalises_asset_fields_to_uppercase() {
        let draft = RecordDraft::new(parts()).expect("valid draft");
        assert_eq!(draft.equipment(), "PC-CONTA-07");
        assert_eq!(draft.brand(), "LENOVO");
        assert_eq!(draft.model(), "T14");
        assert_eq!(draft.serial(), "PF-3XK9");
        // Human text keeps its casing.
        assert_eq!(draft.area(), "Contabilidad");
    }

    #[rstest]
    fn draft_defaults_missing_date_to_today() {
        let mut input = parts();
        input.performed_on = None;
        let draft = RecordDraft::new(input).expect("valid draft");
        assert_eq!(draft.performed_on(), chrono::Utc::now().date_naive());
    }

    #[rstest]
    #[case("", RecordValidationError::EmptySite)]
    #[case("   ", RecordValidationError::EmptySite)]
    fn blank_sites_are_rejected(#[case] site: &str, #[case] expected: RecordValidationError) {
        let mut input = parts();
        input.site = site.into();
        let err = RecordDraft::new(input).expect_err("blank site must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn blank_equipment_is_rejected() {
        let mut input = parts();
        input.equipment = "   ".into();
        let err = RecordDraft::new(input).expect_err("blank equipment must fail");
        assert_eq!(err, RecordValidationError::EmptyEquipment);
    }

    #[rstest]
    fn overlong_fields_are_rejected() {
        let mut input = parts();
        input.brand = "x".repeat(FIELD_MAX + 1);
        let err = RecordDraft::new(input).expect_err("overlong brand must fail");
        assert_eq!(
            err,
            RecordValidationError::FieldTooLong {
                field: "brand",
                max: FIELD_MAX
            }
        );
    }

    #[rstest]
    fn length_bound_applies_to_the_uppercased_form() {
        let mut input = parts();
        // 100 characters of "ß" uppercase to 200 characters of "SS".
        input.serial = "ß".repeat(FIELD_MAX);
        let err = RecordDraft::new(input).expect_err("expanding serial must fail");
        assert_eq!(
            err,
            RecordValidationError::FieldTooLong {
                field: "serial",
                max: FIELD_MAX
            }
        );
    }

    #[rstest]
    #[case(None, 1, 0)]
    #[case(Some(1), 1, 0)]
    #[case(Some(3), 3, 40)]
    fn filter_pagination_maths(
        #[case] page: Option<u32>,
        #[case] expected_page: u32,
        #[case] expected_offset: i64,
    ) {
        let filter = RecordFilter {
            page,
            ..RecordFilter::default()
        };
        assert_eq!(filter.page(), expected_page);
        assert_eq!(filter.offset(), expected_offset);
    }

    #[rstest]
    #[case(0, 1)]
    #[case(1, 1)]
    #[case(20, 1)]
    #[case(21, 2)]
    #[case(41, 3)]
    fn page_count_rounds_up(#[case] total: i64, #[case] expected: u32) {
        let page = RecordPage {
            records: Vec::new(),
            total,
            page: 1,
        };
        assert_eq!(page.total_pages(), expected);
    }

    #[rstest]
    fn site_trims_surrounding_whitespace() {
        let site = Site::new("  Santa Marta  ").expect("valid site");
        assert_eq!(site.as_ref(), "Santa Marta");
    }
}
