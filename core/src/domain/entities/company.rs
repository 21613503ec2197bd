//! Company entity with derived slug, geocoded location and aggregate fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::schema::{Constraint, FieldRule};
use wl_shared::utils::validation::{is_valid_email, is_valid_url};

/// Default photo filename until an upload replaces it
pub const DEFAULT_PHOTO: &str = "no-photo.jpg";

/// Industry a company operates in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Industry {
    Accounting,
    Marketing,
    Tech,
    Consulting,
    Insurance,
    Retail,
    Other,
}

/// Accepted string spellings, used by the schema rules
pub const INDUSTRY_NAMES: &[&str] = &[
    "Accounting",
    "Marketing",
    "Tech",
    "Consulting",
    "Insurance",
    "Retail",
    "Other",
];

impl std::str::FromStr for Industry {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Accounting" => Ok(Industry::Accounting),
            "Marketing" => Ok(Industry::Marketing),
            "Tech" => Ok(Industry::Tech),
            "Consulting" => Ok(Industry::Consulting),
            "Insurance" => Ok(Industry::Insurance),
            "Retail" => Ok(Industry::Retail),
            "Other" => Ok(Industry::Other),
            _ => Err(()),
        }
    }
}

/// Geocoded company location: a GeoJSON-style point plus the normalized
/// address breakdown returned by the geocoding provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// `[longitude, latitude]`
    pub coordinates: [f64; 2],

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zipcode: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// Company entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    /// Unique identifier
    pub id: Uuid,

    /// Display name (unique)
    pub name: String,

    /// URL slug derived from the name on every write
    pub slug: String,

    /// Company description
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Geocoded location; absent until the geocoder has resolved an address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,

    /// Industries the company operates in
    pub industries: Vec<Industry>,

    /// Derived mean review rating (1-10); absent while no reviews exist
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<f64>,

    /// Derived ceiling of the mean job salary; absent while no jobs exist
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_salary: Option<u64>,

    /// Uploaded photo filename
    pub photo: String,

    /// Whether the company supports remote work
    pub remote_work: bool,

    /// Owning user
    pub owner: Uuid,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Company {
    /// Creates a company shell; slug and location are filled in by the
    /// pre-write pipeline before persisting
    pub fn new(
        name: String,
        description: String,
        industries: Vec<Industry>,
        owner: Uuid,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            slug: String::new(),
            description,
            website: None,
            phone: None,
            email: None,
            location: None,
            industries,
            average_rating: None,
            average_salary: None,
            photo: DEFAULT_PHOTO.to_string(),
            remote_work: false,
            owner,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Schema rules for company creation
pub static CREATE_RULES: &[FieldRule] = &[
    FieldRule {
        field: "name",
        constraint: Constraint::Required,
        message: "Name is required",
    },
    FieldRule {
        field: "name",
        constraint: Constraint::MaxLength(50),
        message: "Name can not be more than 50 characters",
    },
    FieldRule {
        field: "description",
        constraint: Constraint::Required,
        message: "Description is required",
    },
    FieldRule {
        field: "description",
        constraint: Constraint::MaxLength(500),
        message: "Description can not be more than 500 characters",
    },
    FieldRule {
        field: "website",
        constraint: Constraint::Matches(is_valid_url),
        message: "Please use a valid URL with HTTP or HTTPS",
    },
    FieldRule {
        field: "phone",
        constraint: Constraint::MaxLength(20),
        message: "Phone number can not be longer than 20 characters",
    },
    FieldRule {
        field: "email",
        constraint: Constraint::Matches(is_valid_email),
        message: "Please add a valid email",
    },
    FieldRule {
        field: "address",
        constraint: Constraint::Required,
        message: "Please add an address",
    },
    FieldRule {
        field: "industries",
        constraint: Constraint::NonEmptyList,
        message: "At least one industry is required",
    },
    FieldRule {
        field: "industries",
        constraint: Constraint::EachOneOf(INDUSTRY_NAMES),
        message: "Industry must be one of the supported values",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_company_defaults() {
        let company = Company::new(
            "Acme".to_string(),
            "We make anvils".to_string(),
            vec![Industry::Tech],
            Uuid::new_v4(),
        );

        assert_eq!(company.photo, DEFAULT_PHOTO);
        assert!(!company.remote_work);
        assert!(company.average_rating.is_none());
        assert!(company.average_salary.is_none());
        assert!(company.location.is_none());
    }

    #[test]
    fn test_industry_parsing() {
        assert_eq!("Tech".parse::<Industry>(), Ok(Industry::Tech));
        assert!("tech".parse::<Industry>().is_err());
        assert!("Aviation".parse::<Industry>().is_err());
    }

    #[test]
    fn test_aggregates_omitted_when_absent() {
        let company = Company::new(
            "Acme".to_string(),
            "We make anvils".to_string(),
            vec![Industry::Other],
            Uuid::new_v4(),
        );
        let json = serde_json::to_value(&company).unwrap();
        assert!(json.get("average_rating").is_none());
        assert!(json.get("average_salary").is_none());
    }
}
