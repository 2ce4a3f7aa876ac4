//! Declarative field mappings
//!
//! A [`MappingSpec`] names every output field, where its raw value lives,
//! which rule post-processes it and, for fields not carried by the document
//! payload, which separately fetched tree supplies it.

use std::collections::HashSet;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::path::PathSegment;
use crate::path;
use crate::transforms::Transform;

/// Service id of the request that lists an app's comments
pub const COMMENTS_SERVICE: &str = "UsvDTd";

/// One output field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    pub name: String,
    /// Starts with a dataset partition id unless `secondary_key` is set
    pub path: Vec<PathSegment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform: Option<Transform>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_key: Option<String>,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, path: Vec<PathSegment>) -> Self {
        FieldSpec {
            name: name.into(),
            path,
            transform: None,
            secondary_key: None,
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = Some(transform);
        self
    }

    pub fn from_secondary(mut self, service: impl Into<String>) -> Self {
        self.secondary_key = Some(service.into());
        self
    }
}

/// Ordered set of field specs with unique names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<FieldSpec>", into = "Vec<FieldSpec>")]
pub struct MappingSpec {
    fields: Vec<FieldSpec>,
}

impl MappingSpec {
    pub fn new(fields: Vec<FieldSpec>) -> Result<Self, Error> {
        let mut seen = HashSet::new();
        for field in &fields {
            if !seen.insert(field.name.as_str()) {
                return Err(Error::DuplicateField(field.name.clone()));
            }
        }
        Ok(MappingSpec { fields })
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields that can only be filled from a secondary tree
    pub fn secondary_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| f.secondary_key.is_some())
    }

    /// Distinct service ids a caller has to fetch to fill every field
    pub fn secondary_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = Vec::new();
        for key in self.fields.iter().filter_map(|f| f.secondary_key.as_deref()) {
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
        keys
    }
}

impl TryFrom<Vec<FieldSpec>> for MappingSpec {
    type Error = Error;

    fn try_from(fields: Vec<FieldSpec>) -> Result<Self, Self::Error> {
        MappingSpec::new(fields)
    }
}

impl From<MappingSpec> for Vec<FieldSpec> {
    fn from(spec: MappingSpec) -> Self {
        spec.fields
    }
}

static DETAILS_MAPPING: LazyLock<MappingSpec> = LazyLock::new(build_details_mapping);

/// The app details table, built on first use and never modified
pub fn details_mapping() -> &'static MappingSpec {
    &DETAILS_MAPPING
}

fn build_details_mapping() -> MappingSpec {
    use Transform::*;

    let field = FieldSpec::new;
    let fields = vec![
        field("title", path!["ds:6", 0, 0, 0]),
        field("description", path!["ds:6", 0, 10, 0, 1]).with_transform(DescriptionText),
        field("descriptionHTML", path!["ds:6", 0, 10, 0, 1]),
        field("summary", path!["ds:6", 0, 10, 1, 1]),
        field("installs", path!["ds:6", 0, 12, 9, 0]),
        field("minInstalls", path!["ds:6", 0, 12, 9, 1]),
        field("maxInstalls", path!["ds:6", 0, 12, 9, 2]),
        field("score", path!["ds:7", 0, 6, 0, 1]),
        field("scoreText", path!["ds:7", 0, 6, 0, 0]),
        field("ratings", path!["ds:7", 0, 6, 2, 1]),
        field("reviews", path!["ds:7", 0, 6, 3, 1]),
        field("histogram", path!["ds:7", 0, 6, 1]).with_transform(Histogram),
        // price and free read the same micro-unit amount
        field("price", path!["ds:4", 0, 2, 0, 0, 0, 1, 0, 0]).with_transform(Price),
        field("free", path!["ds:4", 0, 2, 0, 0, 0, 1, 0, 0]).with_transform(Free),
        field("currency", path!["ds:4", 0, 2, 0, 0, 0, 1, 0, 1]),
        field("priceText", path!["ds:4", 0, 2, 0, 0, 0, 1, 0, 2]).with_transform(PriceText),
        field("available", path!["ds:6", 0, 12, 11, 0]).with_transform(Truthy),
        field("offersIAP", path!["ds:6", 0, 12, 12, 0]).with_transform(Truthy),
        field("IAPRange", path!["ds:6", 0, 12, 12, 0]),
        field("size", path!["ds:3", 0]),
        field("androidVersion", path!["ds:3", 2]).with_transform(AndroidVersion),
        field("androidVersionText", path!["ds:3", 2]),
        field("developer", path!["ds:6", 0, 12, 5, 1]),
        field("developerId", path!["ds:6", 0, 12, 5, 5, 4, 2]).with_transform(DeveloperId),
        field("developerEmail", path!["ds:6", 0, 12, 5, 2, 0]),
        field("developerWebsite", path!["ds:6", 0, 12, 5, 3, 5, 2]),
        field("developerAddress", path!["ds:6", 0, 12, 5, 4, 0]),
        field("privacyPolicy", path!["ds:6", 0, 12, 7, 2]),
        field("developerInternalID", path!["ds:6", 0, 12, 5, 0, 0]),
        field("genre", path!["ds:6", 0, 12, 13, 0, 0]),
        field("genreId", path!["ds:6", 0, 12, 13, 0, 2]),
        field("familyGenre", path!["ds:6", 0, 12, 13, 1, 0]),
        field("familyGenreId", path!["ds:6", 0, 12, 13, 1, 2]),
        field("icon", path!["ds:6", 0, 12, 1, 3, 2]),
        field("headerImage", path!["ds:6", 0, 12, 2, 3, 2]),
        field("screenshots", path!["ds:6", 0, 12, 0]).with_transform(Screenshots),
        field("video", path!["ds:6", 0, 12, 3, 0, 3, 2]),
        field("videoImage", path!["ds:6", 0, 12, 3, 1, 3, 2]),
        field("contentRating", path!["ds:6", 0, 12, 4, 0]),
        field("contentRatingDescription", path!["ds:6", 0, 12, 4, 2, 1]),
        field("adSupported", path!["ds:6", 0, 12, 14, 0]).with_transform(Truthy),
        field("released", path!["ds:6", 0, 12, 36]),
        field("updated", path!["ds:6", 0, 12, 8, 0]).with_transform(UpdatedMillis),
        field("version", path!["ds:3", 1]),
        field("recentChanges", path!["ds:6", 0, 12, 6, 1]),
        field("comments", path![0])
            .with_transform(Comments)
            .from_secondary(COMMENTS_SERVICE),
        field("editorsChoice", path!["ds:6", 0, 12, 15, 0]).with_transform(Truthy),
        field("features", path!["ds:6", 0, 12, 16]).with_transform(Features),
    ];

    MappingSpec { fields }
}
