use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::id::{HasId, Id};

use crate::{ExampleData, WithId};

/// A named content origin contributing listings, e.g. a curation guide or a
/// review site. Lower priority values are more authoritative and sort first.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    pub name: String,
    pub icon_url: Option<String>,
    pub color: Option<String>,
    pub priority: i32,
}

impl HasId for Source {
    type IdType = String;
}

impl ExampleData for Source {
    fn example_data() -> Self {
        Source {
            name: "Eatbook".to_owned(),
            icon_url: Some("https://cdn.example.com/icons/eatbook.png".to_owned()),
            color: Some("#e23744".to_owned()),
            priority: 1,
        }
    }
}

/// One listing-to-source association row, carrying the per-listing flags on
/// top of the source itself.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttributedSource {
    #[serde(flatten)]
    pub source: WithId<Source>,
    pub is_primary: bool,
    pub source_url: Option<String>,
}

impl AttributedSource {
    pub fn source_id(&self) -> &Id<Source> {
        &self.source.id
    }

    pub fn priority(&self) -> i32 {
        self.source.content.priority
    }
}

impl ExampleData for AttributedSource {
    fn example_data() -> Self {
        AttributedSource {
            source: WithId::new(Id::from_name("Eatbook"), Source::example_data()),
            is_primary: true,
            source_url: Some("https://eatbook.sg/bukit-panjang-food".to_owned()),
        }
    }
}
