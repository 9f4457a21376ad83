use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::id::HasId;

use crate::ExampleData;

/// A priced menu item or a price-range descriptor attached to a listing.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    pub label: String,
    pub amount_sgd: Option<f64>,
    pub range: Option<String>,
}

impl HasId for Price {
    type IdType = String;
}

impl ExampleData for Price {
    fn example_data() -> Self {
        Price {
            label: "Signature ramen".to_owned(),
            amount_sgd: Some(13.9),
            range: None,
        }
    }
}
