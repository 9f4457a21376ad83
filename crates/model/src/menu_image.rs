use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::id::HasId;

use crate::ExampleData;

/// An image attached to a listing or outlet. The header image doubles as the
/// card image when the entry itself has none.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenuImage {
    pub url: String,
    pub display_order: i32,
    pub is_header: bool,
}

impl HasId for MenuImage {
    type IdType = String;
}

impl ExampleData for MenuImage {
    fn example_data() -> Self {
        MenuImage {
            url: "https://cdn.example.com/menus/ajisen-1.jpg".to_owned(),
            display_order: 0,
            is_header: true,
        }
    }
}
