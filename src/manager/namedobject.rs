use serde::{
    Deserialize,
    Serialize
};

/// The `name` field every registry entry carries; other fields are left to
/// the entry-specific parser.
#[derive(Clone, Serialize, Deserialize)]
pub struct NamedJsonObject {
    name: String
}

impl NamedJsonObject {
    pub fn name(&self) -> &str {
        &self.name
    }
}
