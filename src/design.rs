//! Packaged design-document assembly.
//!
//! Design documents ship with the application under a `design-docs/` tree:
//!
//! ```text
//! design-docs/
//!   example/
//!     views/
//!       by_tag/
//!         map.js
//!         reduce.js
//! ```
//!
//! [`from_disk`] reads that layout through a [`ResourceProvider`], so it
//! works identically whether the tree is loose files or packaged inside an
//! archive.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::resources::ResourceProvider;
use crate::util::remove_extension;

/// Root folder for packaged design documents.
pub const DESIGN_DOCS_DIR: &str = "design-docs";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignDocument {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub views: BTreeMap<String, View>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct View {
    pub map: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reduce: Option<String>,
}

fn default_language() -> String {
    "javascript".to_string()
}

/// Assemble the design document `id` from packaged resources.
///
/// Enumerates `design-docs/{id}/views/`, reading `map.js` and `reduce.js`
/// per view. Views without a map function are skipped, as are unrelated
/// files. An id with no packaged views yields a document with an empty
/// view set.
pub fn from_disk(provider: &dyn ResourceProvider, id: &str) -> Result<DesignDocument> {
    let views_path = format!("{}/{}/views/", DESIGN_DOCS_DIR, id);
    let mut views = BTreeMap::new();

    for view_name in provider.list_resources(&views_path)? {
        let view_path = format!("{}{}/", views_path, view_name);
        let mut map = None;
        let mut reduce = None;
        for file in provider.list_resources(&view_path)? {
            let content = provider.read_file(&format!("{}{}", view_path, file))?;
            match remove_extension(&file) {
                "map" => map = Some(content),
                "reduce" => reduce = Some(content),
                _ => {}
            }
        }
        if let Some(map) = map {
            views.insert(view_name, View { map, reduce });
        }
    }

    Ok(DesignDocument {
        id: format!("_design/{}", id),
        language: default_language(),
        views,
    })
}
