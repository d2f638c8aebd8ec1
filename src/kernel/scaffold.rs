//! `npx create-react-app` 的项目模板

use std::collections::BTreeMap;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use crate::models::FolderTemplate;

pub const NODE_MODULES: &str = "node_modules";
pub const MANIFEST_FILE: &str = "package.json";
pub const MANIFEST_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageManifest {
    pub name: String,
    pub version: String,
    pub dependencies: BTreeMap<String, String>,
}

impl PackageManifest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: MANIFEST_VERSION.to_string(),
            dependencies: BTreeMap::new(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// 应用文件夹（5 个文件）加上同级的空 `node_modules`
pub fn react_app(app: &str) -> serde_json::Result<Vec<FolderTemplate>> {
    let files = vec![
        file("index.js", "// Entry point for React app"),
        file("App.js", "// Main App component"),
        file("index.html", "<!DOCTYPE html>"),
        file("styles.css", "/* Styles for the app */"),
        (
            CompactString::from(MANIFEST_FILE),
            PackageManifest::new(app).to_json()?,
        ),
    ];

    Ok(vec![
        FolderTemplate {
            name: app.into(),
            files,
        },
        FolderTemplate::empty(NODE_MODULES),
    ])
}

fn file(name: &'static str, content: &str) -> (CompactString, String) {
    (CompactString::from(name), content.to_string())
}
