//! Shared fixtures for twinpack-bundler integration tests.

#![allow(dead_code)]

use std::path::Path;

use chrono::{TimeZone, Utc};
use twinpack_bundler::BuildInfo;
use twinpack_config::{PackageMeta, Settings};

/// Default settings rooted at `root`.
pub fn settings_at(root: &Path) -> Settings {
    Settings::default().with_root(root)
}

pub fn package() -> PackageMeta {
    PackageMeta {
        name: "acme-site".into(),
        description: "Marketing site".into(),
        ..PackageMeta::default()
    }
}

/// Build info with a fixed timestamp and revision.
pub fn build_info() -> BuildInfo {
    BuildInfo {
        project: "Acme".into(),
        author: "Jane Doe".into(),
        built_at: Utc.with_ymd_and_hms(2024, 3, 7, 14, 5, 0).unwrap(),
        revision: "3f786850e387550fdab836ed7e6dc881de23001b".into(),
        branch: "main".into(),
        copyright: "Acme Inc.".into(),
    }
}
