//! Source dashboards referenced by a plan

use crate::{ComposeError, Result};
use dash_model::Dashboard;
use std::collections::BTreeMap;
use std::path::Path;

/// Source dashboards keyed by the name a plan refers to them with
#[derive(Debug, Clone, Default)]
pub struct Sources {
    documents: BTreeMap<String, Dashboard>,
}

impl Sources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, dashboard: Dashboard) {
        self.documents.insert(name.into(), dashboard);
    }

    pub fn with(mut self, name: impl Into<String>, dashboard: Dashboard) -> Self {
        self.insert(name, dashboard);
        self
    }

    pub fn get(&self, name: &str) -> Result<&Dashboard> {
        self.documents
            .get(name)
            .ok_or_else(|| ComposeError::UnknownSource(name.to_string()))
    }

    /// Load every named source from disk, resolving each name as a path
    /// relative to the plan file. Each file is read once.
    pub fn load<'a>(plan_path: &Path, names: impl IntoIterator<Item = &'a str>) -> Result<Self> {
        let mut sources = Self::new();
        for name in names {
            if sources.documents.contains_key(name) {
                continue;
            }
            let path = store::resolve_relative(plan_path, Path::new(name));
            let dashboard = store::load_dashboard(&path)?;
            tracing::info!(
                source = name,
                panels = dashboard.panel_count(),
                "Loaded source dashboard"
            );
            sources.insert(name, dashboard);
        }
        Ok(sources)
    }
}
