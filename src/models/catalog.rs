//! Read-only collection of discovered applications.

use std::collections::HashMap;

use super::Application;

/// Applications in discovery order, indexed by id.
///
/// Built once after discovery; shared freely afterwards since nothing
/// mutates it.
#[derive(Debug, Default, Clone)]
pub struct AppCatalog {
    apps: Vec<Application>,
    by_id: HashMap<String, usize>,
}

impl AppCatalog {
    pub fn from_apps(apps: Vec<Application>) -> Self {
        let by_id = apps
            .iter()
            .enumerate()
            .map(|(i, app)| (app.id.clone(), i))
            .collect();
        Self { apps, by_id }
    }

    pub fn get(&self, id: &str) -> Option<&Application> {
        self.by_id.get(id).map(|&i| &self.apps[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Application> {
        self.apps.iter()
    }

    pub fn len(&self) -> usize {
        self.apps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }

    /// Case-insensitive name substring match. An empty query matches everything.
    pub fn filter<'a>(&'a self, query: &str) -> Vec<&'a Application> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return self.apps.iter().collect();
        }
        self.apps
            .iter()
            .filter(|app| app.name.to_lowercase().contains(&query))
            .collect()
    }

    /// First application whose name matches exactly, ignoring case.
    pub fn find_by_name(&self, name: &str) -> Option<&Application> {
        self.apps.iter().find(|app| app.name.eq_ignore_ascii_case(name))
    }
}
