// src/project_catalog.rs
use crate::error::SiteError;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

const EMBEDDED_CATALOG: &str = include_str!("../assets/projects.json");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub hero_image: String,
    pub items: Vec<DetailItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailItem {
    pub title: String,
    pub image: String,
    pub description: String,
    #[serde(default)]
    pub stats: Vec<Stat>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stat {
    pub number: String,
    pub label: String,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    listing: Vec<String>,
    projects: Vec<Project>,
}

/// Read-only lookup of the projects shown on the listing page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProjectCatalog {
    projects: HashMap<String, Project>,
    listing: Vec<String>,
}

impl ProjectCatalog {
    /// Parse the catalog bundled into the binary.
    pub fn load() -> Result<Self, SiteError> {
        Self::from_json(EMBEDDED_CATALOG)
    }

    pub fn from_json(json: &str) -> Result<Self, SiteError> {
        let file: CatalogFile = serde_json::from_str(json).map_err(SiteError::Catalog)?;
        Self::from_parts(file.projects, file.listing)
    }

    pub fn from_parts(projects: Vec<Project>, listing: Vec<String>) -> Result<Self, SiteError> {
        let mut by_id = HashMap::with_capacity(projects.len());
        for project in projects {
            if by_id.contains_key(&project.id) {
                return Err(SiteError::DuplicateProject(project.id));
            }
            by_id.insert(project.id.clone(), project);
        }

        let mut seen = HashSet::new();
        for id in &listing {
            if !by_id.contains_key(id) {
                return Err(SiteError::UnknownListing(id.clone()));
            }
            if !seen.insert(id.as_str()) {
                return Err(SiteError::DuplicateProject(id.clone()));
            }
        }

        Ok(Self {
            projects: by_id,
            listing,
        })
    }

    pub fn get(&self, id: &str) -> Option<&Project> {
        self.projects.get(id)
    }

    /// Identifier shown at `index` on the listing page.
    pub fn id_at(&self, index: usize) -> Option<&str> {
        self.listing.get(index).map(String::as_str)
    }

    /// Projects in listing order.
    pub fn listed(&self) -> impl Iterator<Item = &Project> {
        self.listing.iter().filter_map(|id| self.projects.get(id))
    }

    pub fn len(&self) -> usize {
        self.listing.len()
    }
}
