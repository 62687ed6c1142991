//! Icon resolution: cache lookup, then an ordered list of stages that stops
//! at the first success.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use super::backend::{IconBackend, SystemBackend};
use super::cache::{IconCache, IconKey};
use super::decode::{CONTAINER_EXTENSIONS, RASTER_EXTENSIONS};
use super::IconResource;
use crate::error::IconError;
use crate::models::Application;
use crate::paths::has_extension;
use crate::platform::Platform;

/// One attempt at producing an icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage<'a> {
    Raster(&'a Path),
    Container(&'a Path),
    Resource(&'a Path, i32),
    ShellIcon(&'a Path),
}

impl fmt::Display for Stage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raster(p) => write!(f, "raster {}", p.display()),
            Self::Container(p) => write!(f, "container {}", p.display()),
            Self::Resource(p, i) => write!(f, "resource {},{}", p.display(), i),
            Self::ShellIcon(p) => write!(f, "shell icon {}", p.display()),
        }
    }
}

/// Resolves application icons to PNG, memoized in a shared [`IconCache`].
pub struct IconResolver<B: IconBackend = SystemBackend> {
    platform: Platform,
    cache: Arc<IconCache>,
    backend: B,
}

impl IconResolver<SystemBackend> {
    /// Resolver for the running platform.
    pub fn new(cache: Arc<IconCache>) -> Self {
        Self::with_backend(Platform::current(), cache, SystemBackend)
    }
}

impl<B: IconBackend> IconResolver<B> {
    pub fn with_backend(platform: Platform, cache: Arc<IconCache>, backend: B) -> Self {
        Self {
            platform,
            cache,
            backend,
        }
    }

    pub fn cache(&self) -> &IconCache {
        &self.cache
    }

    /// Resolve the icon for `app`.
    ///
    /// `None` means no stage produced an icon, which is a normal outcome.
    pub fn resolve_icon(&self, app: &Application) -> Option<IconResource> {
        let data = if self.platform.has_indexed_icons() {
            self.resolve_indexed(app)
        } else {
            self.resolve_by_path(app)
        }?;
        Some(IconResource::new(&app.name, data))
    }

    /// Cache by path, then direct decode. No OS fallbacks.
    fn resolve_by_path(&self, app: &Application) -> Option<Arc<[u8]>> {
        let path = non_empty(app.icon_path.as_deref())?;
        let key = IconKey::Path(path.to_path_buf());
        if let Some(hit) = self.cache.get(&key) {
            return Some(hit);
        }

        self.run(key, &[Stage::Raster(path)])
    }

    fn resolve_indexed(&self, app: &Application) -> Option<Arc<[u8]>> {
        let icon_path = non_empty(app.icon_path.as_deref());
        let exec = non_empty(Some(Path::new(&app.exec)));

        let (source, index) = match icon_path {
            Some(path) => (path, app.icon_index),
            None => (exec?, 0),
        };
        let key = IconKey::Indexed(source.to_path_buf(), index);
        if let Some(hit) = self.cache.get(&key) {
            return Some(hit);
        }

        let mut plan = Vec::with_capacity(7);
        if let Some(path) = icon_path {
            if has_extension(path, RASTER_EXTENSIONS) {
                plan.push(Stage::Raster(path));
            }
            if has_extension(path, CONTAINER_EXTENSIONS) {
                plan.push(Stage::Container(path));
            }
            plan.push(Stage::Resource(path, index));
            if index != 0 {
                plan.push(Stage::Resource(path, 0));
            }
        }
        if let Some(exec) = exec {
            plan.push(Stage::Resource(exec, 0));
        }
        if let Some(path) = icon_path {
            plan.push(Stage::ShellIcon(path));
        }
        if let Some(exec) = exec {
            plan.push(Stage::ShellIcon(exec));
        }

        self.run(key, &plan)
    }

    /// Try each stage in order and cache the first success under `key`.
    ///
    /// A resource extracted at a different index than requested is also
    /// cached under its own key.
    fn run(&self, key: IconKey, plan: &[Stage<'_>]) -> Option<Arc<[u8]>> {
        for stage in plan {
            match self.attempt(*stage) {
                Ok(png) => {
                    tracing::debug!(%stage, "Icon resolved");
                    let data: Arc<[u8]> = Arc::from(png);
                    if let Stage::Resource(path, index) = *stage {
                        let own_key = IconKey::Indexed(path.to_path_buf(), index);
                        if own_key != key {
                            self.cache.set(own_key, data.clone());
                        }
                    }
                    self.cache.set(key, data.clone());
                    return Some(data);
                }
                Err(e) => tracing::debug!(%stage, %e, "Icon stage failed"),
            }
        }

        tracing::debug!(?key, "No icon found");
        None
    }

    fn attempt(&self, stage: Stage<'_>) -> Result<Vec<u8>, IconError> {
        match stage {
            Stage::Raster(path) => self.backend.decode_raster(path),
            Stage::Container(path) => self.backend.decode_container(path),
            Stage::Resource(path, index) => self.backend.extract_resource(path, index),
            Stage::ShellIcon(path) => self.backend.shell_icon(path),
        }
    }
}

fn non_empty(path: Option<&Path>) -> Option<&Path> {
    path.filter(|p| !p.as_os_str().is_empty())
}
