//! The template registry.
//!
//! [`TemplateRegistry`] owns the repository list, the registered extensions
//! and the template cache. Every mutation goes through it so the cache is
//! invalidated in one place.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;

use crate::config::{ConfigPaths, RegistrySettings};
use crate::error::Result;
use crate::extension::{
    collect_repositories_from_extensions, ExtensionDescriptor, ExtensionSet,
    TemplateRepositoryProvider,
};
use crate::registry::batch::{
    run_batch, ExtensionOperation, OperationResult, RepositoryOperation,
};
use crate::registry::cache::{CacheStatus, TemplateCache};
use crate::registry::fetch::{HttpFetcher, TemplateFetcher};
use crate::registry::template::{
    filter_templates_by_style, sort_by_label, template_styles, TemplateRecord,
};
use crate::repository::{default_repositories, RepositoryDescriptor, RepositoryList};
use crate::store::{JsonFileStore, MemoryStore, SettingsStore};

/// Message reported for batch operations on an unknown repository.
pub const UNKNOWN_REPOSITORY_MESSAGE: &str = "Unknown repository URL";

/// Message reported for batch operations on an unknown extension.
pub const UNKNOWN_EXTENSION_MESSAGE: &str = "Unknown extension name";

/// Options for [`TemplateRegistry::get_templates`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateQuery {
    /// Only return templates of this style.
    pub project_style: Option<String>,
    /// Only consult enabled repositories.
    pub show_enabled_only: bool,
}

impl TemplateQuery {
    /// Every template from every repository.
    pub fn all() -> Self {
        Self::default()
    }

    /// Restrict to a project style.
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.project_style = Some(style.into());
        self
    }

    /// Restrict to enabled repositories.
    pub fn enabled_only(mut self, enabled_only: bool) -> Self {
        self.show_enabled_only = enabled_only;
        self
    }
}

/// Aggregates templates from repositories and extensions.
pub struct TemplateRegistry {
    repositories: Mutex<RepositoryList>,
    extensions: Mutex<ExtensionSet>,
    cache: Mutex<TemplateCache>,
    refresh_guard: Mutex<()>,
    fetcher: Arc<dyn TemplateFetcher>,
    repository_store: Box<dyn SettingsStore<RepositoryDescriptor>>,
    extension_store: Box<dyn SettingsStore<ExtensionDescriptor>>,
}

impl std::fmt::Debug for TemplateRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateRegistry")
            .field("repositories", &*lock(&self.repositories))
            .field("extensions", &*lock(&self.extensions))
            .field("repository_store", &self.repository_store.describe())
            .field("extension_store", &self.extension_store.describe())
            .finish_non_exhaustive()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl TemplateRegistry {
    /// Create a registry seeded with the default repository list.
    ///
    /// Nothing is loaded from the stores until [`initialize`](Self::initialize)
    /// is called.
    pub fn new(
        fetcher: Arc<dyn TemplateFetcher>,
        repository_store: Box<dyn SettingsStore<RepositoryDescriptor>>,
        extension_store: Box<dyn SettingsStore<ExtensionDescriptor>>,
    ) -> Self {
        Self {
            repositories: Mutex::new(RepositoryList::new(default_repositories())),
            extensions: Mutex::new(ExtensionSet::new()),
            cache: Mutex::new(TemplateCache::new()),
            refresh_guard: Mutex::new(()),
            fetcher,
            repository_store,
            extension_store,
        }
    }

    /// Create a registry backed by in-memory stores.
    pub fn in_memory(fetcher: Arc<dyn TemplateFetcher>) -> Self {
        Self::new(
            fetcher,
            Box::new(MemoryStore::<RepositoryDescriptor>::empty()),
            Box::new(MemoryStore::<ExtensionDescriptor>::empty()),
        )
    }

    /// Replace the seed repository list used when nothing is persisted.
    pub fn with_default_repositories(self, repositories: Vec<RepositoryDescriptor>) -> Self {
        *lock(&self.repositories) = RepositoryList::new(repositories);
        self
    }

    /// Open the registry of a workspace.
    ///
    /// Builds an HTTP fetcher with the configured timeout, backs the lists
    /// with the workspace's JSON files, registers the configured extensions
    /// and loads persisted state.
    pub fn open(paths: &ConfigPaths, settings: &RegistrySettings) -> Result<Self> {
        let fetcher = HttpFetcher::with_timeout(settings.fetch_timeout())?;
        let registry = Self::new(
            Arc::new(fetcher),
            Box::new(JsonFileStore::<RepositoryDescriptor>::new(paths.repository_list())),
            Box::new(JsonFileStore::<ExtensionDescriptor>::new(paths.extension_settings())),
        )
        .with_default_repositories(settings.seed_repositories());

        for extension in &settings.extensions {
            registry.add_extension(&extension.name, extension.provider(paths.workspace()))?;
        }

        registry.initialize();
        Ok(registry)
    }

    /// Load persisted repository and extension settings.
    ///
    /// A missing repository list is created from the seed list. Read or
    /// parse failures are logged and the in-memory values are kept.
    pub fn initialize(&self) {
        self.initialize_repository_list();
        self.initialize_extension_settings();
    }

    fn initialize_repository_list(&self) {
        match self.repository_store.load() {
            Ok(Some(saved)) => {
                tracing::debug!(
                    "Loaded {} repositories from {}",
                    saved.len(),
                    self.repository_store.describe()
                );
                *lock(&self.repositories) = RepositoryList::new(saved);
                self.invalidate();
            }
            Ok(None) => {
                let repositories = lock(&self.repositories);
                if let Err(e) = self.repository_store.save(repositories.all()) {
                    tracing::error!(
                        "Error writing {}: {}",
                        self.repository_store.describe(),
                        e
                    );
                }
            }
            Err(e) => {
                tracing::error!(
                    "Error reading {}: {}",
                    self.repository_store.describe(),
                    e
                );
            }
        }
    }

    fn initialize_extension_settings(&self) {
        match self.extension_store.load() {
            Ok(Some(saved)) => {
                lock(&self.extensions).apply_settings(&saved);
                self.invalidate();
            }
            Ok(None) => {
                let extensions = lock(&self.extensions);
                if let Err(e) = self.extension_store.save(&extensions.descriptors()) {
                    tracing::error!(
                        "Error writing {}: {}",
                        self.extension_store.describe(),
                        e
                    );
                }
            }
            Err(e) => {
                tracing::error!(
                    "Error reading {}: {}",
                    self.extension_store.describe(),
                    e
                );
            }
        }
    }

    fn invalidate(&self) {
        lock(&self.cache).invalidate();
    }

    // ---- Templates ----

    /// Fetch templates from `repositories` plus enabled extension repositories.
    ///
    /// Failing repositories are logged and skipped. The result is sorted by
    /// label and never cached.
    pub fn refresh(&self, repositories: &[RepositoryDescriptor]) -> Vec<TemplateRecord> {
        let extensions = lock(&self.extensions).enabled();
        let provided = collect_repositories_from_extensions(&extensions);
        let all = merge_repositories(repositories, provided);

        tracing::debug!("Fetching templates from {} repositories", all.len());
        let mut templates = fetch_all(self.fetcher.as_ref(), &all);
        sort_by_label(&mut templates);
        templates
    }

    /// Templates from enabled repositories only. Always refetched.
    pub fn get_enabled_templates(&self) -> Vec<TemplateRecord> {
        let enabled = lock(&self.repositories).enabled();
        self.refresh(&enabled)
    }

    /// Templates from every repository, served from cache when fresh.
    pub fn get_all_templates(&self) -> Arc<Vec<TemplateRecord>> {
        if let Some(templates) = lock(&self.cache).fresh() {
            return templates;
        }

        let _refreshing = lock(&self.refresh_guard);
        // Another caller may have refreshed while we waited.
        if let Some(templates) = lock(&self.cache).fresh() {
            return templates;
        }

        let generation = lock(&self.cache).generation();
        let repositories = lock(&self.repositories).all().to_vec();
        let templates = self.refresh(&repositories);
        lock(&self.cache).store(templates, generation)
    }

    /// Templates matching `query`.
    pub fn get_templates(&self, query: &TemplateQuery) -> Vec<TemplateRecord> {
        let templates = if query.show_enabled_only {
            self.get_enabled_templates()
        } else {
            self.get_all_templates().as_ref().clone()
        };

        match &query.project_style {
            Some(style) => filter_templates_by_style(&templates, style),
            None => templates,
        }
    }

    /// Distinct project styles across all templates.
    pub fn get_template_styles(&self) -> Vec<String> {
        template_styles(&self.get_all_templates())
    }

    /// Current cache state.
    pub fn cache_status(&self) -> CacheStatus {
        lock(&self.cache).status()
    }

    // ---- Repositories ----

    /// All repositories, in order.
    pub fn get_repositories(&self) -> Vec<RepositoryDescriptor> {
        lock(&self.repositories).all().to_vec()
    }

    /// Enabled repositories, in order.
    pub fn get_enabled_repositories(&self) -> Vec<RepositoryDescriptor> {
        lock(&self.repositories).enabled()
    }

    /// Add an enabled repository and persist the list.
    ///
    /// The in-memory list only changes once the save succeeds.
    pub fn add_repository(&self, url: &str, description: &str) -> Result<()> {
        let mut repositories = lock(&self.repositories);
        let mut updated = repositories.clone();
        updated.add(url, description)?;
        self.repository_store.save(updated.all())?;

        *repositories = updated;
        self.invalidate();
        tracing::info!("Added template repository {}", url);
        Ok(())
    }

    /// Remove every repository with this URL and persist the list.
    pub fn delete_repository(&self, url: &str) -> Result<()> {
        let mut repositories = lock(&self.repositories);
        let mut updated = repositories.clone();
        if updated.remove(url) == 0 {
            tracing::debug!("No repository with URL {} to remove", url);
        }
        self.repository_store.save(updated.all())?;

        *repositories = updated;
        self.invalidate();
        Ok(())
    }

    /// Enable a repository.
    pub fn enable_repository(&self, url: &str) -> Result<()> {
        self.set_repository_enabled(url, true)
    }

    /// Disable a repository.
    pub fn disable_repository(&self, url: &str) -> Result<()> {
        self.set_repository_enabled(url, false)
    }

    fn set_repository_enabled(&self, url: &str, enabled: bool) -> Result<()> {
        let mut repositories = lock(&self.repositories);
        let mut updated = repositories.clone();
        updated.set_enabled(url, enabled)?;
        self.repository_store.save(updated.all())?;
        *repositories = updated;
        Ok(())
    }

    /// Apply repository enable operations, then persist once.
    pub fn batch_update_repos(
        &self,
        operations: &[RepositoryOperation],
    ) -> Result<Vec<OperationResult<RepositoryOperation>>> {
        let mut repositories = lock(&self.repositories);
        let mut updated = repositories.clone();
        let results = run_batch(operations, UNKNOWN_REPOSITORY_MESSAGE, |url, enabled| {
            updated.set_enabled(url, enabled)
        });
        self.repository_store.save(updated.all())?;
        *repositories = updated;
        Ok(results)
    }

    // ---- Extensions ----

    /// Descriptors of every registered extension.
    pub fn get_template_extensions(&self) -> Vec<ExtensionDescriptor> {
        lock(&self.extensions).descriptors()
    }

    /// Register an extension under `name`.
    pub fn add_extension(
        &self,
        name: &str,
        provider: Arc<dyn TemplateRepositoryProvider>,
    ) -> Result<()> {
        lock(&self.extensions).register(name, provider)?;
        self.invalidate();
        tracing::debug!("Registered template extension '{}'", name);
        Ok(())
    }

    /// Enable an extension.
    pub fn enable_extension(&self, name: &str) -> Result<()> {
        self.set_extension_enabled(name, true)
    }

    /// Disable an extension.
    pub fn disable_extension(&self, name: &str) -> Result<()> {
        self.set_extension_enabled(name, false)
    }

    fn set_extension_enabled(&self, name: &str, enabled: bool) -> Result<()> {
        let mut extensions = lock(&self.extensions);
        let mut updated = extensions.clone();
        updated.set_enabled(name, enabled)?;
        self.extension_store.save(&updated.descriptors())?;

        *extensions = updated;
        self.invalidate();
        Ok(())
    }

    /// Apply extension enable operations, then persist once.
    pub fn batch_update_extensions(
        &self,
        operations: &[ExtensionOperation],
    ) -> Result<Vec<OperationResult<ExtensionOperation>>> {
        let mut extensions = lock(&self.extensions);
        let mut updated = extensions.clone();
        let results = run_batch(operations, UNKNOWN_EXTENSION_MESSAGE, |name, enabled| {
            updated.set_enabled(name, enabled)
        });
        self.extension_store.save(&updated.descriptors())?;

        *extensions = updated;
        if results.iter().any(OperationResult::is_success) {
            self.invalidate();
        }
        Ok(results)
    }
}

/// Append extension repositories whose URL is not already listed.
///
/// Static repositories win over provided ones; among provided repositories
/// the first occurrence of a URL wins.
pub fn merge_repositories(
    repositories: &[RepositoryDescriptor],
    provided: Vec<RepositoryDescriptor>,
) -> Vec<RepositoryDescriptor> {
    let mut seen: HashSet<String> = repositories.iter().map(|r| r.url.clone()).collect();
    let mut all = repositories.to_vec();

    for repository in provided {
        if seen.insert(repository.url.clone()) {
            all.push(repository);
        }
    }
    all
}

/// Fetch every repository on its own thread and flatten in repository order.
fn fetch_all(
    fetcher: &dyn TemplateFetcher,
    repositories: &[RepositoryDescriptor],
) -> Vec<TemplateRecord> {
    thread::scope(|scope| {
        let handles: Vec<_> = repositories
            .iter()
            .map(|repository| {
                (
                    repository,
                    scope.spawn(move || fetcher.fetch_templates(repository)),
                )
            })
            .collect();

        handles
            .into_iter()
            .flat_map(|(repository, handle)| match handle.join() {
                Ok(Ok(templates)) => templates,
                Ok(Err(e)) => {
                    tracing::warn!(
                        "Error accessing template repository '{}': {}",
                        repository.url,
                        e
                    );
                    Vec::new()
                }
                Err(_) => {
                    tracing::warn!(
                        "Fetching template repository '{}' panicked",
                        repository.url
                    );
                    Vec::new()
                }
            })
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TemplarError;
    use crate::extension::StaticRepositoryProvider;
    use crate::registry::batch::{STATUS_NOT_FOUND, STATUS_OK};
    use anyhow::anyhow;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Serves canned templates keyed by repository URL and counts calls.
    #[derive(Default)]
    struct FakeFetcher {
        indexes: HashMap<String, Vec<TemplateRecord>>,
        calls: AtomicUsize,
    }

    impl FakeFetcher {
        fn with(mut self, url: &str, labels: &[&str]) -> Self {
            let templates = labels
                .iter()
                .map(|label| template(label, url, None))
                .collect();
            self.indexes.insert(url.to_string(), templates);
            self
        }

        fn with_templates(mut self, url: &str, templates: Vec<TemplateRecord>) -> Self {
            self.indexes.insert(url.to_string(), templates);
            self
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl TemplateFetcher for FakeFetcher {
        fn fetch_templates(
            &self,
            repository: &RepositoryDescriptor,
        ) -> Result<Vec<TemplateRecord>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if repository.url == "panic" {
                panic!("fetcher exploded");
            }
            self.indexes
                .get(&repository.url)
                .cloned()
                .ok_or_else(|| TemplarError::UnexpectedStatus {
                    repo: repository.url.clone(),
                    status: 404,
                })
        }
    }

    fn template(label: &str, source: &str, style: Option<&str>) -> TemplateRecord {
        TemplateRecord {
            label: label.to_string(),
            description: String::new(),
            language: "java".to_string(),
            url: format!("{}/{}", source, label),
            project_type: "docker".to_string(),
            project_style: style.map(String::from),
        }
    }

    fn repo(url: &str) -> RepositoryDescriptor {
        RepositoryDescriptor::new(url, url)
    }

    fn registry_with(
        fetcher: FakeFetcher,
        repositories: Vec<RepositoryDescriptor>,
    ) -> (
        TemplateRegistry,
        Arc<FakeFetcher>,
        MemoryStore<RepositoryDescriptor>,
        MemoryStore<ExtensionDescriptor>,
    ) {
        let fetcher = Arc::new(fetcher);
        let repo_store: MemoryStore<RepositoryDescriptor> = MemoryStore::empty();
        let ext_store: MemoryStore<ExtensionDescriptor> = MemoryStore::empty();
        let registry = TemplateRegistry::new(
            fetcher.clone(),
            Box::new(repo_store.clone()),
            Box::new(ext_store.clone()),
        )
        .with_default_repositories(repositories);
        (registry, fetcher, repo_store, ext_store)
    }

    fn labels(templates: &[TemplateRecord]) -> Vec<&str> {
        templates.iter().map(|t| t.label.as_str()).collect()
    }

    fn static_extension(urls: &[&str]) -> Arc<dyn TemplateRepositoryProvider> {
        Arc::new(StaticRepositoryProvider::new(urls.iter().map(|u| repo(u)).collect()))
    }

    #[test]
    fn registry_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TemplateRegistry>();
    }

    #[test]
    fn refresh_of_nothing_is_empty() {
        let (registry, fetcher, _, _) = registry_with(FakeFetcher::default(), vec![]);
        assert!(registry.refresh(&[]).is_empty());
        assert_eq!(fetcher.calls(), 0);
    }

    #[test]
    fn refresh_sorts_by_label() {
        let fetcher = FakeFetcher::default().with("https://a", &["Zebra", "Apple"]);
        let (registry, _, _, _) = registry_with(fetcher, vec![]);

        let templates = registry.refresh(&[repo("https://a")]);
        assert_eq!(labels(&templates), ["Apple", "Zebra"]);
    }

    #[test]
    fn refresh_only_uses_given_repositories() {
        let fetcher = FakeFetcher::default()
            .with("https://a", &["A"])
            .with("https://b", &["B"]);
        let (registry, _, _, _) =
            registry_with(fetcher, vec![repo("https://a"), repo("https://b")]);

        let templates = registry.refresh(&[repo("https://b")]);
        assert_eq!(labels(&templates), ["B"]);
    }

    #[test]
    fn failing_repository_contributes_nothing() {
        let fetcher = FakeFetcher::default().with("https://good", &["Good"]);
        let (registry, _, _, _) = registry_with(fetcher, vec![]);

        let templates = registry.refresh(&[
            repo("https://missing"),
            repo("https://good"),
            repo("panic"),
        ]);
        assert_eq!(labels(&templates), ["Good"]);
    }

    #[test]
    fn refresh_includes_extension_repositories() {
        let fetcher = FakeFetcher::default()
            .with("https://static", &["Static"])
            .with("https://ext", &["Extension"]);
        let (registry, _, _, _) = registry_with(fetcher, vec![]);
        registry
            .add_extension("ext", static_extension(&["https://ext"]))
            .unwrap();

        let templates = registry.refresh(&[repo("https://static")]);
        assert_eq!(labels(&templates), ["Extension", "Static"]);
    }

    #[test]
    fn static_repository_wins_over_extension_duplicate() {
        let fetcher = FakeFetcher::default().with("https://shared", &["Shared"]);
        let (registry, fetcher, _, _) = registry_with(fetcher, vec![]);
        registry
            .add_extension("one", static_extension(&["https://shared"]))
            .unwrap();
        registry
            .add_extension("two", static_extension(&["https://shared"]))
            .unwrap();

        let templates = registry.refresh(&[repo("https://shared")]);
        assert_eq!(labels(&templates), ["Shared"]);
        assert_eq!(fetcher.calls(), 1);
    }

    #[test]
    fn disabled_extension_is_not_consulted() {
        let fetcher = FakeFetcher::default().with("https://ext", &["Extension"]);
        let (registry, _, _, _) = registry_with(fetcher, vec![]);
        registry
            .add_extension("ext", static_extension(&["https://ext"]))
            .unwrap();
        registry.disable_extension("ext").unwrap();

        assert!(registry.refresh(&[]).is_empty());
    }

    #[test]
    fn non_array_extension_payload_contributes_nothing() {
        let fetcher = FakeFetcher::default().with("https://a", &["A"]);
        let (registry, _, _, _) = registry_with(fetcher, vec![]);
        let provider = || crate::extension::parse_provided_repositories(json!("not an array"));
        registry.add_extension("bad", Arc::new(provider)).unwrap();

        let templates = registry.refresh(&[repo("https://a")]);
        assert_eq!(labels(&templates), ["A"]);
    }

    #[test]
    fn failing_extension_contributes_nothing() {
        let fetcher = FakeFetcher::default().with("https://a", &["A"]);
        let (registry, _, _, _) = registry_with(fetcher, vec![]);
        let provider =
            || -> anyhow::Result<Vec<RepositoryDescriptor>> { Err(anyhow!("unreachable")) };
        registry.add_extension("bad", Arc::new(provider)).unwrap();

        assert_eq!(labels(&registry.refresh(&[repo("https://a")])), ["A"]);
    }

    #[test]
    fn get_all_templates_is_cached() {
        let fetcher = FakeFetcher::default().with("https://a", &["A"]);
        let (registry, fetcher, _, _) = registry_with(fetcher, vec![repo("https://a")]);

        let first = registry.get_all_templates();
        let second = registry.get_all_templates();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(fetcher.calls(), 1);
        assert!(!registry.cache_status().stale);
    }

    #[test]
    fn get_all_templates_includes_disabled_repositories() {
        let fetcher = FakeFetcher::default()
            .with("https://a", &["A"])
            .with("https://b", &["B"]);
        let (registry, _, _, _) = registry_with(
            fetcher,
            vec![repo("https://a"), repo("https://b").with_enabled(false)],
        );

        assert_eq!(labels(&registry.get_all_templates()), ["A", "B"]);
        assert_eq!(labels(&registry.get_enabled_templates()), ["A"]);
    }

    #[test]
    fn enabled_templates_do_not_touch_cache() {
        let fetcher = FakeFetcher::default().with("https://a", &["A"]);
        let (registry, _, _, _) = registry_with(fetcher, vec![repo("https://a")]);

        registry.get_enabled_templates();

        assert!(registry.cache_status().stale);
        assert_eq!(registry.cache_status().template_count, None);
    }

    #[test]
    fn concurrent_callers_share_one_refresh() {
        let fetcher = FakeFetcher::default().with("https://a", &["A"]);
        let (registry, fetcher, _, _) = registry_with(fetcher, vec![repo("https://a")]);

        let results: Vec<_> = thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| registry.get_all_templates()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(fetcher.calls(), 1);
        assert!(results.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    }

    #[test]
    fn add_repository_invalidates_and_persists() {
        let fetcher = FakeFetcher::default()
            .with("https://a", &["A"])
            .with("https://b", &["B"]);
        let (registry, _, repo_store, _) = registry_with(fetcher, vec![repo("https://a")]);
        assert_eq!(labels(&registry.get_all_templates()), ["A"]);

        registry.add_repository("https://b", "second").unwrap();

        assert!(registry.cache_status().stale);
        assert_eq!(labels(&registry.get_all_templates()), ["A", "B"]);
        let saved = repo_store.items().unwrap();
        assert_eq!(saved.len(), 2);
        assert_eq!(saved[1], RepositoryDescriptor::new("https://b", "second"));
    }

    #[test]
    fn add_duplicate_repository_fails_without_side_effects() {
        let (registry, _, repo_store, _) =
            registry_with(FakeFetcher::default(), vec![repo("1"), repo("2")]);
        let before = registry.get_repositories();

        let err = registry.add_repository("1", "again").unwrap_err();

        assert!(matches!(err, TemplarError::DuplicateUrl { .. }));
        assert_eq!(registry.get_repositories(), before);
        assert_eq!(repo_store.save_count(), 0);
    }

    #[test]
    fn delete_repository_removes_and_persists() {
        let fetcher = FakeFetcher::default().with("https://a", &["A"]);
        let (registry, _, repo_store, _) =
            registry_with(fetcher, vec![repo("https://a"), repo("https://b")]);
        registry.get_all_templates();

        registry.delete_repository("https://a").unwrap();

        assert!(registry.cache_status().stale);
        assert_eq!(registry.get_repositories(), vec![repo("https://b")]);
        assert_eq!(repo_store.items().unwrap(), vec![repo("https://b")]);
    }

    #[test]
    fn failed_save_leaves_repositories_unchanged() {
        let (registry, _, repo_store, _) =
            registry_with(FakeFetcher::default(), vec![repo("https://a")]);
        repo_store.fail_saves(true);

        assert!(registry.add_repository("https://b", "second").is_err());
        assert!(registry.delete_repository("https://a").is_err());
        assert!(registry.disable_repository("https://a").is_err());
        assert_eq!(registry.get_repositories(), vec![repo("https://a")]);

        repo_store.fail_saves(false);
        registry.add_repository("https://b", "second").unwrap();
        assert_eq!(registry.get_repositories().len(), 2);
    }

    #[test]
    fn failed_save_leaves_extensions_unchanged() {
        let (registry, _, _, ext_store) = registry_with(FakeFetcher::default(), vec![]);
        registry.add_extension("ext", static_extension(&[])).unwrap();
        ext_store.fail_saves(true);

        assert!(registry.disable_extension("ext").is_err());
        assert!(registry
            .batch_update_extensions(&[ExtensionOperation::enable("ext", false)])
            .is_err());
        assert!(registry.get_template_extensions()[0].enabled);
    }

    #[test]
    fn delete_unknown_repository_is_a_noop() {
        let (registry, _, _, _) = registry_with(FakeFetcher::default(), vec![repo("a")]);
        registry.delete_repository("missing").unwrap();
        assert_eq!(registry.get_repositories().len(), 1);
    }

    #[test]
    fn enable_and_disable_repository() {
        let (registry, _, repo_store, _) = registry_with(
            FakeFetcher::default(),
            vec![repo("1"), repo("2").with_enabled(false)],
        );

        registry.enable_repository("2").unwrap();
        registry.disable_repository("1").unwrap();

        let enabled: Vec<_> = registry
            .get_enabled_repositories()
            .into_iter()
            .map(|r| r.url)
            .collect();
        assert_eq!(enabled, ["2"]);
        assert_eq!(repo_store.save_count(), 2);
    }

    #[test]
    fn toggling_repository_keeps_cache() {
        let fetcher = FakeFetcher::default().with("https://a", &["A"]);
        let (registry, _, _, _) = registry_with(fetcher, vec![repo("https://a")]);
        registry.get_all_templates();

        registry.disable_repository("https://a").unwrap();

        assert!(!registry.cache_status().stale);
    }

    #[test]
    fn enable_unknown_repository_fails() {
        let (registry, _, _, _) = registry_with(FakeFetcher::default(), vec![]);

        let err = registry.enable_repository("unknown").unwrap_err();
        assert!(err.is_not_found());
        let err = registry.disable_repository("unknown").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn batch_update_repos_reports_each_operation() {
        let (registry, _, repo_store, _) =
            registry_with(FakeFetcher::default(), vec![repo("1"), repo("2")]);

        let results = registry
            .batch_update_repos(&[
                RepositoryOperation::enable("1", false),
                RepositoryOperation::enable("unknown", true),
            ])
            .unwrap();

        assert_eq!(results[0].status, STATUS_OK);
        assert_eq!(results[1].status, STATUS_NOT_FOUND);
        assert_eq!(results[1].error.as_deref(), Some("Unknown repository URL"));
        assert!(!registry.get_repositories()[0].enabled);
        assert_eq!(repo_store.save_count(), 1);
    }

    #[test]
    fn batch_update_extensions_scenario() {
        let (registry, _, _, ext_store) = registry_with(FakeFetcher::default(), vec![]);
        registry.add_extension("1", static_extension(&[])).unwrap();
        registry.add_extension("2", static_extension(&[])).unwrap();
        registry.disable_extension("2").unwrap();

        let results = registry
            .batch_update_extensions(&[
                ExtensionOperation::enable("1", false),
                ExtensionOperation::enable("unknown", true),
            ])
            .unwrap();

        let statuses: Vec<_> = results.iter().map(|r| r.status).collect();
        assert_eq!(statuses, [200, 404]);
        assert_eq!(results[1].error.as_deref(), Some("Unknown extension name"));

        let extensions = registry.get_template_extensions();
        assert!(!extensions[0].enabled);
        assert!(!extensions[1].enabled);
        assert_eq!(ext_store.items().unwrap(), extensions);
    }

    #[test]
    fn toggling_extension_invalidates_cache() {
        let fetcher = FakeFetcher::default().with("https://ext", &["Extension"]);
        let (registry, _, _, _) = registry_with(fetcher, vec![]);
        registry
            .add_extension("ext", static_extension(&["https://ext"]))
            .unwrap();
        assert_eq!(labels(&registry.get_all_templates()), ["Extension"]);

        registry.disable_extension("ext").unwrap();

        assert!(registry.cache_status().stale);
        assert!(registry.get_all_templates().is_empty());
    }

    #[test]
    fn enable_unknown_extension_fails() {
        let (registry, _, _, _) = registry_with(FakeFetcher::default(), vec![]);
        let err = registry.enable_extension("unknown").unwrap_err();
        assert!(matches!(err, TemplarError::ExtensionNotFound { .. }));
    }

    #[test]
    fn get_templates_filters_by_style() {
        let fetcher = FakeFetcher::default().with_templates(
            "https://a",
            vec![
                template("Plain", "https://a", None),
                template("Stack", "https://a", Some("Appsody")),
            ],
        );
        let (registry, _, _, _) = registry_with(fetcher, vec![repo("https://a")]);

        let codewind = registry.get_templates(&TemplateQuery::all().with_style("Codewind"));
        assert_eq!(labels(&codewind), ["Plain"]);

        let appsody = registry
            .get_templates(&TemplateQuery::all().with_style("Appsody").enabled_only(true));
        assert_eq!(labels(&appsody), ["Stack"]);

        assert_eq!(registry.get_template_styles(), ["Codewind", "Appsody"]);
    }

    #[test]
    fn initialize_writes_seed_when_nothing_saved() {
        let (registry, _, repo_store, _) = registry_with(FakeFetcher::default(), vec![repo("seed")]);

        registry.initialize();

        assert_eq!(repo_store.items().unwrap(), vec![repo("seed")]);
    }

    #[test]
    fn initialize_writes_extension_settings_when_nothing_saved() {
        let (registry, _, _, ext_store) = registry_with(FakeFetcher::default(), vec![]);
        registry.add_extension("ext", static_extension(&[])).unwrap();

        registry.initialize();

        let saved = ext_store.items().unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].name, "ext");
        assert!(saved[0].enabled);
    }

    #[test]
    fn panicking_extension_does_not_break_listing() {
        let fetcher = FakeFetcher::default()
            .with("https://a", &["A"])
            .with("https://ext", &["Extension"]);
        let (registry, _, _, _) = registry_with(fetcher, vec![repo("https://a")]);
        let panicking = || -> anyhow::Result<Vec<RepositoryDescriptor>> {
            panic!("provider exploded")
        };
        registry.add_extension("bad", Arc::new(panicking)).unwrap();
        registry
            .add_extension("good", static_extension(&["https://ext"]))
            .unwrap();

        assert_eq!(labels(&registry.get_all_templates()), ["A", "Extension"]);
    }

    #[test]
    fn initialize_loads_saved_lists() {
        let repo_store = MemoryStore::with_items(vec![repo("saved")]);
        let ext_store = MemoryStore::with_items(vec![ExtensionDescriptor {
            name: "ext".into(),
            description: "ext".into(),
            enabled: false,
        }]);
        let registry = TemplateRegistry::new(
            Arc::new(FakeFetcher::default()),
            Box::new(repo_store.clone()),
            Box::new(ext_store),
        );
        registry.add_extension("ext", static_extension(&[])).unwrap();

        registry.initialize();

        assert_eq!(registry.get_repositories(), vec![repo("saved")]);
        assert!(!registry.get_template_extensions()[0].enabled);
        assert_eq!(repo_store.save_count(), 0);
    }

    #[test]
    fn merge_collapses_duplicate_urls() {
        let merged = merge_repositories(
            &[repo("a")],
            vec![repo("a"), repo("b"), repo("b"), repo("c")],
        );
        let urls: Vec<_> = merged.into_iter().map(|r| r.url).collect();
        assert_eq!(urls, ["a", "b", "c"]);
    }
}
