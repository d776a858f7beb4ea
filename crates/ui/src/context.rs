use std::sync::{Arc, RwLock};

use services::{LanguageCatalog, PracticeApi, ProfileService};

/// What the composition root hands to the UI.
pub trait UiApp: Send + Sync {
    fn api(&self) -> Arc<dyn PracticeApi>;

    /// Shown in the sidebar, e.g. the server url or "offline demo".
    fn server_label(&self) -> String;
}

#[derive(Clone)]
pub struct AppContext {
    api: Arc<dyn PracticeApi>,
    profile: Arc<ProfileService>,
    catalog: Arc<RwLock<LanguageCatalog>>,
    server_label: String,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        let api = app.api();
        Self {
            profile: Arc::new(ProfileService::new(Arc::clone(&api))),
            api,
            catalog: Arc::new(RwLock::new(LanguageCatalog::default())),
            server_label: app.server_label(),
        }
    }

    #[must_use]
    pub fn api(&self) -> Arc<dyn PracticeApi> {
        Arc::clone(&self.api)
    }

    #[must_use]
    pub fn profile(&self) -> Arc<ProfileService> {
        Arc::clone(&self.profile)
    }

    #[must_use]
    pub fn server_label(&self) -> &str {
        &self.server_label
    }

    /// Last catalog loaded by any view.
    #[must_use]
    pub fn catalog(&self) -> LanguageCatalog {
        match self.catalog.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn store_catalog(&self, catalog: LanguageCatalog) {
        match self.catalog.write() {
            Ok(mut guard) => *guard = catalog,
            Err(poisoned) => *poisoned.into_inner() = catalog,
        }
    }

    /// Loads the catalog and keeps it for views that only need labels.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the server lists cannot be loaded.
    pub async fn refresh_catalog(&self) -> Result<LanguageCatalog, services::ApiError> {
        let catalog = self.profile.load_catalog().await?;
        self.store_catalog(catalog.clone());
        Ok(catalog)
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
