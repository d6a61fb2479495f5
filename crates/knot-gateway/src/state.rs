use knot_admin::Admin;
use knot_core::Shortener;
use knot_redirector::Redirector;
use std::sync::Arc;

/// Shared handler state: the three core services plus the public base
/// address used to render shareable short links.
#[derive(Clone)]
pub struct AppState {
    shortener: Arc<dyn Shortener>,
    redirector: Arc<dyn Redirector>,
    admin: Arc<dyn Admin>,
    base_url: String,
}

impl AppState {
    pub fn new(
        shortener: Arc<dyn Shortener>,
        redirector: Arc<dyn Redirector>,
        admin: Arc<dyn Admin>,
        public_base_url: impl Into<String>,
    ) -> Self {
        Self {
            shortener,
            redirector,
            admin,
            base_url: public_base_url.into(),
        }
    }

    pub fn shortener(&self) -> &dyn Shortener {
        self.shortener.as_ref()
    }

    pub fn redirector(&self) -> &dyn Redirector {
        self.redirector.as_ref()
    }

    pub fn admin(&self) -> &dyn Admin {
        self.admin.as_ref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
