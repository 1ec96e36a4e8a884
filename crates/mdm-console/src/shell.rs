//! Navigation between the console pages.
//!
//! The shell owns the API client and exactly one live view. Navigating
//! away drops the previous view's state and loads the new page fresh.

use std::fmt;
use std::str::FromStr;

use mdm_client::MdmApi;
use tracing::debug;

use crate::dashboard::DashboardStats;
use crate::views::{AttributesView, CatalogsView, EntitiesView};

/// Console pages in navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    /// Summary counts and health.
    Dashboard,
    /// Entity management.
    Entities,
    /// Attribute management.
    Attributes,
    /// Catalog management.
    Catalogs,
}

impl Page {
    /// Every page, as listed in the side navigation.
    pub const ALL: [Self; 4] = [
        Self::Dashboard,
        Self::Entities,
        Self::Attributes,
        Self::Catalogs,
    ];

    /// Navigation label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Entities => "Entities",
            Self::Attributes => "Attributes",
            Self::Catalogs => "Catalogs",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error for an unknown page name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown page '{0}', expected one of: dashboard, entities, attributes, catalogs")]
pub struct UnknownPage(pub String);

impl FromStr for Page {
    type Err = UnknownPage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dashboard" | "home" => Ok(Self::Dashboard),
            "entities" | "entity" => Ok(Self::Entities),
            "attributes" | "attribute" => Ok(Self::Attributes),
            "catalogs" | "catalog" => Ok(Self::Catalogs),
            other => Err(UnknownPage(other.to_string())),
        }
    }
}

/// The live view behind the active page.
#[derive(Debug, Clone)]
pub enum ActiveView {
    /// Dashboard figures.
    Dashboard(DashboardStats),
    /// Entity page.
    Entities(EntitiesView),
    /// Attribute page.
    Attributes(AttributesView),
    /// Catalog page.
    Catalogs(CatalogsView),
}

impl ActiveView {
    /// Page this view renders.
    #[must_use]
    pub const fn page(&self) -> Page {
        match self {
            Self::Dashboard(_) => Page::Dashboard,
            Self::Entities(_) => Page::Entities,
            Self::Attributes(_) => Page::Attributes,
            Self::Catalogs(_) => Page::Catalogs,
        }
    }

    /// Build and load the view for a page.
    pub async fn load<A: MdmApi>(page: Page, api: &A) -> Self {
        match page {
            Page::Dashboard => Self::Dashboard(DashboardStats::load(api).await),
            Page::Entities => {
                let mut view = EntitiesView::new();
                view.refresh(api).await;
                Self::Entities(view)
            }
            Page::Attributes => {
                let mut view = AttributesView::new();
                view.load(api).await;
                Self::Attributes(view)
            }
            Page::Catalogs => {
                let mut view = CatalogsView::new();
                view.load(api).await;
                Self::Catalogs(view)
            }
        }
    }

    /// Re-fetch the view's data, keeping any open form and selection.
    pub async fn reload<A: MdmApi>(&mut self, api: &A) {
        match self {
            Self::Dashboard(stats) => *stats = DashboardStats::load(api).await,
            Self::Entities(view) => view.refresh(api).await,
            Self::Attributes(view) => view.load(api).await,
            Self::Catalogs(view) => view.load(api).await,
        }
    }
}

/// Side navigation plus the active page.
#[derive(Debug)]
pub struct Shell<A> {
    api: A,
    active: ActiveView,
}

impl<A: MdmApi> Shell<A> {
    /// Open the shell on the dashboard.
    pub async fn open(api: A) -> Self {
        let active = ActiveView::load(Page::Dashboard, &api).await;
        Self { api, active }
    }

    /// Switch pages, discarding the current view.
    pub async fn navigate(&mut self, page: Page) {
        debug!(from = %self.active.page(), to = %page, "navigate");
        self.active = ActiveView::load(page, &self.api).await;
    }

    /// Active page.
    #[must_use]
    pub const fn page(&self) -> Page {
        self.active.page()
    }

    /// The API client.
    #[must_use]
    pub const fn api(&self) -> &A {
        &self.api
    }

    /// The active view.
    #[must_use]
    pub const fn active(&self) -> &ActiveView {
        &self.active
    }

    /// The API client together with the active view, for operations that
    /// mutate the view while calling the API.
    pub fn parts(&mut self) -> (&A, &mut ActiveView) {
        (&self.api, &mut self.active)
    }
}
