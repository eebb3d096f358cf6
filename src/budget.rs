//! Per-page byte budgets.
//!
//! Every rendered document is classified by route and compared with the
//! threshold of its class:
//!
//! | Route | Class | Default threshold |
//! |---|---|---|
//! | `/index.html` | [`PageClass::Index`] | 14 KiB |
//! | `/<slug>.html` | [`PageClass::Article`] | 30 KiB |
//! | anything else (category listings) | [`PageClass::Other`] | `--max-bytes` (14 KiB) |
//!
//! Sizes are measured on the in-memory documents, which are exactly the bytes
//! later written. In [`BudgetMode::Warn`] an overage is only reported; in
//! [`BudgetMode::Strict`] the build stops before any file is written.

use crate::config::BudgetConfig;
use crate::types::RenderedSite;
use serde::Deserialize;

pub const DEFAULT_INDEX_BYTES: u64 = 14 * 1024;
pub const DEFAULT_ARTICLE_BYTES: u64 = 30 * 1024;
pub const DEFAULT_OTHER_BYTES: u64 = 14 * 1024;

/// What happens when a page is over budget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetMode {
    #[default]
    Warn,
    Strict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageClass {
    Index,
    Article,
    Other,
}

impl PageClass {
    pub fn of(route: &str) -> Self {
        if route == "/index.html" {
            PageClass::Index
        } else if route.ends_with(".html") && !route.starts_with("/category/") {
            PageClass::Article
        } else {
            PageClass::Other
        }
    }

    fn threshold(self, budgets: &BudgetConfig) -> u64 {
        match self {
            PageClass::Index => budgets.index,
            PageClass::Article => budgets.article,
            PageClass::Other => budgets.default,
        }
    }
}

/// Size check result for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetReport {
    pub route: String,
    pub class: PageClass,
    pub bytes: u64,
    pub threshold: u64,
}

impl BudgetReport {
    pub fn exceeded(&self) -> bool {
        self.bytes > self.threshold
    }

    /// Last path component, the name shown in output lines.
    pub fn file_name(&self) -> &str {
        self.route.rsplit('/').next().unwrap_or(&self.route)
    }
}

/// Measure every document of the site, in site order.
pub fn check(site: &RenderedSite, budgets: &BudgetConfig) -> Vec<BudgetReport> {
    site.iter()
        .map(|page| {
            let class = PageClass::of(&page.route);
            BudgetReport {
                route: page.route.clone(),
                class,
                bytes: page.html.len() as u64,
                threshold: class.threshold(budgets),
            }
        })
        .collect()
}

/// Reports over their threshold.
pub fn overages(reports: &[BudgetReport]) -> Vec<&BudgetReport> {
    reports.iter().filter(|r| r.exceeded()).collect()
}
