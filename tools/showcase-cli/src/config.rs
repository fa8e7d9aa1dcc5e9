//! CLI configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use turbo_commerce::display::RelativeDateStyle;
use turbo_commerce::search::{
    FilterOptions, ListingQuery, MatchFields, SortOption, TagMatch, DEFAULT_PAGE_SIZE,
};
use turbo_data::{FetchClient, DEFAULT_BASE_URL};
use turbo_showcase::LISTING_FETCH_LIMIT;

/// Config file names searched for, in order.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["showcase.toml", ".showcase.toml", "showcase.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Catalog API settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Listing view settings.
    #[serde(default)]
    pub listing: ListingConfig,

    /// Display settings.
    #[serde(default)]
    pub display: DisplayConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        Self::parse(&content, path.ends_with(".json"))
            .with_context(|| format!("Failed to parse config file: {}", path))
    }

    /// Parse config text as JSON or TOML.
    pub fn parse(content: &str, json: bool) -> Result<Self> {
        if json {
            Ok(serde_json::from_str(content)?)
        } else {
            Ok(toml::from_str(content)?)
        }
    }

    /// Build an API client for the configured base URL.
    pub fn client(&self) -> Result<FetchClient> {
        FetchClient::new()
            .with_base_url(&self.api.base_url)
            .with_context(|| format!("Invalid api.base_url: {}", self.api.base_url))
    }

    /// The listing pipeline, with optional command-line overrides.
    pub fn listing_query(&self, any_tag: bool, match_all_fields: bool) -> ListingQuery {
        let tag_match = if any_tag {
            TagMatch::Any
        } else {
            self.listing.tag_match
        };
        let match_fields = if match_all_fields {
            MatchFields::TitleDescriptionTags
        } else {
            self.listing.match_fields
        };
        ListingQuery::new(FilterOptions::new(match_fields, tag_match), self.listing.page_size)
    }
}

/// Catalog API settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API root (default: https://dummyjson.com).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Products requested when the listing loads.
    #[serde(default = "default_fetch_limit")]
    pub fetch_limit: u32,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_fetch_limit() -> u32 {
    LISTING_FETCH_LIMIT
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            fetch_limit: default_fetch_limit(),
        }
    }
}

/// Listing view settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingConfig {
    /// Products per page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Whether products must carry all selected tags or any of them.
    #[serde(default)]
    pub tag_match: TagMatch,

    /// Fields the search text is matched against.
    #[serde(default)]
    pub match_fields: MatchFields,

    /// Sort used when the query string names none.
    #[serde(default)]
    pub default_sort: SortOption,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            tag_match: TagMatch::default(),
            match_fields: MatchFields::default(),
            default_sort: SortOption::DEFAULT,
        }
    }
}

/// Display settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Granularity of review dates: "days" or "fine".
    #[serde(default)]
    pub relative_dates: RelativeDateStyle,
}

/// Generate a default showcase.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Showcase configuration

[api]
base_url = "{base_url}"
fetch_limit = {fetch_limit}

[listing]
page_size = {page_size}
# "all" requires every selected tag, "any" at least one
tag_match = "all"
# "title" or "title-description-tags"
match_fields = "title"
default_sort = "{sort}"

[display]
# "days" or "fine"
relative_dates = "days"
"#,
        base_url = DEFAULT_BASE_URL,
        fetch_limit = LISTING_FETCH_LIMIT,
        page_size = DEFAULT_PAGE_SIZE,
        sort = SortOption::DEFAULT.as_str(),
    )
}
