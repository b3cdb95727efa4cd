use serde::{Deserialize, Serialize};

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Remote catalog configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// Catalog site root (e.g., "https://www.skatevideosite.com")
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Results tab queried and read on the search page
    #[serde(default = "default_search_tab")]
    pub search_tab: u32,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
    /// Optional User-Agent header sent with every request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    /// Poster URLs must start with this prefix to be downloaded
    #[serde(default = "default_trusted_poster_prefix")]
    pub trusted_poster_prefix: String,
    /// Path prefix of a video detail page, joined with a source id
    #[serde(default = "default_detail_path")]
    pub detail_path: String,
    /// Fetch the detail page directly when the filename carries `[svs=ID]`
    #[serde(default)]
    pub use_source_id: bool,
    #[serde(default)]
    pub selectors: SelectorConfig,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            search_tab: default_search_tab(),
            timeout_secs: default_timeout(),
            user_agent: None,
            trusted_poster_prefix: default_trusted_poster_prefix(),
            detail_path: default_detail_path(),
            use_source_id: false,
            selectors: SelectorConfig::default(),
        }
    }
}

fn default_base_url() -> String {
    "https://www.skatevideosite.com".to_string()
}

fn default_search_tab() -> u32 {
    1
}

fn default_timeout() -> u32 {
    30
}

fn default_trusted_poster_prefix() -> String {
    "https://assets.skatevideo.site/covers/".to_string()
}

fn default_detail_path() -> String {
    "/videos/".to_string()
}

/// CSS selectors used to pull fields out of catalog pages.
///
/// `results_tab` may contain a `{tab}` placeholder which is replaced with
/// [`CatalogConfig::search_tab`].
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub results_tab: String,
    pub result_year: String,
    pub result_company: String,
    pub result_link: String,
    pub title: String,
    pub year: String,
    pub studio: String,
    pub plot: String,
    pub cast: String,
    pub poster: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            results_tab: r#"div[data-tabs-target="contents"] > div[data-tab-value="{tab}"]"#
                .to_string(),
            result_year: r#"span[class="ml-2 text-base font-semibold"]"#.to_string(),
            result_company: r#"a[class="link link-secondary capitalize"]"#.to_string(),
            result_link: r#"a[class="font-semibold text-primary underline"][href]"#.to_string(),
            title: r#"h2[class="mb-3 w-full text-3xl font-bold text-primary"]"#.to_string(),
            year: r#"span[class="whitespace-normal p-1 text-secondary"]"#.to_string(),
            studio: r#"a[class="link link-secondary whitespace-normal capitalize"]"#.to_string(),
            plot: r#"div[class="w-full whitespace-pre-line break-words italic"]"#.to_string(),
            cast: r#"div[class="self-start py-4 w-full"] > ul > li > a > span"#.to_string(),
            poster: r#"meta[property="og:image"]"#.to_string(),
        }
    }
}

impl SelectorConfig {
    /// Results container selector with the tab placeholder filled in.
    pub fn results_tab_for(&self, tab: u32) -> String {
        self.results_tab.replace("{tab}", &tab.to_string())
    }

    /// All selectors paired with their config key, for validation.
    pub fn named(&self, tab: u32) -> Vec<(&'static str, String)> {
        vec![
            ("results_tab", self.results_tab_for(tab)),
            ("result_year", self.result_year.clone()),
            ("result_company", self.result_company.clone()),
            ("result_link", self.result_link.clone()),
            ("title", self.title.clone()),
            ("year", self.year.clone()),
            ("studio", self.studio.clone()),
            ("plot", self.plot.clone()),
            ("cast", self.cast.clone()),
            ("poster", self.poster.clone()),
        ]
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Download the cover image next to the video (default: true)
    #[serde(default = "default_true")]
    pub download_poster: bool,
    /// Replace an existing .nfo file (default: true)
    #[serde(default = "default_true")]
    pub overwrite: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            download_poster: true,
            overwrite: true,
        }
    }
}

fn default_true() -> bool {
    true
}
