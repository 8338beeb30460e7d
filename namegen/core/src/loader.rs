//! Preset Loader
//!
//! Fetches every configured preset resource concurrently and resolves once,
//! when all of them have arrived.
//!
//! # Ordering
//!
//! Fetches complete in whatever order the network delivers them. Each result
//! is stored in the slot of its *request* position, so the returned presets
//! always follow the configured locator order.
//!
//! # Failure
//!
//! The first fetch error, timeout or malformed body rejects the whole load
//! with a [`LoadError`] naming the locator. Outstanding fetches are aborted.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::preset::{Preset, PresetError};

/// Default per-fetch time limit
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Prefix of locators that name a preset compiled into the binary
pub const BUNDLED_SCHEME: &str = "bundled:";

/// Presets compiled into the binary, by name
const BUNDLED_PRESETS: &[(&str, &str)] = &[
    (
        "elegant-penguin",
        include_str!("../../../presets/elegant-penguin.json"),
    ),
    (
        "visionary-palm-tree",
        include_str!("../../../presets/visionary-palm-tree.json"),
    ),
    (
        "midnight-lighthouse",
        include_str!("../../../presets/midnight-lighthouse.json"),
    ),
];

// =============================================================================
// Locators
// =============================================================================

/// Address of a preset resource
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Locator {
    /// `http://` or `https://` URL
    Http(String),
    /// Local file, given as a path or a `file://` URL
    File(PathBuf),
    /// Preset compiled into the binary, given as `bundled:<name>`
    Bundled(String),
}

impl Locator {
    /// Interpret a configured locator string
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.starts_with("http://") || raw.starts_with("https://") {
            Self::Http(raw.to_string())
        } else if let Some(name) = raw.strip_prefix(BUNDLED_SCHEME) {
            Self::Bundled(name.to_string())
        } else {
            let path = raw.strip_prefix("file://").unwrap_or(raw);
            Self::File(PathBuf::from(path))
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(url) => write!(f, "{url}"),
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Bundled(name) => write!(f, "{BUNDLED_SCHEME}{name}"),
        }
    }
}

// =============================================================================
// Errors
// =============================================================================

/// Failure to retrieve a resource body
#[derive(Debug, Error)]
pub enum FetchError {
    /// Server answered with a non-success status
    #[error("HTTP status {status}")]
    Status {
        /// The status code returned
        status: u16,
    },

    /// Request could not be sent or the body could not be read
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Local file could not be read
    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),

    /// The source does not handle this kind of locator
    #[error("unsupported locator")]
    Unsupported,

    /// No preset of that name is compiled in
    #[error("no bundled preset named '{name}'")]
    UnknownBundled {
        /// The requested name
        name: String,
    },
}

/// Failure of an aggregate preset load
#[derive(Debug, Error)]
pub enum LoadError {
    /// Nothing was configured to load
    #[error("no preset locators configured")]
    NoLocators,

    /// A resource could not be fetched
    #[error("failed to fetch {locator}: {source}")]
    Fetch {
        /// The failing resource
        locator: Locator,
        /// Why the fetch failed
        source: FetchError,
    },

    /// A resource did not arrive in time
    #[error("timed out after {after:?} fetching {locator}")]
    Timeout {
        /// The slow resource
        locator: Locator,
        /// The limit that was exceeded
        after: Duration,
    },

    /// A resource arrived but is not a usable preset
    #[error("invalid preset at {locator}: {source}")]
    InvalidPreset {
        /// The offending resource
        locator: Locator,
        /// What was wrong with it
        source: PresetError,
    },

    /// A fetch task panicked or was cancelled
    #[error("fetch task failed: {reason}")]
    TaskFailed {
        /// Join error description
        reason: String,
    },
}

impl LoadError {
    /// Locator of the failing resource, when one is known
    #[must_use]
    pub fn locator(&self) -> Option<&Locator> {
        match self {
            Self::Fetch { locator, .. }
            | Self::Timeout { locator, .. }
            | Self::InvalidPreset { locator, .. } => Some(locator),
            Self::NoLocators | Self::TaskFailed { .. } => None,
        }
    }
}

// =============================================================================
// Sources
// =============================================================================

/// Something that can retrieve the raw body behind a [`Locator`]
#[async_trait]
pub trait PresetSource: Send + Sync {
    /// Fetch the resource body as text
    async fn fetch(&self, locator: &Locator) -> Result<String, FetchError>;
}

/// Fetches `http(s)` locators with reqwest
#[derive(Clone)]
pub struct HttpSource {
    client: reqwest::Client,
}

impl HttpSource {
    /// Create a source whose requests give up after `timeout`
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Request`] if the HTTP client cannot be built.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PresetSource for HttpSource {
    async fn fetch(&self, locator: &Locator) -> Result<String, FetchError> {
        let Locator::Http(url) = locator else {
            return Err(FetchError::Unsupported);
        };

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}

/// Reads file locators with `tokio::fs`
#[derive(Clone, Copy, Debug, Default)]
pub struct FileSource;

#[async_trait]
impl PresetSource for FileSource {
    async fn fetch(&self, locator: &Locator) -> Result<String, FetchError> {
        let Locator::File(path) = locator else {
            return Err(FetchError::Unsupported);
        };

        Ok(tokio::fs::read_to_string(path).await?)
    }
}

/// Serves `bundled:` locators from presets compiled into the binary
#[derive(Clone, Copy, Debug, Default)]
pub struct BundledSource;

impl BundledSource {
    /// Names of the compiled-in presets
    pub fn names() -> impl Iterator<Item = &'static str> {
        BUNDLED_PRESETS.iter().map(|(name, _)| *name)
    }
}

#[async_trait]
impl PresetSource for BundledSource {
    async fn fetch(&self, locator: &Locator) -> Result<String, FetchError> {
        let Locator::Bundled(name) = locator else {
            return Err(FetchError::Unsupported);
        };

        BUNDLED_PRESETS
            .iter()
            .find(|(bundled, _)| bundled == name)
            .map(|(_, body)| (*body).to_string())
            .ok_or_else(|| FetchError::UnknownBundled { name: name.clone() })
    }
}

/// Dispatches each locator to the HTTP, file or bundled source
#[derive(Clone)]
pub struct DefaultSource {
    http: HttpSource,
    file: FileSource,
    bundled: BundledSource,
}

impl DefaultSource {
    /// Create a dispatching source with the given HTTP timeout
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Request`] if the HTTP client cannot be built.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        Ok(Self {
            http: HttpSource::new(timeout)?,
            file: FileSource,
            bundled: BundledSource,
        })
    }
}

#[async_trait]
impl PresetSource for DefaultSource {
    async fn fetch(&self, locator: &Locator) -> Result<String, FetchError> {
        match locator {
            Locator::Http(_) => self.http.fetch(locator).await,
            Locator::File(_) => self.file.fetch(locator).await,
            Locator::Bundled(_) => self.bundled.fetch(locator).await,
        }
    }
}

// =============================================================================
// Loader
// =============================================================================

/// Loads a fixed list of presets concurrently
#[derive(Clone)]
pub struct PresetLoader {
    source: Arc<dyn PresetSource>,
    fetch_timeout: Duration,
}

impl PresetLoader {
    /// Create a loader over `source`
    pub fn new(source: Arc<dyn PresetSource>) -> Self {
        Self {
            source,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    /// Set the per-fetch time limit
    #[must_use]
    pub fn with_fetch_timeout(mut self, fetch_timeout: Duration) -> Self {
        self.fetch_timeout = fetch_timeout;
        self
    }

    /// Per-fetch time limit
    #[must_use]
    pub fn fetch_timeout(&self) -> Duration {
        self.fetch_timeout
    }

    /// Fetch and parse every locator, resolving once all have arrived
    ///
    /// All fetches are issued up front. Presets come back in `locators`
    /// order regardless of completion order.
    ///
    /// # Errors
    ///
    /// Returns the first [`LoadError`] encountered; remaining fetches are
    /// aborted.
    pub async fn load(&self, locators: &[Locator]) -> Result<Vec<Preset>, LoadError> {
        if locators.is_empty() {
            return Err(LoadError::NoLocators);
        }

        let started = Instant::now();
        info!(count = locators.len(), "Loading presets");

        let mut join_set = JoinSet::new();
        for (index, locator) in locators.iter().cloned().enumerate() {
            let source = Arc::clone(&self.source);
            let limit = self.fetch_timeout;
            join_set.spawn(async move {
                let result = fetch_preset(source.as_ref(), &locator, limit).await;
                (index, result)
            });
        }

        // Completion barrier: one slot per request, released at zero
        let mut slots: Vec<Option<Preset>> = vec![None; locators.len()];
        let mut remaining = locators.len();

        while let Some(joined) = join_set.join_next().await {
            let (index, result) = joined.map_err(|e| LoadError::TaskFailed {
                reason: e.to_string(),
            })?;

            match result {
                Ok(preset) => {
                    debug!(index, name = %preset.name, "Preset arrived");
                    slots[index] = Some(preset);
                    remaining -= 1;
                }
                Err(e) => {
                    warn!(error = %e, "Preset load failed");
                    return Err(e);
                }
            }

            if remaining == 0 {
                break;
            }
        }

        let presets = slots
            .into_iter()
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| LoadError::TaskFailed {
                reason: format!("{remaining} fetch(es) never completed"),
            })?;

        info!(
            count = presets.len(),
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "Presets loaded"
        );
        Ok(presets)
    }
}

async fn fetch_preset(
    source: &dyn PresetSource,
    locator: &Locator,
    limit: Duration,
) -> Result<Preset, LoadError> {
    let body = match tokio::time::timeout(limit, source.fetch(locator)).await {
        Ok(Ok(body)) => body,
        Ok(Err(source)) => {
            return Err(LoadError::Fetch {
                locator: locator.clone(),
                source,
            })
        }
        Err(_) => {
            return Err(LoadError::Timeout {
                locator: locator.clone(),
                after: limit,
            })
        }
    };

    Preset::from_json(&body).map_err(|source| LoadError::InvalidPreset {
        locator: locator.clone(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// In-memory source; bodies keyed by locator string
    struct MapSource(HashMap<String, String>);

    #[async_trait]
    impl PresetSource for MapSource {
        async fn fetch(&self, locator: &Locator) -> Result<String, FetchError> {
            self.0
                .get(&locator.to_string())
                .cloned()
                .ok_or(FetchError::Status { status: 404 })
        }
    }

    fn body(name: &str) -> String {
        format!(r#"{{"name":"{name}","author":"t","wordlist1":["a"],"wordlist2":["b"]}}"#)
    }

    #[test]
    fn test_locator_parse() {
        assert_eq!(
            Locator::parse("https://example.com/p.json"),
            Locator::Http("https://example.com/p.json".to_string())
        );
        assert_eq!(
            Locator::parse("file:///tmp/p.json"),
            Locator::File(PathBuf::from("/tmp/p.json"))
        );
        assert_eq!(
            Locator::parse(" presets/a.json "),
            Locator::File(PathBuf::from("presets/a.json"))
        );
        assert_eq!(
            Locator::parse("bundled:elegant-penguin"),
            Locator::Bundled("elegant-penguin".to_string())
        );
        assert_eq!(
            Locator::parse("bundled:elegant-penguin").to_string(),
            "bundled:elegant-penguin"
        );
    }

    #[tokio::test]
    async fn test_empty_locator_list_rejected() {
        let loader = PresetLoader::new(Arc::new(MapSource(HashMap::new())));
        assert!(matches!(loader.load(&[]).await, Err(LoadError::NoLocators)));
    }

    #[tokio::test]
    async fn test_load_keeps_request_order() {
        let mut bodies = HashMap::new();
        bodies.insert("one.json".to_string(), body("One"));
        bodies.insert("two.json".to_string(), body("Two"));
        let loader = PresetLoader::new(Arc::new(MapSource(bodies)));

        let presets = loader
            .load(&[Locator::parse("two.json"), Locator::parse("one.json")])
            .await
            .unwrap();
        let names: Vec<_> = presets.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Two", "One"]);
    }

    #[tokio::test]
    async fn test_missing_resource_names_locator() {
        let mut bodies = HashMap::new();
        bodies.insert("one.json".to_string(), body("One"));
        let loader = PresetLoader::new(Arc::new(MapSource(bodies)));

        let err = loader
            .load(&[Locator::parse("one.json"), Locator::parse("missing.json")])
            .await
            .unwrap_err();
        assert_eq!(err.locator(), Some(&Locator::parse("missing.json")));
        assert!(matches!(
            err,
            LoadError::Fetch {
                source: FetchError::Status { status: 404 },
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_malformed_body_rejected() {
        let mut bodies = HashMap::new();
        bodies.insert("bad.json".to_string(), "{not json".to_string());
        let loader = PresetLoader::new(Arc::new(MapSource(bodies)));

        let err = loader.load(&[Locator::parse("bad.json")]).await.unwrap_err();
        assert!(matches!(err, LoadError::InvalidPreset { .. }));
        assert!(err.to_string().starts_with("invalid preset at bad.json"));
    }

    #[tokio::test]
    async fn test_file_source_reads_preset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("p.json");
        std::fs::write(&path, body("From Disk")).unwrap();

        let loader = PresetLoader::new(Arc::new(FileSource));
        let presets = loader.load(&[Locator::File(path)]).await.unwrap();
        assert_eq!(presets[0].name, "From Disk");
    }

    #[tokio::test]
    async fn test_bundled_presets_all_parse() {
        let locators: Vec<_> = BundledSource::names()
            .map(|name| Locator::Bundled(name.to_string()))
            .collect();
        let presets = PresetLoader::new(Arc::new(BundledSource))
            .load(&locators)
            .await
            .unwrap();
        assert_eq!(presets.len(), BUNDLED_PRESETS.len());
    }

    #[tokio::test]
    async fn test_unknown_bundled_name_rejected() {
        let err = BundledSource
            .fetch(&Locator::parse("bundled:nope"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "no bundled preset named 'nope'");
    }

    #[tokio::test]
    async fn test_file_source_rejects_http_locator() {
        let err = FileSource
            .fetch(&Locator::parse("http://localhost/p.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Unsupported));
    }
}
