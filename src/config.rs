//! Build configuration with TOML persistence.

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::engine::{Collator, ComparatorMap, Comparators};
use crate::types::{IndexError, IndexResult};

/// Extension substituted into cross-document locators by default.
pub const DEFAULT_LINK_EXTENSION: &str = "html";

/// Complete build configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Directory entry and index documents are resolved against, relative
    /// to the config file.
    #[serde(default)]
    pub entry_context: Option<PathBuf>,

    /// Extension of the published documents locators point into.
    #[serde(default = "default_link_extension")]
    pub link_extension: String,

    /// Index documents to build.
    #[serde(default, rename = "index")]
    pub indexes: Vec<IndexDocumentConfig>,

    /// Sort settings per index id.
    #[serde(default)]
    pub sort: BTreeMap<String, SortConfig>,

    /// Directory holding the config file.
    #[serde(skip)]
    pub base_dir: PathBuf,
}

/// One document holding `expand` sites and the entries feeding it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexDocumentConfig {
    /// The document to expand.
    pub path: PathBuf,

    /// Documents scanned for index commands, in reading order.
    pub entries: Vec<PathBuf>,

    /// Where the expanded document is written; stdout when absent.
    #[serde(default)]
    pub output: Option<PathBuf>,

    /// Directory for the id-annotated entry documents. Defaults to the
    /// directory of `output`, keeping each entry's position relative to
    /// the index document so locator links resolve.
    #[serde(default)]
    pub entries_output: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SortConfig {
    /// Collation locale tag.
    #[serde(default)]
    pub locale: Option<String>,

    /// How see/seeAlso lists are ordered.
    #[serde(default)]
    pub references: ReferenceOrder,
}

/// Ordering of see/seeAlso lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceOrder {
    /// Order of appearance in the manuscript.
    #[default]
    Listed,
    /// Collation of the target path.
    Locale,
}

fn default_link_extension() -> String {
    DEFAULT_LINK_EXTENSION.to_string()
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            entry_context: None,
            link_extension: default_link_extension(),
            indexes: Vec::new(),
            sort: BTreeMap::new(),
            base_dir: PathBuf::new(),
        }
    }
}

impl BuildConfig {
    /// Load from a TOML file. Relative paths resolve against its directory.
    pub fn load_from_file(path: &Path) -> IndexResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Self::from_toml(&content, base_dir)
    }

    /// Parse TOML text with `base_dir` as the config directory.
    pub fn from_toml(content: &str, base_dir: impl Into<PathBuf>) -> IndexResult<Self> {
        let mut config: Self = toml::from_str(content)?;
        config.base_dir = base_dir.into();
        log::debug!(
            "loaded config: {} index document(s), {} sort setting(s)",
            config.indexes.len(),
            config.sort.len()
        );
        Ok(config)
    }

    /// Directory entry documents are resolved against.
    pub fn entry_root(&self) -> PathBuf {
        match &self.entry_context {
            Some(context) => self.base_dir.join(context),
            None => self.base_dir.clone(),
        }
    }

    /// Absolute-or-config-relative path of an entry or index document.
    pub fn document_path(&self, path: &Path) -> PathBuf {
        self.entry_root().join(path)
    }

    /// Output path for an index document, relative to the config directory.
    pub fn output_path(&self, index: &IndexDocumentConfig) -> Option<PathBuf> {
        index.output.as_ref().map(|out| self.base_dir.join(out))
    }

    /// Output path for an annotated entry document of `index`, or `None`
    /// when neither `entries_output` nor `output` is set.
    pub fn entry_output_path(&self, index: &IndexDocumentConfig, entry: &Path) -> Option<PathBuf> {
        match &index.entries_output {
            Some(dir) => Some(self.base_dir.join(dir).join(entry)),
            None => {
                let output = self.output_path(index)?;
                let dir = output.parent().unwrap_or(Path::new(""));
                Some(dir.join(relative_path(&index.path, entry)))
            }
        }
    }

    /// The index document configured at `path`.
    pub fn index_document(&self, path: &Path) -> IndexResult<&IndexDocumentConfig> {
        self.indexes
            .iter()
            .find(|index| index.path == path)
            .ok_or_else(|| IndexError::UnknownDocument(path.display().to_string()))
    }

    /// Comparators for every index id with sort settings.
    pub fn comparators(&self) -> ComparatorMap {
        self.sort
            .iter()
            .map(|(id, settings)| {
                let collator = match &settings.locale {
                    Some(locale) => Collator::new(locale.clone()),
                    None => Collator::default(),
                };
                let comparators = match settings.references {
                    ReferenceOrder::Listed => Comparators::by_locale(collator),
                    ReferenceOrder::Locale => Comparators::locale_everywhere(collator),
                };
                (id.clone(), comparators)
            })
            .collect()
    }
}

/// Link from the directory of `from` to `target`, with the extension
/// replaced by `extension` and `/` as the separator.
pub fn relative_link(from: &Path, target: &Path, extension: &str) -> String {
    relative_segments(from, &target.with_extension(extension)).join("/")
}

/// Path of `target` relative to the directory of `from`.
pub fn relative_path(from: &Path, target: &Path) -> PathBuf {
    relative_segments(from, target).iter().collect()
}

fn relative_segments(from: &Path, target: &Path) -> Vec<String> {
    let base: Vec<Component> = from
        .parent()
        .map(|dir| dir.components().filter(|c| *c != Component::CurDir).collect())
        .unwrap_or_default();
    let target: Vec<Component> = target
        .components()
        .filter(|c| *c != Component::CurDir)
        .collect();

    let common = base
        .iter()
        .zip(target.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<String> = Vec::new();
    parts.extend(std::iter::repeat("..".to_string()).take(base.len() - common));
    parts.extend(
        target[common..]
            .iter()
            .map(|c| c.as_os_str().to_string_lossy().into_owned()),
    );
    parts
}
