//! Deep-link manifest loading.
//!
//! The CLI consumes a YAML or JSON manifest describing the registered deep
//! links, standing in for the annotation scanner of a host build system.
//!
//! ```yaml
//! prefixes:
//!   webLink:
//!     - http://example.com
//!     - https://example.com
//! deep_links:
//!   - template: airbnb://example.com/deepLink
//!     handler: com.example.SampleActivity
//!   - prefix: webLink
//!     suffix: /method1
//!     handler: com.example.SampleActivity
//!     method: webLinkMethod
//! ```
//!
//! A prefixed entry expands to one [`DeepLinkEntry`] per configured prefix.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{bail, Context};
use serde::Deserialize;

use crate::compiler::{expand_prefixes, DeepLinkEntry};

#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    /// Named URI-scheme prefix groups, referenced by prefixed entries.
    #[serde(default)]
    pub prefixes: BTreeMap<String, Vec<String>>,
    pub deep_links: Vec<ManifestEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ManifestEntry {
    /// Full template string. Mutually exclusive with `prefix`/`suffix`.
    #[serde(default)]
    pub template: Option<String>,
    /// Name of a prefix group declared under `prefixes`.
    #[serde(default)]
    pub prefix: Option<String>,
    /// Suffix appended to every prefix of the group.
    #[serde(default)]
    pub suffix: Option<String>,
    pub handler: String,
    #[serde(default)]
    pub method: Option<String>,
}

impl Manifest {
    /// Load a manifest from a `.yaml`/`.yml` or `.json` file.
    pub fn load(path: &Path) -> anyhow::Result<Manifest> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read manifest {}", path.display()))?;
        let manifest = if path
            .extension()
            .is_some_and(|ext| ext == "yaml" || ext == "yml")
        {
            serde_yaml::from_str(&content)
                .with_context(|| format!("invalid YAML manifest {}", path.display()))?
        } else {
            serde_json::from_str(&content)
                .with_context(|| format!("invalid JSON manifest {}", path.display()))?
        };
        Ok(manifest)
    }

    /// Expand the manifest into the flat entry list the compiler consumes.
    pub fn entries(&self) -> anyhow::Result<Vec<DeepLinkEntry>> {
        let mut entries = Vec::with_capacity(self.deep_links.len());
        for entry in &self.deep_links {
            let templates = match (&entry.template, &entry.prefix, &entry.suffix) {
                (Some(template), None, None) => vec![template.clone()],
                (None, Some(prefix), Some(suffix)) => {
                    let Some(prefixes) = self.prefixes.get(prefix) else {
                        bail!(
                            "entry for `{}` references unknown prefix group `{prefix}`",
                            entry.handler
                        );
                    };
                    expand_prefixes(prefixes, suffix)
                }
                _ => bail!(
                    "entry for `{}` must set either `template` or both `prefix` and `suffix`",
                    entry.handler
                ),
            };
            for template in templates {
                entries.push(DeepLinkEntry {
                    uri_template: template,
                    handler: entry.handler.clone(),
                    method: entry.method.clone(),
                });
            }
        }
        Ok(entries)
    }
}
