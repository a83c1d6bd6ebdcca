//! Generated-source emission.
//!
//! Writes a Rust source file embedding a compiled index as base64 string
//! constants, ready to be included in a host crate and loaded with
//! [`MatchIndex::load_base64`](crate::MatchIndex::load_base64).

use std::path::Path;

use anyhow::Context;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use minijinja::{context, Environment};

use crate::compiler::CompiledIndex;

const INDEX_RS_TEMPLATE: &str = r#"// @generated by linkdispatch-gen — do not edit.

/// Serialized deep link match index, base64 per block.
pub static MATCH_INDEX_BLOCKS: &[&str] = &[
{%- for block in blocks %}
    "{{ block }}",
{%- endfor %}
];

/// Configurable path segment keys that a replacement map must cover.
pub static CONFIGURABLE_PATH_KEYS: &[&str] = &[
{%- for key in keys %}
    "{{ key }}",
{%- endfor %}
];
"#;

/// Render the embeddable index source.
pub fn render_index_source(index: &CompiledIndex) -> anyhow::Result<String> {
    let blocks: Vec<String> = index.blocks.iter().map(|b| STANDARD.encode(b)).collect();
    let keys: Vec<&String> = index.configurable_path_keys.iter().collect();

    let mut env = Environment::new();
    env.add_template("index.rs", INDEX_RS_TEMPLATE)
        .context("invalid index source template")?;
    let rendered = env
        .get_template("index.rs")
        .context("index source template missing")?
        .render(context! { blocks => blocks, keys => keys })
        .context("failed to render index source")?;
    Ok(rendered)
}

/// Render and write the embeddable index source to `out_path`.
pub fn write_index_source(index: &CompiledIndex, out_path: &Path) -> anyhow::Result<()> {
    let rendered = render_index_source(index)?;
    if let Some(parent) = out_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(out_path, rendered)
        .with_context(|| format!("failed to write {}", out_path.display()))?;
    Ok(())
}
