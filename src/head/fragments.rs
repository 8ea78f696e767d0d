// src/head/fragments.rs — Static markup table for head injection
//
// Fragments are plain data. Adding a library means adding a row here or a
// `[[head.fragments]]` entry in config.toml, never new decision logic.

use serde::{Deserialize, Serialize};

/// Where the bundled katex / mermaid builds are served from.
pub const DEFAULT_ASSET_PREFIX: &str = "/plugins/plugin-lucence-for-halo/assets/static";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadFragment {
    pub name: String,
    pub markup: String,
}

impl HeadFragment {
    pub fn new(name: impl Into<String>, markup: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            markup: markup.into(),
        }
    }
}

/// Math rendering: stylesheet plus deferred script.
pub fn katex(prefix: &str) -> HeadFragment {
    let prefix = prefix.trim_end_matches('/');
    HeadFragment::new(
        "katex",
        format!(
            "<link rel=\"stylesheet\" href=\"{prefix}/katex/katex.min.css\">\n\
             <script defer src=\"{prefix}/katex/katex.min.js\"></script>\n"
        ),
    )
}

/// Diagram rendering: mermaid plus the editor's renderer bootstrap.
pub fn mermaid(prefix: &str) -> HeadFragment {
    let prefix = prefix.trim_end_matches('/');
    HeadFragment::new(
        "mermaid",
        format!(
            "<script defer src=\"{prefix}/mermaid/mermaid.min.js\"></script>\n\
             <script id='lucence-mermaid__renderer' defer src=\"{prefix}/lucence/kernel_exposer.js\"></script>\n"
        ),
    )
}

pub fn default_fragments(prefix: &str) -> Vec<HeadFragment> {
    vec![katex(prefix), mermaid(prefix)]
}
