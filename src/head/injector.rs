// src/head/injector.rs — Decides which fragments a rendered document gets
//
// Stateless after construction: one injector is shared by every render.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::head::fragments::HeadFragment;
use crate::infra::config::HeadConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InjectionPolicy {
    /// Inject only into the configured render contexts.
    #[default]
    Conditional,
    /// Inject into every document.
    Unconditional,
}

/// Appendable head section supplied by the host's template engine.
#[cfg_attr(test, mockall::automock)]
pub trait HeadModel {
    fn append_text(&mut self, text: &str);
}

impl HeadModel for String {
    fn append_text(&mut self, text: &str) {
        self.push_str(text);
    }
}

#[derive(Debug, Clone)]
pub struct HeadInjector {
    policy: InjectionPolicy,
    contexts: HashSet<String>,
    fragments: Vec<HeadFragment>,
}

impl HeadInjector {
    pub fn new<I, S>(policy: InjectionPolicy, contexts: I, fragments: Vec<HeadFragment>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            policy,
            contexts: contexts.into_iter().map(Into::into).collect(),
            fragments,
        }
    }

    pub fn from_config(config: &HeadConfig) -> Self {
        Self::new(
            config.policy,
            config.contexts.iter().cloned(),
            config.fragment_table(),
        )
    }

    pub fn policy(&self) -> InjectionPolicy {
        self.policy
    }

    /// Whether documents rendered under `context` receive any fragments.
    /// Matching is exact and case-sensitive.
    pub fn applies_to(&self, context: &str) -> bool {
        match self.policy {
            InjectionPolicy::Unconditional => true,
            InjectionPolicy::Conditional => self.contexts.contains(context),
        }
    }

    pub fn decide(&self, context: &str) -> Vec<&HeadFragment> {
        if self.applies_to(context) {
            self.fragments.iter().collect()
        } else {
            Vec::new()
        }
    }

    /// Concatenated markup of [`decide`](Self::decide); empty when nothing applies.
    pub fn render(&self, context: &str) -> String {
        self.decide(context)
            .into_iter()
            .map(|f| f.markup.as_str())
            .collect()
    }

    pub fn fragment(&self, name: &str) -> Option<&HeadFragment> {
        self.fragments.iter().find(|f| f.name == name)
    }

    /// Append the selected markup to `model` as a single text node.
    /// Returns false, leaving `model` untouched, when nothing applies.
    pub fn inject<M: HeadModel + ?Sized>(&self, context: &str, model: &mut M) -> bool {
        let markup = self.render(context);
        if markup.is_empty() {
            return false;
        }
        tracing::debug!("Injecting head fragments for context '{}'", context);
        model.append_text(&markup);
        true
    }
}

impl Default for HeadInjector {
    fn default() -> Self {
        Self::from_config(&HeadConfig::default())
    }
}
