// src/head/mod.rs — Conditional head injection for rendered documents

pub mod fragments;
pub mod injector;

pub use fragments::HeadFragment;
pub use injector::{HeadInjector, HeadModel, InjectionPolicy};
