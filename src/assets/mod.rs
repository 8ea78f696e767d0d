// src/assets/mod.rs — Plugin script storage (store + lifecycle service)

pub mod name;
pub mod service;
pub mod store;

pub use name::AssetName;
pub use service::{AssetService, ScriptUpload};
pub use store::{AssetStore, StagedScript};
