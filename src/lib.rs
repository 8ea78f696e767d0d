// src/lib.rs — Library root for Lucence

pub mod api;
pub mod assets;
pub mod cli;
pub mod head;
pub mod infra;
