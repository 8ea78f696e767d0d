// src/cli/scripts.rs — Local script management and head preview

use crate::assets::{AssetName, AssetStore};
use crate::head::HeadInjector;
use crate::infra::config::Config;

fn open_store(config: &Config, root: Option<String>) -> AssetStore {
    match root {
        Some(root) => AssetStore::new(root),
        None => AssetStore::new(config.store.resolve_root()),
    }
}

/// Print stored script names, one per line.
pub fn run_list(config: &Config, root: Option<String>) -> anyhow::Result<()> {
    let store = open_store(config, root);
    let names = store.list()?;
    if names.is_empty() {
        eprintln!("No plugin scripts in {}", store.root().display());
        return Ok(());
    }
    for name in names {
        println!("{name}");
    }
    Ok(())
}

pub fn run_delete(config: &Config, name: &str, root: Option<String>) -> anyhow::Result<()> {
    let store = open_store(config, root);
    let name = AssetName::parse(name)?;
    store.delete(&name)?;
    println!("Deleted {}", store.resolve_path(&name).display());
    Ok(())
}

/// Print the markup injected for `context`, or a note on stderr if none.
pub fn run_head(config: &Config, context: &str) -> anyhow::Result<()> {
    let injector = HeadInjector::from_config(&config.head);
    let markup = injector.render(context);
    if markup.is_empty() {
        eprintln!("No head fragments for context '{context}'");
    } else {
        print!("{markup}");
    }
    Ok(())
}
