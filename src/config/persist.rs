//! Writing configuration files with toml_edit so comments can be attached.

use anyhow::{Context, Result};
use std::path::Path;
use toml_edit::{DocumentMut, Item};

use super::Config;

/// Write a commented default config file. Refuses to overwrite an existing file.
pub fn write_default_config(path: &Path) -> Result<()> {
    if path.exists() {
        anyhow::bail!("Config file already exists: {:?}", path);
    }

    let mut doc: DocumentMut = toml::to_string_pretty(&Config::default())
        .with_context(|| "Failed to serialize default config")?
        .parse()
        .with_context(|| "Failed to parse serialized config")?;

    if let Some(table) = doc.get_mut("thumbnails").and_then(Item::as_table_mut) {
        table.decor_mut().set_prefix(
            "\n# filter: nearest | triangle | catmullrom | gaussian | lanczos3\n",
        );
    }

    std::fs::write(path, doc.to_string())
        .with_context(|| format!("Failed to write config file: {:?}", path))?;

    Ok(())
}
