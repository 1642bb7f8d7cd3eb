//! # Catalog Subcommand
//!
//! Prints the contact form option lists (project type, deadline, budget).

use anyhow::Result;
use clap::Args;
use hce_forms::ContactCatalog;

/// Arguments for the `hce catalog` subcommand.
#[derive(Args, Debug)]
pub struct CatalogArgs {
    /// Print YAML instead of JSON.
    #[arg(long)]
    pub yaml: bool,
}

/// Execute the catalog subcommand.
pub fn run_catalog(args: &CatalogArgs) -> Result<u8> {
    println!("{}", render_catalog(args.yaml)?);
    Ok(0)
}

fn render_catalog(yaml: bool) -> Result<String> {
    let catalog = ContactCatalog::get();
    let text = if yaml {
        serde_yaml::to_string(&catalog)?
    } else {
        serde_json::to_string_pretty(&catalog)?
    };
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_and_yaml_render_the_same_catalog() {
        let json: serde_json::Value = serde_json::from_str(&render_catalog(false).unwrap()).unwrap();
        let yaml: serde_json::Value = serde_yaml::from_str(&render_catalog(true).unwrap()).unwrap();
        assert_eq!(json, yaml);
        assert_eq!(json["projectType"][0]["label"], "Web Development");
    }
}
