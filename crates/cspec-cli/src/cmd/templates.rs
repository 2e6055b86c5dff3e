use crate::output::print_json;
use clap::{Subcommand, ValueEnum};
use cspec_core::{
    template::{list_templates, load_template},
    CspecError,
};
use std::path::Path;

// ---------------------------------------------------------------------------
// Subcommand types
// ---------------------------------------------------------------------------

#[derive(Subcommand)]
pub enum TemplatesSubcommand {
    /// List available issue templates
    List,

    /// Print an issue template
    Get {
        /// Template name (e.g. feature, bug)
        name: String,
        /// Output format
        #[arg(long, short = 'f', value_enum, default_value_t = TemplateFormat::Markdown)]
        format: TemplateFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TemplateFormat {
    /// Fillable markdown skeleton
    Markdown,
    /// Raw YAML source
    Yaml,
    /// YAML source as JSON
    Json,
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub fn run(root: &Path, subcmd: TemplatesSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        TemplatesSubcommand::List => list(root, json),
        TemplatesSubcommand::Get { name, format } => {
            let format = if json { TemplateFormat::Json } else { format };
            get(root, &name, format)
        }
    }
}

fn list(root: &Path, json: bool) -> anyhow::Result<()> {
    let templates = list_templates(root)?;
    if json {
        return print_json(&templates);
    }

    println!("Available issue templates ({}):\n", templates.len());
    for entry in &templates {
        let description = entry
            .template
            .description
            .as_deref()
            .unwrap_or("No description");
        let labels = if entry.template.labels.is_empty() {
            String::new()
        } else {
            format!(" [{}]", entry.template.labels.join(", "))
        };
        println!("  {}", entry.name);
        println!("    {description}{labels}");
    }
    Ok(())
}

fn get(root: &Path, name: &str, format: TemplateFormat) -> anyhow::Result<()> {
    let entry = match load_template(root, name) {
        Ok(entry) => entry,
        Err(e @ CspecError::TemplateNotFound(_)) => {
            let names: Vec<String> = list_templates(root)?.into_iter().map(|t| t.name).collect();
            match super::available_hint(&names) {
                Some(hint) => anyhow::bail!("{e} (available: {hint})"),
                None => return Err(e.into()),
            }
        }
        Err(e) => return Err(e.into()),
    };

    match format {
        TemplateFormat::Yaml => print!("{}", entry.source),
        TemplateFormat::Json => println!("{}", entry.to_json()?),
        TemplateFormat::Markdown => println!("{}", entry.render_markdown()),
    }
    Ok(())
}
