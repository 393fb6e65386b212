//! Resolve object ids against a JSON property dump.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use connect_admin::{
    index_by_id, resolve_guids, GuidResolution, JsonPropertySource, ObjectId, PropertyMapping,
    PropertyMappings, PropertySource,
};
use serde::Serialize;
use tracing::info;

use crate::config::{Config, OutputFormat};
use crate::output::print_json;

#[derive(Debug, Args)]
pub struct ResolveCommand {
    /// JSON file mapping model ids to arrays of objects.
    #[arg(long)]
    pub dump: PathBuf,

    /// Model to resolve objects in.
    #[arg(long)]
    pub model: String,

    /// Extra property column, as `set/property[=label]`. Repeatable.
    #[arg(long = "column", value_parser = parse_column)]
    pub columns: Vec<PropertyMapping>,

    /// Object ids to resolve. Defaults to every object of the model.
    pub object_ids: Vec<ObjectId>,
}

fn parse_column(s: &str) -> Result<PropertyMapping, String> {
    PropertyMapping::parse(s).ok_or_else(|| format!("expected set/property[=label], got {s:?}"))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Row {
    object_id: ObjectId,
    ifc_guid: String,
    guid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    class: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    properties: BTreeMap<String, Option<String>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Failure {
    object_id: ObjectId,
    #[serde(skip_serializing_if = "Option::is_none")]
    ifc_guid: Option<String>,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<&'static str>,
}

#[derive(Debug, Serialize)]
struct Report {
    model: String,
    resolved: Vec<Row>,
    failed: Vec<Failure>,
}

impl ResolveCommand {
    pub fn run(&self, config: &Config) -> Result<bool> {
        let source = JsonPropertySource::from_path(&self.dump)
            .with_context(|| format!("failed to load property dump {}", self.dump.display()))?;

        let object_ids = if self.object_ids.is_empty() {
            source.object_ids(&self.model).unwrap_or_default()
        } else {
            self.object_ids.clone()
        };
        info!(model = %self.model, count = object_ids.len(), "Resolving objects");

        let resolution = resolve_guids(&source, &self.model, &object_ids)
            .with_context(|| format!("failed to resolve objects in model {}", self.model))?;

        let mappings: PropertyMappings = self.columns.iter().cloned().collect();
        let report = self.build_report(&source, &resolution, &mappings, config)?;

        match config.output {
            OutputFormat::Text => print_text(&report, &mappings),
            OutputFormat::Json => print_json(&report),
        }
        Ok(resolution.is_complete())
    }

    fn build_report(
        &self,
        source: &dyn PropertySource,
        resolution: &GuidResolution,
        mappings: &PropertyMappings,
        config: &Config,
    ) -> Result<Report> {
        let objects = if mappings.is_empty() {
            Vec::new()
        } else {
            let ids: Vec<ObjectId> = resolution.resolved.iter().map(|r| r.object_id).collect();
            source.object_properties(&self.model, &ids)?
        };
        let index = index_by_id(&objects);

        let resolved = resolution
            .resolved
            .iter()
            .map(|r| Row {
                object_id: r.object_id,
                ifc_guid: r.ifc_guid.clone(),
                guid: r.guid.format(config.format_options),
                name: r.name.clone(),
                class: r.class.clone(),
                properties: index
                    .get(&r.object_id)
                    .map(|o| mappings.apply(o).into_iter().collect())
                    .unwrap_or_default(),
            })
            .collect();

        let missing = resolution.missing.iter().map(|&object_id| Failure {
            object_id,
            ifc_guid: None,
            error: "no IFC GUID".to_string(),
            code: None,
        });
        let invalid = resolution.invalid.iter().map(|i| Failure {
            object_id: i.object_id,
            ifc_guid: Some(i.ifc_guid.clone()),
            error: i.error.to_string(),
            code: Some(i.error.kind().code()),
        });

        Ok(Report {
            model: self.model.clone(),
            resolved,
            failed: missing.chain(invalid).collect(),
        })
    }
}

fn print_text(report: &Report, mappings: &PropertyMappings) {
    for row in &report.resolved {
        let mut line = format!("{}\t{}\t{}", row.object_id, row.ifc_guid, row.guid);
        for mapping in mappings.iter() {
            let value = row.properties.get(&mapping.label).cloned().flatten();
            line.push('\t');
            line.push_str(value.as_deref().unwrap_or("-"));
        }
        println!("{}", line);
    }
    for failure in &report.failed {
        match &failure.ifc_guid {
            Some(ifc_guid) => eprintln!(
                "error: object {} ({}): {}",
                failure.object_id, ifc_guid, failure.error
            ),
            None => eprintln!("error: object {}: {}", failure.object_id, failure.error),
        }
    }
}
