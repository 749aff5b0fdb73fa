use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::ReportError;
use crate::model::{Family, Individual, Project, Sample, SavedVariant};
use crate::options::RelatedCollections;
use crate::options::families::individuals_of;
use crate::pipeline::joins::{family_display_name, percent_solved, project_name, tag_name};
use crate::report::{format_percent, sanitize_cell};

/// One column of a tabular download.
pub struct ExportField<E> {
    pub header: &'static str,
    pub value: fn(&E, &RelatedCollections<'_>) -> String,
}

pub struct ExportConfig<E> {
    pub filename: String,
    pub headers: Vec<String>,
    fields: Vec<ExportField<E>>,
}

impl<E> ExportConfig<E> {
    pub fn process_row(&self, entity: &E, related: &RelatedCollections<'_>) -> Vec<String> {
        self.fields
            .iter()
            .map(|field| (field.value)(entity, related))
            .collect()
    }
}

pub fn export_config<E>(name_prefix: &str, suffix: &str, fields: Vec<ExportField<E>>) -> ExportConfig<E> {
    let prefix = name_prefix
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect::<String>();
    let filename = if prefix.is_empty() {
        suffix.to_string()
    } else {
        format!("{prefix}_{suffix}")
    };
    ExportConfig {
        filename,
        headers: fields.iter().map(|f| f.header.to_string()).collect(),
        fields,
    }
}

pub fn project_export_fields() -> Vec<ExportField<Project>> {
    vec![
        ExportField {
            header: "Project",
            value: |p, _| p.name.clone(),
        },
        ExportField {
            header: "Description",
            value: |p, _| p.description.clone(),
        },
        ExportField {
            header: "Created Date",
            value: |p, _| p.created_date.clone(),
        },
        ExportField {
            header: "Last Accessed",
            value: |p, _| p.last_accessed_date.clone().unwrap_or_default(),
        },
        ExportField {
            header: "Families",
            value: |p, _| p.num_families.to_string(),
        },
        ExportField {
            header: "Individuals",
            value: |p, _| p.num_individuals.to_string(),
        },
        ExportField {
            header: "Tagged Variants",
            value: |p, _| p.num_variant_tags.to_string(),
        },
        ExportField {
            header: "% Solved",
            value: |p, _| format_percent(percent_solved(p)),
        },
    ]
}

pub fn family_export_fields() -> Vec<ExportField<Family>> {
    vec![
        ExportField {
            header: "Project",
            value: |f, r| project_name(r.store, &f.project_guid),
        },
        ExportField {
            header: "Family ID",
            value: |f, _| f.family_id.clone(),
        },
        ExportField {
            header: "Display Name",
            value: |f, _| f.display().to_string(),
        },
        ExportField {
            header: "Analysis Status",
            value: |f, _| f.analysis_status.name().to_string(),
        },
        ExportField {
            header: "Assigned Analyst",
            value: |f, _| {
                f.assigned_analyst
                    .as_ref()
                    .map(|a| a.email.clone())
                    .unwrap_or_default()
            },
        },
        ExportField {
            header: "Analysed By",
            value: |f, _| {
                f.analysed_by
                    .iter()
                    .map(|a| a.created_by.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            },
        },
        ExportField {
            header: "Individuals",
            value: |f, r| individuals_of(r.store, f).len().to_string(),
        },
        ExportField {
            header: "Created Date",
            value: |f, _| f.created_date.clone(),
        },
        ExportField {
            header: "Description",
            value: |f, _| f.description.clone(),
        },
    ]
}

pub fn individual_export_fields() -> Vec<ExportField<Individual>> {
    vec![
        ExportField {
            header: "Project",
            value: |i, r| {
                r.store
                    .get::<Family>(&i.family_guid)
                    .map(|f| project_name(r.store, &f.project_guid))
                    .unwrap_or_default()
            },
        },
        ExportField {
            header: "Family ID",
            value: |i, r| family_display_name(r.store, &i.family_guid),
        },
        ExportField {
            header: "Individual ID",
            value: |i, _| i.individual_id.clone(),
        },
        ExportField {
            header: "Paternal ID",
            value: |i, _| i.paternal_id.clone().unwrap_or_default(),
        },
        ExportField {
            header: "Maternal ID",
            value: |i, _| i.maternal_id.clone().unwrap_or_default(),
        },
        ExportField {
            header: "Sex",
            value: |i, _| i.sex.code().to_string(),
        },
        ExportField {
            header: "Affected Status",
            value: |i, _| i.affected.code().to_string(),
        },
        ExportField {
            header: "Case Review Status",
            value: |i, _| i.case_review_status.name().to_string(),
        },
        ExportField {
            header: "Phenotypes",
            value: |i, _| {
                i.features
                    .iter()
                    .map(|f| f.label.as_str())
                    .collect::<Vec<_>>()
                    .join("; ")
            },
        },
        ExportField {
            header: "Samples",
            value: |i, r| {
                i.sample_guids
                    .iter()
                    .filter(|guid| r.store.get::<Sample>(guid).is_some())
                    .count()
                    .to_string()
            },
        },
    ]
}

pub fn variant_export_fields() -> Vec<ExportField<SavedVariant>> {
    vec![
        ExportField {
            header: "Chrom",
            value: |v, _| v.chrom.clone(),
        },
        ExportField {
            header: "Pos",
            value: |v, _| v.pos.to_string(),
        },
        ExportField {
            header: "Ref",
            value: |v, _| v.reference.clone(),
        },
        ExportField {
            header: "Alt",
            value: |v, _| v.alt.clone(),
        },
        ExportField {
            header: "Genes",
            value: |v, _| v.transcripts.keys().cloned().collect::<Vec<_>>().join(", "),
        },
        ExportField {
            header: "Families",
            value: |v, r| {
                v.family_guids
                    .iter()
                    .map(|guid| family_display_name(r.store, guid))
                    .collect::<Vec<_>>()
                    .join(", ")
            },
        },
        ExportField {
            header: "Tags",
            value: |v, r| {
                v.tag_guids
                    .iter()
                    .map(|guid| tag_name(r.store, guid))
                    .collect::<Vec<_>>()
                    .join(", ")
            },
        },
        ExportField {
            header: "Genome Version",
            value: |v, _| v.genome_version.clone(),
        },
    ]
}

pub fn render_tsv<E>(
    config: &ExportConfig<E>,
    rows: &[Arc<E>],
    related: &RelatedCollections<'_>,
) -> String {
    let mut out = String::new();
    out.push_str(&config.headers.join("\t"));
    out.push('\n');
    for row in rows {
        let cells = config
            .process_row(row, related)
            .iter()
            .map(|c| sanitize_cell(c))
            .collect::<Vec<_>>();
        out.push_str(&cells.join("\t"));
        out.push('\n');
    }
    out
}

/// Writes `<out_dir>/<filename>.tsv` and returns its path.
pub fn write_tsv<E>(
    config: &ExportConfig<E>,
    rows: &[Arc<E>],
    related: &RelatedCollections<'_>,
    out_dir: &Path,
) -> Result<PathBuf, ReportError> {
    fs::create_dir_all(out_dir)?;
    let path = out_dir.join(format!("{}.tsv", config.filename));
    let mut w = BufWriter::new(File::create(&path)?);
    w.write_all(render_tsv(config, rows, related).as_bytes())?;
    w.flush()?;
    tracing::info!(path = %path.display(), rows = rows.len(), "wrote export");
    Ok(path)
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/export.rs"]
mod tests;
