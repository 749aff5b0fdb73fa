use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::model::{SortDirection, ViewStateUpdate};

#[derive(Debug, Parser)]
#[command(
    name = "seqr-views",
    version,
    about = "Filter, sort, paginate and export seqr case-review collections"
)]
pub struct Cli {
    #[arg(long, global = true, default_value_t = false, help = "Force debug logging")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Dashboard project list
    Projects(ProjectsArgs),
    /// Family table of one project
    Families(FamiliesArgs),
    /// Saved variants
    Variants(VariantsArgs),
    /// Case-review and analysis status counts per project
    Counts(CountsArgs),
    /// Write a filtered, sorted table as TSV
    Export(ExportArgs),
    /// List the filter and sort keys a view accepts
    Options(OptionsArgs),
}

#[derive(Debug, Args)]
pub struct StoreArgs {
    #[arg(long, help = "Store snapshot (JSON, optionally .gz)")]
    pub store: PathBuf,
}

#[derive(Debug, Args, Default)]
pub struct ViewArgs {
    #[arg(long, help = "Filter key, e.g. ALL, ACCEPTED, TAG:<name>")]
    pub filter: Option<String>,

    #[arg(long, help = "Sort key, e.g. FAMILY_NAME, DATE_CREATED")]
    pub sort: Option<String>,

    #[arg(long, default_value_t = false, conflicts_with = "asc")]
    pub desc: bool,

    #[arg(long, default_value_t = false)]
    pub asc: bool,

    #[arg(long)]
    pub search: Option<String>,

    #[arg(long, help = "Page number, starting at 1")]
    pub page: Option<usize>,

    #[arg(long)]
    pub page_size: Option<usize>,

    #[arg(long, default_value_t = false, help = "List individuals under each family")]
    pub details: bool,

    #[arg(long, default_value_t = false, help = "Reset filter, sort and search before applying flags")]
    pub reset: bool,

    #[arg(long, help = "View state file; read before and written after the run")]
    pub state: Option<PathBuf>,
}

impl ViewArgs {
    /// Flags as view-state updates. Page goes last because the other updates
    /// send the view back to the first page.
    pub fn updates<F, S>(
        &self,
        parse_filter: impl Fn(&str) -> F,
        parse_sort: impl Fn(&str) -> S,
    ) -> Vec<ViewStateUpdate<F, S>> {
        let mut updates = Vec::new();
        if self.reset {
            updates.push(ViewStateUpdate::Reset);
        }
        if let Some(key) = &self.filter {
            updates.push(ViewStateUpdate::SetFilter(parse_filter(key)));
        }
        if let Some(key) = &self.sort {
            updates.push(ViewStateUpdate::SetSortColumn(parse_sort(key)));
        }
        if self.desc {
            updates.push(ViewStateUpdate::SetSortDirection(SortDirection::Descending));
        } else if self.asc {
            updates.push(ViewStateUpdate::SetSortDirection(SortDirection::Ascending));
        }
        if let Some(text) = &self.search {
            updates.push(ViewStateUpdate::SetSearchText(text.clone()));
        }
        if let Some(size) = self.page_size {
            updates.push(ViewStateUpdate::SetRecordsPerPage(size));
        }
        if self.details {
            updates.push(ViewStateUpdate::SetShowDetails(true));
        }
        if let Some(page) = self.page {
            updates.push(ViewStateUpdate::SetPage(page.saturating_sub(1)));
        }
        updates
    }
}

#[derive(Debug, Args)]
pub struct ProjectsArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    #[command(flatten)]
    pub view: ViewArgs,
}

#[derive(Debug, Args)]
pub struct FamiliesArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    #[command(flatten)]
    pub view: ViewArgs,

    #[arg(long)]
    pub project: String,

    #[arg(long)]
    pub analysis_group: Option<String>,

    #[arg(long, help = "Viewer email, used by ASSIGNED_TO_ME")]
    pub user: Option<String>,
}

#[derive(Debug, Args)]
pub struct VariantsArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    #[command(flatten)]
    pub view: ViewArgs,

    #[arg(long)]
    pub project: Option<String>,

    #[arg(long)]
    pub family: Option<String>,
}

#[derive(Debug, Args)]
pub struct CountsArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportTable {
    Projects,
    Families,
    Individuals,
    Variants,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    #[command(flatten)]
    pub view: ViewArgs,

    #[arg(long, value_enum)]
    pub table: ExportTable,

    #[arg(long, help = "Required for families and individuals")]
    pub project: Option<String>,

    #[arg(long, help = "Viewer email, used by ASSIGNED_TO_ME")]
    pub user: Option<String>,

    #[arg(long)]
    pub out: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OptionsView {
    Projects,
    Families,
    Variants,
}

#[derive(Debug, Args)]
pub struct OptionsArgs {
    #[arg(long, value_enum)]
    pub view: OptionsView,
}

#[cfg(test)]
#[path = "../tests/src_inline/cli.rs"]
mod tests;
