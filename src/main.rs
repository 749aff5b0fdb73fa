use std::sync::Arc;

use clap::Parser;
use serde::Serialize;
use serde::de::DeserializeOwned;

use seqr_views::cli::{
    Cli, Commands, CountsArgs, ExportArgs, ExportTable, FamiliesArgs, OptionsArgs, OptionsView,
    ProjectsArgs, VariantsArgs, ViewArgs,
};
use seqr_views::error::{CliError, InputError};
use seqr_views::input::load_store;
use seqr_views::input::view_state::{load_view_state, save_view_state};
use seqr_views::logging;
use seqr_views::model::view_state::{DashboardProfile, FamilyTableProfile, SavedVariantsProfile};
use seqr_views::model::{Family, Individual, Project, SavedVariant, ViewProfile, ViewState};
use seqr_views::options::RelatedCollections;
use seqr_views::options::families::{
    FamilyFilter, FamilyScope, FamilySort, family_filter_defs, family_sort_defs, individuals_of,
};
use seqr_views::options::projects::{
    ProjectFilter, ProjectSort, project_filter_defs, project_sort_defs,
};
use seqr_views::options::variants::{
    VariantFilter, VariantScope, VariantSort, variant_filter_defs, variant_sort_defs,
};
use seqr_views::pipeline::joins::{MemoizedJoins, project_name};
use seqr_views::pipeline::{FamiliesView, ProjectsView, SavedVariantsView, SelectorInputs, ViewEntity};
use seqr_views::report::export::{
    export_config, family_export_fields, individual_export_fields, project_export_fields,
    variant_export_fields, write_tsv,
};
use seqr_views::report::json::{build_counts_report, render_counts_json};
use seqr_views::report::text::{
    render_counts, render_families, render_options, render_projects, render_variants,
};
use seqr_views::store::EntityStore;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    if let Err(err) = run(cli) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Projects(args) => run_projects(&args),
        Commands::Families(args) => run_families(&args),
        Commands::Variants(args) => run_variants(&args),
        Commands::Counts(args) => run_counts(&args),
        Commands::Export(args) => run_export(&args),
        Commands::Options(args) => run_options(&args),
    }
}

fn resolve_state<F, S>(
    view: &ViewArgs,
    profile: &ViewProfile<F, S>,
    parse_filter: impl Fn(&str) -> F,
    parse_sort: impl Fn(&str) -> S,
) -> Result<ViewState<F, S>, InputError>
where
    F: DeserializeOwned + Clone + Default,
    S: DeserializeOwned + Clone + Default,
{
    let mut state = match &view.state {
        Some(path) => load_view_state(path, profile)?,
        None => profile.initial_state(),
    };
    state.apply_all(view.updates(parse_filter, parse_sort));
    Ok(state)
}

fn persist_state<F: Serialize, S: Serialize>(
    view: &ViewArgs,
    state: &ViewState<F, S>,
) -> Result<(), InputError> {
    if let Some(path) = &view.state {
        save_view_state(path, state)?;
    }
    Ok(())
}

fn run_projects(args: &ProjectsArgs) -> Result<(), CliError> {
    let store = load_store(&args.store.store)?;
    let state = resolve_state(
        &args.view,
        &DashboardProfile::dashboard_v1(),
        ProjectFilter::from_key,
        ProjectSort::from_key,
    )?;

    let selector = ProjectsView::new();
    let page = selector.visible_page(&SelectorInputs::new(&store, &state, &()));
    print!("{}", render_projects(&page, store.len::<Project>()));

    persist_state(&args.view, &state)?;
    Ok(())
}

fn family_scope(store: &EntityStore, project: &str, analysis_group: Option<&str>) -> FamilyScope {
    if store.get::<Project>(project).is_none() {
        tracing::warn!(project, "project not found in store");
    }
    match analysis_group {
        Some(group) => FamilyScope::analysis_group(project, group),
        None => FamilyScope::project(project),
    }
}

fn run_families(args: &FamiliesArgs) -> Result<(), CliError> {
    let store = load_store(&args.store.store)?;
    let state = resolve_state(
        &args.view,
        &FamilyTableProfile::family_table_v1(),
        FamilyFilter::from_key,
        FamilySort::from_key,
    )?;
    let scope = family_scope(&store, &args.project, args.analysis_group.as_deref());
    let viewer = args.user.as_deref();

    let selector = FamiliesView::new();
    let inputs = SelectorInputs::new(&store, &state, &scope).with_viewer(viewer);
    let page = selector.visible_page(&inputs);
    let in_scope = Family::candidates(&store, &scope).len();
    let related = RelatedCollections::with_viewer(&store, viewer);

    println!("{}", project_name(&store, &args.project));
    print!(
        "{}",
        render_families(&page, in_scope, &related, state.show_details)
    );

    persist_state(&args.view, &state)?;
    Ok(())
}

fn run_variants(args: &VariantsArgs) -> Result<(), CliError> {
    let store = load_store(&args.store.store)?;
    let state = resolve_state(
        &args.view,
        &SavedVariantsProfile::saved_variants_v1(),
        VariantFilter::from_key,
        VariantSort::from_key,
    )?;
    let scope = VariantScope {
        project_guid: args.project.clone(),
        family_guid: args.family.clone(),
    };

    let selector = SavedVariantsView::new();
    let page = selector.visible_page(&SelectorInputs::new(&store, &state, &scope));
    let in_scope = SavedVariant::candidates(&store, &scope).len();
    let related = RelatedCollections::new(&store);
    print!("{}", render_variants(&page, in_scope, &related));

    persist_state(&args.view, &state)?;
    Ok(())
}

fn run_counts(args: &CountsArgs) -> Result<(), CliError> {
    let store = load_store(&args.store.store)?;
    let state = DashboardProfile::dashboard_v1().initial_state();
    let projects = ProjectsView::new().visible(&SelectorInputs::new(&store, &state, &()));

    let joins = MemoizedJoins::new();
    let report = build_counts_report(&store, &joins, &projects);
    if args.json {
        println!("{}", render_counts_json(&report)?);
    } else {
        print!("{}", render_counts(&report));
    }
    Ok(())
}

fn require_project(args: &ExportArgs) -> Result<&str, CliError> {
    args.project.as_deref().ok_or_else(|| {
        CliError::Usage("--project is required for families and individuals exports".to_string())
    })
}

fn visible_families(
    store: &EntityStore,
    view: &ViewArgs,
    project: &str,
    viewer: Option<&str>,
) -> Result<Arc<Vec<Arc<Family>>>, CliError> {
    let state = resolve_state(
        view,
        &FamilyTableProfile::family_table_v1(),
        FamilyFilter::from_key,
        FamilySort::from_key,
    )?;
    let scope = family_scope(store, project, None);
    let rows =
        FamiliesView::new().visible(&SelectorInputs::new(store, &state, &scope).with_viewer(viewer));
    persist_state(view, &state)?;
    Ok(rows)
}

fn run_export(args: &ExportArgs) -> Result<(), CliError> {
    let store = load_store(&args.store.store)?;
    let viewer = args.user.as_deref();
    let related = RelatedCollections::with_viewer(&store, viewer);

    let path = match args.table {
        ExportTable::Projects => {
            let state = resolve_state(
                &args.view,
                &DashboardProfile::dashboard_v1(),
                ProjectFilter::from_key,
                ProjectSort::from_key,
            )?;
            let rows = ProjectsView::new().visible(&SelectorInputs::new(&store, &state, &()));
            persist_state(&args.view, &state)?;
            let config = export_config("seqr", "projects", project_export_fields());
            write_tsv(&config, &rows, &related, &args.out)?
        }
        ExportTable::Families => {
            let project = require_project(args)?;
            let rows = visible_families(&store, &args.view, project, viewer)?;
            let config = export_config(
                &project_name(&store, project),
                "families",
                family_export_fields(),
            );
            write_tsv(&config, &rows, &related, &args.out)?
        }
        ExportTable::Individuals => {
            let project = require_project(args)?;
            let families = visible_families(&store, &args.view, project, viewer)?;
            let rows: Vec<Arc<Individual>> = families
                .iter()
                .flat_map(|f| individuals_of(&store, f))
                .cloned()
                .collect();
            let config = export_config(
                &project_name(&store, project),
                "individuals",
                individual_export_fields(),
            );
            write_tsv(&config, &rows, &related, &args.out)?
        }
        ExportTable::Variants => {
            let state = resolve_state(
                &args.view,
                &SavedVariantsProfile::saved_variants_v1(),
                VariantFilter::from_key,
                VariantSort::from_key,
            )?;
            let scope = VariantScope {
                project_guid: args.project.clone(),
                family_guid: None,
            };
            let rows =
                SavedVariantsView::new().visible(&SelectorInputs::new(&store, &state, &scope));
            persist_state(&args.view, &state)?;
            let prefix = args
                .project
                .as_deref()
                .map(|guid| project_name(&store, guid))
                .unwrap_or_else(|| "seqr".to_string());
            let config = export_config(&prefix, "saved_variants", variant_export_fields());
            write_tsv(&config, &rows, &related, &args.out)?
        }
    };
    println!("{}", path.display());
    Ok(())
}

fn run_options(args: &OptionsArgs) -> Result<(), CliError> {
    let listing = match args.view {
        OptionsView::Projects => render_options(project_filter_defs(), project_sort_defs()),
        OptionsView::Families => render_options(family_filter_defs(), family_sort_defs()),
        OptionsView::Variants => render_options(variant_filter_defs(), variant_sort_defs()),
    };
    print!("{listing}");
    Ok(())
}
