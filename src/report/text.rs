use crate::model::{Family, Project, SavedVariant};
use crate::options::{FilterDef, RelatedCollections, SortDef};
use crate::options::families::individuals_of;
use crate::pipeline::Page;
use crate::pipeline::joins::{family_display_name, percent_solved, tag_name};
use crate::report::json::CountsReport;
use crate::report::{date_part, format_percent, truncate};

fn push_header(out: &mut String, noun: &str, shown_total: usize, store_total: usize) {
    if shown_total == 0 {
        out.push_str(&format!("0 {noun} found (of {store_total})\n"));
    } else {
        out.push_str(&format!("Showing {shown_total} of {store_total} {noun}\n"));
    }
}

fn push_footer<E>(out: &mut String, page: &Page<E>) {
    if page.page_count > 1 {
        out.push_str(&format!(
            "Page {} of {} ({} per page)\n",
            page.page + 1,
            page.page_count,
            page.records_per_page
        ));
    }
}

pub fn render_projects(page: &Page<Project>, store_total: usize) -> String {
    let mut out = String::new();
    push_header(&mut out, "projects", page.total, store_total);
    if page.is_empty() {
        return out;
    }
    out.push_str(&format!(
        "{:<32} {:<12} {:>8} {:>11} {:>8}\n",
        "Project", "Created", "Families", "Individuals", "Solved"
    ));
    for project in &page.items {
        out.push_str(&format!(
            "{:<32} {:<12} {:>8} {:>11} {:>8}\n",
            truncate(&project.name, 32),
            date_part(&project.created_date),
            project.num_families,
            project.num_individuals,
            format_percent(percent_solved(project))
        ));
    }
    push_footer(&mut out, page);
    out
}

pub fn render_families(
    page: &Page<Family>,
    store_total: usize,
    related: &RelatedCollections<'_>,
    show_details: bool,
) -> String {
    let mut out = String::new();
    push_header(&mut out, "families", page.total, store_total);
    if page.is_empty() {
        return out;
    }
    out.push_str(&format!(
        "{:<24} {:<40} {:>11}\n",
        "Family", "Analysis Status", "Individuals"
    ));
    for family in &page.items {
        let individuals = individuals_of(related.store, family);
        out.push_str(&format!(
            "{:<24} {:<40} {:>11}\n",
            truncate(family.display(), 24),
            truncate(family.analysis_status.name(), 40),
            individuals.len()
        ));
        if show_details {
            for individual in individuals {
                out.push_str(&format!(
                    "    {:<20} {}\n",
                    truncate(individual.display(), 20),
                    individual.case_review_status.name()
                ));
            }
        }
    }
    push_footer(&mut out, page);
    out
}

pub fn render_variants(
    page: &Page<SavedVariant>,
    store_total: usize,
    related: &RelatedCollections<'_>,
) -> String {
    let mut out = String::new();
    push_header(&mut out, "saved variants", page.total, store_total);
    if page.is_empty() {
        return out;
    }
    for variant in &page.items {
        let families = variant
            .family_guids
            .iter()
            .map(|guid| family_display_name(related.store, guid))
            .collect::<Vec<_>>()
            .join(", ");
        let tags = variant
            .tag_guids
            .iter()
            .map(|guid| tag_name(related.store, guid))
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&format!(
            "{}-{}-{}-{}\t{}\t{}\n",
            variant.chrom, variant.pos, variant.reference, variant.alt, families, tags
        ));
    }
    push_footer(&mut out, page);
    out
}

pub fn render_counts(report: &CountsReport) -> String {
    let mut out = String::new();
    for project in &report.projects {
        out.push_str(&format!(
            "{} ({} families, {} solved)\n",
            project.name,
            project.num_families,
            format_percent(project.percent_solved)
        ));
        out.push_str("  Case review:\n");
        for c in &project.case_review_status_counts {
            out.push_str(&format!("    {:<30} {:>6}\n", c.name, c.count));
        }
        out.push_str("  Analysis:\n");
        for c in &project.analysis_status_counts {
            out.push_str(&format!("    {:<56} {:>6}\n", c.name, c.count));
        }
    }
    out
}

/// Filter keys grouped under their category headings, then the sort keys.
pub fn render_options<F, S>(filters: &[FilterDef<F>], sorts: &[SortDef<S>]) -> String {
    let mut out = String::from("Filters\n");
    let mut category = "";
    for def in filters {
        if def.category != category && !def.category.is_empty() {
            out.push_str(&format!("  {}\n", def.category));
        }
        category = def.category;
        out.push_str(&format!("    {:<30} {}\n", def.value, def.name));
    }
    out.push_str("Sort keys\n");
    for def in sorts {
        let note = if def.inverted { " (newest first)" } else { "" };
        out.push_str(&format!("    {:<30} {}{note}\n", def.value, def.name));
    }
    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/text.rs"]
mod tests;
