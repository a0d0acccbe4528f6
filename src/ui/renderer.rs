//! Plain-text renderer for [`CatalogViewModel`].

use std::io::{self, Write};

use crate::app::AppState;
use crate::ui::viewmodel::{CatalogViewModel, DetailView};

/// Renders the current state to `out`.
///
/// # Errors
///
/// Propagates write errors from `out`.
pub fn render(state: &AppState, out: &mut impl Write) -> io::Result<()> {
    render_viewmodel(&state.compute_viewmodel(), out)
}

/// Renders a precomputed view model to `out`.
///
/// # Errors
///
/// Propagates write errors from `out`.
pub fn render_viewmodel(vm: &CatalogViewModel, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "── {} ──", vm.header.api_base_url)?;
    if let Some(query) = &vm.header.query {
        writeln!(out, "search: {query}")?;
    }
    writeln!(out, "{}", vm.count_label)?;
    if let Some(error) = &vm.list_error {
        writeln!(out, "! {}", error.text)?;
    }

    for row in &vm.rows {
        let marker = if row.is_selected { '>' } else { ' ' };
        let draft = if row.is_draft { " [draft]" } else { "" };
        writeln!(out, "{marker}{:>3}. {}{draft}  (updated {})", row.number, row.title, row.updated_at)?;
        writeln!(out, "      {}", row.excerpt)?;
    }
    writeln!(out, "{}", vm.load_more.label())?;
    writeln!(out)?;

    match &vm.detail {
        DetailView::Placeholder { loading: true } => writeln!(out, "Loading articles...")?,
        DetailView::Placeholder { loading: false } => writeln!(out, "Select an article from the list.")?,
        DetailView::Article {
            title,
            slug,
            created_at,
            updated_at,
            status,
            paragraphs,
            error,
        } => {
            writeln!(out, "# {title} ({slug})")?;
            writeln!(out, "created {created_at} | updated {updated_at} | {status}")?;
            if let Some(error) = error {
                writeln!(out, "! {}", error.text)?;
            }
            for paragraph in paragraphs {
                writeln!(out)?;
                writeln!(out, "{paragraph}")?;
            }
        }
    }
    out.flush()
}
