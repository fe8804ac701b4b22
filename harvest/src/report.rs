use maud::{html, Markup, DOCTYPE};

use crate::domain::{ColumnFilters, TableView};

/// Standalone HTML page for a table, with the current filter text in each
/// column's search box. `None` renders the "no data" placeholder.
pub fn render_html(view: Option<&TableView>, filters: &ColumnFilters) -> String {
    render_page(view, filters).into_string()
}

fn render_page(view: Option<&TableView>, filters: &ColumnFilters) -> Markup {
    html! {
        (DOCTYPE)
        html lang="fr" {
            head {
                meta charset="utf-8";
                title { "Inventaire" }
            }
            body {
                @match view {
                    Some(view) => { (render_table(view, filters)) }
                    None => { p { "No data available" } }
                }
            }
        }
    }
}

fn render_table(view: &TableView, filters: &ColumnFilters) -> Markup {
    html! {
        h2.table-title { ": " (view.title) }
        div.stats-grid {
            @for (label, value) in view.stats.summary() {
                div { (label) ": " span { (value) } }
            }
        }
        table {
            thead {
                tr {
                    @for (column, header) in view.headers.iter().enumerate() {
                        th {
                            div { (header) }
                            input type="search" placeholder="Search..." class="header-search"
                                data-column=(column) value=(filters.get(column));
                        }
                    }
                }
            }
            tbody {
                @for row in &view.rows {
                    tr {
                        @for cell in row {
                            td { (cell) }
                        }
                    }
                }
            }
        }
    }
}
