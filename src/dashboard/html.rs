//! HTML rendering of the dashboard page.
//!
//! The page is server-rendered: the tab bar links back to `/?tab=<id>` and
//! only the selected tab's table and chart are emitted. Charts are drawn by
//! plotly.js from the embedded figure JSON.

use super::table::TableView;
use super::{Tab, TabView};

const PLOTLY_JS: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Renders the full dashboard page with `view` as the selected tab.
pub fn render_page(title: &str, view: &TabView) -> serde_json::Result<String> {
    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{css}</style>
    <script src="{plotly}"></script>
</head>
<body>
    <header><h1>{title}</h1></header>
    {tabs}
    <main id="conteudo-tabs">
        {content}
    </main>
</body>
</html>"#,
        title = escape(title),
        css = inline_css(),
        plotly = PLOTLY_JS,
        tabs = render_tab_bar(view.tab),
        content = render_tab_content(view)?,
    ))
}

/// Renders the table and chart of one tab, side by side.
pub fn render_tab_content(view: &TabView) -> serde_json::Result<String> {
    Ok(format!(
        r#"<div class="tab-content">
        <div class="tab-table">{table}</div>
        <div class="tab-chart">{chart}</div>
    </div>"#,
        table = render_table(&view.table),
        chart = render_chart(view)?,
    ))
}

fn render_tab_bar(active: Tab) -> String {
    let links: String = Tab::ALL
        .iter()
        .map(|tab| {
            let class = if *tab == active { "tab active" } else { "tab" };
            format!(
                r#"<a class="{class}" href="/?tab={id}">{label}</a>"#,
                id = tab.id(),
                label = escape(tab.label()),
            )
        })
        .collect();

    format!(r#"<nav id="tabs-menu">{links}</nav>"#)
}

fn render_table(table: &TableView) -> String {
    let header: String = table
        .columns
        .iter()
        .map(|c| format!("<th>{}</th>", escape(c)))
        .collect();

    let body: String = if table.rows.is_empty() {
        format!(
            r#"<tr><td colspan="{}" class="empty">Sem dados</td></tr>"#,
            table.columns.len()
        )
    } else {
        table
            .rows
            .iter()
            .map(|row| {
                let cells: String = row
                    .iter()
                    .map(|cell| format!("<td>{}</td>", escape(&cell.display())))
                    .collect();
                format!("<tr>{cells}</tr>")
            })
            .collect()
    };

    format!("<table><thead><tr>{header}</tr></thead><tbody>{body}</tbody></table>")
}

fn render_chart(view: &TabView) -> serde_json::Result<String> {
    // "</" would end the script element early
    let figure = serde_json::to_string(&view.chart)?.replace("</", "<\\/");
    let id = format!("chart-{}", view.tab.id());

    Ok(format!(
        r#"<div id="{id}" class="chart"></div>
        <script>
            (function () {{
                var figure = {figure};
                Plotly.newPlot("{id}", figure.data, figure.layout, {{responsive: true}});
            }})();
        </script>"#
    ))
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn inline_css() -> &'static str {
    r#"
body { font-family: sans-serif; margin: 0; color: #2c3e50; }
header { display: flex; align-items: center; justify-content: center; margin-bottom: 10px; }
header h1 { margin: 0; padding-top: 20px; }
#tabs-menu { position: sticky; top: 0; z-index: 1000; display: flex; background-color: #dfe6e9; box-shadow: 0px 2px 5px gray; }
#tabs-menu .tab { flex: 1; padding: 12px; text-align: center; text-decoration: none; color: #2c3e50; border-bottom: 3px solid transparent; }
#tabs-menu .tab.active { background-color: #ffffff; border-bottom-color: #3498db; font-weight: bold; }
#conteudo-tabs { max-height: 600px; overflow-y: auto; padding: 10px; }
.tab-content { display: flex; flex-direction: row; justify-content: space-around; }
.tab-table { width: 45%; overflow-x: auto; }
.tab-chart { width: 50%; }
table { border-collapse: collapse; width: 100%; }
th, td { border: 1px solid #dfe6e9; padding: 6px 10px; text-align: left; }
th { background-color: #f5f6fa; }
td.empty { text-align: center; color: #7f8c8d; }
"#
}
