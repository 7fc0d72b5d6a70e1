//! Plotly-compatible figure descriptions.
//!
//! The dashboard page hands these to plotly.js as-is, so field names follow
//! the plotly figure schema.

use serde::Serialize;

use crate::analyzers::types::SummaryTable;

/// Colours cycled through when a chart has one series per key value.
pub const PALETTE: [&str; 8] = [
    "#e74c3c", "#3498db", "#f1c40f", "#2ecc71", "#9b59b6", "#e67e22", "#1abc9c", "#e84393",
];

const TRANSPARENT: &str = "rgba(0,0,0,0)";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Bar {
        x: Vec<String>,
        y: Vec<Option<f64>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        marker: Option<Marker>,
    },
    Pie {
        labels: Vec<String>,
        values: Vec<Option<f64>>,
        hole: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub color: MarkerColor,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colorscale: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MarkerColor {
    Solid(String),
    /// One value per bar, mapped through the marker's colorscale.
    Scale(Vec<Option<f64>>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub title: Title,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barmode: Option<&'static str>,
    pub plot_bgcolor: &'static str,
    pub paper_bgcolor: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
}

/// How a summary table is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChartKind {
    /// One bar per group, coloured by value through a named colorscale.
    Bar { colorscale: &'static str },
    /// Grouped bars: the second key picks the series, the first key the
    /// x position. Series follow first appearance of the second key.
    BarPerKey { series_prefix: &'static str },
    /// Grouped bars with one series per value column.
    Series { colors: &'static [&'static str] },
    /// Donut chart of the first value column.
    Donut { hole: f64 },
}

impl ChartKind {
    fn is_grouped(self) -> bool {
        matches!(self, ChartKind::BarPerKey { .. } | ChartKind::Series { .. })
    }
}

/// Builds the figure for `table`.
pub fn build_figure(kind: ChartKind, title: &str, table: &SummaryTable) -> Figure {
    let data = match kind {
        ChartKind::Bar { colorscale } => {
            let y = first_values(table);
            vec![Trace::Bar {
                x: first_keys(table),
                marker: Some(Marker {
                    color: MarkerColor::Scale(y.clone()),
                    colorscale: Some(colorscale),
                }),
                y,
                name: None,
            }]
        }
        ChartKind::BarPerKey { series_prefix } => per_key_traces(table, series_prefix),
        ChartKind::Series { colors } => table
            .value_columns
            .iter()
            .enumerate()
            .map(|(idx, column)| Trace::Bar {
                x: first_keys(table),
                y: table.column(column).unwrap_or_default(),
                name: Some(column.to_string()),
                marker: colors.get(idx).map(|c| Marker {
                    color: MarkerColor::Solid(c.to_string()),
                    colorscale: None,
                }),
            })
            .collect(),
        ChartKind::Donut { hole } => vec![Trace::Pie {
            labels: first_keys(table),
            values: first_values(table),
            hole,
        }],
    };

    Figure {
        data,
        layout: Layout {
            title: Title {
                text: title.to_string(),
            },
            barmode: kind.is_grouped().then_some("group"),
            plot_bgcolor: TRANSPARENT,
            paper_bgcolor: TRANSPARENT,
        },
    }
}

fn first_keys(table: &SummaryTable) -> Vec<String> {
    table.rows.iter().map(|row| row.key[0].clone()).collect()
}

fn first_values(table: &SummaryTable) -> Vec<Option<f64>> {
    table
        .value_columns
        .first()
        .and_then(|column| table.column(column))
        .unwrap_or_default()
}

fn per_key_traces(table: &SummaryTable, series_prefix: &str) -> Vec<Trace> {
    // rows without a second key have no series to join
    let mut series: Vec<&str> = Vec::new();
    for value in table.rows.iter().filter_map(|row| row.key.get(1)) {
        if !series.contains(&value.as_str()) {
            series.push(value);
        }
    }

    series
        .iter()
        .enumerate()
        .map(|(idx, value)| {
            let rows: Vec<_> = table
                .rows
                .iter()
                .filter(|row| row.key.get(1).is_some_and(|key| key == value))
                .collect();
            Trace::Bar {
                x: rows.iter().map(|row| row.key[0].clone()).collect(),
                y: rows.iter().map(|row| row.values[0]).collect(),
                name: Some(format!("{series_prefix} {value}")),
                marker: Some(Marker {
                    color: MarkerColor::Solid(PALETTE[idx % PALETTE.len()].to_string()),
                    colorscale: None,
                }),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::types::SummaryRow;

    fn table(keys: &[&'static str], values: &[&'static str], rows: Vec<(Vec<&str>, Vec<Option<f64>>)>) -> SummaryTable {
        SummaryTable {
            name: "t",
            key_columns: keys.to_vec(),
            value_columns: values.to_vec(),
            rows: rows
                .into_iter()
                .map(|(key, values)| SummaryRow {
                    key: key.into_iter().map(String::from).collect(),
                    values,
                })
                .collect(),
        }
    }

    #[test]
    fn test_bar_uses_colorscale() {
        let t = table(
            &["produto"],
            &["fundo_perc"],
            vec![(vec!["A"], vec![Some(15.0)]), (vec!["B"], vec![None])],
        );

        let fig = build_figure(ChartKind::Bar { colorscale: "Viridis" }, "% Fundo", &t);

        assert_eq!(fig.data.len(), 1);
        assert_eq!(fig.layout.barmode, None);
        match &fig.data[0] {
            Trace::Bar { x, y, marker, .. } => {
                assert_eq!(x, &vec!["A".to_string(), "B".to_string()]);
                assert_eq!(y, &vec![Some(15.0), None]);
                assert_eq!(marker.as_ref().unwrap().colorscale, Some("Viridis"));
            }
            other => panic!("unexpected trace: {other:?}"),
        }
    }

    #[test]
    fn test_bar_per_key_series_in_first_seen_order() {
        let t = table(
            &["produto", "box_consumo"],
            &["mm_2_perc"],
            vec![
                (vec!["A", "B2"], vec![Some(1.0)]),
                (vec!["A", "B1"], vec![Some(2.0)]),
                (vec!["B", "B2"], vec![Some(3.0)]),
            ],
        );

        let fig = build_figure(ChartKind::BarPerKey { series_prefix: "Box" }, "g", &t);

        assert_eq!(fig.layout.barmode, Some("group"));
        let names: Vec<_> = fig
            .data
            .iter()
            .map(|trace| match trace {
                Trace::Bar { name, .. } => name.clone().unwrap(),
                Trace::Pie { .. } => unreachable!(),
            })
            .collect();
        assert_eq!(names, vec!["Box B2", "Box B1"]);

        match &fig.data[0] {
            Trace::Bar { x, y, marker, .. } => {
                assert_eq!(x, &vec!["A".to_string(), "B".to_string()]);
                assert_eq!(y, &vec![Some(1.0), Some(3.0)]);
                assert_eq!(
                    marker.as_ref().unwrap().color,
                    MarkerColor::Solid(PALETTE[0].to_string())
                );
            }
            other => panic!("unexpected trace: {other:?}"),
        }
    }

    #[test]
    fn test_bar_per_key_on_single_key_table_has_no_series() {
        let t = table(
            &["produto"],
            &["mm_2_perc"],
            vec![(vec!["A"], vec![Some(1.0)]), (vec!["B"], vec![Some(2.0)])],
        );

        let fig = build_figure(ChartKind::BarPerKey { series_prefix: "Box" }, "g", &t);

        assert!(fig.data.is_empty());
        assert_eq!(fig.layout.barmode, Some("group"));
    }

    #[test]
    fn test_series_one_trace_per_column() {
        let t = table(
            &["linha"],
            &["mm_2_perc", "fundo_perc"],
            vec![(vec!["L1"], vec![Some(60.0), Some(3.0)])],
        );

        let fig = build_figure(ChartKind::Series { colors: &["green"] }, "e", &t);

        assert_eq!(fig.data.len(), 2);
        match (&fig.data[0], &fig.data[1]) {
            (Trace::Bar { name: n0, marker: m0, .. }, Trace::Bar { name: n1, marker: m1, y, .. }) => {
                assert_eq!(n0.as_deref(), Some("mm_2_perc"));
                assert_eq!(n1.as_deref(), Some("fundo_perc"));
                assert!(m0.is_some());
                assert!(m1.is_none());
                assert_eq!(y, &vec![Some(3.0)]);
            }
            other => panic!("unexpected traces: {other:?}"),
        }
    }

    #[test]
    fn test_donut_serializes_as_pie() {
        let t = table(&["turno"], &["fundo_perc"], vec![(vec!["T1"], vec![Some(4.0)])]);

        let fig = build_figure(ChartKind::Donut { hole: 0.3 }, "Fundo por Turno", &t);
        let json = serde_json::to_value(&fig).unwrap();

        assert_eq!(json["data"][0]["type"], "pie");
        assert_eq!(json["data"][0]["labels"][0], "T1");
        assert_eq!(json["data"][0]["hole"], 0.3);
        assert_eq!(json["layout"]["title"]["text"], "Fundo por Turno");
        assert!(json["layout"].get("barmode").is_none());
    }

    #[test]
    fn test_missing_value_serializes_as_null() {
        let t = table(&["produto"], &["granulos_por_tonelada"], vec![(vec!["Z"], vec![None])]);

        let fig = build_figure(ChartKind::Bar { colorscale: "Cividis" }, "g", &t);
        let json = serde_json::to_value(&fig).unwrap();

        assert!(json["data"][0]["y"][0].is_null());
        assert_eq!(json["data"][0]["type"], "bar");
    }
}
