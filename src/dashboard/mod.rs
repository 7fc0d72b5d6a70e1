//! Tabbed presentation of the summary tables.
//!
//! Each [`Tab`] is bound to exactly one summary, chart kind and title through
//! [`Tab::spec`]. Rendering only reads the precomputed tables; it never
//! aggregates, filters or transforms numbers.

pub mod chart;
pub mod html;
pub mod table;

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::analyzers::summaries::{Summaries, SummaryId};
use chart::{ChartKind, Figure, build_figure};
use table::TableView;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Tab {
    #[default]
    Tab1,
    Tab2,
    Tab3,
    Tab4,
    Tab5,
    Tab6,
    Tab7,
}

/// Static configuration of one tab.
#[derive(Debug)]
pub struct TabSpec {
    pub summary: SummaryId,
    pub label: &'static str,
    pub title: &'static str,
    pub chart: ChartKind,
}

static TAB_SPECS: [TabSpec; 7] = [
    TabSpec {
        summary: SummaryId::FundoPorProduto,
        label: "🌾 % Fundo por Produto",
        title: "% Fundo por Produto",
        chart: ChartKind::Bar { colorscale: "Viridis" },
    },
    TabSpec {
        summary: SummaryId::FundoPorBox,
        label: "🏭 % Fundo por Box",
        title: "% Fundo por Box",
        chart: ChartKind::Bar { colorscale: "Plasma" },
    },
    TabSpec {
        summary: SummaryId::GranulosPorProdutoBox,
        label: "📦 % Grânulos por Produto e Box",
        title: "Grânulos 2mm por Produto e Box",
        chart: ChartKind::BarPerKey { series_prefix: "Box" },
    },
    TabSpec {
        summary: SummaryId::GranulosPorTonelada,
        label: "🧱 Grânulos por Tonelada",
        title: "Grânulos por Tonelada",
        chart: ChartKind::Bar { colorscale: "Cividis" },
    },
    TabSpec {
        summary: SummaryId::EficienciaPorLinha,
        label: "⚙️ Eficiência por Linha",
        title: "Eficiência por Linha",
        chart: ChartKind::Series { colors: &["green", "orange"] },
    },
    TabSpec {
        summary: SummaryId::FundoPorTurno,
        label: "🕒 Fundo por Turno",
        title: "Fundo por Turno",
        chart: ChartKind::Donut { hole: 0.3 },
    },
    TabSpec {
        summary: SummaryId::MediasPorColetor,
        label: "👷 Médias por Coletor",
        title: "Médias por Coletor",
        chart: ChartKind::Series { colors: &[] },
    },
];

impl Tab {
    pub const ALL: [Tab; 7] = [
        Tab::Tab1,
        Tab::Tab2,
        Tab::Tab3,
        Tab::Tab4,
        Tab::Tab5,
        Tab::Tab6,
        Tab::Tab7,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Tab::Tab1 => "tab1",
            Tab::Tab2 => "tab2",
            Tab::Tab3 => "tab3",
            Tab::Tab4 => "tab4",
            Tab::Tab5 => "tab5",
            Tab::Tab6 => "tab6",
            Tab::Tab7 => "tab7",
        }
    }

    pub fn spec(self) -> &'static TabSpec {
        let idx = match self {
            Tab::Tab1 => 0,
            Tab::Tab2 => 1,
            Tab::Tab3 => 2,
            Tab::Tab4 => 3,
            Tab::Tab5 => 4,
            Tab::Tab6 => 5,
            Tab::Tab7 => 6,
        };
        &TAB_SPECS[idx]
    }

    pub fn label(self) -> &'static str {
        self.spec().label
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown tab '{0}'")]
pub struct UnknownTab(pub String);

impl FromStr for Tab {
    type Err = UnknownTab;

    /// Accepts `tab1`..`tab7` or the bare digit.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let digit = s.strip_prefix("tab").unwrap_or(s);
        Tab::ALL
            .into_iter()
            .find(|tab| &tab.id()[3..] == digit)
            .ok_or_else(|| UnknownTab(s.to_string()))
    }
}

impl Serialize for Tab {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.id())
    }
}

/// Chart and table for one tab, built from its summary only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TabView {
    pub tab: Tab,
    pub label: &'static str,
    pub chart: Figure,
    pub table: TableView,
}

/// Renders the view for a tab-selection event.
pub fn render(tab: Tab, summaries: &Summaries) -> TabView {
    let spec = tab.spec();
    let table = summaries.get(spec.summary);

    TabView {
        tab,
        label: spec.label,
        chart: build_figure(spec.chart, spec.title, table),
        table: TableView::from_summary(table),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::LoadRecord;

    fn summaries() -> Summaries {
        let records = vec![
            LoadRecord {
                produto: Some("A".into()),
                box_consumo: Some("B1".into()),
                linha: Some("L1".into()),
                turno: Some("T1".into()),
                fundo_perc: Some(10.0),
                mm_2_perc: Some(60.0),
                ..Default::default()
            },
            LoadRecord {
                produto: Some("B".into()),
                box_consumo: Some("B2".into()),
                linha: Some("L2".into()),
                turno: Some("T2".into()),
                fundo_perc: Some(5.0),
                mm_2_perc: Some(70.0),
                ..Default::default()
            },
        ];
        Summaries::compute(&records)
    }

    #[test]
    fn test_tab_ids_round_trip() {
        for tab in Tab::ALL {
            assert_eq!(tab.id().parse::<Tab>(), Ok(tab));
        }
    }

    #[test]
    fn test_tab_from_bare_digit() {
        assert_eq!("3".parse::<Tab>(), Ok(Tab::Tab3));
        assert_eq!(" tab7 ".parse::<Tab>(), Ok(Tab::Tab7));
    }

    #[test]
    fn test_unknown_tab() {
        assert_eq!("tab8".parse::<Tab>(), Err(UnknownTab("tab8".into())));
        assert!("".parse::<Tab>().is_err());
        assert!("tab".parse::<Tab>().is_err());
    }

    #[test]
    fn test_every_tab_has_distinct_summary() {
        let mut seen: Vec<SummaryId> = Tab::ALL.iter().map(|t| t.spec().summary).collect();
        seen.dedup();
        assert_eq!(seen, SummaryId::ALL.to_vec());
    }

    #[test]
    fn test_render_tab1_reads_table_one() {
        let view = render(Tab::Tab1, &summaries());

        assert_eq!(view.tab, Tab::Tab1);
        assert_eq!(view.table.columns, vec!["produto", "fundo_perc"]);
        assert_eq!(view.table.rows.len(), 2);
        assert_eq!(view.chart.layout.title.text, "% Fundo por Produto");
    }

    #[test]
    fn test_render_tab6_is_donut() {
        let view = render(Tab::Tab6, &summaries());
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["tab"], "tab6");
        assert_eq!(json["chart"]["data"][0]["type"], "pie");
        assert_eq!(json["table"]["columns"][0], "turno");
    }

    #[test]
    fn test_render_tab5_two_series() {
        let view = render(Tab::Tab5, &summaries());
        assert_eq!(view.chart.data.len(), 2);
        assert_eq!(view.chart.layout.barmode, Some("group"));
    }

    #[test]
    fn test_render_tab7_four_series() {
        let view = render(Tab::Tab7, &summaries());
        assert_eq!(view.chart.data.len(), 4);
        assert_eq!(view.table.columns, vec!["linha", "mm_4_75", "mm_2", "mm_1", "fundo"]);
    }
}
