use crate::analyzers::aggregate::group_mean;
use crate::analyzers::types::SummaryTable;
use crate::record::{KeyColumn, LoadRecord, Measure};
use serde::Serialize;
use tracing::debug;

/// The seven grouped views of the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryId {
    FundoPorProduto,
    FundoPorBox,
    GranulosPorProdutoBox,
    GranulosPorTonelada,
    EficienciaPorLinha,
    FundoPorTurno,
    MediasPorColetor,
}

/// Grouping key(s) and averaged column(s) of one summary.
pub struct SummaryDef {
    pub id: SummaryId,
    pub name: &'static str,
    pub keys: &'static [KeyColumn],
    pub measures: &'static [Measure],
}

/// All summaries, in display order.
pub static DEFINITIONS: [SummaryDef; 7] = [
    SummaryDef {
        id: SummaryId::FundoPorProduto,
        name: "fundo_produto",
        keys: &[KeyColumn::Produto],
        measures: &[Measure::FundoPerc],
    },
    SummaryDef {
        id: SummaryId::FundoPorBox,
        name: "fundo_box",
        keys: &[KeyColumn::BoxConsumo],
        measures: &[Measure::FundoPerc],
    },
    SummaryDef {
        id: SummaryId::GranulosPorProdutoBox,
        name: "granulos_prod_box",
        keys: &[KeyColumn::Produto, KeyColumn::BoxConsumo],
        measures: &[Measure::Mm2Perc],
    },
    SummaryDef {
        id: SummaryId::GranulosPorTonelada,
        name: "granulos_ton_produto",
        keys: &[KeyColumn::Produto],
        measures: &[Measure::GranulosPorTonelada],
    },
    SummaryDef {
        id: SummaryId::EficienciaPorLinha,
        name: "eficiencia_maquinas",
        keys: &[KeyColumn::Linha],
        measures: &[Measure::Mm2Perc, Measure::FundoPerc],
    },
    SummaryDef {
        id: SummaryId::FundoPorTurno,
        name: "fundo_turno",
        keys: &[KeyColumn::Turno],
        measures: &[Measure::FundoPerc],
    },
    SummaryDef {
        id: SummaryId::MediasPorColetor,
        name: "coletor_stats",
        keys: &[KeyColumn::Linha],
        measures: &[Measure::Mm4_75, Measure::Mm2, Measure::Mm1, Measure::Fundo],
    },
];

impl SummaryId {
    pub const ALL: [SummaryId; 7] = [
        SummaryId::FundoPorProduto,
        SummaryId::FundoPorBox,
        SummaryId::GranulosPorProdutoBox,
        SummaryId::GranulosPorTonelada,
        SummaryId::EficienciaPorLinha,
        SummaryId::FundoPorTurno,
        SummaryId::MediasPorColetor,
    ];

    fn index(self) -> usize {
        match self {
            SummaryId::FundoPorProduto => 0,
            SummaryId::FundoPorBox => 1,
            SummaryId::GranulosPorProdutoBox => 2,
            SummaryId::GranulosPorTonelada => 3,
            SummaryId::EficienciaPorLinha => 4,
            SummaryId::FundoPorTurno => 5,
            SummaryId::MediasPorColetor => 6,
        }
    }

    pub fn definition(self) -> &'static SummaryDef {
        &DEFINITIONS[self.index()]
    }
}

/// The seven summary tables, computed once from the loaded records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summaries {
    tables: Vec<SummaryTable>,
}

impl Summaries {
    pub fn compute(records: &[LoadRecord]) -> Self {
        let tables = DEFINITIONS
            .iter()
            .map(|def| {
                let table = group_mean(def.name, records, def.keys, def.measures);
                debug!(summary = def.name, groups = table.len(), "Summary computed");
                table
            })
            .collect();

        Self { tables }
    }

    pub fn get(&self, id: SummaryId) -> &SummaryTable {
        &self.tables[id.index()]
    }

    /// Tables paired with their ids, in display order.
    pub fn iter(&self) -> impl Iterator<Item = (SummaryId, &SummaryTable)> {
        SummaryId::ALL.into_iter().zip(self.tables.iter())
    }
}
