//! Load-event records and the column vocabulary shared by the loader,
//! the aggregator and the dashboard.

use serde::Serialize;

/// Categorical columns used as grouping keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyColumn {
    Produto,
    BoxConsumo,
    Linha,
    Turno,
}

impl KeyColumn {
    pub const ALL: [KeyColumn; 4] = [
        KeyColumn::Produto,
        KeyColumn::BoxConsumo,
        KeyColumn::Linha,
        KeyColumn::Turno,
    ];

    /// Header name of the column in the input file.
    pub fn name(self) -> &'static str {
        match self {
            KeyColumn::Produto => "produto",
            KeyColumn::BoxConsumo => "box_consumo",
            KeyColumn::Linha => "linha",
            KeyColumn::Turno => "turno",
        }
    }
}

/// Numeric columns, including the derived granules-per-ton ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Measure {
    Mm4_75,
    Mm2,
    Mm1,
    Fundo,
    PesoMassa,
    Mm4_75Perc,
    Mm2Perc,
    Mm1Perc,
    FundoPerc,
    Ton,
    GranulosPorTonelada,
}

impl Measure {
    /// Columns read from the input file. The derived ratio is not among them.
    pub const PARSED: [Measure; 10] = [
        Measure::Mm4_75,
        Measure::Mm2,
        Measure::Mm1,
        Measure::Fundo,
        Measure::PesoMassa,
        Measure::Mm4_75Perc,
        Measure::Mm2Perc,
        Measure::Mm1Perc,
        Measure::FundoPerc,
        Measure::Ton,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Measure::Mm4_75 => "mm_4_75",
            Measure::Mm2 => "mm_2",
            Measure::Mm1 => "mm_1",
            Measure::Fundo => "fundo",
            Measure::PesoMassa => "peso_massa",
            Measure::Mm4_75Perc => "mm_4_75_perc",
            Measure::Mm2Perc => "mm_2_perc",
            Measure::Mm1Perc => "mm_1_perc",
            Measure::FundoPerc => "fundo_perc",
            Measure::Ton => "ton",
            Measure::GranulosPorTonelada => "granulos_por_tonelada",
        }
    }
}

/// One row of the measurement file.
///
/// Every optional field is `None` when the cell was empty or could not be
/// coerced. A missing value never stops the rest of the record from being
/// used.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoadRecord {
    pub produto: Option<String>,
    pub box_consumo: Option<String>,
    pub linha: Option<String>,
    pub turno: Option<String>,

    // sieve fractions (mass)
    pub mm_4_75: Option<f64>,
    pub mm_2: Option<f64>,
    pub mm_1: Option<f64>,
    pub fundo: Option<f64>,
    pub peso_massa: Option<f64>,

    // sieve fractions (percent)
    pub mm_4_75_perc: Option<f64>,
    pub mm_2_perc: Option<f64>,
    pub mm_1_perc: Option<f64>,
    pub fundo_perc: Option<f64>,

    pub ton: Option<f64>,

    // derived
    pub granulos_por_tonelada: Option<f64>,
}

impl LoadRecord {
    pub fn key(&self, column: KeyColumn) -> Option<&str> {
        let value = match column {
            KeyColumn::Produto => &self.produto,
            KeyColumn::BoxConsumo => &self.box_consumo,
            KeyColumn::Linha => &self.linha,
            KeyColumn::Turno => &self.turno,
        };
        value.as_deref()
    }

    pub fn value(&self, measure: Measure) -> Option<f64> {
        match measure {
            Measure::Mm4_75 => self.mm_4_75,
            Measure::Mm2 => self.mm_2,
            Measure::Mm1 => self.mm_1,
            Measure::Fundo => self.fundo,
            Measure::PesoMassa => self.peso_massa,
            Measure::Mm4_75Perc => self.mm_4_75_perc,
            Measure::Mm2Perc => self.mm_2_perc,
            Measure::Mm1Perc => self.mm_1_perc,
            Measure::FundoPerc => self.fundo_perc,
            Measure::Ton => self.ton,
            Measure::GranulosPorTonelada => self.granulos_por_tonelada,
        }
    }

    pub(crate) fn set_key(&mut self, column: KeyColumn, value: Option<String>) {
        match column {
            KeyColumn::Produto => self.produto = value,
            KeyColumn::BoxConsumo => self.box_consumo = value,
            KeyColumn::Linha => self.linha = value,
            KeyColumn::Turno => self.turno = value,
        }
    }

    pub(crate) fn set_value(&mut self, measure: Measure, value: Option<f64>) {
        match measure {
            Measure::Mm4_75 => self.mm_4_75 = value,
            Measure::Mm2 => self.mm_2 = value,
            Measure::Mm1 => self.mm_1 = value,
            Measure::Fundo => self.fundo = value,
            Measure::PesoMassa => self.peso_massa = value,
            Measure::Mm4_75Perc => self.mm_4_75_perc = value,
            Measure::Mm2Perc => self.mm_2_perc = value,
            Measure::Mm1Perc => self.mm_1_perc = value,
            Measure::FundoPerc => self.fundo_perc = value,
            Measure::Ton => self.ton = value,
            Measure::GranulosPorTonelada => self.granulos_por_tonelada = value,
        }
    }

    /// Recomputes `granulos_por_tonelada` from `mm_2` and `ton`.
    pub fn derive(mut self) -> Self {
        self.granulos_por_tonelada = granulos_por_tonelada(self.mm_2, self.ton);
        self
    }
}

/// Granules (2 mm fraction) per metric ton: `mm_2 / (ton / 1000)`.
///
/// Missing when either input is missing, when `ton` is zero, or when the
/// ratio is not finite.
pub fn granulos_por_tonelada(mm_2: Option<f64>, ton: Option<f64>) -> Option<f64> {
    let (mm_2, ton) = (mm_2?, ton?);
    if ton == 0.0 {
        return None;
    }
    Some(mm_2 / (ton / 1000.0)).filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_granulos_por_tonelada_normal() {
        assert_eq!(granulos_por_tonelada(Some(50.0), Some(2000.0)), Some(25.0));
    }

    #[test]
    fn test_granulos_por_tonelada_zero_ton_is_missing() {
        assert_eq!(granulos_por_tonelada(Some(50.0), Some(0.0)), None);
        assert_eq!(granulos_por_tonelada(Some(0.0), Some(0.0)), None);
        assert_eq!(granulos_por_tonelada(Some(50.0), Some(-0.0)), None);
    }

    #[test]
    fn test_granulos_por_tonelada_missing_inputs() {
        assert_eq!(granulos_por_tonelada(None, Some(1000.0)), None);
        assert_eq!(granulos_por_tonelada(Some(50.0), None), None);
    }

    #[test]
    fn test_granulos_por_tonelada_overflow_is_missing() {
        assert_eq!(granulos_por_tonelada(Some(f64::MAX), Some(1e-300)), None);
    }

    #[test]
    fn test_derive_sets_ratio() {
        let record = LoadRecord {
            mm_2: Some(30.0),
            ton: Some(1500.0),
            ..Default::default()
        }
        .derive();

        assert_eq!(record.value(Measure::GranulosPorTonelada), Some(20.0));
    }

    #[test]
    fn test_set_and_read_columns() {
        let mut record = LoadRecord::default();
        for (i, measure) in Measure::PARSED.iter().enumerate() {
            record.set_value(*measure, Some(i as f64));
        }
        for column in KeyColumn::ALL {
            record.set_key(column, Some(column.name().to_uppercase()));
        }

        for (i, measure) in Measure::PARSED.iter().enumerate() {
            assert_eq!(record.value(*measure), Some(i as f64));
        }
        assert_eq!(record.key(KeyColumn::BoxConsumo), Some("BOX_CONSUMO"));
        assert_eq!(record.key(KeyColumn::Turno), Some("TURNO"));
    }
}
