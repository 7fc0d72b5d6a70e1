use crate::analyzers::types::{SummaryRow, SummaryTable};
use crate::analyzers::utility::RunningMean;
use crate::record::{KeyColumn, LoadRecord, Measure};
use std::collections::BTreeMap;

/// Groups `records` by the `keys` tuple and averages each of `measures`
/// within every group.
///
/// A record missing any key value joins no group. Missing measure values are
/// skipped, so a group whose values are all missing keeps its row with a
/// `None` cell.
pub fn group_mean(
    name: &'static str,
    records: &[LoadRecord],
    keys: &[KeyColumn],
    measures: &[Measure],
) -> SummaryTable {
    let mut groups: BTreeMap<Vec<&str>, Vec<RunningMean>> = BTreeMap::new();

    for record in records {
        let Some(key) = keys
            .iter()
            .map(|column| record.key(*column))
            .collect::<Option<Vec<&str>>>()
        else {
            continue;
        };

        let means = groups
            .entry(key)
            .or_insert_with(|| vec![RunningMean::default(); measures.len()]);

        for (mean, measure) in means.iter_mut().zip(measures) {
            mean.push(record.value(*measure));
        }
    }

    let rows = groups
        .into_iter()
        .map(|(key, means)| SummaryRow {
            key: key.into_iter().map(str::to_string).collect(),
            values: means.iter().map(RunningMean::value).collect(),
        })
        .collect();

    SummaryTable {
        name,
        key_columns: keys.iter().map(|k| k.name()).collect(),
        value_columns: measures.iter().map(|m| m.name()).collect(),
        rows,
    }
}
