use crate::config::{ResolvedOptions, ScoreOptions};
use crate::error::PsResult;
use crate::scorer::loader::{load_groups_from_file, GroupRecord};
use crate::scorer::{ScoreResult, Scorer};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GroupScore {
    pub id: String,
    pub target: String,
    pub actual: String,
    pub alignment: String,
    pub score: ScoreResult,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DatasetReport {
    pub column_name: String,
    pub title: String,
    pub pattern: String,
    pub ignore_diacritics: bool,
    pub rows: Vec<GroupScore>,
    pub total: ScoreResult,
}

impl DatasetReport {
    pub fn percent_correct(&self) -> Option<f64> {
        self.total.percent_correct()
    }
}

/// Service: Score every group in parallel. Output order follows input order.
pub fn score_groups(groups: &[GroupRecord], options: &ResolvedOptions) -> PsResult<Vec<GroupScore>> {
    let scorer = Scorer::new(options.clone());

    groups
        .par_iter()
        .map(|g| -> PsResult<GroupScore> {
            Ok(GroupScore {
                id: g.id.clone(),
                target: g.map.target().to_string(),
                actual: g.map.actual().to_string(),
                alignment: g.map.to_notation(),
                score: scorer.score(g)?,
            })
        })
        .collect()
}

/// Service: Build a report for already-loaded groups.
pub fn build_report(groups: &[GroupRecord], options: &ResolvedOptions) -> PsResult<DatasetReport> {
    let rows = score_groups(groups, options)?;
    let total: ScoreResult = rows.iter().map(|r| &r.score).sum();

    Ok(DatasetReport {
        column_name: options.report_type.column_name().to_string(),
        title: options.report_type.title().to_string(),
        pattern: options.filter.source().to_string(),
        ignore_diacritics: options.ignore_diacritics,
        rows,
        total,
    })
}

/// Service: Load a CSV dataset and score it.
pub fn score_dataset<P: AsRef<Path>>(path: P, options: &ScoreOptions) -> PsResult<DatasetReport> {
    let resolved = options.resolve()?;
    let groups = load_groups_from_file(path)?;
    let report = build_report(&groups, &resolved)?;

    info!(
        "Scored {} groups: {} = {}",
        report.rows.len(),
        report.column_name,
        report
            .percent_correct()
            .map_or_else(|| "n/a".to_string(), |p| format!("{:.2}%", p))
    );

    Ok(report)
}
