use crate::error::{PhonScoreError, PsResult};
use crate::filter::PatternFilter;
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use strum_macros::{Display, EnumIter, EnumString};
use tracing::debug;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    EnumString,
    Display,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ReportType {
    Ppc,
    Pcc,
    Pvc,
    Custom,
}

impl Default for ReportType {
    fn default() -> Self {
        Self::Ppc
    }
}

impl ReportType {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Ppc => "Percent Phones Correct (PPC)",
            Self::Pcc => "Percent Consonants Correct (PCC)",
            Self::Pvc => "Percent Vowels Correct (PVC)",
            Self::Custom => "Percent Correct (custom)",
        }
    }

    pub fn column_name(&self) -> &'static str {
        match self {
            Self::Ppc => "PPC",
            Self::Pcc => "PCC",
            Self::Pvc => "PVC",
            Self::Custom => "PC",
        }
    }

    /// Fixed pattern for the built-in report types; custom reports bring their own.
    pub fn phonex(&self) -> Option<&'static str> {
        match self {
            Self::Ppc => Some("\\w"),
            Self::Pcc => Some("\\c"),
            Self::Pvc => Some("\\v"),
            Self::Custom => None,
        }
    }
}

#[derive(Args, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreOptions {
    #[arg(long, value_enum, default_value_t = ReportType::Ppc)]
    pub report_type: ReportType,

    /// Phone pattern, required with `--report-type custom`.
    #[arg(long)]
    pub pattern: Option<String>,

    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub ignore_diacritics: bool,
}

impl Default for ScoreOptions {
    fn default() -> Self {
        Self {
            report_type: ReportType::Ppc,
            pattern: None,
            ignore_diacritics: true,
        }
    }
}

/// Options with the filter pattern compiled, ready for scoring.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedOptions {
    pub report_type: ReportType,
    pub filter: PatternFilter,
    pub ignore_diacritics: bool,
}

impl ScoreOptions {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> PsResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Overlays values the user typed on the command line onto `self`.
    pub fn merge_from_cli(&mut self, cli: &ScoreOptions, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident, $arg_name:expr) => {
                if matches.value_source($arg_name) == Some(ValueSource::CommandLine) {
                    self.$field = cli.$field.clone();
                }
            };
        }

        update_if_present!(report_type, "report_type");
        update_if_present!(pattern, "pattern");
        update_if_present!(ignore_diacritics, "ignore_diacritics");
    }

    pub fn resolve(&self) -> PsResult<ResolvedOptions> {
        let pattern = match self.report_type.phonex() {
            Some(fixed) => {
                if let Some(p) = &self.pattern {
                    debug!(
                        "Ignoring pattern '{}' for report type {}",
                        p, self.report_type
                    );
                }
                fixed
            }
            None => self.pattern.as_deref().ok_or_else(|| {
                PhonScoreError::Config("custom report type requires --pattern".to_string())
            })?,
        };

        let filter = PatternFilter::compile(pattern)?;
        debug!(
            "Resolved {} with filter '{}' (ignore diacritics: {})",
            self.report_type, filter, self.ignore_diacritics
        );

        Ok(ResolvedOptions {
            report_type: self.report_type,
            filter,
            ignore_diacritics: self.ignore_diacritics,
        })
    }
}
