use super::AlignedGroup;
use crate::alignment::PhoneMap;
use crate::error::{PhonScoreError, PsResult};
use crate::ipa::{Phone, Transcript};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

/// One dataset row: an identified, aligned target/actual pair.
#[derive(Debug, Clone)]
pub struct GroupRecord {
    pub id: String,
    pub map: PhoneMap,
    pub has_target: bool,
    pub has_actual: bool,
}

impl GroupRecord {
    pub fn new(id: impl Into<String>, map: PhoneMap) -> Self {
        let has_target = !map.target().is_empty();
        let has_actual = !map.actual().is_empty();
        Self {
            id: id.into(),
            map,
            has_target,
            has_actual,
        }
    }

    /// Builds a record from IPA text and optional alignment notation. A blank
    /// alignment means phone `i` aligns with phone `i`, which is only accepted
    /// when the sides have equal length or one side is blank.
    pub fn parse(id: &str, target: &str, actual: &str, alignment: &str) -> PsResult<Self> {
        let target_t = Transcript::parse(target.trim())?;
        let actual_t = Transcript::parse(actual.trim())?;

        let map = if alignment.trim().is_empty() {
            let (n_top, n_bottom) = (target_t.phone_count(), actual_t.phone_count());
            if n_top != n_bottom && n_top > 0 && n_bottom > 0 {
                return Err(PhonScoreError::Alignment(format!(
                    "alignment required when phone counts differ ({} vs {})",
                    n_top, n_bottom
                )));
            }
            PhoneMap::identity(target_t, actual_t)?
        } else {
            PhoneMap::from_notation(target_t, actual_t, alignment)?
        };

        Ok(Self::new(id, map))
    }
}

impl AlignedGroup for GroupRecord {
    type Alignment = PhoneMap;

    fn target_phones(&self) -> Option<Vec<&Phone>> {
        self.has_target.then(|| self.map.target_phones())
    }

    fn actual_phones(&self) -> Option<Vec<&Phone>> {
        self.has_actual.then(|| self.map.actual_phones())
    }

    fn phone_alignment(&self) -> &PhoneMap {
        &self.map
    }
}

/// Reads `id,target,actual[,alignment]` rows (header required).
pub fn load_groups<R: Read>(reader: R) -> PsResult<Vec<GroupRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .trim(csv::Trim::Fields)
        .from_reader(reader);

    let mut groups = Vec::new();
    let mut skipped_count = 0;

    for (row_idx, result) in rdr.records().enumerate() {
        let rec = result?;
        if rec.len() < 3 {
            warn!("Row {}: expected at least 3 fields, skipping", row_idx + 1);
            skipped_count += 1;
            continue;
        }

        let id = if rec[0].is_empty() {
            format!("row{}", row_idx + 1)
        } else {
            rec[0].to_string()
        };
        let alignment = rec.get(3).unwrap_or("");

        let group = GroupRecord::parse(&id, &rec[1], &rec[2], alignment)
            .map_err(|e| PhonScoreError::Validation(format!("row '{}': {}", id, e)))?;
        groups.push(group);
    }

    if skipped_count > 0 {
        warn!("Skipped {} short rows.", skipped_count);
    }
    debug!("Loaded {} aligned groups", groups.len());

    Ok(groups)
}

pub fn load_groups_from_file<P: AsRef<Path>>(path: P) -> PsResult<Vec<GroupRecord>> {
    let path = path.as_ref();
    info!("Loading dataset from: {}", path.display());
    let file = File::open(path)?;
    load_groups(file)
}
