pub mod engine;
pub mod loader;
pub mod types;

pub use self::engine::{calc_ppc_aligned, normalize};
pub use self::types::ScoreResult;
use crate::alignment::{AlignmentIndex, PhoneMap};
use crate::config::ResolvedOptions;
use crate::error::PsResult;
use crate::ipa::Phone;

/// One aligned unit of transcription (typically a word group of a record).
///
/// `None` for a side means the group carries no IPA there; it scores as empty.
pub trait AlignedGroup {
    type Alignment: AlignmentIndex<Phone>;

    fn target_phones(&self) -> Option<Vec<&Phone>>;
    fn actual_phones(&self) -> Option<Vec<&Phone>>;
    fn phone_alignment(&self) -> &Self::Alignment;
}

impl AlignedGroup for PhoneMap {
    type Alignment = PhoneMap;

    fn target_phones(&self) -> Option<Vec<&Phone>> {
        Some(PhoneMap::target_phones(self))
    }

    fn actual_phones(&self) -> Option<Vec<&Phone>> {
        Some(PhoneMap::actual_phones(self))
    }

    fn phone_alignment(&self) -> &PhoneMap {
        self
    }
}

/// Scores groups under one resolved option set. Holds no per-call state,
/// so a single instance can be shared across threads.
#[derive(Debug, Clone)]
pub struct Scorer {
    pub options: ResolvedOptions,
}

impl Scorer {
    pub fn new(options: ResolvedOptions) -> Self {
        Self { options }
    }

    pub fn score<G: AlignedGroup>(&self, group: &G) -> PsResult<ScoreResult> {
        calc_ppc_aligned(group, &self.options.filter, self.options.ignore_diacritics)
    }
}
