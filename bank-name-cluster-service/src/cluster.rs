use crate::matcher::compare;
use bank_name_dedup_service::dto::Record;
use rustc_hash::FxHashMap;
use tracing::debug;

/// A cluster of records whose bank names resolved to the same canonical name.
#[derive(Clone, Debug, PartialEq)]
pub struct ClusterGroup {
    /// First-seen name that opened the group. Never changes.
    pub canonical: String,
    /// Members in the order they were assigned.
    pub members: Vec<Record>,
}

/// Where one distinct original bank name ended up.
#[derive(Clone, Debug, PartialEq)]
pub struct NameCorrection {
    pub original: String,
    pub canonical: String,
    /// Index of the group in creation order.
    pub group: usize,
    /// `compare(original, canonical)` as found during the search, 100 for
    /// names that opened their own group.
    pub score: f64,
    /// Input records carrying this exact original name.
    pub record_count: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Placement {
    group: usize,
    member: usize,
}

///
/// Result of one clustering pass: groups in creation order plus the
/// correction map keyed by original name.
///
#[derive(Clone, Debug, PartialEq)]
pub struct ClusterOutcome {
    groups: Vec<ClusterGroup>,
    /// Distinct names in first-seen order
    corrections: Vec<NameCorrection>,
    /// Reverse lookup from original name to its entry in `corrections`
    correction_lookup: FxHashMap<String, usize>,
    /// Reverse lookup from canonical name to its group
    group_lookup: FxHashMap<String, usize>,
    /// Input order of every record, pointing into `groups`
    placements: Vec<Placement>,
}

impl ClusterOutcome {
    pub fn groups(&self) -> &[ClusterGroup] {
        &self.groups
    }

    pub fn group(&self, canonical: &str) -> Option<&ClusterGroup> {
        self.group_lookup.get(canonical).map(|&idx| &self.groups[idx])
    }

    pub fn corrections(&self) -> &[NameCorrection] {
        &self.corrections
    }

    pub fn correction(&self, original: &str) -> Option<&NameCorrection> {
        self.correction_lookup
            .get(original)
            .map(|&idx| &self.corrections[idx])
    }

    pub fn canonical_for(&self, original: &str) -> Option<&str> {
        self.correction(original).map(|c| c.canonical.as_str())
    }

    /// Every clustered record in its original input order.
    pub fn records(&self) -> impl Iterator<Item = &Record> + '_ {
        self.placements
            .iter()
            .map(|p| &self.groups[p.group].members[p.member])
    }

    pub fn record_count(&self) -> usize {
        self.placements.len()
    }
}

///
/// Single-pass greedy clusterer. State is local to one pass; build one with
/// [`GreedyClusterer::new`], feed records in order, then [`GreedyClusterer::finish`].
///
pub struct GreedyClusterer {
    /// Minimum `compare` score (inclusive) for joining an existing group
    threshold: f64,
    outcome: ClusterOutcome,
}

impl GreedyClusterer {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            outcome: ClusterOutcome {
                groups: Vec::new(),
                corrections: Vec::new(),
                correction_lookup: FxHashMap::default(),
                group_lookup: FxHashMap::default(),
                placements: Vec::new(),
            },
        }
    }

    ///
    /// Assigns one record. A name seen before reuses its earlier decision
    /// without searching again; a new name is scored against every group's
    /// canonical name and joins the best one at or above the threshold, the
    /// earliest group winning ties. Otherwise it opens a group of its own.
    ///
    pub fn assign(&mut self, record: Record) {
        if let Some(&idx) = self.outcome.correction_lookup.get(&record.bank_name) {
            let correction = &mut self.outcome.corrections[idx];
            correction.record_count += 1;
            let group = correction.group;
            self.push_member(group, record);
            return;
        }

        let name = record.bank_name.clone();
        let (group, score) = match self.best_group(&name) {
            Some(found) => found,
            None => (self.open_group(name.clone()), 100.0),
        };
        let canonical = self.outcome.groups[group].canonical.clone();
        debug!(original = %name, canonical = %canonical, score, "assigned bank name");
        self.outcome
            .correction_lookup
            .insert(name.clone(), self.outcome.corrections.len());
        self.outcome.corrections.push(NameCorrection {
            original: name,
            canonical,
            group,
            score,
            record_count: 1,
        });
        self.push_member(group, record);
    }

    pub fn finish(self) -> ClusterOutcome {
        self.outcome
    }

    fn best_group(&self, name: &str) -> Option<(usize, f64)> {
        let mut best: Option<(usize, f64)> = None;
        for (idx, group) in self.outcome.groups.iter().enumerate() {
            let score = compare(name, &group.canonical).final_score;
            if score < self.threshold {
                continue;
            }
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((idx, score));
            }
        }
        best
    }

    fn open_group(&mut self, canonical: String) -> usize {
        let idx = self.outcome.groups.len();
        self.outcome.group_lookup.insert(canonical.clone(), idx);
        self.outcome.groups.push(ClusterGroup {
            canonical,
            members: Vec::new(),
        });
        idx
    }

    fn push_member(&mut self, group: usize, record: Record) {
        let members = &mut self.outcome.groups[group].members;
        self.outcome.placements.push(Placement {
            group,
            member: members.len(),
        });
        members.push(record);
    }
}

/// Clusters records by bank name in input order. The input may be streamed.
pub fn cluster<I>(records: I, threshold: f64) -> ClusterOutcome
where
    I: IntoIterator<Item = Record>,
{
    let mut clusterer = GreedyClusterer::new(threshold);
    for record in records {
        clusterer.assign(record);
    }
    clusterer.finish()
}
