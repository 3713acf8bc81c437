use serde::Serialize;

/// Outcome of a single round. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundRecord<S, A> {
    /// 1-based round number.
    pub round: u32,
    pub state: S,
    pub signal: String,
    pub action: A,
    pub is_correct: bool,
}

/// Ordered trace of one simulation, round 1 first.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct History<S, A> {
    records: Vec<RoundRecord<S, A>>,
}

impl<S, A> History<S, A> {
    pub(crate) fn push(&mut self, record: RoundRecord<S, A>) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[RoundRecord<S, A>] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RoundRecord<S, A>> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn correct_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_correct).count()
    }
}

impl<S, A> Default for History<S, A> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<'a, S, A> IntoIterator for &'a History<S, A> {
    type Item = &'a RoundRecord<S, A>;
    type IntoIter = std::slice::Iter<'a, RoundRecord<S, A>>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl<S, A> FromIterator<RoundRecord<S, A>> for History<S, A> {
    fn from_iter<I: IntoIterator<Item = RoundRecord<S, A>>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}
