use super::CrimeType;

/// Store-wide counters behind the statistics overview
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrimeSummary {
    pub total: i64,
    pub open: i64,
    pub under_investigation: i64,
    pub closed: i64,
    /// Unordered; only types with at least one case appear
    pub by_type: Vec<(CrimeType, i64)>,
}

impl CrimeSummary {
    /// `by_type` ordered by count descending, ties by type name
    pub fn ranked_types(&self) -> Vec<(CrimeType, i64)> {
        let mut ranked = self.by_type.clone();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.as_str().cmp(b.0.as_str())));
        ranked
    }
}
