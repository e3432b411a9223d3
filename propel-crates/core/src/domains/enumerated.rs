use super::EPSILON;

/// A finite set of numbers, kept sorted; members closer than [`EPSILON`] are the same member.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumeratedDomain {
    values: Vec<f64>,
}

impl EnumeratedDomain {
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        let mut values: Vec<f64> = values.into_iter().filter(|value| !value.is_nan()).collect();
        values.sort_by(f64::total_cmp);
        values.dedup_by(|next, previous| *next - *previous <= EPSILON);
        EnumeratedDomain { values }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn is_singleton(&self) -> bool {
        self.values.len() == 1
    }

    pub fn min(&self) -> Option<f64> {
        self.values.first().copied()
    }

    pub fn max(&self) -> Option<f64> {
        self.values.last().copied()
    }

    pub fn contains(&self, value: f64) -> bool {
        let position = self.values.partition_point(|member| *member < value - EPSILON);
        self.values
            .get(position)
            .is_some_and(|member| (member - value).abs() <= EPSILON)
    }

    /// Keeps only the members for which `keep` holds; returns whether anything was removed.
    pub(crate) fn retain(&mut self, keep: impl FnMut(&f64) -> bool) -> bool {
        let before = self.values.len();
        self.values.retain(keep);
        before != self.values.len()
    }

    pub(crate) fn remove(&mut self, value: f64) -> bool {
        self.retain(|member| (member - value).abs() > EPSILON)
    }
}
