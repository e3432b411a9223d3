/// A subset of `{false, true}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoolDomain {
    can_be_false: bool,
    can_be_true: bool,
}

impl Default for BoolDomain {
    fn default() -> Self {
        BoolDomain {
            can_be_false: true,
            can_be_true: true,
        }
    }
}

impl BoolDomain {
    pub fn new(can_be_false: bool, can_be_true: bool) -> Self {
        BoolDomain {
            can_be_false,
            can_be_true,
        }
    }

    pub fn singleton(value: bool) -> Self {
        BoolDomain::new(!value, value)
    }

    pub fn is_empty(&self) -> bool {
        !self.can_be_false && !self.can_be_true
    }

    pub fn is_singleton(&self) -> bool {
        self.can_be_false != self.can_be_true
    }

    pub fn contains(&self, value: bool) -> bool {
        if value {
            self.can_be_true
        } else {
            self.can_be_false
        }
    }

    pub fn members(&self) -> impl Iterator<Item = bool> + '_ {
        [false, true]
            .into_iter()
            .filter(move |value| self.contains(*value))
    }

    /// Keeps only the values for which `keep` holds; returns whether anything was removed.
    pub(crate) fn retain(&mut self, mut keep: impl FnMut(bool) -> bool) -> bool {
        let before = *self;
        self.can_be_false &= keep(false);
        self.can_be_true &= keep(true);
        before != *self
    }

    pub(crate) fn remove(&mut self, value: bool) -> bool {
        self.retain(|member| member != value)
    }
}
