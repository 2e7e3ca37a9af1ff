use std::collections::BTreeSet;

/// Relations a read should eagerly attach.
///
/// Backends load each listed relation for the whole result set in one batch;
/// relations not in the plan stay unloaded on the returned entities.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchPlan {
    relations: BTreeSet<&'static str>,
}

impl FetchPlan {
    /// Plan that loads nothing beyond the base record
    pub fn none() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, relation: &'static str) -> Self {
        self.relations.insert(relation);
        self
    }

    pub fn includes(&self, relation: &str) -> bool {
        self.relations.contains(relation)
    }

    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.relations.len()
    }

    pub fn relations(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.relations.iter().copied()
    }
}

impl FromIterator<&'static str> for FetchPlan {
    fn from_iter<I: IntoIterator<Item = &'static str>>(iter: I) -> Self {
        Self {
            relations: iter.into_iter().collect(),
        }
    }
}
