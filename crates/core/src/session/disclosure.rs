use crate::domain::report::SectionId;
use std::collections::BTreeSet;

/// Which report sections are currently expanded.
///
/// Independent of report content. Resets to the default (summary only) when
/// a new report arrives; the session owns that reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisclosureSet {
    expanded: BTreeSet<SectionId>,
}

impl Default for DisclosureSet {
    fn default() -> Self {
        Self {
            expanded: BTreeSet::from([SectionId::Summary]),
        }
    }
}

impl DisclosureSet {
    pub fn expanded_all() -> Self {
        Self {
            expanded: SectionId::ALL.into_iter().collect(),
        }
    }

    pub fn is_expanded(&self, section: SectionId) -> bool {
        self.expanded.contains(&section)
    }

    /// Flip membership. Toggling twice restores the original state.
    pub fn toggle(&mut self, section: SectionId) {
        if !self.expanded.remove(&section) {
            self.expanded.insert(section);
        }
    }

    pub fn expand(&mut self, section: SectionId) {
        self.expanded.insert(section);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
