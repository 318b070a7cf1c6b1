use crate::core::change::ChangeItem;

/// The deepest directories a set of change items materializes, split by how
/// the directory came to exist.
///
/// A single logical "create a tag" operation arrives as several individual
/// additions (intermediate directories first, then the copy target), so
/// shape validation looks only at the deepest point reached on each side.
/// `deepest_created` tracks items with no copy source (freshly created
/// intermediate directories, or the containing directory of fresh files);
/// `deepest_copied` tracks items that were copied from an existing path.
/// "Deepest" is the longest path string.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CreationAggregate {
    pub deepest_created: Option<String>,
    pub deepest_copied: Option<String>,
}

impl CreationAggregate {
    /// Folds change items into the two accumulators. The result depends
    /// only on the multiset of items, not on their order.
    pub fn fold<'a, I>(items: I) -> Self
    where
        I: IntoIterator<Item = &'a ChangeItem>,
    {
        items
            .into_iter()
            .fold(Self::default(), |acc, item| acc.observe(item))
    }

    fn observe(mut self, item: &ChangeItem) -> Self {
        let Some(directory) = item.materialized_directory() else {
            return self;
        };
        let slot = if item.copy_from_path.is_some() {
            &mut self.deepest_copied
        } else {
            &mut self.deepest_created
        };
        let is_deeper = slot.as_deref().is_none_or(|d| d.len() < directory.len());
        if is_deeper {
            *slot = Some(directory.to_string());
        }
        self
    }
}
