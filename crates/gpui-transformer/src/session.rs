//! Per-file transformation state.

use indexmap::IndexSet;
use smol_str::SmolStr;

/// State scoped to the transformation of a single file.
///
/// A fresh session is created for every file so synthesized ids restart at
/// zero and the import line only names constructors that file uses.
#[derive(Debug, Default)]
pub struct Session {
    next_id: usize,
    used_tags: IndexSet<SmolStr>,
}

impl Session {
    /// Creates an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next identifier number and advances the counter.
    pub fn next_id(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Records constructors used by a successfully transformed unit.
    pub fn register_tags(&mut self, tags: impl IntoIterator<Item = SmolStr>) {
        self.used_tags.extend(tags);
    }

    /// Returns the constructors used so far, in first-use order.
    pub fn used_tags(&self) -> impl Iterator<Item = &str> {
        self.used_tags.iter().map(SmolStr::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_sequential() {
        let mut session = Session::new();
        assert_eq!(session.next_id(), 0);
        assert_eq!(session.next_id(), 1);
        assert_eq!(session.next_id(), 2);
    }

    #[test]
    fn test_tags_keep_first_use_order() {
        let mut session = Session::new();
        session.register_tags(["div".into(), "img".into()]);
        session.register_tags(["svg".into(), "div".into()]);
        let tags: Vec<_> = session.used_tags().collect();
        assert_eq!(tags, vec!["div", "img", "svg"]);
    }
}
