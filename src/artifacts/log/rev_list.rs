use crate::areas::database::Database;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Result;
use std::collections::{HashSet, VecDeque};

/// Lazy walk over the ancestry of a set of commits
///
/// Every reachable commit is yielded once, before its parent is loaded.
/// A parent is explored right after its child, so each lineage is followed
/// down to its root before the next starting point is visited. Iteration
/// stops after the first error.
pub struct RevList<'r> {
    database: &'r Database,
    frontier: VecDeque<ObjectId>,
    visited: HashSet<ObjectId>,
    /// Last yielded commit, whose parent has not been queued yet
    pending: Option<ObjectId>,
    failed: bool,
}

impl<'r> RevList<'r> {
    /// Start from the given commits; absent starting points are skipped
    pub fn new(
        database: &'r Database,
        start_oids: impl IntoIterator<Item = Option<ObjectId>>,
    ) -> Self {
        RevList {
            database,
            frontier: start_oids.into_iter().flatten().collect(),
            visited: HashSet::new(),
            pending: None,
            failed: false,
        }
    }

    fn expand_pending(&mut self) -> Result<()> {
        if let Some(oid) = self.pending.take() {
            let commit = self.database.parse_object_as_commit(&oid)?;

            if let Some(parent) = commit.parent() {
                self.frontier.push_front(parent.clone());
            }
        }

        Ok(())
    }
}

impl Iterator for RevList<'_> {
    type Item = Result<ObjectId>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        if let Err(e) = self.expand_pending() {
            self.failed = true;
            return Some(Err(e));
        }

        while let Some(oid) = self.frontier.pop_front() {
            if self.visited.insert(oid.clone()) {
                self.pending = Some(oid.clone());
                return Some(Ok(oid));
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::objects::commit::Commit;
    use crate::artifacts::objects::object_type::ObjectType;
    use crate::errors::Error;
    use assert_fs::TempDir;
    use bytes::Bytes;
    use pretty_assertions::assert_eq;

    fn database(dir: &TempDir) -> Database {
        let objects = dir.path().join("objects");
        std::fs::create_dir_all(&objects).unwrap();

        Database::new(objects.into_boxed_path())
    }

    fn chain(
        database: &Database,
        label: &str,
        parent: Option<ObjectId>,
        length: usize,
    ) -> Vec<ObjectId> {
        let tree = database.store_raw(ObjectType::Tree, Bytes::new()).unwrap();
        let mut oids = Vec::new();
        let mut parent = parent;

        for i in 0..length {
            let commit = Commit::new(tree.clone(), parent.clone(), format!("{label} {i}"));
            let oid = database.store(&commit).unwrap();
            parent = Some(oid.clone());
            oids.push(oid);
        }

        oids
    }

    #[test]
    fn test_linear_history_yields_every_commit_once() {
        let dir = TempDir::new().unwrap();
        let database = database(&dir);
        let oids = chain(&database, "main", None, 5);

        let walked = RevList::new(&database, [oids.last().cloned()])
            .collect::<Result<Vec<_>>>()
            .unwrap();

        let expected = oids.into_iter().rev().collect::<Vec<_>>();
        assert_eq!(walked, expected);
    }

    #[test]
    fn test_converging_lineages_are_deduplicated() {
        let dir = TempDir::new().unwrap();
        let database = database(&dir);
        let base = chain(&database, "base", None, 2);
        let left = chain(&database, "left", base.last().cloned(), 2);
        let right = chain(&database, "right", base.last().cloned(), 1);

        let walked = RevList::new(
            &database,
            [left.last().cloned(), None, right.last().cloned()],
        )
        .collect::<Result<Vec<_>>>()
        .unwrap();

        let expected = vec![
            left[1].clone(),
            left[0].clone(),
            base[1].clone(),
            base[0].clone(),
            right[0].clone(),
        ];
        assert_eq!(walked, expected);
    }

    #[test]
    fn test_walk_without_start_is_empty() {
        let dir = TempDir::new().unwrap();
        let database = database(&dir);

        assert_eq!(RevList::new(&database, [None]).count(), 0);
    }

    #[test]
    fn test_missing_commit_stops_the_walk() {
        let dir = TempDir::new().unwrap();
        let database = database(&dir);
        let dangling = ObjectId::try_parse("f".repeat(40)).unwrap();

        let mut walk = RevList::new(&database, [Some(dangling.clone())]);
        assert_eq!(walk.next().unwrap().unwrap(), dangling);
        assert!(matches!(walk.next(), Some(Err(Error::NotFound(_)))));
        assert!(walk.next().is_none());
    }
}
