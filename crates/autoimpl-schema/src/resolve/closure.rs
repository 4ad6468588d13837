use crate::{node::Schema, resolve::ResolveError};
use indexmap::{IndexMap, IndexSet};
use std::iter;

///
/// InterfaceClosure
///
/// An interface plus every supertrait reachable from it, each exactly once.
/// Ordered root first, then each parent's closure in `extends` order; the
/// first occurrence of a shared ancestor wins.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InterfaceClosure {
    root: String,
    members: IndexSet<String>,
}

impl InterfaceClosure {
    #[must_use]
    pub fn root(&self) -> &str {
        &self.root
    }

    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.members.contains(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl<'a> IntoIterator for &'a InterfaceClosure {
    type Item = &'a String;
    type IntoIter = indexmap::set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

/// Compute the closure of `root` over the `extends` graph.
pub fn closure(schema: &Schema, root: &str) -> Result<InterfaceClosure, ResolveError> {
    let members = closure_of(schema, root, &[], &mut IndexMap::new())?;

    Ok(InterfaceClosure {
        root: root.to_string(),
        members,
    })
}

// closure(path) = {path} ∪ closure(parent) for every direct parent
//
// `done` holds the finished sub-closures of this walk, so shared ancestors
// are resolved once. Only acyclic sub-closures ever finish.
fn closure_of(
    schema: &Schema,
    path: &str,
    lineage: &[&str],
    done: &mut IndexMap<String, IndexSet<String>>,
) -> Result<IndexSet<String>, ResolveError> {
    if let Some(members) = done.get(path) {
        return Ok(members.clone());
    }
    if lineage.contains(&path) {
        let chain = lineage
            .iter()
            .copied()
            .chain(iter::once(path))
            .map(str::to_string)
            .collect();

        return Err(ResolveError::Cycle { chain });
    }

    let interface = schema.interface(path)?;
    let lineage: Vec<&str> = lineage.iter().copied().chain(iter::once(path)).collect();

    let members = interface.extends.iter().try_fold(
        iter::once(path.to_string()).collect::<IndexSet<_>>(),
        |acc, parent| Ok::<_, ResolveError>(union(acc, closure_of(schema, parent, &lineage, done)?)),
    )?;
    done.insert(path.to_string(), members.clone());

    Ok(members)
}

fn union(left: IndexSet<String>, right: IndexSet<String>) -> IndexSet<String> {
    left.into_iter().chain(right).collect()
}
