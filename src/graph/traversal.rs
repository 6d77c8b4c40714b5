//! Cycle-safe traversals over the category graph

use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};

use super::CategoryGraph;
use crate::error::{EntityKind, IndexError, Result};

/// Outcome of walking parent pointers up from a category
enum Walk {
    Complete(Vec<String>),
    /// Reached `at` a second time; `path` is what was discovered before that
    Cycle { path: Vec<String>, at: String },
    /// Parent pointer of the first entry in `path` names a category that does not exist
    Broken { path: Vec<String>, missing: String },
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    OnWalk,
    Done,
}

/// Find every cycle in a parent-pointer structure
///
/// Each node has at most one parent, so each node is walked once. Every
/// cycle is returned once, rotated to start at its smallest id.
pub fn find_cycles<'a, I, F>(ids: I, parent_of: F) -> Vec<Vec<String>>
where
    I: IntoIterator<Item = &'a str>,
    F: Fn(&str) -> Option<&'a str>,
{
    let mut marks: FxHashMap<&'a str, Mark> = FxHashMap::default();
    let mut cycles = Vec::new();

    for start in ids {
        let mut walk: Vec<&'a str> = Vec::new();
        let mut current = Some(start);

        while let Some(id) = current {
            match marks.get(id) {
                Some(Mark::Done) => break,
                Some(Mark::OnWalk) => {
                    if let Some(pos) = walk.iter().position(|w| *w == id) {
                        cycles.push(canonical_cycle(&walk[pos..]));
                    }
                    break;
                }
                None => {
                    marks.insert(id, Mark::OnWalk);
                    walk.push(id);
                    current = parent_of(id);
                }
            }
        }

        for id in walk {
            marks.insert(id, Mark::Done);
        }
    }

    cycles.sort();
    cycles
}

fn canonical_cycle(members: &[&str]) -> Vec<String> {
    let start = members
        .iter()
        .enumerate()
        .min_by_key(|(_, id)| **id)
        .map_or(0, |(i, _)| i);
    members[start..]
        .iter()
        .chain(&members[..start])
        .map(|id| (*id).to_string())
        .collect()
}

impl CategoryGraph {
    /// Ordered ids from the root down to `id`, inclusive
    ///
    /// Fails with `NotFound` for unknown ids and with `DataIntegrity` when the
    /// walk runs into a cycle or a parent that does not exist. See [`Self::path_to_root_lenient`] for the
    /// best-effort variant.
    pub fn path_to_root(&self, id: &str) -> Result<Vec<String>> {
        if let Some(cached) = self.cached_path(id) {
            return Ok(cached);
        }
        self.ensure_known(id)?;

        match self.walk_to_root(id) {
            Walk::Complete(path) => {
                self.remember_path(id, &path);
                Ok(path)
            }
            Walk::Cycle { at, .. } => Err(IndexError::DataIntegrity(format!(
                "cycle detected at category {at} while walking up from {id}"
            ))),
            Walk::Broken { path, missing } => Err(IndexError::DataIntegrity(format!(
                "category {} names missing parent {missing} while walking up from {id}",
                path.first().map_or(id, String::as_str)
            ))),
        }
    }

    /// Best-effort path to the root
    ///
    /// On a cycle this returns the partial path discovered before the repeat
    /// instead of failing; a missing parent ends the path at the last existing
    /// category. Unknown ids give an empty path.
    #[must_use]
    pub fn path_to_root_lenient(&self, id: &str) -> Vec<String> {
        if self.ensure_known(id).is_err() {
            return Vec::new();
        }
        match self.walk_to_root(id) {
            Walk::Complete(path) => path,
            Walk::Cycle { path, at } => {
                log::warn!("Cycle at category {at} truncated the path of {id}");
                path
            }
            Walk::Broken { path, missing } => {
                log::warn!("Missing parent {missing} truncated the path of {id}");
                path
            }
        }
    }

    /// The path to the root without the category itself
    pub fn ancestors(&self, id: &str) -> Result<Vec<String>> {
        let mut path = self.path_to_root(id)?;
        path.pop();
        Ok(path)
    }

    /// Depth-first closure of child categories
    ///
    /// With `max_depth` set, only categories at most that many levels below
    /// `id` are returned; `Some(1)` gives exactly the children and `Some(0)`
    /// gives nothing.
    pub fn descendants(&self, id: &str, max_depth: Option<usize>) -> Result<Vec<String>> {
        self.ensure_known(id)?;

        let mut result = Vec::new();
        let mut visited: FxHashSet<&str> = FxHashSet::default();
        visited.insert(id);

        let mut stack: Vec<(&str, usize)> = self
            .child_list(id)
            .iter()
            .rev()
            .map(|c| (c.as_str(), 1))
            .collect();

        while let Some((current, depth)) = stack.pop() {
            if max_depth.is_some_and(|max| depth > max)
                || !self.nodes.contains_key(current)
                || !visited.insert(current)
            {
                continue;
            }
            result.push(current.to_string());

            if max_depth.is_some_and(|max| depth >= max) {
                continue;
            }
            stack.extend(
                self.child_list(current)
                    .iter()
                    .rev()
                    .map(|c| (c.as_str(), depth + 1)),
            );
        }

        Ok(result)
    }

    /// Deepest category shared by the paths of `a` and `b`
    ///
    /// `None` when either id is unknown, either path is broken by a cycle, or
    /// the two categories live under different roots.
    #[must_use]
    pub fn lowest_common_ancestor(&self, a: &str, b: &str) -> Option<String> {
        let path_a = self.path_to_root(a).ok()?;
        let path_b = self.path_to_root(b).ok()?;

        path_a
            .iter()
            .zip(&path_b)
            .take_while(|(x, y)| x == y)
            .last()
            .map(|(x, _)| x.clone())
    }

    pub(super) fn ensure_known(&self, id: &str) -> Result<()> {
        if self.nodes.contains_key(id) || self.relationships.contains_key(id) {
            Ok(())
        } else {
            Err(IndexError::not_found(id, EntityKind::Category))
        }
    }

    /// Child ids, relationship table first, node table second
    pub(super) fn child_list(&self, id: &str) -> &[String] {
        match self.relationships.get(id) {
            Some(rel) => &rel.children,
            None => self.nodes.get(id).map_or(&[][..], |n| n.children.as_slice()),
        }
    }

    fn walk_to_root(&self, id: &str) -> Walk {
        let mut visited: FxHashSet<&str> = FxHashSet::default();
        let mut path = Vec::new();
        let mut current = Some(id);

        while let Some(cat) = current {
            if !visited.insert(cat) {
                path.reverse();
                return Walk::Cycle {
                    path,
                    at: cat.to_string(),
                };
            }
            path.push(cat.to_string());
            current = match self.parent_id(cat) {
                Some(parent) if self.ensure_known(parent).is_err() => {
                    path.reverse();
                    return Walk::Broken {
                        path,
                        missing: parent.to_string(),
                    };
                }
                parent => parent,
            };
        }

        path.reverse();
        Walk::Complete(path)
    }

    fn cached_path(&self, id: &str) -> Option<Vec<String>> {
        let cache = self.path_cache.as_ref()?;
        let mut cache = cache.lock().ok()?;
        cache.get(id).map(|path| path.to_vec())
    }

    fn remember_path(&self, id: &str, path: &[String]) {
        if let Some(cache) = &self.path_cache {
            if let Ok(mut cache) = cache.lock() {
                cache.put(id.to_string(), Arc::from(path));
            }
        }
    }
}
