//! Ancestor closures and simple-path enumeration over a pedigree view.
//!
//! Both walks only ever follow parent links, so they run from a cat towards
//! its founders. Cats the view cannot resolve are treated as dead ends: they
//! can still be reached (and be the target of a path) but are never expanded.
//!
//! Path enumeration is an explicit depth-first search with an "on current
//! path" set instead of recursion, so stack depth stays bounded and no path
//! ever repeats a cat. The number of simple paths can still grow
//! exponentially with pedigree depth; [`PathFinder`] bounds it with an edge
//! limit and a per-target path limit.

use crate::domain::{CatId, Parents};
use crate::error::{Error, Result};
use crate::graph::PedigreeView;
use std::collections::{BTreeSet, HashSet, VecDeque};

/// An ancestry path: the cats visited, starting cat first.
pub type AncestryPath = Vec<CatId>;

/// Walks a pedigree view with fixed limits, remembering unresolvable cats.
pub struct PathFinder<'a, P: PedigreeView + ?Sized> {
    view: &'a P,
    max_edges: Option<usize>,
    path_limit: usize,
    dangling: BTreeSet<CatId>,
}

impl<'a, P: PedigreeView + ?Sized> PathFinder<'a, P> {
    /// Create a path finder.
    ///
    /// `max_edges` caps the length of every walk (in parent links);
    /// `path_limit` caps how many paths [`PathFinder::simple_paths`] may
    /// return for one `(from, to)` pair.
    pub fn new(view: &'a P, max_edges: Option<usize>, path_limit: usize) -> Self {
        Self {
            view,
            max_edges,
            path_limit,
            dangling: BTreeSet::new(),
        }
    }

    fn within_limit(&self, edges: usize) -> bool {
        self.max_edges.is_none_or(|max| edges <= max)
    }

    fn expand(&mut self, cat: &CatId) -> Option<Parents> {
        match self.view.parents(cat) {
            Ok(parents) => Some(parents),
            Err(_) => {
                if self.dangling.insert(cat.clone()) {
                    tracing::warn!(
                        cat = %cat,
                        "Pedigree references a cat it cannot resolve; treating it as a dead end"
                    );
                }
                None
            }
        }
    }

    /// Every cat reachable from `start` by following parent links.
    ///
    /// `start` itself is included only when `include_self` is set (it is
    /// otherwise removed even if a cycle leads back to it).
    ///
    /// # Errors
    ///
    /// Returns [`Error::CatNotFound`] if `start` cannot be resolved.
    pub fn ancestors(&mut self, start: &CatId, include_self: bool) -> Result<BTreeSet<CatId>> {
        let root = self.view.parents(start)?;

        let mut seen = BTreeSet::new();
        let mut queue: VecDeque<(Parents, usize)> = VecDeque::from([(root, 0)]);

        while let Some((parents, depth)) = queue.pop_front() {
            if !self.within_limit(depth + 1) {
                continue;
            }

            for parent in parents.iter() {
                if !seen.insert(parent.clone()) {
                    continue;
                }
                if let Some(grandparents) = self.expand(parent) {
                    queue.push_back((grandparents, depth + 1));
                }
            }
        }

        if include_self {
            seen.insert(start.clone());
        } else {
            seen.remove(start);
        }

        Ok(seen)
    }

    /// All simple paths from `from` to `to` along parent links.
    ///
    /// Paths are returned in DFS order, mothers explored before fathers.
    /// When `from == to` the single zero-length path `[from]` is returned.
    ///
    /// # Errors
    ///
    /// - [`Error::CatNotFound`] if `from` cannot be resolved
    /// - [`Error::PathLimitExceeded`] if more than the configured number of
    ///   paths exist
    pub fn simple_paths(&mut self, from: &CatId, to: &CatId) -> Result<Vec<AncestryPath>> {
        let root = self.view.parents(from)?;

        if from == to {
            return Ok(vec![vec![from.clone()]]);
        }

        let mut paths = Vec::new();
        let mut path: AncestryPath = vec![from.clone()];
        let mut on_path: HashSet<CatId> = HashSet::from([from.clone()]);
        let mut stack: Vec<std::vec::IntoIter<CatId>> = vec![parent_list(root)];

        while let Some(frontier) = stack.last_mut() {
            let Some(next) = frontier.next() else {
                stack.pop();
                if let Some(done) = path.pop() {
                    on_path.remove(&done);
                }
                continue;
            };

            // Edge count of `path` extended by `next`.
            let edges = path.len();
            if on_path.contains(&next) || !self.within_limit(edges) {
                continue;
            }

            if next == *to {
                if paths.len() >= self.path_limit {
                    return Err(Error::PathLimitExceeded {
                        from: from.clone(),
                        to: to.clone(),
                        limit: self.path_limit,
                    });
                }
                let mut found = path.clone();
                found.push(next);
                paths.push(found);
                continue;
            }

            if !self.within_limit(edges + 1) {
                continue;
            }

            let Some(parents) = self.expand(&next) else {
                continue;
            };
            on_path.insert(next.clone());
            path.push(next);
            stack.push(parent_list(parents));
        }

        Ok(paths)
    }

    /// Cats that were referenced but could not be resolved so far.
    pub fn dangling(&self) -> &BTreeSet<CatId> {
        &self.dangling
    }

    /// Consume the finder, returning the unresolvable cats it met.
    pub fn into_dangling(self) -> BTreeSet<CatId> {
        self.dangling
    }
}

fn parent_list(parents: Parents) -> std::vec::IntoIter<CatId> {
    parents
        .mother
        .into_iter()
        .chain(parents.father)
        .collect::<Vec<_>>()
        .into_iter()
}
