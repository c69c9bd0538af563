//! Ancestry graph operations using petgraph.
//!
//! The graph is built once from flat pedigree records and never mutated
//! afterwards. Edges point from **child to parent** and carry the
//! [`ParentRole`] of the parent, so following outgoing edges walks up the
//! pedigree towards the founders.
//!
//! This module provides:
//! - Graph construction with edge de-duplication ([`AncestryGraph::build`])
//! - The [`PedigreeView`] trait the calculator is written against
//! - Depth-limited extraction of a subject's pedigree (BFS)

use crate::domain::{CatId, ParentRole, Parents, PedigreeRecord};
use crate::error::{Error, Result};
use petgraph::algo;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::borrow::Borrow;
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;

/// Read-only access to recorded parents.
///
/// Implementations return [`Error::CatNotFound`] for a cat they know
/// nothing about. A cat that is known but has no recorded parents yields
/// [`Parents::unknown`].
pub trait PedigreeView {
    /// Get the recorded parents of a cat.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CatNotFound`] if the cat is absent from the view.
    fn parents(&self, cat: &CatId) -> Result<Parents>;

    /// Whether the view knows about this cat.
    fn contains(&self, cat: &CatId) -> bool {
        self.parents(cat).is_ok()
    }
}

/// A plain parent table is a pedigree view too. Parent ids that have no
/// key of their own are unresolvable references.
impl PedigreeView for HashMap<CatId, Parents> {
    fn parents(&self, cat: &CatId) -> Result<Parents> {
        self.get(cat)
            .cloned()
            .ok_or_else(|| Error::CatNotFound(cat.clone()))
    }

    fn contains(&self, cat: &CatId) -> bool {
        self.contains_key(cat)
    }
}

/// Non-fatal problems found while building a graph.
///
/// The offending link is skipped and the build continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildWarning {
    /// A record names a different parent for a role that is already filled.
    ///
    /// **Effect**: the first link wins; the later one is ignored.
    ConflictingParent {
        /// Cat with two candidate parents for one role
        child: CatId,
        /// The role in conflict
        role: ParentRole,
        /// Parent kept from the earlier record
        kept: CatId,
        /// Parent from the later record that was dropped
        ignored: CatId,
    },

    /// A record names a cat as its own parent.
    ///
    /// **Effect**: the link is skipped.
    SelfParent {
        /// The cat in question
        cat: CatId,
        /// Role the self-reference was recorded under
        role: ParentRole,
    },

    /// The finished graph contains a directed cycle.
    ///
    /// **Effect**: none on the graph. Traversals still terminate, but path
    /// enumeration over the cycle can be expensive.
    CyclicPedigree,
}

impl fmt::Display for BuildWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConflictingParent {
                child,
                role,
                kept,
                ignored,
            } => write!(
                f,
                "{child} already has {role} {kept}; ignoring conflicting {role} {ignored}"
            ),
            Self::SelfParent { cat, role } => {
                write!(f, "{cat} is recorded as its own {role}; link skipped")
            }
            Self::CyclicPedigree => write!(f, "pedigree contains a cycle"),
        }
    }
}

/// Directed ancestry graph of cats.
///
/// # Graph Representation
///
/// Nodes contain `CatId` values, edges contain the `ParentRole` of the
/// target. Edge direction: source (child) -> target (parent). Each node has
/// at most one outgoing `Mother` edge and one outgoing `Father` edge.
#[derive(Debug, Clone, Default)]
pub struct AncestryGraph {
    /// Pedigree graph using petgraph.
    graph: DiGraph<CatId, ParentRole>,

    /// Mapping from `CatId` to graph `NodeIndex`.
    ///
    /// Every node in `graph` has exactly one entry here.
    node_map: HashMap<CatId, NodeIndex>,
}

impl AncestryGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from pedigree records, logging any build warnings.
    ///
    /// See [`AncestryGraph::build_with_warnings`] for the construction rules.
    pub fn build<I, R>(records: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Borrow<PedigreeRecord>,
    {
        let (graph, warnings) = Self::build_with_warnings(records);
        for warning in &warnings {
            tracing::warn!("{}", warning);
        }
        graph
    }

    /// Build a graph from pedigree records.
    ///
    /// - Each record's cat becomes a node.
    /// - Each recorded parent becomes a node and gains a role-tagged edge
    ///   from the child.
    /// - Replaying the same link is a no-op, so building from duplicated
    ///   input yields the same edge set.
    ///
    /// Returns the graph together with the non-fatal warnings encountered.
    pub fn build_with_warnings<I, R>(records: I) -> (Self, Vec<BuildWarning>)
    where
        I: IntoIterator<Item = R>,
        R: Borrow<PedigreeRecord>,
    {
        let mut this = Self::new();
        let mut warnings = Vec::new();

        for record in records {
            let record = record.borrow();
            let child = this.ensure_node(&record.cat_id);

            for role in [ParentRole::Mother, ParentRole::Father] {
                let Some(parent_id) = record.parent(role) else {
                    continue;
                };

                if parent_id == &record.cat_id {
                    warnings.push(BuildWarning::SelfParent {
                        cat: record.cat_id.clone(),
                        role,
                    });
                    continue;
                }

                if let Some(existing) = this.parent_node(child, role) {
                    let kept = &this.graph[existing];
                    if kept != parent_id {
                        warnings.push(BuildWarning::ConflictingParent {
                            child: record.cat_id.clone(),
                            role,
                            kept: kept.clone(),
                            ignored: parent_id.clone(),
                        });
                    }
                    continue;
                }

                let parent = this.ensure_node(parent_id);
                this.graph.add_edge(child, parent, role);
            }
        }

        if algo::is_cyclic_directed(&this.graph) {
            warnings.push(BuildWarning::CyclicPedigree);
        }

        tracing::debug!(
            cats = this.len(),
            links = this.edge_count(),
            warnings = warnings.len(),
            "Built ancestry graph"
        );

        (this, warnings)
    }

    fn ensure_node(&mut self, id: &CatId) -> NodeIndex {
        if let Some(&node) = self.node_map.get(id) {
            return node;
        }
        let node = self.graph.add_node(id.clone());
        self.node_map.insert(id.clone(), node);
        node
    }

    fn parent_node(&self, child: NodeIndex, role: ParentRole) -> Option<NodeIndex> {
        self.graph
            .edges(child)
            .find(|edge| *edge.weight() == role)
            .map(|edge| edge.target())
    }

    fn parents_of(&self, node: NodeIndex) -> Parents {
        Parents {
            mother: self
                .parent_node(node, ParentRole::Mother)
                .map(|n| self.graph[n].clone()),
            father: self
                .parent_node(node, ParentRole::Father)
                .map(|n| self.graph[n].clone()),
        }
    }

    fn node(&self, id: &CatId) -> Result<NodeIndex> {
        self.node_map
            .get(id)
            .copied()
            .ok_or_else(|| Error::CatNotFound(id.clone()))
    }

    /// Number of cats in the graph.
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    /// Whether the graph has no cats.
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Number of parent links in the graph.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Whether the graph contains a cat.
    pub fn contains(&self, id: &CatId) -> bool {
        self.node_map.contains_key(id)
    }

    /// All cats, sorted by id.
    pub fn cats(&self) -> Vec<CatId> {
        let mut cats: Vec<CatId> = self.node_map.keys().cloned().collect();
        cats.sort();
        cats
    }

    /// All parent links as `(child, role, parent)`, sorted.
    pub fn edges(&self) -> Vec<(CatId, ParentRole, CatId)> {
        let mut edges: Vec<_> = self
            .graph
            .edge_references()
            .map(|edge| {
                (
                    self.graph[edge.source()].clone(),
                    *edge.weight(),
                    self.graph[edge.target()].clone(),
                )
            })
            .collect();
        edges.sort();
        edges
    }

    /// Recorded mother of a cat.
    pub fn mother(&self, id: &CatId) -> Option<CatId> {
        let node = self.node_map.get(id)?;
        self.parent_node(*node, ParentRole::Mother)
            .map(|n| self.graph[n].clone())
    }

    /// Recorded father of a cat.
    pub fn father(&self, id: &CatId) -> Option<CatId> {
        let node = self.node_map.get(id)?;
        self.parent_node(*node, ParentRole::Father)
            .map(|n| self.graph[n].clone())
    }

    /// Flatten the graph back into one record per cat, sorted by id.
    pub fn records(&self) -> Vec<PedigreeRecord> {
        self.cats()
            .into_iter()
            .map(|id| {
                let parents = self.parents_of(self.node_map[&id]);
                PedigreeRecord::new(id, parents.mother, parents.father)
            })
            .collect()
    }

    /// Ancestors of a cat with the generation they were first reached at.
    ///
    /// Uses BFS over parent links, so each ancestor is reported once at its
    /// closest generation (parents are generation 1). Results are ordered by
    /// generation, mothers before fathers. `max_depth` limits how many
    /// generations are walked.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CatNotFound`] if `id` is not in the graph.
    pub fn ancestors(&self, id: &CatId, max_depth: Option<usize>) -> Result<Vec<(CatId, usize)>> {
        let start = self.node(id)?;

        let mut result = Vec::new();
        let mut visited = HashSet::from([start]);
        let mut queue: VecDeque<(NodeIndex, usize)> = VecDeque::from([(start, 0)]);

        while let Some((current, depth)) = queue.pop_front() {
            if max_depth.is_some_and(|max| depth >= max) {
                continue;
            }

            for role in [ParentRole::Mother, ParentRole::Father] {
                let Some(parent) = self.parent_node(current, role) else {
                    continue;
                };
                if visited.insert(parent) {
                    queue.push_back((parent, depth + 1));
                    result.push((self.graph[parent].clone(), depth + 1));
                }
            }
        }

        Ok(result)
    }

    /// Extract the pedigree of a cat up to `max_depth` generations.
    ///
    /// Returns a record for the subject and for every ancestor closer than
    /// `max_depth` generations, in BFS order starting with the subject.
    /// Ancestors exactly `max_depth` generations up appear only as parent
    /// links. Building a graph from the result yields the subject's
    /// pedigree cut at that depth.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CatNotFound`] if `subject` is not in the graph.
    pub fn pedigree_within(&self, subject: &CatId, max_depth: usize) -> Result<Vec<PedigreeRecord>> {
        let start = self.node(subject)?;

        if max_depth == 0 {
            return Ok(vec![PedigreeRecord::founder(subject.clone())]);
        }

        let mut records = Vec::new();
        let mut visited = HashSet::from([start]);
        let mut queue: VecDeque<(NodeIndex, usize)> = VecDeque::from([(start, 0)]);

        while let Some((current, depth)) = queue.pop_front() {
            let parents = self.parents_of(current);
            records.push(PedigreeRecord::new(
                self.graph[current].clone(),
                parents.mother,
                parents.father,
            ));

            if depth + 1 >= max_depth {
                continue;
            }

            for role in [ParentRole::Mother, ParentRole::Father] {
                if let Some(parent) = self.parent_node(current, role) {
                    if visited.insert(parent) {
                        queue.push_back((parent, depth + 1));
                    }
                }
            }
        }

        Ok(records)
    }

    /// Whether the graph contains a directed cycle.
    pub fn is_cyclic(&self) -> bool {
        algo::is_cyclic_directed(&self.graph)
    }
}

impl PedigreeView for AncestryGraph {
    fn parents(&self, cat: &CatId) -> Result<Parents> {
        self.node(cat).map(|node| self.parents_of(node))
    }

    fn contains(&self, cat: &CatId) -> bool {
        self.node_map.contains_key(cat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> CatId {
        CatId::new(s)
    }

    fn trio() -> Vec<PedigreeRecord> {
        vec![
            PedigreeRecord::with_parents("kit", "dam", "sire"),
            PedigreeRecord::founder("dam"),
            PedigreeRecord::founder("sire"),
        ]
    }

    #[test]
    fn test_build_empty() {
        let graph = AncestryGraph::build(Vec::<PedigreeRecord>::new());
        assert!(graph.is_empty());
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_build_adds_parents_as_nodes() {
        let graph = AncestryGraph::build([PedigreeRecord::with_parents("kit", "dam", "sire")]);
        assert_eq!(graph.len(), 3);
        assert_eq!(graph.mother(&id("kit")), Some(id("dam")));
        assert_eq!(graph.father(&id("kit")), Some(id("sire")));
        assert!(graph.contains(&id("dam")));
        assert_eq!(graph.parents(&id("dam")).unwrap(), Parents::unknown());
    }

    #[test]
    fn test_build_deduplicates_replayed_links() {
        let mut records = trio();
        records.extend(trio());
        let (graph, warnings) = AncestryGraph::build_with_warnings(&records);
        assert_eq!(graph.edge_count(), 2);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_build_keeps_first_conflicting_parent() {
        let records = vec![
            PedigreeRecord::new("kit", Some(id("dam")), None),
            PedigreeRecord::new("kit", Some(id("other")), None),
        ];
        let (graph, warnings) = AncestryGraph::build_with_warnings(&records);

        assert_eq!(graph.mother(&id("kit")), Some(id("dam")));
        assert!(!graph.contains(&id("other")));
        assert_eq!(
            warnings,
            vec![BuildWarning::ConflictingParent {
                child: id("kit"),
                role: ParentRole::Mother,
                kept: id("dam"),
                ignored: id("other"),
            }]
        );
    }

    #[test]
    fn test_build_skips_self_parent() {
        let (graph, warnings) =
            AncestryGraph::build_with_warnings([PedigreeRecord::new("kit", None, Some(id("kit")))]);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(
            warnings,
            vec![BuildWarning::SelfParent {
                cat: id("kit"),
                role: ParentRole::Father,
            }]
        );
    }

    #[test]
    fn test_build_reports_cycle() {
        let records = vec![
            PedigreeRecord::new("a", Some(id("b")), None),
            PedigreeRecord::new("b", Some(id("a")), None),
        ];
        let (graph, warnings) = AncestryGraph::build_with_warnings(&records);
        assert!(graph.is_cyclic());
        assert_eq!(warnings, vec![BuildWarning::CyclicPedigree]);
    }

    #[test]
    fn test_view_unknown_cat() {
        let graph = AncestryGraph::build(trio());
        assert!(matches!(
            graph.parents(&id("ghost")),
            Err(Error::CatNotFound(cat)) if cat == id("ghost")
        ));
    }

    #[test]
    fn test_records_round_trip_edges() {
        let graph = AncestryGraph::build(trio());
        let rebuilt = AncestryGraph::build(graph.records());
        assert_eq!(graph.edges(), rebuilt.edges());
        assert_eq!(graph.cats(), rebuilt.cats());
    }

    #[test]
    fn test_ancestors_by_generation() {
        let records = vec![
            PedigreeRecord::with_parents("kit", "dam", "sire"),
            PedigreeRecord::with_parents("dam", "granny", "grandpa"),
        ];
        let graph = AncestryGraph::build(&records);

        let all = graph.ancestors(&id("kit"), None).unwrap();
        assert_eq!(
            all,
            vec![
                (id("dam"), 1),
                (id("sire"), 1),
                (id("granny"), 2),
                (id("grandpa"), 2),
            ]
        );

        let parents_only = graph.ancestors(&id("kit"), Some(1)).unwrap();
        assert_eq!(parents_only.len(), 2);
    }

    #[test]
    fn test_pedigree_within_cuts_at_depth() {
        let records = vec![
            PedigreeRecord::with_parents("kit", "dam", "sire"),
            PedigreeRecord::with_parents("dam", "granny", "grandpa"),
            PedigreeRecord::with_parents("granny", "gg-dam", "gg-sire"),
        ];
        let graph = AncestryGraph::build(&records);

        let cut = graph.pedigree_within(&id("kit"), 2).unwrap();
        let ids: Vec<&str> = cut.iter().map(|r| r.cat_id.as_str()).collect();
        assert_eq!(ids, vec!["kit", "dam", "sire"]);

        let sub = AncestryGraph::build(&cut);
        assert!(sub.contains(&id("granny")));
        assert!(!sub.contains(&id("gg-dam")));
        assert_eq!(sub.parents(&id("granny")).unwrap(), Parents::unknown());
    }

    #[test]
    fn test_pedigree_within_zero_depth() {
        let graph = AncestryGraph::build(trio());
        let cut = graph.pedigree_within(&id("kit"), 0).unwrap();
        assert_eq!(cut, vec![PedigreeRecord::founder("kit")]);
    }

    #[test]
    fn test_graph_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AncestryGraph>();
    }
}
