//! Inbreeding and relationship coefficients using Wright's path method.
//!
//! # Algorithm
//!
//! For a subject with a known mother and father:
//!
//! 1. Collect the ancestors of each parent (transitive closure, excluding
//!    the parent itself)
//! 2. Intersect them to get the common ancestors
//! 3. For each common ancestor `a`, pair every simple path mother -> `a`
//!    with every simple path father -> `a`
//! 4. Skip pairs already seen, pairs where `a` repeats, and pairs that pass
//!    through another common ancestor before reaching `a` (that ancestor
//!    accounts for the shared lineage already)
//! 5. Each remaining pair contributes `0.5^(n1 + n2 + 1)`, with `n1`, `n2`
//!    the number of parent links on each side
//!
//! The ancestor's own inbreeding is taken as zero and the total is clamped
//! to 1.0. Failures while walking one ancestor only drop that ancestor's
//! contribution.

use crate::domain::CatId;
use crate::error::Result;
use crate::graph::PedigreeView;
use crate::paths::{AncestryPath, PathFinder};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// Default cap on simple paths from one parent to one common ancestor.
pub const DEFAULT_MAX_PATHS_PER_ANCESTOR: usize = 100_000;

/// Limits applied by the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CalculatorConfig {
    /// Generations above the subject to consider (parents are generation 1).
    ///
    /// `None` walks the full pedigree.
    pub max_depth: Option<usize>,

    /// Maximum simple paths from one side to one common ancestor before that
    /// ancestor is skipped.
    pub max_paths_per_ancestor: usize,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            max_depth: None,
            max_paths_per_ancestor: DEFAULT_MAX_PATHS_PER_ANCESTOR,
        }
    }
}

/// Why no coefficient could be computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UndefinedReason {
    /// The subject is not in the pedigree.
    UnknownSubject,
    /// The subject has no recorded mother.
    MissingMother,
    /// The subject has no recorded father.
    MissingFather,
    /// A recorded parent cannot be resolved in the pedigree.
    UnresolvedParent(CatId),
}

/// Whether the report carries a real coefficient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum Outcome {
    /// The coefficient was computed from the pedigree.
    Computed,
    /// Not enough data; the coefficient is reported as 0.0.
    Undefined(UndefinedReason),
}

/// One accepted pair of paths and what it adds to the coefficient.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathContribution {
    /// The common ancestor both paths end at
    pub ancestor: CatId,
    /// Path from the mother to the ancestor
    pub mother_path: AncestryPath,
    /// Path from the father to the ancestor
    pub father_path: AncestryPath,
    /// Parent links on the mother's and father's side
    pub generations: (usize, usize),
    /// `0.5^(n1 + n2 + 1)`
    pub value: f64,
}

/// A common ancestor whose contribution was dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedAncestor {
    /// The ancestor
    pub ancestor: CatId,
    /// Why it was skipped
    pub reason: String,
}

/// Full result of an inbreeding calculation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InbreedingReport {
    /// The cat the coefficient is for
    pub subject: CatId,
    /// Recorded mother, if any
    pub mother: Option<CatId>,
    /// Recorded father, if any
    pub father: Option<CatId>,
    /// Whether the coefficient is defined
    pub outcome: Outcome,
    /// The coefficient in `[0, 1]` (0.0 when undefined)
    pub coefficient: f64,
    /// Ancestors shared by both parents, sorted
    pub common_ancestors: Vec<CatId>,
    /// Accepted path pairs in summation order
    pub contributions: Vec<PathContribution>,
    /// Common ancestors left out of the sum
    pub skipped: Vec<SkippedAncestor>,
    /// Referenced cats the pedigree could not resolve
    pub dangling: Vec<CatId>,
}

impl InbreedingReport {
    fn new(subject: CatId) -> Self {
        Self {
            subject,
            mother: None,
            father: None,
            outcome: Outcome::Computed,
            coefficient: 0.0,
            common_ancestors: Vec::new(),
            contributions: Vec::new(),
            skipped: Vec::new(),
            dangling: Vec::new(),
        }
    }

    fn undefined(mut self, reason: UndefinedReason) -> Self {
        tracing::debug!(subject = %self.subject, ?reason, "Inbreeding coefficient undefined");
        self.outcome = Outcome::Undefined(reason);
        self.coefficient = 0.0;
        self
    }

    /// The coefficient, 0.0 when undefined.
    pub fn coefficient(&self) -> f64 {
        self.coefficient
    }

    /// The coefficient, or `None` when the pedigree lacks the data for it.
    pub fn value(&self) -> Option<f64> {
        match self.outcome {
            Outcome::Computed => Some(self.coefficient),
            Outcome::Undefined(_) => None,
        }
    }

    /// Whether a coefficient was computed.
    pub fn is_defined(&self) -> bool {
        matches!(self.outcome, Outcome::Computed)
    }
}

/// Computes inbreeding and relationship coefficients from a pedigree.
///
/// The calculator holds only its limits; the pedigree is passed to each
/// call and never modified.
#[derive(Debug, Clone, Copy, Default)]
pub struct InbreedingCalculator {
    config: CalculatorConfig,
}

impl InbreedingCalculator {
    /// Create a calculator with the given limits.
    pub fn new(config: CalculatorConfig) -> Self {
        Self { config }
    }

    /// The limits this calculator applies.
    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// Inbreeding coefficient of `subject`, in `[0, 1]`.
    ///
    /// Returns 0.0 when the subject is unknown or lacks a recorded parent;
    /// use [`InbreedingCalculator::assess`] to tell that apart from a
    /// computed zero.
    pub fn compute<P: PedigreeView + ?Sized>(&self, pedigree: &P, subject: &CatId) -> f64 {
        self.assess(pedigree, subject).coefficient()
    }

    /// Inbreeding coefficient of `subject` with the paths that produced it.
    pub fn assess<P: PedigreeView + ?Sized>(&self, pedigree: &P, subject: &CatId) -> InbreedingReport {
        let mut report = InbreedingReport::new(subject.clone());

        let Ok(parents) = pedigree.parents(subject) else {
            return report.undefined(UndefinedReason::UnknownSubject);
        };
        report.mother.clone_from(&parents.mother);
        report.father.clone_from(&parents.father);

        let Some(mother) = parents.mother else {
            return report.undefined(UndefinedReason::MissingMother);
        };
        let Some(father) = parents.father else {
            return report.undefined(UndefinedReason::MissingFather);
        };

        // Paths start at a parent, one generation above the subject.
        let max_edges = self.config.max_depth.map(|depth| depth.saturating_sub(1));
        let mut finder = PathFinder::new(pedigree, max_edges, self.config.max_paths_per_ancestor);

        let Ok(mother_line) = finder.ancestors(&mother, false) else {
            return report.undefined(UndefinedReason::UnresolvedParent(mother));
        };
        let Ok(father_line) = finder.ancestors(&father, false) else {
            return report.undefined(UndefinedReason::UnresolvedParent(father));
        };

        let common: BTreeSet<CatId> = mother_line.intersection(&father_line).cloned().collect();
        report.common_ancestors = common.iter().cloned().collect();

        let mut processed = HashSet::new();
        let mut total = 0.0;

        for ancestor in &common {
            match qualifying_pairs(&mut finder, &mother, &father, ancestor, &common, &mut processed)
            {
                Ok(pairs) => {
                    for (mother_path, father_path) in pairs {
                        let generations = (mother_path.len() - 1, father_path.len() - 1);
                        let value = half_pow(generations.0 + generations.1 + 1);
                        tracing::debug!(
                            ancestor = %ancestor,
                            mother_generations = generations.0,
                            father_generations = generations.1,
                            contribution = value,
                            "Accepted path pair"
                        );
                        total += value;
                        report.contributions.push(PathContribution {
                            ancestor: ancestor.clone(),
                            mother_path,
                            father_path,
                            generations,
                            value,
                        });
                    }
                }
                Err(err) => {
                    tracing::warn!(
                        subject = %subject,
                        ancestor = %ancestor,
                        error = %err,
                        "Skipping common ancestor"
                    );
                    report.skipped.push(SkippedAncestor {
                        ancestor: ancestor.clone(),
                        reason: err.to_string(),
                    });
                }
            }
        }

        report.dangling = finder.into_dangling().into_iter().collect();
        report.coefficient = f64::min(total, 1.0);
        report
    }

    /// Wright's coefficient of relationship between two cats, in `[0, 1]`.
    ///
    /// Uses the same path rules as the inbreeding coefficient, except that
    /// each cat counts as its own ancestor and pairs contribute
    /// `0.5^(n1 + n2)`. Parent and offspring, and full siblings, are related
    /// by 0.5. Returns 1.0 for a cat with itself and 0.0 if either cat is
    /// unknown.
    pub fn relationship<P: PedigreeView + ?Sized>(&self, pedigree: &P, a: &CatId, b: &CatId) -> f64 {
        if !pedigree.contains(a) || !pedigree.contains(b) {
            return 0.0;
        }
        if a == b {
            return 1.0;
        }

        let mut finder = PathFinder::new(
            pedigree,
            self.config.max_depth,
            self.config.max_paths_per_ancestor,
        );
        let (Ok(a_line), Ok(b_line)) = (finder.ancestors(a, true), finder.ancestors(b, true)) else {
            return 0.0;
        };

        let common: BTreeSet<CatId> = a_line.intersection(&b_line).cloned().collect();
        let mut processed = HashSet::new();
        let mut total = 0.0;

        for ancestor in &common {
            match qualifying_pairs(&mut finder, a, b, ancestor, &common, &mut processed) {
                Ok(pairs) => {
                    total += pairs
                        .iter()
                        .map(|(left, right)| half_pow(left.len() - 1 + right.len() - 1))
                        .sum::<f64>();
                }
                Err(err) => {
                    tracing::warn!(
                        ancestor = %ancestor,
                        error = %err,
                        "Skipping common ancestor in relationship"
                    );
                }
            }
        }

        f64::min(total, 1.0)
    }
}

/// Inbreeding coefficient of `subject` using the default limits.
pub fn inbreeding_coefficient<P: PedigreeView + ?Sized>(pedigree: &P, subject: &CatId) -> f64 {
    InbreedingCalculator::default().compute(pedigree, subject)
}

/// Path pairs from `left` and `right` to `ancestor` that count towards a
/// coefficient.
///
/// `processed` is shared across all ancestors of one calculation so a pair
/// is only ever considered once.
fn qualifying_pairs<P: PedigreeView + ?Sized>(
    finder: &mut PathFinder<'_, P>,
    left: &CatId,
    right: &CatId,
    ancestor: &CatId,
    common: &BTreeSet<CatId>,
    processed: &mut HashSet<(AncestryPath, AncestryPath)>,
) -> Result<Vec<(AncestryPath, AncestryPath)>> {
    let left_paths = finder.simple_paths(left, ancestor)?;
    let right_paths = finder.simple_paths(right, ancestor)?;

    let mut pairs = Vec::new();
    for left_path in &left_paths {
        for right_path in &right_paths {
            if !processed.insert((left_path.clone(), right_path.clone())) {
                continue;
            }
            if occurrences(left_path, ancestor) != 1 || occurrences(right_path, ancestor) != 1 {
                continue;
            }
            if passes_other_ancestor(left_path, ancestor, common)
                || passes_other_ancestor(right_path, ancestor, common)
            {
                continue;
            }
            pairs.push((left_path.clone(), right_path.clone()));
        }
    }

    Ok(pairs)
}

fn occurrences(path: &[CatId], cat: &CatId) -> usize {
    path.iter().filter(|step| *step == cat).count()
}

/// Whether a common ancestor other than `ancestor` sits on the path before
/// its last cat.
fn passes_other_ancestor(path: &[CatId], ancestor: &CatId, common: &BTreeSet<CatId>) -> bool {
    let Some((_, before_end)) = path.split_last() else {
        return false;
    };
    before_end
        .iter()
        .any(|step| step != ancestor && common.contains(step))
}

fn half_pow(exponent: usize) -> f64 {
    0.5_f64.powi(i32::try_from(exponent).unwrap_or(i32::MAX))
}
