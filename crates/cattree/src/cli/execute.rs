//! Command execution logic.
//!
//! Every command loads the pedigree file, builds the full ancestry graph,
//! then narrows it to the generations the command needs before calculating.

use anyhow::Result;
use std::path::Path;

use super::args::{AncestorsArgs, CoefficientArgs, RelationshipArgs};
use crate::config::CattreeConfig;
use crate::domain::CatId;
use crate::error::Error;
use crate::graph::AncestryGraph;
use crate::inbreeding::InbreedingCalculator;
use crate::loader::load_pedigree;
use crate::output::{self, OutputMode};

/// Load a pedigree file into a graph, logging every skipped line.
async fn load_graph(path: &Path) -> Result<AncestryGraph> {
    let (records, warnings) = load_pedigree(path).await?;
    for warning in &warnings {
        tracing::warn!(path = %path.display(), "{}", warning);
    }
    Ok(AncestryGraph::build(&records))
}

fn require_cat(graph: &AncestryGraph, id: &str) -> Result<CatId> {
    let cat = CatId::new(id);
    if !graph.contains(&cat) {
        return Err(Error::CatNotFound(cat).into());
    }
    Ok(cat)
}

/// Execute the coefficient command
pub async fn execute_coefficient(
    args: &CoefficientArgs,
    config: &CattreeConfig,
    mode: OutputMode,
) -> Result<()> {
    let graph = load_graph(&args.pedigree).await?;
    let cat = require_cat(&graph, &args.cat)?;
    let depth = args.depth.unwrap_or(config.max_depth);

    let pedigree = AncestryGraph::build(graph.pedigree_within(&cat, depth)?);
    let calculator = InbreedingCalculator::new(config.calculator(depth));
    let report = calculator.assess(&pedigree, &cat);

    output::print_report(&report, args.explain, mode)?;
    Ok(())
}

/// Execute the relationship command
pub async fn execute_relationship(
    args: &RelationshipArgs,
    config: &CattreeConfig,
    mode: OutputMode,
) -> Result<()> {
    let graph = load_graph(&args.pedigree).await?;
    let first = require_cat(&graph, &args.first)?;
    let second = require_cat(&graph, &args.second)?;
    let depth = args.depth.unwrap_or(config.max_depth);

    let mut records = graph.pedigree_within(&first, depth)?;
    records.extend(graph.pedigree_within(&second, depth)?);
    let pedigree = AncestryGraph::build(&records);

    let calculator = InbreedingCalculator::new(config.calculator(depth));
    let value = calculator.relationship(&pedigree, &first, &second);

    output::print_relationship(&first, &second, value, mode)?;
    Ok(())
}

/// Execute the ancestors command
pub async fn execute_ancestors(
    args: &AncestorsArgs,
    config: &CattreeConfig,
    mode: OutputMode,
) -> Result<()> {
    let graph = load_graph(&args.pedigree).await?;
    let cat = require_cat(&graph, &args.cat)?;
    let depth = args.depth.unwrap_or(config.max_depth);

    let ancestors = graph.ancestors(&cat, Some(depth))?;

    output::print_ancestors(&cat, &ancestors, mode)?;
    Ok(())
}
