//! Advisory diagnostics derived from the current funnel graph.
//!
//! Nothing here mutates a graph or blocks a mutation. Both [`validate`] and
//! [`annotate`] are recomputed from scratch after every committed change.

use crate::graph::{FunnelEdge, FunnelNode};
use crate::step::StepType;
use ahash::AHashSet;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A single diagnostic shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValidationIssue {
    #[serde(rename = "type")]
    pub severity: Severity,
    pub message: String,
}

impl ValidationIssue {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Summary used by a status indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationStatus {
    Ok,
    Issues { count: usize, has_errors: bool },
}

impl ValidationStatus {
    pub fn from_issues(issues: &[ValidationIssue]) -> Self {
        if issues.is_empty() {
            ValidationStatus::Ok
        } else {
            ValidationStatus::Issues {
                count: issues.len(),
                has_errors: issues.iter().any(ValidationIssue::is_error),
            }
        }
    }
}

/// How many connections leave a sales step, reduced to what the rules care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FanOut {
    None,
    Single,
    Multiple,
}

impl FanOut {
    fn of(node: &FunnelNode, outgoing: &HashMap<&str, usize>) -> Self {
        match outgoing.get(node.id.as_str()).copied().unwrap_or(0) {
            0 => FanOut::None,
            1 => FanOut::Single,
            _ => FanOut::Multiple,
        }
    }
}

fn outgoing_counts(edges: &[FunnelEdge]) -> HashMap<&str, usize> {
    edges.iter().map(|e| e.source.as_str()).counts()
}

/// Computes the diagnostics for a graph.
///
/// The result depends only on `nodes` and `edges`; issue order follows node
/// order, with the orphan summary first.
pub fn validate(nodes: &[FunnelNode], edges: &[FunnelEdge]) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    if nodes.len() <= 1 {
        return issues;
    }

    let connected: AHashSet<&str> = edges
        .iter()
        .flat_map(|e| [e.source.as_str(), e.target.as_str()])
        .collect();
    let orphans = nodes
        .iter()
        .filter(|n| !connected.contains(n.id.as_str()))
        .count();
    if orphans > 0 {
        let plural = if orphans > 1 { "s" } else { "" };
        issues.push(ValidationIssue::warning(format!(
            "{} orphan node{}",
            orphans, plural
        )));
    }

    let outgoing = outgoing_counts(edges);
    for node in nodes.iter().filter(|n| n.step() == StepType::Sales) {
        match FanOut::of(node, &outgoing) {
            FanOut::None => issues.push(ValidationIssue::warning(format!(
                "\"{}\" has no connection",
                node.title()
            ))),
            FanOut::Multiple => issues.push(ValidationIssue::warning(format!(
                "\"{}\" has multiple connections",
                node.title()
            ))),
            FanOut::Single => {}
        }
    }

    issues
}

/// Returns the nodes with display warnings recomputed for every sales step.
///
/// Other step kinds are passed through untouched.
pub fn annotate(nodes: &[FunnelNode], edges: &[FunnelEdge]) -> Vec<FunnelNode> {
    let outgoing = outgoing_counts(edges);
    let multi_node = nodes.len() > 1;

    nodes
        .iter()
        .map(|node| {
            let mut node = node.clone();
            if node.step() != StepType::Sales {
                return node;
            }
            let warning = match FanOut::of(&node, &outgoing) {
                _ if !multi_node => None,
                FanOut::None => Some("No connection"),
                FanOut::Multiple => Some("Multiple connections"),
                FanOut::Single => None,
            };
            node.data.has_warning = warning.is_some();
            node.data.warning_message = warning.map(str::to_string);
            node
        })
        .collect()
}
