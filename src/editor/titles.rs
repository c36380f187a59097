use crate::graph::FunnelNode;
use crate::step::StepType;

/// Numeric suffix at the end of a title ("Upsell 12" -> 12), or 0 when the
/// title does not end in digits. Suffixes too large for a `u64` saturate.
fn trailing_number(title: &str) -> u64 {
    let stem = title.trim_end_matches(|c: char| c.is_ascii_digit());
    let digits = &title[stem.len()..];
    if digits.is_empty() {
        return 0;
    }
    digits.parse().unwrap_or(u64::MAX)
}

/// One past the highest suffix among existing steps of `step`, starting at 1.
pub fn next_index(nodes: &[FunnelNode], step: StepType) -> u64 {
    nodes
        .iter()
        .filter(|n| n.step() == step)
        .map(|n| trailing_number(n.title()))
        .max()
        .unwrap_or(0)
        .saturating_add(1)
}

/// Default title for a new step. Only upsell and downsell steps are numbered.
pub fn build_title(step: StepType, index: u64) -> String {
    if step.is_numbered() {
        format!("{} {}", step.label(), index)
    } else {
        step.label().to_string()
    }
}

pub fn default_title(nodes: &[FunnelNode], step: StepType) -> String {
    build_title(step, next_index(nodes, step))
}
