use std::fmt::Write;

use crate::report::{RunSummary, format_f64_6, format_p};

pub fn render_report_text(summary: &RunSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", summary.tool, summary.version);
    let _ = writeln!(out, "input: {}", summary.input);
    let _ = writeln!(out, "groups: {}", summary.group_source);
    let _ = writeln!(out, "response: {}", summary.config.response.column());
    if let Some(excluded) = &summary.cleaning.excluded_response {
        let _ = writeln!(out, "excluded response: {excluded}");
    }
    out.push('\n');

    let c = &summary.cleaning;
    let _ = writeln!(
        out,
        "rows: {} in, {} kept, {} dropped",
        c.rows_in, c.rows_kept, c.rows_dropped
    );
    let _ = writeln!(
        out,
        "cells: {} missing, {} non-finite, {} unparsable",
        c.cells_missing, c.cells_non_finite, c.cells_unparsable
    );
    if !c.non_numeric_columns.is_empty() {
        let _ = writeln!(
            out,
            "non-numeric columns: {}",
            c.non_numeric_columns.join(", ")
        );
    }
    if !summary.unmapped_variables.is_empty() {
        let _ = writeln!(
            out,
            "ungrouped variables: {}",
            summary.unmapped_variables.join(", ")
        );
    }
    out.push('\n');

    let _ = writeln!(
        out,
        "tests: {} ({} failed), significant at p-adj < {}: {}",
        summary.n_tests, summary.n_failed, summary.alpha, summary.n_significant
    );
    for hit in &summary.top_hits {
        let _ = writeln!(
            out,
            "  {:<28} {:<24} r={} p-adj={}",
            hit.var,
            hit.group.as_deref().unwrap_or("-"),
            format_f64_6(hit.r),
            format_p(hit.p_adj)
        );
    }
    out
}
