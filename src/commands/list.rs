//! List command
//!
//! Prints registered lints grouped by the standard they enforce.

use crate::cli::args::ListArgs;
use crate::engine::registry::LintRegistry;
use crate::lints;
use crate::{CertlintError, LintSource};

pub fn run(args: &ListArgs) -> Result<String, CertlintError> {
    let registry = lints::default_registry()?;
    Ok(format_lint_list(&registry, &args.sources))
}

/// Render the catalog. An empty `sources` lists every standard.
pub fn format_lint_list(registry: &LintRegistry, sources: &[LintSource]) -> String {
    let mut output = String::from("Available lints:\n");

    for source in LintSource::ALL {
        if !sources.is_empty() && !sources.contains(&source) {
            continue;
        }

        let lints: Vec<_> = registry.by_source(source).collect();
        if lints.is_empty() {
            continue;
        }

        output.push('\n');
        output.push_str(&format!("{} ({}):\n", source.to_string().to_uppercase(), source.as_str()));
        let width = lints.iter().map(|l| l.name().len()).max().unwrap_or(0);
        for lint in lints {
            let d = &lint.descriptor;
            output.push_str(&format!(
                "  {:<width$}  {} [{}; effective {}]\n",
                d.name,
                d.description,
                d.citation,
                d.effective,
                width = width
            ));
        }
    }

    output
}
