//! Loading exclusion rules from a YAML file.
//!
//! ```yaml
//! skip_files:
//!   - cube.franz
//!   - countdown.franz
//! skip_patterns:
//!   - failing
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::errors::HarnessError;
use crate::policy::ExclusionRules;

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RuleFile {
    skip_files: Vec<String>,
    skip_patterns: Vec<String>,
}

/// Reads a rule file, replacing rather than extending the built-in rules.
pub fn load_rules(path: &Path) -> Result<ExclusionRules, HarnessError> {
    let content = fs::read_to_string(path).map_err(|source| HarnessError::RuleFile {
        path: path.to_path_buf(),
        source,
    })?;
    let rules = parse_rules(&content).map_err(|source| HarnessError::RuleFileFormat {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(
        path = %path.display(),
        files = rules.skip_files().len(),
        patterns = rules.skip_patterns().len(),
        "loaded exclusion rules"
    );
    Ok(rules)
}

/// An empty document yields an empty rule set.
pub fn parse_rules(content: &str) -> Result<ExclusionRules, serde_yaml::Error> {
    let file: Option<RuleFile> = serde_yaml::from_str(content)?;
    let file = file.unwrap_or_default();
    Ok(ExclusionRules::new(file.skip_files, file.skip_patterns))
}
