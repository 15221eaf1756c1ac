//! Content-based hashing for analysis IDs.

use gp_project::AnalysisDef;
use sha2::{Digest, Sha256};

/// SHA-256 over the JSON form of the definition, hex encoded.
pub fn compute_analysis_id(analysis: &AnalysisDef) -> String {
    let mut hasher = Sha256::new();

    let json = serde_json::to_string(analysis).unwrap_or_default();
    hasher.update(json.as_bytes());

    let result = hasher.finalize();
    format!("{:x}", result)
}
