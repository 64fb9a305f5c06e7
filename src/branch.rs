/// Prefix carried by branch refs; anything else (tags, PR merge refs,
/// detached heads) yields an empty branch name.
pub const BRANCH_REF_PREFIX: &str = "refs/heads/";

/// Classification of the branch a CI run is building.
///
/// Exactly one of the three flags is true for any input ref:
/// `is_feature_or_pr` is defined as the negation of the other two.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchClassification {
    pub branch_name: String,
    pub branch_name_safe: String,
    pub is_release: bool,
    pub is_development: bool,
    pub is_feature_or_pr: bool,
}

impl BranchClassification {
    /// Classify a git ref string (e.g. `refs/heads/release/2.1`).
    pub fn from_ref(git_ref: &str) -> Self {
        let branch_name = git_ref
            .strip_prefix(BRANCH_REF_PREFIX)
            .unwrap_or("")
            .to_string();

        // Only the first '/' is replaced. Names with more than one slash
        // keep the rest, matching the published output contract.
        let branch_name_safe = branch_name.replacen('/', "-", 1);

        let is_release = matches!(branch_name.as_str(), "master" | "main" | "release")
            || branch_name.starts_with("release/");
        let is_development = matches!(branch_name.as_str(), "develop" | "development");
        let is_feature_or_pr = !is_release && !is_development;

        BranchClassification {
            branch_name,
            branch_name_safe,
            is_release,
            is_development,
            is_feature_or_pr,
        }
    }
}
