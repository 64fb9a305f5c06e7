//! The version resolution pipeline
//!
//! A single linear flow: classify the branch, publish the classification,
//! run the external describe query, parse the descriptor, derive the
//! version, publish the rest. The branch outputs are emitted *before* the
//! external call so a failed query still leaves the classification on the
//! log stream; nothing after the failure point is emitted.

use crate::branch::BranchClassification;
use crate::config::RefInput;
use crate::error::Result;
use crate::git::GitQuery;
use crate::output::OutputSink;
use crate::version::{parse_describe, ResolvedVersion};

fn bool_str(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

/// Run the whole pipeline against an environment snapshot.
///
/// Every output emission and intermediate value goes through the sink, in a
/// fixed order that consumers of the log stream rely on.
pub fn resolve(
    input: &RefInput,
    git: &dyn GitQuery,
    sink: &mut dyn OutputSink,
) -> Result<ResolvedVersion> {
    sink.info(&format!(
        "Calculating version for {} ({})",
        input.git_ref, input.commit_sha
    ));
    sink.debug(&format!("git commit {}", input.commit_sha));
    sink.debug(&format!("git ref {}", input.git_ref));

    let branch = BranchClassification::from_ref(&input.git_ref);

    sink.emit("is_release_branch", bool_str(branch.is_release))?;
    sink.emit("is_development_branch", bool_str(branch.is_development))?;
    sink.emit("is_feature_or_pr_branch", bool_str(branch.is_feature_or_pr))?;
    sink.emit("git_branch", &branch.branch_name)?;
    sink.emit("git_branch_safe", &branch.branch_name_safe)?;

    sink.debug(&format!("Executing: {}", git.command_line()));
    let descriptor = git.describe()?;
    sink.debug(&format!("git describe output: {}", descriptor));

    let describe = parse_describe(&descriptor)?;
    sink.debug(&format!("nearest tag {}", describe.tag));
    sink.debug(&format!("commits since tag {}", describe.commits_since_tag));
    sink.debug(&format!("describe object id {}", describe.object_id));

    let version = ResolvedVersion::from_describe(&describe, branch.is_feature_or_pr);

    sink.emit("git_tag", &describe.tag)?;
    sink.emit("version", &version.short_version)?;
    sink.emit("git_commit", &input.commit_sha)?;
    sink.emit("git_describe_object_id", &describe.object_id)?;
    sink.emit("git_commits_since_tag", &describe.commits_since_tag)?;
    sink.emit("git_describe", &descriptor)?;
    sink.emit("long_version", &version.long_version)?;

    sink.info(&format!("Resolved version is \"{}\"", version.long_version));

    Ok(version)
}
