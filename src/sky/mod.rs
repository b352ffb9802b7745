//! Rendering of the `copy.bara.sky` document.
//!
//! The document defines two Copybara workflows:
//! - `push` mirrors the source of truth to the destination, restoring the
//!   original authors and applying the push transformations (or, when none
//!   are given, the reverse of the PR transformations).
//! - `pr` proposes destination changes back to the source of truth as a
//!   change request, saving the original author and replacing the commit
//!   message with the PR template.
//!
//! Keyword names (`core.workflow`, `git.origin`, `authoring.pass_thru`, ...)
//! belong to Copybara's own parser and must be reproduced verbatim.
//! Rendering is a pure function of its input.

pub mod transform;


pub use transform::{Side, TransformRule, render_transformations};

/// Path of the working directory inside the container, used as the push
/// origin.
pub const LOCAL_SOT: &str = "file:///usr/src/app";

/// Placeholder in the PR template replaced by the PR message.
pub const PR_MESSAGE_PLACEHOLDER: &str = "${PR_MESSAGE}";

/// Placeholder in the PR template replaced by the destination `owner/repo`.
pub const DESTINATION_REPO_REF_PLACEHOLDER: &str = "${DESTINATION_REPO_REF}";

/// Fully resolved values for one document.
///
/// Glob lists are pre-rendered with [`quoted_list`] and transformation blocks
/// with [`render_transformations`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkyInput<'a> {
    pub sot_repo: &'a str,
    pub sot_branch: &'a str,
    pub destination_repo: &'a str,
    pub destination_branch: &'a str,
    pub committer: &'a str,
    pub local_sot: &'a str,
    pub push_include: &'a str,
    pub push_exclude: &'a str,
    pub push_transformations: &'a str,
    pub pr_include: &'a str,
    pub pr_exclude: &'a str,
    pub pr_transformations: &'a str,
    pub pr_message: &'a str,
    pub pr_template: &'a str,
    pub pr_branch_name_template: &'a str,
}

/// Render a glob list as comma-separated Starlark string literals.
///
/// Empty entries are dropped; an empty list renders as the empty string.
pub fn quoted_list<S: AsRef<str>>(globs: &[S]) -> String {
    let globs: Vec<&str> = globs
        .iter()
        .map(AsRef::as_ref)
        .filter(|g| !g.is_empty())
        .collect();

    if globs.is_empty() {
        String::new()
    } else {
        format!("\"{}\"", globs.join("\",\""))
    }
}

/// `owner/repo` for a GitHub URL in either SSH or HTTPS form.
pub fn repo_ref(url: &str) -> &str {
    let path = url
        .strip_prefix("git@github.com:")
        .or_else(|| url.strip_prefix("https://github.com/"))
        .unwrap_or(url);
    path.strip_suffix(".git").unwrap_or(path)
}

/// Substitute the PR template placeholders.
pub fn resolve_pr_template(template: &str, message: &str, destination_repo: &str) -> String {
    template
        .replace(PR_MESSAGE_PLACEHOLDER, message)
        .replace(DESTINATION_REPO_REF_PLACEHOLDER, repo_ref(destination_repo))
}

/// Render the complete `copy.bara.sky` document.
pub fn render(input: &SkyInput<'_>) -> String {
    let pr_template =
        resolve_pr_template(input.pr_template, input.pr_message, input.destination_repo);

    let pr_branch = if input.pr_branch_name_template.is_empty() {
        ""
    } else {
        "\n        pr_branch = PR_BRANCH_NAME_TEMPLATE,"
    };

    format!(
        r#"
# Variables
SOT_REPO = "{sot_repo}"
SOT_BRANCH = "{sot_branch}"
DESTINATION_REPO = "{destination_repo}"
DESTINATION_BRANCH = "{destination_branch}"
COMMITTER = "{committer}"
LOCAL_SOT = "{local_sot}"

PUSH_INCLUDE = [{push_include}]
PUSH_EXCLUDE = [{push_exclude}]
PUSH_TRANSFORMATIONS = [{push_transformations}
]

PR_INCLUDE = [{pr_include}]
PR_EXCLUDE = [{pr_exclude}]
PR_TRANSFORMATIONS = [{pr_transformations}
]
PR_TEMPLATE = """{pr_template}"""
PR_BRANCH_NAME_TEMPLATE = "{pr_branch_name_template}"

# Push workflow
core.workflow(
    name = "push",
    origin = git.origin(
        url = LOCAL_SOT if LOCAL_SOT else SOT_REPO,
        ref = SOT_BRANCH,
    ),
    destination = git.github_destination(
        url = DESTINATION_REPO,
        push = DESTINATION_BRANCH,
    ),
    origin_files = glob(PUSH_INCLUDE, exclude = PUSH_EXCLUDE),
    authoring = authoring.pass_thru(default = COMMITTER),
    mode = "ITERATIVE",
    transformations = [
        metadata.restore_author("ORIGINAL_AUTHOR", search_all_changes = True),
        metadata.expose_label("COPYBARA_INTEGRATE_REVIEW"),
    ] + PUSH_TRANSFORMATIONS if PUSH_TRANSFORMATIONS else core.reverse(PR_TRANSFORMATIONS),
)

# Pull Request workflow
core.workflow(
    name = "pr",
    origin = git.github_pr_origin(
        url = DESTINATION_REPO,
        branch = DESTINATION_BRANCH,
    ),
    destination = git.github_pr_destination(
        url = SOT_REPO,
        destination_ref = SOT_BRANCH,
        integrates = [],{pr_branch}
    ),
    destination_files = glob(PUSH_INCLUDE, exclude = PUSH_EXCLUDE),
    origin_files = glob(PR_INCLUDE if PR_INCLUDE else ["**"], exclude = PR_EXCLUDE),
    authoring = authoring.pass_thru(default = COMMITTER),
    mode = "CHANGE_REQUEST",
    set_rev_id = False,
    transformations = [
        metadata.save_author("ORIGINAL_AUTHOR"),
        metadata.replace_message(PR_TEMPLATE),
    ] + PR_TRANSFORMATIONS,
)
"#,
        sot_repo = input.sot_repo,
        sot_branch = input.sot_branch,
        destination_repo = input.destination_repo,
        destination_branch = input.destination_branch,
        committer = input.committer,
        local_sot = input.local_sot,
        push_include = input.push_include,
        push_exclude = input.push_exclude,
        push_transformations = input.push_transformations,
        pr_include = input.pr_include,
        pr_exclude = input.pr_exclude,
        pr_transformations = input.pr_transformations,
        pr_template = pr_template,
        pr_branch_name_template = input.pr_branch_name_template,
        pr_branch = pr_branch,
    )
}
