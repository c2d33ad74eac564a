//! Commit type suggestion from staged file paths.
//!
//! Ordered decision list; the first rule that matches wins. The result only
//! preselects an entry in the type prompt.

const TEST_MARKERS: &[&str] = &[
    ".test.", ".spec.", "__tests__/", "tests/", "test/", "_test.", "_spec.",
];

const CI_MARKERS: &[&str] = &[
    ".github/workflows/",
    ".gitlab-ci.yml",
    ".circleci/",
    ".travis.yml",
    "Jenkinsfile",
    "azure-pipelines.yml",
    ".buildkite/",
];

const LOCKFILES: &[&str] = &[
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    "bun.lockb",
    "Cargo.lock",
    "Gemfile.lock",
    "poetry.lock",
    "composer.lock",
    "go.sum",
];

const CONFIG_FILES: &[&str] = &[
    "package.json",
    "tsconfig.json",
    "jsconfig.json",
    "Cargo.toml",
    "pyproject.toml",
    "go.mod",
    ".eslintrc",
    ".eslintrc.js",
    ".eslintrc.json",
    ".prettierrc",
    ".editorconfig",
    ".gitignore",
    ".npmrc",
    "vite.config.ts",
    "vite.config.js",
    "webpack.config.js",
    "babel.config.js",
    "Dockerfile",
    "Makefile",
];

const SOURCE_DIRS: &[&str] = &[
    "src/components/",
    "src/features/",
    "src/pages/",
    "src/views/",
    "src/api/",
    "src/lib/",
    "src/hooks/",
    "src/services/",
    "src/styles/",
    "src/types/",
];

const STYLE_MARKERS: &[&str] = &[".css", ".scss", ".sass", ".less", "styles/"];

const TYPE_MARKERS: &[&str] = &[".d.ts", "types/"];

const PERF_MARKERS: &[&str] = &["perf/", "performance/", "benches/", "benchmarks/"];

const SECURITY_MARKERS: &[&str] = &["security/"];

const SOURCE_ROOT: &str = "src/";

fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Markers ending in `/` name a directory and only match whole path segments.
fn contains_any(path: &str, markers: &[&str]) -> bool {
    markers.iter().any(|m| {
        if m.ends_with('/') {
            path.starts_with(m) || path.contains(&format!("/{m}"))
        } else {
            path.contains(m)
        }
    })
}

fn any_path(paths: &[&str], pred: impl Fn(&str) -> bool) -> bool {
    paths.iter().any(|p| pred(p))
}

/// Guess a commit type for the given staged paths.
///
/// Returns `None` when nothing is staged or no rule applies.
pub fn suggest_commit_type<S: AsRef<str>>(staged_paths: &[S]) -> Option<&'static str> {
    let normalized: Vec<String> = staged_paths
        .iter()
        .map(|p| p.as_ref().replace('\\', "/"))
        .collect();
    let paths: Vec<&str> = normalized.iter().map(String::as_str).collect();

    if paths.is_empty() {
        return None;
    }

    if paths.iter().all(|p| p.ends_with(".md")) {
        return Some("docs");
    }

    if any_path(&paths, |p| contains_any(p, TEST_MARKERS)) {
        return Some("test");
    }
    if any_path(&paths, |p| contains_any(p, CI_MARKERS)) {
        return Some("ci");
    }
    if any_path(&paths, |p| LOCKFILES.contains(&file_name(p))) {
        return Some("build");
    }
    if any_path(&paths, |p| CONFIG_FILES.contains(&file_name(p))) {
        return Some("chore");
    }

    if any_path(&paths, |p| SOURCE_DIRS.iter().any(|d| p.starts_with(d))) {
        if any_path(&paths, |p| contains_any(p, STYLE_MARKERS)) {
            return Some("style");
        }
        if any_path(&paths, |p| contains_any(p, TYPE_MARKERS)) {
            return Some("refactor");
        }
        return Some("feat");
    }

    if any_path(&paths, |p| contains_any(p, PERF_MARKERS)) {
        return Some("perf");
    }
    if any_path(&paths, |p| contains_any(p, SECURITY_MARKERS)) {
        return Some("security");
    }

    if any_path(&paths, |p| p.starts_with(SOURCE_ROOT)) {
        return Some("feat");
    }

    None
}
