//! Golden tests for sitefix
//!
//! These tests run the binary over a copy of the fixture site and compare every
//! page against the expected output under `tests/fixtures/expected`.
//! Golden tests ensure:
//! - Link rewriting and translation produce byte-exact pages
//! - Files outside the page pattern are never touched
//! - A second run over processed output is a fixed point

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use walkdir::WalkDir;

/// Get the path to the fixtures directory
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Copy the fixture site into a scratch directory
fn scratch_site() -> TempDir {
    let temp = tempfile::tempdir().unwrap();
    let source = fixtures_dir().join("site");

    for entry in WalkDir::new(&source) {
        let entry = entry.unwrap();
        let relative = entry.path().strip_prefix(&source).unwrap();
        let target = temp.path().join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).unwrap();
        } else {
            fs::copy(entry.path(), &target).unwrap();
        }
    }

    temp
}

fn sitefix_cmd(root: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("sitefix"));
    cmd.arg("--root").arg(root).arg("--no-color");
    cmd
}

fn read(root: &Path, relative: &str) -> String {
    fs::read_to_string(root.join(relative))
        .unwrap_or_else(|e| panic!("failed to read {}: {}", relative, e))
}

fn expected(relative: &str) -> String {
    read(&fixtures_dir().join("expected"), relative)
}

fn original(relative: &str) -> String {
    read(&fixtures_dir().join("site"), relative)
}

const TUTORIAL_PAGES: &[&str] = &[
    "swiftui/01-tutorial.html",
    "mapkit/01-tutorial.html",
    "en/swiftui/01-tutorial.html",
    "en/mapkit/01-tutorial.html",
];

const UNTOUCHED_BY_LINKS: &[&str] = &["index.html", "swiftui/index.html", "en/index.html"];

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Links Tests ====================

    #[test]
    fn golden_links_output_matches_expected() {
        let site = scratch_site();

        sitefix_cmd(site.path()).arg("links").assert().success();

        for page in TUTORIAL_PAGES {
            assert_eq!(read(site.path(), page), expected(page), "page {}", page);
        }
        for page in UNTOUCHED_BY_LINKS {
            assert_eq!(read(site.path(), page), original(page), "page {}", page);
        }
    }

    #[test]
    fn golden_links_log_lines() {
        let site = scratch_site();

        let assert = sitefix_cmd(site.path()).arg("links").assert().success();
        let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
        let lines: Vec<_> = stdout.lines().collect();

        assert_eq!(
            lines,
            vec![
                "mapkit (ko) mapkit/01-tutorial.html updated",
                "swiftui (ko) swiftui/01-tutorial.html updated",
                "mapkit (en) en/mapkit/01-tutorial.html updated",
                "swiftui (en) en/swiftui/01-tutorial.html updated",
                "Done",
            ]
        );
    }

    #[test]
    fn golden_links_second_run_is_fixed_point() {
        let site = scratch_site();

        sitefix_cmd(site.path()).arg("links").assert().success();
        let assert = sitefix_cmd(site.path()).arg("links").assert().success();
        let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();

        assert_eq!(stdout.matches("unchanged").count(), TUTORIAL_PAGES.len());
        for page in TUTORIAL_PAGES {
            assert_eq!(read(site.path(), page), expected(page), "page {}", page);
        }
    }

    // ==================== Translate Tests ====================

    #[test]
    fn golden_translate_output_matches_expected() {
        let site = scratch_site();

        sitefix_cmd(site.path())
            .arg("translate")
            .assert()
            .success();

        assert_eq!(read(site.path(), "en/index.html"), expected("en/index.html"));
        for page in TUTORIAL_PAGES {
            assert_eq!(read(site.path(), page), original(page), "page {}", page);
        }
    }

    #[test]
    fn golden_translate_second_run_is_fixed_point() {
        let site = scratch_site();

        sitefix_cmd(site.path()).arg("translate").assert().success();
        sitefix_cmd(site.path())
            .arg("translate")
            .assert()
            .success()
            .stdout("en/index.html unchanged\n");

        assert_eq!(read(site.path(), "en/index.html"), expected("en/index.html"));
    }

    // ==================== Combined ====================

    #[test]
    fn golden_both_passes_in_either_order() {
        let first = scratch_site();
        sitefix_cmd(first.path()).arg("links").assert().success();
        sitefix_cmd(first.path()).arg("translate").assert().success();

        let second = scratch_site();
        sitefix_cmd(second.path()).arg("translate").assert().success();
        sitefix_cmd(second.path()).arg("links").assert().success();

        for page in TUTORIAL_PAGES.iter().chain(["en/index.html"].iter()) {
            assert_eq!(read(first.path(), page), read(second.path(), page));
            assert_eq!(read(first.path(), page), expected(page));
        }
    }
}
