// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use rstest::rstest;
use std::fs::File;
use std::time::{Duration, UNIX_EPOCH};
use tempfile::TempDir;

/// A project directory holding a `shots/` screenshot directory.
struct Project {
    root: TempDir,
}

impl Project {
    fn new() -> Self {
        let root = TempDir::new().unwrap();
        fs::create_dir(root.path().join("shots")).unwrap();
        Self { root }
    }

    fn shots(&self) -> PathBuf {
        self.root.path().join("shots")
    }

    /// Write an image whose modification time is `age_secs` after the epoch
    /// base; larger means newer.
    fn image(&self, name: &str, age_secs: u64) -> PathBuf {
        let path = self.shots().join(name);
        fs::write(&path, b"png").unwrap();
        let mtime = UNIX_EPOCH + Duration::from_secs(1_700_000_000 + age_secs);
        File::options()
            .write(true)
            .open(&path)
            .unwrap()
            .set_modified(mtime)
            .unwrap();
        path
    }

    fn summary_path(&self) -> PathBuf {
        self.root.path().join(DEFAULT_FILE_NAME)
    }
}

fn names(paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

#[test]
fn missing_directory_writes_nothing() {
    let project = Project::new();
    let missing = project.root.path().join("nope");

    let err = generate(&missing, &SummaryOptions::default()).unwrap_err();

    assert!(matches!(err, SummaryError::MissingDir(_)), "{err:?}");
    assert!(!project.summary_path().exists());
}

#[test]
fn empty_directory_writes_nothing() {
    let project = Project::new();
    fs::write(project.shots().join("notes.txt"), "not an image").unwrap();

    let err = generate(&project.shots(), &SummaryOptions::default()).unwrap_err();

    assert!(matches!(err, SummaryError::Empty(_)), "{err:?}");
    assert!(!project.summary_path().exists());
}

#[test]
fn images_sorted_newest_first_ignoring_other_files() {
    let project = Project::new();
    project.image("old.png", 1);
    project.image("newest.png", 30);
    project.image("middle.png", 10);
    fs::write(project.shots().join("readme.txt"), "x").unwrap();
    fs::create_dir(project.shots().join("nested.png")).unwrap();

    let images = images_newest_first(&project.shots()).unwrap();
    assert_eq!(names(&images), vec!["newest.png", "middle.png", "old.png"]);
}

#[test]
fn equal_mtimes_fall_back_to_name_order() {
    let project = Project::new();
    project.image("a.png", 5);
    project.image("c.png", 5);
    project.image("b.png", 5);

    let images = images_newest_first(&project.shots()).unwrap();
    assert_eq!(names(&images), vec!["c.png", "b.png", "a.png"]);
}

#[rstest]
#[case(1, 1)]
#[case(6, 6)]
#[case(7, 6)]
#[case(12, 6)]
fn never_lists_more_than_limit(#[case] count: u64, #[case] expected: usize) {
    let project = Project::new();
    for i in 0..count {
        project.image(&format!("shot_{i:02}.png"), i);
    }

    let summary = generate(&project.shots(), &SummaryOptions::default()).unwrap();

    assert_eq!(summary.total, count as usize);
    assert_eq!(summary.entries.len(), expected);
    // Newest (highest index) first
    let newest = format!("Shot {:02}", count - 1);
    assert_eq!(summary.entries[0].title, newest);
    let headings = summary.markdown.matches("### ").count();
    assert_eq!(headings, expected);
}

#[test]
fn markdown_layout() {
    let project = Project::new();
    project.image("particle_life_20260314092653_000123.png", 2);
    project.image("force_matrix_20260314092700_000001.png", 1);

    let summary = generate(&project.shots(), &SummaryOptions::default()).unwrap();

    assert_eq!(summary.path, project.summary_path());
    assert_eq!(
        summary.markdown,
        "## Screenshots\n\n\
         ### Particle Life 20260314092653 000123\n\
         ![Particle Life 20260314092653 000123](shots/particle_life_20260314092653_000123.png)\n\n\
         ### Force Matrix 20260314092700 000001\n\
         ![Force Matrix 20260314092700 000001](shots/force_matrix_20260314092700_000001.png)\n\n"
    );
    assert_eq!(
        fs::read_to_string(project.summary_path()).unwrap(),
        summary.markdown
    );
}

#[test]
fn custom_options() {
    let project = Project::new();
    for i in 0..4 {
        project.image(&format!("s{i}.png"), i);
    }
    let options = SummaryOptions {
        file_name: "GALLERY.md".to_string(),
        limit: 2,
        heading: "Gallery".to_string(),
    };

    let summary = generate(&project.shots(), &options).unwrap();

    assert_eq!(summary.path, project.root.path().join("GALLERY.md"));
    assert!(summary.markdown.starts_with("## Gallery\n\n"));
    assert_eq!(summary.entries.len(), 2);
    assert!(!project.summary_path().exists());
}

#[test]
fn regenerates_in_full() {
    let project = Project::new();
    project.image("first.png", 1);
    generate(&project.shots(), &SummaryOptions::default()).unwrap();

    project.image("second.png", 2);
    let summary = generate(&project.shots(), &SummaryOptions::default()).unwrap();

    let written = fs::read_to_string(project.summary_path()).unwrap();
    assert_eq!(written, summary.markdown);
    assert_eq!(written.matches("## Screenshots").count(), 1);
    assert!(written.find("Second").unwrap() < written.find("First").unwrap());
}

#[test]
fn directory_with_glob_metacharacters() {
    let root = TempDir::new().unwrap();
    let dir = root.path().join("shots [v2]");
    fs::create_dir(&dir).unwrap();
    fs::write(dir.join("a.png"), b"png").unwrap();

    let images = images_newest_first(&dir).unwrap();
    assert_eq!(names(&images), vec!["a.png"]);
}

#[test]
fn render_without_entries_is_heading_only() {
    assert_eq!(render("Screenshots", &[]), "## Screenshots\n\n");
}

#[cfg(unix)]
#[test]
fn dangling_image_link_is_skipped() {
    let project = Project::new();
    project.image("good_a.png", 1);
    project.image("good_b.png", 2);
    std::os::unix::fs::symlink(
        project.root.path().join("gone.png"),
        project.shots().join("zz_dangling.png"),
    )
    .unwrap();

    let summary = generate(&project.shots(), &SummaryOptions::default()).unwrap();

    assert_eq!(summary.total, 2);
    let links: Vec<&str> = summary.entries.iter().map(|e| e.link.as_str()).collect();
    assert_eq!(links, vec!["shots/good_b.png", "shots/good_a.png"]);
}
