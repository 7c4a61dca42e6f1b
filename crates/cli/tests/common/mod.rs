// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

//! Shared helpers for CLI integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// Writes the last argument as a fake PNG.
pub const WRITE_LAST_ARG: &str = r#"for last; do :; done; printf 'png' > "$last""#;

/// Hyprland client list containing the default application.
pub const CLIENTS: &str =
    r#"[{"class": "particlelife", "title": "Particle Life", "at": [10, 20], "size": [640, 480]}]"#;

/// Variables that would leak the developer's environment into a test.
const ISOLATED_VARS: &[&str] = &[
    "APPSHOT_OUTPUT_DIR",
    "APPSHOT_APP",
    "APPSHOT_BACKEND",
    "APPSHOT_CONFIG",
    "APPSHOT_LOG",
    "APPSHOT_SCREENCAPTURE_BIN",
    "APPSHOT_OSASCRIPT_BIN",
    "APPSHOT_GRIM_BIN",
    "APPSHOT_SLURP_BIN",
    "APPSHOT_HYPRCTL_BIN",
];

/// A scratch working directory plus a directory of fake programs.
pub struct Workspace {
    pub cwd: TempDir,
    pub bin: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            cwd: TempDir::new().unwrap(),
            bin: TempDir::new().unwrap(),
        }
    }

    /// `appshot` running in the scratch directory with a clean environment.
    #[allow(deprecated)] // Command::cargo_bin is deprecated but still functional
    pub fn appshot(&self) -> Command {
        let mut cmd = Command::cargo_bin("appshot").unwrap();
        cmd.current_dir(self.cwd.path());
        for var in ISOLATED_VARS {
            cmd.env_remove(var);
        }
        cmd
    }

    pub fn output_dir(&self) -> PathBuf {
        self.cwd.path().join("ParticleLifeScreenshots")
    }

    /// PNG file names in the default output directory, sorted.
    pub fn screenshots(&self) -> Vec<String> {
        let Ok(entries) = std::fs::read_dir(self.output_dir()) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|name| name.ends_with(".png"))
            .collect();
        names.sort();
        names
    }

    /// Create an executable script that logs its arguments then runs `body`.
    #[cfg(unix)]
    pub fn program(&self, name: &str, body: &str) -> String {
        use std::os::unix::fs::PermissionsExt;

        let path = self.bin.path().join(name);
        let script = format!(
            "#!/bin/sh\nprintf '%s\\n' \"$*\" >> '{}'\n{}\n",
            self.log_path(name).display(),
            body
        );
        std::fs::write(&path, script).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path.to_string_lossy().into_owned()
    }

    /// Argument lines a fake program was called with.
    pub fn calls(&self, name: &str) -> Vec<String> {
        std::fs::read_to_string(self.log_path(name))
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    fn log_path(&self, name: &str) -> PathBuf {
        self.bin.path().join(format!("{name}.log"))
    }
}

/// Write a placeholder image, creating parent directories.
pub fn touch(path: &Path) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, b"png").unwrap();
}

/// Whether a name looks like `<tag>_<14 digits>_<6 digits>.png`, optionally
/// with a `-N` collision suffix.
pub fn is_capture_name(name: &str, tag: &str) -> bool {
    let Some(rest) = name
        .strip_prefix(tag)
        .and_then(|r| r.strip_prefix('_'))
        .and_then(|r| r.strip_suffix(".png"))
    else {
        return false;
    };
    let rest = rest.split('-').next().unwrap_or_default();
    let Some((date, micros)) = rest.split_once('_') else {
        return false;
    };
    date.len() == 14
        && micros.len() == 6
        && date.chars().chain(micros.chars()).all(|c| c.is_ascii_digit())
}
