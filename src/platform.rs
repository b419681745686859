//! # Platform Integration
//!
//! Opening files in a viewer and sending them to a printer differ by
//! operating system. The pipeline only ever produces a path; everything
//! platform-specific sits behind [`Platform`], chosen once at startup.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::error::ShelfError;

/// Open/print capabilities of the host.
pub trait Platform {
    /// Short name for messages.
    fn name(&self) -> &'static str;

    /// Whether a graphical viewer can be expected to work.
    fn has_graphical_display(&self) -> bool;

    /// Open `path` in the default viewer.
    fn open_file(&self, path: &Path) -> Result<(), ShelfError>;

    /// Send `path` to the default printer.
    fn print_file(&self, path: &Path) -> Result<(), ShelfError>;

    /// Step-by-step instructions for printing `path` by hand.
    fn print_instructions(&self, path: &Path) -> Vec<String>;
}

/// Pick the implementation for the running OS.
pub fn detect() -> Box<dyn Platform> {
    if cfg!(target_os = "windows") {
        Box::new(Windows)
    } else if cfg!(target_os = "macos") {
        Box::new(MacOs)
    } else {
        Box::new(Unix::from_env())
    }
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

fn absolute_str(path: &Path) -> String {
    absolute(path).to_string_lossy().into_owned()
}

fn run(program: &str, args: &[&str]) -> Result<(), ShelfError> {
    debug!(program, ?args, "running platform command");
    let status = Command::new(program)
        .args(args)
        .status()
        .map_err(|e| ShelfError::Platform(format!("cannot run {}: {}", program, e)))?;
    if status.success() {
        Ok(())
    } else {
        Err(ShelfError::Platform(format!("{} exited with {}", program, status)))
    }
}

/// Linux and other Unix desktops (`xdg-open`, `lpr`).
#[derive(Debug, Clone, Copy)]
pub struct Unix {
    display: bool,
}

impl Unix {
    /// Graphical when `DISPLAY` or `WAYLAND_DISPLAY` is set.
    pub fn from_env() -> Self {
        let set = |var: &str| std::env::var_os(var).is_some_and(|v| !v.is_empty());
        Self {
            display: set("DISPLAY") || set("WAYLAND_DISPLAY"),
        }
    }

    pub fn headless() -> Self {
        Self { display: false }
    }
}

impl Platform for Unix {
    fn name(&self) -> &'static str {
        "unix"
    }

    fn has_graphical_display(&self) -> bool {
        self.display
    }

    fn open_file(&self, path: &Path) -> Result<(), ShelfError> {
        if !self.display {
            return Err(ShelfError::Platform("no graphical display available".to_string()));
        }
        run("xdg-open", &[absolute_str(path).as_str()])
    }

    fn print_file(&self, path: &Path) -> Result<(), ShelfError> {
        run("lpr", &[absolute_str(path).as_str()])
    }

    fn print_instructions(&self, path: &Path) -> Vec<String> {
        let abs = absolute(path);
        vec![
            format!("1. Open the image file at: {}", abs.display()),
            "2. Use your system's print dialog to print it".to_string(),
            "   OR".to_string(),
            format!("   Run this command: lpr {}", abs.display()),
        ]
    }
}

/// macOS (`open`, `lpr`).
#[derive(Debug, Clone, Copy)]
pub struct MacOs;

impl Platform for MacOs {
    fn name(&self) -> &'static str {
        "macos"
    }

    fn has_graphical_display(&self) -> bool {
        true
    }

    fn open_file(&self, path: &Path) -> Result<(), ShelfError> {
        run("open", &[absolute_str(path).as_str()])
    }

    fn print_file(&self, path: &Path) -> Result<(), ShelfError> {
        run("lpr", &[absolute_str(path).as_str()])
    }

    fn print_instructions(&self, path: &Path) -> Vec<String> {
        let abs = absolute(path);
        vec![
            format!("1. Open the image file at: {}", abs.display()),
            "2. Choose File > Print in Preview".to_string(),
            "   OR".to_string(),
            format!("   Run this command: lpr {}", abs.display()),
        ]
    }
}

/// Windows (`cmd /C start`, PowerShell `Start-Process -Verb Print`).
#[derive(Debug, Clone, Copy)]
pub struct Windows;

impl Windows {
    fn print_command(path: &Path) -> String {
        format!(
            "Start-Process -FilePath \"{}\" -Verb Print",
            absolute(path).display()
        )
    }
}

impl Platform for Windows {
    fn name(&self) -> &'static str {
        "windows"
    }

    fn has_graphical_display(&self) -> bool {
        true
    }

    fn open_file(&self, path: &Path) -> Result<(), ShelfError> {
        run("cmd", &["/C", "start", "", absolute_str(path).as_str()])
    }

    fn print_file(&self, path: &Path) -> Result<(), ShelfError> {
        run("powershell", &["-NoProfile", "-Command", Self::print_command(path).as_str()])
    }

    fn print_instructions(&self, path: &Path) -> Vec<String> {
        vec![
            format!("1. Open the image file at: {}", absolute(path).display()),
            "2. Right-click and select 'Print'".to_string(),
            "   OR".to_string(),
            format!("   Run this command: {}", Self::print_command(path)),
        ]
    }
}
