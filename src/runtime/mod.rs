//! Runtime abstraction for system operations.
//!
//! This module provides a trait-based abstraction over every OS touchpoint of
//! the bootstrapper, enabling dependency injection and testability.
//!
//! # Structure
//!
//! - `env` - Environment variables and privilege detection
//! - `fs` - File system operations (read, remove, permissions)
//! - `process` - Child processes, `uname`, and process replacement

mod env;
mod fs;
mod process;

use anyhow::Result;
use std::env as std_env;
use std::path::Path;

/// Captured result of a finished child process.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Stdout and stderr joined, skipping empty streams.
    pub fn combined(&self) -> String {
        match (self.stdout.trim().is_empty(), self.stderr.trim().is_empty()) {
            (false, false) => format!("{}\n{}", self.stdout.trim_end(), self.stderr.trim_end()),
            (false, true) => self.stdout.trim_end().to_string(),
            (true, false) => self.stderr.trim_end().to_string(),
            (true, true) => String::new(),
        }
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait Runtime: Send + Sync {
    // Environment
    fn env_var(&self, key: &str) -> Result<String, std_env::VarError>;

    // File system
    fn read_to_string(&self, path: &Path) -> Result<String>;
    fn append(&self, path: &Path, contents: &[u8]) -> Result<()>;
    fn create_dir_all(&self, path: &Path) -> Result<()>;
    fn remove_file(&self, path: &Path) -> Result<()>;
    fn exists(&self, path: &Path) -> bool;
    fn is_dir(&self, path: &Path) -> bool;
    fn is_executable(&self, path: &Path) -> bool;

    /// Set file permissions (mode) on Unix systems. No-op on Windows.
    fn set_permissions(&self, path: &Path, mode: u32) -> Result<()>;

    // Processes
    /// Run a child process to completion, capturing its output.
    fn run_command(&self, program: &Path, args: &[String]) -> Result<CommandOutput>;

    /// Replace the current process image with the given program. Returns only
    /// on failure (on non-Unix systems the child is awaited and its exit code
    /// becomes this process's own, so this still never returns on success).
    fn exec_replace(&self, program: &Path, args: &[String]) -> Result<()>;

    // System identity
    fn uname_kernel(&self) -> Result<String>;
    fn uname_machine(&self) -> Result<String>;

    // Privilege
    fn is_privileged(&self) -> bool;
}

pub struct RealRuntime;

impl Runtime for RealRuntime {
    fn env_var(&self, key: &str) -> Result<String, std_env::VarError> {
        self.env_var_impl(key)
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.read_to_string_impl(path)
    }

    fn append(&self, path: &Path, contents: &[u8]) -> Result<()> {
        self.append_impl(path, contents)
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        self.create_dir_all_impl(path)
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        self.remove_file_impl(path)
    }

    fn exists(&self, path: &Path) -> bool {
        self.exists_impl(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.is_dir_impl(path)
    }

    fn is_executable(&self, path: &Path) -> bool {
        self.is_executable_impl(path)
    }

    fn set_permissions(&self, path: &Path, mode: u32) -> Result<()> {
        self.set_permissions_impl(path, mode)
    }

    fn run_command(&self, program: &Path, args: &[String]) -> Result<CommandOutput> {
        self.run_command_impl(program, args)
    }

    fn exec_replace(&self, program: &Path, args: &[String]) -> Result<()> {
        self.exec_replace_impl(program, args)
    }

    fn uname_kernel(&self) -> Result<String> {
        self.uname_impl("-s")
    }

    fn uname_machine(&self) -> Result<String> {
        self.uname_impl("-m")
    }

    fn is_privileged(&self) -> bool {
        self.is_privileged_impl()
    }
}
