//! Home directory discovery and path expansion

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CliError, Result};

pub const DEFAULT_APP_HOME: &str = ".aergo";
pub const HOME_ENV: &str = "AG_HOME";

/// Pick the home directory.
///
/// Order: explicit flag, `AG_HOME`, `$HOME/.aergo`, `$USERPROFILE/.aergo`,
/// then `.aergo` relative to the working directory.
pub fn resolve_home(explicit: Option<&str>, lookup: &dyn Fn(&str) -> Option<String>) -> PathBuf {
    if let Some(home) = explicit.filter(|h| !h.is_empty()) {
        return PathBuf::from(home);
    }
    if let Some(home) = lookup(HOME_ENV).filter(|h| !h.is_empty()) {
        return PathBuf::from(home);
    }
    for var in ["HOME", "USERPROFILE"] {
        if let Some(base) = lookup(var).filter(|h| !h.is_empty()) {
            return Path::new(&base).join(DEFAULT_APP_HOME);
        }
    }
    PathBuf::from(DEFAULT_APP_HOME)
}

/// Create `dir` (mode 0755) when missing
pub fn ensure_dir(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(dir).map_err(|e| {
        CliError::Config(format!("cannot create home directory {}: {e}", dir.display()))
    })?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(dir, fs::Permissions::from_mode(0o755)).map_err(|e| {
            CliError::Config(format!("cannot set mode of {}: {e}", dir.display()))
        })?;
    }
    Ok(())
}

fn is_var_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Expand `${VAR}` and `$VAR`. Unknown variables expand to nothing.
pub fn expand_vars(input: &str, lookup: &dyn Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        if let Some(braced) = after.strip_prefix('{') {
            match braced.find('}') {
                Some(end) => {
                    out.push_str(&lookup(&braced[..end]).unwrap_or_default());
                    rest = &braced[end + 1..];
                }
                None => {
                    out.push_str(&rest[pos..]);
                    rest = "";
                }
            }
        } else {
            let len = after.find(|c: char| !is_var_char(c)).unwrap_or(after.len());
            if len == 0 {
                out.push('$');
            } else {
                out.push_str(&lookup(&after[..len]).unwrap_or_default());
            }
            rest = &after[len..];
        }
    }
    out.push_str(rest);
    out
}

/// Expand a path against the chosen home first, then the process environment
pub fn expand_path(path: &str, home: &Path, lookup: &dyn Fn(&str) -> Option<String>) -> String {
    let home = home.to_string_lossy().into_owned();
    let with_home = |name: &str| -> Option<String> {
        match name {
            "HOME" | "home" => Some(home.clone()),
            other => lookup(other),
        }
    };
    let expanded = expand_vars(path, &with_home);
    expanded.replace('\\', "/")
}

/// Process environment lookup
pub fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}
