use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::args::CliArgs;
use stencil_emitter::EmitOptions;

/// Name of the config file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "stencil.json";

/// The `sandbox` option: a switch, or the policy object to route calls
/// through.
///
/// ```json
/// {"compilerOptions": {"sandbox": true}}
/// {"compilerOptions": {"sandbox": "$this->global->policy"}}
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum SandboxSetting {
    Enabled(bool),
    Policy(String),
}

impl SandboxSetting {
    pub const fn is_enabled(&self) -> bool {
        match self {
            Self::Enabled(enabled) => *enabled,
            Self::Policy(_) => true,
        }
    }

    pub fn policy(&self) -> Option<&str> {
        match self {
            Self::Enabled(_) => None,
            Self::Policy(policy) => Some(policy),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StencilConfig {
    #[serde(default)]
    pub compiler_options: Option<CompilerOptions>,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompilerOptions {
    #[serde(default)]
    pub sandbox: Option<SandboxSetting>,
    #[serde(default)]
    pub sandbox_ref: Option<String>,
    #[serde(default)]
    pub line_markers: Option<bool>,
}

impl CompilerOptions {
    /// Policy expression the sandboxed calls go through, if the file sets one.
    pub fn policy(&self) -> Option<&str> {
        self.sandbox
            .as_ref()
            .and_then(SandboxSetting::policy)
            .or(self.sandbox_ref.as_deref())
    }

    fn check(&self) -> Result<()> {
        if let Some(policy) = self.sandbox.as_ref().and_then(SandboxSetting::policy) {
            if self.sandbox_ref.is_some() {
                bail!("`sandbox` names the policy '{policy}' and `sandboxRef` is set too");
            }
        }
        if let Some(policy) = self.policy()
            && !policy.starts_with('$')
        {
            bail!("sandbox policy must be a PHP expression starting with '$', got '{policy}'");
        }
        Ok(())
    }
}

pub fn parse_config(source: &str) -> Result<StencilConfig> {
    let config: StencilConfig =
        serde_json::from_str(source).context("failed to parse stencil.json")?;
    if let Some(options) = &config.compiler_options {
        options.check()?;
    }
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<StencilConfig> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    parse_config(&source).with_context(|| format!("failed to parse config: {}", path.display()))
}

/// Config file to use: the explicit `--config` path, or `stencil.json` in
/// `cwd` when it exists.
pub fn find_config(args: &CliArgs, cwd: &Path) -> Option<PathBuf> {
    if let Some(path) = &args.config {
        return Some(cwd.join(path));
    }
    let candidate = cwd.join(CONFIG_FILE_NAME);
    candidate.is_file().then_some(candidate)
}

/// Merge file options and command-line flags into emit options. Flags win.
pub fn resolve_emit_options(config: &StencilConfig, args: &CliArgs) -> EmitOptions {
    let mut resolved = EmitOptions::default();

    if let Some(options) = &config.compiler_options {
        if let Some(sandbox) = &options.sandbox {
            resolved.sandbox = sandbox.is_enabled();
        }
        if let Some(policy) = options.policy() {
            resolved.sandbox_ref = policy.to_string();
        }
        if let Some(line_markers) = options.line_markers {
            resolved.line_markers = line_markers;
        }
    }

    if args.sandbox {
        resolved.sandbox = true;
    }
    if let Some(sandbox_ref) = &args.sandbox_ref {
        resolved.sandbox_ref.clone_from(sandbox_ref);
    }
    if args.no_line_markers {
        resolved.line_markers = false;
    }

    resolved
}

#[cfg(test)]
#[path = "../tests/config.rs"]
mod tests;
