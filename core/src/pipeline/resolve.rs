//! Config resolution: CLI values, then the run config file, then defaults.
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;

use super::mode::Mode;
use super::params::{set_value, ExecutionFlags, ModeParams};
use crate::config::{PipelineConfig, StageSections, QPARAM_KEY};
use crate::error::ConfigError;

/// Install location used when nothing else names one.
pub const DEFAULT_SCRIPTS_DIR: &str = "/opt/software/Pandora";

/// What the user asked for, before the config file is consulted.
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub identifier: String,
    pub config_path: Option<PathBuf>,
    /// `None` selects the mode's default stages.
    pub steps: Option<String>,
    pub flags: ExecutionFlags,
    pub params: ModeParams,
    pub scripts_dir: PathBuf,
}

/// Fully resolved settings for one run. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunConfiguration {
    identifier: String,
    params: ModeParams,
    steps: String,
    flags: ExecutionFlags,
    scheduler_overrides: BTreeMap<char, Vec<String>>,
    scripts_dir: PathBuf,
}

impl RunConfiguration {
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn mode(&self) -> Mode {
        self.params.mode()
    }

    pub fn params(&self) -> &ModeParams {
        &self.params
    }

    /// Raw stage selection, before expansion.
    pub fn steps(&self) -> &str {
        &self.steps
    }

    pub fn flags(&self) -> ExecutionFlags {
        self.flags
    }

    /// Submission prefix from the config file for `code`, split into
    /// shell words and used verbatim.
    pub fn scheduler_override(&self, code: char) -> Option<&[String]> {
        self.scheduler_overrides.get(&code).map(Vec::as_slice)
    }

    pub fn scripts_dir(&self) -> &Path {
        &self.scripts_dir
    }
}

pub struct ConfigResolver;

impl ConfigResolver {
    /// Read the run config file named in the request, if any, and resolve.
    pub fn resolve(request: RunRequest) -> Result<RunConfiguration, ConfigError> {
        let sections = match &request.config_path {
            Some(path) => StageSections::load(path)?,
            None => StageSections::default(),
        };
        Self::resolve_with_sections(request, &sections)
    }

    pub fn resolve_with_sections(
        request: RunRequest,
        sections: &StageSections,
    ) -> Result<RunConfiguration, ConfigError> {
        let RunRequest {
            identifier,
            config_path: _,
            steps,
            flags,
            mut params,
            scripts_dir,
        } = request;
        let mode = params.mode();

        params.merge_sections(sections);

        if let ModeParams::Scan(scan) = &mut params {
            if let Some(bam) = set_value(&scan.bam) {
                scan.bam = Some(absolutize(bam)?);
            }
        }

        let mut scheduler_overrides = BTreeMap::new();
        for &code in mode.overridable_stages() {
            let section = mode.section(code);
            if let Some(prefix) = sections.get(&section, QPARAM_KEY) {
                let words = shlex::split(prefix).ok_or_else(|| ConfigError::SchedulerOverride {
                    section: section.clone(),
                    value: prefix.to_string(),
                })?;
                scheduler_overrides.insert(code, words);
            }
        }

        let config = RunConfiguration {
            identifier,
            params,
            steps: steps.unwrap_or_else(|| mode.default_steps().to_string()),
            flags,
            scheduler_overrides,
            scripts_dir,
        };
        tracing::debug!(?config, "resolved run configuration");
        Ok(config)
    }
}

/// Pick the install directory holding the stage programs.
///
/// Order: explicit CLI value, app config (or its env override), the
/// directory of the running executable under the hpc profile, then
/// [`DEFAULT_SCRIPTS_DIR`].
pub fn resolve_scripts_dir(
    cli: Option<&Path>,
    app: &PipelineConfig,
    hpc: bool,
    exe_dir: Option<&Path>,
) -> PathBuf {
    if let Some(dir) = cli {
        return dir.to_path_buf();
    }
    if let Some(dir) = app.scripts_dir.as_deref().filter(|d| !d.trim().is_empty()) {
        return PathBuf::from(shellexpand::tilde(dir).as_ref());
    }
    if hpc {
        if let Some(dir) = exe_dir {
            return dir.to_path_buf();
        }
    }
    PathBuf::from(DEFAULT_SCRIPTS_DIR)
}

/// `~` expansion plus a lexical absolute path; symlinks are left alone.
pub fn absolutize(path: &str) -> Result<String, ConfigError> {
    let expanded = shellexpand::tilde(path);
    let candidate = Path::new(expanded.as_ref());
    let joined = if candidate.is_absolute() {
        candidate.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(|e| ConfigError::Path {
                path: path.to_string(),
                reason: e.to_string(),
            })?
            .join(candidate)
    };
    Ok(normalize_lexically(&joined).to_string_lossy().to_string())
}

fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
