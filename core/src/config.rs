//! # Patch Configuration
//!
//! The operator-supplied description of what to patch: the ordered list of
//! target files and the guard (`PatchSpec`) to inject into each of them.
//!
//! `Default` yields the built-in rate-limit preset, so running with no
//! configuration file patches the public Next.js API routes. A YAML file may
//! override any subset of the keys.

use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Route handlers patched by the built-in preset, relative to the project root.
pub const DEFAULT_TARGETS: &[&str] = &[
    "src/app/api/professional/confirm/[token]/route.ts",
    "src/app/api/proposals/[id]/accept/route.ts",
    "src/app/api/proposals/[id]/reject/route.ts",
    "src/app/api/quotations/[id]/respond/route.ts",
    "src/app/api/webhooks/clerk/route.ts",
    "src/app/api/mapbox/directions/route.ts",
    "src/app/api/mapbox/isochrone/route.ts",
    "src/app/api/upload/route.ts",
];

/// Import line required by the guard snippet.
pub const DEFAULT_IMPORT_LINE: &str =
    "import { rateLimit, RateLimitPresets, createRateLimitError } from '@/lib/rate-limit';";

/// The guard itself. Inserted verbatim.
pub const DEFAULT_SNIPPET: &str = r#"    // Rate Limiting
    const ip = request.headers.get('x-forwarded-for') || request.headers.get('x-real-ip') || 'unknown';
    const rateLimitResult = await rateLimit(ip, RateLimitPresets.PUBLIC_API);
    if (!rateLimitResult.success) {
      return NextResponse.json(createRateLimitError(rateLimitResult), {
        status: 429,
        headers: {
          'X-RateLimit-Limit': rateLimitResult.limit.toString(),
          'X-RateLimit-Remaining': '0',
          'X-RateLimit-Reset': new Date(rateLimitResult.reset).toISOString(),
          'Retry-After': Math.ceil((rateLimitResult.reset - Date.now()) / 1000).toString(),
        }
      });
    }

"#;

/// Call expression introduced by the snippet; its presence means "already patched".
pub const DEFAULT_MARKER: &str = "rateLimit(";

/// Opening of the handler's primary execution block.
pub const DEFAULT_ENTRY_ANCHOR: &str = "try {\n";

/// Exported handler names recognized by the signature fallback.
pub const DEFAULT_HANDLER_VERBS: &[&str] = &["GET", "POST", "PATCH", "DELETE"];

/// What gets injected, and where to look for insertion points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PatchSpec {
    /// Import statement added after the last existing import.
    pub import_line: String,
    /// Code block inserted at the anchor.
    pub snippet: String,
    /// Substring whose presence marks a file as already patched.
    pub marker: String,
    /// Literal text after which the snippet goes (strategy a).
    pub entry_anchor: String,
    /// `export async function <VERB>` names for the fallback (strategy b).
    pub handler_verbs: Vec<String>,
}

impl Default for PatchSpec {
    fn default() -> Self {
        Self {
            import_line: DEFAULT_IMPORT_LINE.to_string(),
            snippet: DEFAULT_SNIPPET.to_string(),
            marker: DEFAULT_MARKER.to_string(),
            entry_anchor: DEFAULT_ENTRY_ANCHOR.to_string(),
            handler_verbs: DEFAULT_HANDLER_VERBS.iter().map(|v| v.to_string()).collect(),
        }
    }
}

/// A full run description: targets plus the guard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PatchConfig {
    /// Files to patch, processed in this order.
    pub targets: Vec<PathBuf>,
    /// The guard to inject (`guard:` in YAML).
    #[serde(rename = "guard")]
    pub spec: PatchSpec,
}

impl Default for PatchConfig {
    fn default() -> Self {
        Self {
            targets: DEFAULT_TARGETS.iter().map(PathBuf::from).collect(),
            spec: PatchSpec::default(),
        }
    }
}

impl PatchConfig {
    /// Parses a YAML document. Missing keys fall back to the built-in preset.
    pub fn from_yaml(yaml: &str) -> AppResult<Self> {
        let config: PatchConfig = serde_yaml::from_str(yaml)
            .map_err(|e| AppError::Config(format!("Invalid configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a YAML configuration file.
    pub fn load(path: &Path) -> AppResult<Self> {
        let yaml = fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config {}: {}", path.display(), e))
        })?;
        Self::from_yaml(&yaml)
    }

    /// Checks the invariants the engine relies on.
    ///
    /// The marker must occur exactly once in the snippet and never in the import
    /// line: a patched file then carries it exactly once, and a file that only
    /// received the import is not mistaken for a patched one on the next run.
    pub fn validate(&self) -> AppResult<()> {
        let spec = &self.spec;

        if self.targets.is_empty() {
            return Err(AppError::Config("No target files configured".into()));
        }
        if spec.import_line.trim().is_empty() {
            return Err(AppError::Config("import_line must not be empty".into()));
        }
        if spec.marker.is_empty() {
            return Err(AppError::Config("marker must not be empty".into()));
        }
        match spec.snippet.matches(spec.marker.as_str()).count() {
            0 => {
                return Err(AppError::Config(format!(
                    "marker '{}' does not occur in the snippet",
                    spec.marker
                )))
            }
            1 => {}
            n => {
                return Err(AppError::Config(format!(
                    "marker '{}' occurs {} times in the snippet, expected once",
                    spec.marker, n
                )))
            }
        }
        if spec.import_line.contains(&spec.marker) {
            return Err(AppError::Config(format!(
                "marker '{}' must not occur in the import line",
                spec.marker
            )));
        }
        if spec.entry_anchor.is_empty() {
            return Err(AppError::Config("entry_anchor must not be empty".into()));
        }
        if spec.handler_verbs.is_empty() {
            return Err(AppError::Config("handler_verbs must not be empty".into()));
        }
        if let Some(bad) = spec
            .handler_verbs
            .iter()
            .find(|v| v.is_empty() || !v.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'))
        {
            return Err(AppError::Config(format!(
                "handler verb '{}' is not a plain identifier",
                bad
            )));
        }

        Ok(())
    }
}
