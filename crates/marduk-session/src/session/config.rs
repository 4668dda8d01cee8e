use anyhow::{Context, Result};

use crate::device::{BackendVariant, GpuInit};
use crate::gesture::GestureConfig;

/// Environment variable naming the backend family (`vulkan`, `gles`, ...).
pub const BACKEND_ENV: &str = "MARDUK_BACKEND";

/// Session-level configuration.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Backend family; fixed for the life of the session.
    pub variant: BackendVariant,

    pub gpu: GpuInit,

    pub gestures: GestureConfig,

    /// Stop drawing while the activity does not have input focus.
    pub pause_on_focus_loss: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            variant: BackendVariant::default(),
            gpu: GpuInit::default(),
            gestures: GestureConfig::default(),
            pause_on_focus_loss: true,
        }
    }
}

impl SessionConfig {
    /// Default configuration with the variant taken from [`BACKEND_ENV`]
    /// when set.
    pub fn from_env() -> Result<Self> {
        let variant = std::env::var(BACKEND_ENV).ok();
        Ok(Self {
            variant: parse_variant(variant.as_deref())?,
            ..Self::default()
        })
    }
}

fn parse_variant(value: Option<&str>) -> Result<BackendVariant> {
    match value {
        None => Ok(BackendVariant::default()),
        Some(s) => s
            .parse::<BackendVariant>()
            .with_context(|| format!("invalid {BACKEND_ENV} value")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_variant_uses_default() {
        assert_eq!(parse_variant(None).unwrap(), BackendVariant::SwapchainRecreate);
    }

    #[test]
    fn variant_aliases() {
        assert_eq!(parse_variant(Some("GLES")).unwrap(), BackendVariant::ContextSuspend);
        assert_eq!(parse_variant(Some(" vulkan ")).unwrap(), BackendVariant::SwapchainRecreate);
    }

    #[test]
    fn bad_variant_names_the_variable() {
        let err = parse_variant(Some("d3d9")).unwrap_err();
        assert!(format!("{err:#}").contains(BACKEND_ENV));
    }

    #[test]
    fn focus_loss_pauses_by_default() {
        assert!(SessionConfig::default().pause_on_focus_loss);
    }
}
