//! Development server overrides.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevServerOverrides {
    /// Accept requests whose `Host` header is not localhost, so tunnels and
    /// port forwarders can reach the dev server.
    #[serde(default)]
    pub disable_host_check: bool,
}

impl DevServerOverrides {
    pub fn for_local_development() -> Self {
        Self {
            disable_host_check: true,
        }
    }
}
