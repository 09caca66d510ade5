use std::sync::Arc;

use crate::config::ActionConfig;
use crate::rpc::RpcClient;

/// Shared per-process state handed to every request handler.
///
/// Nothing here is mutable: requests are independent and touch no shared
/// mutable state.
pub struct AppState {
    pub config: ActionConfig,
    pub rpc: Arc<RpcClient>,
}

impl AppState {
    pub fn new(config: ActionConfig, rpc: Arc<RpcClient>) -> Self {
        Self { config, rpc }
    }
}
