use thiserror::Error;

#[derive(Debug, Error)]
pub enum NodeError {
    #[error("config error: {0}")]
    Config(String),

    #[error("store error: {0}")]
    Store(#[from] factcheck_store::StoreError),

    #[error("provider error: {0}")]
    Provider(#[from] factcheck_verification::ProviderError),

    #[error("HTTP server error: {0}")]
    Rpc(#[from] factcheck_rpc::RpcError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
