use async_trait::async_trait;

/// Revokes an access token at the identity service
#[async_trait]
pub trait SessionRevoker: Send + Sync {
    async fn revoke(&self, access_token: &str) -> hs_core::Result<()>;
}
