use super::*;

impl BackendClient {
    pub async fn last_updated(&self) -> Result<Freshness> {
        let response = self.get(Endpoint::LastUpdated).await?;
        let value = response
            .json::<Freshness>()
            .await
            .context("Failed to decode last updated value")?;
        Ok(value)
    }

    pub async fn updating(&self) -> Result<bool> {
        let response = self.get(Endpoint::Updating).await?;
        let value = response
            .json::<bool>()
            .await
            .context("Failed to decode updating flag")?;
        Ok(value)
    }
}
