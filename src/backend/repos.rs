use super::*;

impl BackendClient {
    pub async fn list_repos(&self) -> Result<Vec<RepositoryRecord>> {
        let response = self.get(Endpoint::Repos).await?;
        let repos = response
            .json::<Vec<RepositoryRecord>>()
            .await
            .context("Failed to decode repository list")?;
        Ok(repos)
    }

    /// Asks the backend to refresh its repository cache. The response body is
    /// ignored.
    pub async fn trigger_update(&self) -> Result<()> {
        self.get(Endpoint::TriggerUpdate).await?;
        Ok(())
    }
}
