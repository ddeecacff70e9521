use shared_types::{normalize_collection, AppConfig, AppError, ServiceCatalog, ServiceInfo};

use super::StudioClient;

impl StudioClient {
    /// `GET /services`, normalized.
    #[tracing::instrument(skip(self))]
    pub async fn list_services(&self) -> Result<Vec<ServiceInfo>, AppError> {
        let body = self.send(self.http.get(self.url("services"))).await?;
        Ok(normalize_collection(body))
    }

    /// The catalog forms should offer.
    ///
    /// With `features.remote_services` off this is the built-in table. With
    /// it on, the backend list is used unless it fails or comes back empty.
    pub async fn service_catalog(&self, config: &AppConfig) -> ServiceCatalog {
        if !config.features.remote_services {
            return ServiceCatalog::builtin();
        }
        match self.list_services().await {
            Ok(services) if !services.is_empty() => ServiceCatalog::new(services),
            Ok(_) => {
                tracing::warn!("Backend returned no services; using built-in catalog");
                ServiceCatalog::builtin()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch services; using built-in catalog");
                ServiceCatalog::builtin()
            }
        }
    }
}
