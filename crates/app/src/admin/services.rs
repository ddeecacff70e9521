use shared_types::{AppError, PackageInfo, ServiceCatalog, ServiceInfo};

use super::nothing_pending;
use crate::review::{ConfirmationRequest, Tone};

/// Cover image given to a service created without one.
pub const DEFAULT_SERVICE_IMAGE: &str = "https://placehold.co/600x400?text=No+Image";

/// A catalog deletion awaiting confirmation.
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceCommand {
    DeleteService { key: String },
    DeletePackage { key: String, package: String },
}

/// Split a comma-separated feature list, dropping blanks.
pub fn parse_features(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(str::to_string)
        .collect()
}

/// Lowercase alphanumeric key derived from a display name.
fn slugify(name: &str) -> String {
    let mut key = String::new();
    for c in name.trim().chars() {
        if c.is_ascii_alphanumeric() {
            key.push(c.to_ascii_lowercase());
        } else if !key.is_empty() && !key.ends_with('-') {
            key.push('-');
        }
    }
    key.trim_end_matches('-').to_string()
}

/// In-memory editor over the service catalog.
#[derive(Debug, Clone, Default)]
pub struct ManageServices {
    services: Vec<ServiceInfo>,
    pending: Option<ConfirmationRequest<ServiceCommand>>,
}

impl ManageServices {
    pub fn new(catalog: ServiceCatalog) -> Self {
        Self {
            services: catalog.services,
            pending: None,
        }
    }

    /// Snapshot of the edited catalog.
    pub fn catalog(&self) -> ServiceCatalog {
        ServiceCatalog::new(self.services.clone())
    }

    pub fn services(&self) -> &[ServiceInfo] {
        &self.services
    }

    fn service_mut(&mut self, key: &str) -> Result<&mut ServiceInfo, AppError> {
        self.services
            .iter_mut()
            .find(|s| s.key == key)
            .ok_or_else(|| AppError::not_found(format!("Service {} not found", key)))
    }

    /// Add a service and return its key. Without an image the placeholder
    /// cover is used.
    pub fn add_service(&mut self, name: &str, description: &str, image: Option<&str>) -> Result<String, AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::field("name", "Service name is required"));
        }
        let key = slugify(name);
        if key.is_empty() {
            return Err(AppError::field("name", "Service name must contain letters or digits"));
        }
        if self.services.iter().any(|s| s.key == key) {
            return Err(AppError::conflict(format!("A service named {} already exists", name)));
        }
        let image = image.map(str::trim).filter(|i| !i.is_empty()).unwrap_or(DEFAULT_SERVICE_IMAGE);
        self.services.push(ServiceInfo {
            key: key.clone(),
            name: name.to_string(),
            description: description.trim().to_string(),
            sample_images: vec![image.to_string()],
            packages: Vec::new(),
        });
        tracing::debug!(service = %key, "Service added");
        Ok(key)
    }

    pub fn edit_service(&mut self, key: &str, name: &str, description: &str) -> Result<(), AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::field("name", "Service name is required"));
        }
        let service = self.service_mut(key)?;
        service.name = name.to_string();
        service.description = description.trim().to_string();
        Ok(())
    }

    pub fn request_delete_service(&mut self, key: &str) -> Result<&ConfirmationRequest<ServiceCommand>, AppError> {
        self.service_mut(key)?;
        Ok(self.pending.insert(ConfirmationRequest::new(
            "Delete Service?",
            "Delete this service?",
            Tone::Destructive,
            ServiceCommand::DeleteService { key: key.to_string() },
        )))
    }

    /// Add a package. `features` is a comma-separated list.
    pub fn add_package(&mut self, key: &str, name: &str, price: &str, features: &str) -> Result<(), AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::field("package", "Package name is required"));
        }
        let service = self.service_mut(key)?;
        if service.has_package(name) {
            return Err(AppError::conflict(format!("Package {} already exists", name)));
        }
        service.packages.push(PackageInfo {
            name: name.to_string(),
            price: price.trim().to_string(),
            features: parse_features(features),
        });
        Ok(())
    }

    /// Replace the package currently named `package`.
    pub fn edit_package(
        &mut self,
        key: &str,
        package: &str,
        name: &str,
        price: &str,
        features: &str,
    ) -> Result<(), AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::field("package", "Package name is required"));
        }
        let service = self.service_mut(key)?;
        if name != package && service.has_package(name) {
            return Err(AppError::conflict(format!("Package {} already exists", name)));
        }
        let entry = service
            .packages
            .iter_mut()
            .find(|p| p.name == package)
            .ok_or_else(|| AppError::not_found(format!("Package {} not found", package)))?;
        *entry = PackageInfo {
            name: name.to_string(),
            price: price.trim().to_string(),
            features: parse_features(features),
        };
        Ok(())
    }

    pub fn request_delete_package(
        &mut self,
        key: &str,
        package: &str,
    ) -> Result<&ConfirmationRequest<ServiceCommand>, AppError> {
        if !self.service_mut(key)?.has_package(package) {
            return Err(AppError::not_found(format!("Package {} not found", package)));
        }
        Ok(self.pending.insert(ConfirmationRequest::new(
            "Delete Package?",
            "Delete this package?",
            Tone::Destructive,
            ServiceCommand::DeletePackage {
                key: key.to_string(),
                package: package.to_string(),
            },
        )))
    }

    /// Append an album photo by URL.
    pub fn add_album_photo(&mut self, key: &str, url: &str) -> Result<(), AppError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(AppError::field("photo", "Photo URL is required"));
        }
        self.service_mut(key)?.sample_images.push(url.to_string());
        Ok(())
    }

    pub fn remove_album_photo(&mut self, key: &str, index: usize) -> Result<String, AppError> {
        let service = self.service_mut(key)?;
        if index >= service.sample_images.len() {
            return Err(AppError::not_found(format!("Photo {} not found", index)));
        }
        Ok(service.sample_images.remove(index))
    }

    pub fn pending(&self) -> Option<&ConfirmationRequest<ServiceCommand>> {
        self.pending.as_ref()
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Apply the staged deletion.
    pub fn confirm(&mut self) -> Result<(), AppError> {
        let request = self.pending.take().ok_or_else(nothing_pending)?;
        match request.action {
            ServiceCommand::DeleteService { key } => {
                self.services.retain(|s| s.key != key);
                tracing::debug!(service = %key, "Service deleted");
            }
            ServiceCommand::DeletePackage { key, package } => {
                self.service_mut(&key)?.packages.retain(|p| p.name != package);
            }
        }
        Ok(())
    }
}
