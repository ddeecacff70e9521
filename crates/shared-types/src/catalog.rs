use serde::{Deserialize, Serialize};

use crate::common::de_id;

// ---------------------------------------------------------------------------
// Service catalog
// ---------------------------------------------------------------------------

/// One bookable package of a service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageInfo {
    pub name: String,
    /// Display price, e.g. `₱ 35,000`. Empty when the studio quotes on request.
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub features: Vec<String>,
}

impl PackageInfo {
    fn new(name: &str, price: &str, features: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            price: price.to_string(),
            features: features.iter().map(|f| f.to_string()).collect(),
        }
    }

    fn named(name: &str) -> Self {
        Self::new(name, "", &[])
    }
}

/// A service offered by the studio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceInfo {
    /// Stable key used in booking requests (`wedding`, `debut`, ...).
    #[serde(alias = "id", deserialize_with = "de_id")]
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "sampleImages", alias = "sample_images", alias = "album", default)]
    pub sample_images: Vec<String>,
    #[serde(alias = "packageInfo", default)]
    pub packages: Vec<PackageInfo>,
}

impl ServiceInfo {
    pub fn package_names(&self) -> Vec<String> {
        self.packages.iter().map(|p| p.name.clone()).collect()
    }

    pub fn has_package(&self, package: &str) -> bool {
        self.packages.iter().any(|p| p.name == package)
    }
}

/// Read-only mapping from service key to service details.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ServiceCatalog {
    pub services: Vec<ServiceInfo>,
}

impl ServiceCatalog {
    pub fn new(services: Vec<ServiceInfo>) -> Self {
        Self { services }
    }

    pub fn get(&self, key: &str) -> Option<&ServiceInfo> {
        self.services.iter().find(|s| s.key == key)
    }

    pub fn keys(&self) -> Vec<&str> {
        self.services.iter().map(|s| s.key.as_str()).collect()
    }

    /// Package names for `key`; empty for an unknown service.
    pub fn packages_for(&self, key: &str) -> Vec<String> {
        self.get(key).map(ServiceInfo::package_names).unwrap_or_default()
    }

    pub fn is_valid_package(&self, key: &str, package: &str) -> bool {
        self.get(key).map(|s| s.has_package(package)).unwrap_or(false)
    }

    /// Built-in catalog shipped with the site.
    pub fn builtin() -> Self {
        Self::new(vec![
            ServiceInfo {
                key: "wedding".into(),
                name: "Wedding Photography".into(),
                description: "Our premier wedding package ensures every precious moment is captured.".into(),
                sample_images: vec![
                    "https://images.unsplash.com/photo-1758905728020-a888617aecd0?w=600&q=80".into(),
                    "https://images.unsplash.com/photo-1658243862459-145b453dd74e?w=600&q=80".into(),
                ],
                packages: vec![
                    PackageInfo::new(
                        "Silver Package",
                        "₱ 35,000",
                        &[
                            "1 Photographer & 1 Videographer",
                            "Full day coverage (10 hours)",
                            "Basic Photo Album",
                            "Digital Files via USB",
                        ],
                    ),
                    PackageInfo::new(
                        "Gold Package",
                        "₱ 50,000",
                        &[
                            "2 Photographers & 1 Videographer",
                            "12 hours coverage",
                            "Premium Album",
                            "Same-Day-Edit Video",
                            "Digital Files via USB",
                        ],
                    ),
                ],
            },
            ServiceInfo {
                key: "debut".into(),
                name: "Debut Photography".into(),
                description: "Celebrate your 18th birthday with stunning photos and full-event coverage.".into(),
                sample_images: vec![
                    "https://images.unsplash.com/photo-1761331051932-c3fdd6c3e661?w=600&q=80".into(),
                ],
                packages: vec![
                    PackageInfo::new(
                        "Basic Debut",
                        "₱ 20,000",
                        &["1 Photographer", "Event Coverage (8 hours)", "Photo Booth add-on available", "Digital Files"],
                    ),
                    PackageInfo::new(
                        "Premium Debut",
                        "₱ 30,000",
                        &[
                            "1 Photographer & 1 Videographer",
                            "Pre-Debut Shoot (3 hours)",
                            "Full Event Coverage (10 hours)",
                            "Mini Album",
                        ],
                    ),
                ],
            },
            ServiceInfo {
                key: "portrait".into(),
                name: "Portrait Sessions".into(),
                description: "Perfect for headshots, graduation pictures, or artistic portraits.".into(),
                sample_images: vec![
                    "https://images.unsplash.com/photo-1544124094-8aea0374da93?w=600&q=80".into(),
                ],
                packages: vec![
                    PackageInfo::new(
                        "Standard Session",
                        "₱ 5,000",
                        &["1 Hour Shoot", "10 Edited Photos", "1 Outfit Change", "Digital Files"],
                    ),
                    PackageInfo::new(
                        "Premium Session",
                        "₱ 8,500",
                        &["2 Hour Shoot", "20 Edited Photos", "3 Outfit Changes", "Full Resolution Files"],
                    ),
                ],
            },
            ServiceInfo {
                key: "events".into(),
                name: "Special Events Photography".into(),
                description: "Coverage for birthdays, anniversaries, corporate events, and more.".into(),
                sample_images: vec![
                    "https://images.unsplash.com/photo-1758738180856-7538f9dd4ac4?w=600&q=80".into(),
                ],
                packages: vec![
                    PackageInfo::new("Basic Event", "₱ 15,000", &["1 Photographer", "4 Hours Coverage", "Digital Files"]),
                    PackageInfo::new(
                        "Extended Event",
                        "₱ 25,000",
                        &["1 Photographer & Assistant", "6 Hours Coverage", "On-site Printing", "Digital Files"],
                    ),
                ],
            },
            ServiceInfo {
                key: "birthday".into(),
                name: "Birthday Events".into(),
                description: "Fun and vibrant photography for birthdays.".into(),
                sample_images: vec![],
                packages: vec![
                    PackageInfo::named("Kids Package"),
                    PackageInfo::named("Teen Package"),
                    PackageInfo::named("Family Birthday Package"),
                ],
            },
            ServiceInfo {
                key: "corporate".into(),
                name: "Corporate Photography".into(),
                description: "Headshots and event coverage for teams and companies.".into(),
                sample_images: vec![],
                packages: vec![
                    PackageInfo::named("Corporate Basic"),
                    PackageInfo::named("Corporate Plus"),
                    PackageInfo::named("Corporate Premium"),
                ],
            },
            ServiceInfo {
                key: "other".into(),
                name: "Other Sessions".into(),
                description: "Anything else you have in mind.".into(),
                sample_images: vec![],
                packages: vec![PackageInfo::named("General Package A"), PackageInfo::named("General Package B")],
            },
        ])
    }
}

// ---------------------------------------------------------------------------
// Grade / section catalog
// ---------------------------------------------------------------------------

pub const GRADE_LEVELS: &[&str] = &["Grade 7", "Grade 8", "Grade 9", "Grade 10"];

/// Sections offered for each grade level.
pub fn sections_for(grade: &str) -> &'static [&'static str] {
    match grade {
        "Grade 7" => &["Sampaguita", "Rosal", "Ilang-Ilang", "Camia"],
        "Grade 8" => &["Rizal", "Bonifacio", "Mabini", "Luna"],
        "Grade 9" => &["Diamond", "Emerald", "Ruby", "Sapphire"],
        "Grade 10" => &["Newton", "Einstein", "Curie", "Darwin"],
        _ => &[],
    }
}

pub fn is_valid_section(grade: &str, section: &str) -> bool {
    sections_for(grade).contains(&section)
}
