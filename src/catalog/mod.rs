// Static catalogs (source objects, destination orgs) and the related-files source.
//
// Everything here is mocked: the catalogs are fixed lookup tables and the file
// source fabricates a batch with a simulated fetch delay. Swapping in a real org
// API means providing another `FileSource` implementation; nothing above this
// module knows the difference.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::models::records::{DestinationTarget, FileRecord, OrgStatus, OrgType, SourceObject};

/// Number of file records fabricated per fetch.
pub const RELATED_FILE_COUNT: usize = 47;

const FILE_TYPES: [&str; 6] = ["PDF", "DOCX", "XLSX", "PNG", "JPG", "TXT"];
const OWNERS: [&str; 5] = [
    "John Smith",
    "Sarah Wilson",
    "Mike Johnson",
    "Lisa Brown",
    "David Lee",
];

/// Fixed catalog of selectable source objects.
pub fn source_objects() -> Vec<SourceObject> {
    let entries = [
        ("Account", "Account", "Business accounts and organizations"),
        ("Contact", "Contact", "Individual people and contacts"),
        ("Opportunity", "Opportunity", "Sales opportunities and deals"),
        ("Case", "Case", "Customer service cases"),
        ("Lead", "Lead", "Potential customers and prospects"),
        ("Task", "Task", "Activities and tasks"),
        ("Event", "Event", "Calendar events and meetings"),
        ("CustomObject__c", "Custom Object", "Custom business objects"),
    ];
    entries
        .into_iter()
        .map(|(api_name, label, description)| SourceObject {
            api_name: api_name.to_string(),
            label: label.to_string(),
            description: description.to_string(),
        })
        .collect()
}

pub fn find_object(api_name: &str) -> Option<SourceObject> {
    source_objects().into_iter().find(|o| o.api_name == api_name)
}

/// Fixed catalog of destination orgs: one production org and three sandboxes,
/// one of which is under maintenance and therefore not selectable.
pub fn destination_orgs() -> Vec<DestinationTarget> {
    vec![
        DestinationTarget {
            id: "prod-org-1".to_string(),
            name: "Production Org".to_string(),
            url: "company.salesforce.com".to_string(),
            status: OrgStatus::Active,
            org_type: OrgType::Production,
        },
        DestinationTarget {
            id: "sandbox-org-1".to_string(),
            name: "Development Sandbox".to_string(),
            url: "company--dev.sandbox.salesforce.com".to_string(),
            status: OrgStatus::Active,
            org_type: OrgType::Sandbox,
        },
        DestinationTarget {
            id: "sandbox-org-2".to_string(),
            name: "UAT Sandbox".to_string(),
            url: "company--uat.sandbox.salesforce.com".to_string(),
            status: OrgStatus::Active,
            org_type: OrgType::Sandbox,
        },
        DestinationTarget {
            id: "sandbox-org-3".to_string(),
            name: "QA Sandbox".to_string(),
            url: "company--qa.sandbox.salesforce.com".to_string(),
            status: OrgStatus::Maintenance,
            org_type: OrgType::Sandbox,
        },
    ]
}

pub fn find_destination(id: &str) -> Option<DestinationTarget> {
    destination_orgs().into_iter().find(|d| d.id == id)
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("unknown source object `{0}`")]
    UnknownObject(String),
    #[error("fetch timed out after {0} ms")]
    Timeout(u64),
}

/// Capability seam for the related-files lookup. The wizard only ever talks to
/// this trait; a production build would put the real org call behind it.
#[async_trait]
pub trait FileSource: Send + Sync {
    async fn fetch(&self, object_api_name: &str) -> Result<Vec<FileRecord>, FetchError>;
}

/// Mocked file source: fabricates a 47-record batch after an artificial delay.
pub struct MockFileSource {
    delay: Duration,
    seed: Option<u64>,
}

impl MockFileSource {
    /// Interactive configuration: 800 ms simulated fetch, fresh randomness.
    pub fn new() -> Self {
        Self {
            delay: Duration::from_millis(800),
            seed: None,
        }
    }

    /// No delay; `seed` makes the batch reproducible (tests and proof modes).
    pub fn instant(seed: Option<u64>) -> Self {
        Self {
            delay: Duration::ZERO,
            seed,
        }
    }
}

impl Default for MockFileSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FileSource for MockFileSource {
    async fn fetch(&self, object_api_name: &str) -> Result<Vec<FileRecord>, FetchError> {
        if find_object(object_api_name).is_none() {
            return Err(FetchError::UnknownObject(object_api_name.to_string()));
        }

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let batch = generate_related_files(object_api_name, &mut rng);
        info!(
            "[PHASE: catalog] [STEP: fetch] Generated {} related files for {}",
            batch.len(),
            object_api_name
        );
        Ok(batch)
    }
}

/// Fabricate the related-files batch for one object.
///
/// Shape is deterministic (count, ids, name pattern, type/owner cycles); size and
/// last-modified are randomized within bounds: size in [100, 5100) KB, date within
/// the past 90 days.
pub fn generate_related_files(object_api_name: &str, rng: &mut impl Rng) -> Vec<FileRecord> {
    let now = Utc::now();
    (0..RELATED_FILE_COUNT)
        .map(|i| {
            let file_type = FILE_TYPES[i % FILE_TYPES.len()];
            let size_kb: u32 = rng.gen_range(100..5100);
            let age_secs: i64 = rng.gen_range(0..90 * 24 * 60 * 60);
            let modified = now - ChronoDuration::seconds(age_secs);

            FileRecord {
                id: format!("file_{}", i + 1),
                name: format!(
                    "{}_Document_{:03}.{}",
                    object_api_name,
                    i + 1,
                    file_type.to_lowercase()
                ),
                size: format!("{size_kb} KB"),
                last_modified: modified.format("%m/%d/%Y").to_string(),
                file_type: file_type.to_string(),
                owner: OWNERS[i % OWNERS.len()].to_string(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_catalog_has_eight_fixed_entries() {
        let objects = source_objects();
        assert_eq!(objects.len(), 8);
        assert_eq!(objects[0].api_name, "Account");
        assert_eq!(objects[7].api_name, "CustomObject__c");
        assert!(find_object("Contact").is_some());
        assert!(find_object("contact").is_none(), "lookups are exact-match");
    }

    #[test]
    fn destination_catalog_has_one_production_and_one_maintenance_org() {
        let orgs = destination_orgs();
        assert_eq!(orgs.len(), 4);
        assert_eq!(
            orgs.iter()
                .filter(|o| o.org_type == OrgType::Production)
                .count(),
            1
        );
        let qa = find_destination("sandbox-org-3").unwrap();
        assert_eq!(qa.status, OrgStatus::Maintenance);
        assert!(!qa.is_selectable());
        assert!(find_destination("prod-org-1").unwrap().is_selectable());
    }

    #[test]
    fn generated_batch_has_expected_shape() {
        let mut rng = StdRng::seed_from_u64(42);
        let batch = generate_related_files("Account", &mut rng);

        assert_eq!(batch.len(), RELATED_FILE_COUNT);
        assert_eq!(batch[0].id, "file_1");
        assert_eq!(batch[46].id, "file_47");
        assert_eq!(batch[0].name, "Account_Document_001.pdf");
        assert_eq!(batch[0].file_type, "PDF");
        assert_eq!(batch[6].file_type, "PDF", "type cycles with period 6");
        assert_eq!(batch[1].file_type, "DOCX");
        assert_eq!(batch[0].owner, "John Smith");
        assert_eq!(batch[5].owner, "John Smith", "owner cycles with period 5");
    }

    #[test]
    fn generated_ids_are_unique_across_the_whole_batch() {
        let mut rng = StdRng::seed_from_u64(0);
        let batch = generate_related_files("Contact", &mut rng);
        let mut ids: Vec<&str> = batch.iter().map(|f| f.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), RELATED_FILE_COUNT, "ids are unique batch-wide");
    }

    #[test]
    fn generated_sizes_stay_within_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for file in generate_related_files("Case", &mut rng) {
            let kb: u32 = file
                .size
                .strip_suffix(" KB")
                .expect("size is rendered in KB")
                .parse()
                .expect("size is numeric");
            assert!((100..5100).contains(&kb), "size {kb} KB out of bounds");
        }
    }

    #[test]
    fn seeded_source_is_reproducible() {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let a = rt
            .block_on(MockFileSource::instant(Some(9)).fetch("Lead"))
            .unwrap();
        let b = rt
            .block_on(MockFileSource::instant(Some(9)).fetch("Lead"))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn fetch_rejects_unknown_object() {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let err = rt
            .block_on(MockFileSource::instant(None).fetch("Nope__x"))
            .unwrap_err();
        assert_eq!(err, FetchError::UnknownObject("Nope__x".into()));
    }
}
