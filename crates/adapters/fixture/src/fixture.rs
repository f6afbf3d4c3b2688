use std::collections::BTreeMap;
use std::path::Path;

use async_trait::async_trait;
use dify_common::{PagedResult, Pagination, Resource};
use dify_errors::{AppError, AppResult};
use dify_ports::DataSource;
use serde_json::Value;
use tracing::debug;

/// 本地样例数据源
#[derive(Debug, Clone, Default)]
pub struct FixtureDataSource {
    collections: BTreeMap<Resource, Vec<Value>>,
}

impl FixtureDataSource {
    pub fn new(collections: BTreeMap<Resource, Vec<Value>>) -> Self {
        Self { collections }
    }

    /// 从 `{"licenses": [...], "sales-reps": [...]}` 结构加载
    pub fn from_json(document: Value) -> AppResult<Self> {
        let Value::Object(map) = document else {
            return Err(AppError::validation("fixture document must be a JSON object"));
        };

        let mut collections = BTreeMap::new();
        for (name, items) in map {
            let resource: Resource = name
                .parse()
                .map_err(|e| AppError::validation(format!("fixture: {}", e)))?;
            let Value::Array(items) = items else {
                return Err(AppError::validation(format!(
                    "fixture collection {} must be an array",
                    name
                )));
            };
            collections.insert(resource, items);
        }
        Ok(Self { collections })
    }

    pub fn from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::storage(format!("Failed to read fixtures {}: {}", path.display(), e))
        })?;
        Self::from_json(serde_json::from_str(&raw)?)
    }

    fn items(&self, resource: Resource) -> &[Value] {
        self.collections
            .get(&resource)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

#[async_trait]
impl DataSource for FixtureDataSource {
    async fn list(
        &self,
        resource: Resource,
        pagination: &Pagination,
    ) -> AppResult<PagedResult<Value>> {
        let items = self.items(resource);
        let page = items
            .iter()
            .skip(usize::try_from(pagination.offset()).unwrap_or(usize::MAX))
            .take(pagination.limit() as usize)
            .cloned()
            .collect();
        debug!(%resource, total = items.len(), "Listing fixture resource");
        Ok(PagedResult::new(page, items.len() as u64, pagination))
    }

    async fn get(&self, resource: Resource, id: &str) -> AppResult<Option<Value>> {
        let found = self
            .items(resource)
            .iter()
            .find(|item| matches_id(item, resource.id_keys(), id))
            .cloned();
        Ok(found)
    }

    fn name(&self) -> &'static str {
        "fixture"
    }
}

fn matches_id(item: &Value, keys: &[&str], id: &str) -> bool {
    keys.iter().any(|key| match item.get(*key) {
        Some(Value::String(s)) => s == id,
        Some(Value::Number(n)) => n.to_string() == id,
        _ => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fixtures() -> FixtureDataSource {
        FixtureDataSource::from_json(json!({
            "licenses": [
                {"LicenseId": "L-001", "LicenseType": "STANDARD"},
                {"LicenseId": "L-002", "LicenseType": "ENTERPRISE"},
                {"LicenseId": "L-003", "LicenseType": "BASIC"}
            ],
            "sales_reps": [
                {"id": 7, "name": "Wang"}
            ]
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_list_paginates_locally() {
        let source = fixtures();
        let page = source
            .list(Resource::Licenses, &Pagination::new(2, 2))
            .await
            .unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0]["LicenseId"], "L-003");
        assert_eq!(page.total_pages(), 2);
    }

    #[tokio::test]
    async fn test_list_past_last_page_is_empty() {
        let page = fixtures()
            .list(Resource::Licenses, &Pagination::new(u32::MAX, 10))
            .await
            .unwrap();
        assert_eq!(page.total, 3);
        assert!(page.items.is_empty());
    }

    #[tokio::test]
    async fn test_missing_collection_is_empty() {
        let page = fixtures()
            .list(Resource::Orders, &Pagination::default())
            .await
            .unwrap();
        assert_eq!(page.total, 0);
        assert!(page.items.is_empty());
    }

    #[tokio::test]
    async fn test_get_by_any_id_key() {
        let source = fixtures();
        let license = source.get(Resource::Licenses, "L-002").await.unwrap().unwrap();
        assert_eq!(license["LicenseType"], "ENTERPRISE");

        let rep = source.get(Resource::SalesReps, "7").await.unwrap();
        assert!(rep.is_some());

        assert!(source.get(Resource::Licenses, "L-999").await.unwrap().is_none());
    }

    #[test]
    fn test_rejects_unknown_collection() {
        let err = FixtureDataSource::from_json(json!({"invoices": []})).unwrap_err();
        assert!(err.is_validation());

        let err = FixtureDataSource::from_json(json!({"licenses": {}})).unwrap_err();
        assert!(err.is_validation());
    }
}
