//! 后端 REST 资源目录

use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 控制台消费的资源集合
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display)]
#[serde(rename_all = "kebab-case")]
pub enum Resource {
    #[display("licenses")]
    Licenses,
    #[display("customers")]
    Customers,
    #[display("deployments")]
    Deployments,
    #[display("engineers")]
    Engineers,
    #[display("sales-reps")]
    SalesReps,
    #[display("leads")]
    Leads,
    #[display("partners")]
    Partners,
    #[display("orders")]
    Orders,
}

impl Resource {
    pub const ALL: [Resource; 8] = [
        Resource::Licenses,
        Resource::Customers,
        Resource::Deployments,
        Resource::Engineers,
        Resource::SalesReps,
        Resource::Leads,
        Resource::Partners,
        Resource::Orders,
    ];

    /// 相对于版本化 base path 的路径段
    pub fn path(&self) -> String {
        self.to_string()
    }

    /// 记录主键的候选字段名，后端新旧两种命名都可能出现
    pub fn id_keys(&self) -> &'static [&'static str] {
        match self {
            Resource::Licenses => &["id", "LicenseId", "license_id"],
            Resource::Customers => &["id", "CustomerId", "customer_id"],
            Resource::Deployments => &["id", "DeploymentId", "deployment_id"],
            Resource::Engineers => &["id", "EngineerId", "engineer_id"],
            Resource::SalesReps => &["id", "SalesRepId", "sales_rep_id"],
            Resource::Leads => &["id", "LeadId", "lead_id"],
            Resource::Partners => &["id", "PartnerId", "partner_id"],
            Resource::Orders => &["id", "OrderId", "order_id"],
        }
    }
}

/// 未知资源名
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("unknown resource: {_0}")]
pub struct UnknownResource(pub String);

impl std::error::Error for UnknownResource {}

impl FromStr for Resource {
    type Err = UnknownResource;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        Resource::ALL
            .into_iter()
            .find(|r| r.path() == normalized)
            .ok_or_else(|| UnknownResource(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_resource() {
        assert_eq!("licenses".parse::<Resource>().unwrap(), Resource::Licenses);
        assert_eq!("sales_reps".parse::<Resource>().unwrap(), Resource::SalesReps);
        assert_eq!(" Sales-Reps ".parse::<Resource>().unwrap(), Resource::SalesReps);
        assert!("invoices".parse::<Resource>().is_err());
    }

    #[test]
    fn test_serde_matches_path() {
        for resource in Resource::ALL {
            let json = serde_json::to_string(&resource).unwrap();
            assert_eq!(json, format!("\"{}\"", resource.path()));
        }
    }
}
