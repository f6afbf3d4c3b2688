//! 角色与角色来源

use serde::{Deserialize, Serialize};
use std::fmt;

/// 角色
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Admin,
    SalesRep,
    Engineer,
    Partner,
    Other(String),
}

impl Role {
    pub fn parse(value: &str) -> Self {
        match value {
            "admin" => Role::Admin,
            "sales_rep" => Role::SalesRep,
            "engineer" => Role::Engineer,
            "partner" => Role::Partner,
            other => Role::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "admin",
            Role::SalesRep => "sales_rep",
            Role::Engineer => "engineer",
            Role::Partner => "partner",
            Role::Other(other) => other,
        }
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        Role::parse(&value)
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 角色来源，按声明顺序即为优先级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleSource {
    /// 身份对象中的 `roles` 数组
    RolesList,
    /// 身份对象中的 `role` 字段
    RoleField,
    /// 身份对象中的旧版 `Role` 字段
    LegacyRoleField,
    /// 单独持久化的当前角色
    PersistedRole,
}

impl RoleSource {
    pub const PRECEDENCE: [RoleSource; 4] = [
        RoleSource::RolesList,
        RoleSource::RoleField,
        RoleSource::LegacyRoleField,
        RoleSource::PersistedRole,
    ];
}

/// 角色解析结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleResolution {
    /// 规范角色：任一来源为 admin 即为 admin，否则取优先级最高的来源
    pub role: Option<Role>,
    /// 按优先级记录每个来源的取值
    pub observed: Vec<(RoleSource, String)>,
}

impl RoleResolution {
    pub(crate) fn from_observed(observed: Vec<(RoleSource, String)>) -> Self {
        let role = if observed.iter().any(|(_, value)| value == Role::Admin.as_str()) {
            Some(Role::Admin)
        } else {
            observed.first().map(|(_, value)| Role::parse(value))
        };
        Self { role, observed }
    }

    /// 所有来源是否一致
    pub fn is_consistent(&self) -> bool {
        match self.observed.split_first() {
            Some(((_, first), rest)) => rest.iter().all(|(_, value)| value == first),
            None => true,
        }
    }

    /// 某个来源是否给出了该角色
    pub fn contains(&self, role: &str) -> bool {
        self.observed.iter().any(|(_, value)| value == role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roundtrip_known_roles() {
        for name in ["admin", "sales_rep", "engineer", "partner"] {
            assert_eq!(Role::parse(name).as_str(), name);
        }
        assert_eq!(Role::parse("auditor"), Role::Other("auditor".to_string()));
    }

    #[test]
    fn test_admin_wins_over_precedence() {
        let resolution = RoleResolution::from_observed(vec![
            (RoleSource::RolesList, "sales_rep".to_string()),
            (RoleSource::PersistedRole, "admin".to_string()),
        ]);
        assert_eq!(resolution.role, Some(Role::Admin));
        assert!(!resolution.is_consistent());
    }

    #[test]
    fn test_first_source_wins_without_admin() {
        let resolution = RoleResolution::from_observed(vec![
            (RoleSource::RoleField, "engineer".to_string()),
            (RoleSource::PersistedRole, "sales_rep".to_string()),
        ]);
        assert_eq!(resolution.role, Some(Role::Engineer));
    }

    #[test]
    fn test_empty_resolution() {
        let resolution = RoleResolution::from_observed(vec![]);
        assert_eq!(resolution.role, None);
        assert!(resolution.is_consistent());
    }
}
