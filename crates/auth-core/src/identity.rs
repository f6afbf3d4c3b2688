//! 会话身份

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::role::{Role, RoleSource};

/// 会话类型：员工与合作伙伴互斥
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "snake_case")]
pub enum SessionKind {
    #[display("staff")]
    Staff,
    #[display("partner")]
    Partner,
}

/// 员工身份（管理员、销售、工程师）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffIdentity {
    pub id: Option<String>,
    pub name: Option<String>,
    pub role: Option<String>,
    pub roles: Vec<String>,
    /// 旧版接口返回的大写 `Role` 字段
    pub legacy_role: Option<String>,
    pub sales_rep_id: Option<String>,
}

impl StaffIdentity {
    /// 解析持久化的用户信息，非 JSON 对象返回 None
    pub fn parse(raw: &str) -> Option<Self> {
        let map = parse_object(raw)?;
        let profile = map.get("profile").and_then(Value::as_object);

        Some(Self {
            id: string_field(&map, &["id", "UserID", "UserId", "user_id"]),
            name: string_field(&map, &["FullName", "full_name", "name", "Username", "username"]),
            role: string_field(&map, &["role"]),
            roles: string_list(&map, "roles"),
            legacy_role: string_field(&map, &["Role"]),
            sales_rep_id: string_field(&map, &["sales_rep_id", "SalesRepId"])
                .or_else(|| profile.and_then(|p| string_field(p, &["sales_rep_id"]))),
        })
    }

    /// 身份对象内各来源给出的角色，按优先级排列
    pub fn role_claims(&self) -> Vec<(RoleSource, String)> {
        let mut claims: Vec<(RoleSource, String)> = self
            .roles
            .iter()
            .map(|r| (RoleSource::RolesList, r.clone()))
            .collect();
        if let Some(role) = &self.role {
            claims.push((RoleSource::RoleField, role.clone()));
        }
        if let Some(role) = &self.legacy_role {
            claims.push((RoleSource::LegacyRoleField, role.clone()));
        }
        claims
    }
}

/// 合作伙伴身份
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartnerIdentity {
    pub partner_id: Option<String>,
    pub partner_name: Option<String>,
}

impl PartnerIdentity {
    pub fn parse(raw: &str) -> Option<Self> {
        let map = parse_object(raw)?;
        let profile = map.get("profile").and_then(Value::as_object);

        Some(Self {
            partner_id: string_field(&map, &["PartnerID", "PartnerId", "partner_id"])
                .or_else(|| profile.and_then(|p| string_field(p, &["partner_id"]))),
            partner_name: string_field(&map, &["PartnerName", "partner_name"]),
        })
    }

    /// 合作伙伴会话固定拥有 partner 角色
    pub fn role_claims(&self) -> Vec<(RoleSource, String)> {
        vec![
            (RoleSource::RolesList, Role::Partner.to_string()),
            (RoleSource::RoleField, Role::Partner.to_string()),
        ]
    }
}

/// 已登录的操作者
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Actor {
    Staff(StaffIdentity),
    Partner(PartnerIdentity),
}

impl Actor {
    pub fn kind(&self) -> SessionKind {
        match self {
            Actor::Staff(_) => SessionKind::Staff,
            Actor::Partner(_) => SessionKind::Partner,
        }
    }

    pub fn role_claims(&self) -> Vec<(RoleSource, String)> {
        match self {
            Actor::Staff(staff) => staff.role_claims(),
            Actor::Partner(partner) => partner.role_claims(),
        }
    }
}

fn parse_object(raw: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Some(map),
        Ok(_) => {
            tracing::warn!("Persisted identity is not a JSON object");
            None
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to parse persisted identity");
            None
        }
    }
}

/// 取第一个存在的非空字段，数字 ID 转为字符串
fn string_field(map: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match map.get(*key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn string_list(map: &Map<String, Value>, key: &str) -> Vec<String> {
    map.get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
