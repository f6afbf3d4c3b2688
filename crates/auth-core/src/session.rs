//! 会话生命周期：登录写入、登出清理

use dify_errors::{AppError, AppResult};
use dify_ports::SessionStore;
use tracing::info;

use crate::identity::{PartnerIdentity, StaffIdentity};
use crate::keys;
use crate::role::Role;

/// 会话管理器
///
/// 员工会话与合作伙伴会话互斥，登录任一类型都会清掉另一类型的键。
pub struct SessionManager<S> {
    store: S,
}

impl<S: SessionStore> SessionManager<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// 员工登录：保存令牌、用户信息与当前角色
    ///
    /// 角色取用户信息中的 `Role`，其次 `role`，都没有时按管理员处理。
    pub fn login_staff(&self, token: &str, user_info: &str) -> AppResult<StaffIdentity> {
        let token = require_token(token)?;
        let identity = StaffIdentity::parse(user_info)
            .ok_or_else(|| AppError::validation("user info must be a JSON object"))?;

        let role = identity
            .legacy_role
            .clone()
            .or_else(|| identity.role.clone())
            .unwrap_or_else(|| Role::Admin.to_string());

        self.clear(&[keys::PARTNER_TOKEN, keys::PARTNER_INFO])?;
        self.store.set(keys::STAFF_TOKEN, token)?;
        self.store.set(keys::STAFF_USER_INFO, user_info)?;
        self.store.set(keys::CURRENT_ROLE, &role)?;

        info!(user_id = ?identity.id, role = %role, "Staff session started");
        Ok(identity)
    }

    /// 合作伙伴登录
    pub fn login_partner(&self, token: &str, partner_info: &str) -> AppResult<PartnerIdentity> {
        let token = require_token(token)?;
        let identity = PartnerIdentity::parse(partner_info)
            .ok_or_else(|| AppError::validation("partner info must be a JSON object"))?;

        self.clear(&[keys::STAFF_TOKEN, keys::STAFF_USER_INFO])?;
        self.store.set(keys::PARTNER_TOKEN, token)?;
        self.store.set(keys::PARTNER_INFO, partner_info)?;
        self.store.set(keys::CURRENT_ROLE, Role::Partner.as_str())?;

        info!(partner_id = ?identity.partner_id, "Partner session started");
        Ok(identity)
    }

    /// 登出：清理全部会话键
    pub fn logout(&self) -> AppResult<()> {
        self.clear(&keys::ALL)?;
        info!("Session cleared");
        Ok(())
    }

    fn clear(&self, session_keys: &[&str]) -> AppResult<()> {
        for key in session_keys {
            self.store.remove(key)?;
        }
        Ok(())
    }
}

fn require_token(token: &str) -> AppResult<&str> {
    let token = token.trim();
    if token.is_empty() {
        return Err(AppError::validation("access token must not be empty"));
    }
    Ok(token)
}
