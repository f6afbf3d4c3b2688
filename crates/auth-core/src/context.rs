//! 授权上下文
//!
//! 统一的前端访问控制决策点：每次判定都直接读取会话存储，
//! 登录、登出之外从不写入。

use dify_ports::SessionStore;
use metrics::counter;
use tracing::{debug, warn};

use crate::guard::GuardDecision;
use crate::identity::{Actor, PartnerIdentity, SessionKind, StaffIdentity};
use crate::keys;
use crate::role::{Role, RoleResolution, RoleSource};

/// 授权上下文
pub struct AuthorizationContext<S> {
    store: S,
}

impl<S: SessionStore> AuthorizationContext<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// 当前激活的会话类型：持久化角色为 partner 时为合作伙伴会话
    pub fn active_kind(&self) -> SessionKind {
        match self.persisted_role().as_deref() {
            Some("partner") => SessionKind::Partner,
            _ => SessionKind::Staff,
        }
    }

    /// 令牌与可解析的身份记录同时存在才算已登录
    pub fn is_authenticated(&self, kind: SessionKind) -> bool {
        self.token(kind).is_some() && self.identity(kind).is_some()
    }

    /// 当前激活的会话是否已登录
    pub fn is_logged_in(&self) -> bool {
        self.is_authenticated(self.active_kind())
    }

    /// 当前激活会话的身份（不校验令牌）
    pub fn actor(&self) -> Option<Actor> {
        self.identity(self.active_kind())
    }

    /// 按固定优先级汇总所有角色来源
    pub fn resolve_role(&self) -> RoleResolution {
        let mut observed = self
            .actor()
            .map(|actor| actor.role_claims())
            .unwrap_or_default();
        if let Some(role) = self.persisted_role() {
            observed.push((RoleSource::PersistedRole, role));
        }

        let resolution = RoleResolution::from_observed(observed);
        if !resolution.is_consistent() {
            warn!(
                observed = ?resolution.observed,
                resolved = ?resolution.role,
                "Role sources disagree"
            );
        }
        resolution
    }

    /// 任一角色来源匹配即返回 true
    pub fn has_role(&self, role: &str) -> bool {
        let claimed = self
            .actor()
            .map(|actor| actor.role_claims().iter().any(|(_, value)| value == role))
            .unwrap_or(false);
        if claimed {
            return true;
        }

        let stored = self.persisted_role();
        if stored.as_deref() == Some(role) {
            return true;
        }

        debug!(role, stored_role = ?stored, "Role check failed");
        false
    }

    /// 管理员判定：常规检查失败后再直接读一次持久化角色
    pub fn is_admin(&self) -> bool {
        if self.has_role(Role::Admin.as_str()) {
            return true;
        }
        let direct = self.store.get(keys::CURRENT_ROLE).as_deref() == Some(Role::Admin.as_str());
        debug!(direct, "Admin fallback check");
        direct
    }

    pub fn is_sales_rep(&self) -> bool {
        self.has_role(Role::SalesRep.as_str())
    }

    pub fn is_engineer(&self) -> bool {
        self.has_role(Role::Engineer.as_str())
    }

    pub fn is_partner(&self) -> bool {
        self.has_role(Role::Partner.as_str())
    }

    /// 现场人员：销售或合作伙伴
    pub fn is_field_staff(&self) -> bool {
        self.is_sales_rep() || self.is_partner()
    }

    pub fn user_id(&self) -> Option<String> {
        match self.actor()? {
            Actor::Staff(staff) => staff.id,
            Actor::Partner(_) => None,
        }
    }

    /// 仅销售角色返回所属销售代表 ID
    pub fn sales_rep_id(&self) -> Option<String> {
        if !self.is_sales_rep() {
            return None;
        }
        match self.actor()? {
            Actor::Staff(staff) => staff.sales_rep_id,
            Actor::Partner(_) => None,
        }
    }

    /// 仅合作伙伴角色返回合作伙伴 ID
    pub fn partner_id(&self) -> Option<String> {
        if !self.is_partner() {
            return None;
        }
        match self.actor()? {
            Actor::Partner(partner) => partner.partner_id,
            Actor::Staff(_) => None,
        }
    }

    /// 路由守卫决策
    pub fn resolve_guard_decision(&self, required_role: Option<&str>) -> GuardDecision {
        let decision = if !self.is_logged_in() {
            GuardDecision::RedirectToLogin
        } else {
            match required_role {
                None => GuardDecision::Allow,
                Some(role) if self.is_admin() || self.has_role(role) => GuardDecision::Allow,
                Some(_) => GuardDecision::ShowForbidden,
            }
        };

        counter!("guard_decisions_total", "decision" => decision.as_str()).increment(1);
        debug!(?required_role, decision = decision.as_str(), "Guard decision");
        decision
    }

    fn persisted_role(&self) -> Option<String> {
        self.store
            .get(keys::CURRENT_ROLE)
            .filter(|role| !role.is_empty())
    }

    fn token(&self, kind: SessionKind) -> Option<String> {
        let key = match kind {
            SessionKind::Staff => keys::STAFF_TOKEN,
            SessionKind::Partner => keys::PARTNER_TOKEN,
        };
        self.store.get(key).filter(|token| !token.trim().is_empty())
    }

    fn identity(&self, kind: SessionKind) -> Option<Actor> {
        match kind {
            SessionKind::Staff => self
                .store
                .get(keys::STAFF_USER_INFO)
                .and_then(|raw| StaffIdentity::parse(&raw))
                .map(Actor::Staff),
            SessionKind::Partner => self
                .store
                .get(keys::PARTNER_INFO)
                .and_then(|raw| PartnerIdentity::parse(&raw))
                .map(Actor::Partner),
        }
    }
}
