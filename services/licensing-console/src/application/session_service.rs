//! 会话与资源查询服务

use std::sync::Arc;

use dify_auth_core::{
    Actor, AuthorizationContext, GuardDecision, RoleResolution, SessionKind, SessionManager,
};
use dify_common::{PagedResult, Pagination, Resource};
use dify_errors::{AppError, AppResult};
use dify_ports::{DataSource, SessionStore};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

/// 当前会话概况
#[derive(Debug, Clone, Serialize)]
pub struct WhoAmI {
    pub logged_in: bool,
    pub kind: SessionKind,
    pub actor: Option<Actor>,
    pub resolution: RoleResolution,
    pub is_admin: bool,
    pub user_id: Option<String>,
    pub sales_rep_id: Option<String>,
    pub partner_id: Option<String>,
}

/// 会话服务：登录、登出与授权判定共用同一个存储
pub struct SessionService {
    context: AuthorizationContext<Arc<dyn SessionStore>>,
    manager: SessionManager<Arc<dyn SessionStore>>,
}

impl SessionService {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self {
            context: AuthorizationContext::new(store.clone()),
            manager: SessionManager::new(store),
        }
    }

    pub fn context(&self) -> &AuthorizationContext<Arc<dyn SessionStore>> {
        &self.context
    }

    pub fn whoami(&self) -> WhoAmI {
        WhoAmI {
            logged_in: self.context.is_logged_in(),
            kind: self.context.active_kind(),
            actor: self.context.actor(),
            resolution: self.context.resolve_role(),
            is_admin: self.context.is_admin(),
            user_id: self.context.user_id(),
            sales_rep_id: self.context.sales_rep_id(),
            partner_id: self.context.partner_id(),
        }
    }

    pub fn guard(&self, required_role: Option<&str>) -> GuardDecision {
        self.context.resolve_guard_decision(required_role)
    }

    pub fn login_staff(&self, token: &str, user_info: &str) -> AppResult<Actor> {
        self.manager.login_staff(token, user_info).map(Actor::Staff)
    }

    pub fn login_partner(&self, token: &str, partner_info: &str) -> AppResult<Actor> {
        self.manager
            .login_partner(token, partner_info)
            .map(Actor::Partner)
    }

    pub fn logout(&self) -> AppResult<()> {
        self.manager.logout()
    }
}

/// 资源查看所需角色；未列出的资源只要求已登录
pub fn required_role(resource: Resource) -> Option<&'static str> {
    match resource {
        Resource::SalesReps | Resource::Engineers | Resource::Partners => Some("admin"),
        _ => None,
    }
}

/// 资源查询服务
pub struct ResourceService {
    source: Arc<dyn DataSource>,
    page_size: u32,
}

impl ResourceService {
    pub fn new(source: Arc<dyn DataSource>, page_size: u32) -> Self {
        Self { source, page_size }
    }

    /// 经守卫判定后分页列出资源
    pub async fn list(
        &self,
        session: &SessionService,
        resource: Resource,
        page: u32,
    ) -> AppResult<PagedResult<Value>> {
        ensure_allowed(session.guard(required_role(resource)), resource)?;

        let pagination = Pagination::new(page, self.page_size);
        let result = self.source.list(resource, &pagination).await?;
        info!(
            source = self.source.name(),
            %resource,
            page,
            total = result.total,
            "Resource page listed"
        );
        Ok(result)
    }

    pub async fn get(
        &self,
        session: &SessionService,
        resource: Resource,
        id: &str,
    ) -> AppResult<Value> {
        ensure_allowed(session.guard(required_role(resource)), resource)?;

        self.source
            .get(resource, id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("{} {} not found", resource, id)))
    }
}

fn ensure_allowed(decision: GuardDecision, resource: Resource) -> AppResult<()> {
    match decision {
        GuardDecision::Allow => Ok(()),
        GuardDecision::RedirectToLogin => Err(AppError::unauthorized("login required")),
        GuardDecision::ShowForbidden => Err(AppError::forbidden(format!(
            "not allowed to view {}",
            resource
        ))),
    }
}
