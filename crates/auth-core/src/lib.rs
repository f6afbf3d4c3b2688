//! dify-auth-core - 认证核心库
//!
//! 基于本地持久化会话的身份解析、角色判定与路由守卫决策。
//! 所有判定只读本地存储，不发起网络请求；缺失或损坏的会话数据
//! 一律降级为“未登录 / 无权限”，不会返回错误。

mod context;
mod guard;
mod identity;
pub mod keys;
mod role;
mod session;

pub use context::AuthorizationContext;
pub use guard::GuardDecision;
pub use identity::{Actor, PartnerIdentity, SessionKind, StaffIdentity};
pub use role::{Role, RoleResolution, RoleSource};
pub use session::SessionManager;

/// 守卫检查宏：不满足时直接返回 Forbidden
#[macro_export]
macro_rules! require_role {
    ($ctx:expr, $role:expr) => {
        if !($ctx.is_admin() || $ctx.has_role($role)) {
            return Err(dify_errors::AppError::forbidden(format!(
                "Missing role: {}",
                $role
            )));
        }
    };
}
