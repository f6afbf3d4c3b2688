//! 路由守卫决策

use serde::{Deserialize, Serialize};

/// 守卫决策
///
/// 决策与执行分离：调用方根据结果跳转登录页或原地渲染无权限视图。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardDecision {
    Allow,
    RedirectToLogin,
    ShowForbidden,
}

impl GuardDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardDecision::Allow)
    }

    /// 需要跳转的目标
    pub fn redirect_to(&self) -> Option<&'static str> {
        match self {
            GuardDecision::RedirectToLogin => Some("login"),
            GuardDecision::Allow | GuardDecision::ShowForbidden => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GuardDecision::Allow => "allow",
            GuardDecision::RedirectToLogin => "redirect_to_login",
            GuardDecision::ShowForbidden => "show_forbidden",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirect_only_for_login() {
        assert_eq!(GuardDecision::RedirectToLogin.redirect_to(), Some("login"));
        assert_eq!(GuardDecision::ShowForbidden.redirect_to(), None);
        assert_eq!(GuardDecision::Allow.redirect_to(), None);
        assert!(!GuardDecision::ShowForbidden.is_allowed());
    }
}
