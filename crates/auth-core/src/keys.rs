//! 本地会话存储键

/// 员工访问令牌
pub const STAFF_TOKEN: &str = "dify_token";
/// 员工用户信息（JSON）
pub const STAFF_USER_INFO: &str = "dify_user_info";
/// 当前角色
pub const CURRENT_ROLE: &str = "dify_user_role";
/// 合作伙伴访问令牌
pub const PARTNER_TOKEN: &str = "dify_partner_token";
/// 合作伙伴信息（JSON）
pub const PARTNER_INFO: &str = "dify_partner_info";

/// 登出时需要清理的全部键
pub const ALL: [&str; 5] = [
    STAFF_TOKEN,
    STAFF_USER_INFO,
    CURRENT_ROLE,
    PARTNER_TOKEN,
    PARTNER_INFO,
];
