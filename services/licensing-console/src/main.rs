//! licensing-console - 授权订单报价与会话控制台

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use dify_auth_core::{SessionKind, keys};
use dify_common::Resource;
use dify_config::AppConfig;
use dify_errors::AppError;
use dify_ports::SessionStore;
use serde::Serialize;
use tracing::{error, info};

use licensing_console::application::{
    QuoteRequest, QuoteService, ResourceService, SessionService,
};
use licensing_console::config::build_pricing_engine;
use licensing_console::infrastructure::{build_data_source, build_session_store};

#[derive(Parser)]
#[command(name = "licensing-console")]
#[command(about = "License order quoting and session console")]
struct Cli {
    /// 配置目录
    #[arg(long, global = true, default_value = "config")]
    config_dir: String,
    /// 结束时向 stderr 输出 Prometheus 指标
    #[arg(long, global = true, default_value_t = false)]
    metrics: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// 读取 JSON 报价请求并输出报价
    Quote {
        /// 请求文件，缺省读 stdin
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// 提交订单（需确认协议）
    Submit {
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// 输出当前会话的守卫决策
    Guard { role: Option<String> },
    /// 输出当前身份与角色解析
    Whoami,
    /// 员工登录
    Login {
        #[arg(long)]
        token: String,
        /// 用户信息 JSON
        #[arg(long)]
        user_info: String,
    },
    /// 合作伙伴登录
    PartnerLogin {
        #[arg(long)]
        token: String,
        /// 合作伙伴信息 JSON
        #[arg(long)]
        partner_info: String,
    },
    Logout,
    /// 分页列出资源
    List {
        resource: Resource,
        #[arg(default_value_t = 1)]
        page: u32,
    },
    /// 查看单个资源
    Show { resource: Resource, id: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let config = AppConfig::load(&cli.config_dir).context("Failed to load configuration")?;
    dify_telemetry::init(
        &config.telemetry.log_level,
        config.telemetry.json || config.is_production(),
    )?;
    let metrics = if cli.metrics {
        Some(dify_telemetry::init_metrics()?)
    } else {
        None
    };
    info!(app_name = %config.app_name, app_env = %config.app_env, "Console initialized");

    let outcome = run(cli.command, &config).await;

    if let Some(handle) = metrics {
        eprintln!("{}", handle.render());
    }

    match outcome {
        Ok(()) => Ok(ExitCode::SUCCESS),
        // 业务错误以 Problem Details 输出到 stdout，便于脚本解析
        Err(e) => match e.downcast_ref::<AppError>() {
            Some(app_error) => {
                error!(error = %app_error, "Command failed");
                print_json(&app_error.to_problem_details())?;
                Ok(ExitCode::from(app_error.exit_code()))
            }
            None => Err(e),
        },
    }
}

async fn run(command: Command, config: &AppConfig) -> anyhow::Result<()> {
    let store = build_session_store(&config.session);
    let session = SessionService::new(store.clone());

    match command {
        Command::Quote { file } => {
            let service = quote_service(config)?;
            print_json(&service.quote(&read_request(file)?)?)
        }
        Command::Submit { file } => {
            let service = quote_service(config)?;
            print_json(&service.submit(&read_request(file)?)?)
        }
        Command::Guard { role } => {
            let decision = session.guard(role.as_deref());
            print_json(&serde_json::json!({
                "decision": decision,
                "redirect_to": decision.redirect_to(),
            }))
        }
        Command::Whoami => print_json(&session.whoami()),
        Command::Login { token, user_info } => {
            print_json(&session.login_staff(&token, &user_info)?)
        }
        Command::PartnerLogin {
            token,
            partner_info,
        } => print_json(&session.login_partner(&token, &partner_info)?),
        Command::Logout => {
            session.logout()?;
            Ok(())
        }
        Command::List { resource, page } => {
            let resources = resource_service(config, &session, &store)?;
            print_json(&resources.list(&session, resource, page).await?)
        }
        Command::Show { resource, id } => {
            let resources = resource_service(config, &session, &store)?;
            print_json(&resources.get(&session, resource, &id).await?)
        }
    }
}

fn quote_service(config: &AppConfig) -> anyhow::Result<QuoteService> {
    let engine = build_pricing_engine(&config.pricing)?;
    Ok(QuoteService::new(engine, config.pricing.default_tax_rate)?)
}

fn resource_service(
    config: &AppConfig,
    session: &SessionService,
    store: &Arc<dyn SessionStore>,
) -> anyhow::Result<ResourceService> {
    let token_key = match session.context().active_kind() {
        SessionKind::Staff => keys::STAFF_TOKEN,
        SessionKind::Partner => keys::PARTNER_TOKEN,
    };
    let source = build_data_source(
        &config.data_source,
        &config.api,
        &config.config_dir,
        store.get(token_key),
    )?;
    Ok(ResourceService::new(source, config.api.page_size))
}

fn read_request(file: Option<PathBuf>) -> anyhow::Result<QuoteRequest> {
    let raw = match file {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("Failed to read request from stdin")?;
            raw
        }
    };
    serde_json::from_str(&raw).context("Invalid quote request")
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
