use catering_server::{Config, Server, ServerState, init_logger};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 环境变量 (.env 可选)
    dotenv::dotenv().ok();

    // 2. 配置 — 缺少必填项直接失败
    let config = Config::from_env()?;

    // 3. 日志
    init_logger(&config.log_level, config.log_dir.as_deref());

    tracing::info!("Catering server starting...");

    // 4. 打开数据库并初始化共享状态
    let state = ServerState::initialize(config).await?;

    // 5. 启动 HTTP 服务器
    let server = Server::new(state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
