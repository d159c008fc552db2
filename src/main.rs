use anyhow::Result;
use evaluate_answer_script::config::Config;
use evaluate_answer_script::logger;
use evaluate_answer_script::orchestrator::App;

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logger::init();

    // 加载配置
    let config = Config::from_env();

    // 初始化并运行应用
    App::initialize(config).await?.run().await?;

    Ok(())
}
