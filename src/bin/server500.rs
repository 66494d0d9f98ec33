use anyhow::Result;
use kullo_tools::{arguments::ServerArguments, logging::init_logger, server};
use pretty_env_logger::env_logger::Target;

#[tokio::main]
async fn main() -> Result<()> {
    let args = ServerArguments::parse_known();
    init_logger(false, Target::Stdout);

    server::serve(server::server500::router(), args.port).await?;
    Ok(())
}
