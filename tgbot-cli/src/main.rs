//! tgbot CLI: inspect the bot context, parse update bodies, manage the webhook. Config from env and optional CLI args.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tgbot_cli::{build_webhook_options, load_config, Cli, Commands};
use tgbot_context::BotContext;
use tgbot_core::{command_class_name, init_tracing};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = load_config(cli.api_key)?;
    init_tracing(config.log_file.as_deref())?;

    let ctx = BotContext::from_config(&config).context("Build bot context from config")?;
    info!(bot_id = %ctx.bot_id(), username = %ctx.bot_username(), "Bot context ready");

    match cli.command {
        Commands::Info => handle_info(&ctx),
        Commands::ParseUpdate { file } => handle_parse_update(&ctx, file),
        Commands::SetWebhook {
            url,
            certificate,
            max_connections,
            allowed_updates,
            options,
        } => {
            let options = build_webhook_options(
                options.as_deref(),
                certificate,
                max_connections,
                allowed_updates,
            )?;
            let resp = ctx.set_webhook(&url, options).await?;
            println!("{}", non_empty_or(resp.description(), "Webhook was set"));
            Ok(())
        }
        Commands::DeleteWebhook => {
            let resp = ctx.delete_webhook().await?;
            println!("{}", non_empty_or(resp.description(), "Webhook was deleted"));
            Ok(())
        }
    }
}

fn handle_info(ctx: &BotContext) -> Result<()> {
    println!("version:        {}", BotContext::version());
    println!("bot id:         {}", ctx.bot_id());
    println!("bot username:   {}", non_empty_or(ctx.bot_username(), "-"));
    println!("upload path:    {}", display_path(ctx.upload_path()));
    println!("download path:  {}", display_path(ctx.download_path()));
    println!("commands path:  {}", display_path(ctx.commands_path()));
    println!(
        "polling mode:   {}",
        if ctx.is_get_updates_without_database() {
            "getUpdates without database"
        } else {
            "default"
        }
    );
    Ok(())
}

fn handle_parse_update(ctx: &BotContext, file: Option<PathBuf>) -> Result<()> {
    let raw = match file {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("Read update body from {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Read update body from stdin")?;
            buf
        }
    };

    let update = ctx.parse_update(&raw)?;
    println!("update_id: {}", update.update_id());
    println!("type:      {}", update.update_type());
    if let Some(command) = update.command() {
        println!("command:   {}", command);
        println!("handler:   {}", command_class_name(command));
    }
    Ok(())
}

fn display_path(path: Option<&std::path::Path>) -> String {
    path.map(|p| p.display().to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn non_empty_or<'a>(s: &'a str, fallback: &'a str) -> &'a str {
    if s.is_empty() {
        fallback
    } else {
        s
    }
}
