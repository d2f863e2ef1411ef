use anyhow::Context;
use clap::Parser;
use image_enhancer::cli::{Args, Commands};
use image_enhancer::commands::{print_result, run_batch, run_enhance};
use image_enhancer::logger::{set_quiet_mode, set_verbose_mode};
use image_enhancer::{ClientConfig, EnhancerClient};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    set_quiet_mode(args.quiet);
    set_verbose_mode(args.verbose);

    let config = ClientConfig::new(Some(args.base_url), args.admin_key);
    let client = EnhancerClient::new(config).context("Failed to initialise the API client")?;

    let result = match args.command {
        Commands::Enhance { input, output, model, scale } => {
            run_enhance(&client, &input, &output, &model, scale)?;
            return Ok(());
        }
        Commands::Batch { input, output_dir, model, scale, recursive } => {
            run_batch(&client, &input, &output_dir, &model, scale, recursive)?;
            return Ok(());
        }
        Commands::Classify { input } => client.classify_image(&input),
        Commands::Status => client.system_status(),
        Commands::Health => client.health_check(),
        Commands::Logs { level, limit } => client.logs(&level, limit),
        Commands::Metrics { time_range } => client.metrics(&time_range),
        Commands::TestApis => client.test_apis(),
        Commands::ClearCache => client.clear_cache(),
        Commands::DebugImage { image_id, no_metadata } => {
            client.debug_image(&image_id, !no_metadata)
        }
        Commands::ExportData { data_type, format } => client.export_data(&data_type, &format),
        Commands::SystemInfo => client.system_info(),
    };

    print_result(&result)?;
    Ok(())
}
