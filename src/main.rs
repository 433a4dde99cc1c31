use clap::Parser;
use small_calc::app::session::run_keypad_session;
use small_calc::core::calculator::render_keypad;
use small_calc::utils::error::ErrorSeverity;
use small_calc::utils::{logger, validation::Validate};
use small_calc::{
    calculate_sum, create_processor, evaluate, process_list, Accumulator, AppConfig, AppError,
    Calculator, CliConfig, Command, LocalStorage, StatsEngine, StatsOverrides, StatsPipeline,
    StatsSettings,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = run(cli).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 建議: {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };

        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

fn load_config(path: Option<&str>) -> Result<AppConfig, AppError> {
    let config = match path {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            AppConfig::from_file(path)?
        }
        None => AppConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

async fn run(cli: CliConfig) -> Result<(), AppError> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Sum { a, b } => {
            println!("{}", calculate_sum(a, b)?);
        }
        Command::List { mut numbers } => {
            let total = process_list(&mut numbers)?;
            tracing::debug!("Sorted: {:?}", numbers);
            println!("{}", total);
        }
        Command::Accumulate { initial, amounts } => {
            let mut accumulator = Accumulator::new(initial);
            for amount in amounts {
                accumulator.add(amount)?;
            }
            println!("{}", accumulator.value());
        }
        Command::Stats {
            name,
            input,
            output,
            output_file,
            values,
        } => {
            let settings = StatsSettings::resolve(
                &config,
                StatsOverrides {
                    name,
                    input_file: input,
                    output_path: output,
                    output_file,
                    values,
                },
            )?;

            // 沒有輸入檔時直接在終端輸出結果
            if settings.input_file.is_none() && !settings.initial_data.is_empty() {
                let mut processor = create_processor(
                    settings.name.clone(),
                    Some(settings.initial_data.as_slice()),
                );
                let results = processor.process_data();
                let stats = processor.statistics();
                println!("Processed {} items", results.len());
                println!("Statistics: {}", serde_json::to_string(&stats)?);
            }

            let storage = LocalStorage::new(".");
            let engine = StatsEngine::new(StatsPipeline::new(storage, settings));
            let output_file = engine.run().await?;

            println!("✅ Statistics report written");
            println!("📁 Output saved to: {}", output_file);
        }
        Command::Eval { expression } => {
            println!("{}", evaluate(&expression)?);
        }
        Command::Calc => {
            println!("{}", render_keypad());
            let stdin = std::io::stdin();
            let mut stdout = std::io::stdout();
            let mut calculator = Calculator::new();
            run_keypad_session(
                stdin.lock(),
                &mut stdout,
                &mut calculator,
                &config.calculator.error_title,
            )?;
        }
        Command::Keypad => {
            println!("{}", render_keypad());
        }
    }

    Ok(())
}
