use clap::Parser;
use lifecycle_calc::{
    Calculator, CalculatorOutput, Cli, Config, OutputFormat, Result, display_cost_table,
    init_logger,
};
use log::{debug, info};

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logger(cli.verbose, cli.quiet)?;

    info!("Starting S3 Lifecycle Policy Calculator");
    let config = Config::from_cli(&cli)?;
    debug!("Pricing table: {}", config.pricing_source);
    debug!("Scenario: {:?}", config.scenario);

    let calculator = Calculator::new(config.pricing);
    let comparison =
        calculator.compare_policy(&config.starting_tier, &config.target_tier, &config.scenario)?;

    match config.output {
        OutputFormat::Text => {
            let output = CalculatorOutput::new(config.scenario, &config.pricing_source, comparison);
            output.write_text(&mut std::io::stdout().lock())?;
        }
        OutputFormat::Json => {
            let output = CalculatorOutput::new(config.scenario, &config.pricing_source, comparison);
            output.write_json(&mut std::io::stdout().lock())?;
        }
        OutputFormat::Table => display_cost_table(&comparison)?,
    }

    Ok(())
}
