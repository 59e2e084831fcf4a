use anyhow::Context as _;
use clap::builder::PossibleValuesParser;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use keepsake_core::{Demo, Fault, HarvestConfig, SUPPORTED};
use keepsake_question::QuestionCatalog;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("keepsake")
        .version(keepsake_core::VERSION)
        .about("Harvests puzzle state into review questions")
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Output as JSON"),
        )
        .subcommand(
            Command::new("simulate")
                .about("Run the harvester against a seeded demo bomb")
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .default_value("42")
                        .value_parser(value_parser!(u64))
                        .help("Random seed for the bomb and the answer draws"),
                )
                .arg(
                    Arg::new("ticks")
                        .long("ticks")
                        .default_value("1000")
                        .value_parser(value_parser!(u64))
                        .help("Maximum number of scheduler passes"),
                )
                .arg(
                    Arg::new("fault")
                        .long("fault")
                        .value_parser(PossibleValuesParser::new(Fault::NAMES))
                        .help("Inject a fault into one module"),
                )
                .arg(
                    Arg::new("fast")
                        .long("fast")
                        .action(ArgAction::SetTrue)
                        .help("Do not pace passes to the tick interval"),
                ),
        )
        .subcommand(Command::new("catalog").about("List supported module types and question kinds"))
}

fn load_config(matches: &ArgMatches) -> anyhow::Result<HarvestConfig> {
    match matches.get_one::<PathBuf>("config") {
        Some(path) => HarvestConfig::load(path)
            .with_context(|| format!("loading {}", path.display())),
        None => Ok(HarvestConfig::default()),
    }
}

fn init_tracing(config: &HarvestConfig, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn simulate(config: &HarvestConfig, args: &ArgMatches, json: bool) -> anyhow::Result<bool> {
    let seed = args.get_one::<u64>("seed").copied().unwrap_or(42);
    let ticks = args.get_one::<u64>("ticks").copied().unwrap_or(1000);
    let fault = args
        .get_one::<String>("fault")
        .map(|name| name.parse::<Fault>())
        .transpose()?;

    let mut demo = Demo::new(config, seed, fault)?;
    let report = if args.get_flag("fast") {
        demo.run(ticks)
    } else {
        demo.run_paced(config.tick_interval(), ticks).await
    };
    let questions = demo.rendered();

    if json {
        let output = serde_json::json!({
            "seed": seed,
            "fault": fault,
            "report": report,
            "questions": questions,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", report.generate_text());
        for question in &questions {
            println!("{} {}", question.module, question.text);
            for (index, option) in question.options.iter().enumerate() {
                let marker = if index == question.correct_index { '*' } else { ' ' };
                println!("    {marker} {option}");
            }
        }
    }
    Ok(report.all_ended())
}

fn list_catalog(config: &HarvestConfig, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(SUPPORTED)?);
        return Ok(());
    }

    let catalog: QuestionCatalog = config.catalog()?;
    for module in SUPPORTED {
        println!(
            "{:<22} {:<24} component {}",
            module.module_type, module.display_name, module.component_type
        );
        for kind in module.kinds {
            let template = catalog.info(*kind).map_or("", |info| info.template.as_str());
            let name = kind.name();
            println!("    {name:<30} {template}");
        }
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let matches = cli().get_matches();
    // global flags are read where they were matched
    let (command, args) = match matches.subcommand() {
        Some((name, args)) => (Some(name), args),
        None => (None, &matches),
    };
    let config = load_config(args)?;
    let json = args.get_flag("json");
    init_tracing(&config, json);

    match command {
        Some("simulate") => {
            let all_ended = simulate(&config, args, json).await?;
            std::process::exit(if all_ended { 0 } else { 1 });
        }
        Some("catalog") => list_catalog(&config, json),
        _ => {
            cli().print_help()?;
            Ok(())
        }
    }
}
