use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use log::LevelFilter;
use std::path::PathBuf;
use std::str::FromStr;

use arraylogic::catalog::{ArrayOp, VectorOp};
use arraylogic::config::LogicConfig;
use arraylogic::math::FlatArray;
use arraylogic_cli::bank_io::{export_tsv, load_bank, load_config, save_bank};
use arraylogic_cli::eval::{
    apply_array_op, apply_vector_op, format_vector_value, parse_vector, ArrayArgs,
};

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("ARRAYLOGIC_LOG", "error,arraylogic=info"))
        .init();

    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("ops", _)) => handle_ops(),
        Some(("array", sub_m)) => handle_array(sub_m),
        Some(("vector", sub_m)) => handle_vector(sub_m),
        Some(("bank", sub_m)) => handle_bank(sub_m),
        _ => unreachable!("Subcommand is required by CLI configuration"),
    }
}

fn config_arg() -> Arg {
    Arg::new("config")
        .long("config")
        .help("Path to a JSON logic configuration file")
        .value_parser(clap::value_parser!(PathBuf))
        .value_hint(ValueHint::FilePath)
}

fn bank_file_arg() -> Arg {
    Arg::new("file")
        .help("Path to the bank file (JSON)")
        .required(true)
        .value_parser(clap::value_parser!(PathBuf))
        .value_hint(ValueHint::FilePath)
}

fn build_cli() -> Command {
    Command::new("arraylogic")
        .version(clap::crate_version!())
        .about("Fixed-rank array engine for scripted logic")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(Command::new("ops").about("List the array and vector opcode catalogs"))
        .subcommand(
            Command::new("array")
                .about("Apply one array opcode to descriptor arrays")
                .arg(
                    Arg::new("op")
                        .help("Opcode symbol or name, e.g. '+', 'pick', 'resize'")
                        .required(true)
                        .allow_hyphen_values(true),
                )
                .arg(
                    Arg::new("lhs")
                        .help("Array descriptor, e.g. '[2 1 2] {1 2 3 4}'")
                        .required(true),
                )
                .arg(Arg::new("rhs").help("Second array descriptor for binary opcodes"))
                .arg(
                    Arg::new("at")
                        .long("at")
                        .help("Position (three coordinates) for change/pick")
                        .num_args(3)
                        .allow_negative_numbers(true)
                        .value_parser(clap::value_parser!(i64)),
                )
                .arg(
                    Arg::new("index")
                        .long("index")
                        .help("Linear index for change/pick")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    Arg::new("value")
                        .long("value")
                        .help("Value written by change")
                        .allow_negative_numbers(true)
                        .value_parser(clap::value_parser!(f64)),
                )
                .arg(
                    Arg::new("factor")
                        .long("factor")
                        .help("Scale factor for '*' without a second array")
                        .allow_negative_numbers(true)
                        .value_parser(clap::value_parser!(f64)),
                )
                .arg(
                    Arg::new("dims")
                        .long("dims")
                        .help("Target extents for resize")
                        .num_args(3)
                        .allow_negative_numbers(true)
                        .value_parser(clap::value_parser!(i64)),
                )
                .arg(
                    Arg::new("lossless")
                        .long("lossless")
                        .help("Only reshape when the element count is unchanged")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("lossy"),
                )
                .arg(
                    Arg::new("lossy")
                        .long("lossy")
                        .help("Crop or zero-pad on resize, overriding the configuration file")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .help("Seed for shuffle. Overrides the configuration file.")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(config_arg()),
        )
        .subcommand(
            Command::new("vector")
                .about("Apply one vector opcode to two raw vectors")
                .arg(
                    Arg::new("op")
                        .help("Opcode symbol or name: '+', '-', 'dot', 'cross'")
                        .required(true)
                        .allow_hyphen_values(true),
                )
                .arg(
                    Arg::new("a")
                        .help("First vector, e.g. '1 2 3' or '1,2,3'")
                        .required(true)
                        .allow_hyphen_values(true),
                )
                .arg(
                    Arg::new("b")
                        .help("Second vector")
                        .required(true)
                        .allow_hyphen_values(true),
                ),
        )
        .subcommand(
            Command::new("bank")
                .about("Manage a bank file of labelled arrays")
                .subcommand_required(true)
                .arg(config_arg().global(true))
                .subcommand(
                    Command::new("add")
                        .about("Append an array to the bank")
                        .arg(bank_file_arg())
                        .arg(Arg::new("label").required(true))
                        .arg(Arg::new("descriptor").required(true)),
                )
                .subcommand(
                    Command::new("remove")
                        .about("Remove the array at a slot")
                        .arg(bank_file_arg())
                        .arg(
                            Arg::new("slot")
                                .required(true)
                                .value_parser(clap::value_parser!(usize)),
                        ),
                )
                .subcommand(
                    Command::new("edit")
                        .about("Overwrite one cell of an array by linear index")
                        .arg(bank_file_arg())
                        .arg(
                            Arg::new("slot")
                                .required(true)
                                .value_parser(clap::value_parser!(usize)),
                        )
                        .arg(
                            Arg::new("index")
                                .required(true)
                                .value_parser(clap::value_parser!(usize)),
                        )
                        .arg(Arg::new("value").required(true).allow_hyphen_values(true)),
                )
                .subcommand(
                    Command::new("show")
                        .about("Print every array in the bank")
                        .arg(bank_file_arg()),
                )
                .subcommand(
                    Command::new("export")
                        .about("Write the bank as a TSV grid of last-axis rows")
                        .arg(bank_file_arg())
                        .arg(
                            Arg::new("output_file")
                                .short('o')
                                .long("output_file")
                                .help("Path of the TSV file to write")
                                .required(true)
                                .value_parser(clap::value_parser!(PathBuf))
                                .value_hint(ValueHint::FilePath),
                        ),
                ),
        )
}

fn resolve_config(matches: &ArgMatches) -> Result<LogicConfig> {
    match matches.get_one::<PathBuf>("config") {
        Some(path) => {
            log::info!("[ArrayLogic] Using config: {:?}", path);
            load_config(path)
        }
        None => Ok(LogicConfig::default()),
    }
}

fn handle_ops() -> Result<()> {
    println!("array opcodes:");
    for op in ArrayOp::ALL {
        let kind = if op.is_scalar() { "scalar" } else { "array" };
        println!("  {:<8} {:<10} {}", op.symbol(), op.name(), kind);
    }
    println!("vector opcodes:");
    for op in VectorOp::ALL {
        let kind = if op.is_scalar() { "scalar" } else { "vector" };
        println!("  {:<8} {:<10} {}", op.symbol(), op.name(), kind);
    }
    Ok(())
}

fn handle_array(matches: &ArgMatches) -> Result<()> {
    let mut config = resolve_config(matches)?;
    if let Some(seed) = matches.get_one::<u64>("seed") {
        config.seed = Some(*seed);
    }
    if matches.get_flag("lossless") {
        config.lossless_resize = true;
    } else if matches.get_flag("lossy") {
        config.lossless_resize = false;
    }

    let op_text: &String = matches.get_one("op").unwrap();
    let op = ArrayOp::from_str(op_text).map_err(anyhow::Error::msg)?;
    let lhs_text: &String = matches.get_one("lhs").unwrap();
    let lhs = FlatArray::from_descriptor(lhs_text);
    let rhs = matches
        .get_one::<String>("rhs")
        .map(|text| FlatArray::from_descriptor(text));

    let dims = match matches.get_many::<i64>("dims") {
        Some(values) => {
            let values: Vec<i64> = values.copied().collect();
            let dims = <[i64; 3]>::try_from(values)
                .map_err(|_| anyhow::anyhow!("--dims takes three values"))?;
            Some(dims)
        }
        None => None,
    };
    let args = ArrayArgs {
        at: matches.get_many::<i64>("at").map(|v| v.copied().collect()),
        index: matches.get_one::<usize>("index").copied(),
        value: matches.get_one::<f64>("value").copied(),
        factor: matches.get_one::<f64>("factor").copied(),
        dims,
        lossless: config.lossless_resize,
    };

    let mut rng = config.rng();
    let outcome = apply_array_op(op, lhs, rhs.as_ref(), &args, &mut rng)?;
    println!("{}", outcome);
    Ok(())
}

fn handle_vector(matches: &ArgMatches) -> Result<()> {
    let op_text: &String = matches.get_one("op").unwrap();
    let op = VectorOp::from_str(op_text).map_err(anyhow::Error::msg)?;
    let a = parse_vector(matches.get_one::<String>("a").unwrap())?;
    let b = parse_vector(matches.get_one::<String>("b").unwrap())?;
    println!("{}", format_vector_value(&apply_vector_op(op, &a, &b)));
    Ok(())
}

fn handle_bank(matches: &ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("add", add_m)) => {
            let config = resolve_config(add_m)?;
            let path: &PathBuf = add_m.get_one("file").unwrap();
            let label: &String = add_m.get_one("label").unwrap();
            let descriptor: &String = add_m.get_one("descriptor").unwrap();

            let mut bank = load_bank(path, &config)?;
            let slot = bank.push(label.as_str(), FlatArray::from_descriptor(descriptor))?;
            save_bank(path, &bank)?;
            eprintln!("[ArrayLogic::Bank] Stored '{}' at slot {}", label, slot);
            Ok(())
        }
        Some(("remove", remove_m)) => {
            let config = resolve_config(remove_m)?;
            let path: &PathBuf = remove_m.get_one("file").unwrap();
            let slot: usize = *remove_m.get_one("slot").unwrap();

            let mut bank = load_bank(path, &config)?;
            let removed = bank.remove(slot)?;
            save_bank(path, &bank)?;
            eprintln!("[ArrayLogic::Bank] Removed '{}' from slot {}", removed.label, slot);
            Ok(())
        }
        Some(("edit", edit_m)) => {
            let config = resolve_config(edit_m)?;
            let path: &PathBuf = edit_m.get_one("file").unwrap();
            let slot: usize = *edit_m.get_one("slot").unwrap();
            let index: usize = *edit_m.get_one("index").unwrap();
            let value: &String = edit_m.get_one("value").unwrap();

            let mut bank = load_bank(path, &config)?;
            bank.edit_cell(slot, index, value)?;
            save_bank(path, &bank)?;
            Ok(())
        }
        Some(("show", show_m)) => {
            let config = resolve_config(show_m)?;
            let path: &PathBuf = show_m.get_one("file").unwrap();

            let bank = load_bank(path, &config)?;
            for (slot, entry) in bank.iter().enumerate() {
                println!("{}\t{}\t{}", slot, entry.label, entry.array);
            }
            Ok(())
        }
        Some(("export", export_m)) => {
            let config = resolve_config(export_m)?;
            let path: &PathBuf = export_m.get_one("file").unwrap();
            let output: &PathBuf = export_m.get_one("output_file").unwrap();

            let bank = load_bank(path, &config)?;
            export_tsv(output, &bank)?;
            eprintln!(
                "[ArrayLogic::Bank] Exported {} arrays to {:?}",
                bank.len(),
                output
            );
            Ok(())
        }
        _ => unreachable!(),
    }
}
