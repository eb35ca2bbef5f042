use serde_json::Value;

use pyforge::{
    cli::{self, get_log_level_from_verbose},
    error::default_error_handler,
    generator::ProjectGenerator,
    providers::HostSystem,
};

fn main() {
    let system = HostSystem;
    let project_dir = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            default_error_handler(e.into());
            return;
        }
    };

    let mut generator = ProjectGenerator::new(&system, &project_dir);
    let (args, option_values) = cli::parse(&generator.options());

    env_logger::Builder::new()
        .filter_level(get_log_level_from_verbose(args.verbose))
        .init();

    if let Err(err) = cli::run(&args, Value::Object(option_values), &mut generator) {
        default_error_handler(err);
    }
}
