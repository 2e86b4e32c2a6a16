use std::path::Path;
use std::process;

use reduce::common::source::Source;

fn main() {
    env_logger::init();

    let mut args = std::env::args_os();
    let _program = args.next();
    let argument = match (args.next(), args.next()) {
        (Some(argument), None) => argument,
        _ => {
            // Wrong argument count: no stdout, nonzero exit, per the
            // external interface contract.
            process::exit(1);
        }
    };

    let source = match Path::new(&argument) {
        path if path.is_file() => match Source::path(path) {
            Ok(source) => source,
            Err(error) => {
                eprintln!("Error: could not read {}: {}", path.display(), error);
                process::exit(1);
            }
        },
        _ => Source::source(&argument.to_string_lossy()),
    };

    match reduce::compiler::compile(source) {
        Ok(normal_form) => println!("{}", normal_form),
        Err(error) => {
            eprintln!("{}", error);
            process::exit(1);
        }
    }
}
