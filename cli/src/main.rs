#[macro_use]
extern crate clap;

use clap::Arg;

fn main() {
    tracing_subscriber::fmt::init();

    let matches = app_from_crate!()
        .arg(
            Arg::with_name("SCRIPT")
                .help("Sets the micro-shader script to load")
                .required(true)
                .index(1),
        )
        .get_matches();

    let script = matches.value_of("SCRIPT").expect("SCRIPT is required");

    let result = mshade_cli::load_script(script).and_then(|image| mshade_cli::run_demo(&image));

    if let Err(err) = result {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}
