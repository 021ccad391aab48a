//! flow - pick one of your flow commands and run it.

use std::process::ExitCode;

use toolbox::cli::Palette;

fn main() -> ExitCode {
    toolbox::launcher::main(Palette::Flow)
}
