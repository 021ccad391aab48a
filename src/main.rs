//! scripts - pick a script from your scripts directory and run it.

use std::process::ExitCode;

use toolbox::cli::Palette;

fn main() -> ExitCode {
    toolbox::launcher::main(Palette::Scripts)
}
