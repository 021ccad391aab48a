//! Commands compiled into the `flow` palette.

use clap::Parser;

use crate::error::exit_code;
use crate::registry::{CommandDescriptor, Target};

/// Built-in commands, in the order the palette shows them.
pub fn flow_builtins() -> Vec<CommandDescriptor> {
    vec![CommandDescriptor::with_summary(
        "hello",
        Target::Builtin(hello),
        HELLO_ABOUT,
    )]
}

const HELLO_ABOUT: &str = "Say hello to someone.";

#[derive(Parser, Debug)]
#[command(name = "hello", about = HELLO_ABOUT, no_binary_name = true)]
struct HelloArgs {
    /// Who to greet
    #[arg(default_value = "world")]
    name: String,
}

fn hello(args: &[String]) -> anyhow::Result<i32> {
    let parsed = match HelloArgs::try_parse_from(args) {
        Ok(parsed) => parsed,
        Err(e) => {
            e.print()?;
            return Ok(e.exit_code());
        }
    };

    println!("{}", greeting(&parsed.name));
    Ok(exit_code::SUCCESS)
}

fn greeting(name: &str) -> String {
    format!("Hello, {name}!")
}
