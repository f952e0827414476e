mod compare;
mod reload;
mod utils;

use clap::{
    Parser,
    Subcommand,
};
use compare::CompareArgs;
use reload::ReloadArgs;
use utils::UtilsArgs;
use wild::ArgsOs;

#[derive(Parser, Debug)]
#[command(
    author = env!("CARGO_PKG_AUTHORS"),
    version = env!("CARGO_PKG_VERSION"),
    about = env!("CARGO_PKG_DESCRIPTION"),
    long_about = None,)]
struct Cli {
    #[command(subcommand)]
    command: MainMenu,
}

#[derive(Subcommand, Debug)]
enum MainMenu {
    /// Join nanopore and bisulfite calls and bin their methylation levels.
    Compare {
        #[clap(flatten)]
        utils: UtilsArgs,
        #[clap(flatten)]
        args:  CompareArgs,
    },

    /// Re-analyse a raw joint array written by `compare`.
    Reload {
        #[clap(flatten)]
        utils: UtilsArgs,
        #[clap(flatten)]
        args:  ReloadArgs,
    },
}

fn main() -> anyhow::Result<()> {
    let args: ArgsOs = wild::args_os();
    let cli = Cli::parse_from(args);

    match cli.command {
        MainMenu::Compare { utils, args } => {
            utils.setup()?;
            args.run(&utils)?;
        },
        MainMenu::Reload { utils, args } => {
            utils.setup()?;
            args.run(&utils)?;
        },
    }
    Ok(())
}
