// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use wealthflow::{cli, commands, store};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let mut store = store::open_or_init()?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Data store initialized at {}", store::data_path()?.display());
        }
        Some(("account", sub)) => commands::accounts::handle(&mut store, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&mut store, sub)?,
        Some(("stock", sub)) => commands::stocks::handle(&mut store, sub)?,
        Some(("dashboard", sub)) => commands::dashboard::handle(&store, sub)?,
        Some(("report", sub)) => commands::reports::handle(&store, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&store)?,
        Some(("export", sub)) => commands::exporter::handle(&store, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
