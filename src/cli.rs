// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version, value_parser};

pub fn build_cli() -> Command {
    Command::new("wealthflow")
        .version(crate_version!())
        .about("WealthFlow: personal finance, stock portfolio, and AI-assisted insight CLI")
        .subcommand(Command::new("init").about("Initialize the data store and seed sample data"))
        .subcommand(account_cmd())
        .subcommand(tx_cmd())
        .subcommand(stock_cmd())
        .subcommand(
            Command::new("dashboard")
                .about("Financial overview: totals, monthly flow, AI insight")
                .arg(
                    Arg::new("no-advice")
                        .long("no-advice")
                        .action(ArgAction::SetTrue)
                        .help("Skip the AI insight line"),
                ),
        )
        .subcommand(report_cmd())
        .subcommand(Command::new("doctor").about("Check stored data for integrity issues"))
        .subcommand(export_cmd())
}

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON Lines"),
    )
}

fn account_cmd() -> Command {
    Command::new("account")
        .about("Manage accounts")
        .subcommand(
            Command::new("add")
                .about("Add an account")
                .arg(Arg::new("name").long("name").required(true))
                .arg(
                    Arg::new("type")
                        .long("type")
                        .required(true)
                        .help("bank|cash|credit|investment"),
                )
                .arg(
                    Arg::new("balance")
                        .long("balance")
                        .required(true)
                        .help("Opening balance"),
                )
                .arg(Arg::new("currency").long("currency").default_value("TWD")),
        )
        .subcommand(json_flags(Command::new("list").about("List accounts")))
        .subcommand(
            Command::new("rm")
                .about("Remove an account; its transaction history is kept")
                .arg(Arg::new("name").long("name").required(true)),
        )
}

fn tx_cmd() -> Command {
    Command::new("tx")
        .about("Record and list transactions")
        .subcommand(
            Command::new("add")
                .about("Record a transaction")
                .arg(
                    Arg::new("date")
                        .long("date")
                        .required(true)
                        .help("YYYY-MM-DD"),
                )
                .arg(Arg::new("account").long("account").required(true))
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(
                    Arg::new("type")
                        .long("type")
                        .default_value("expense")
                        .help("income|expense|transfer"),
                )
                .arg(Arg::new("category").long("category").default_value("Other"))
                .arg(
                    Arg::new("description")
                        .long("description")
                        .default_value(""),
                ),
        )
        .subcommand(json_flags(
            Command::new("list")
                .about("List transactions, most recent first")
                .arg(Arg::new("month").long("month").help("YYYY-MM"))
                .arg(Arg::new("account").long("account"))
                .arg(Arg::new("category").long("category"))
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize)),
                ),
        ))
}

fn stock_cmd() -> Command {
    Command::new("stock")
        .about("Manage stock holdings")
        .subcommand(
            Command::new("add")
                .about("Add a holding; current price starts at the average cost")
                .arg(Arg::new("symbol").long("symbol").required(true))
                .arg(Arg::new("name").long("name"))
                .arg(
                    Arg::new("market")
                        .long("market")
                        .default_value("tw")
                        .help("tw|us|other"),
                )
                .arg(Arg::new("quantity").long("quantity").required(true))
                .arg(Arg::new("avg-cost").long("avg-cost").required(true)),
        )
        .subcommand(json_flags(
            Command::new("list").about("List holdings with valuation and P&L"),
        ))
        .subcommand(
            Command::new("rm")
                .about("Remove a holding")
                .arg(Arg::new("symbol").long("symbol").required(true)),
        )
        .subcommand(Command::new("refresh").about("Update current prices via Gemini"))
}

fn report_cmd() -> Command {
    Command::new("report")
        .about("Derived reports")
        .subcommand(json_flags(
            Command::new("cashflow")
                .about("Income vs expense per month")
                .arg(
                    Arg::new("months")
                        .long("months")
                        .value_parser(value_parser!(usize)),
                ),
        ))
        .subcommand(json_flags(
            Command::new("spend-by-category")
                .about("Expense totals by category, largest first")
                .arg(Arg::new("month").long("month").help("YYYY-MM")),
        ))
}

fn export_cmd() -> Command {
    Command::new("export").about("Export data").subcommand(
        Command::new("transactions")
            .about("Export transactions to a file")
            .arg(
                Arg::new("format")
                    .long("format")
                    .default_value("csv")
                    .help("csv|json"),
            )
            .arg(Arg::new("out").long("out").required(true)),
    )
}
