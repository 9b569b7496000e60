// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_args(cmd: Command) -> Command {
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
            .conflicts_with("json")
            .help("Print as JSON lines"),
    )
}

fn customer_arg() -> Arg {
    Arg::new("customer")
        .long("customer")
        .short('c')
        .required(true)
        .help("Customer name (exact, case-sensitive)")
}

fn today_arg() -> Arg {
    Arg::new("today")
        .long("today")
        .help("Judge penalties as of this date instead of the clock (YYYY-MM-DD)")
}

pub fn build_cli() -> Command {
    Command::new("debtbook")
        .about("Customer debt payments, fiscal-year dues and late penalties")
        .version(clap::crate_version!())
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("customer")
                .about("Customer registry")
                .subcommand(
                    Command::new("add")
                        .about("Add a customer or update their total debt")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("debt").long("debt").required(true)),
                )
                .subcommand(json_args(Command::new("list")))
                .subcommand(Command::new("rm").arg(Arg::new("name").long("name").required(true)))
                .subcommand(
                    Command::new("import")
                        .about("Import customers from CSV (name,total_debt)")
                        .arg(Arg::new("path").long("path").required(true)),
                ),
        )
        .subcommand(
            Command::new("pay")
                .about("Record a payment and print a receipt")
                .arg(customer_arg())
                .arg(Arg::new("amount").long("amount").short('a').required(true))
                .arg(Arg::new("date").long("date").help("Payment date (YYYY-MM-DD), default today"))
                .arg(Arg::new("note").long("note"))
                .arg(today_arg())
                .arg(
                    Arg::new("no_receipt")
                        .long("no-receipt")
                        .action(ArgAction::SetTrue)
                        .help("Skip writing the receipt file"),
                ),
        )
        .subcommand(
            Command::new("payments")
                .about("Payment history")
                .subcommand(json_args(
                    Command::new("list")
                        .arg(Arg::new("customer").long("customer").short('c'))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(
                    Command::new("import")
                        .about("Append payments from CSV (customer,date,amount,note)")
                        .arg(Arg::new("path").long("path").required(true)),
                )
                .subcommand(
                    Command::new("export")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("csv")
                                .help("csv|json"),
                        )
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(json_args(
            Command::new("status")
                .about("Balances for the fiscal year containing --date")
                .arg(customer_arg())
                .arg(Arg::new("date").long("date").help("Reference date (YYYY-MM-DD), default today"))
                .arg(today_arg()),
        ))
        .subcommand(json_args(
            Command::new("history")
                .about("Four-year summary, most recent fiscal year first")
                .arg(customer_arg())
                .arg(Arg::new("date").long("date").help("Reference date (YYYY-MM-DD), default today")),
        ))
        .subcommand(
            json_args(
                Command::new("report")
                    .about("Shortfall and penalty for one fiscal year")
                    .arg(Arg::new("customer").long("customer").short('c'))
                    .arg(
                        Arg::new("year")
                            .long("year")
                            .value_parser(value_parser!(i32))
                            .help("Fiscal year label start, e.g. 2025 for 2025-2026"),
                    )
                    .arg(today_arg())
                    .subcommand(
                        Command::new("ranges")
                            .about("List fiscal year date ranges")
                            .arg(
                                Arg::new("from")
                                    .long("from")
                                    .value_parser(value_parser!(i32)),
                            )
                            .arg(
                                Arg::new("count")
                                    .long("count")
                                    .value_parser(value_parser!(usize))
                                    .default_value("4"),
                            ),
                    ),
            )
            .args_conflicts_with_subcommands(true),
        )
        .subcommand(
            Command::new("config")
                .about("Show or change settings")
                .subcommand(Command::new("show"))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("key").required(true))
                        .arg(Arg::new("value").required(true)),
                ),
        )
        .subcommand(Command::new("doctor").about("Check the payment store for problems"))
}
