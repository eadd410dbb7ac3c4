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

fn filter_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("search")
            .long("search")
            .short('s')
            .help("Case-insensitive text in description, category or location"),
    )
    .arg(
        Arg::new("category")
            .long("category")
            .short('c')
            .help("Only this category ('All Categories' for none)"),
    )
    .arg(Arg::new("from").long("from").help("Start date, inclusive (YYYY-MM-DD)"))
    .arg(Arg::new("to").long("to").help("End date, inclusive (YYYY-MM-DD)"))
    .arg(
        Arg::new("sort")
            .long("sort")
            .default_value("date-desc")
            .help("date-desc|date-asc|amount-desc|amount-asc|category-asc"),
    )
}

pub fn build_cli() -> Command {
    Command::new("pocketledger")
        .about("Personal expense tracker with category, trend and budget analytics")
        .version(clap::crate_version!())
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .env("POCKETLEDGER_DB")
                .value_parser(value_parser!(std::path::PathBuf))
                .help("Path to the ledger database"),
        )
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("expense")
                .about("Record, list and remove expenses")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("amount").long("amount").short('a').required(true))
                        .arg(
                            Arg::new("description")
                                .long("description")
                                .short('d')
                                .required(true),
                        )
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .short('c')
                                .help("Defaults to the configured default category"),
                        )
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .help("YYYY-MM-DD or ISO date-time; defaults to today"),
                        )
                        .arg(Arg::new("location").long("location").short('l')),
                )
                .subcommand(json_args(filter_args(
                    Command::new("list").arg(
                        Arg::new("limit")
                            .long("limit")
                            .value_parser(value_parser!(usize)),
                    ),
                )))
                .subcommand(Command::new("rm").arg(Arg::new("id").required(true))),
        )
        .subcommand(
            Command::new("report")
                .about("Totals, breakdowns, trends and budget")
                .subcommand(json_args(filter_args(Command::new("summary"))))
                .subcommand(json_args(filter_args(Command::new("by-category"))))
                .subcommand(json_args(filter_args(
                    Command::new("top").arg(
                        Arg::new("n")
                            .long("n")
                            .short('n')
                            .default_value("5")
                            .value_parser(value_parser!(usize)),
                    ),
                )))
                .subcommand(json_args(filter_args(
                    Command::new("trend").arg(
                        Arg::new("granularity")
                            .long("granularity")
                            .short('g')
                            .default_value("month")
                            .help("month|quarter|year"),
                    ),
                )))
                .subcommand(json_args(filter_args(Command::new("highest-day"))))
                .subcommand(json_args(
                    Command::new("recent").about("Latest expenses by date").arg(
                        Arg::new("n")
                            .long("n")
                            .short('n')
                            .default_value("3")
                            .value_parser(value_parser!(usize)),
                    ),
                ))
                .subcommand(json_args(
                    Command::new("budget")
                        .arg(Arg::new("month").long("month").help("YYYY-MM, defaults to this month")),
                )),
        )
        .subcommand(
            Command::new("settings")
                .about("Currency, budget and defaults")
                .subcommand(json_args(Command::new("show")))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("currency").long("currency"))
                        .arg(Arg::new("budget").long("budget"))
                        .arg(Arg::new("default_category").long("default-category"))
                        .arg(
                            Arg::new("notifications")
                                .long("notifications")
                                .help("on|off"),
                        ),
                )
                .subcommand(
                    Command::new("reset")
                        .about("Delete every expense and restore default settings")
                        .arg(
                            Arg::new("yes")
                                .long("yes")
                                .action(ArgAction::SetTrue)
                                .help("Confirm"),
                        ),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Write expenses or reports to a file")
                .subcommand(filter_args(
                    Command::new("transactions")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .short('f')
                                .default_value("csv")
                                .help("csv|json"),
                        )
                        .arg(Arg::new("out").long("out").short('o')),
                ))
                .subcommand(Command::new("backup").arg(Arg::new("out").long("out").short('o')))
                .subcommand(Command::new("report").arg(Arg::new("out").long("out").short('o'))),
        )
        .subcommand(
            Command::new("import")
                .about("Restore data from a backup")
                .subcommand(
                    Command::new("backup")
                        .arg(Arg::new("file").long("file").required(true))
                        .arg(
                            Arg::new("replace")
                                .long("replace")
                                .action(ArgAction::SetTrue)
                                .help("Replace existing data instead of merging"),
                        ),
                )
                .subcommand(
                    Command::new("csv")
                        .about("Date,Description,Category,Amount,Location rows")
                        .arg(Arg::new("file").long("file").required(true)),
                ),
        )
}
