// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn month_arg(required: bool) -> Arg {
    Arg::new("month")
        .long("month")
        .value_name("YYYY-MM")
        .required(required)
        .help("Calendar month, YYYY-MM or a name and year (\"March 2025\")")
}

pub fn build_cli() -> Command {
    Command::new("subtrack")
        .version(crate_version!())
        .about("Calendar-driven personal finance tracker")
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .value_name("PATH")
                .help("Use this SQLite file instead of the platform data dir"),
        )
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("op")
                .about("Financial operations")
                .subcommand(
                    Command::new("add")
                        .about("Record an operation (negative amount = expense)")
                        .arg(Arg::new("title").long("title").required(true))
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .required(true)
                                .allow_hyphen_values(true),
                        )
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .value_name("YYYY-MM-DD")
                                .required(true),
                        )
                        .arg(Arg::new("category").long("category").default_value("Other"))
                        .arg(
                            Arg::new("kind")
                                .long("kind")
                                .value_name("recurrent|unique")
                                .default_value("unique"),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List operations visible in a month")
                        .arg(month_arg(false))
                        .arg(
                            Arg::new("day")
                                .long("day")
                                .value_parser(value_parser!(u32))
                                .requires("month"),
                        ),
                ))
                .subcommand(
                    Command::new("rm").about("Delete an operation").arg(
                        Arg::new("id")
                            .long("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                )
                .subcommand(
                    Command::new("export")
                        .about("Export every operation")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("csv")
                                .value_name("csv|json"),
                        )
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(
            Command::new("budget")
                .about("Monthly budgets")
                .subcommand(
                    Command::new("set")
                        .arg(month_arg(true))
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .required(true)
                                .allow_hyphen_values(true),
                        ),
                )
                .subcommand(json_flags(Command::new("show").arg(month_arg(true)))),
        )
        .subcommand(
            Command::new("income")
                .about("Monthly incomes")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("title").long("title").required(true))
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .required(true)
                                .allow_hyphen_values(true),
                        )
                        .arg(month_arg(true)),
                )
                .subcommand(json_flags(Command::new("list").arg(month_arg(true)))),
        )
        .subcommand(json_flags(
            Command::new("balance")
                .about("Budget + income + operations for a month")
                .arg(month_arg(false)),
        ))
        .subcommand(
            Command::new("calendar")
                .about("Show the month grid with its operations and balance")
                .arg(month_arg(false))
                .arg(
                    Arg::new("prev")
                        .long("prev")
                        .value_parser(value_parser!(u32))
                        .default_value("0"),
                )
                .arg(
                    Arg::new("next")
                        .long("next")
                        .value_parser(value_parser!(u32))
                        .default_value("0"),
                )
                .arg(
                    Arg::new("select")
                        .long("select")
                        .value_name("DAY")
                        .value_parser(value_parser!(u32)),
                ),
        )
        .subcommand(Command::new("categories").about("Suggested categories"))
        .subcommand(
            Command::new("config")
                .about("Persisted settings")
                .subcommand(Command::new("show"))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("key").long("key").required(true))
                        .arg(Arg::new("value").long("value").required(true)),
                ),
        )
}
