// Copyright (c) 2025 Thriftbook.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

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
            .help("Print as JSON lines"),
    )
}

fn req(name: &'static str) -> Arg {
    Arg::new(name).long(name).required(true)
}

fn opt(name: &'static str) -> Arg {
    Arg::new(name).long(name)
}

pub fn build_cli() -> Command {
    Command::new("thriftbook")
        .about("Personal income/expense tracking, budgets, loans, lendings, and savings goals")
        .subcommand_required(false)
        .subcommand(
            Command::new("register")
                .about("Create an account")
                .arg(req("name"))
                .arg(req("email"))
                .arg(req("password"))
                .arg(req("confirm-password")),
        )
        .subcommand(
            Command::new("login")
                .about("Sign in and open a session")
                .arg(req("email"))
                .arg(req("password")),
        )
        .subcommand(Command::new("logout").about("Close the current session"))
        .subcommand(Command::new("whoami").about("Show the signed-in user"))
        .subcommand(
            Command::new("passwd")
                .about("Change the password of the signed-in user")
                .arg(req("current"))
                .arg(req("new")),
        )
        .subcommand(
            Command::new("forgot-password")
                .about("Request a password reset code")
                .arg(req("email")),
        )
        .subcommand(
            Command::new("reset-password")
                .about("Reset a password with a previously issued code")
                .arg(req("email"))
                .arg(req("otp"))
                .arg(req("password"))
                .arg(req("confirm-password")),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and list transactions")
                .subcommand(
                    Command::new("add")
                        .arg(req("date"))
                        .arg(req("amount"))
                        .arg(req("category"))
                        .arg(req("type").help("income|expense"))
                        .arg(opt("description"))
                        .arg(opt("payment-method")),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(opt("month").value_parser(value_parser!(u32).range(1..=12)))
                        .arg(opt("year").value_parser(value_parser!(i32)))
                        .arg(opt("category"))
                        .arg(opt("type"))
                        .arg(opt("limit").value_parser(value_parser!(usize))),
                ))
                .subcommand(
                    Command::new("edit")
                        .arg(req("id").value_parser(value_parser!(i64)))
                        .arg(opt("date"))
                        .arg(opt("amount"))
                        .arg(opt("category"))
                        .arg(opt("type"))
                        .arg(opt("description"))
                        .arg(opt("payment-method")),
                )
                .subcommand(Command::new("rm").arg(req("id").value_parser(value_parser!(i64)))),
        )
        .subcommand(
            Command::new("budget")
                .about("Monthly category budgets")
                .subcommand(
                    Command::new("set")
                        .arg(req("category"))
                        .arg(req("amount")),
                )
                .subcommand(
                    Command::new("edit")
                        .arg(req("id").value_parser(value_parser!(i64)))
                        .arg(req("amount")),
                )
                .subcommand(Command::new("rm").arg(req("id").value_parser(value_parser!(i64))))
                .subcommand(json_flags(Command::new("report"))),
        )
        .subcommand(
            Command::new("loan")
                .about("Money you borrowed")
                .subcommand(
                    Command::new("add")
                        .arg(req("creditor"))
                        .arg(req("amount"))
                        .arg(req("date").help("Origination date, YYYY-MM-DD"))
                        .arg(req("due").help("Due date, YYYY-MM-DD"))
                        .arg(opt("interest").help("Percent per year"))
                        .arg(opt("description")),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("edit")
                        .arg(req("id").value_parser(value_parser!(i64)))
                        .arg(opt("creditor"))
                        .arg(opt("amount"))
                        .arg(opt("date"))
                        .arg(opt("due"))
                        .arg(opt("interest"))
                        .arg(opt("description")),
                )
                .subcommand(Command::new("rm").arg(req("id").value_parser(value_parser!(i64))))
                .subcommand(
                    Command::new("settle")
                        .about("Toggle the paid flag")
                        .arg(req("id").value_parser(value_parser!(i64))),
                )
                .subcommand(json_flags(Command::new("status"))),
        )
        .subcommand(
            Command::new("lending")
                .about("Money you lent out")
                .subcommand(
                    Command::new("add")
                        .arg(req("borrower"))
                        .arg(req("amount"))
                        .arg(req("date").help("Lending date, YYYY-MM-DD"))
                        .arg(req("due").help("Due date, YYYY-MM-DD"))
                        .arg(opt("interest").help("Percent per year"))
                        .arg(opt("description")),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("edit")
                        .arg(req("id").value_parser(value_parser!(i64)))
                        .arg(opt("borrower"))
                        .arg(opt("amount"))
                        .arg(opt("date"))
                        .arg(opt("due"))
                        .arg(opt("interest"))
                        .arg(opt("description")),
                )
                .subcommand(Command::new("rm").arg(req("id").value_parser(value_parser!(i64))))
                .subcommand(
                    Command::new("settle")
                        .about("Toggle the repaid flag")
                        .arg(req("id").value_parser(value_parser!(i64))),
                )
                .subcommand(json_flags(Command::new("status"))),
        )
        .subcommand(
            Command::new("saving")
                .about("Savings goals")
                .subcommand(
                    Command::new("add")
                        .arg(req("name"))
                        .arg(req("target"))
                        .arg(req("start").help("Start date, YYYY-MM-DD"))
                        .arg(req("due").help("Target date, YYYY-MM-DD"))
                        .arg(opt("initial").help("Amount already saved"))
                        .arg(opt("priority").help("high|medium|low"))
                        .arg(opt("description")),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("edit")
                        .arg(req("id").value_parser(value_parser!(i64)))
                        .arg(opt("name"))
                        .arg(opt("target"))
                        .arg(opt("start"))
                        .arg(opt("due"))
                        .arg(opt("priority"))
                        .arg(opt("description")),
                )
                .subcommand(Command::new("rm").arg(req("id").value_parser(value_parser!(i64))))
                .subcommand(
                    Command::new("contribute")
                        .arg(req("id").value_parser(value_parser!(i64)))
                        .arg(req("amount")),
                )
                .subcommand(
                    Command::new("complete")
                        .about("Toggle the completed flag")
                        .arg(req("id").value_parser(value_parser!(i64))),
                )
                .subcommand(json_flags(Command::new("status"))),
        )
        .subcommand(
            Command::new("report")
                .about("Aggregated views over transactions")
                .subcommand(json_flags(Command::new("overview")))
                .subcommand(json_flags(
                    Command::new("monthly").arg(req("year").value_parser(value_parser!(i32))),
                ))
                .subcommand(json_flags(
                    Command::new("categories")
                        .arg(req("month").value_parser(value_parser!(u32).range(1..=12)))
                        .arg(req("year").value_parser(value_parser!(i32))),
                ))
                .subcommand(json_flags(
                    Command::new("calendar")
                        .arg(opt("month").value_parser(value_parser!(u32).range(1..=12)))
                        .arg(opt("year").value_parser(value_parser!(i32))),
                )),
        )
        .subcommand(
            Command::new("export").about("Export collections").subcommand(
                Command::new("transactions")
                    .arg(
                        opt("format")
                            .default_value("csv")
                            .help("csv|json"),
                    )
                    .arg(req("out")),
            ),
        )
        .subcommand(
            Command::new("settings")
                .about("Local settings")
                .subcommand(
                    Command::new("dev-mode").arg(req("value").help("on|off")),
                )
                .subcommand(Command::new("show")),
        )
}
